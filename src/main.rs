use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use log::{error, info};

use taskvault::{
    config::Config,
    db,
    repository::{PgTaskRepository, PgUserRepository},
    routes, AppError, AppState,
};

fn cors(frontend_url: Option<&str>) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "PUT", "POST", "DELETE"])
        .allowed_headers(vec![
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
            header::HeaderName::from_static("x-csrf-token"),
        ])
        .supports_credentials()
        .max_age(3600);
    match frontend_url {
        Some(origin) => cors.allowed_origin(origin),
        None => cors,
    }
}

async fn build_state(config: &Config) -> Result<AppState, AppError> {
    let pool = db::connect(config).await?;
    Ok(AppState::new(
        config,
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgTaskRepository::new(pool)),
    ))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let startup = async {
        let config = Config::from_env()?;
        let state = build_state(&config).await?;
        Ok::<_, AppError>((config, state))
    };
    let (config, state) = match startup.await {
        Ok(ready) => ready,
        Err(e) => {
            error!("startup failed: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    info!("starting taskvault at {}", config.server_url());
    let state = web::Data::new(state);
    let frontend_url = config.frontend_url.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors(frontend_url.as_deref()))
            .wrap(Logger::default())
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
