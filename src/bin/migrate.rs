use taskvault::{config::Config, db};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let result = async {
        let config = Config::from_env()?;
        let pool = db::connect(&config).await?;
        db::migrate(&pool).await?;
        pool.close().await;
        Ok::<_, taskvault::AppError>(())
    }
    .await;

    result.map_err(|e| {
        log::error!("{}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })
}
