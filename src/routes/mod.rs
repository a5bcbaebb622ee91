pub mod auth;
pub mod tasks;

use actix_web::web;

use crate::auth::AuthMiddleware;

/// Registers every route. Expects `web::Data<AppState>` on the app.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::signup)
        .service(auth::login)
        .service(auth::logout)
        .service(auth::csrf_token)
        .service(
            web::scope("/tasks")
                .wrap(AuthMiddleware)
                .service(tasks::get_tasks)
                .service(tasks::create_task)
                .service(tasks::get_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        );
}
