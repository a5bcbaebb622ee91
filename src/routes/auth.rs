use crate::{error::AppError, models::Credentials, state::AppState};
use actix_web::{get, post, web, HttpResponse, Responder};
use log::error;

/// Register a new user
///
/// ## Responses:
/// - `201 Created`: `{id, email}` of the new user.
/// - `400 Bad Request`: validation failure; body is the validation message.
/// - `500 Internal Server Error`: storage failure, including a taken email.
#[post("/signup")]
pub async fn signup(
    state: web::Data<AppState>,
    body: web::Json<Credentials>,
) -> Result<impl Responder, AppError> {
    let user = state.users.sign_up(&body.email, &body.password).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Login user
///
/// On success the credential is set as an `HttpOnly` cookie and the body is
/// empty. Every failure other than an internal fault is reported as 401.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<Credentials>,
) -> Result<impl Responder, AppError> {
    let token = match state.users.login(&body.email, &body.password).await {
        Ok(token) => token,
        Err(AppError::Internal(msg)) => {
            error!("login failed internally: {}", msg);
            return Err(AppError::Internal(msg));
        }
        Err(AppError::Unauthenticated(msg)) => return Err(AppError::Unauthenticated(msg)),
        Err(other) => return Err(AppError::Unauthenticated(other.to_string())),
    };

    Ok(HttpResponse::Ok()
        .cookie(state.cookies.login_cookie(token))
        .finish())
}

#[post("/logout")]
pub async fn logout(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok()
        .cookie(state.cookies.logout_cookie())
        .finish()
}

/// Returns the anti-forgery token as `{"csrf": <token>}`.
#[get("/csrf")]
pub async fn csrf_token(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(&state.csrf)
}
