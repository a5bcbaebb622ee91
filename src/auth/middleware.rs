use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use log::{debug, warn};

use super::session::AUTH_COOKIE;
use crate::error::AppError;
use crate::state::AppState;

/// Guards a scope: every request must carry a valid credential, either as
/// `Authorization: Bearer <token>` or in the auth cookie.
///
/// A request that fails verification is answered with 401 before any handler
/// runs. On success the owner identity is stored in the request's extensions
/// for `AuthenticatedUser` to pick up.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

/// A non-empty bearer header wins over the cookie when both are present.
fn credential(req: &ServiceRequest) -> Option<String> {
    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty());

    bearer.or_else(|| {
        req.cookie(AUTH_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|token| !token.is_empty())
    })
}

fn authorize(req: &ServiceRequest) -> Result<(), AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::Internal("application state is not configured".into()))?;

    let token = credential(req).ok_or_else(|| AppError::Unauthenticated("missing token".into()))?;
    let user_id = state.tokens.authenticate(&token)?;

    debug!("authorized user {} for {} {}", user_id, req.method(), req.path());
    req.extensions_mut().insert(user_id);
    Ok(())
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authorize(&req) {
            Ok(()) => Box::pin(self.service.call(req)),
            Err(app_err) => {
                warn!("rejected {} {}: {}", req.method(), req.path(), app_err);
                Box::pin(async move { Err(app_err.into()) })
            }
        }
    }
}
