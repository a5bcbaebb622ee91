use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;
use crate::models::UserId;

/// The verified owner identity of the current request.
///
/// `AuthMiddleware` stores the identity in the request's extensions after the
/// credential checks out; this extractor hands it to the handler, which then
/// passes it explicitly into the service layer. The extensions belong to a
/// single request, so an identity never outlives it.
///
/// On a route that is not behind the middleware there is nothing to extract
/// and the request fails with `Unauthenticated`.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub UserId);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<UserId>().copied() {
            Some(user_id) => ready(Ok(AuthenticatedUser(user_id))),
            None => {
                let err = AppError::Unauthenticated("no verified identity on request".into());
                ready(Err(err.into()))
            }
        }
    }
}
