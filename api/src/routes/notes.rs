//! Notes handlers

use actix_web::{web, HttpResponse};

use nk_core::repositories::{UserRepository, VerificationRepository};
use nk_core::services::EmailSender;

use crate::app::AppState;
use crate::handlers::ApiError;

/// GET /users/{username}/notes
///
/// Page metadata for a user's notes listing; 404 for unknown users.
pub async fn index<U, R, E>(
    state: web::Data<AppState<U, R, E>>,
    username: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    R: VerificationRepository + 'static,
    E: EmailSender + 'static,
{
    let meta = state.notes.index_meta(&username).await?;
    Ok(HttpResponse::Ok().json(meta))
}
