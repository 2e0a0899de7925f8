use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No authenticated user in the session.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("No authenticated user in session")]
    NotAuthenticated,

    /// The session user does not manage the requested guild.
    ///
    /// The MANAGE_GUILD permission bit was missing from the session's cached
    /// guild list for this guild. Results in a 403 Forbidden response.
    #[error("User lacks manage-guild permission for guild {0}")]
    GuildPermissionDenied(u64),

    /// CSRF state validation failed during OAuth callback.
    ///
    /// The state token in the callback URL does not match the token stored
    /// in the session. Results in a 400 Bad Request response.
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,

    /// Token exchange with Discord failed.
    ///
    /// Results in a 400 Bad Request response.
    #[error("OAuth code exchange failed: {0}")]
    CodeExchangeFailed(String),
}

/// Converts authentication errors into HTTP responses.
///
/// Client-facing messages stay generic; the full error is logged at debug
/// level for diagnostics.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("auth error: {}", self);

        match self {
            Self::NotAuthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "Not logged in".to_string(),
                }),
            )
                .into_response(),
            Self::GuildPermissionDenied(_) => (
                StatusCode::FORBIDDEN,
                Json(ErrorDto {
                    error: "No permission".to_string(),
                }),
            )
                .into_response(),
            Self::CsrfValidationFailed | Self::CodeExchangeFailed(_) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorDto {
                    error: "There was an issue logging you in, please try again.".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
