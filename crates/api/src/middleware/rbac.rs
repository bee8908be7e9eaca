//! Admin gate for the chart curation endpoints.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chartdesk_core::error::CoreError;
use chartdesk_core::roles::ROLE_ADMIN;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// An [`AuthUser`] holding the `admin` role. Other roles get 403.
///
/// Taken by every handler under `/admin/charts`.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Only admins can manage submitted charts".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}
