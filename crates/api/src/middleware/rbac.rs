//! Role-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does
//! not meet the minimum requirement. Use these in route handlers to enforce
//! authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use eventlog_core::error::CoreError;
use eventlog_core::roles::{can_edit_events, can_view_events};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires a role that may view the event listing. Rejects with 403
/// Forbidden otherwise.
pub struct RequireViewer(pub AuthUser);

impl FromRequestParts<AppState> for RequireViewer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !can_view_events(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Viewer role required".into(),
            )));
        }
        Ok(RequireViewer(user))
    }
}

/// Requires a role that may run bulk actions (trash / restore / delete).
/// Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn bulk(RequireEditor(user): RequireEditor) -> AppResult<Redirect> {
///     // user is guaranteed to hold the edit permission here
/// }
/// ```
pub struct RequireEditor(pub AuthUser);

impl FromRequestParts<AppState> for RequireEditor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !can_edit_events(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Editor role required".into(),
            )));
        }
        Ok(RequireEditor(user))
    }
}
