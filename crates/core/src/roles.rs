//! Well-known role name constants and permission helpers.
//!
//! These must match the seed data in the `users` table migration.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_VIEWER: &str = "viewer";

/// Whether the given role may view the event log listing.
pub fn can_view_events(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_EDITOR || role == ROLE_VIEWER
}

/// Whether the given role may select rows and run bulk actions
/// (trash / restore / permanent delete).
pub fn can_edit_events(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_EDITOR
}
