//! Reusable per-request state to embed in views with `#[serde(flatten)]`.
//!
//! Each mixin is a [`Loader`](crate::view::Loader) for every application
//! context type, so views can hand them straight to
//! [`load_all`](crate::view::load_all).

pub mod auth;
pub mod base;
pub mod filtering;
pub mod htmx;
pub mod pagination;

pub use auth::{auth_loader, Auth, AuthLoader, AuthProvider, Profile};
pub use base::{BasePage, DEFAULT_BODY_CLASS};
pub use filtering::{Filtering, DEFAULT_SORT, DEFAULT_VIEW_MODE};
pub use htmx::Htmx;
pub use pagination::{page_window, Pagination, DEFAULT_PAGE_SIZE, MAX_PAGE, MAX_PAGE_SIZE};
