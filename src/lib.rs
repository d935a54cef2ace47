//! pagekit: struct-based page views on axum.
//!
//! A page is a struct implementing [`View`]; shared per-request behavior
//! (pagination, filtering, auth, htmx detection) lives in embeddable
//! [`mixins`] that the view runs through [`load_all`]. Routes are bound with
//! [`register`] or the fluent [`RouterBuilder`], and rendered through the
//! [`App`]'s minijinja environment or a custom render function.

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod htmx;
pub mod listing;
pub mod mixins;
pub mod pages;
pub mod request;
pub mod response;
pub mod routes;
pub mod template;
pub mod view;

pub use app::{App, RenderFn};
pub use config::TemplateConfig;
pub use error::{BoxError, ConfigError, LoadError, RenderError};
pub use extractors::HxHeaders;
pub use htmx::HtmxResponse;
pub use listing::{EntityListing, SortOption};
pub use mixins::{auth_loader, Auth, AuthProvider, BasePage, Filtering, Htmx, Pagination, Profile};
pub use request::PageRequest;
pub use response::ResponseSink;
pub use routes::{register, register_adaptive, register_group, register_handler, register_with, RouteOptions, RouterBuilder};
pub use template::{setup_templates, TemplateSpec};
pub use view::{load_all, loader, FragmentAware, Flow, LoadResult, Loader, LoaderFn, PageGroup, View};
