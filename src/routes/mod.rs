//! Route registration: views, adaptive views, page groups, plain handlers.

pub mod builder;
pub mod options;
pub mod register;

pub use builder::RouterBuilder;
pub use options::RouteOptions;
pub use register::{register, register_adaptive, register_group, register_handler, register_with};
