pub mod env;
pub mod spec;

pub use env::{register_defaults, setup_templates};
pub use spec::{base_name, TemplateSpec};
