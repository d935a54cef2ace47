pub mod htmx;

pub use htmx::HxHeaders;
