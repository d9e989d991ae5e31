pub mod handle;
pub mod model;
pub mod route;

pub use model::SiteConfig;
