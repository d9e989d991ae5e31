pub mod handle;
pub mod model;
pub mod route;
pub mod service;
pub mod template;
pub mod upload;

pub use model::SubmissionConfig;
pub use service::SubmissionService;
