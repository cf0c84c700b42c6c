//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the
//! high-level use cases: create, update, validate and scaffold.

mod checks;
pub mod project_service;
pub mod template_service;
pub mod validation_service;

pub use project_service::{Advisory, CreateOutcome, ProjectService};
pub use template_service::{ScriptChange, TemplateService, UpdatePlan};
pub use validation_service::ValidationService;
