pub mod message;
pub mod params;
pub mod template;

pub use crate::domain::DomainError;
pub use message::{DEFAULT_WARNING_STATUS, Message};
pub use params::Params;
pub use template::{MessageTemplate, TemplateMap};
