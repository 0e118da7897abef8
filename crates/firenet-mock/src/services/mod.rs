pub mod counters;
pub mod credentials;
pub mod templates;

pub use counters::Counters;
pub use credentials::CredentialPolicy;
pub use templates::{FileTemplateStore, TemplateError, TemplateSource};
