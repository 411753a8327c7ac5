pub mod error;
pub mod page;
pub mod project;

pub use error::{PageloomError, RecoveryError, Result};
pub use page::{HOME_SLUG, PageRecord};
pub use project::{EnvVar, FileEntry, FileKind, ProjectDescriptor, ProjectKind};
