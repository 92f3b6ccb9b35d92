//! CLI commands

pub mod base_dir;
pub mod list;
pub mod new;
pub mod query;
pub mod resume;
pub mod update;

pub use base_dir::{resolve_base_dir, BaseDirCommand};
pub use list::ListCommand;
pub use new::{NewArgs, NewCommand};
pub use query::{QueryCommand, QueryId};
pub use resume::{resume_on_startup, ResumeCommand};
pub use update::UpdateCommand;
