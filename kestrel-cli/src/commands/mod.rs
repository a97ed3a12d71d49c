//! CLI command implementations

pub mod crud;
pub mod new;
pub mod sync;

pub use crud::CrudCommand;
pub use new::NewCommand;
pub use sync::SyncCommand;
