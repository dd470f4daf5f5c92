//! Application layer with the state record and the sync controller.

/// The application-state record.
pub mod state;
/// The sync controller and its call/outcome messages.
pub mod sync;

pub use state::AppState;
pub use sync::{CallOutcome, RemoteCall, SyncController};
