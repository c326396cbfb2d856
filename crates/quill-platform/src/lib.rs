//! Platform integration for the Quill launcher: filesystem locations and the
//! managed-application handoff.

mod launch;
mod paths;

/// Managed executable naming and detached spawn.
pub use launch::{launch_managed, managed_executable_name, managed_executable_path};
/// Per-user launcher directories and file locations.
pub use paths::{AppPaths, AppPathsError};
