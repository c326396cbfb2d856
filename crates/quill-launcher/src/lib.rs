//! Presentation boundary of the Quill launcher.
//!
//! The window and render loop belong to the UI shell; everything it needs to
//! render or trigger lives here:
//! - [`Session`]: the once-per-start update decision, status line, progress
//!   handle, and action triggers.
//! - [`ActionOutcome`]: whether an action handed off to the managed app.
//! - [`init_logging`]: file (and debug-build terminal) logging.

mod logging;
mod session;

pub use logging::init_logging;
pub use session::{ActionOutcome, Session};
