//! Native Windows modal message boxes.
//!
//! A portable request (kind, ordered buttons, cancel index, title, message,
//! optional detail, optional icon) is translated into a single
//! `TaskDialogIndirect` invocation. The dialog can run blocking on the
//! calling thread, or on a dedicated worker thread with the chosen button
//! index delivered back to the calling thread through its message queue.
//!
//! ```ignore
//! use msgboxrs::{MessageBoxKind, MessageBoxRequest};
//!
//! let request = MessageBoxRequest::new(MessageBoxKind::Warning)
//!     .title("Unsaved changes")
//!     .message("Close without saving?")
//!     .detail("Your edits from the last 10 minutes will be lost.")
//!     .buttons(["Close", "Cancel"])
//!     .cancel_index(1);
//!
//! let picked = msgboxrs::show(None, &request);
//! if picked == 0 {
//!     // user chose "Close"
//! }
//! ```
//!
//! The crate requires a comctl32 v6 application manifest for the task dialog
//! API, like every `TaskDialogIndirect` consumer. The request model, result
//! mapping and icon resolution are pure and compile on every platform; only
//! the `ui` module talks to Win32.

pub mod icon;
pub mod logger;
pub mod request;
pub mod utils;

#[cfg(windows)]
pub mod ui;

pub use icon::{BuiltinIcon, IconImage, ResolvedIcon, resolve_icon};
pub use request::{BUTTON_ID_OFFSET, ContentLayout, MessageBoxKind, MessageBoxRequest};

#[cfg(windows)]
pub use ui::presenter::{ParentWindow, show, show_async, show_channel, show_error_box};
