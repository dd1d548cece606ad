//! Win32 layer: the native task dialog call and its supporting machinery.
//! Everything here assumes Windows; the portable model lives at the crate
//! root.

pub mod dispatch;
pub mod hicon;
pub mod modal;
pub mod presenter;
pub mod task_dialog;
