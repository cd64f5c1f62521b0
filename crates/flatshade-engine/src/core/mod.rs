//! Contracts between the window runtime and the application.
//!
//! The runtime owns the event loop and GPU objects; applications only see an
//! [`App`] callback and a per-frame [`FrameCtx`].

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
