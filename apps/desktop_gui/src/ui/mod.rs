//! UI layer for the swap desktop app.

pub mod app;

pub use app::SwapDeskApp;
