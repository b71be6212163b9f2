//! Applock TUI Library
//!
//! A terminal chat client that hosts the applock controller: it draws the
//! registration, unlock and lockout prompts, shows notifications as toasts
//! and stores the lock settings in a JSON file.

pub mod app;
pub mod ui;

pub use app::App;
