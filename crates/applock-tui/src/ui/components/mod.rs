//! Reusable UI components

pub mod notification;
pub mod passcode_field;
