//! Screen modules for different views

pub mod change_passcode;
pub mod chat;
pub mod lockout;
pub mod registration;
pub mod unlock;
