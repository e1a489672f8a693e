//! Wire types shared between the log dashboard and the log backend.

pub mod enums;
pub mod system;
