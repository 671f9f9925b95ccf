//! View and UI layer
//!
//! Terminal controls and the settings editor built from them.

pub mod controls;
pub mod settings;
