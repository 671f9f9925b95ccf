//! Runtime services for the terminal host

pub mod tracing_setup;
