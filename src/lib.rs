// Core modules
pub mod cli;
pub mod config;
pub mod core;
pub mod infrastructure;

// Review pipeline and presentation
pub mod review;
pub mod shell;
