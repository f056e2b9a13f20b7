pub mod config;
pub mod parse;
pub mod shell;
pub mod timer;
