pub mod config_io;
pub mod shell;
pub mod store;
