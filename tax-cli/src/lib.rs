pub mod app;
pub mod cli;
pub mod csv_loader;
pub mod display;
pub mod form;
pub mod logging;
pub mod session;
pub mod utils;

pub use cli::Cli;
