mod app;
mod canvas_module;
pub mod config;
pub mod editor;
pub mod error;
pub mod log;
pub mod mapping;
pub mod regression;
mod table_module;

pub use app::FitApp;
pub use config::Config;
