pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod sim;
pub mod timeline;
pub mod ui;
pub mod video;
