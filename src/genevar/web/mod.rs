pub mod config;
pub mod server;
pub mod simple_pages;
