pub mod app;
pub mod clock_handler;
pub mod config;
pub mod db_handler;
pub mod error;
pub mod middleware;
