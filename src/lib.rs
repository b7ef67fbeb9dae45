pub mod ads;
pub mod app;
pub mod app_state;
pub mod config;
pub mod engine;
pub mod error;
pub mod render;
pub mod scene;
