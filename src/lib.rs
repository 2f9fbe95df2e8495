pub mod app;
pub mod config;
pub mod demo_feed;
pub mod export;
pub mod feed;
pub mod http_client;
pub mod state;
pub mod stats_engine;
pub mod stats_fetch;
pub mod ui;
pub mod view;
