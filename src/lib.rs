pub mod config;
pub mod db;
pub mod engine;
pub mod errors;
pub mod feed;
pub mod models;
pub mod reconcile;
pub mod services;
