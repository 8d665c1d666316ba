pub mod config;
pub mod confirm;
pub mod controller;
pub mod error;
pub mod model;
pub mod navigation;
pub mod store;
