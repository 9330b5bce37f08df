pub mod config;
pub mod context;
pub mod gallery;
pub mod ownership;
pub mod profile;
pub mod views;
