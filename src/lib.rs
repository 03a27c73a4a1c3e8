pub mod app;
pub mod auth;
pub mod comeback;
pub mod config;
pub mod consts;
pub mod errors;
pub mod handlers;
pub mod identity;
pub mod llm_client;
pub mod models;
pub mod service;
pub mod tools;
