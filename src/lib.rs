//! Distill PDF-to-Markdown Gateway
//!
//! A thin service and client pair that forwards uploaded PDF documents to a
//! remote extraction service and hands back the Markdown it produces.

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod session;

pub use config::Config;
pub use error::{AppError, AppResult};
