//! # Doable API Server Library
//!
//! Core functionality for the Doable API server.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `mailer`: Verification-notice dispatch
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod mailer;
pub mod routes;
