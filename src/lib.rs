//! API contract generator
//!
//! Turns a short description of a REST API into a full written contract with
//! a language model, previews it as HTML and exports it as PDF or Word.

pub mod api;
pub mod config;
pub mod models;
pub mod services;
pub mod templates;
