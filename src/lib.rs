//! admin-fragment-renderer
//!
//! Render service for admin panel page fragments: translation catalog
//! loading, session-derived permission gating, theme CSS variables, and
//! HTML fragment assembly, served as line-delimited JSON over stdio.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod indexer;
pub mod input;
pub mod ir;
pub mod render;
pub mod request;
pub mod service;
pub mod theme;
pub mod types;

#[cfg(test)]
pub mod test_utils;

pub use error::RenderError;
pub use service::{
    RendererState,
    serve,
};
