//! Salsa input definitions.

pub mod catalog;
