//! Intermediate representations built from inputs.

pub mod strings;
