//! HTML rendering: page descriptors, the fragment renderer, document
//! chrome, and the client bootstrap.

pub mod bootstrap;
pub mod chrome;
pub mod fragment;
pub mod html;
pub mod pages;

pub use fragment::{
    ColumnSpec,
    FieldSpec,
    FragmentSpec,
    render_fragment,
};
