//! The render service: shared state and the NDJSON transport.

pub mod server;
pub mod state;

pub use server::{
    RenderResponse,
    serve,
};
pub use state::{
    RenderedPage,
    RendererState,
};
