//! Line-delimited JSON transport.
//!
//! The front server writes one request object per line and reads one
//! response object per line, in order. Malformed lines produce a 400
//! response and do not kill the loop.

use serde::{
    Deserialize,
    Serialize,
};
use tokio::io::{
    AsyncBufReadExt,
    AsyncRead,
    AsyncWrite,
    AsyncWriteExt,
    BufReader,
};

use crate::error::RenderError;
use crate::render::html::escape;
use crate::service::state::RendererState;

/// One response line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResponse {
    pub page: String,
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

impl RenderResponse {
    fn ok(page: String, body: String) -> Self {
        Self { page, status: 200, content_type: CONTENT_TYPE.to_string(), body }
    }

    fn error(page: String, error: &RenderError) -> Self {
        Self {
            page,
            status: error.status(),
            content_type: CONTENT_TYPE.to_string(),
            body: format!("<div class=\"alert\">{}</div>\n", escape(&error.to_string())),
        }
    }
}

const CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Serves requests from `reader` until EOF, writing responses to `writer`.
///
/// # Errors
/// Returns transport I/O errors; render failures become error responses.
pub async fn serve<R, W>(state: RendererState, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(&state, &line).await;
        let Ok(serialized) = serde_json::to_string(&response) else {
            tracing::error!(page = response.page, "Failed to serialize response");
            continue;
        };

        writer.write_all(serialized.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    tracing::info!("Request stream closed, shutting down");
    Ok(())
}

async fn handle_line(state: &RendererState, line: &str) -> RenderResponse {
    match serde_json::from_str(line) {
        Ok(request) => match state.render(&request).await {
            Ok(page) => RenderResponse::ok(page.page, page.body),
            Err(error) => {
                tracing::warn!(status = error.status(), "Render failed: {error}");
                RenderResponse::error(request_page(line), &error)
            }
        },
        Err(parse_error) => {
            tracing::warn!("Discarding malformed request line: {parse_error}");
            RenderResponse::error(String::new(), &RenderError::BadRequest(parse_error))
        }
    }
}

/// Best-effort page id for error responses.
fn request_page(line: &str) -> String {
    serde_json::from_str::<serde_json::Value>(line)
        .ok()
        .and_then(|value| value.get("page").and_then(|page| page.as_str()).map(str::to_string))
        .unwrap_or_default()
}
