//! Render error taxonomy and its mapping to response statuses.

use thiserror::Error;

/// Errors that can abort rendering of a single request.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The requested page id is not registered.
    #[error("Unknown page: {0}")]
    UnknownPage(String),

    /// The current user lacks the capability required to view the page.
    #[error("Permission denied for page '{page}'")]
    Forbidden { page: String },

    /// The request envelope could not be decoded.
    #[error("Malformed request: {0}")]
    BadRequest(#[from] serde_json::Error),
}

impl RenderError {
    /// HTTP-style status code the front server should relay.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::UnknownPage(_) => 404,
            Self::Forbidden { .. } => 403,
            Self::BadRequest(_) => 400,
        }
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn status_codes_match_policy() {
        assert_that!(RenderError::UnknownPage("nope".into()).status(), eq(404));
        assert_that!(RenderError::Forbidden { page: "roles".into() }.status(), eq(403));
    }
}
