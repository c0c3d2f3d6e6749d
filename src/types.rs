//! Core types used throughout the project.

use serde::{
    Deserialize,
    Serialize,
};

/// Text direction of the rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    /// HTML `dir` attribute value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }

    /// Alignment for the trailing actions column. The original templates
    /// flip `right` to `left` under RTL.
    #[must_use]
    pub const fn actions_align(self) -> &'static str {
        match self {
            Self::Ltr => "right",
            Self::Rtl => "left",
        }
    }
}

/// A UI affordance controlled by the permission gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    View,
    Create,
    Edit,
    Delete,
    Manage,
}
