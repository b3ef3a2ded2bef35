//! Error types for pgsql

use thiserror::Error;

/// Result type alias for pgsql operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while rendering a statement.
///
/// Rendering is total except for template substitution: a template with more
/// `?` markers than supplied arguments is a programming error and is reported
/// back to the caller instead of producing half-substituted SQL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A `?` marker had no argument to consume.
    #[error(
        "template `{template}` has no argument for `?` marker #{marker} ({supplied} supplied)"
    )]
    MissingArgument {
        template: String,
        /// 1-based index of the marker that ran out of arguments.
        marker: usize,
        supplied: usize,
    },
}

impl Error {
    pub(crate) fn missing_argument(template: &str, marker: usize, supplied: usize) -> Self {
        Self::MissingArgument {
            template: template.to_string(),
            marker,
            supplied,
        }
    }

    /// Check if this is a template/argument mismatch.
    pub fn is_missing_argument(&self) -> bool {
        matches!(self, Self::MissingArgument { .. })
    }
}
