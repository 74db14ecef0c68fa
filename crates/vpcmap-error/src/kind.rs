//! Error kinds for vpcmap operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// This enum categorizes errors to help users write clear error handling logic.
/// Users can match on ErrorKind to decide how to handle specific error cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// An unexpected error occurred - catch-all for unhandled cases
    Unexpected,

    /// The requested feature or operation is not supported
    Unsupported,

    /// Invalid configuration or parameters
    ConfigInvalid,

    /// Invalid argument passed to function
    InvalidArgument,

    // =========================================================================
    // Snapshot errors
    // =========================================================================
    /// Scan snapshot failed to decode or is structurally invalid
    SnapshotInvalid,

    /// A resource type tag not present in the closed kind set
    UnknownResourceKind,

    /// A CIDR block that does not parse as dotted-quad/prefix
    InvalidCidr,

    // =========================================================================
    // Graph errors
    // =========================================================================
    /// Resource not found in the VPC graph
    ResourceNotFound,

    /// Resource id already present with a different identity
    DuplicateResource,

    /// A resource kind missing from the level table
    UnclassifiedKind,

    // =========================================================================
    // Output errors
    // =========================================================================
    /// DOT rendering failed
    RenderFailed,

    /// Report generation failed
    ReportFailed,

    /// Invoking the external `dot` rasterizer failed
    RasterizerFailed,

    // =========================================================================
    // File/IO errors
    // =========================================================================
    /// File not found
    FileNotFound,

    /// Permission denied
    PermissionDenied,

    /// IO operation failed
    IoFailed,

    // =========================================================================
    // Collaborator errors (surfaced by the scanning side)
    // =========================================================================
    /// Provider control-plane throttled the caller
    Throttled,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Check if this error kind is retryable by default
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Throttled | ErrorKind::IoFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::SnapshotInvalid.to_string(), "SnapshotInvalid");
        assert_eq!(
            ErrorKind::UnknownResourceKind.to_string(),
            "UnknownResourceKind"
        );
    }

    #[test]
    fn test_is_retryable() {
        assert!(ErrorKind::Throttled.is_retryable());
        assert!(ErrorKind::IoFailed.is_retryable());
        assert!(!ErrorKind::SnapshotInvalid.is_retryable());
        assert!(!ErrorKind::RenderFailed.is_retryable());
    }
}
