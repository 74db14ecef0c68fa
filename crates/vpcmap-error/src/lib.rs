//! # vpcmap-error
//!
//! Unified error handling for vpcmap.
//!
//! ## Design Philosophy
//!
//! - **ErrorKind**: Know what error occurred (e.g., SnapshotInvalid, RenderFailed)
//! - **ErrorStatus**: Decide how to handle it (Permanent, Temporary, Persistent)
//! - **Error Context**: Assist in locating the cause with rich context
//! - **Error Source**: Wrap underlying errors without leaking raw types
//!
//! ## Usage
//!
//! ```rust
//! use vpcmap_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::SnapshotInvalid, "missing vpc header")
//!         .with_operation("snapshot::load")
//!         .with_context("path", "scan/vpc-0a1.json"))
//! }
//! ```
//!
//! ## Principles
//!
//! - All fallible functions return `Result<T, vpcmap_error::Error>`
//! - External errors are wrapped with `set_source(err)`
//! - Same error handled once, subsequent ops only append context
//! - Don't abuse `From<OtherError>` to prevent raw error leakage

mod error;
mod kind;
mod status;

pub use error::Error;
pub use kind::ErrorKind;
pub use status::ErrorStatus;

/// Result type alias using vpcmap Error
pub type Result<T> = std::result::Result<T, Error>;
