//! # vpcmap-core
//!
//! The resource graph model behind vpcmap: discovered resources and their
//! directed relations, the fixed hierarchy of rendering levels, and the
//! containment analysis that decides which resources nest inside a single
//! zone or subnet.
//!
//! The graph is populated once by a scanning collaborator and is read-only
//! afterwards; everything in this crate is a deterministic pure function
//! over that immutable graph.

pub mod arn;
pub mod containment;
pub mod graph;
pub mod level;
pub mod pricing;
pub mod report;
pub mod resource;

pub use containment::Containment;
pub use graph::{AvailabilityZone, Relation, VpcGraph};
pub use level::Levels;
pub use pricing::PriceBook;
pub use resource::{Category, Resource, ResourceDetail, ResourceKind};

pub use vpcmap_error::{Error, ErrorKind, Result};
