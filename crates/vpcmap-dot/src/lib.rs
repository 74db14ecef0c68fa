//! Graph rendering module for producing DOT format output.
//!
//! This crate transforms a populated [`VpcGraph`] into a hierarchical DOT
//! description for Graphviz: zone and subnet clusters nested inside one VPC
//! cluster, shared regions for resources spanning zones, and a routed edge
//! list with back-edge suppression and ENI/route-table rank alignment.
//!
//! # Module Structure
//!
//! - [`dot`]: DOT format utilities (sanitization, escaping, icons)
//! - [`layout`]: region partitioning driven by levels and containment
//! - [`edge`]: edge routing and synthesis
//! - [`render`]: digraph emission

pub mod dot;
pub mod edge;
pub mod layout;
pub mod render;

use vpcmap_core::{Containment, Levels, PriceBook, VpcGraph};

pub use dot::IconTheme;
pub use edge::route_edges;
pub use layout::{Layout, SubnetCluster, ZoneCluster, build_layout};

// ============================================================================
// Public API
// ============================================================================

/// Render a populated VPC graph to DOT format.
///
/// Runs the full pipeline: containment analysis, region partitioning, edge
/// routing, then emission. The graph must be fully populated and immutable;
/// identical input always yields byte-identical text.
pub fn render_graph(
    graph: &VpcGraph,
    levels: &Levels,
    book: &PriceBook,
    icons: &IconTheme,
) -> String {
    let containment = Containment::analyze(graph);
    let layout = build_layout(graph, levels, &containment);
    let edges = route_edges(graph, levels, book, &layout.enis, &layout.rtbs);
    render::render(graph, &layout, &edges, icons)
}
