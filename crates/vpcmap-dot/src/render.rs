//! DOT emission: the region partition and edge list become one digraph.
//!
//! Structure: an anonymous subgraph for the above-network band, the VPC
//! cluster holding zone clusters (each holding subnet clusters) plus the
//! shared top/bottom/side regions, same-rank alignment hints, then the edge
//! list. Identical input yields byte-identical output.

use std::collections::BTreeSet;
use std::fmt::Write;

use vpcmap_core::VpcGraph;

use crate::dot::{IconTheme, escape_label, sanitize_id, write_indent};
use crate::layout::{Layout, ZoneCluster};

/// One node statement: sanitized short id, escaped label, optional icon.
fn node_statement(graph: &VpcGraph, id: &str, icons: &IconTheme) -> Option<String> {
    let resource = graph.resource(id)?;
    let node_id = sanitize_id(resource.short_id());
    let label = escape_label(&resource.label());

    Some(match icons.icon(resource.kind()) {
        Some(image) => format!("{} [label=\"{}\" image=\"{}\"];", node_id, label, image),
        None => format!("{} [label=\"{}\"];", node_id, label),
    })
}

fn emit_nodes(output: &mut String, graph: &VpcGraph, ids: &[String], icons: &IconTheme, indent: usize) {
    for id in ids {
        if let Some(stmt) = node_statement(graph, id, icons) {
            write_indent(output, indent);
            output.push_str(&stmt);
            output.push('\n');
        }
    }
}

fn emit_zone(output: &mut String, graph: &VpcGraph, zone: &ZoneCluster, icons: &IconTheme) {
    write_indent(output, 3);
    let _ = writeln!(output, "subgraph cluster_{} {{", zone.cluster_id);
    write_indent(output, 4);
    let _ = writeln!(output, "label=\"{}\";", escape_label(&zone.name));
    write_indent(output, 4);
    output.push_str("style=\"\";\n");

    for subnet in &zone.subnets {
        write_indent(output, 4);
        let _ = writeln!(output, "subgraph cluster_{} {{", subnet.cluster_id);
        write_indent(output, 5);
        let _ = writeln!(output, "label=\"{}\";", escape_label(&subnet.label));

        // Invisible anchor so edges can target the cluster itself.
        write_indent(output, 5);
        let _ = writeln!(output, "{} [style=invis];", sanitize_id(&subnet.subnet_id));

        emit_nodes(output, graph, &subnet.members, icons, 5);

        write_indent(output, 4);
        output.push_str("}\n");
    }

    emit_nodes(output, graph, &zone.top, icons, 4);
    emit_nodes(output, graph, &zone.bottom, icons, 4);

    write_indent(output, 3);
    output.push_str("}\n");
}

/// Render the complete digraph text.
pub fn render(
    graph: &VpcGraph,
    layout: &Layout,
    edges: &BTreeSet<String>,
    icons: &IconTheme,
) -> String {
    let mut output = String::with_capacity(
        graph.resource_count() * 120 + edges.len() * 80 + 512,
    );

    output.push_str("digraph G {\n");
    output.push_str("  rankdir=TB;\n");
    output.push_str("  compound=true;\n");
    output.push_str("  concentrate=true;\n");
    output.push_str(
        "  node [fontsize=10 shape=none labelloc=b imagepos=tc color=none height=1.0];\n",
    );
    output.push_str("  edge [fontsize=9 color=\"grey70\"];\n\n");

    // Above-network band (DNS), outside the VPC cluster.
    output.push_str("  subgraph {\n");
    emit_nodes(&mut output, graph, &layout.above, icons, 2);
    output.push_str("  }\n\n");

    output.push_str("  subgraph cluster_10 {\n");
    let _ = writeln!(
        output,
        "    label=\"{}\";",
        escape_label(&format!(
            "{}\n{}\n{}",
            graph.name(),
            graph.id(),
            graph.cidr_block()
        ))
    );
    output.push('\n');

    // Invisible holder keeps the zone clusters grouped as one band.
    output.push_str("    subgraph cluster_91 {\n");
    output.push_str("      style=\"invis\";\n");
    for zone in &layout.zones {
        emit_zone(&mut output, graph, zone, icons);
    }
    output.push_str("    }\n\n");

    output.push_str("    subgraph {\n");
    emit_nodes(&mut output, graph, &layout.top, icons, 3);
    output.push_str("    }\n\n");

    output.push_str("    subgraph {\n");
    emit_nodes(&mut output, graph, &layout.bottom, icons, 3);
    output.push_str("    }\n\n");

    output.push_str("    subgraph cluster_93 {\n");
    output.push_str("      style=\"invis\";\n");
    emit_nodes(&mut output, graph, &layout.side, icons, 3);
    output.push_str("    }\n");

    output.push_str("  }\n\n");

    // Same-rank alignment hints, left commented for manual tuning.
    for (_, ids) in &layout.ranks {
        output.push_str("  // { rank=same; ");
        for id in ids {
            if let Some(resource) = graph.resource(id) {
                let _ = write!(output, "{}; ", sanitize_id(resource.short_id()));
            }
        }
        output.push_str("}\n");
    }
    if !layout.ranks.is_empty() {
        output.push('\n');
    }

    for edge in edges {
        write_indent(&mut output, 1);
        output.push_str(edge);
        output.push_str(";\n");
    }

    output.push_str("}\n");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use vpcmap_core::{Resource, ResourceKind};

    #[test]
    fn test_node_statement_with_icon() {
        let mut g = VpcGraph::new("vpc-1");
        g.add_resource(
            "i-1",
            Resource::new(ResourceKind::Ec2, "i-1").with_name("web"),
        );
        let stmt = node_statement(&g, "i-1", &IconTheme::default()).unwrap();
        assert_eq!(
            stmt,
            "i_1 [label=\"i-1\\nweb\" image=\"../icons/EC2.png\"];"
        );
    }

    #[test]
    fn test_node_statement_without_icon() {
        let mut g = VpcGraph::new("vpc-1");
        g.add_resource("subnet-a", Resource::new(ResourceKind::Subnet, "subnet-a"));
        let stmt = node_statement(&g, "subnet-a", &IconTheme::default()).unwrap();
        assert_eq!(stmt, "subnet_a [label=\"subnet-a\"];");
    }
}
