//! Edge routing: relations to rendered edge statements.
//!
//! Statements are collected into a `BTreeSet`, so the output is lexically
//! sorted and duplicate statements collapse — a discovered ENI→RTB relation
//! and its synthesized alignment twin produce one line, not two.

use std::collections::BTreeSet;
use std::fmt::Write;

use vpcmap_core::{Levels, PriceBook, ResourceKind, VpcGraph};

use crate::dot::sanitize_id;

/// Render attributes for one edge, emitted in fixed order: color,
/// constraint, style, weight.
#[derive(Debug, Default)]
struct EdgeAttrs {
    color: &'static str,
    constraint: Option<bool>,
    style: Option<&'static str>,
    weight: Option<u32>,
}

impl EdgeAttrs {
    fn render(&self, source_id: &str, target_id: &str) -> String {
        let mut stmt = format!(
            "{} -> {} [color=\"{}\"",
            sanitize_id(source_id),
            sanitize_id(target_id),
            self.color
        );
        if let Some(constraint) = self.constraint {
            let _ = write!(stmt, " constraint=\"{}\"", constraint);
        }
        if let Some(style) = self.style {
            let _ = write!(stmt, " style=\"{}\"", style);
        }
        if let Some(weight) = self.weight {
            let _ = write!(stmt, " weight=\"{}\"", weight);
        }
        stmt.push(']');
        stmt
    }
}

/// Build the statement for one resolved relation. `None` when the edge is
/// suppressed (subnets never originate a visible edge).
fn statement(
    graph: &VpcGraph,
    levels: &Levels,
    book: &PriceBook,
    source_id: &str,
    target_id: &str,
) -> Option<String> {
    let source = graph.resource(source_id)?;
    let target = graph.resource(target_id)?;

    if source.kind() == ResourceKind::Subnet {
        return None;
    }

    let mut attrs = EdgeAttrs {
        color: source.kind().category().color(),
        ..Default::default()
    };

    // Back-edges must not reverse the visual top-to-bottom flow; neither may
    // costed fan-in to security groups distort vertical rank.
    if levels.is_back_edge(source.kind(), target.kind()) {
        attrs.constraint = Some(false);
        attrs.style = Some("invis");
    } else if source.monthly_cost(book) > 0.0 && target.kind() == ResourceKind::SecurityGroup {
        attrs.constraint = Some(false);
        attrs.style = Some("invis");
    }

    // Interface/route-table pairs without a discovered relation become heavy
    // invisible alignment edges.
    if source.kind() == ResourceKind::Eni
        && target.kind() == ResourceKind::RouteTable
        && !graph.has_relation(source_id, target_id)
    {
        attrs.weight = Some(10);
        attrs.style = Some("invis");
    }

    Some(attrs.render(source.short_id(), target.short_id()))
}

/// Route the relation set and synthesize the ENI×RTB alignment edges.
///
/// Relations with an endpoint missing from the resource map are discarded
/// here, never at storage time. `enis` and `rtbs` are the connected
/// interfaces and route tables from the layout pass; every pair yields one
/// statement regardless of whether a real relation exists.
pub fn route_edges(
    graph: &VpcGraph,
    levels: &Levels,
    book: &PriceBook,
    enis: &[String],
    rtbs: &[String],
) -> BTreeSet<String> {
    let mut edges = BTreeSet::new();

    for relation in graph.relations() {
        if !graph.contains(&relation.source) || !graph.contains(&relation.target) {
            continue;
        }
        if let Some(stmt) = statement(graph, levels, book, &relation.source, &relation.target) {
            edges.insert(stmt);
        }
    }

    for eni in enis {
        for rtb in rtbs {
            if let Some(stmt) = statement(graph, levels, book, eni, rtb) {
                edges.insert(stmt);
            }
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use vpcmap_core::{Resource, ResourceDetail, VpcGraph};

    fn graph() -> VpcGraph {
        let mut g = VpcGraph::new("vpc-1");
        g.add_resource("asg-1", Resource::new(ResourceKind::Asg, "asg-1"));
        g.add_resource("sg-1", Resource::new(ResourceKind::SecurityGroup, "sg-1"));
        g.add_resource("subnet-a", Resource::new(ResourceKind::Subnet, "subnet-a"));
        g.add_resource("eni-1", Resource::new(ResourceKind::Eni, "eni-1"));
        g.add_resource("rtb-1", Resource::new(ResourceKind::RouteTable, "rtb-1"));
        g
    }

    fn route(g: &VpcGraph, enis: &[&str], rtbs: &[&str]) -> Vec<String> {
        let enis: Vec<String> = enis.iter().map(|s| s.to_string()).collect();
        let rtbs: Vec<String> = rtbs.iter().map(|s| s.to_string()).collect();
        route_edges(g, &Levels::default(), &PriceBook::default(), &enis, &rtbs)
            .into_iter()
            .collect()
    }

    #[test]
    fn test_forward_edge_is_plain() {
        let mut g = graph();
        g.add_relation(Some("asg-1"), Some("sg-1"));
        let edges = route(&g, &[], &[]);
        assert_eq!(edges, vec!["asg_1 -> sg_1 [color=\"orange\"]"]);
    }

    #[test]
    fn test_back_edge_is_invisible_and_unconstrained() {
        let mut g = graph();
        g.add_relation(Some("sg-1"), Some("asg-1"));
        let edges = route(&g, &[], &[]);
        assert_eq!(
            edges,
            vec!["sg_1 -> asg_1 [color=\"purple3\" constraint=\"false\" style=\"invis\"]"]
        );
    }

    #[test]
    fn test_costed_source_to_sg_is_invisible() {
        let mut g = graph();
        g.add_resource(
            "i-1",
            Resource::new(ResourceKind::Ec2, "i-1").with_detail(ResourceDetail::Ec2 {
                instance_type: "t2.micro".into(),
            }),
        );
        g.add_resource(
            "i-2",
            Resource::new(ResourceKind::Ec2, "i-2").with_detail(ResourceDetail::Ec2 {
                instance_type: "unpriced.type".into(),
            }),
        );
        g.add_relation(Some("i-1"), Some("sg-1"));
        g.add_relation(Some("i-2"), Some("sg-1"));

        let edges = route(&g, &[], &[]);
        assert!(edges.contains(
            &"i_1 -> sg_1 [color=\"orange\" constraint=\"false\" style=\"invis\"]".to_string()
        ));
        // a free instance keeps its visible edge
        assert!(edges.contains(&"i_2 -> sg_1 [color=\"orange\"]".to_string()));
    }

    #[test]
    fn test_subnet_source_suppressed() {
        let mut g = graph();
        g.add_relation(Some("subnet-a"), Some("rtb-1"));
        assert!(route(&g, &[], &[]).is_empty());
    }

    #[test]
    fn test_dangling_endpoint_discarded() {
        let mut g = graph();
        g.add_relation(Some("asg-1"), Some("pcx-other-account"));
        assert!(route(&g, &[], &[]).is_empty());
    }

    #[test]
    fn test_synthesized_eni_rtb_pair_is_heavy_invisible() {
        let g = graph();
        let edges = route(&g, &["eni-1"], &["rtb-1"]);
        assert_eq!(
            edges,
            vec!["eni_1 -> rtb_1 [color=\"purple3\" style=\"invis\" weight=\"10\"]"]
        );
    }

    #[test]
    fn test_discovered_eni_rtb_pair_stays_visible_and_unique() {
        let mut g = graph();
        g.add_relation(Some("eni-1"), Some("rtb-1"));
        let edges = route(&g, &["eni-1"], &["rtb-1"]);
        // relation pass and synthesis pass collapse to one visible statement
        assert_eq!(edges, vec!["eni_1 -> rtb_1 [color=\"purple3\"]"]);
    }

    #[test]
    fn test_eni_rtb_back_edge_note() {
        // ENI (14) -> RTB (16) is a forward edge; RTB -> ENI is the back-edge
        let mut g = graph();
        g.add_relation(Some("rtb-1"), Some("eni-1"));
        let edges = route(&g, &[], &[]);
        assert_eq!(
            edges,
            vec!["rtb_1 -> eni_1 [color=\"purple3\" constraint=\"false\" style=\"invis\"]"]
        );
    }
}
