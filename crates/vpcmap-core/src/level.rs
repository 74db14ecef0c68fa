//! The fixed hierarchy of rendering levels.
//!
//! Level 0 is the outermost band (DNS records) and levels descend through the
//! VPC, gateways, load balancing, subnets, compute, interfaces, databases and
//! the network fabric. Kinds sharing a level are rendering-equivalent in
//! vertical position.

use tracing::warn;

use crate::resource::ResourceKind;

/// Ordered level table. Explicit immutable data passed into the layout and
/// edge-routing functions, not process-wide state.
#[derive(Debug, Clone)]
pub struct Levels {
    table: Vec<Vec<ResourceKind>>,
}

impl Default for Levels {
    fn default() -> Self {
        use ResourceKind::*;
        Self {
            table: vec![
                vec![Route53],
                vec![HostedZone],
                vec![Vpc],
                vec![Vpgw],
                vec![EptGwlb],
                vec![Acl],
                vec![Asg],
                vec![ElbV1, ElbV2],
                vec![TargetGroup],
                vec![Eks],
                vec![Lambda],
                vec![EptInterface],
                vec![Subnet],
                vec![Ec2, Nat],
                vec![Eni],
                vec![Rds],
                vec![RouteTable],
                vec![SecurityGroup],
                vec![EptGateway, Peering, Igw],
            ],
        }
    }
}

impl Levels {
    /// Build a custom table. Kinds absent from every level are unclassified.
    pub fn new(table: Vec<Vec<ResourceKind>>) -> Self {
        Self { table }
    }

    /// The level of a kind, or `None` when the table does not mention it.
    ///
    /// A miss is logged, not fatal; callers must treat the result as
    /// incomparable and skip any level-dependent decision.
    pub fn of(&self, kind: ResourceKind) -> Option<usize> {
        let found = self
            .table
            .iter()
            .position(|kinds| kinds.contains(&kind));
        if found.is_none() {
            warn!(kind = kind.as_tag(), "resource kind has no level");
        }
        found
    }

    /// Whether a `source -> target` relation runs against the top-to-bottom
    /// flow. Unclassified kinds are incomparable: never a back-edge.
    pub fn is_back_edge(&self, source: ResourceKind, target: ResourceKind) -> bool {
        match (self.of(source), self.of(target)) {
            (Some(src), Some(trg)) => src > trg,
            _ => false,
        }
    }
}
