//! Containment analysis: which resources are exclusive to one subnet or one
//! zone.
//!
//! A resource confined to a single subnet (or, failing that, a single zone)
//! is drawn nested inside that cluster; everything else referenced by a
//! relation must be hoisted to a shared region so one diagram node serves all
//! referencing edges.

use std::collections::{HashMap, HashSet};

use crate::graph::VpcGraph;

/// Result of the containment pass over a populated graph.
#[derive(Debug, Default)]
pub struct Containment {
    single_subnet: HashSet<String>,
    single_az: HashSet<String>,
}

impl Containment {
    /// Tally zone and subnet occurrences and classify every resource id.
    ///
    /// `single_subnet` wins over `single_az`: a resource confined to one
    /// subnet is necessarily confined to one zone and nests at the subnet
    /// level, never duplicated at the zone level. Only subnets attached to a
    /// zone contribute to the subnet tally.
    pub fn analyze(graph: &VpcGraph) -> Self {
        let mut az_tally: HashMap<&str, usize> = HashMap::new();
        let mut sn_tally: HashMap<&str, usize> = HashMap::new();

        for (_, zone) in graph.zones() {
            for id in &zone.resource_ids {
                *az_tally.entry(id).or_insert(0) += 1;
            }
            for subnet_id in &zone.subnet_ids {
                for id in graph.subnet_members(subnet_id) {
                    *sn_tally.entry(id).or_insert(0) += 1;
                }
            }
        }

        let single_subnet: HashSet<String> = sn_tally
            .iter()
            .filter(|&(_, &n)| n == 1)
            .map(|(id, _)| id.to_string())
            .collect();

        let single_az = az_tally
            .iter()
            .filter(|&(id, &n)| n == 1 && !single_subnet.contains(*id))
            .map(|(id, _)| id.to_string())
            .collect();

        Self {
            single_subnet,
            single_az,
        }
    }

    pub fn is_single_subnet(&self, id: &str) -> bool {
        self.single_subnet.contains(id)
    }

    pub fn is_single_az(&self, id: &str) -> bool {
        self.single_az.contains(id)
    }

    /// Contained resources nest inside their owning zone/subnet cluster.
    pub fn is_contained(&self, id: &str) -> bool {
        self.single_subnet.contains(id) || self.single_az.contains(id)
    }
}
