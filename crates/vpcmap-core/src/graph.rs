//! The VPC resource graph: resources, relations and zone/subnet membership.
//!
//! Populated once by the scanning collaborator, read-only afterwards. All
//! containers are chosen for the determinism contract: relations live in a
//! `BTreeSet`, zones in a `BTreeMap` keyed by name, and resources keep their
//! discovery order for report rows.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::pricing::PriceBook;
use crate::resource::Resource;

/// A directed association between two resource ids.
///
/// Directionless in cost and priority, directional in rendering. Stored in a
/// set, so duplicate insertions collapse.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Relation {
    pub source: String,
    pub target: String,
}

impl Relation {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// A provider failure-isolation zone: the resource ids observed inside it and
/// the subnet ids it holds.
///
/// Both lists are occurrence lists, not sets — a resource reported by several
/// describe calls for the same zone is counted once per report, which is what
/// the containment tallies consume.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityZone {
    pub resource_ids: Vec<String>,
    pub subnet_ids: Vec<String>,
}

/// The aggregate root: one scanned VPC.
#[derive(Debug, Default)]
pub struct VpcGraph {
    id: String,
    name: String,
    cidr_block: String,
    resources: HashMap<String, Resource>,
    /// Discovery/insertion order of resource ids, for report rows.
    order: Vec<String>,
    relations: BTreeSet<Relation>,
    zones: BTreeMap<String, AvailabilityZone>,
    subnet_members: BTreeMap<String, Vec<String>>,
}

impl VpcGraph {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            ..Default::default()
        }
    }

    /// Set the VPC header fields. The name falls back to the id when the
    /// scan found no `Name` tag.
    pub fn set_header(&mut self, name: Option<&str>, cidr_block: &str) {
        if let Some(name) = name {
            self.name = name.to_string();
        }
        self.cidr_block = cidr_block.to_string();
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cidr_block(&self) -> &str {
        &self.cidr_block
    }

    /// Insert a resource under the given id. Re-inserting an id replaces the
    /// resource without disturbing its discovery order.
    pub fn add_resource(&mut self, id: impl Into<String>, resource: Resource) {
        let id = id.into();
        if self.resources.insert(id.clone(), resource).is_none() {
            self.order.push(id);
        }
    }

    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resources.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.resources.contains_key(id)
    }

    /// Resources in discovery order, paired with their graph ids.
    pub fn resources(&self) -> impl Iterator<Item = (&str, &Resource)> {
        self.order
            .iter()
            .filter_map(|id| self.resources.get(id).map(|r| (id.as_str(), r)))
    }

    pub fn resource_count(&self) -> usize {
        self.order.len()
    }

    /// Record a relation. Absent or empty endpoints are dropped here, never
    /// reported as errors — the collaborator probes optional attributes.
    pub fn add_relation(&mut self, source: Option<&str>, target: Option<&str>) {
        let (Some(source), Some(target)) = (source, target) else {
            return;
        };
        if source.is_empty() || target.is_empty() {
            return;
        }
        self.relations.insert(Relation::new(source, target));
    }

    pub fn relations(&self) -> &BTreeSet<Relation> {
        &self.relations
    }

    pub fn has_relation(&self, source: &str, target: &str) -> bool {
        self.relations
            .contains(&Relation::new(source, target))
    }

    /// Zone accessor that creates the zone on first touch.
    pub fn zone_mut(&mut self, name: &str) -> &mut AvailabilityZone {
        self.zones.entry(name.to_string()).or_default()
    }

    /// Record that a resource was observed in a zone.
    pub fn place_in_zone(&mut self, zone: &str, resource_id: &str) {
        self.zone_mut(zone)
            .resource_ids
            .push(resource_id.to_string());
    }

    /// Record that a subnet belongs to a zone.
    pub fn place_subnet_in_zone(&mut self, zone: &str, subnet_id: &str) {
        self.zone_mut(zone).subnet_ids.push(subnet_id.to_string());
    }

    /// Record that a resource was placed in a subnet.
    pub fn place_in_subnet(&mut self, subnet_id: &str, resource_id: &str) {
        self.subnet_members
            .entry(subnet_id.to_string())
            .or_default()
            .push(resource_id.to_string());
    }

    /// Zones sorted by name.
    pub fn zones(&self) -> impl Iterator<Item = (&str, &AvailabilityZone)> {
        self.zones.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Occurrence list of resource ids placed in a subnet.
    pub fn subnet_members(&self, subnet_id: &str) -> &[String] {
        self.subnet_members
            .get(subnet_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sum of per-resource monthly cost estimates.
    pub fn monthly_cost(&self, book: &PriceBook) -> f64 {
        self.resources().map(|(_, r)| r.monthly_cost(book)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{Resource, ResourceKind};

    fn graph_with(ids: &[(&str, ResourceKind)]) -> VpcGraph {
        let mut g = VpcGraph::new("vpc-1");
        for (id, kind) in ids {
            g.add_resource(*id, Resource::new(*kind, *id));
        }
        g
    }

    #[test]
    fn test_relation_insertion_is_idempotent() {
        let mut g = VpcGraph::new("vpc-1");
        g.add_relation(Some("a"), Some("b"));
        g.add_relation(Some("a"), Some("b"));
        g.add_relation(Some("b"), Some("a"));
        assert_eq!(g.relations().len(), 2);
    }

    #[test]
    fn test_empty_endpoints_dropped() {
        let mut g = VpcGraph::new("vpc-1");
        g.add_relation(None, Some("b"));
        g.add_relation(Some("a"), None);
        g.add_relation(Some(""), Some("b"));
        g.add_relation(Some("a"), Some(""));
        assert!(g.relations().is_empty());
    }

    #[test]
    fn test_relations_iterate_sorted() {
        let mut g = VpcGraph::new("vpc-1");
        g.add_relation(Some("z"), Some("a"));
        g.add_relation(Some("a"), Some("z"));
        g.add_relation(Some("a"), Some("b"));
        let pairs: Vec<(&str, &str)> = g
            .relations()
            .iter()
            .map(|r| (r.source.as_str(), r.target.as_str()))
            .collect();
        assert_eq!(pairs, vec![("a", "b"), ("a", "z"), ("z", "a")]);
    }

    #[test]
    fn test_resources_keep_discovery_order() {
        let g = graph_with(&[
            ("i-2", ResourceKind::Ec2),
            ("i-1", ResourceKind::Ec2),
            ("sg-1", ResourceKind::SecurityGroup),
        ]);
        let ids: Vec<&str> = g.resources().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["i-2", "i-1", "sg-1"]);
    }

    #[test]
    fn test_reinsert_keeps_order() {
        let mut g = graph_with(&[("i-1", ResourceKind::Ec2), ("i-2", ResourceKind::Ec2)]);
        g.add_resource("i-1", Resource::new(ResourceKind::Ec2, "i-1").with_name("web"));
        let ids: Vec<&str> = g.resources().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["i-1", "i-2"]);
        assert_eq!(g.resource("i-1").unwrap().display_name(), "web");
    }

    #[test]
    fn test_zones_iterate_by_name() {
        let mut g = VpcGraph::new("vpc-1");
        g.place_in_zone("us-east-1c", "i-1");
        g.place_in_zone("us-east-1a", "i-2");
        let names: Vec<&str> = g.zones().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["us-east-1a", "us-east-1c"]);
    }

    #[test]
    fn test_header_name_fallback() {
        let mut g = VpcGraph::new("vpc-1");
        g.set_header(None, "10.0.0.0/16");
        assert_eq!(g.name(), "vpc-1");
        g.set_header(Some("prod"), "10.0.0.0/16");
        assert_eq!(g.name(), "prod");
    }
}
