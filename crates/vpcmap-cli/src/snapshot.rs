//! Scan snapshot loading.
//!
//! The discovery collaborator (one control-plane call per resource type)
//! runs elsewhere and hands over its findings as a JSON snapshot: the VPC
//! header, the resource list, the relation list, and the zone/subnet
//! membership indexes. This module decodes a snapshot and populates the
//! read-only [`VpcGraph`] the layout pipeline consumes.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use vpcmap_core::{Resource, ResourceDetail, ResourceKind, VpcGraph};
use vpcmap_error::{Error, ErrorKind, Result};

/// One scanned VPC as produced by the discovery collaborator.
#[derive(Debug, Deserialize)]
pub struct Snapshot {
    #[serde(default = "default_profile")]
    pub profile: String,
    pub region: String,
    pub vpc: VpcHeader,
    #[serde(default)]
    pub resources: Vec<ResourceRecord>,
    /// Relation pairs; `null` or empty endpoints are dropped on insert.
    #[serde(default)]
    pub relations: Vec<(Option<String>, Option<String>)>,
    #[serde(default)]
    pub zones: BTreeMap<String, ZoneRecord>,
    /// Subnet id to the resource ids placed in that subnet.
    #[serde(default)]
    pub subnets: BTreeMap<String, Vec<String>>,
}

fn default_profile() -> String {
    "default".to_string()
}

#[derive(Debug, Deserialize)]
pub struct VpcHeader {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub cidr_block: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ZoneRecord {
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default)]
    pub subnets: Vec<String>,
}

/// One discovered resource. Only the fields relevant to the record's kind
/// are read; the rest stay at their defaults.
#[derive(Debug, Deserialize)]
pub struct ResourceRecord {
    pub kind: ResourceKind,
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub instance_type: Option<String>,
    #[serde(default)]
    pub instance_class: Option<String>,
    #[serde(default)]
    pub public_ip: Option<String>,
    #[serde(default)]
    pub private_ip: Option<String>,
    #[serde(default)]
    pub cidr_block: Option<String>,
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub endpoint_type: Option<String>,
    #[serde(default)]
    pub target_type: Option<String>,
}

impl ResourceRecord {
    fn detail(&self) -> ResourceDetail {
        match self.kind {
            ResourceKind::Ec2 => ResourceDetail::Ec2 {
                instance_type: self.instance_type.clone().unwrap_or_default(),
            },
            ResourceKind::Rds => ResourceDetail::Rds {
                instance_class: self.instance_class.clone().unwrap_or_default(),
            },
            ResourceKind::Eni => ResourceDetail::Eni {
                public_ip: self.public_ip.clone(),
                private_ip: self.private_ip.clone(),
            },
            ResourceKind::Subnet => ResourceDetail::Subnet {
                cidr: self.cidr_block.clone().unwrap_or_default(),
                public: self.public.unwrap_or(false),
            },
            ResourceKind::EptInterface | ResourceKind::EptGateway | ResourceKind::EptGwlb => {
                ResourceDetail::Endpoint {
                    endpoint_type: self.endpoint_type.clone().unwrap_or_default(),
                }
            }
            ResourceKind::TargetGroup => ResourceDetail::TargetGroup {
                target_type: self.target_type.clone().unwrap_or_default(),
            },
            _ => ResourceDetail::Generic,
        }
    }

    fn into_resource(self) -> Resource {
        let detail = self.detail();
        let mut resource = Resource::new(self.kind, self.id).with_detail(detail);
        if let Some(name) = self.name {
            resource = resource.with_name(name);
        }
        resource
    }
}

impl Snapshot {
    /// Decode a snapshot file.
    pub fn load(path: &Path) -> Result<Snapshot> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::from(e)
                .with_operation("snapshot::load")
                .with_context("path", path.display().to_string())
        })?;

        serde_json::from_str(&text).map_err(|e| {
            Error::new(ErrorKind::SnapshotInvalid, e.to_string())
                .with_operation("snapshot::load")
                .with_context("path", path.display().to_string())
                .set_source(e)
        })
    }

    /// Populate the graph. The snapshot is consumed; the graph is complete
    /// and immutable from the caller's point of view afterwards.
    pub fn into_graph(self) -> VpcGraph {
        let mut graph = VpcGraph::new(&self.vpc.id);
        graph.set_header(self.vpc.name.as_deref(), &self.vpc.cidr_block);

        for record in self.resources {
            debug!(kind = record.kind.as_tag(), id = record.id.as_str(), "resource");
            let id = record.id.clone();
            graph.add_resource(id, record.into_resource());
        }

        for (source, target) in &self.relations {
            graph.add_relation(source.as_deref(), target.as_deref());
        }

        for (zone_name, zone) in &self.zones {
            for id in &zone.resources {
                graph.place_in_zone(zone_name, id);
            }
            for subnet_id in &zone.subnets {
                graph.place_subnet_in_zone(zone_name, subnet_id);
            }
        }

        for (subnet_id, members) in &self.subnets {
            for id in members {
                graph.place_in_subnet(subnet_id, id);
            }
        }

        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "profile": "prod-ro",
        "region": "us-east-1",
        "vpc": {"id": "vpc-1", "name": "prod", "cidr_block": "10.0.0.0/16"},
        "resources": [
            {"kind": "SUBN", "id": "subnet-a", "cidr_block": "10.0.1.0/24", "public": true},
            {"kind": "EC2", "id": "i-1", "name": "web", "instance_type": "t2.micro"},
            {"kind": "SG", "id": "sg-1", "name": "web-sg"}
        ],
        "relations": [["i-1", "sg-1"], ["i-1", null], [null, "sg-1"]],
        "zones": {"us-east-1a": {"resources": ["i-1"], "subnets": ["subnet-a"]}},
        "subnets": {"subnet-a": ["i-1"]}
    }"#;

    #[test]
    fn test_decode_and_populate() {
        let snapshot: Snapshot = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(snapshot.profile, "prod-ro");
        assert_eq!(snapshot.region, "us-east-1");

        let graph = snapshot.into_graph();
        assert_eq!(graph.name(), "prod");
        assert_eq!(graph.resource_count(), 3);
        // null endpoints dropped
        assert_eq!(graph.relations().len(), 1);
        assert!(graph.has_relation("i-1", "sg-1"));

        let ec2 = graph.resource("i-1").unwrap();
        assert_eq!(ec2.kind(), ResourceKind::Ec2);
        assert_eq!(ec2.type_info(), "t2.micro");
        assert_eq!(graph.subnet_members("subnet-a"), ["i-1"]);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let bad = r#"{
            "region": "us-east-1",
            "vpc": {"id": "vpc-1", "cidr_block": "10.0.0.0/16"},
            "resources": [{"kind": "EC3", "id": "i-1"}]
        }"#;
        assert!(serde_json::from_str::<Snapshot>(bad).is_err());
    }

    #[test]
    fn test_profile_defaults() {
        let minimal = r#"{
            "region": "us-east-1",
            "vpc": {"id": "vpc-1", "cidr_block": "10.0.0.0/16"}
        }"#;
        let snapshot: Snapshot = serde_json::from_str(minimal).unwrap();
        assert_eq!(snapshot.profile, "default");
        let graph = snapshot.into_graph();
        // name falls back to the id
        assert_eq!(graph.name(), "vpc-1");
    }
}
