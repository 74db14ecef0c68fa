//! Region partitioning: route every resource to exactly one rendering
//! location.
//!
//! The partition has six locations — above the VPC band, the top of the VPC,
//! the bottom, the network-fabric side region, a zone's shelf, or a subnet
//! cluster — driven by the level table and the containment analysis. The
//! staging mirrors the collect → filter → render split of the DOT pipeline:
//! this module decides placement, `render` only emits.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use vpcmap_core::{Containment, Levels, ResourceKind, VpcGraph};

/// One subnet cluster inside a zone.
#[derive(Debug, Clone)]
pub struct SubnetCluster {
    /// Numeric cluster suffix, unique across the diagram.
    pub cluster_id: u32,
    /// Graph id of the subnet resource (the invisible anchor node).
    pub subnet_id: String,
    /// Multi-line cluster label: visibility, CIDR, name, native id.
    pub label: String,
    /// Member resource ids, sorted by (kind tag, native id).
    pub members: Vec<String>,
}

/// One availability-zone cluster.
#[derive(Debug, Clone)]
pub struct ZoneCluster {
    pub cluster_id: u32,
    pub name: String,
    /// Zone-local resources above the subnet band (single-AZ only).
    pub top: Vec<String>,
    /// Zone-local resources below the interface band (single-AZ only).
    pub bottom: Vec<String>,
    /// Subnet clusters, sorted by ascending CIDR octets.
    pub subnets: Vec<SubnetCluster>,
}

/// The full region partition plus the side products the edge router and
/// renderer consume.
#[derive(Debug, Default)]
pub struct Layout {
    /// Resources above the VPC band (DNS).
    pub above: Vec<String>,
    /// Shared top-of-VPC resources.
    pub top: Vec<String>,
    /// Shared bottom-tier resources (databases).
    pub bottom: Vec<String>,
    /// Shared network-fabric side region.
    pub side: Vec<String>,
    pub zones: Vec<ZoneCluster>,
    /// Same-rank alignment hint: kind tag to connected resource ids.
    pub ranks: BTreeMap<&'static str, Vec<String>>,
    /// Connected network interfaces, for edge synthesis.
    pub enis: Vec<String>,
    /// Connected route tables, for edge synthesis.
    pub rtbs: Vec<String>,
    connected: HashSet<String>,
}

impl Layout {
    /// Whether a resource is referenced by any relation (or always drawn).
    pub fn is_connected(&self, id: &str) -> bool {
        self.connected.contains(id)
    }
}

/// Kinds that are always treated as connected even without a relation, so
/// that storage and compute resources never silently vanish from diagrams.
fn always_connected(kind: ResourceKind) -> bool {
    use ResourceKind::*;
    matches!(
        kind,
        Asg | Ec2 | Lambda | Eks | EptGateway | Rds | HostedZone
    )
}

/// Sort key for subnets: ascending numeric CIDR octets, subnet id as the
/// tie-break. Unparseable octets sort first rather than failing the render.
fn cidr_sort_key(cidr: &str, subnet_id: &str) -> ([u32; 4], String) {
    let address = cidr.split('/').next().unwrap_or("");
    let mut octets = [0u32; 4];
    for (i, part) in address.split('.').take(4).enumerate() {
        octets[i] = part.parse().unwrap_or(0);
    }
    (octets, subnet_id.to_string())
}

/// Build the region partition for one populated graph.
pub fn build_layout(graph: &VpcGraph, levels: &Levels, containment: &Containment) -> Layout {
    let mut layout = Layout::default();

    // Every relation endpoint is connected, plus the always-drawn kinds.
    for relation in graph.relations() {
        layout.connected.insert(relation.source.clone());
        layout.connected.insert(relation.target.clone());
    }
    for (id, resource) in graph.resources() {
        if always_connected(resource.kind()) {
            layout.connected.insert(id.to_string());
        }
    }

    let vpc_level = levels.of(ResourceKind::Vpc);
    let subnet_level = levels.of(ResourceKind::Subnet);
    let eni_level = levels.of(ResourceKind::Eni);

    // Route each resource to its shared region, if any.
    for (id, resource) in graph.resources() {
        let kind = resource.kind();
        let level = levels.of(kind);
        let contained = containment.is_contained(id);
        let outside = layout.is_connected(id) && !contained;

        let above = matches!((level, vpc_level), (Some(l), Some(v)) if l < v);
        let in_top_band = matches!((level, subnet_level), (Some(l), Some(s)) if l < s);

        if above {
            layout.above.push(id.to_string());
        } else if in_top_band && !contained {
            layout.top.push(id.to_string());
        } else if kind.is_bottom_tier() && outside {
            layout.bottom.push(id.to_string());
        } else if kind.is_network_fabric() && outside {
            layout.side.push(id.to_string());
        } else if !contained {
            debug!(id, kind = kind.as_tag(), "resource not placed in any region");
        }

        if kind != ResourceKind::Subnet && layout.is_connected(id) {
            layout.ranks.entry(kind.as_tag()).or_default().push(id.to_string());
        }

        if kind == ResourceKind::Eni && layout.is_connected(id) {
            layout.enis.push(id.to_string());
        }
        if kind == ResourceKind::RouteTable && layout.is_connected(id) {
            layout.rtbs.push(id.to_string());
        }
    }

    // Zone clusters, zones sorted by name, cluster ids assigned in order.
    let mut subnet_counter = 0u32;
    for (zone_index, (zone_name, zone)) in graph.zones().enumerate() {
        let mut cluster = ZoneCluster {
            cluster_id: 100 + 10 * zone_index as u32,
            name: zone_name.to_string(),
            top: Vec::new(),
            bottom: Vec::new(),
            subnets: Vec::new(),
        };

        for (id, resource) in graph.resources() {
            let in_zone = zone.resource_ids.iter().any(|z| z.as_str() == id)
                && containment.is_single_az(id);
            if !in_zone {
                continue;
            }

            let level = levels.of(resource.kind());
            if matches!((level, subnet_level), (Some(l), Some(s)) if l < s) {
                cluster.top.push(id.to_string());
            }
            if matches!((level, eni_level), (Some(l), Some(e)) if l > e) {
                cluster.bottom.push(id.to_string());
            }
        }

        let mut subnets: Vec<(&str, &vpcmap_core::Resource)> = zone
            .subnet_ids
            .iter()
            .filter_map(|sid| match graph.resource(sid) {
                Some(r) => Some((sid.as_str(), r)),
                None => {
                    debug!(subnet = sid.as_str(), "subnet id without a resource entry");
                    None
                }
            })
            .collect();
        subnets.sort_by_key(|(sid, r)| cidr_sort_key(r.cidr().unwrap_or(""), sid));

        for (subnet_id, subnet) in subnets {
            let label = format!(
                "{}\n{}\n{}\n{}",
                subnet.subnet_visibility().unwrap_or("Private"),
                subnet.cidr().unwrap_or(""),
                subnet.display_name(),
                subnet.native_id(),
            );

            let mut members: Vec<String> = graph
                .subnet_members(subnet_id)
                .iter()
                .filter(|id| layout.is_connected(id) && containment.is_single_subnet(id))
                .cloned()
                .collect();
            members.sort_by(|a, b| {
                let ka = graph.resource(a).map(|r| (r.kind().as_tag(), r.native_id()));
                let kb = graph.resource(b).map(|r| (r.kind().as_tag(), r.native_id()));
                ka.cmp(&kb).then_with(|| a.cmp(b))
            });
            members.dedup();

            cluster.subnets.push(SubnetCluster {
                cluster_id: 1000 + 10 * subnet_counter,
                subnet_id: subnet_id.to_string(),
                label,
                members,
            });
            subnet_counter += 1;
        }

        layout.zones.push(cluster);
    }

    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use vpcmap_core::{Resource, ResourceDetail, ResourceKind};

    fn subnet(id: &str, cidr: &str) -> Resource {
        Resource::new(ResourceKind::Subnet, id).with_detail(ResourceDetail::Subnet {
            cidr: cidr.into(),
            public: false,
        })
    }

    fn small_graph() -> VpcGraph {
        let mut g = VpcGraph::new("vpc-1");
        g.set_header(Some("prod"), "10.0.0.0/16");
        g.add_resource("subnet-a", subnet("subnet-a", "10.0.2.0/24"));
        g.add_resource("subnet-b", subnet("subnet-b", "10.0.1.0/24"));
        g.place_subnet_in_zone("us-east-1a", "subnet-a");
        g.place_subnet_in_zone("us-east-1a", "subnet-b");
        g
    }

    fn build(g: &VpcGraph) -> Layout {
        let levels = Levels::default();
        let containment = Containment::analyze(g);
        build_layout(g, &levels, &containment)
    }

    #[test]
    fn test_hosted_zone_goes_above() {
        let mut g = small_graph();
        g.add_resource("Z123", Resource::new(ResourceKind::HostedZone, "Z123"));
        let layout = build(&g);
        assert_eq!(layout.above, vec!["Z123"]);
        assert!(layout.top.is_empty());
    }

    #[test]
    fn test_uncontained_lb_goes_top() {
        let mut g = small_graph();
        g.add_resource("lb-1", Resource::new(ResourceKind::ElbV1, "lb-1"));
        g.add_relation(Some("lb-1"), Some("i-1"));
        let layout = build(&g);
        assert_eq!(layout.top, vec!["lb-1"]);
    }

    #[test]
    fn test_connected_rds_goes_bottom() {
        let mut g = small_graph();
        g.add_resource("db-1", Resource::new(ResourceKind::Rds, "db-1"));
        let layout = build(&g);
        // storage-tier kinds are always connected
        assert_eq!(layout.bottom, vec!["db-1"]);
    }

    #[test]
    fn test_connected_sg_goes_side() {
        let mut g = small_graph();
        g.add_resource("sg-1", Resource::new(ResourceKind::SecurityGroup, "sg-1"));
        g.add_relation(Some("i-1"), Some("sg-1"));
        let layout = build(&g);
        assert_eq!(layout.side, vec!["sg-1"]);
    }

    #[test]
    fn test_unreferenced_sg_is_dropped() {
        let mut g = small_graph();
        g.add_resource("sg-1", Resource::new(ResourceKind::SecurityGroup, "sg-1"));
        let layout = build(&g);
        assert!(layout.side.is_empty());
        assert!(!layout.is_connected("sg-1"));
    }

    #[test]
    fn test_single_subnet_member_nests() {
        let mut g = small_graph();
        g.add_resource("i-1", Resource::new(ResourceKind::Ec2, "i-1"));
        g.place_in_subnet("subnet-a", "i-1");
        g.place_in_zone("us-east-1a", "i-1");
        g.add_relation(Some("i-1"), Some("sg-1"));

        let layout = build(&g);
        assert!(layout.top.is_empty());
        let zone = &layout.zones[0];
        let sn_a = zone
            .subnets
            .iter()
            .find(|s| s.subnet_id == "subnet-a")
            .unwrap();
        assert_eq!(sn_a.members, vec!["i-1"]);
    }

    #[test]
    fn test_subnets_sorted_by_cidr() {
        let g = small_graph();
        let layout = build(&g);
        let order: Vec<&str> = layout.zones[0]
            .subnets
            .iter()
            .map(|s| s.subnet_id.as_str())
            .collect();
        // 10.0.1.0/24 sorts before 10.0.2.0/24
        assert_eq!(order, vec!["subnet-b", "subnet-a"]);
        assert_eq!(layout.zones[0].subnets[0].cluster_id, 1000);
        assert_eq!(layout.zones[0].subnets[1].cluster_id, 1010);
    }

    #[test]
    fn test_single_az_lb_on_zone_top_shelf() {
        let mut g = small_graph();
        g.add_resource("lb-1", Resource::new(ResourceKind::ElbV2, "lb-1"));
        g.place_in_subnet("subnet-a", "lb-1");
        g.place_in_subnet("subnet-b", "lb-1");
        g.place_in_zone("us-east-1a", "lb-1");

        let layout = build(&g);
        assert!(layout.top.is_empty());
        assert_eq!(layout.zones[0].top, vec!["lb-1"]);
        assert!(layout.zones[0].bottom.is_empty());
    }

    #[test]
    fn test_single_az_rds_on_zone_bottom_shelf() {
        let mut g = small_graph();
        g.add_resource("db-1", Resource::new(ResourceKind::Rds, "db-1"));
        g.place_in_zone("us-east-1a", "db-1");

        let layout = build(&g);
        assert!(layout.bottom.is_empty());
        assert_eq!(layout.zones[0].bottom, vec!["db-1"]);
    }

    #[test]
    fn test_ranks_exclude_subnets() {
        let mut g = small_graph();
        g.add_resource("i-1", Resource::new(ResourceKind::Ec2, "i-1"));
        g.add_relation(Some("i-1"), Some("subnet-a"));
        let layout = build(&g);
        assert!(layout.ranks.contains_key("EC2"));
        assert!(!layout.ranks.contains_key("SUBN"));
    }

    #[test]
    fn test_enis_and_rtbs_collected() {
        let mut g = small_graph();
        g.add_resource("eni-1", Resource::new(ResourceKind::Eni, "eni-1"));
        g.add_resource("rtb-1", Resource::new(ResourceKind::RouteTable, "rtb-1"));
        g.add_resource("eni-2", Resource::new(ResourceKind::Eni, "eni-2"));
        g.add_relation(Some("eni-1"), Some("rtb-1"));
        // eni-2 has no relations and is not collected

        let layout = build(&g);
        assert_eq!(layout.enis, vec!["eni-1"]);
        assert_eq!(layout.rtbs, vec!["rtb-1"]);
    }
}
