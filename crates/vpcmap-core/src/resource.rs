//! Resource model: the closed set of resource type tags and the per-kind
//! behavior behind labels, display names and type info.
//!
//! The per-type property overrides of the discovery layer are expressed as a
//! tagged [`ResourceDetail`] with kind-dispatched accessors on [`Resource`],
//! rather than a subclass tree.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};

use crate::arn;
use crate::pricing::PriceBook;

/// Resource type tags, one per discoverable object class.
///
/// `R53` and `VPC` are hierarchy markers: they appear in the level table to
/// anchor the top of the diagram but are never instantiated as resources.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum ResourceKind {
    #[strum(serialize = "R53")]
    #[serde(rename = "R53")]
    Route53,
    #[strum(serialize = "HZ")]
    #[serde(rename = "HZ")]
    HostedZone,
    #[strum(serialize = "VPC")]
    #[serde(rename = "VPC")]
    Vpc,
    #[strum(serialize = "VPGW")]
    #[serde(rename = "VPGW")]
    Vpgw,
    #[strum(serialize = "EPT-GWLB")]
    #[serde(rename = "EPT-GWLB")]
    EptGwlb,
    #[strum(serialize = "ACL")]
    #[serde(rename = "ACL")]
    Acl,
    #[strum(serialize = "ASG")]
    #[serde(rename = "ASG")]
    Asg,
    #[strum(serialize = "ELBv1")]
    #[serde(rename = "ELBv1")]
    ElbV1,
    #[strum(serialize = "ELBv2")]
    #[serde(rename = "ELBv2")]
    ElbV2,
    #[strum(serialize = "TG")]
    #[serde(rename = "TG")]
    TargetGroup,
    #[strum(serialize = "EKS")]
    #[serde(rename = "EKS")]
    Eks,
    #[strum(serialize = "Lambda")]
    #[serde(rename = "Lambda")]
    Lambda,
    #[strum(serialize = "EPT-I")]
    #[serde(rename = "EPT-I")]
    EptInterface,
    #[strum(serialize = "SUBN")]
    #[serde(rename = "SUBN")]
    Subnet,
    #[strum(serialize = "EC2")]
    #[serde(rename = "EC2")]
    Ec2,
    #[strum(serialize = "NAT")]
    #[serde(rename = "NAT")]
    Nat,
    #[strum(serialize = "ENI")]
    #[serde(rename = "ENI")]
    Eni,
    #[strum(serialize = "RDS")]
    #[serde(rename = "RDS")]
    Rds,
    #[strum(serialize = "RTB")]
    #[serde(rename = "RTB")]
    RouteTable,
    #[strum(serialize = "SG")]
    #[serde(rename = "SG")]
    SecurityGroup,
    #[strum(serialize = "EPT-GW")]
    #[serde(rename = "EPT-GW")]
    EptGateway,
    #[strum(serialize = "PEER")]
    #[serde(rename = "PEER")]
    Peering,
    #[strum(serialize = "IGW")]
    #[serde(rename = "IGW")]
    Igw,
}

/// Edge-color category. A fixed three-way classification independent of the
/// level table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Network,
    Storage,
    Compute,
}

impl Category {
    /// Edge color for relations originating from this category.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Network => "purple3",
            Category::Storage => "blue",
            Category::Compute => "orange",
        }
    }
}

impl ResourceKind {
    /// The wire tag for this kind (`"EPT-I"`, `"ELBv2"`, ...).
    pub fn as_tag(&self) -> &'static str {
        (*self).into()
    }

    /// Edge-color category of this kind. Compute is the catch-all.
    pub fn category(&self) -> Category {
        use ResourceKind::*;
        match self {
            Acl | ElbV1 | ElbV2 | Eni | EptInterface | EptGwlb | HostedZone | Igw | Nat
            | Peering | RouteTable | SecurityGroup | TargetGroup | Vpgw => Category::Network,
            EptGateway | Rds => Category::Storage,
            _ => Category::Compute,
        }
    }

    /// Network-fabric kinds drawn in the shared side region when connected
    /// and not contained.
    pub fn is_network_fabric(&self) -> bool {
        use ResourceKind::*;
        matches!(
            self,
            Acl | EptGateway | Igw | RouteTable | Peering | SecurityGroup
        )
    }

    /// Bottom-tier kinds drawn below the zone band when connected and not
    /// contained.
    pub fn is_bottom_tier(&self) -> bool {
        matches!(self, ResourceKind::Rds)
    }

    /// Kinds whose node label is the display name alone, without the raw id.
    fn label_is_name(&self) -> bool {
        use ResourceKind::*;
        matches!(
            self,
            Eks | HostedZone
                | Lambda
                | ElbV1
                | ElbV2
                | SecurityGroup
                | TargetGroup
                | EptInterface
                | EptGateway
                | EptGwlb
        )
    }
}

/// Per-kind attributes carried by a resource. Only the fields that feed
/// labels, type info or pricing survive discovery; everything else is
/// dropped at the collaborator boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResourceDetail {
    #[default]
    Generic,
    Ec2 {
        instance_type: String,
    },
    Rds {
        instance_class: String,
    },
    Eni {
        public_ip: Option<String>,
        private_ip: Option<String>,
    },
    Subnet {
        cidr: String,
        public: bool,
    },
    Endpoint {
        endpoint_type: String,
    },
    TargetGroup {
        target_type: String,
    },
}

/// One discovered cloud object.
///
/// Identity and equality are `(kind, native_id)`. The native identifier is
/// whatever the provider hands back (possibly an ARN); [`Resource::short_id`]
/// is the stable identifier used for diagram nodes and report rows.
#[derive(Debug, Clone)]
pub struct Resource {
    kind: ResourceKind,
    native_id: String,
    name_tag: Option<String>,
    detail: ResourceDetail,
}

impl Resource {
    pub fn new(kind: ResourceKind, native_id: impl Into<String>) -> Self {
        Self {
            kind,
            native_id: native_id.into(),
            name_tag: None,
            detail: ResourceDetail::Generic,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name_tag = Some(name.into());
        self
    }

    pub fn with_detail(mut self, detail: ResourceDetail) -> Self {
        self.detail = detail;
        self
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Full provider-native identifier, retained for display.
    pub fn native_id(&self) -> &str {
        &self.native_id
    }

    pub fn name_tag(&self) -> Option<&str> {
        self.name_tag.as_deref()
    }

    pub fn detail(&self) -> &ResourceDetail {
        &self.detail
    }

    /// Stable short identifier: the resource component for ARN-named
    /// objects, the native id otherwise.
    pub fn short_id(&self) -> &str {
        arn::shorten(&self.native_id)
    }

    /// Human name: ARN resource component for ARN-named objects, else the
    /// `Name` tag if present, else the native id.
    pub fn display_name(&self) -> &str {
        if self.native_id.starts_with("arn:") {
            return arn::shorten(&self.native_id);
        }
        self.name_tag.as_deref().unwrap_or(&self.native_id)
    }

    /// Multi-line node label. Lines are separated by `\n`; the renderer is
    /// responsible for DOT escaping.
    pub fn label(&self) -> String {
        if self.kind.label_is_name() {
            return self.display_name().to_string();
        }

        let mut label = self.native_id.clone();
        if let Some(name) = &self.name_tag {
            label.push('\n');
            label.push_str(name);
        }

        if let ResourceDetail::Eni {
            public_ip,
            private_ip,
        } = &self.detail
            && let Some(ip) = public_ip.as_deref().or(private_ip.as_deref())
        {
            label.push('\n');
            label.push_str(ip);
        }

        label
    }

    /// Short type descriptor for the report (instance type, endpoint flavor).
    /// Empty for kinds without one.
    pub fn type_info(&self) -> &str {
        match &self.detail {
            ResourceDetail::Ec2 { instance_type } => instance_type,
            ResourceDetail::Rds { instance_class } => instance_class,
            ResourceDetail::Endpoint { endpoint_type } => endpoint_type,
            ResourceDetail::TargetGroup { target_type } => target_type,
            _ => "",
        }
    }

    /// Estimated monthly cost from the price book. Zero for unpriced kinds.
    pub fn monthly_cost(&self, book: &PriceBook) -> f64 {
        book.monthly(self)
    }

    /// Subnet CIDR block, for subnet resources only.
    pub fn cidr(&self) -> Option<&str> {
        match &self.detail {
            ResourceDetail::Subnet { cidr, .. } => Some(cidr),
            _ => None,
        }
    }

    /// `"Public"` / `"Private"` visibility line for subnet cluster labels.
    pub fn subnet_visibility(&self) -> Option<&'static str> {
        match &self.detail {
            ResourceDetail::Subnet { public: true, .. } => Some("Public"),
            ResourceDetail::Subnet { public: false, .. } => Some("Private"),
            _ => None,
        }
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.native_id == other.native_id
    }
}

impl Eq for Resource {}

impl std::hash::Hash for Resource {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.native_id.hash(state);
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {} - {}",
            self.kind.as_tag(),
            self.native_id,
            self.type_info()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_kind_tags_round_trip() {
        for (tag, kind) in [
            ("EPT-I", ResourceKind::EptInterface),
            ("EPT-GWLB", ResourceKind::EptGwlb),
            ("ELBv2", ResourceKind::ElbV2),
            ("Lambda", ResourceKind::Lambda),
            ("SUBN", ResourceKind::Subnet),
        ] {
            assert_eq!(kind.as_tag(), tag);
            assert_eq!(ResourceKind::from_str(tag).unwrap(), kind);
        }
    }

    #[test]
    fn test_categories() {
        assert_eq!(ResourceKind::SecurityGroup.category(), Category::Network);
        assert_eq!(ResourceKind::Rds.category(), Category::Storage);
        assert_eq!(ResourceKind::EptGateway.category(), Category::Storage);
        assert_eq!(ResourceKind::Ec2.category(), Category::Compute);
        // catch-all
        assert_eq!(ResourceKind::Subnet.category(), Category::Compute);
    }

    #[test]
    fn test_identity_is_kind_and_native_id() {
        let a = Resource::new(ResourceKind::Ec2, "i-1").with_name("web");
        let b = Resource::new(ResourceKind::Ec2, "i-1");
        let c = Resource::new(ResourceKind::Eni, "i-1");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_default_label_appends_name_tag() {
        let r = Resource::new(ResourceKind::Ec2, "i-0abc").with_name("web-1");
        assert_eq!(r.label(), "i-0abc\nweb-1");

        let bare = Resource::new(ResourceKind::Igw, "igw-1");
        assert_eq!(bare.label(), "igw-1");
    }

    #[test]
    fn test_eni_label_appends_address() {
        let r = Resource::new(ResourceKind::Eni, "eni-1").with_detail(ResourceDetail::Eni {
            public_ip: None,
            private_ip: Some("10.0.1.5".into()),
        });
        assert_eq!(r.label(), "eni-1\n10.0.1.5");

        let public = Resource::new(ResourceKind::Eni, "eni-2").with_detail(ResourceDetail::Eni {
            public_ip: Some("54.1.2.3".into()),
            private_ip: Some("10.0.1.6".into()),
        });
        assert_eq!(public.label(), "eni-2\n54.1.2.3");
    }

    #[test]
    fn test_name_only_label_for_arn_kinds() {
        let r = Resource::new(
            ResourceKind::Lambda,
            "arn:aws:lambda:us-east-1:123456789012:function:ingest",
        );
        assert_eq!(r.label(), "ingest");
        assert_eq!(r.short_id(), "ingest");
    }

    #[test]
    fn test_display_name_prefers_tag() {
        let r = Resource::new(ResourceKind::Ec2, "i-0abc").with_name("web-1");
        assert_eq!(r.display_name(), "web-1");
        assert_eq!(r.short_id(), "i-0abc");
    }
}
