//! DOT format utilities: identifier sanitization, label escaping, icons.

use std::collections::BTreeMap;

use vpcmap_core::ResourceKind;

/// Sanitize a string to be a valid DOT node identifier.
///
/// Space, hyphen and slash become underscore; periods are deleted. Applied
/// consistently to every id position so cross-references resolve.
pub fn sanitize_id(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            ' ' | '-' | '/' => out.push('_'),
            '.' => {}
            other => out.push(other),
        }
    }
    out
}

/// Escape special characters for DOT labels.
pub fn escape_label(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Write indentation to output.
pub fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str("  ");
    }
}

/// Icon lookup table: resource kind to image path under a configurable icon
/// directory. Kinds without a mapping (subnets) render label-only.
#[derive(Debug, Clone)]
pub struct IconTheme {
    dir: String,
    files: BTreeMap<ResourceKind, &'static str>,
}

impl Default for IconTheme {
    fn default() -> Self {
        use ResourceKind::*;
        let files = BTreeMap::from([
            (Acl, "ACL"),
            (Asg, "ASG"),
            (Ec2, "EC2"),
            (Eks, "EKS"),
            (ElbV1, "LB"),
            (ElbV2, "ALB"),
            (Eni, "ENI"),
            (EptInterface, "EPT-I"),
            (EptGateway, "EPT-GW"),
            (EptGwlb, "EPT-GWLB"),
            (HostedZone, "HZ"),
            (Igw, "IGW"),
            (Lambda, "Lambda"),
            (Nat, "NAT"),
            (Peering, "vpc-peering"),
            (Rds, "RDS"),
            (RouteTable, "RouteTable"),
            (SecurityGroup, "SG"),
            (TargetGroup, "TG"),
            (Vpgw, "VPNGW"),
        ]);

        Self {
            dir: "../icons".to_string(),
            files,
        }
    }
}

impl IconTheme {
    /// Theme rooted at a different icon directory.
    pub fn with_dir(mut self, dir: impl Into<String>) -> Self {
        self.dir = dir.into();
        self
    }

    /// Image path for a kind, if one is mapped.
    pub fn icon(&self, kind: ResourceKind) -> Option<String> {
        self.files
            .get(&kind)
            .map(|file| format!("{}/{}.png", self.dir, file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_id() {
        assert_eq!(sanitize_id("10.0.0.1/24 main.subnet"), "10001_24_mainsubnet");
        assert_eq!(sanitize_id("subnet-0a1b2c"), "subnet_0a1b2c");
        assert_eq!(sanitize_id("app/web/50dc6c49"), "app_web_50dc6c49");
        assert_eq!(sanitize_id("plain"), "plain");
    }

    #[test]
    fn test_escape_label() {
        assert_eq!(escape_label("a\nb"), "a\\nb");
        assert_eq!(escape_label("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape_label("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn test_icon_lookup() {
        let theme = IconTheme::default();
        assert_eq!(
            theme.icon(ResourceKind::Ec2).as_deref(),
            Some("../icons/EC2.png")
        );
        assert_eq!(
            theme.icon(ResourceKind::ElbV2).as_deref(),
            Some("../icons/ALB.png")
        );
        assert_eq!(theme.icon(ResourceKind::Subnet), None);
    }

    #[test]
    fn test_icon_dir_override() {
        let theme = IconTheme::default().with_dir("assets");
        assert_eq!(
            theme.icon(ResourceKind::Nat).as_deref(),
            Some("assets/NAT.png")
        );
    }
}
