//! ARN parsing.
//!
//! Several resource types (EKS clusters, Lambda functions, v2 load balancers,
//! target groups) are identified by full ARNs. Diagrams and reports use the
//! trailing resource component; the full ARN is kept for display.

/// Parsed components of an Amazon Resource Name.
///
/// Format: `arn:partition:service:region:account:resource` where the resource
/// element may be `type/name`, `type:name`, or bare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arn<'a> {
    pub partition: &'a str,
    pub service: &'a str,
    pub region: &'a str,
    pub account: &'a str,
    pub resource_type: Option<&'a str>,
    pub resource: &'a str,
}

/// Parse an ARN string. Returns `None` for anything that does not carry the
/// `arn:` prefix or has too few elements.
pub fn parse_arn(arn: &str) -> Option<Arn<'_>> {
    if !arn.starts_with("arn:") {
        return None;
    }

    let elements: Vec<&str> = arn.splitn(7, ':').collect();
    if elements.len() < 6 {
        return None;
    }

    let (resource_type, resource) = if elements.len() == 7 {
        (Some(elements[5]), elements[6])
    } else if let Some((ty, res)) = elements[5].split_once('/') {
        (Some(ty), res)
    } else {
        (None, elements[5])
    };

    Some(Arn {
        partition: elements[1],
        service: elements[2],
        region: elements[3],
        account: elements[4],
        resource_type,
        resource,
    })
}

/// Shorten an identifier to its ARN resource component, or return it as-is
/// when it is not an ARN.
pub fn shorten(id: &str) -> &str {
    match parse_arn(id) {
        Some(arn) => arn.resource,
        None => id,
    }
}
