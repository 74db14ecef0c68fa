//! Static price tables and the monthly-cost dispatch.
//!
//! The tables are configuration, not logic: `Default` carries the built-in
//! rates and the whole book deserializes from TOML so operators can version
//! rate updates independently of code. Unknown instance types cost zero.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::resource::{Resource, ResourceDetail, ResourceKind};

/// Billing-month hours used to turn hourly rates into monthly estimates.
pub const HOURS_PER_MONTH: f64 = 24.0 * 30.0;

/// Hourly rates per priced resource class.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PriceBook {
    /// EC2 on-demand hourly rate by instance type.
    pub ec2_hourly: BTreeMap<String, f64>,
    /// RDS on-demand hourly rate by instance class.
    pub rds_hourly: BTreeMap<String, f64>,
    /// Flat hourly rate per load balancer (either version).
    pub elb_hourly: f64,
    /// Flat hourly rate per NAT gateway.
    pub nat_hourly: f64,
    /// Hourly rate for a network interface holding a public address.
    pub public_eni_hourly: f64,
}

impl Default for PriceBook {
    fn default() -> Self {
        let ec2_hourly = [
            ("m3.medium", 0.067),
            ("m4.2xlarge", 0.40),
            ("m5.large", 0.096),
            ("t2.2xlarge", 0.3712),
            ("t2.large", 0.0928),
            ("t2.medium", 0.0464),
            ("t2.micro", 0.0116),
            ("t2.small", 0.023),
            ("t2.xlarge", 0.1856),
            ("t3.small", 0.0208),
            ("t3a.large", 0.0752),
            ("t3a.xlarge", 0.1504),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let rds_hourly = [
            ("db.m3.2xlarge", 1.55),
            ("db.m5.2xlarge", 0.712),
            ("db.m5.xl", 0.356),
            ("db.m5.xlarge", 0.342),
            ("db.r5.large", 0.25),
            ("db.r5.xl", 0.50),
            ("db.r5.xlarge", 0.48),
            ("db.t2.medium", 0.073),
            ("db.t2.micro", 0.017),
            ("db.t2.small", 0.036),
            ("db.t3.medium", 0.072),
            ("db.t3.small", 0.036),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        Self {
            ec2_hourly,
            rds_hourly,
            elb_hourly: 0.025,
            nat_hourly: 0.045,
            public_eni_hourly: 0.005,
        }
    }
}

impl PriceBook {
    /// Monthly cost estimate for one resource. Non-negative; zero for every
    /// unpriced kind and for unknown instance types.
    pub fn monthly(&self, resource: &Resource) -> f64 {
        let hourly = match (resource.kind(), resource.detail()) {
            (ResourceKind::Ec2, ResourceDetail::Ec2 { instance_type }) => {
                self.ec2_hourly.get(instance_type).copied().unwrap_or(0.0)
            }
            (ResourceKind::Rds, ResourceDetail::Rds { instance_class }) => {
                self.rds_hourly.get(instance_class).copied().unwrap_or(0.0)
            }
            (ResourceKind::ElbV1 | ResourceKind::ElbV2, _) => self.elb_hourly,
            (ResourceKind::Nat, _) => self.nat_hourly,
            (ResourceKind::Eni, ResourceDetail::Eni { public_ip, .. }) => {
                if public_ip.is_some() {
                    self.public_eni_hourly
                } else {
                    0.0
                }
            }
            _ => 0.0,
        };

        hourly * HOURS_PER_MONTH
    }
}
