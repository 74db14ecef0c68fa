//! Tab-separated inventory report.
//!
//! One row per resource in discovery order:
//! `profile  region  vpc-name  type  id  name  type-info  monthly-cost`,
//! with the cost formatted with thousands separators and two decimals.

use std::io::Write;

use vpcmap_error::Result;

use crate::graph::VpcGraph;
use crate::pricing::PriceBook;

/// Format a non-negative amount as `1,234.56`.
pub fn format_money(amount: f64) -> String {
    let fixed = format!("{:.2}", amount);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    format!("{}.{}", grouped, frac_part)
}

/// Write the report rows for one VPC. The `profile` and `region` columns come
/// from the scan that produced the graph.
pub fn write_rows<W: Write>(
    graph: &VpcGraph,
    profile: &str,
    region: &str,
    book: &PriceBook,
    out: &mut W,
) -> Result<()> {
    for (_, resource) in graph.resources() {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            profile,
            region,
            graph.name(),
            resource.kind().as_tag(),
            resource.short_id(),
            resource.display_name(),
            resource.type_info(),
            format_money(resource.monthly_cost(book)),
        )?;
    }
    Ok(())
}
