//! Command-line driver: snapshot files in, reports and diagrams out.
//!
//! Each `-f` input is one scanned VPC. All snapshots are loaded first, then
//! routed to exactly one sink: a report file, a Graphviz directory, or the
//! report on stdout.

pub mod output;
pub mod snapshot;

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, warn};

use vpcmap_core::{Levels, PriceBook, VpcGraph, report};
use vpcmap_dot::{IconTheme, render_graph};
use vpcmap_error::{Error, ErrorKind, Result};

use crate::snapshot::Snapshot;

/// Options controlling one `vpcmap` run.
#[derive(Debug, Default)]
pub struct VpcmapOptions {
    /// Snapshot files to load, one VPC each.
    pub files: Vec<String>,
    /// VPCs costing less than this per month are skipped when writing
    /// diagrams.
    pub cost_threshold: f64,
    /// Write the inventory report to this file instead of stdout.
    pub output_csv: Option<String>,
    /// Write one `.gv` document per VPC into this directory.
    pub graphviz_dir: Option<String>,
    /// Also rasterize each written document with `dot`.
    pub render: bool,
    /// TOML price table overriding the built-in book.
    pub price_book: Option<String>,
    /// Icon directory referenced from the DOT text.
    pub icon_dir: Option<String>,
}

/// One loaded scan: the snapshot header fields plus the populated graph.
struct Scan {
    profile: String,
    region: String,
    graph: VpcGraph,
}

fn load_price_book(path: Option<&str>) -> Result<PriceBook> {
    let Some(path) = path else {
        return Ok(PriceBook::default());
    };

    let text = std::fs::read_to_string(path).map_err(|e| {
        Error::from(e)
            .with_operation("cli::load_price_book")
            .with_context("path", path.to_string())
    })?;

    toml::from_str(&text).map_err(|e| {
        Error::config_invalid(e.to_string())
            .with_operation("cli::load_price_book")
            .with_context("path", path.to_string())
            .set_source(e)
    })
}

fn load_scans(files: &[String]) -> Result<Vec<Scan>> {
    let mut scans = Vec::with_capacity(files.len());
    for file in files {
        let start = Instant::now();
        let snapshot = Snapshot::load(Path::new(file))?;
        let profile = snapshot.profile.clone();
        let region = snapshot.region.clone();
        let graph = snapshot.into_graph();
        info!(
            file,
            vpc = graph.id(),
            resources = graph.resource_count(),
            load_secs = start.elapsed().as_secs_f64(),
            "snapshot loaded"
        );
        scans.push(Scan { profile, region, graph });
    }
    Ok(scans)
}

fn write_report<W: std::io::Write>(scans: &[Scan], book: &PriceBook, out: &mut W) -> Result<()> {
    for scan in scans {
        report::write_rows(&scan.graph, &scan.profile, &scan.region, book, out)?;
    }
    Ok(())
}

fn write_diagrams(
    scans: &[Scan],
    book: &PriceBook,
    icons: &IconTheme,
    dir: &Path,
    cost_threshold: f64,
    render: bool,
) -> Result<()> {
    let levels = Levels::default();

    for scan in scans {
        let monthly = scan.graph.monthly_cost(book);
        if monthly < cost_threshold {
            warn!(
                vpc = scan.graph.id(),
                monthly, cost_threshold, "skipping cheap vpc"
            );
            continue;
        }

        let text = render_graph(&scan.graph, &levels, book, icons);
        let title = format!("{}_{}", scan.graph.id(), scan.graph.name());
        let path = output::write_graphviz(dir, &title, &text)?;
        if render {
            output::rasterize(&path)?;
        }
    }
    Ok(())
}

/// Run the tool. Returns the report text when no file sink was chosen, so
/// the caller decides how to print it.
pub fn run_main(opts: &VpcmapOptions) -> Result<Option<String>> {
    if opts.files.is_empty() {
        return Err(Error::invalid_argument("no snapshot files given"));
    }

    let book = load_price_book(opts.price_book.as_deref())?;
    let scans = load_scans(&opts.files)?;

    if let Some(path) = &opts.output_csv {
        let mut out = std::fs::File::create(path).map_err(|e| {
            Error::from(e)
                .with_operation("cli::run_main")
                .with_context("path", path.clone())
        })?;
        write_report(&scans, &book, &mut out)?;
        info!(path, rows = scans.iter().map(|s| s.graph.resource_count()).sum::<usize>(), "report written");
        return Ok(None);
    }

    if let Some(dir) = &opts.graphviz_dir {
        let icons = match &opts.icon_dir {
            Some(dir) => IconTheme::default().with_dir(dir.clone()),
            None => IconTheme::default(),
        };
        write_diagrams(
            &scans,
            &book,
            &icons,
            &PathBuf::from(dir),
            opts.cost_threshold,
            opts.render,
        )?;
        return Ok(None);
    }

    let mut out = Vec::new();
    write_report(&scans, &book, &mut out)?;
    let text = String::from_utf8(out)
        .map_err(|e| Error::new(ErrorKind::ReportFailed, "report is not valid utf-8").set_source(e))?;
    Ok(Some(text))
}
