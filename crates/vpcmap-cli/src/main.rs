use std::time::Instant;

use clap::Parser;

use vpcmap_cli::VpcmapOptions;
use vpcmap_cli::run_main;
use vpcmap_error::Result;

#[derive(Parser, Debug)]
#[command(
    name = "vpcmap",
    about = "vpcmap: turn VPC scan snapshots into inventory reports and Graphviz maps",
    version
)]
pub struct Cli {
    /// Snapshot files to load, one scanned VPC each (repeatable)
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        num_args = 1..,
        action = clap::ArgAction::Append,
        required = true
    )]
    files: Vec<String>,

    /// Skip diagrams for VPCs costing less than this per month
    #[arg(long = "cost-threshold", value_name = "USD", default_value_t = 2.0)]
    cost_threshold: f64,

    /// Write the inventory report to this file instead of stdout
    #[arg(long = "output-csv", value_name = "FILE")]
    output_csv: Option<String>,

    /// Write one .gv document per VPC into this directory
    #[arg(long = "graphviz-dir", value_name = "DIR")]
    graphviz_dir: Option<String>,

    /// Also rasterize each written document with the external 'dot' binary
    #[arg(long, default_value_t = false, requires = "graphviz_dir")]
    render: bool,

    /// TOML price table overriding the built-in rates
    #[arg(long = "price-book", value_name = "FILE")]
    price_book: Option<String>,

    /// Icon directory referenced from the DOT text
    #[arg(long = "icon-dir", value_name = "DIR")]
    icon_dir: Option<String>,
}

pub fn run(args: Cli) -> Result<()> {
    let total_start = Instant::now();

    // Initialize tracing subscriber for logging
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let opts = VpcmapOptions {
        files: args.files,
        cost_threshold: args.cost_threshold,
        output_csv: args.output_csv,
        graphviz_dir: args.graphviz_dir,
        render: args.render,
        price_book: args.price_book,
        icon_dir: args.icon_dir,
    };

    match run_main(&opts) {
        Ok(Some(output)) => {
            print!("{output}");
        }
        Ok(None) => {
            // Output went to the chosen file sink.
        }
        Err(e) => {
            eprintln!("Error: {e}");
            tracing::error!(error = %e, "execution failed");
        }
    }

    let total_secs = total_start.elapsed().as_secs_f64();
    tracing::info!(total_secs, "complete");
    Ok(())
}

pub fn main() -> Result<()> {
    let args = Cli::parse();
    run(args)
}
