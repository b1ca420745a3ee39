use clap::{Parser, Subcommand};
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod generate;
mod input;
mod model;
mod render;
mod store;

use anyhow::Context;
use config::{GeneratorConfig, LinkPolicy, UnknownDatapointPolicy, Variant};
use generate::Generator;
use store::{DirStore, MemoryStore};

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "knx-menu-gen")]
#[command(about = "Generate phone menu XML for controlling KNX group addresses", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,

    /// Debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Errors only.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the menu tree (replaces any previous output).
    Generate {
        /// Group address records exported from the project file (JSON).
        #[arg(long, env = "KNX_MENU_RECORDS")]
        records: String,

        /// Gateway host used in URLs. Discovered from the local interface if omitted.
        #[arg(long, env = "KNX_MENU_HOST")]
        host: Option<String>,

        /// Directory served by the web server; one subdirectory per variant.
        #[arg(long, env = "KNX_MENU_WEB_ROOT", default_value = "/srv/http")]
        web_root: String,

        /// Port of the gateway's action endpoint.
        #[arg(long, env = "KNX_MENU_ACTION_PORT", default_value_t = config::DEFAULT_ACTION_PORT)]
        action_port: u16,

        /// Output variants to generate.
        #[arg(long = "variant", value_enum, default_values_t = [Variant::Snom, Variant::Rtx])]
        variants: Vec<Variant>,

        /// Drop only the leaf with an unknown datapoint type instead of its whole group.
        #[arg(long)]
        skip_unknown: bool,

        /// Omit menu links to leaves that have no action document.
        #[arg(long)]
        built_links_only: bool,

        /// Build everything in memory and list it; write nothing.
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.cmd {
        Commands::Generate {
            records,
            host,
            web_root,
            action_port,
            variants,
            skip_unknown,
            built_links_only,
            dry_run,
        } => {
            // 1) Load records.
            let records = input::load_records(&records)?;

            let host = host.unwrap_or_else(|| config::discover_local_ip().to_string());

            for variant in variants {
                // 2) Configure this variant.
                let mut cfg = GeneratorConfig::for_host(&host, variant, action_port);
                if skip_unknown {
                    cfg.unknown_datapoint = UnknownDatapointPolicy::SkipLeaf;
                }
                if built_links_only {
                    cfg.links = LinkPolicy::BuiltOnly;
                }

                // 3) Validate before touching the output directory.
                let generator = Generator::new(&cfg, &records)?;

                // 4) Generate + store.
                if dry_run {
                    let mut store = MemoryStore::default();
                    generator.run(&mut store)?;
                    for (reference, doc) in &store.documents {
                        println!(
                            "{:?}: {} ({} entries)",
                            variant,
                            reference.file_name(),
                            doc.entries.len()
                        );
                    }
                    continue;
                }

                let dir = Path::new(&web_root).join(variant.dir_name());
                let mut store = DirStore::new(&dir, cfg.menu_http_root.clone(), variant.encoding());
                store
                    .provision()
                    .with_context(|| format!("prepare output directory {}", dir.display()))?;
                let report = generator
                    .run(&mut store)
                    .with_context(|| format!("generate {:?} menus into {}", variant, dir.display()))?;

                println!(
                    "Wrote {} documents to {} ({} leaves, {} without actions, \
                     {} cancelled scans, {} skipped leaves, {} dangling links)",
                    report.documents_stored,
                    store.dir().display(),
                    report.stats.leaves,
                    report.stats.leaves_without_actions,
                    report.stats.cancelled_scans,
                    report.stats.skipped_leaves,
                    report.dangling.len()
                );
            }
        }
    }

    Ok(())
}
