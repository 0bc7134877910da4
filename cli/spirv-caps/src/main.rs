//! spirv-caps — resolve and inspect SPIR-V subtarget capabilities.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "spirv-caps", version, about = "SPIR-V subtarget capability resolver")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the capabilities of a SPIR-V target
    Resolve {
        /// Target triple (e.g., spirv64-unknown-opencl, spirv-unknown-vulkan)
        #[arg(long)]
        triple: Option<String>,
        /// Base processor name
        #[arg(long)]
        cpu: Option<String>,
        /// Feature string (e.g., +spirv1.3,+opencl2.0)
        #[arg(long)]
        features: Option<String>,
        /// SPIR-V extensions to enable (comma separated, see `spirv-caps extensions`)
        #[arg(long = "spirv-extensions")]
        spirv_extensions: Option<String>,
        /// Target description file (.target.toml); flags override its values
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output format (human, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// List the SPIR-V extensions accepted by --spirv-extensions
    Extensions,
    /// List the processors and features accepted by --cpu and --features
    Features,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::builder().filter_level(log_level).init();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Resolve {
            triple,
            cpu,
            features,
            spirv_extensions,
            config,
            format,
        } => {
            let request = commands::resolve::ResolveRequest {
                triple,
                cpu,
                features,
                extensions: spirv_extensions,
                config,
            };
            commands::resolve::run(&request, format.as_deref())
        }
        Commands::Extensions => commands::extensions::run(),
        Commands::Features => commands::features::run(),
    }
}
