//! `spirv-caps resolve` — resolve and print a subtarget.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use log::info;
use spirv_target::config::load_target_config;
use spirv_target::{CapabilityReport, ExtensionConfig, Subtarget, SubtargetBuilder, TargetConfig};

/// Command-line inputs for a resolution.
#[derive(Debug, Default)]
pub struct ResolveRequest {
    pub triple: Option<String>,
    pub cpu: Option<String>,
    pub features: Option<String>,
    /// Comma-separated extension names.
    pub extensions: Option<String>,
    pub config: Option<PathBuf>,
}

/// Merge the optional config file with command-line values. Flags win; an
/// extension list replaces the file's list, and an empty one clears it.
pub fn target_config(request: &ResolveRequest) -> Result<TargetConfig> {
    let mut config = match &request.config {
        Some(path) => load_target_config(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => {
            let Some(triple) = &request.triple else {
                bail!("no target given: pass --triple or --config");
            };
            TargetConfig {
                triple: triple.clone(),
                cpu: String::new(),
                features: String::new(),
                extensions: ExtensionConfig::new(),
            }
        }
    };

    if let Some(triple) = &request.triple {
        config.triple = triple.clone();
    }
    if let Some(cpu) = &request.cpu {
        config.cpu = cpu.clone();
    }
    if let Some(features) = &request.features {
        config.features = features.clone();
    }
    if let Some(list) = &request.extensions {
        config.extensions =
            ExtensionConfig::parse_list(list).context("invalid --spirv-extensions value")?;
    }
    Ok(config)
}

/// Resolve the subtarget described by `request`.
pub fn resolve(request: &ResolveRequest) -> Result<Subtarget> {
    let config = target_config(request)?;
    let builder = SubtargetBuilder::from_config(&config)
        .with_context(|| format!("cannot resolve target '{}'", config.triple))?;
    Ok(builder.build())
}

pub fn run(request: &ResolveRequest, format: Option<&str>) -> Result<()> {
    let subtarget = resolve(request)?;
    info!("resolved {}", subtarget.profile().triple());
    let report = subtarget.report();

    match format.unwrap_or("human") {
        "human" => print_human(&report),
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        other => bail!("unknown format: '{other}'. Expected 'human' or 'json'."),
    }
    Ok(())
}

fn print_human(report: &CapabilityReport) {
    println!("=== Subtarget: {} ===", report.triple);
    println!("  Environment:     {}", report.environment);
    if !report.cpu.is_empty() {
        println!("  CPU:             {}", report.cpu);
    }
    println!("  Pointer size:    {} bits", report.pointer_size);
    println!("  SPIR-V version:  {}", report.spirv_version);
    if let Some(opencl) = report.opencl_version {
        println!("  OpenCL version:  {opencl}");
    }
    println!(
        "  Pointer compare: {}",
        if report.direct_pointer_comparison {
            "native (OpPtrEqual)"
        } else {
            "lowered"
        }
    );
    println!();

    println!("--- Extensions ---");
    if report.extensions.is_empty() {
        println!("  (none)");
    }
    for ext in &report.extensions {
        println!("  {ext}");
    }
    println!();

    println!("--- Extended instruction sets ---");
    for set in &report.ext_inst_sets {
        println!("  {set}");
    }
}
