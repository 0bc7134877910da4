//! `spirv-caps features` — accepted processor and feature names.

use anyhow::Result;
use spirv_target::DefaultFeatureParser;

pub fn run() -> Result<()> {
    println!("Processors (--cpu):");
    for name in DefaultFeatureParser::processor_names() {
        println!("  {name}");
    }
    println!();
    println!("Features (--features, prefix with '+' or '-'):");
    let names: Vec<_> = DefaultFeatureParser::feature_names().collect();
    for row in names.chunks(7) {
        println!("  {}", row.join(" "));
    }
    Ok(())
}
