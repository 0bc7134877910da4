//! `spirv-caps extensions` — accepted extension names.

use anyhow::Result;
use spirv_target::Extension;

/// Rows of (name, description) for every accepted extension.
pub fn rows() -> Vec<(&'static str, &'static str)> {
    Extension::ALL
        .into_iter()
        .map(|ext| (ext.name(), ext.description()))
        .collect()
}

pub fn run() -> Result<()> {
    println!("SPIR-V extensions (--spirv-extensions):");
    println!();
    for (name, description) in rows() {
        println!("  {name:<42} {description}");
    }
    println!();
    println!("Extensions take effect only for OpenCL targets.");
    Ok(())
}
