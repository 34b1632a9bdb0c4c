//! `cncsoc check`: validate, resolve and compose, then summarize.

use std::path::Path;

use cncsoc_soc::ComposedSoc;

use crate::pipeline::load_and_compose;
use crate::GlobalArgs;

/// Runs the `cncsoc check` command.
pub fn run(path: &Path, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let (_, soc) = load_and_compose(path)?;
    if !global.quiet {
        println!("{}", summary(&soc));
    }
    Ok(0)
}

/// Renders a short human-readable description of a composed SoC.
pub fn summary(soc: &ComposedSoc) -> String {
    let design = &soc.design;
    let mut lines = vec![match &design.ident.version {
        Some(version) => format!("{} ({:08x})", design.ident.text, version.short()),
        None => design.ident.text.clone(),
    }];
    lines.push(format!("  base       {}", soc.base));
    lines.push(format!(
        "  board      {} rev {} ({})",
        soc.platform.board(),
        soc.platform.revision(),
        soc.platform.device()
    ));
    lines.push(format!(
        "  sys clock  {}",
        design.domain(soc.sys).frequency
    ));
    lines.push(format!(
        "  channels   {} in, {} out, {} pwm",
        soc.inputs.len(),
        soc.outputs.len(),
        soc.pwm.len()
    ));
    lines.push(format!(
        "  registers  {} in {} regions",
        design.csrs.len(),
        design.csrs.regions().len()
    ));
    lines.join("\n")
}
