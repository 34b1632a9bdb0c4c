//! `cncsoc build`: compose and write the generated artifacts.
//!
//! Writes into the output directory:
//!
//! - `design.json`: the composed hardware graph
//! - `csr.csv` and `csr.json`: the register map
//! - `driver.json`: the host driver configuration

use std::fs;
use std::path::{Path, PathBuf};

use cncsoc_config::BoardConfig;
use cncsoc_soc::{csr_csv, csr_json, ComposedSoc, DriverConfig};

use crate::pipeline::load_and_compose;
use crate::{BuildArgs, GlobalArgs};

/// Runs the `cncsoc build` command.
pub fn run(args: &BuildArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let (config, soc) = load_and_compose(&args.config)?;
    let out_dir = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_dir(&soc));

    if !global.quiet {
        eprintln!("   Composing {}", soc.design.ident.text);
    }
    let written = write_artifacts(&config, &soc, &out_dir)?;
    if !global.quiet {
        eprintln!(
            "    Finished {} artifacts in {}",
            written.len(),
            out_dir.display()
        );
    }
    Ok(0)
}

/// `build/<board>` with the canonical board name.
fn default_output_dir(soc: &ComposedSoc) -> PathBuf {
    Path::new("build").join(soc.board().name())
}

/// Writes every artifact into `dir`, creating it if needed.
pub fn write_artifacts(
    config: &BoardConfig,
    soc: &ComposedSoc,
    dir: &Path,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)?;
    let artifacts = [
        ("design.json", serde_json::to_string_pretty(&soc.design)?),
        ("csr.csv", csr_csv(&soc.design.csrs)),
        ("csr.json", serde_json::to_string_pretty(&csr_json(&soc.design.csrs))?),
        (
            "driver.json",
            serde_json::to_string_pretty(&DriverConfig::from_config(config, soc.board()))?,
        ),
    ];
    let mut written = Vec::with_capacity(artifacts.len());
    for (name, content) in artifacts {
        let path = dir.join(name);
        fs::write(&path, content)?;
        tracing::debug!(path = %path.display(), "wrote artifact");
        written.push(path);
    }
    Ok(written)
}
