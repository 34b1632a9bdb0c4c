//! `cncsoc csr`: print the register map.

use cncsoc_soc::csr_json;

use crate::pipeline::load_and_compose;
use crate::{CsrArgs, ReportFormat};

/// Runs the `cncsoc csr` command.
pub fn run(args: &CsrArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let (_, soc) = load_and_compose(&args.config)?;
    let csrs = &soc.design.csrs;
    match args.format {
        ReportFormat::Text => print!("{}", render_table(csrs)),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&csr_json(csrs))?),
    }
    Ok(0)
}

/// One line per register: address, access, width and name.
fn render_table(csrs: &cncsoc_ir::CsrMap) -> String {
    let name_width = csrs
        .registers()
        .map(|r| r.full_name().len())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for r in csrs.registers() {
        let access = match r.access {
            cncsoc_ir::CsrAccess::ReadWrite => "rw",
            cncsoc_ir::CsrAccess::ReadOnly => "ro",
        };
        out.push_str(&format!(
            "0x{:08x}  {:<name_width$}  {access}  {:>2} bit\n",
            r.address,
            r.full_name(),
            r.width,
        ));
    }
    out
}
