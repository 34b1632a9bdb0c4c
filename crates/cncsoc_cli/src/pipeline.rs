//! Shared load-and-compose step of every subcommand.

use std::path::Path;

use cncsoc_config::BoardConfig;
use cncsoc_soc::ComposedSoc;

/// Loads, validates and resolves the configuration at `path`, then composes it.
pub fn load_and_compose(path: &Path) -> Result<(BoardConfig, ComposedSoc), Box<dyn std::error::Error>> {
    let config = cncsoc_config::load_config(path)?;
    tracing::debug!(path = %path.display(), board = %config.board, "configuration loaded");
    let soc = cncsoc_soc::compose(&config)?;
    Ok((config, soc))
}

/// A small valid configuration used by tests.
#[cfg(test)]
pub(crate) const SAMPLE: &str = r#"
base_platform = "litex.soc.integration.soc_core.SoCMini"
board = "5A-75B"
revision = "7.0"

[phy]
tx_delay = 0.0

[bridge]
mac_address = "10:e2:d5:00:00:00"
ip_address = "192.168.1.50"

[[inputs]]
pin = "C4"
io_standard = "LVCMOS33"
name = "estop"

[[outputs]]
pin = "A1"
io_standard = "LVCMOS33"

[[pwm_channels]]
pin = "B1"
io_standard = "LVCMOS33"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn loads_and_composes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("board.toml");
        fs::write(&path, SAMPLE).unwrap();
        let (config, soc) = load_and_compose(&path).unwrap();
        assert_eq!(config.inputs.len(), 1);
        assert_eq!(soc.outputs.len(), 1);
    }

    #[test]
    fn missing_file() {
        let tmp = TempDir::new().unwrap();
        assert!(load_and_compose(&tmp.path().join("nope.toml")).is_err());
    }

    #[test]
    fn unsupported_board_message() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("board.toml");
        fs::write(&path, SAMPLE.replace("5A-75B", "ulx3s")).unwrap();
        let err = load_and_compose(&path).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported board 'ulx3s' (supported: 5a-75b, 5a-75e)"
        );
    }
}
