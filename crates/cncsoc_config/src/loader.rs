//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::resolve::resolve_base_platform;
use crate::types::{BoardConfig, Channel, ChannelRole, UnresolvedBoardConfig, MAX_CHANNELS};
use std::collections::HashMap;
use std::path::Path;

/// Loads, validates and resolves a board configuration file.
pub fn load_config(path: &Path) -> Result<BoardConfig, ConfigError> {
    tracing::debug!(path = %path.display(), "loading board configuration");
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses, validates and resolves a board configuration from a string.
///
/// Validation runs to completion before the base platform is resolved, so a
/// malformed document is always reported as [`ConfigError::Validation`] even
/// when its base platform reference is also wrong.
pub fn load_config_from_str(content: &str) -> Result<BoardConfig, ConfigError> {
    let raw: UnresolvedBoardConfig =
        toml::from_str(content).map_err(|e| ConfigError::validation("document", e.message()))?;
    raw.validate_and_resolve()
}

impl UnresolvedBoardConfig {
    /// Validates the configuration, then resolves its base platform.
    pub fn validate_and_resolve(self) -> Result<BoardConfig, ConfigError> {
        validate_config(&self)?;
        self.resolve()
    }

    /// Replaces the textual base platform reference with the resolved kind.
    ///
    /// Does not validate; see [`UnresolvedBoardConfig::validate_and_resolve`].
    pub fn resolve(self) -> Result<BoardConfig, ConfigError> {
        let base_platform = resolve_base_platform(&self.base_platform)?;
        Ok(BoardConfig {
            base_platform,
            board: self.board,
            revision: self.revision,
            sys_clk_freq: self.sys_clk_freq,
            ident_version: self.ident_version,
            phy: self.phy,
            bridge: self.bridge,
            inputs: self.inputs,
            outputs: self.outputs,
            pwm_channels: self.pwm_channels,
        })
    }
}

/// Checks every field-level invariant of a configuration.
///
/// Does not look at the base platform or at board support; those are
/// checked by resolution and composition respectively.
pub fn validate_config<P>(config: &BoardConfig<P>) -> Result<(), ConfigError> {
    if config.board.trim().is_empty() {
        return Err(ConfigError::validation("board", "must not be empty"));
    }
    if config.revision.trim().is_empty() {
        return Err(ConfigError::validation("revision", "must not be empty"));
    }
    if config.sys_clk_freq.is_zero() {
        return Err(ConfigError::validation("sys_clk_freq", "must be non-zero"));
    }

    for (field, delay) in [
        ("phy.tx_delay", config.phy.tx_delay),
        ("phy.rx_delay", config.phy.rx_delay),
    ] {
        if let Some(delay) = delay {
            if !delay.is_finite() || delay < 0.0 {
                return Err(ConfigError::validation(
                    field,
                    format!("must be a non-negative number of seconds, got {delay}"),
                ));
            }
        }
    }

    if config.bridge.buffer_depth == 0 {
        return Err(ConfigError::validation(
            "bridge.buffer_depth",
            "must be a positive integer",
        ));
    }

    for role in ChannelRole::ALL {
        validate_channels(role, config.channels(role))?;
    }
    Ok(())
}

fn validate_channels(role: ChannelRole, channels: &[Channel]) -> Result<(), ConfigError> {
    let field = role.field_name();
    if channels.len() > MAX_CHANNELS {
        return Err(ConfigError::validation(
            field,
            format!(
                "{} channels exceed the limit of {MAX_CHANNELS}",
                channels.len()
            ),
        ));
    }

    let mut pads: HashMap<(&str, &str), usize> = HashMap::new();
    let mut names: HashMap<&str, usize> = HashMap::new();
    for (index, channel) in channels.iter().enumerate() {
        if channel.pin.trim().is_empty() {
            return Err(ConfigError::validation(
                format!("{field}[{index}].pin"),
                "must be a non-empty string",
            ));
        }
        if channel.pin.split_whitespace().count() != 1 {
            return Err(ConfigError::validation(
                format!("{field}[{index}].pin"),
                "must name exactly one pin",
            ));
        }
        if channel.io_standard.trim().is_empty() {
            return Err(ConfigError::validation(
                format!("{field}[{index}].io_standard"),
                "must be a non-empty string",
            ));
        }
        let pad = (channel.pin.as_str(), channel.io_standard.as_str());
        if let Some(first) = pads.insert(pad, index) {
            return Err(ConfigError::validation(
                format!("{field}[{index}]"),
                format!(
                    "duplicates {field}[{first}] (pin {}, {})",
                    channel.pin, channel.io_standard
                ),
            ));
        }
        if let Some(name) = &channel.name {
            if name.trim().is_empty() {
                return Err(ConfigError::validation(
                    format!("{field}[{index}].name"),
                    "must not be empty when given",
                ));
            }
            if let Some(first) = names.insert(name.as_str(), index) {
                return Err(ConfigError::validation(
                    format!("{field}[{index}].name"),
                    format!("'{name}' is already used by {field}[{first}]"),
                ));
            }
        }
    }
    Ok(())
}
