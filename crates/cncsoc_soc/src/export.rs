//! Artifacts consumed outside the fabric: the register map and the host
//! driver configuration.

use cncsoc_config::{BoardConfig, Channel, ChannelRole};
use cncsoc_ir::{CsrAccess, CsrMap};
use cncsoc_platform::Board;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fmt::Write;

fn access_name(access: CsrAccess) -> &'static str {
    match access {
        CsrAccess::ReadWrite => "rw",
        CsrAccess::ReadOnly => "ro",
    }
}

/// Renders the register map as CSV, region bases first.
///
/// ```text
/// csr_base,ctrl,0x00000000,,
/// csr_register,ctrl_reset,0x00000000,1,rw
/// ```
pub fn csr_csv(csrs: &CsrMap) -> String {
    let mut out = String::new();
    for region in csrs.regions() {
        let _ = writeln!(out, "csr_base,{},0x{:08x},,", region.name, region.base);
    }
    for r in csrs.registers() {
        let _ = writeln!(
            out,
            "csr_register,{},0x{:08x},{},{}",
            r.full_name(),
            r.address,
            r.words(),
            access_name(r.access)
        );
    }
    out
}

/// Renders the register map as JSON with `csr_bases` and `csr_registers` objects.
pub fn csr_json(csrs: &CsrMap) -> Value {
    let bases: Map<String, Value> = csrs
        .regions()
        .iter()
        .map(|r| (r.name.clone(), json!(r.base)))
        .collect();
    let registers: Map<String, Value> = csrs
        .registers()
        .map(|r| {
            (
                r.full_name(),
                json!({
                    "addr": r.address,
                    "size": r.words(),
                    "width": r.width,
                    "type": access_name(r.access),
                }),
            )
        })
        .collect();
    json!({ "csr_bases": bases, "csr_registers": registers })
}

/// One channel as the host driver sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverChannel {
    /// Optional label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Pin.
    pub pin: String,
}

impl From<&Channel> for DriverChannel {
    fn from(channel: &Channel) -> Self {
        Self {
            name: channel.name.clone(),
            pin: channel.pin.clone(),
        }
    }
}

/// Configuration for the host-side driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverConfig {
    /// Board identifier as configured.
    pub board_name: String,
    /// System clock in Hz.
    pub clock_frequency: u64,
    /// IPv4 address of the board.
    pub ip_address: String,
    /// MAC address of the board.
    pub mac_address: String,
    /// Input channels in register bit order.
    pub gpio_in: Vec<DriverChannel>,
    /// Output channels in register bit order.
    pub gpio_out: Vec<DriverChannel>,
    /// PWM channels in register order.
    pub pwm: Vec<DriverChannel>,
}

impl DriverConfig {
    /// Builds the driver configuration for `config` on `board`.
    ///
    /// The board name is exported in its canonical spelling.
    pub fn from_config(config: &BoardConfig, board: Board) -> Self {
        let channels = |role| config.channels(role).iter().map(DriverChannel::from).collect();
        Self {
            board_name: board.name().to_string(),
            clock_frequency: config.sys_clk_freq.hz(),
            ip_address: config.bridge.ip_address.to_string(),
            mac_address: config.bridge.mac_address.to_string(),
            gpio_in: channels(ChannelRole::Input),
            gpio_out: channels(ChannelRole::Output),
            pwm: channels(ChannelRole::Pwm),
        }
    }
}
