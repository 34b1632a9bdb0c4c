//! Configuration types deserialized from a board TOML document.

use crate::resolve::BaseSystemKind;
use cncsoc_common::Frequency;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum number of channels per role; each channel owns one bit of a
/// 32-bit register.
pub const MAX_CHANNELS: usize = 32;

/// Default system clock when the document does not set `sys_clk_freq`.
pub const DEFAULT_SYS_CLK_FREQ: Frequency = Frequency::from_mhz(50);

/// Default bus-bridge buffer depth.
pub const DEFAULT_BUFFER_DEPTH: u32 = 16;

/// The top-level board configuration.
///
/// `P` is the representation of the base platform: the raw dotted reference
/// (`String`) straight out of the document, or the resolved
/// [`BaseSystemKind`] once [`BoardConfig::validate_and_resolve`] has run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BoardConfig<P = BaseSystemKind> {
    /// Reference to the base system the SoC is built on.
    #[serde(alias = "baseclass")]
    pub base_platform: P,
    /// Board identifier, matched case-insensitively (e.g. `5a-75b`).
    pub board: String,
    /// Board revision passed through to platform selection.
    pub revision: String,
    /// System clock frequency.
    #[serde(default = "default_sys_clk_freq")]
    pub sys_clk_freq: Frequency,
    /// Whether to attach a configuration hash to the SoC identification.
    #[serde(default = "default_true")]
    pub ident_version: bool,
    /// Ethernet PHY electrical parameters.
    #[serde(alias = "ethphy")]
    pub phy: PhyConfig,
    /// Bus-bridge (Etherbone) parameters.
    #[serde(alias = "etherbone")]
    pub bridge: BridgeConfig,
    /// Digital input channels, index 0 first.
    #[serde(default, alias = "gpio_in")]
    pub inputs: Vec<Channel>,
    /// Digital output channels, index 0 first.
    #[serde(default, alias = "gpio_out")]
    pub outputs: Vec<Channel>,
    /// PWM/PDM generator channels, index 0 first.
    #[serde(default, alias = "pwm")]
    pub pwm_channels: Vec<Channel>,
}

/// A board configuration whose base platform has not been resolved yet.
pub type UnresolvedBoardConfig = BoardConfig<String>;

fn default_sys_clk_freq() -> Frequency {
    DEFAULT_SYS_CLK_FREQ
}

fn default_true() -> bool {
    true
}

fn default_buffer_depth() -> u32 {
    DEFAULT_BUFFER_DEPTH
}

impl<P> BoardConfig<P> {
    /// Returns the channel list for `role`.
    pub fn channels(&self, role: ChannelRole) -> &[Channel] {
        match role {
            ChannelRole::Input => &self.inputs,
            ChannelRole::Output => &self.outputs,
            ChannelRole::Pwm => &self.pwm_channels,
        }
    }
}

/// The role a channel plays on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChannelRole {
    /// A digital input sampled into a status register.
    Input,
    /// A digital output driven from a storage register.
    Output,
    /// A PWM/PDM generator output.
    Pwm,
}

impl ChannelRole {
    /// All roles in composition order.
    pub const ALL: [ChannelRole; 3] = [ChannelRole::Input, ChannelRole::Output, ChannelRole::Pwm];

    /// Name of the configuration field listing channels of this role.
    pub fn field_name(self) -> &'static str {
        match self {
            ChannelRole::Input => "inputs",
            ChannelRole::Output => "outputs",
            ChannelRole::Pwm => "pwm_channels",
        }
    }

    /// Name of the platform resource that pads of this role are registered under.
    pub fn resource_name(self) -> &'static str {
        match self {
            ChannelRole::Input => "gpio_in",
            ChannelRole::Output => "gpio_out",
            ChannelRole::Pwm => "pwm",
        }
    }
}

impl fmt::Display for ChannelRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// One physical I/O channel: a pin, its electrical standard and an optional label.
///
/// Two channels are duplicates when pin and I/O standard match; the label does
/// not take part in that comparison (see [`Channel::same_pad`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Channel {
    /// Board-specific pin identifier (e.g. `"C4"`).
    pub pin: String,
    /// Electrical standard (e.g. `"LVCMOS33"`).
    pub io_standard: String,
    /// Optional human-readable label exported to the host driver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Channel {
    /// Creates an unlabeled channel.
    pub fn new(pin: impl Into<String>, io_standard: impl Into<String>) -> Self {
        Self {
            pin: pin.into(),
            io_standard: io_standard.into(),
            name: None,
        }
    }

    /// Attaches a label.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns `true` if both channels describe the same pad.
    pub fn same_pad(&self, other: &Channel) -> bool {
        self.pin == other.pin && self.io_standard == other.io_standard
    }
}

/// Ethernet PHY parameters. Every field is optional; absent fields are not
/// forwarded so that the PHY keeps its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PhyConfig {
    /// RGMII transmit clock delay in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_delay: Option<f64>,
    /// RGMII receive clock delay in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rx_delay: Option<f64>,
    /// Whether the PHY performs a hardware reset at start-up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_hw_init_reset: Option<bool>,
    /// Length of the hardware reset pulse in system clock cycles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hw_reset_cycles: Option<u32>,
}

/// A value of a PHY parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhyValue {
    /// A real number (delays).
    Real(f64),
    /// A flag.
    Flag(bool),
    /// A cycle count.
    Count(u32),
}

impl PhyConfig {
    /// Returns the parameters that are set, in declaration order.
    pub fn parameters(&self) -> Vec<(&'static str, PhyValue)> {
        let mut params = Vec::new();
        if let Some(v) = self.tx_delay {
            params.push(("tx_delay", PhyValue::Real(v)));
        }
        if let Some(v) = self.rx_delay {
            params.push(("rx_delay", PhyValue::Real(v)));
        }
        if let Some(v) = self.with_hw_init_reset {
            params.push(("with_hw_init_reset", PhyValue::Flag(v)));
        }
        if let Some(v) = self.hw_reset_cycles {
            params.push(("hw_reset_cycles", PhyValue::Count(v)));
        }
        params
    }
}

/// Bus-bridge parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BridgeConfig {
    /// Depth of the bridge's packet buffer.
    #[serde(default = "default_buffer_depth")]
    pub buffer_depth: u32,
    /// MAC address of the board.
    pub mac_address: MacAddress,
    /// IPv4 address of the board.
    pub ip_address: Ipv4Addr,
}

/// A 48-bit IEEE 802 MAC address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddress(u64);

/// Error returned for malformed MAC addresses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid MAC address: '{0}'")]
pub struct ParseMacAddressError(String);

impl MacAddress {
    /// Largest representable address.
    pub const MAX: u64 = (1 << 48) - 1;

    /// Creates an address from its integer value; `None` above 48 bits.
    pub fn new(value: u64) -> Option<Self> {
        (value <= Self::MAX).then_some(Self(value))
    }

    /// Returns the address as an integer, first octet most significant.
    pub fn value(self) -> u64 {
        self.0
    }

    /// Returns the six octets, first octet first.
    pub fn octets(self) -> [u8; 6] {
        let b = self.0.to_be_bytes();
        [b[2], b[3], b[4], b[5], b[6], b[7]]
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = self.octets();
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

impl fmt::Debug for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MacAddress({self})")
    }
}

/// Accepts `aa:bb:cc:dd:ee:ff` or `aa-bb-cc-dd-ee-ff`.
impl FromStr for MacAddress {
    type Err = ParseMacAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMacAddressError(s.to_string());
        let separator = if s.contains('-') { '-' } else { ':' };
        let octets: Vec<&str> = s.trim().split(separator).collect();
        if octets.len() != 6 {
            return Err(err());
        }
        let mut value = 0u64;
        for octet in octets {
            if octet.is_empty() || octet.len() > 2 {
                return Err(err());
            }
            let byte = u8::from_str_radix(octet, 16).map_err(|_| err())?;
            value = (value << 8) | u64::from(byte);
        }
        Ok(MacAddress(value))
    }
}

impl Serialize for MacAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Accepts either a 48-bit integer or a colon/hyphen separated string.
impl<'de> Deserialize<'de> for MacAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MacVisitor;

        impl Visitor<'_> for MacVisitor {
            type Value = MacAddress;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a 48-bit integer or a string such as \"10:e2:d5:00:00:00\"")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                MacAddress::new(v).ok_or_else(|| {
                    E::custom(format!("MAC address {v:#x} does not fit in 48 bits"))
                })
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                let v = u64::try_from(v)
                    .map_err(|_| E::custom(format!("MAC address must not be negative, got {v}")))?;
                self.visit_u64(v)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(MacVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mac_parse_and_display() {
        let mac: MacAddress = "10:E2:D5:00:00:01".parse().unwrap();
        assert_eq!(mac.value(), 0x10e2_d500_0001);
        assert_eq!(mac.to_string(), "10:e2:d5:00:00:01");
    }

    #[test]
    fn mac_parse_hyphenated() {
        let mac: MacAddress = "10-e2-d5-00-00-01".parse().unwrap();
        assert_eq!(mac.octets(), [0x10, 0xe2, 0xd5, 0x00, 0x00, 0x01]);
    }

    #[test]
    fn mac_parse_rejects_malformed() {
        for bad in ["10:e2:d5:00:00", "10:e2:d5:00:00:01:02", "10:e2:d5:00:00:zz", "100:e2:d5:00:00:01", ""] {
            assert!(bad.parse::<MacAddress>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn mac_new_rejects_wide_values() {
        assert!(MacAddress::new(MacAddress::MAX).is_some());
        assert!(MacAddress::new(MacAddress::MAX + 1).is_none());
    }

    #[derive(Deserialize)]
    struct Holder {
        mac: MacAddress,
    }

    #[test]
    fn mac_deserialize_integer_and_string() {
        let a: Holder = toml::from_str("mac = 0x10e2d5000000").unwrap();
        let b: Holder = toml::from_str("mac = \"10:e2:d5:00:00:00\"").unwrap();
        assert_eq!(a.mac, b.mac);
    }

    #[test]
    fn mac_deserialize_too_wide_fails() {
        assert!(toml::from_str::<Holder>("mac = 0x1000000000000").is_err());
    }

    #[test]
    fn phy_parameters_skip_absent_fields() {
        let phy = PhyConfig {
            tx_delay: None,
            rx_delay: Some(2e-9),
            with_hw_init_reset: Some(false),
            hw_reset_cycles: None,
        };
        assert_eq!(
            phy.parameters(),
            vec![
                ("rx_delay", PhyValue::Real(2e-9)),
                ("with_hw_init_reset", PhyValue::Flag(false)),
            ]
        );
        assert!(PhyConfig::default().parameters().is_empty());
    }

    #[test]
    fn channel_same_pad_ignores_label() {
        let a = Channel::new("A1", "LVCMOS33").named("spindle");
        let b = Channel::new("A1", "LVCMOS33");
        let c = Channel::new("A1", "LVCMOS25");
        assert!(a.same_pad(&b));
        assert!(!a.same_pad(&c));
    }

    #[test]
    fn role_names() {
        assert_eq!(ChannelRole::Input.resource_name(), "gpio_in");
        assert_eq!(ChannelRole::Output.field_name(), "outputs");
        assert_eq!(ChannelRole::Pwm.to_string(), "pwm_channels");
    }

    #[test]
    fn serialized_channel_omits_missing_label() {
        let json = serde_json::to_string(&Channel::new("B2", "LVCMOS33")).unwrap();
        assert_eq!(json, r#"{"pin":"B2","io_standard":"LVCMOS33"}"#);
    }
}
