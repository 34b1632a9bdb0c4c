//! RGMII Ethernet PHY and the Etherbone bus bridge riding on it.

use crate::builder::SocBuilder;
use crate::error::ComposeError;
use cncsoc_config::{BridgeConfig, PhyConfig, PhyValue};
use cncsoc_ir::{Direction, InstanceId, PadId, ParamValue, SignalId};

/// Core name of the PHY.
pub const PHY_CORE: &str = "liteeth_phy_rgmii";

/// Core name of the bus bridge.
pub const BRIDGE_CORE: &str = "liteeth_etherbone";

/// Width of the PHY packet streams: 8 data bits, `valid` and `last`.
pub const STREAM_WIDTH: u32 = 10;

/// Width of the bridge's bus master port.
pub const BUS_WIDTH: u32 = 32;

const CLOCK_PADS: [(&str, Direction); 2] = [("tx", Direction::Output), ("rx", Direction::Input)];

const DATA_PADS: [(&str, Direction); 7] = [
    ("rst_n", Direction::Output),
    ("mdio", Direction::Inout),
    ("mdc", Direction::Output),
    ("rx_ctl", Direction::Input),
    ("rx_data", Direction::Input),
    ("tx_ctl", Direction::Output),
    ("tx_data", Direction::Output),
];

/// The network front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ethernet {
    /// PHY instance.
    pub phy: InstanceId,
    /// Bridge instance.
    pub bridge: InstanceId,
    /// Bus master driven by the bridge.
    pub bus_master: SignalId,
    /// Every pad of the interface, clocks first.
    pub pads: Vec<PadId>,
}

fn phy_param(value: PhyValue) -> ParamValue {
    match value {
        PhyValue::Real(v) => ParamValue::Real(v),
        PhyValue::Flag(v) => ParamValue::Bool(v),
        PhyValue::Count(v) => ParamValue::Int(i64::from(v)),
    }
}

/// Requests `eth_clocks:0` and `eth:0`, instantiates the PHY with every set
/// parameter of `phy` and attaches the bridge's master port to `bus`.
pub fn add_ethernet(
    soc: &mut SocBuilder,
    phy: &PhyConfig,
    bridge: &BridgeConfig,
    bus: InstanceId,
) -> Result<Ethernet, ComposeError> {
    let clocks = soc.request("eth_clocks", 0)?;
    let data = soc.request("eth", 0)?;

    let mut ports = Vec::with_capacity(CLOCK_PADS.len() + DATA_PADS.len());
    for (name, direction) in CLOCK_PADS {
        let pad = soc.import(&clocks, Some(name), direction)?;
        ports.push((format!("clocks_{name}"), direction, pad));
    }
    for (name, direction) in DATA_PADS {
        let pad = soc.import(&data, Some(name), direction)?;
        ports.push((name.to_string(), direction, pad));
    }

    let phy_inst = soc.add_core("ethphy", PHY_CORE);
    for (name, value) in phy.parameters() {
        soc.design_mut().set_param(phy_inst, name, phy_param(value));
    }
    for (port, direction, pad) in &ports {
        let signal = soc.pad_signal(*pad);
        let width = soc.design().signal(signal).width;
        soc.design_mut()
            .connect(phy_inst, port, *direction, width, signal);
    }

    let mac = i64::try_from(bridge.mac_address.value()).map_err(|_| {
        ComposeError::internal(format!("MAC address {} does not fit a parameter", bridge.mac_address))
    })?;
    let bridge_inst = soc.add_core("etherbone", BRIDGE_CORE);
    let d = soc.design_mut();
    d.set_param(bridge_inst, "buffer_depth", ParamValue::Int(i64::from(bridge.buffer_depth)));
    d.set_param(bridge_inst, "mac_address", ParamValue::Int(mac));
    d.set_param(bridge_inst, "ip_address", ParamValue::Str(bridge.ip_address.to_string()));

    let rx_stream = soc.port_signal("ethphy_source", STREAM_WIDTH, phy_inst);
    let tx_stream = soc.port_signal("etherbone_source", STREAM_WIDTH, bridge_inst);
    let bus_master = soc.port_signal("etherbone_bus", BUS_WIDTH, bridge_inst);
    let d = soc.design_mut();
    d.connect(phy_inst, "source", Direction::Output, STREAM_WIDTH, rx_stream);
    d.connect(phy_inst, "sink", Direction::Input, STREAM_WIDTH, tx_stream);
    d.connect(bridge_inst, "sink", Direction::Input, STREAM_WIDTH, rx_stream);
    d.connect(bridge_inst, "source", Direction::Output, STREAM_WIDTH, tx_stream);
    d.connect(bridge_inst, "bus", Direction::Output, BUS_WIDTH, bus_master);
    d.connect(bus, "master", Direction::Input, BUS_WIDTH, bus_master);

    tracing::debug!(
        mac = %bridge.mac_address,
        ip = %bridge.ip_address,
        buffer_depth = bridge.buffer_depth,
        phy_params = phy.parameters().len(),
        "ethernet front-end added"
    );
    Ok(Ethernet {
        phy: phy_inst,
        bridge: bridge_inst,
        bus_master,
        pads: ports.into_iter().map(|(_, _, pad)| pad).collect(),
    })
}
