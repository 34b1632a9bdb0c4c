//! Serial console of the full base system.

use crate::builder::SocBuilder;
use crate::cores::hz;
use crate::csr::{StatusRegister, StorageRegister};
use crate::error::ComposeError;
use cncsoc_ir::{Direction, Expr, InstanceId, ParamValue};

/// Name of the register region.
pub const REGION: &str = "uart";

/// Core name of the UART.
pub const CORE: &str = "uart";

/// Default line rate.
pub const BAUDRATE: i64 = 115_200;

/// Adds a UART on the board's `serial:0` pads.
pub fn add_uart(soc: &mut SocBuilder) -> Result<InstanceId, ComposeError> {
    let serial = soc.request("serial", 0)?;
    let tx = soc.import(&serial, Some("tx"), Direction::Output)?;
    let rx = soc.import(&serial, Some("rx"), Direction::Input)?;

    let rxtx = StorageRegister::add(soc, REGION, "rxtx", 8)?;
    let txfull = StatusRegister::add(soc, REGION, "txfull", 1)?;
    let rxempty = StatusRegister::add(soc, REGION, "rxempty", 1)?;

    let instance = soc.add_core("uart", CORE);
    let txfull_port = soc.port_signal("uart_txfull", 1, instance);
    let rxempty_port = soc.port_signal("uart_rxempty", 1, instance);
    let (tx, rx) = (soc.pad_signal(tx), soc.pad_signal(rx));
    let sys_clk_freq = soc.sys_clk_freq();

    let d = soc.design_mut();
    d.set_param(instance, "clk_freq", hz(sys_clk_freq));
    d.set_param(instance, "baudrate", ParamValue::Int(BAUDRATE));
    d.connect(instance, "tx", Direction::Output, 1, tx);
    d.connect(instance, "rx", Direction::Input, 1, rx);
    d.connect(instance, "tx_data", Direction::Input, 8, rxtx.storage);
    d.connect(instance, "txfull", Direction::Output, 1, txfull_port);
    d.connect(instance, "rxempty", Direction::Output, 1, rxempty_port);

    txfull.drive(soc, Expr::signal(txfull_port));
    rxempty.drive(soc, Expr::signal(rxempty_port));
    Ok(instance)
}
