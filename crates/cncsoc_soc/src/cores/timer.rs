//! General-purpose timer of the full base system.

use crate::builder::SocBuilder;
use crate::csr::{StatusRegister, StorageRegister};
use crate::error::ComposeError;
use cncsoc_ir::{Direction, Expr, InstanceId};

/// Name of the register region.
pub const REGION: &str = "timer0";

/// Core name of the timer.
pub const CORE: &str = "timer";

/// Adds `timer0` with load, reload, enable and a readable counter value.
pub fn add_timer(soc: &mut SocBuilder) -> Result<InstanceId, ComposeError> {
    let load = StorageRegister::add(soc, REGION, "load", 32)?;
    let reload = StorageRegister::add(soc, REGION, "reload", 32)?;
    let en = StorageRegister::add(soc, REGION, "en", 1)?;
    let value = StatusRegister::add(soc, REGION, "value", 32)?;

    let instance = soc.add_core("timer0", CORE);
    let counter = soc.port_signal("timer0_counter", 32, instance);
    let d = soc.design_mut();
    d.connect(instance, "load", Direction::Input, 32, load.storage);
    d.connect(instance, "reload", Direction::Input, 32, reload.storage);
    d.connect(instance, "en", Direction::Input, 1, en.storage);
    d.connect(instance, "value", Direction::Output, 32, counter);
    value.drive(soc, Expr::signal(counter));
    Ok(instance)
}
