//! The composition engine.
//!
//! [`compose`] expands a validated [`BoardConfig`] into a wired [`Design`] in a
//! fixed order: board selection, base bring-up, clock/reset, Ethernet, the
//! register block, the watchdog and finally the input, output and PWM
//! channels. Every output-class channel is gated by the watchdog's
//! `has_bitten` latch. The result is checked structurally and for the
//! interlock before it is returned; there is no partially composed result.

use crate::base::load_base_system;
use crate::builder::SocBuilder;
use crate::cores::crg::{add_crg, Crg};
use crate::cores::ethernet::{add_ethernet, Ethernet};
use crate::cores::mmio::{add_register_block, RegisterBlock};
use crate::cores::pwm::{add_pwm, PwmGenerator};
use crate::cores::watchdog::{add_watchdog, Watchdog, ENABLE_BIT, TIMEOUT_WIDTH};
use crate::error::ComposeError;
use crate::interlock::verify_interlock;
use cncsoc_common::ContentHash;
use cncsoc_config::{BaseSystemKind, BoardConfig, ChannelRole};
use cncsoc_ir::{ClockDomainId, Design, Direction, Expr, Identification, PadId, SignalId};
use cncsoc_platform::{load_platform, Board, Platform};

/// A fully wired SoC and the platform it was composed against.
#[derive(Debug)]
pub struct ComposedSoc {
    /// The hardware graph.
    pub design: Design,
    /// The platform with every pad and extension claimed.
    pub platform: Box<dyn Platform>,
    /// The base system it was brought up on.
    pub base: BaseSystemKind,
    /// The system clock domain.
    pub sys: ClockDomainId,
    /// Clock/reset generator.
    pub crg: Crg,
    /// Ethernet PHY and bus bridge.
    pub ethernet: Ethernet,
    /// Register handles.
    pub registers: RegisterBlock,
    /// The watchdog.
    pub watchdog: Watchdog,
    /// Input pads, in channel order.
    pub inputs: Vec<PadId>,
    /// Output pads, in channel order.
    pub outputs: Vec<PadId>,
    /// PWM generators, in channel order.
    pub pwm: Vec<PwmGenerator>,
}

impl ComposedSoc {
    /// Returns the board.
    pub fn board(&self) -> Board {
        self.platform.board()
    }

    /// Returns the signal of a pad.
    pub fn pad_signal(&self, pad: PadId) -> SignalId {
        self.design.pad(pad).signal
    }
}

/// Builds the identification of a SoC for `board`.
///
/// The version is a hash of the configuration with the board name in its
/// canonical spelling, so differently-cased board names identify alike.
pub fn identification(config: &BoardConfig, board: Board) -> Result<Identification, ComposeError> {
    let text = format!(
        "CNC interface {} rev {}",
        board.name().to_ascii_uppercase(),
        config.revision
    );
    let version = if config.ident_version {
        let mut normalized = config.clone();
        normalized.board = board.name().to_string();
        let bytes = serde_json::to_vec(&normalized)
            .map_err(|e| ComposeError::internal(format!("cannot hash configuration: {e}")))?;
        Some(ContentHash::from_bytes(&bytes))
    } else {
        None
    };
    Ok(Identification { text, version })
}

/// Composes the SoC described by `config`.
///
/// # Errors
///
/// [`ComposeError::UnsupportedBoard`] before anything is instantiated,
/// [`ComposeError::Platform`] when a channel pin collides with a pin already
/// claimed, and [`ComposeError::Internal`] if the result fails verification.
pub fn compose(config: &BoardConfig) -> Result<ComposedSoc, ComposeError> {
    let platform = load_platform(&config.board, &config.revision)?;
    let board = platform.board();
    tracing::debug!(%board, revision = %config.revision, "board selected");

    let ident = identification(config, board)?;
    let name = format!("cncsoc_{}", board.name().replace('-', "_"));
    let mut soc = SocBuilder::new(&name, platform, config.sys_clk_freq);

    let base = load_base_system(config.base_platform);
    let handles = base.bring_up(&mut soc, ident)?;
    tracing::debug!(base = %config.base_platform, "base system up");

    let crg = add_crg(&mut soc, handles.soft_reset)?;
    let ethernet = add_ethernet(&mut soc, &config.phy, &config.bridge, handles.bus)?;
    let registers = add_register_block(
        &mut soc,
        &config.inputs,
        &config.outputs,
        &config.pwm_channels,
    )?;

    let watchdog = add_watchdog(&mut soc);
    wire_watchdog(&mut soc, &registers, &watchdog);

    let inputs = wire_inputs(&mut soc, config, &registers)?;
    let outputs = wire_outputs(&mut soc, config, &registers, &watchdog)?;
    let pwm = wire_pwm(&mut soc, config, &registers, &watchdog)?;

    if inputs.is_empty() && outputs.is_empty() && pwm.is_empty() {
        tracing::warn!(%board, "configuration has no I/O channels");
    }

    let sys = soc.sys();
    let (design, platform) = soc.finish();
    let composed = ComposedSoc {
        design,
        platform,
        base: config.base_platform,
        sys,
        crg,
        ethernet,
        registers,
        watchdog,
        inputs,
        outputs,
        pwm,
    };
    verify(&composed)?;

    let stats = composed.design.stats();
    tracing::info!(
        %board,
        inputs = composed.inputs.len(),
        outputs = composed.outputs.len(),
        pwm = composed.pwm.len(),
        signals = stats.signals,
        registers = stats.csrs,
        "composed {}",
        composed.design.ident.text
    );
    Ok(composed)
}

fn verify(soc: &ComposedSoc) -> Result<(), ComposeError> {
    let findings: Vec<String> = soc
        .design
        .check()
        .iter()
        .map(ToString::to_string)
        .chain(verify_interlock(soc).iter().map(ToString::to_string))
        .collect();
    if findings.is_empty() {
        Ok(())
    } else {
        Err(ComposeError::internal(findings.join("; ")))
    }
}

/// `value & !has_bitten`.
fn gated(value: Expr, watchdog: &Watchdog) -> Expr {
    value & !Expr::signal(watchdog.has_bitten)
}

fn wire_watchdog(soc: &mut SocBuilder, registers: &RegisterBlock, watchdog: &Watchdog) {
    let control = registers.watchdog_data.storage;
    soc.comb(watchdog.timeout, Expr::slice(control, 0, TIMEOUT_WIDTH));
    soc.sync(watchdog.enable, Expr::bit(control, ENABLE_BIT));
    registers
        .watchdog_has_bitten
        .drive(soc, Expr::signal(watchdog.has_bitten));
    tracing::debug!("watchdog wired");
}

fn wire_inputs(
    soc: &mut SocBuilder,
    config: &BoardConfig,
    registers: &RegisterBlock,
) -> Result<Vec<PadId>, ComposeError> {
    let role = ChannelRole::Input;
    let pads = soc.extend_channels(role.resource_name(), config.channels(role), Direction::Input)?;
    if let Some(status) = &registers.gpio_in {
        let bits = pads.iter().map(|&pad| Expr::signal(soc.pad_signal(pad)));
        let value = Expr::cat(bits.collect::<Vec<_>>());
        status.drive(soc, value);
    }
    tracing::debug!(count = pads.len(), "inputs wired");
    Ok(pads)
}

fn wire_outputs(
    soc: &mut SocBuilder,
    config: &BoardConfig,
    registers: &RegisterBlock,
    watchdog: &Watchdog,
) -> Result<Vec<PadId>, ComposeError> {
    let role = ChannelRole::Output;
    let pads = soc.extend_channels(role.resource_name(), config.channels(role), Direction::Output)?;
    if let Some(storage) = &registers.gpio_out {
        for (i, &pad) in pads.iter().enumerate() {
            let target = soc.pad_signal(pad);
            soc.sync(target, gated(storage.bit(i as u32), watchdog));
        }
    }
    tracing::debug!(count = pads.len(), "outputs wired");
    Ok(pads)
}

fn wire_pwm(
    soc: &mut SocBuilder,
    config: &BoardConfig,
    registers: &RegisterBlock,
    watchdog: &Watchdog,
) -> Result<Vec<PwmGenerator>, ComposeError> {
    let role = ChannelRole::Pwm;
    let pads = soc.extend_channels(role.resource_name(), config.channels(role), Direction::Output)?;
    if pads.len() != registers.pwm.len() {
        return Err(ComposeError::internal(format!(
            "{} PWM pads but {} register sets",
            pads.len(),
            registers.pwm.len()
        )));
    }
    let mut generators = Vec::with_capacity(pads.len());
    for (i, (&pad, regs)) in pads.iter().zip(&registers.pwm).enumerate() {
        let generator = add_pwm(soc, i, pad);
        soc.sync(generator.enable, gated(regs.enable.value(), watchdog));
        soc.sync(generator.period, regs.period.value());
        soc.sync(generator.width, regs.width.value());
        generators.push(generator);
    }
    tracing::debug!(count = generators.len(), "pwm channels wired");
    Ok(generators)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cncsoc_config::load_config_from_str;
    use cncsoc_ir::{Driver, ParamValue};

    const MINIMAL: &str = r#"
        base_platform = "litex.soc.integration.soc_core.SoCMini"
        board = "5a-75b"
        revision = "7.0"

        [phy]
        tx_delay = 0.0

        [bridge]
        mac_address = "10:e2:d5:00:00:00"
        ip_address = "192.168.1.50"
    "#;

    fn config_with(extra: &str) -> BoardConfig {
        load_config_from_str(&format!("{MINIMAL}\n{extra}")).unwrap()
    }

    #[test]
    fn identification_text_and_version() {
        let config = config_with("");
        let ident = identification(&config, Board::Colorlight5A75B).unwrap();
        assert_eq!(ident.text, "CNC interface 5A-75B rev 7.0");
        assert!(ident.version.is_some());

        let mut upper = config.clone();
        upper.board = "5A-75B".into();
        assert_eq!(
            identification(&upper, Board::Colorlight5A75B).unwrap(),
            ident
        );

        let mut unversioned = config;
        unversioned.ident_version = false;
        assert_eq!(
            identification(&unversioned, Board::Colorlight5A75B)
                .unwrap()
                .version,
            None
        );
    }

    #[test]
    fn composes_without_channels() {
        let soc = compose(&config_with("")).unwrap();
        assert!(soc.inputs.is_empty());
        assert!(soc.outputs.is_empty());
        assert!(soc.pwm.is_empty());
        assert_eq!(soc.design.check(), vec![]);
        assert_eq!(soc.board(), Board::Colorlight5A75B);
    }

    #[test]
    fn watchdog_is_driven_from_control_register() {
        let soc = compose(&config_with("")).unwrap();
        let control = soc.registers.watchdog_data.storage;
        assert_eq!(
            soc.design.comb_value(soc.watchdog.timeout),
            Some(&Expr::slice(control, 0, 31))
        );
        let enable = soc.design.sync_value(soc.watchdog.enable).unwrap();
        assert_eq!(enable.value, Expr::bit(control, 31));
        assert_eq!(enable.domain, soc.sys);
        let status = soc.registers.watchdog_has_bitten;
        assert_eq!(
            soc.design.sync_value(status.status).map(|a| &a.value),
            Some(&Expr::signal(soc.watchdog.has_bitten))
        );
    }

    #[test]
    fn inputs_concatenate_in_channel_order() {
        let soc = compose(&config_with(
            r#"
            [[inputs]]
            pin = "C4"
            io_standard = "LVCMOS33"
            [[inputs]]
            pin = "D4"
            io_standard = "LVCMOS33"
            "#,
        ))
        .unwrap();
        let status = soc.registers.gpio_in.unwrap();
        let expected = Expr::cat(soc.inputs.iter().map(|&p| Expr::signal(soc.pad_signal(p))));
        assert_eq!(
            soc.design.sync_value(status.status).map(|a| &a.value),
            Some(&expected)
        );
        assert_eq!(soc.design.pad(soc.inputs[0]).pins, vec!["C4"]);
        assert_eq!(soc.design.pad(soc.inputs[1]).pins, vec!["D4"]);
    }

    #[test]
    fn outputs_are_gated_per_bit() {
        let soc = compose(&config_with(
            r#"
            [[outputs]]
            pin = "A1"
            io_standard = "LVCMOS33"
            [[outputs]]
            pin = "B1"
            io_standard = "LVCMOS33"
            "#,
        ))
        .unwrap();
        let storage = soc.registers.gpio_out.unwrap().storage;
        for (i, &pad) in soc.outputs.iter().enumerate() {
            let a = soc.design.sync_value(soc.pad_signal(pad)).unwrap();
            assert_eq!(
                a.value,
                Expr::bit(storage, i as u32) & !Expr::signal(soc.watchdog.has_bitten)
            );
        }
    }

    #[test]
    fn pwm_enable_is_gated_period_and_width_are_not() {
        let soc = compose(&config_with(
            r#"
            [[pwm_channels]]
            pin = "A1"
            io_standard = "LVCMOS33"
            "#,
        ))
        .unwrap();
        let regs = soc.registers.pwm[0];
        let generator = soc.pwm[0];
        let value = |s| soc.design.sync_value(s).map(|a| a.value.clone());
        assert_eq!(
            value(generator.enable),
            Some(Expr::signal(regs.enable.storage) & !Expr::signal(soc.watchdog.has_bitten))
        );
        assert_eq!(value(generator.period), Some(Expr::signal(regs.period.storage)));
        assert_eq!(value(generator.width), Some(Expr::signal(regs.width.storage)));
        assert_eq!(
            soc.design.drivers(soc.pad_signal(generator.pad)),
            vec![Driver::Instance {
                instance: generator.instance,
                port: "out".into()
            }]
        );
    }

    #[test]
    fn ethernet_parameters_follow_config() {
        let soc = compose(&config_with("")).unwrap();
        let phy = soc.design.instance(soc.ethernet.phy);
        assert_eq!(phy.params, vec![("tx_delay".to_string(), ParamValue::Real(0.0))]);
        let bridge = soc.design.instance(soc.ethernet.bridge);
        assert_eq!(
            bridge.param("ip_address"),
            Some(&ParamValue::Str("192.168.1.50".into()))
        );
    }

    #[test]
    fn soc_core_adds_serial() {
        let config = load_config_from_str(&MINIMAL.replace("SoCMini", "SoCCore")).unwrap();
        let soc = compose(&config).unwrap();
        assert_eq!(soc.base, BaseSystemKind::SocCore);
        assert!(soc.design.csrs.find("uart", "rxtx").is_some());
        assert_eq!(soc.design.check(), vec![]);
    }

    #[test]
    fn unknown_revision_is_a_platform_error() {
        let config = load_config_from_str(&MINIMAL.replace("7.0", "9.9")).unwrap();
        assert!(matches!(
            compose(&config),
            Err(ComposeError::Platform(_))
        ));
    }
}
