//! Colorlight receiver cards repurposed as FPGA boards.
//!
//! Both cards carry a Lattice ECP5 `LFE5U-25F-6BG256C`, a 25 MHz oscillator
//! and two RGMII Gigabit PHYs. Pinouts differ between hardware revisions, so
//! every revision has its own resource table.

pub mod a75b;
pub mod a75e;

use crate::resource::{IoResource, IoSignal};

/// FPGA part fitted to every supported card.
pub const DEVICE: &str = "LFE5U-25F-6BG256C";

/// I/O standard of every pin on these cards.
pub const IO_STANDARD: &str = "LVCMOS33";

/// A resource row of a revision table.
pub(crate) struct ResourceDef {
    name: &'static str,
    index: u32,
    pins: PinsDef,
}

enum PinsDef {
    Single(&'static str),
    Subsignals(&'static [(&'static str, &'static str)]),
}

/// A resource made of plain pins.
pub(crate) const fn single(name: &'static str, index: u32, pins: &'static str) -> ResourceDef {
    ResourceDef {
        name,
        index,
        pins: PinsDef::Single(pins),
    }
}

/// A resource made of named subsignals.
pub(crate) const fn group(
    name: &'static str,
    index: u32,
    subsignals: &'static [(&'static str, &'static str)],
) -> ResourceDef {
    ResourceDef {
        name,
        index,
        pins: PinsDef::Subsignals(subsignals),
    }
}

/// The resource table of one hardware revision.
pub(crate) struct RevisionDef {
    pub revision: &'static str,
    pub resources: &'static [ResourceDef],
}

fn signal(name: Option<&str>, pins: &str) -> IoSignal {
    IoSignal {
        name: name.map(str::to_string),
        pins: pins.split_whitespace().map(str::to_string).collect(),
        io_standard: IO_STANDARD.to_string(),
    }
}

impl RevisionDef {
    pub(crate) fn instantiate(&self) -> Vec<IoResource> {
        self.resources
            .iter()
            .map(|def| IoResource {
                name: def.name.to_string(),
                index: def.index,
                signals: match def.pins {
                    PinsDef::Single(pins) => vec![signal(None, pins)],
                    PinsDef::Subsignals(subsignals) => subsignals
                        .iter()
                        .map(|(name, pins)| signal(Some(name), pins))
                        .collect(),
                },
            })
            .collect()
    }
}

pub(crate) fn find_revision<'a>(
    table: &'a [RevisionDef],
    revision: &str,
) -> Option<&'a RevisionDef> {
    let revision = revision.trim();
    table.iter().find(|r| r.revision == revision)
}

pub(crate) fn revision_list(table: &[RevisionDef]) -> String {
    table
        .iter()
        .map(|r| r.revision)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn all_tables() -> Vec<(&'static str, &'static [RevisionDef])> {
        vec![("5a-75b", a75b::REVISIONS), ("5a-75e", a75e::REVISIONS)]
    }

    #[test]
    fn every_revision_has_the_composition_resources() {
        for (board, table) in all_tables() {
            for rev in table {
                let resources = rev.instantiate();
                for (name, index) in [("clk25", 0), ("eth_clocks", 0), ("eth", 0), ("serial", 0)] {
                    assert!(
                        resources.iter().any(|r| r.name == name && r.index == index),
                        "{board} rev {} lacks {name}:{index}",
                        rev.revision
                    );
                }
            }
        }
    }

    #[test]
    fn no_pin_is_listed_twice_within_a_resource_group() {
        // Pins may only be shared between the debug LED/button and the serial port.
        let shared = ["serial", "user_led_n", "user_btn_n"];
        for (board, table) in all_tables() {
            for rev in table {
                let mut seen: BTreeMap<String, String> = BTreeMap::new();
                for resource in rev.instantiate() {
                    if shared.contains(&resource.name.as_str()) {
                        continue;
                    }
                    for pin in resource.pins() {
                        if let Some(prev) = seen.insert(pin.to_string(), resource.owner()) {
                            // The PHYs share their reset and management bus.
                            let mgmt = resource.name == "eth" && prev.starts_with("eth:");
                            assert!(
                                mgmt,
                                "{board} rev {}: pin {pin} in {} and {prev}",
                                rev.revision,
                                resource.owner()
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn eth_data_buses_are_four_bits() {
        let rev = find_revision(a75b::REVISIONS, "7.0").unwrap();
        let eth = rev
            .instantiate()
            .into_iter()
            .find(|r| r.name == "eth" && r.index == 0)
            .unwrap();
        for signal in &eth.signals {
            if let Some(name) = &signal.name {
                if name.ends_with("_data") {
                    assert_eq!(signal.width(), 4, "{name}");
                }
            }
        }
    }

    #[test]
    fn revision_lookup_trims() {
        assert!(find_revision(a75e::REVISIONS, " 7.1 ").is_some());
        assert!(find_revision(a75e::REVISIONS, "7.0").is_none());
    }
}
