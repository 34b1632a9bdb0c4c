//! Colorlight 5A-75E.

use super::{group, single, RevisionDef};

/// Known hardware revisions, oldest first.
pub(crate) static REVISIONS: &[RevisionDef] = &[
    RevisionDef {
        revision: "6.0",
        resources: &[
            single("clk25", 0, "P6"),
            single("user_led_n", 0, "T6"),
            single("user_btn_n", 0, "R7"),
            group("serial", 0, &[("tx", "T6"), ("rx", "R7")]),
            group("spiflash", 0, &[("cs_n", "N8"), ("mosi", "T8"), ("miso", "T7")]),
            group("eth_clocks", 0, &[("tx", "M2"), ("rx", "M1")]),
            group(
                "eth",
                0,
                &[
                    ("rst_n", "P4"),
                    ("mdio", "P5"),
                    ("mdc", "N5"),
                    ("rx_ctl", "N6"),
                    ("rx_data", "N1 P1 P2 N4"),
                    ("tx_ctl", "M3"),
                    ("tx_data", "L1 L3 L4 M4"),
                ],
            ),
            group("eth_clocks", 1, &[("tx", "J16"), ("rx", "L16")]),
            group(
                "eth",
                1,
                &[
                    ("rst_n", "P4"),
                    ("mdio", "P5"),
                    ("mdc", "N5"),
                    ("rx_ctl", "K14"),
                    ("rx_data", "J15 J14 K15 K16"),
                    ("tx_ctl", "M15"),
                    ("tx_data", "L15 M16 N16 P16"),
                ],
            ),
        ],
    },
    RevisionDef {
        revision: "7.1",
        resources: &[
            single("clk25", 0, "P6"),
            single("user_led_n", 0, "P11"),
            single("user_btn_n", 0, "M13"),
            group("serial", 0, &[("tx", "P11"), ("rx", "M13")]),
            group("spiflash", 0, &[("cs_n", "N8"), ("mosi", "T8"), ("miso", "T7")]),
            group("eth_clocks", 0, &[("tx", "L1"), ("rx", "J1")]),
            group(
                "eth",
                0,
                &[
                    ("rst_n", "R6"),
                    ("mdio", "T4"),
                    ("mdc", "R5"),
                    ("rx_ctl", "J3"),
                    ("rx_data", "K2 J2 K1 K3"),
                    ("tx_ctl", "M3"),
                    ("tx_data", "L2 L3 M2 M1"),
                ],
            ),
            group("eth_clocks", 1, &[("tx", "J16"), ("rx", "M16")]),
            group(
                "eth",
                1,
                &[
                    ("rst_n", "R6"),
                    ("mdio", "T4"),
                    ("mdc", "R5"),
                    ("rx_ctl", "P16"),
                    ("rx_data", "M15 R16 L15 L16"),
                    ("tx_ctl", "K14"),
                    ("tx_data", "K16 J15 J14 K15"),
                ],
            ),
        ],
    },
];
