//! Colorlight 5A-75B.

use super::{group, single, RevisionDef};

/// Known hardware revisions, oldest first.
pub(crate) static REVISIONS: &[RevisionDef] = &[
    RevisionDef {
        revision: "6.0",
        resources: &[
            single("clk25", 0, "P6"),
            single("user_led_n", 0, "P11"),
            single("user_btn_n", 0, "M13"),
            group("serial", 0, &[("tx", "P11"), ("rx", "M13")]),
            group("spiflash", 0, &[("cs_n", "N8"), ("mosi", "T8"), ("miso", "T7")]),
            group("eth_clocks", 0, &[("tx", "M2"), ("rx", "M1")]),
            group(
                "eth",
                0,
                &[
                    ("rst_n", "P5"),
                    ("mdio", "T2"),
                    ("mdc", "P3"),
                    ("rx_ctl", "N6"),
                    ("rx_data", "N1 M5 N5 M6"),
                    ("tx_ctl", "M3"),
                    ("tx_data", "L1 L3 P2 L4"),
                ],
            ),
            group("eth_clocks", 1, &[("tx", "M12"), ("rx", "M16")]),
            group(
                "eth",
                1,
                &[
                    ("rst_n", "P5"),
                    ("mdio", "T2"),
                    ("mdc", "P3"),
                    ("rx_ctl", "L15"),
                    ("rx_data", "P13 N13 P14 M15"),
                    ("tx_ctl", "R15"),
                    ("tx_data", "T14 R12 R13 R14"),
                ],
            ),
        ],
    },
    RevisionDef {
        revision: "6.1",
        resources: &[
            single("clk25", 0, "P6"),
            single("user_led_n", 0, "P11"),
            single("user_btn_n", 0, "M13"),
            group("serial", 0, &[("tx", "P11"), ("rx", "M13")]),
            group("spiflash", 0, &[("cs_n", "N8"), ("mosi", "T8"), ("miso", "T7")]),
            group("eth_clocks", 0, &[("tx", "M2"), ("rx", "M1")]),
            group(
                "eth",
                0,
                &[
                    ("rst_n", "P5"),
                    ("mdio", "T2"),
                    ("mdc", "P3"),
                    ("rx_ctl", "N6"),
                    ("rx_data", "N1 P1 M5 N5"),
                    ("tx_ctl", "M3"),
                    ("tx_data", "L1 L3 P2 L4"),
                ],
            ),
            group("eth_clocks", 1, &[("tx", "M12"), ("rx", "M16")]),
            group(
                "eth",
                1,
                &[
                    ("rst_n", "P5"),
                    ("mdio", "T2"),
                    ("mdc", "P3"),
                    ("rx_ctl", "L15"),
                    ("rx_data", "P13 N13 P14 M15"),
                    ("tx_ctl", "R15"),
                    ("tx_data", "T14 R12 R13 R14"),
                ],
            ),
        ],
    },
    RevisionDef {
        revision: "7.0",
        resources: &[
            single("clk25", 0, "P6"),
            single("user_led_n", 0, "T6"),
            single("user_btn_n", 0, "R7"),
            group("serial", 0, &[("tx", "T6"), ("rx", "R7")]),
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
    RevisionDef {
        revision: "8.0",
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
