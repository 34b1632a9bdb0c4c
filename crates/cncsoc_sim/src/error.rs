//! Simulation error types.

/// Errors raised while setting up or running a simulation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    /// The design has more than one clock domain.
    #[error("expected a single clock domain, found {count}")]
    MultipleDomains {
        /// Number of domains in the design.
        count: usize,
    },

    /// No signal with this name exists.
    #[error("no signal named '{name}'")]
    UnknownSignal {
        /// The name looked up.
        name: String,
    },

    /// The signal is driven by an assignment and cannot be set from outside.
    #[error("signal '{signal}' is driven by the design and cannot be poked")]
    DrivenSignal {
        /// Signal name.
        signal: String,
    },

    /// A poked value does not fit the signal.
    #[error("value {value:#x} does not fit in the {width} bits of '{signal}'")]
    ValueTooWide {
        /// Signal name.
        signal: String,
        /// Signal width.
        width: u32,
        /// Rejected value.
        value: u64,
    },

    /// An expression could not be evaluated.
    #[error("evaluation error: {reason}")]
    EvalError {
        /// What went wrong.
        reason: String,
    },

    /// Combinational assignments did not settle.
    #[error("combinational logic did not settle after {iterations} passes")]
    CombinationalLoop {
        /// Number of passes made.
        iterations: usize,
    },
}
