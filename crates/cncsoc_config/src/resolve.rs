//! Base-platform resolution: dotted references to compiled-in base systems.
//!
//! A configuration names its base platform with a dotted path such as
//! `litex.soc.integration.soc_core.SoCMini`. The first segment names a root
//! package and every following segment is looked up as an attribute of the
//! node reached so far. Only the closed set of [`BaseSystemKind`]s can be the
//! result, so resolution never loads anything at runtime.

use crate::error::ConfigError;
use serde::{Serialize, Serializer};
use std::fmt;

/// The base systems a configuration can be built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BaseSystemKind {
    /// Minimal SoC: control registers and the bus, no CPU peripherals.
    SocMini,
    /// Full SoC: control registers plus a UART and a timer.
    SocCore,
}

impl BaseSystemKind {
    /// Every base system in registry order.
    pub const ALL: [BaseSystemKind; 2] = [BaseSystemKind::SocMini, BaseSystemKind::SocCore];

    /// Returns the canonical dotted reference for this base system.
    pub fn reference(self) -> &'static str {
        match self {
            BaseSystemKind::SocMini => "litex.soc.integration.soc_core.SoCMini",
            BaseSystemKind::SocCore => "litex.soc.integration.soc_core.SoCCore",
        }
    }

    /// Returns the final segment of the reference.
    pub fn class_name(self) -> &'static str {
        match self {
            BaseSystemKind::SocMini => "SoCMini",
            BaseSystemKind::SocCore => "SoCCore",
        }
    }
}

impl fmt::Display for BaseSystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reference())
    }
}

impl Serialize for BaseSystemKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.reference())
    }
}

/// A node of the compiled-in namespace.
enum Node {
    Package(&'static [(&'static str, Node)]),
    BaseSystem(BaseSystemKind),
}

static NAMESPACE: &[(&str, Node)] = &[(
    "litex",
    Node::Package(&[(
        "soc",
        Node::Package(&[(
            "integration",
            Node::Package(&[
                (
                    "soc_core",
                    Node::Package(&[
                        ("SoCMini", Node::BaseSystem(BaseSystemKind::SocMini)),
                        ("SoCCore", Node::BaseSystem(BaseSystemKind::SocCore)),
                    ]),
                ),
                ("builder", Node::Package(&[])),
            ]),
        )]),
    )]),
)];

fn lookup<'a>(entries: &'a [(&'static str, Node)], name: &str) -> Option<&'a Node> {
    entries
        .iter()
        .find(|(entry, _)| *entry == name)
        .map(|(_, node)| node)
}

/// Resolves a dotted reference to a [`BaseSystemKind`].
///
/// Resolution is a pure function of `reference`: the same input always
/// yields the same kind or the same error.
pub fn resolve_base_platform(reference: &str) -> Result<BaseSystemKind, ConfigError> {
    let fail = |reason: String| ConfigError::UnresolvedPlatform {
        reference: reference.to_string(),
        reason,
    };

    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return Err(fail("empty reference".to_string()));
    }

    let mut segments = trimmed.split('.');
    let root = segments.next().unwrap_or_default();
    if root.is_empty() {
        return Err(fail("empty path segment".to_string()));
    }
    let mut node =
        lookup(NAMESPACE, root).ok_or_else(|| fail(format!("no module named '{root}'")))?;
    let mut path = root.to_string();

    for segment in segments {
        if segment.is_empty() {
            return Err(fail("empty path segment".to_string()));
        }
        node = match node {
            Node::Package(entries) => lookup(entries, segment)
                .ok_or_else(|| fail(format!("module '{path}' has no attribute '{segment}'")))?,
            Node::BaseSystem(kind) => {
                return Err(fail(format!(
                    "'{}' has no attribute '{segment}'",
                    kind.class_name()
                )))
            }
        };
        path.push('.');
        path.push_str(segment);
    }

    match node {
        Node::BaseSystem(kind) => {
            tracing::debug!(reference, kind = ?kind, "resolved base platform");
            Ok(*kind)
        }
        Node::Package(_) => Err(fail(format!("'{path}' is a module, not a base system"))),
    }
}
