//! The pin catalog: board resources, runtime extensions and pin ownership.

use crate::error::PlatformError;
use crate::resource::{IoResource, PadHandle};
use std::collections::{BTreeMap, BTreeSet};

/// Resources of one platform instance and the pins currently in use.
///
/// Pins are claimed when an extension is added and when a resource is
/// requested. A pin can only be claimed by one resource; claims are
/// all-or-nothing per resource.
#[derive(Debug, Clone, Default)]
pub struct PinCatalog {
    resources: Vec<IoResource>,
    requested: BTreeSet<(String, u32)>,
    claimed: BTreeMap<String, String>,
}

impl PinCatalog {
    /// Creates a catalog holding `resources`, none of them claimed.
    pub fn new(resources: Vec<IoResource>) -> Self {
        Self {
            resources,
            ..Self::default()
        }
    }

    /// All resources, board resources first, then extensions in insertion order.
    pub fn resources(&self) -> &[IoResource] {
        &self.resources
    }

    /// Looks up a resource.
    pub fn find(&self, name: &str, index: u32) -> Option<&IoResource> {
        self.resources
            .iter()
            .find(|r| r.name == name && r.index == index)
    }

    /// Returns the indices of all resources named `name`, ascending.
    pub fn indices(&self, name: &str) -> Vec<u32> {
        let mut indices: Vec<u32> = self
            .resources
            .iter()
            .filter(|r| r.name == name)
            .map(|r| r.index)
            .collect();
        indices.sort_unstable();
        indices
    }

    /// Returns the owner of `pin`, if claimed.
    pub fn owner_of(&self, pin: &str) -> Option<&str> {
        self.claimed.get(pin).map(String::as_str)
    }

    /// Iterates over `(pin, owner)` pairs in pin order.
    pub fn claimed_pins(&self) -> impl Iterator<Item = (&str, &str)> {
        self.claimed.iter().map(|(p, o)| (p.as_str(), o.as_str()))
    }

    /// Adds a resource at runtime and claims its pins.
    pub fn add_extension(&mut self, resource: IoResource) -> Result<(), PlatformError> {
        if self.find(&resource.name, resource.index).is_some() {
            return Err(PlatformError::DuplicateResource {
                name: resource.name,
                index: resource.index,
            });
        }
        self.claim(&resource)?;
        tracing::debug!(resource = %resource.owner(), "added platform extension");
        self.resources.push(resource);
        Ok(())
    }

    /// Hands out a resource. Each resource can be requested once.
    pub fn request(&mut self, name: &str, index: u32) -> Result<PadHandle, PlatformError> {
        let resource = self
            .find(name, index)
            .cloned()
            .ok_or_else(|| PlatformError::UnknownResource {
                name: name.to_string(),
                index,
            })?;
        if self.requested.contains(&(resource.name.clone(), index)) {
            return Err(PlatformError::AlreadyRequested {
                name: name.to_string(),
                index,
            });
        }
        self.claim(&resource)?;
        self.requested.insert((resource.name.clone(), index));
        tracing::debug!(resource = %resource.owner(), "requested platform resource");
        Ok(PadHandle::new(resource))
    }

    /// Requests every resource named `name`, ordered by index.
    ///
    /// Returns an empty list when there is none.
    pub fn request_all(&mut self, name: &str) -> Result<Vec<PadHandle>, PlatformError> {
        self.indices(name)
            .into_iter()
            .map(|index| self.request(name, index))
            .collect()
    }

    fn claim(&mut self, resource: &IoResource) -> Result<(), PlatformError> {
        let requester = resource.owner();
        for pin in resource.pins() {
            if let Some(owner) = self.claimed.get(pin) {
                if *owner != requester {
                    return Err(PlatformError::PinConflict {
                        pin: pin.to_string(),
                        owner: owner.clone(),
                        requester,
                    });
                }
            }
        }
        for pin in resource.pins() {
            self.claimed.insert(pin.to_string(), requester.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> PinCatalog {
        PinCatalog::new(vec![
            IoResource::single("clk25", 0, "P6", "LVCMOS33"),
            IoResource::single("user_led_n", 0, "T6", "LVCMOS33"),
            IoResource::new("serial", 0)
                .subsignal("tx", "T6", "LVCMOS33")
                .subsignal("rx", "R7", "LVCMOS33"),
        ])
    }

    #[test]
    fn request_claims_pins() {
        let mut c = catalog();
        let clk = c.request("clk25", 0).unwrap();
        assert_eq!(clk.name(), "clk25");
        assert_eq!(c.owner_of("P6"), Some("clk25:0"));
        assert_eq!(c.owner_of("T6"), None);
    }

    #[test]
    fn request_twice_fails() {
        let mut c = catalog();
        c.request("clk25", 0).unwrap();
        assert!(matches!(
            c.request("clk25", 0),
            Err(PlatformError::AlreadyRequested { .. })
        ));
    }

    #[test]
    fn unknown_resource() {
        let mut c = catalog();
        assert!(matches!(
            c.request("eth", 0),
            Err(PlatformError::UnknownResource { .. })
        ));
    }

    #[test]
    fn shared_board_pins_conflict_only_when_both_requested() {
        let mut c = catalog();
        c.request("serial", 0).unwrap();
        let err = c.request("user_led_n", 0).unwrap_err();
        assert_eq!(
            err,
            PlatformError::PinConflict {
                pin: "T6".into(),
                owner: "serial:0".into(),
                requester: "user_led_n:0".into(),
            }
        );
    }

    #[test]
    fn extension_on_claimed_pin_conflicts() {
        let mut c = catalog();
        c.request("clk25", 0).unwrap();
        let err = c
            .add_extension(IoResource::single("gpio_out", 0, "P6", "LVCMOS33"))
            .unwrap_err();
        assert!(matches!(err, PlatformError::PinConflict { ref owner, .. } if owner == "clk25:0"));
        assert!(c.find("gpio_out", 0).is_none());
    }

    #[test]
    fn extension_then_board_request_conflicts() {
        let mut c = catalog();
        c.add_extension(IoResource::single("gpio_in", 0, "R7", "LVCMOS33"))
            .unwrap();
        assert!(matches!(
            c.request("serial", 0),
            Err(PlatformError::PinConflict { .. })
        ));
        // Failed claims leave no partial ownership behind.
        assert_eq!(c.owner_of("T6"), None);
    }

    #[test]
    fn extension_can_be_requested_by_its_owner() {
        let mut c = catalog();
        c.add_extension(IoResource::single("gpio_out", 0, "A1", "LVCMOS33"))
            .unwrap();
        let pad = c.request("gpio_out", 0).unwrap();
        assert_eq!(pad.single().unwrap().pins, vec!["A1".to_string()]);
    }

    #[test]
    fn duplicate_extension_rejected() {
        let mut c = catalog();
        c.add_extension(IoResource::single("gpio_out", 0, "A1", "LVCMOS33"))
            .unwrap();
        assert!(matches!(
            c.add_extension(IoResource::single("gpio_out", 0, "A2", "LVCMOS33")),
            Err(PlatformError::DuplicateResource { .. })
        ));
    }

    #[test]
    fn request_all_orders_by_index() {
        let mut c = catalog();
        for (index, pin) in [(2, "C3"), (0, "C1"), (1, "C2")] {
            c.add_extension(IoResource::single("pwm", index, pin, "LVCMOS33"))
                .unwrap();
        }
        let pads = c.request_all("pwm").unwrap();
        let indices: Vec<u32> = pads.iter().map(PadHandle::index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn request_all_empty() {
        let mut c = catalog();
        assert!(c.request_all("gpio_in").unwrap().is_empty());
    }
}
