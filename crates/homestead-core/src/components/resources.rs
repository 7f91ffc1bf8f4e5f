//! Resource ledger - the colony's typed resource store.
//!
//! All resource mutation goes through the add/subtract contract. `subtract`
//! and `apply` are all-or-nothing: they either commit every entry of the
//! delta or leave the ledger completely unchanged.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The closed set of resource types the colony tracks.
///
/// Declaration order is the ledger's iteration order, which decides which
/// resource a failing `subtract` reports first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ResourceType {
    Food,
    Energy,
    Materials,
    Oxygen,
}

impl ResourceType {
    pub const ALL: [ResourceType; 4] = [
        ResourceType::Food,
        ResourceType::Energy,
        ResourceType::Materials,
        ResourceType::Oxygen,
    ];

    /// Canonical lowercase name, as written in save files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Food => "food",
            ResourceType::Energy => "energy",
            ResourceType::Materials => "materials",
            ResourceType::Oxygen => "oxygen",
        }
    }

    /// Parse a saved resource name back to its type.
    pub fn parse(name: &str) -> Result<Self, ResourceError> {
        match name {
            "food" => Ok(ResourceType::Food),
            "energy" => Ok(ResourceType::Energy),
            "materials" => Ok(ResourceType::Materials),
            "oxygen" => Ok(ResourceType::Oxygen),
            other => Err(ResourceError::UnknownType(other.to_string())),
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named-quantity store used both as the colony ledger and as the deltas
/// producers and events hand around.
///
/// `new()` seeds the colony opening balance; `Default` is the empty delta.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLedger {
    amounts: BTreeMap<ResourceType, i64>,
}

impl ResourceLedger {
    /// The colony's opening balance.
    pub fn new() -> Self {
        Self::default()
            .with(ResourceType::Food, 100)
            .with(ResourceType::Energy, 100)
            .with(ResourceType::Materials, 50)
            .with(ResourceType::Oxygen, 100)
    }

    pub fn with(mut self, resource: ResourceType, amount: i64) -> Self {
        self.amounts.insert(resource, amount);
        self
    }

    /// Current quantity; absent types read as 0.
    pub fn get(&self, resource: ResourceType) -> i64 {
        self.amounts.get(&resource).copied().unwrap_or(0)
    }

    /// Write a quantity, creating the entry if absent.
    pub fn set(&mut self, resource: ResourceType, amount: i64) {
        self.amounts.insert(resource, amount);
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceType, i64)> + '_ {
        self.amounts.iter().map(|(r, a)| (*r, *a))
    }

    /// Merge a signed delta into the ledger. Never fails; only `subtract`
    /// and `apply` enforce the non-negative floor.
    pub fn add(&mut self, delta: &ResourceLedger) {
        for (resource, amount) in delta.iter() {
            *self.amounts.entry(resource).or_insert(0) += amount;
        }
    }

    /// Remove `cost` from the ledger, all-or-nothing.
    ///
    /// If any resulting quantity would be negative, the first offending type
    /// (in iteration order) is reported and the ledger is left unchanged.
    pub fn subtract(&mut self, cost: &ResourceLedger) -> Result<(), ResourceError> {
        for (resource, amount) in cost.iter() {
            if self.get(resource) - amount < 0 {
                return Err(ResourceError::Insufficient(resource));
            }
        }
        for (resource, amount) in cost.iter() {
            *self.amounts.entry(resource).or_insert(0) -= amount;
        }
        Ok(())
    }

    /// Merge a signed delta with the non-negative floor enforced atomically.
    ///
    /// Used for event effects: a delta that would push any quantity negative
    /// leaves the ledger at its pre-call state.
    pub fn apply(&mut self, delta: &ResourceLedger) -> Result<(), ResourceError> {
        for (resource, amount) in delta.iter() {
            if self.get(resource) + amount < 0 {
                return Err(ResourceError::Insufficient(resource));
            }
        }
        self.add(delta);
        Ok(())
    }

    /// True iff `subtract(cost)` would succeed. Absent types count as 0.
    pub fn can_afford(&self, cost: &ResourceLedger) -> bool {
        cost.iter().all(|(resource, amount)| self.get(resource) >= amount)
    }
}

impl fmt::Display for ResourceLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (resource, amount) in self.iter() {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{}:{}", resource, amount)?;
            first = false;
        }
        Ok(())
    }
}

/// Errors raised by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// A subtract or apply would push this resource below zero.
    Insufficient(ResourceType),
    /// A resource name from external data matched no known type.
    UnknownType(String),
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::Insufficient(resource) => {
                write!(f, "insufficient {}", resource)
            }
            ResourceError::UnknownType(name) => {
                write!(f, "unknown resource type: {}", name)
            }
        }
    }
}

impl std::error::Error for ResourceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_balance() {
        let ledger = ResourceLedger::new();
        assert_eq!(ledger.get(ResourceType::Food), 100);
        assert_eq!(ledger.get(ResourceType::Energy), 100);
        assert_eq!(ledger.get(ResourceType::Materials), 50);
        assert_eq!(ledger.get(ResourceType::Oxygen), 100);
        assert!(ResourceLedger::default().is_empty());
    }

    #[test]
    fn test_subtract_is_all_or_nothing() {
        let ledger = ResourceLedger::new();
        let cost = ResourceLedger::default()
            .with(ResourceType::Food, 10)
            .with(ResourceType::Materials, 60);

        let mut after = ledger.clone();
        let err = after.subtract(&cost).unwrap_err();

        assert_eq!(err, ResourceError::Insufficient(ResourceType::Materials));
        // Nothing committed, not even the affordable food entry.
        assert_eq!(after, ledger);
    }

    #[test]
    fn test_subtract_reports_first_offender_in_iteration_order() {
        let mut ledger = ResourceLedger::default()
            .with(ResourceType::Food, 0)
            .with(ResourceType::Energy, 0);
        let cost = ResourceLedger::default()
            .with(ResourceType::Energy, 5)
            .with(ResourceType::Food, 5);

        // Both entries offend; Food precedes Energy in iteration order.
        assert_eq!(
            ledger.subtract(&cost),
            Err(ResourceError::Insufficient(ResourceType::Food))
        );
    }

    #[test]
    fn test_can_afford_matches_subtract() {
        let affordable = ResourceLedger::default().with(ResourceType::Materials, 50);
        let too_much = ResourceLedger::default().with(ResourceType::Materials, 51);
        let absent = ResourceLedger::default().with(ResourceType::Oxygen, 1);

        let ledger = ResourceLedger::default().with(ResourceType::Materials, 50);
        assert!(ledger.can_afford(&affordable));
        assert!(!ledger.can_afford(&too_much));
        assert!(!ledger.can_afford(&absent));

        assert!(ledger.clone().subtract(&affordable).is_ok());
        assert!(ledger.clone().subtract(&too_much).is_err());
        assert!(ledger.clone().subtract(&absent).is_err());
    }

    #[test]
    fn test_add_permits_negative_deltas() {
        let mut ledger = ResourceLedger::default().with(ResourceType::Energy, 10);
        ledger.add(&ResourceLedger::default().with(ResourceType::Energy, -25));
        assert_eq!(ledger.get(ResourceType::Energy), -15);
    }

    #[test]
    fn test_apply_enforces_floor_atomically() {
        let mut ledger = ResourceLedger::default()
            .with(ResourceType::Materials, 5)
            .with(ResourceType::Oxygen, 4);
        let delta = ResourceLedger::default()
            .with(ResourceType::Materials, 30)
            .with(ResourceType::Oxygen, -10);

        let before = ledger.clone();
        assert_eq!(
            ledger.apply(&delta),
            Err(ResourceError::Insufficient(ResourceType::Oxygen))
        );
        assert_eq!(ledger, before);

        ledger.set(ResourceType::Oxygen, 10);
        ledger.apply(&delta).unwrap();
        assert_eq!(ledger.get(ResourceType::Materials), 35);
        assert_eq!(ledger.get(ResourceType::Oxygen), 0);
    }

    #[test]
    fn test_resource_name_roundtrip() {
        for resource in ResourceType::ALL {
            assert_eq!(ResourceType::parse(resource.as_str()).unwrap(), resource);
        }
        assert!(matches!(
            ResourceType::parse("plutonium"),
            Err(ResourceError::UnknownType(_))
        ));
    }
}
