//! Colonist components: specialization, work output, health and naming.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::resources::{ResourceLedger, ResourceType};

/// Work category determining a colonist's production formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Specialization {
    Engineer,
    Scientist,
    Farmer,
    Generalist,
}

impl Specialization {
    pub fn as_str(&self) -> &'static str {
        match self {
            Specialization::Engineer => "Engineer",
            Specialization::Scientist => "Scientist",
            Specialization::Farmer => "Farmer",
            Specialization::Generalist => "Generalist",
        }
    }

    /// Parse a saved specialization. Unrecognized names fall back to
    /// `Generalist`, matching the default branch of the work formula.
    pub fn parse(name: &str) -> Self {
        match name {
            "Engineer" => Specialization::Engineer,
            "Scientist" => Specialization::Scientist,
            "Farmer" => Specialization::Farmer,
            _ => Specialization::Generalist,
        }
    }
}

impl fmt::Display for Specialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A colony worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colonist {
    pub specialization: Specialization,
    /// Monotonic work counter; raises output at tier boundaries.
    pub experience: u32,
    /// 0-100.
    pub health: i32,
    pub assigned: bool,
}

impl Colonist {
    pub fn new(specialization: Specialization) -> Self {
        Self {
            specialization,
            experience: 0,
            health: 100,
            assigned: false,
        }
    }

    /// Eligibility for being asked to work during the production phase.
    ///
    /// Strictly greater than 50: a colonist at exactly 50 health is skipped
    /// by the caller rather than rejected inside `work()`. The gap against
    /// the `work()` floor of `< 50` is intentional.
    pub fn can_work(&self) -> bool {
        !self.assigned && self.health > 50
    }

    /// One shift of work: gains a point of experience and yields the
    /// specialization's delta. Experience is counted before the formula is
    /// evaluated, so tier bumps land one shift early.
    pub fn work(&mut self) -> Result<ResourceLedger, ColonistError> {
        if self.health < 50 {
            return Err(ColonistError::Unwell);
        }

        self.experience += 1;
        let exp = i64::from(self.experience);

        let output = match self.specialization {
            Specialization::Engineer => {
                ResourceLedger::default().with(ResourceType::Materials, 5 + exp / 10)
            }
            Specialization::Scientist => ResourceLedger::default()
                .with(ResourceType::Energy, 3 + exp / 15)
                .with(ResourceType::Oxygen, 2 + exp / 20),
            Specialization::Farmer => {
                ResourceLedger::default().with(ResourceType::Food, 8 + exp / 8)
            }
            Specialization::Generalist => ResourceLedger::default()
                .with(ResourceType::Materials, 2)
                .with(ResourceType::Food, 2),
        };

        Ok(output)
    }

    /// Recover health and come off assignment.
    pub fn rest(&mut self) {
        self.health = (self.health + 10).min(100);
        self.assigned = false;
    }

    /// Lose health, floored at 0. Reaching 0 is fatal; the roster removal
    /// itself is the engine's job.
    pub fn take_damage(&mut self, damage: i32) -> Result<(), ColonistError> {
        self.health = (self.health - damage).max(0);
        if self.health == 0 {
            return Err(ColonistError::Deceased);
        }
        Ok(())
    }
}

/// Errors raised by colonist operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColonistError {
    /// Work attempted below the health floor.
    Unwell,
    /// Health reached 0.
    Deceased,
}

impl fmt::Display for ColonistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColonistError::Unwell => f.write_str("too sick to work"),
            ColonistError::Deceased => f.write_str("has died"),
        }
    }
}

impl std::error::Error for ColonistError {}

/// Display name component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    pub given: String,
    pub family: String,
}

impl Name {
    pub fn new(given: impl Into<String>, family: impl Into<String>) -> Self {
        Self {
            given: given.into(),
            family: family.into(),
        }
    }

    /// Split a saved full name back into given + family parts.
    pub fn parse_full(full: &str) -> Self {
        let mut parts = full.split_whitespace();
        let given = parts.next().unwrap_or_default().to_string();
        let family = parts.collect::<Vec<_>>().join(" ");
        Self { given, family }
    }

    pub fn full(&self) -> String {
        if self.family.is_empty() {
            self.given.clone()
        } else {
            format!("{} {}", self.given, self.family)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_formulas_at_experience_tiers() {
        let mut engineer = Colonist::new(Specialization::Engineer);
        for shift in 1..=10 {
            let out = engineer.work().unwrap();
            let expected = if shift >= 10 { 6 } else { 5 };
            assert_eq!(out.get(ResourceType::Materials), expected, "shift {}", shift);
        }
        assert_eq!(engineer.experience, 10);

        let mut farmer = Colonist::new(Specialization::Farmer);
        for shift in 1..=8 {
            let out = farmer.work().unwrap();
            // Tier bump lands on the 8th shift: experience hits 8 before
            // the formula runs.
            let expected = if shift >= 8 { 9 } else { 8 };
            assert_eq!(out.get(ResourceType::Food), expected, "shift {}", shift);
        }

        let mut scientist = Colonist::new(Specialization::Scientist);
        let out = scientist.work().unwrap();
        assert_eq!(out.get(ResourceType::Energy), 3);
        assert_eq!(out.get(ResourceType::Oxygen), 2);

        let mut generalist = Colonist::new(Specialization::Generalist);
        let out = generalist.work().unwrap();
        assert_eq!(out.get(ResourceType::Materials), 2);
        assert_eq!(out.get(ResourceType::Food), 2);
        assert_eq!(generalist.experience, 1);
    }

    #[test]
    fn test_work_health_floor_and_eligibility_gap() {
        let mut colonist = Colonist::new(Specialization::Farmer);

        colonist.health = 49;
        assert_eq!(colonist.work(), Err(ColonistError::Unwell));
        assert_eq!(colonist.experience, 0);

        // Exactly 50: not eligible to be asked, but work() itself accepts.
        colonist.health = 50;
        assert!(!colonist.can_work());
        assert!(colonist.work().is_ok());

        colonist.health = 51;
        assert!(colonist.can_work());
        colonist.assigned = true;
        assert!(!colonist.can_work());
    }

    #[test]
    fn test_rest_recovers_and_unassigns() {
        let mut colonist = Colonist::new(Specialization::Scientist);
        colonist.health = 45;
        colonist.assigned = true;

        colonist.rest();
        assert_eq!(colonist.health, 55);
        assert!(!colonist.assigned);

        colonist.health = 95;
        colonist.rest();
        assert_eq!(colonist.health, 100);
    }

    #[test]
    fn test_damage_floors_at_zero_and_reports_death() {
        let mut colonist = Colonist::new(Specialization::Engineer);
        assert!(colonist.take_damage(30).is_ok());
        assert_eq!(colonist.health, 70);

        assert_eq!(colonist.take_damage(200), Err(ColonistError::Deceased));
        assert_eq!(colonist.health, 0);
    }

    #[test]
    fn test_unknown_specialization_defaults_to_generalist() {
        assert_eq!(Specialization::parse("Engineer"), Specialization::Engineer);
        assert_eq!(Specialization::parse("Botanist"), Specialization::Generalist);
    }

    #[test]
    fn test_name_full_roundtrip() {
        let name = Name::new("Maria", "Santos");
        assert_eq!(name.full(), "Maria Santos");
        assert_eq!(Name::parse_full("Maria Santos"), name);
        assert_eq!(Name::parse_full("Zed").full(), "Zed");
    }
}
