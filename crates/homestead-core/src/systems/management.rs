//! Management phase - the operator's actions between turns.

use hecs::{Entity, World};

use crate::components::{Building, BuildingKind, Colonist, Name, ResourceLedger};

/// An operator decision for the management phase. The interactive client
/// translates menu selections into these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagementAction {
    Build(BuildingKind),
    /// Assign the colonist at this roster index to work duty.
    Assign(usize),
    /// Upgrade the building at this list index.
    Upgrade(usize),
    /// Rest the whole roster.
    Rest,
    Continue,
}

/// Typed result of a management action, for the client to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Built(BuildingKind),
    /// Construction refused: the colony cannot afford the cost.
    RejectedBuild(BuildingKind),
    Assigned(String),
    /// Post-upgrade production summary.
    Upgraded(String),
    InvalidSelection,
    Rested,
    Continued,
}

/// Apply one management action to the colony.
pub fn management_system(
    world: &mut World,
    buildings: &mut Vec<Entity>,
    roster: &[Entity],
    ledger: &mut ResourceLedger,
    action: ManagementAction,
) -> ActionOutcome {
    match action {
        ManagementAction::Build(kind) => {
            let cost = kind.cost();
            if !ledger.can_afford(&cost) || ledger.subtract(&cost).is_err() {
                return ActionOutcome::RejectedBuild(kind);
            }
            let entity = world.spawn((Building::new(kind),));
            buildings.push(entity);
            log::info!("built {}", kind.name());
            ActionOutcome::Built(kind)
        }
        ManagementAction::Assign(index) => {
            let Some(&entity) = roster.get(index) else {
                return ActionOutcome::InvalidSelection;
            };
            if let Ok(mut colonist) = world.get::<&mut Colonist>(entity) {
                colonist.assigned = true;
            }
            let name = world
                .get::<&Name>(entity)
                .map(|n| n.full())
                .unwrap_or_default();
            ActionOutcome::Assigned(name)
        }
        ManagementAction::Upgrade(index) => {
            let Some(&entity) = buildings.get(index) else {
                return ActionOutcome::InvalidSelection;
            };
            match world.get::<&mut Building>(entity) {
                Ok(mut building) => {
                    building.upgrade();
                    ActionOutcome::Upgraded(building.production_info())
                }
                Err(_) => ActionOutcome::InvalidSelection,
            }
        }
        ManagementAction::Rest => {
            for (_, colonist) in world.query_mut::<&mut Colonist>() {
                colonist.rest();
            }
            ActionOutcome::Rested
        }
        ManagementAction::Continue => ActionOutcome::Continued,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ResourceType, Specialization};

    #[test]
    fn test_build_is_gated_on_affordability() {
        let mut world = World::new();
        let mut buildings = Vec::new();
        let mut ledger = ResourceLedger::default()
            .with(ResourceType::Materials, 25)
            .with(ResourceType::Energy, 5);

        let outcome = management_system(
            &mut world,
            &mut buildings,
            &[],
            &mut ledger,
            ManagementAction::Build(BuildingKind::SolarPanel),
        );
        assert_eq!(outcome, ActionOutcome::Built(BuildingKind::SolarPanel));
        assert_eq!(buildings.len(), 1);
        assert_eq!(ledger.get(ResourceType::Materials), 5);

        // Greenhouse needs materials 30 + energy 10; neither remains.
        let outcome = management_system(
            &mut world,
            &mut buildings,
            &[],
            &mut ledger,
            ManagementAction::Build(BuildingKind::Greenhouse),
        );
        assert_eq!(outcome, ActionOutcome::RejectedBuild(BuildingKind::Greenhouse));
        assert_eq!(buildings.len(), 1);
        assert_eq!(ledger.get(ResourceType::Materials), 5);
        assert_eq!(ledger.get(ResourceType::Energy), 5);
    }

    #[test]
    fn test_assign_and_rest_roundtrip() {
        let mut world = World::new();
        let colonist = world.spawn((
            Name::new("Maria", "Santos"),
            Colonist::new(Specialization::Scientist),
        ));
        let roster = vec![colonist];
        let mut buildings = Vec::new();
        let mut ledger = ResourceLedger::new();

        let outcome = management_system(
            &mut world,
            &mut buildings,
            &roster,
            &mut ledger,
            ManagementAction::Assign(0),
        );
        assert_eq!(outcome, ActionOutcome::Assigned("Maria Santos".to_string()));
        assert!(world.get::<&Colonist>(colonist).unwrap().assigned);

        let outcome = management_system(
            &mut world,
            &mut buildings,
            &roster,
            &mut ledger,
            ManagementAction::Rest,
        );
        assert_eq!(outcome, ActionOutcome::Rested);
        assert!(!world.get::<&Colonist>(colonist).unwrap().assigned);

        let outcome = management_system(
            &mut world,
            &mut buildings,
            &roster,
            &mut ledger,
            ManagementAction::Assign(3),
        );
        assert_eq!(outcome, ActionOutcome::InvalidSelection);
    }

    #[test]
    fn test_upgrade_by_list_index() {
        let mut world = World::new();
        let entity = world.spawn((Building::new(BuildingKind::OxygenGenerator),));
        let mut buildings = vec![entity];
        let mut ledger = ResourceLedger::new();

        let outcome = management_system(
            &mut world,
            &mut buildings,
            &[],
            &mut ledger,
            ManagementAction::Upgrade(0),
        );
        assert_eq!(
            outcome,
            ActionOutcome::Upgraded("Oxygen Generator Level 2 produces 20 oxygen".to_string())
        );
        assert_eq!(world.get::<&Building>(entity).unwrap().level, 2);
    }
}
