//! Production phase - buildings produce, colonists work, the colony consumes.

use hecs::{Entity, World};

use crate::components::{Building, Colonist, Name, ResourceError, ResourceLedger, ResourceType};

/// Per-turn upkeep rates.
pub const FOOD_PER_COLONIST: i64 = 3;
pub const OXYGEN_PER_COLONIST: i64 = 2;
pub const ENERGY_PER_BUILDING: i64 = 2;

/// What a production phase did, for the client to render.
#[derive(Debug, Clone)]
pub struct ProductionReport {
    /// Total delta credited to the ledger.
    pub produced: ResourceLedger,
    /// Upkeep the phase attempted to deduct.
    pub consumed: ResourceLedger,
    /// Production summaries of the operational buildings, in list order.
    pub building_lines: Vec<String>,
    /// Names of the colonists who worked this phase, in roster order.
    pub workers: Vec<String>,
    /// Set when the upkeep subtract failed; the deduction was then skipped
    /// entirely for this turn.
    pub shortfall: Option<ResourceError>,
}

/// Run one production phase in the fixed order: buildings (list order),
/// then colonists (roster order), then the upkeep deduction as a single
/// all-or-nothing subtract.
pub fn production_system(
    world: &mut World,
    buildings: &[Entity],
    roster: &[Entity],
    ledger: &mut ResourceLedger,
) -> ProductionReport {
    let mut produced = ResourceLedger::default();
    let mut building_lines = Vec::new();
    let mut workers = Vec::new();

    for &entity in buildings {
        if let Ok(building) = world.get::<&Building>(entity) {
            if building.operational {
                produced.add(&building.produce());
                building_lines.push(building.production_info());
            }
        }
    }

    for &entity in roster {
        let eligible = world
            .get::<&Colonist>(entity)
            .map(|c| c.can_work())
            .unwrap_or(false);
        if !eligible {
            continue;
        }

        let name = world
            .get::<&Name>(entity)
            .map(|n| n.full())
            .unwrap_or_default();
        let worked = match world.get::<&mut Colonist>(entity) {
            Ok(mut colonist) => colonist.work(),
            Err(_) => continue,
        };
        match worked {
            Ok(delta) => {
                produced.add(&delta);
                workers.push(name);
            }
            Err(err) => log::warn!("{} skipped work: {}", name, err),
        }
    }

    ledger.add(&produced);

    let consumed = ResourceLedger::default()
        .with(ResourceType::Food, roster.len() as i64 * FOOD_PER_COLONIST)
        .with(ResourceType::Oxygen, roster.len() as i64 * OXYGEN_PER_COLONIST)
        .with(ResourceType::Energy, buildings.len() as i64 * ENERGY_PER_BUILDING);

    let shortfall = ledger.subtract(&consumed).err();

    ProductionReport {
        produced,
        consumed,
        building_lines,
        workers,
        shortfall,
    }
}
