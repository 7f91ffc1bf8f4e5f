//! Save/Load functionality for persisting the colony as plain-text records.
//!
//! Record layout, one section per line group:
//!   game state: `phase turn colonist_count running`
//!   ledger:     `count`, then `name amount` per resource
//!   buildings:  `count`, then `name level operational` per building
//!   colonists:  `count`, then `name specialization experience health assigned`
//!
//! Names may contain spaces, so records are parsed right-anchored: the
//! trailing numeric fields are split off the end of the line and whatever
//! remains is the name. Buildings and colonists are reconstructed through
//! the name-to-variant factories on their kinds.

use hecs::{Entity, World};
use std::io::{BufRead, BufReader, Read, Write};
use std::str::FromStr;

use crate::components::{
    Building, BuildingKind, Colonist, Name, ResourceLedger, ResourceType, Specialization,
};
use crate::state::{GamePhase, GameState};

/// Write the colony to a save writer.
pub fn save_game<W: Write>(
    mut writer: W,
    state: &GameState,
    ledger: &ResourceLedger,
    world: &World,
    buildings: &[Entity],
    roster: &[Entity],
) -> Result<(), SaveError> {
    writeln!(
        writer,
        "{} {} {} {}",
        state.phase().index(),
        state.turn(),
        state.colonist_count(),
        u8::from(state.is_running())
    )?;

    writeln!(writer, "{}", ledger.len())?;
    for (resource, amount) in ledger.iter() {
        writeln!(writer, "{} {}", resource, amount)?;
    }

    writeln!(writer, "{}", buildings.len())?;
    for &entity in buildings {
        if let Ok(building) = world.get::<&Building>(entity) {
            writeln!(
                writer,
                "{} {} {}",
                building.kind.name(),
                building.level,
                u8::from(building.operational)
            )?;
        }
    }

    writeln!(writer, "{}", roster.len())?;
    for &entity in roster {
        let name = world
            .get::<&Name>(entity)
            .map(|n| n.full())
            .unwrap_or_default();
        if let Ok(colonist) = world.get::<&Colonist>(entity) {
            writeln!(
                writer,
                "{} {} {} {} {}",
                name,
                colonist.specialization,
                colonist.experience,
                colonist.health,
                u8::from(colonist.assigned)
            )?;
        }
    }

    Ok(())
}

/// Result of loading a save.
pub struct LoadedGame {
    pub state: GameState,
    pub ledger: ResourceLedger,
    pub buildings: Vec<Building>,
    pub colonists: Vec<(Name, Colonist)>,
}

/// Parse a save back into typed entities.
pub fn load_game<R: Read>(reader: R) -> Result<LoadedGame, SaveError> {
    let mut lines = BufReader::new(reader).lines();
    let mut next_line = move || -> Result<String, SaveError> {
        match lines.next() {
            Some(line) => Ok(line?),
            None => Err(SaveError::Parse("unexpected end of save".to_string())),
        }
    };

    // Game-state scalars
    let header = next_line()?;
    let fields: Vec<&str> = header.split_whitespace().collect();
    if fields.len() != 4 {
        return Err(SaveError::Parse(format!("malformed state record: {}", header)));
    }
    let phase_index: u8 = parse_field(fields[0], "phase")?;
    let phase = GamePhase::from_index(phase_index)
        .ok_or_else(|| SaveError::Parse(format!("no phase with index {}", phase_index)))?;
    let turn = parse_field(fields[1], "turn")?;
    let colonist_count = parse_field(fields[2], "colonist count")?;
    let running = parse_bool(fields[3])?;
    let state = GameState::from_save(phase, turn, colonist_count, running);

    // Ledger
    let mut ledger = ResourceLedger::default();
    let count: usize = parse_field(&next_line()?, "resource count")?;
    for _ in 0..count {
        let line = next_line()?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 2 {
            return Err(SaveError::Parse(format!("malformed resource record: {}", line)));
        }
        let resource = ResourceType::parse(fields[0])
            .map_err(|_| SaveError::UnknownResource(fields[0].to_string()))?;
        ledger.set(resource, parse_field(fields[1], "resource amount")?);
    }

    // Buildings, reconstructed through the kind factory
    let mut buildings = Vec::new();
    let count: usize = parse_field(&next_line()?, "building count")?;
    for _ in 0..count {
        let line = next_line()?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            return Err(SaveError::Parse(format!("malformed building record: {}", line)));
        }
        let (name_fields, tail) = fields.split_at(fields.len() - 2);
        let name = name_fields.join(" ");
        let kind = BuildingKind::parse(&name).ok_or(SaveError::UnknownBuilding(name))?;
        let level = parse_field(tail[0], "building level")?;
        let operational = parse_bool(tail[1])?;
        buildings.push(Building::from_save(kind, level, operational));
    }

    // Colonists
    let mut colonists = Vec::new();
    let count: usize = parse_field(&next_line()?, "colonist count")?;
    for _ in 0..count {
        let line = next_line()?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 5 {
            return Err(SaveError::Parse(format!("malformed colonist record: {}", line)));
        }
        let (name_fields, tail) = fields.split_at(fields.len() - 4);
        let name = Name::parse_full(&name_fields.join(" "));
        let mut colonist = Colonist::new(Specialization::parse(tail[0]));
        colonist.experience = parse_field(tail[1], "experience")?;
        colonist.health = parse_field(tail[2], "health")?;
        colonist.assigned = parse_bool(tail[3])?;
        colonists.push((name, colonist));
    }

    Ok(LoadedGame {
        state,
        ledger,
        buildings,
        colonists,
    })
}

fn parse_field<T: FromStr>(token: &str, what: &str) -> Result<T, SaveError> {
    token
        .trim()
        .parse()
        .map_err(|_| SaveError::Parse(format!("invalid {}: {}", what, token)))
}

fn parse_bool(token: &str) -> Result<bool, SaveError> {
    match token {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        other => Err(SaveError::Parse(format!("invalid flag: {}", other))),
    }
}

/// Errors that can occur during save/load.
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Parse(String),
    UnknownResource(String),
    UnknownBuilding(String),
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Parse(msg) => write!(f, "malformed save: {}", msg),
            SaveError::UnknownResource(name) => {
                write!(f, "save names unknown resource: {}", name)
            }
            SaveError::UnknownBuilding(name) => {
                write!(f, "save names unknown building: {}", name)
            }
        }
    }
}

impl std::error::Error for SaveError {}
