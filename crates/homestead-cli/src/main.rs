//! Stellar Homestead - interactive terminal client
//!
//! Drives the simulation engine through numeric menus with a fixed pacing
//! delay between turns.
//!
//! Usage:
//!   cargo run -p homestead-cli
//!   cargo run -p homestead-cli -- --seed 42 --fast
//!   cargo run -p homestead-cli -- --load

use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use homestead_core::config::GameConfig;
use homestead_core::prelude::*;

const SAVE_PATH: &str = "stellar_homestead_save.txt";
const CONFIG_PATH: &str = "config.txt";
const TURN_PACING: Duration = Duration::from_millis(1000);

struct Options {
    seed: Option<u64>,
    fast: bool,
    load: bool,
    config: PathBuf,
}

impl Options {
    fn parse() -> Self {
        let mut options = Self {
            seed: None,
            fast: false,
            load: false,
            config: PathBuf::from(CONFIG_PATH),
        };
        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => options.seed = args.next().and_then(|v| v.parse().ok()),
                "--fast" => options.fast = true,
                "--load" => options.load = true,
                "--config" => {
                    if let Some(path) = args.next() {
                        options.config = PathBuf::from(path);
                    }
                }
                other => eprintln!("unknown option: {}", other),
            }
        }
        options
    }
}

fn main() {
    env_logger::init();

    let options = Options::parse();
    let config = GameConfig::load(&options.config);

    println!("Welcome to Stellar Homestead!");
    println!("A space colony management simulation.");
    println!("Manage resources, build structures, and keep your colonists alive!");
    println!("Difficulty: {}", config.difficulty);

    let mut engine = match options.seed {
        Some(seed) => GameEngine::with_seed(config, seed),
        None => GameEngine::new(config),
    };

    if options.load {
        match File::open(SAVE_PATH).map_err(Into::into).and_then(|f| engine.load(f)) {
            Ok(()) => println!("Game loaded from {}.", SAVE_PATH),
            Err(err) => println!("Failed to load game: {} - starting fresh.", err),
        }
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("\nPress Enter to start the game...");
    let _ = read_line(&mut input);

    while engine.state.is_running() {
        render_status(&engine);

        let phase = engine.state.phase();
        let action = match phase {
            GamePhase::Setup => {
                println!("\n=== Setup Phase ===");
                println!("Colony initialization complete.");
                None
            }
            GamePhase::Production => {
                println!("\n=== Production Phase ===");
                None
            }
            GamePhase::Event => {
                println!("\n=== Event Phase ===");
                None
            }
            GamePhase::Management => prompt_management(&mut input, &engine),
            GamePhase::End => None,
        };

        let report = engine.step(action);
        render_report(&report);

        if phase == GamePhase::Management && engine.config.auto_save {
            autosave(&engine);
        }

        if !options.fast {
            std::thread::sleep(TURN_PACING);
        }
    }

    render_summary(&engine);
}

fn render_status(engine: &GameEngine) {
    println!("\n{}", "=".repeat(50));
    println!("STELLAR HOMESTEAD - Turn {}", engine.state.turn());
    println!("Phase: {}", engine.state.phase().label());
    println!("{}", "=".repeat(50));

    println!("Resources: {}", engine.ledger);

    println!("Buildings ({}):", engine.buildings().len());
    for line in engine.building_summaries() {
        println!("  {}", line);
    }

    println!("Colonists ({}):", engine.roster().len());
    for line in engine.colonist_summaries() {
        println!("  {}", line);
    }
}

fn render_report(report: &StepReport) {
    match report {
        StepReport::Setup | StepReport::End => {}
        StepReport::Production(report) => {
            for line in &report.building_lines {
                println!("{}", line);
            }
            for name in &report.workers {
                println!("{} worked and produced resources.", name);
            }
            match &report.shortfall {
                Some(err) => println!("Upkeep could not be met: {}", err),
                None => println!("Total production applied. Resource consumption deducted."),
            }
        }
        StepReport::Event(report) => match report.fired {
            Some(kind) => {
                println!("Event: {}", kind.name());
                println!("{}", kind.description());
                if let Some(err) = &report.shortfall {
                    println!("Event partially failed: {}", err);
                }
                if let Some(name) = &report.repaired_by {
                    println!("{} quickly repairs some damage!", name);
                }
            }
            None => println!("A peaceful turn. No events occurred."),
        },
        StepReport::Management(outcome) => {
            if let Some(outcome) = outcome {
                render_outcome(outcome);
            }
        }
    }
}

fn render_outcome(outcome: &ActionOutcome) {
    match outcome {
        ActionOutcome::Built(kind) => println!("Built {}!", kind.name()),
        ActionOutcome::RejectedBuild(kind) => {
            println!("Insufficient resources to build {}.", kind.name())
        }
        ActionOutcome::Assigned(name) => println!("{} has been assigned to work.", name),
        ActionOutcome::Upgraded(info) => println!("Upgrade complete: {}", info),
        ActionOutcome::InvalidSelection => println!("Invalid choice."),
        ActionOutcome::Rested => {
            println!("All colonists have rested and recovered health.")
        }
        ActionOutcome::Continued => println!("Continuing to next turn..."),
    }
}

fn render_summary(engine: &GameEngine) {
    println!("\nGame ended after {} turns.", engine.state.turn());
    if let Some(outcome) = engine.outcome() {
        println!("{}", outcome.message());
    }
    println!("Final colony status:");
    println!("Resources: {}", engine.ledger);
    println!("Thank you for playing Stellar Homestead!");
}

fn prompt_management(input: &mut impl BufRead, engine: &GameEngine) -> Option<ManagementAction> {
    println!("\n=== Management Phase ===");
    println!("1. Build Structure");
    println!("2. Assign Colonists");
    println!("3. Rest Colonists");
    println!("4. Save Game");
    println!("5. Continue to next turn");
    println!("6. Upgrade Building");
    prompt("Choose action: ");

    match read_number(input) {
        Some(1) => prompt_build(input),
        Some(2) => prompt_assign(input, engine),
        Some(3) => Some(ManagementAction::Rest),
        Some(4) => {
            save_game(engine);
            None
        }
        Some(6) => prompt_upgrade(input, engine),
        _ => Some(ManagementAction::Continue),
    }
}

fn prompt_build(input: &mut impl BufRead) -> Option<ManagementAction> {
    println!("Available structures:");
    for (index, kind) in BuildingKind::ALL.iter().enumerate() {
        println!("{}. {} (cost: {})", index + 1, kind.name(), kind.cost());
    }
    prompt("Choose structure: ");

    match read_number(input) {
        Some(choice @ 1..=4) => Some(ManagementAction::Build(BuildingKind::ALL[choice - 1])),
        _ => {
            println!("Invalid choice.");
            None
        }
    }
}

fn prompt_assign(input: &mut impl BufRead, engine: &GameEngine) -> Option<ManagementAction> {
    println!("Available colonists:");
    for (index, line) in engine.colonist_summaries().iter().enumerate() {
        println!("{}. {}", index + 1, line);
    }
    prompt("Select colonist to assign (0 to cancel): ");

    match read_number(input) {
        Some(choice) if choice >= 1 && choice <= engine.roster().len() => {
            Some(ManagementAction::Assign(choice - 1))
        }
        _ => None,
    }
}

fn prompt_upgrade(input: &mut impl BufRead, engine: &GameEngine) -> Option<ManagementAction> {
    println!("Buildings:");
    for (index, line) in engine.building_summaries().iter().enumerate() {
        println!("{}. {}", index + 1, line);
    }
    prompt("Select building to upgrade (0 to cancel): ");

    match read_number(input) {
        Some(choice) if choice >= 1 && choice <= engine.buildings().len() => {
            Some(ManagementAction::Upgrade(choice - 1))
        }
        _ => None,
    }
}

fn save_game(engine: &GameEngine) {
    let result = File::create(SAVE_PATH)
        .map_err(Into::into)
        .and_then(|file| engine.save(io::BufWriter::new(file)));
    match result {
        Ok(()) => println!("Game saved successfully!"),
        Err(err) => println!("Failed to save game: {}", err),
    }
}

fn autosave(engine: &GameEngine) {
    let result = File::create(SAVE_PATH)
        .map_err(Into::into)
        .and_then(|file| engine.save(io::BufWriter::new(file)));
    match result {
        Ok(()) => log::info!("auto-saved to {}", SAVE_PATH),
        Err(err) => log::warn!("auto-save failed: {}", err),
    }
}

fn prompt(text: &str) {
    print!("{}", text);
    let _ = io::stdout().flush();
}

fn read_line(input: &mut impl BufRead) -> Option<String> {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}

fn read_number(input: &mut impl BufRead) -> Option<usize> {
    read_line(input)?.trim().parse().ok()
}
