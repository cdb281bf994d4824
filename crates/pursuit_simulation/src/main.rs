//! Headless партия с текстовым рендером
//!
//! Usage: pursuit_simulation [--seed N] [--config game.json] [--max-turns N] [--delay-ms N]
//! Уровень логов: --log-level или PURSUIT_LOG=debug|info|warning|error.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use pursuit_simulation::render::{render_board, render_status};
use pursuit_simulation::{log_error, set_log_level, GameConfig, LogLevel, Simulation};

#[derive(Debug, Parser)]
#[command(name = "pursuit_simulation", about = "Headless seeker/chaser pursuit on a grid")]
struct Args {
    /// Seed для выбора стратегии Chaser
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// JSON конфиг партии (по умолчанию стандартный сценарий 6×6)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Лимит ходов: ядро своего ограничения не имеет
    #[arg(long, default_value_t = 200)]
    max_turns: u32,

    /// Пауза между ходами, только для отображения
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Минимальный уровень логов
    #[arg(long, env = "PURSUIT_LOG", default_value = "info", value_parser = parse_log_level)]
    log_level: LogLevel,
}

fn parse_log_level(value: &str) -> Result<LogLevel, String> {
    LogLevel::parse(value).ok_or_else(|| format!("unknown log level '{}'", value))
}

fn main() {
    let args = Args::parse();
    set_log_level(args.log_level);

    let config = match &args.config {
        Some(path) => match GameConfig::from_json_file(path) {
            Ok(config) => config,
            Err(err) => {
                log_error(&format!("Failed to load config {}: {}", path.display(), err));
                std::process::exit(2);
            }
        },
        None => GameConfig::default(),
    };

    println!(
        "Starting pursuit simulation (seed: {}, max turns: {})",
        args.seed, args.max_turns
    );

    let mut simulation = match Simulation::new(&config, args.seed) {
        Ok(simulation) => simulation,
        Err(err) => {
            log_error(&format!("Invalid configuration: {}", err));
            std::process::exit(2);
        }
    };

    let initial = simulation.snapshot();
    println!("{}\n{}\n", render_status(&initial), render_board(&initial));

    let delay = args.delay_ms.map(Duration::from_millis);

    for _ in 0..args.max_turns {
        let report = simulation.step();

        let snapshot = simulation.snapshot();
        println!("{}\n{}\n", render_status(&snapshot), render_board(&snapshot));

        if let Some(report) = report {
            println!(
                "Simulation complete: {:?} after {} turns (final cost/steps: {:.1})",
                report.outcome, report.turn_count, report.final_cost_or_steps
            );
            if let Some(path) = report.seeker_path {
                let cells: Vec<String> = path.iter().map(ToString::to_string).collect();
                println!("Seeker path: {}", cells.join(" → "));
            }
            return;
        }

        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }
    }

    println!("Turn cap ({}) reached, simulation still ongoing", args.max_turns);
}
