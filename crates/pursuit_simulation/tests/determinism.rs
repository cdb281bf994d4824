//! Тесты детерминизма
//!
//! Проверяем что партия с одинаковым seed даёт идентичные snapshot на каждом ходу

use pursuit_simulation::{GameConfig, Position, Simulation};

fn open_field_config() -> GameConfig {
    GameConfig {
        size: 8,
        obstacles: vec![
            Position::new(1, 1),
            Position::new(1, 2),
            Position::new(3, 3),
            Position::new(4, 1),
            Position::new(6, 6),
        ],
        seeker_start: Position::new(0, 0),
        chaser_start: Position::new(7, 0),
        goal: Position::new(7, 7),
        pickup: Position::new(4, 3),
        depth_limit: 6.0,
        ..Default::default()
    }
}

/// Прогоняет партию и возвращает JSON snapshot каждого хода (включая начальный)
fn run_simulation(config: &GameConfig, seed: u64, max_turns: u32) -> Vec<String> {
    let mut simulation = Simulation::new(config, seed).expect("valid config");
    let mut snapshots = vec![simulation.snapshot().to_json().unwrap()];

    for _ in 0..max_turns {
        let report = simulation.step();
        snapshots.push(simulation.snapshot().to_json().unwrap());
        if report.is_some() {
            break;
        }
    }

    snapshots
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;
    let config = open_field_config();

    let first = run_simulation(&config, SEED, 100);
    let second = run_simulation(&config, SEED, 100);

    assert_eq!(
        first, second,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;
    let config = GameConfig::default();

    let runs: Vec<_> = (0..5).map(|_| run_simulation(&config, SEED, 200)).collect();

    for (i, run) in runs.iter().enumerate().skip(1) {
        assert_eq!(
            runs[0], *run,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}

#[test]
fn test_same_seed_same_report() {
    let config = open_field_config();

    for seed in [0, 7, 99, 2024] {
        let mut a = Simulation::new(&config, seed).unwrap();
        let mut b = Simulation::new(&config, seed).unwrap();

        assert_eq!(a.run(100), b.run(100), "seed {}", seed);
        assert_eq!(a.turn(), b.turn());
    }
}
