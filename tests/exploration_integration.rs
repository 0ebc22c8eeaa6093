//! End-to-end exploration tests against the public API

use frontier_explore::core::config::{load_scenario, ScenarioConfig};
use frontier_explore::policy::{FixedGoals, NearestFrontier};
use frontier_explore::scheduler::{compare_policies, Episode, StopReason};
use frontier_explore::spatial::Grid;
use frontier_explore::*;

fn open_grids(size: usize) -> (Grid<CellState>, Grid<CellState>) {
    (Grid::filled(size, size, CellState::Free), Grid::new(size, size))
}

fn config(size: usize) -> SimConfig {
    SimConfig {
        size,
        ..SimConfig::default()
    }
}

#[test]
fn test_simple_room_layout_and_initial_frontiers() {
    let sim = Simulation::new(SimConfig {
        size: 10,
        obstacle_prob: 0.0,
        seed: 42,
        simple_room_mode: true,
        ..SimConfig::default()
    })
    .unwrap();

    // Dividing wall at x = 5 with the doorway on rows 4..=6
    for y in 1..9 {
        let expected = if (4..=6).contains(&y) {
            CellState::Free
        } else {
            CellState::Obstacle
        };
        assert_eq!(sim.truth().get(GridPos::new(5, y)), Some(expected), "row {}", y);
    }
    // No other interior obstacles
    for y in 1..9 {
        for x in (1..9).filter(|&x| x != 5) {
            assert_eq!(sim.truth().get(GridPos::new(x, y)), Some(CellState::Free));
        }
    }

    let frontiers = sim.frontiers();
    assert!(!frontiers.is_empty());
    for f in frontiers {
        assert_eq!(sim.knowledge().get(f), Some(CellState::Unknown));
        assert!(f.neighbors().iter().any(|&n| n.x < 2 && n.y < 2 && n.x >= 0 && n.y >= 0));
    }
}

#[test]
fn test_scan_at_goal() {
    let (truth, knowledge) = open_grids(10);
    let mut sim =
        Simulation::from_grids(config(10), truth, knowledge, &[GridPos::new(5, 5)]).unwrap();

    let outcome = sim.move_and_scan(0, GridPos::new(5, 5), 1.5);

    assert_eq!(outcome, StepOutcome::ScannedAtGoal);
    assert_eq!(sim.steps(), 1);
    assert_eq!(sim.elapsed(), 1.5);
    assert_eq!(sim.total_distance(), 0.0);
    assert_eq!(sim.robots()[0].position, GridPos::new(5, 5));
    assert_eq!(sim.known_cells(), 49);
}

#[test]
fn test_blocked_robot_scans_in_place() {
    let (mut truth, knowledge) = open_grids(8);
    truth.set(GridPos::new(3, 2), CellState::Obstacle);
    let mut sim =
        Simulation::from_grids(config(8), truth, knowledge, &[GridPos::new(2, 2)]).unwrap();

    // Goal is reachable around the obstacle but the only greedy move is blocked
    assert_eq!(sim.bfs_distance(GridPos::new(2, 2), GridPos::new(5, 2)), Some(5));
    let outcome = sim.move_and_scan(0, GridPos::new(5, 2), 0.75);

    assert_eq!(outcome, StepOutcome::Stuck);
    assert_eq!(sim.robots()[0].position, GridPos::new(2, 2));
    assert_eq!(sim.robots()[0].distance, 0);
    assert_eq!(sim.elapsed(), 0.75);
    assert_eq!(sim.steps(), 1);
    assert_eq!(sim.known_cells(), 25);
}

#[test]
fn test_sealed_robot_falls_back_to_own_cell() {
    let mut truth = Grid::filled(9, 9, CellState::Obstacle);
    truth.set(GridPos::new(4, 4), CellState::Free);
    let mut knowledge = Grid::new(9, 9);
    for pos in knowledge.window(GridPos::new(4, 4), 1).collect::<Vec<_>>() {
        knowledge.set(pos, truth.get(pos).unwrap());
    }
    let mut sim =
        Simulation::from_grids(config(9), truth, knowledge, &[GridPos::new(4, 4)]).unwrap();

    assert!(sim.frontiers().is_empty());
    for kind in PolicyKind::ALL {
        let goals = kind.build(&PolicyParams::default()).select_goals(&sim);
        assert_eq!(goals, vec![GridPos::new(4, 4)], "{}", kind);
    }

    let outcome = sim.move_and_scan(0, GridPos::new(4, 4), 1.5);
    assert_eq!(outcome, StepOutcome::ScannedAtGoal);
    assert_eq!(sim.steps(), 1);
    assert_eq!(sim.elapsed(), 1.5);
    assert_eq!(sim.known_cells(), 49);
}

#[test]
fn test_unreachable_goal_changes_nothing() {
    let (mut truth, knowledge) = open_grids(8);
    for y in 0..8 {
        truth.set(GridPos::new(4, y), CellState::Obstacle);
    }
    let mut sim =
        Simulation::from_grids(config(8), truth, knowledge, &[GridPos::new(1, 1)]).unwrap();

    let outcome = sim.move_and_scan(0, GridPos::new(6, 6), 2.0);

    assert_eq!(outcome, StepOutcome::Unreachable);
    assert!(!outcome.advanced());
    assert_eq!(sim.steps(), 0);
    assert_eq!(sim.elapsed(), 0.0);
    assert_eq!(sim.known_cells(), 0);
}

#[test]
fn test_every_policy_runs_an_episode() {
    let scenario = ScenarioConfig {
        sim: SimConfig {
            size: 20,
            robot_count: 2,
            max_steps: 300,
            seed: 11,
            ..SimConfig::default()
        },
        ..ScenarioConfig::default()
    };

    for kind in PolicyKind::ALL {
        let mut sim = Simulation::new(scenario.sim.clone()).unwrap();
        let start = sim.coverage();
        let mut episode = Episode::from_scenario(kind, &scenario);

        let report = episode.run(&mut sim);

        assert_eq!(report.policy, kind.as_str());
        assert!(report.metrics.coverage > start, "{} made no progress", kind);
        assert!(report.metrics.coverage <= 1.0);
        assert!(report.ticks <= 300);
        for robot in sim.robots() {
            assert_eq!(sim.truth().get(robot.position), Some(CellState::Free));
        }
    }
}

#[test]
fn test_fixed_goal_list_drives_the_engine() {
    let (truth, knowledge) = open_grids(10);
    let mut sim =
        Simulation::from_grids(config(10), truth, knowledge, &[GridPos::new(1, 1)]).unwrap();
    let target = GridPos::new(6, 3);
    let mut episode = Episode::new(
        Box::new(FixedGoals::new(vec![target])),
        ScanConfig::fixed(0.0),
        100,
    );

    for _ in 0..7 {
        episode.tick(&mut sim);
    }

    assert_eq!(sim.robots()[0].position, target);
    assert_eq!(sim.robots()[0].distance, 7);
    assert_eq!(sim.elapsed(), 7.0);
}

#[test]
fn test_episodes_are_deterministic() {
    let scenario = ScenarioConfig {
        sim: SimConfig {
            size: 18,
            obstacle_prob: 0.2,
            robot_count: 2,
            max_steps: 200,
            seed: 99,
            ..SimConfig::default()
        },
        ..ScenarioConfig::default()
    };

    let run = || {
        let mut sim = Simulation::new(scenario.sim.clone()).unwrap();
        let mut episode = Episode::from_scenario(PolicyKind::HysteresisWeighted, &scenario);
        let report = episode.run(&mut sim);
        (report, sim.snapshot())
    };

    assert_eq!(run(), run());
}

#[test]
fn test_clones_share_one_random_stream() {
    let sim = Simulation::new(config(12)).unwrap();
    let twin = sim.clone();

    assert!(sim.rng().shares_stream_with(twin.rng()));
    let a = sim.rng().next_f64();
    let b = twin.rng().next_f64();

    let fresh = Simulation::new(config(12)).unwrap();
    let first = fresh.rng().next_f64();
    let second = fresh.rng().next_f64();
    assert_eq!((a, b), (first, second));
}

#[test]
fn test_comparison_reports_both_policies() {
    let scenario = ScenarioConfig {
        sim: SimConfig {
            size: 16,
            max_steps: 150,
            ..SimConfig::default()
        },
        ..ScenarioConfig::default()
    };
    let sim = Simulation::new(scenario.sim.clone()).unwrap();

    let mut nearest = Episode::from_scenario(PolicyKind::NearestFrontier, &scenario);
    let mut ratio = Episode::from_scenario(PolicyKind::InfoGainRatio, &scenario);
    let report = compare_policies(&sim, &mut nearest, &mut ratio);

    assert_eq!(report.seed, 42);
    assert_eq!(report.baseline.policy, "nearest");
    assert_eq!(report.challenger.policy, "ratio");
    let json = serde_json::to_value(&report).unwrap();
    assert!(json["baseline"]["metrics"]["coverage"].is_number());
}

#[test]
fn test_bundled_scenarios_load_and_build() {
    for name in ["default", "simple_room", "hazards"] {
        let scenario = load_scenario(name).unwrap();
        let sim = Simulation::new(scenario.sim.clone()).unwrap();
        assert_eq!(sim.robots().len(), scenario.sim.robot_count, "{}", name);
    }

    let hazards = load_scenario("hazards").unwrap();
    let sim = Simulation::new(hazards.sim).unwrap();
    assert_eq!(sim.hazards().len(), 4);
}

#[test]
fn test_sealed_room_episode_stalls() {
    let mut truth = Grid::filled(9, 9, CellState::Obstacle);
    truth.set(GridPos::new(4, 4), CellState::Free);
    let mut sim = Simulation::from_grids(
        SimConfig {
            target_coverage: 1.0,
            ..config(9)
        },
        truth,
        Grid::new(9, 9),
        &[GridPos::new(4, 4)],
    )
    .unwrap();
    let mut episode = Episode::new(Box::new(NearestFrontier), ScanConfig::fixed(1.0), 5);

    let report = episode.run(&mut sim);

    // First tick reveals the 7x7 window, then nothing new
    assert_eq!(report.stop_reason, StopReason::Stalled);
    assert_eq!(report.ticks, 6);
}
