//! Tests that drive whole checkpoint scenarios through the public API.

use assert_approx_eq::assert_approx_eq;
use checkpoint_sim::{Board, GoInput, Lights, Scenario, Simulation, StepOutcome, DEFAULT_SCENARIOS};
use std::time::{Duration, Instant};

/// Presses and releases the go control, then steps until the light turns red again.
fn run_cycle(sim: &mut Simulation) {
    sim.handle_input(&GoInput::Press);
    sim.handle_input(&GoInput::Release);
    while sim.step() != StepOutcome::CycleEnd {}
}

/// Runs a board in lockstep, tapping the go control whenever every light is red.
fn run_board(cycles: usize) -> Board {
    let period = Duration::from_millis(100);
    let mut board = Board::from_scenarios(&DEFAULT_SCENARIOS, period, Instant::now());
    while !board.iter().all(|(_, sim)| sim.cycles() >= cycles) {
        if board.all_held() {
            board.broadcast(&GoInput::Press);
            board.broadcast(&GoInput::Release);
        }
        board.step_all();
    }
    board
}

/// The second vehicle of a tight queue is blocked until the leader opens a gap.
#[test]
fn tight_queue_starts_blocked() {
    let mut sim = Simulation::new(Scenario::new(10.0, 50.0, 3));
    let vehicles = sim.platoon().vehicles();
    assert_approx_eq!(vehicles[0].distance(), 0.0);
    assert_approx_eq!(vehicles[1].distance(), 60.0);
    assert_approx_eq!(vehicles[1].gap_to(Some(&vehicles[0])), 10.0);

    sim.handle_input(&GoInput::Release);
    for _ in 0..13 {
        sim.step();
        let follower = &sim.platoon().vehicles()[1];
        assert_eq!(follower.reaction_delay(), 3);
        assert_approx_eq!(follower.distance(), 60.0);
        assert_approx_eq!(follower.speed(), 0.0);
    }
    sim.step();
    assert_eq!(sim.platoon().vehicles()[1].reaction_delay(), 2);
}

/// Over one cycle the lead vehicle reacts for 3 ticks and moves for 46.
#[test]
fn lead_vehicle_after_one_cycle() {
    let mut sim = Simulation::new(Scenario::new(10.0, 50.0, 3));
    run_cycle(&mut sim);
    let lead = &sim.platoon().vehicles()[0];
    assert_eq!(sim.tick(), 50);
    assert_approx_eq!(lead.distance(), -1035.0);
    assert_approx_eq!(lead.speed(), 46.0);
    assert_eq!(sim.exited_count(), 3);
}

/// Blocked vehicles are frozen, and moving vehicles gain exactly one unit of speed.
#[test]
fn per_tick_rules_hold_for_every_vehicle() {
    for scenario in DEFAULT_SCENARIOS {
        let mut sim = Simulation::new(scenario);
        sim.handle_input(&GoInput::Release);
        for _ in 0..49 {
            let before = sim.platoon().clone();
            let outcome = sim.step();
            assert!(matches!(outcome, StepOutcome::Advanced(_)));
            let after = sim.platoon().vehicles();
            for (idx, (old, new)) in before.vehicles().iter().zip(after).enumerate() {
                let ahead = idx.checked_sub(1).map(|i| &before.vehicles()[i]);
                if old.gap_to(ahead) < old.require_gap() {
                    assert_eq!(old, new);
                } else if old.reaction_delay() > 0 {
                    assert_eq!(new.reaction_delay(), old.reaction_delay() - 1);
                    assert_approx_eq!(new.distance(), old.distance());
                    assert_approx_eq!(new.speed(), old.speed());
                } else {
                    assert_approx_eq!(new.distance(), old.distance() - old.speed());
                    assert_approx_eq!(new.speed(), old.speed() + old.acceleration());
                }
                assert!(new.reaction_delay() <= old.reaction_delay());
            }
            let exited = after.iter().filter(|veh| veh.distance() < 0.0).count();
            assert_eq!(sim.exited_count(), exited);
        }
    }
}

/// The light warns yellow for the last running ticks and stops on the 50th.
#[test]
fn signal_schedule_repeats_every_cycle() {
    let mut sim = Simulation::new(Scenario::new(10.0, 50.0, 3));
    for cycle in 0..3 {
        sim.handle_input(&GoInput::Press);
        assert_eq!(sim.lights(), Lights::ARMED);
        assert_eq!(sim.step(), StepOutcome::Held);
        sim.handle_input(&GoInput::Release);
        for offset in 0..50 {
            let tick = cycle * 50 + offset;
            assert_eq!(sim.tick(), tick);
            let outcome = sim.step();
            match offset {
                0..=45 => assert_eq!(sim.lights(), Lights::GO),
                46..=48 => assert_eq!(sim.lights(), Lights::CLEARING),
                _ => {
                    assert_eq!(outcome, StepOutcome::CycleEnd);
                    assert_eq!(sim.lights(), Lights::STOP);
                }
            }
        }
        assert_eq!(sim.step(), StepOutcome::Held);
    }
}

/// Every scenario on a board advances in lockstep but diverges in throughput.
#[test]
fn board_scenarios_diverge() {
    let board = run_board(1);
    let exited: Vec<_> = board.iter().map(|(_, sim)| sim.exited_count()).collect();
    assert_eq!(exited, [3, 3, 3, 3, 4, 5]);
    assert!(board.iter().all(|(_, sim)| sim.tick() == 50));

    let board = run_board(3);
    let frames = board.frames();
    assert_eq!(frames[0].exited, 9);
    assert_eq!(frames[5].exited, 42);
    assert!(frames.iter().all(|frame| frame.lights == Lights::STOP));
}

/// Identical inputs at identical ticks produce identical trajectories.
#[test]
fn runs_are_deterministic() {
    let a = run_board(2).frames();
    let b = run_board(2).frames();
    assert_eq!(a, b);
}
