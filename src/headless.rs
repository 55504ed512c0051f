use std::error::Error;
use std::io::Write;

use checkpoint_sim::{Board, GoInput};
use itertools::Itertools;

/// Runs every scenario until it has completed `cycles` signal cycles.
///
/// The go control is tapped, pressed then released, whenever every light is red.
pub fn run(
    board: &mut Board,
    cycles: usize,
    json: bool,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    while !board.iter().all(|(_, sim)| sim.cycles() >= cycles) {
        if board.all_held() {
            board.broadcast(&GoInput::Press);
            board.broadcast(&GoInput::Release);
        }
        board.step_all();
        if json {
            for frame in board.frames() {
                serde_json::to_writer(&mut *out, &frame)?;
                writeln!(out)?;
            }
        }
    }

    if !json {
        writeln!(
            out,
            "{:>8} {:>8} {:>6} {:>6} {:>7}",
            "initial", "require", "delay", "ticks", "exited"
        )?;
        let rows = board
            .iter()
            .map(|(_, sim)| {
                let scenario = sim.scenario();
                format!(
                    "{:>8} {:>8} {:>6} {:>6} {:>7}",
                    scenario.initial_gap,
                    scenario.require_gap,
                    scenario.reaction_delay,
                    sim.tick(),
                    sim.exited_count()
                )
            })
            .join("\n");
        writeln!(out, "{}", rows)?;
    }
    out.flush()?;
    Ok(())
}
