use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use checkpoint_sim::{Board, Frame, GoButton, KeyReport, Lights};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, DisableLineWrap, EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen},
};

/// The stretch of road shown on screen, in distance units.
const ROAD_LENGTH: f64 = 1500.0;

/// Columns taken by the scenario parameters left of the road.
const INFO_COLS: u16 = 26;

/// Columns taken by the light and counters right of the road.
const STATUS_COLS: u16 = 28;

/// Rows per scenario, including the spacer.
const SCENARIO_ROWS: u16 = 2;

const GREY: Color = Color::Rgb {
    r: 70,
    g: 70,
    b: 70,
};
const ROAD: Color = Color::Rgb {
    r: 40,
    g: 40,
    b: 40,
};

/// Exclusive use of the terminal. Restores it when dropped.
struct TerminalSession {
    out: Stdout,
    /// Whether key release reporting was switched on.
    enhanced: bool,
}

impl TerminalSession {
    fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut session = Self {
            out: io::stdout(),
            enhanced: false,
        };
        execute!(
            session.out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            terminal::Clear(terminal::ClearType::All)
        )?;
        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                session.out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            session.enhanced = true;
        }
        log::debug!("terminal reports key releases: {}", session.enhanced);
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if self.enhanced {
            let _ = execute!(self.out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(
            self.out,
            EnableLineWrap,
            cursor::Show,
            LeaveAlternateScreen,
            ResetColor
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Runs the interactive view until the user quits.
pub fn run(board: &mut Board) -> io::Result<()> {
    let mut session = TerminalSession::acquire()?;
    let mut button = GoButton::new(session.enhanced);
    draw(&mut session.out, board)?;

    loop {
        let timeout = board
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or(Duration::from_millis(100));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.code == KeyCode::Char(' ') => {
                    let report = match key.kind {
                        KeyEventKind::Press => KeyReport::Press,
                        KeyEventKind::Repeat => KeyReport::Repeat,
                        KeyEventKind::Release => KeyReport::Release,
                    };
                    if let Some(input) = button.report(report) {
                        board.broadcast(&input);
                        draw(&mut session.out, board)?;
                    }
                }
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(())
                    }
                    _ => {}
                },
                Event::Resize(..) => {
                    queue!(session.out, terminal::Clear(terminal::ClearType::All))?;
                    draw(&mut session.out, board)?;
                }
                _ => {}
            }
        }

        let stepped = board.step_due(Instant::now());
        if !stepped.is_empty() {
            if let Some(input) = button.on_tick() {
                board.broadcast(&input);
            }
            draw(&mut session.out, board)?;
        }
    }
}

/// Draws every scenario, one band of rows each.
fn draw(out: &mut Stdout, board: &Board) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let road_cols = cols.saturating_sub(INFO_COLS + STATUS_COLS);
    let frames = board.frames();
    if road_cols < 10 || rows < frames.len() as u16 * SCENARIO_ROWS + 1 {
        queue!(
            out,
            cursor::MoveTo(0, 0),
            ResetColor,
            Print("Terminal too small, enlarge the window.")
        )?;
        return out.flush();
    }

    for (idx, frame) in frames.iter().enumerate() {
        let row = idx as u16 * SCENARIO_ROWS;
        draw_info(out, row, frame)?;
        draw_road(out, row, road_cols, frame)?;
        draw_status(out, row, INFO_COLS + road_cols, frame)?;
    }

    queue!(
        out,
        cursor::MoveTo(0, rows - 1),
        ResetColor,
        SetForegroundColor(Color::White),
        Print("Hold Space to arm the signal, release to go. q quits."),
        ResetColor
    )?;
    out.flush()
}

fn draw_info(out: &mut Stdout, row: u16, frame: &Frame) -> io::Result<()> {
    let scenario = &frame.scenario;
    let text = format!(
        "gap {:<4} req {:<4} rt {:<3}",
        scenario.initial_gap, scenario.require_gap, scenario.reaction_delay
    );
    queue!(
        out,
        cursor::MoveTo(0, row),
        ResetColor,
        Print(format!("{:<width$}", text, width = INFO_COLS as usize))
    )
}

/// Draws the road with the checkpoint at its right-hand end.
fn draw_road(out: &mut Stdout, row: u16, road_cols: u16, frame: &Frame) -> io::Result<()> {
    let scale = road_cols as f64 / ROAD_LENGTH;
    let mut cells = vec![ROAD; road_cols as usize];
    for vehicle in &frame.vehicles {
        let (r, g, b) = vehicle.color.to_rgb();
        let from = road_cols as f64 - (vehicle.distance + vehicle.width) * scale;
        let to = road_cols as f64 - vehicle.distance * scale;
        let from = from.max(0.0).round() as usize;
        let to = to.min(road_cols as f64).round() as usize;
        for cell in cells.iter_mut().take(to).skip(from) {
            *cell = Color::Rgb { r, g, b };
        }
    }

    queue!(out, cursor::MoveTo(INFO_COLS, row))?;
    for color in cells {
        queue!(out, SetBackgroundColor(color), Print(' '))?;
    }
    queue!(out, ResetColor)
}

fn draw_status(out: &mut Stdout, row: u16, col: u16, frame: &Frame) -> io::Result<()> {
    let Lights { red, yellow, green } = frame.lights;
    queue!(out, cursor::MoveTo(col + 1, row))?;
    for (lit, color) in [(red, Color::Red), (yellow, Color::Yellow), (green, Color::Green)] {
        let color = if lit { color } else { GREY };
        queue!(out, SetForegroundColor(color), Print('●'))?;
    }
    queue!(
        out,
        ResetColor,
        Print(format!(
            " exited {:<3} ticks {:<6}",
            frame.exited, frame.tick
        ))
    )
}
