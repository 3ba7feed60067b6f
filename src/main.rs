use std::io::{self, Stdout, Write};
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};
use pacman_heuristics::{Dir, Game, GameConfig, GhostMode, Pos, Snapshot};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use unicode_width::UnicodeWidthStr;

const CELL_W: usize = 2;
const GHOST_COLORS: [Color; 4] = [Color::Red, Color::DarkYellow, Color::Cyan, Color::Magenta];
const KEY_HELP: &str = "Arrows/hjkl: move  D: difficulty  M: maze  R: reset  Space: restart  Q: quit";

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player,
    Ghost,
    Frightened,
    Wall,
    Empty,
    Pellet,
    Power,
}

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    last_message: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    fn new(width: usize, height: usize) -> Self {
        Self {
            last: vec![
                Cell {
                    glyph: Glyph::Empty,
                    color: Color::Reset,
                };
                width * height
            ],
            last_hud: String::new(),
            last_message: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }
}

enum Command {
    Quit,
    Move(Dir),
    ToggleDifficulty,
    NextMaze,
    ResetLevel,
    Restart,
}

fn main() -> Result<()> {
    let config = GameConfig::from_env().context("invalid configuration")?;
    let _guard = init_logging(&config)?;

    let seed = config.seed.unwrap_or_else(clock_seed);
    tracing::info!(seed, difficulty = %config.difficulty, "starting session");
    let mut game = Game::seeded(config.difficulty, seed);

    let mut stdout = io::stdout();
    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &mut game, &config);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    if let Err(err) = &result {
        tracing::error!(error = %err, "terminal loop failed");
    }
    tracing::info!(score = game.player().score(), level = game.level(), "session ended");
    result.map_err(Into::into)
}

/// File logging only; the terminal belongs to the renderer.
fn init_logging(config: &GameConfig) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("failed to create log dir {}", config.log_dir.display()))?;
    let file_appender = tracing_appender::rolling::never(&config.log_dir, "pacman.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;
    Ok(guard)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn run(stdout: &mut Stdout, game: &mut Game, config: &GameConfig) -> io::Result<()> {
    let maze = game.maze();
    let mut renderer = Renderer::new(maze.width(), maze.height());
    let tick_time = Duration::from_millis(config.tick_ms);
    let frame_time = Duration::from_micros(1_000_000 / config.render_fps.max(1));
    let mut splash = config.splash_ticks;
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    continue;
                }
                match command_for(key.code) {
                    Some(Command::Quit) => return Ok(()),
                    Some(Command::Move(dir)) => game.set_intent(dir),
                    Some(Command::ToggleDifficulty) => game.toggle_difficulty(),
                    Some(Command::NextMaze) => game.next_maze(),
                    Some(Command::ResetLevel) => game.reset_level(),
                    Some(Command::Restart) => game.restart(),
                    None => {}
                }
            }
        }

        if last_tick.elapsed() >= tick_time {
            last_tick = Instant::now();
            if splash > 0 {
                splash -= 1;
            } else {
                game.tick();
            }
        }
        render(stdout, &game.snapshot(), &mut renderer)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn command_for(code: KeyCode) -> Option<Command> {
    let cmd = match code {
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        KeyCode::Up | KeyCode::Char('k') => Command::Move(Dir::Up),
        KeyCode::Down | KeyCode::Char('j') => Command::Move(Dir::Down),
        KeyCode::Left | KeyCode::Char('h') => Command::Move(Dir::Left),
        KeyCode::Right | KeyCode::Char('l') => Command::Move(Dir::Right),
        KeyCode::Char('d') => Command::ToggleDifficulty,
        KeyCode::Char('m') => Command::NextMaze,
        KeyCode::Char('r') => Command::ResetLevel,
        KeyCode::Char(' ') => Command::Restart,
        _ => return None,
    };
    Some(cmd)
}

fn render(stdout: &mut Stdout, snap: &Snapshot<'_>, renderer: &mut Renderer) -> io::Result<()> {
    let width = snap.maze.width();
    let height = snap.maze.height();
    let needed_h = (height + 3) as u16;
    let needed_w = (width * CELL_W).max(KEY_HELP.len()) as u16;

    stdout.queue(MoveTo(0, 0))?;

    let (term_w, term_h) = terminal::size()?;
    if term_w < needed_w || term_h < needed_h {
        stdout.queue(Clear(ClearType::All))?;
        let msg = format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            needed_w, needed_h, term_w, term_h
        );
        stdout.queue(Print(msg))?;
        stdout.flush()?;
        renderer.needs_full = true;
        return Ok(());
    }

    let origin_x = (term_w - needed_w) / 2;
    let origin_y = (term_h - needed_h) / 2 + 1;
    if origin_x != renderer.origin_x || origin_y != renderer.origin_y {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        renderer.needs_full = true;
    }

    let hud = format!(
        "Score: {}  Lives: {}  Level: {}  Difficulty: {}  Power: {}",
        snap.player.score(),
        snap.player.lives(),
        snap.level,
        snap.difficulty,
        snap.player.power_ticks()
    );
    if renderer.needs_full || hud != renderer.last_hud {
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y - 1))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        renderer.last_hud = hud;
    }

    for y in 0..height {
        for x in 0..width {
            let cell = cell_for(snap, Pos::new(x as i32, y as i32));
            let idx = y * width + x;
            if renderer.needs_full || cell != renderer.last[idx] {
                renderer.last[idx] = cell;
                draw_cell(stdout, renderer, x, y, cell)?;
            }
        }
    }

    let message = snap.message.unwrap_or_default();
    if renderer.needs_full || message != renderer.last_message {
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y + height as u16))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        let color = if snap.game_over { Color::Red } else { Color::Yellow };
        stdout.queue(SetForegroundColor(color))?;
        stdout.queue(Print(message))?;
        stdout.queue(ResetColor)?;
        renderer.last_message = message.to_string();
    }
    if renderer.needs_full {
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y + height as u16 + 1))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(SetForegroundColor(Color::DarkGrey))?;
        stdout.queue(Print(KEY_HELP))?;
        stdout.queue(ResetColor)?;
    }
    renderer.needs_full = false;

    stdout.flush()?;
    Ok(())
}

fn cell_for(snap: &Snapshot<'_>, pos: Pos) -> Cell {
    if pos == snap.player.pos() {
        return Cell {
            glyph: Glyph::Player,
            color: Color::Yellow,
        };
    }
    if let Some(ghost) = snap.ghosts.iter().find(|g| g.is_alive() && g.pos() == pos) {
        if ghost.mode() == GhostMode::Frightened {
            return Cell {
                glyph: Glyph::Frightened,
                color: Color::Blue,
            };
        }
        return Cell {
            glyph: Glyph::Ghost,
            color: GHOST_COLORS[ghost.color_index() % GHOST_COLORS.len()],
        };
    }
    if snap.maze.is_wall(pos) {
        return Cell {
            glyph: Glyph::Wall,
            color: Color::Blue,
        };
    }
    if snap.maze.has_power_item(pos) {
        return Cell {
            glyph: Glyph::Power,
            color: Color::Magenta,
        };
    }
    if snap.maze.has_pellet(pos) {
        return Cell {
            glyph: Glyph::Pellet,
            color: Color::White,
        };
    }
    Cell {
        glyph: Glyph::Empty,
        color: Color::Reset,
    }
}

fn draw_cell(stdout: &mut Stdout, renderer: &Renderer, x: usize, y: usize, cell: Cell) -> io::Result<()> {
    let text = match cell.glyph {
        Glyph::Player => "😃",
        Glyph::Ghost => "👻",
        Glyph::Frightened => "😱",
        Glyph::Wall => "██",
        Glyph::Empty => "  ",
        Glyph::Pellet => "· ",
        Glyph::Power => "● ",
    };
    let x_pos = renderer.origin_x + (x * CELL_W) as u16;
    let y_pos = renderer.origin_y + y as u16;
    stdout.queue(MoveTo(x_pos, y_pos))?;
    stdout.queue(SetForegroundColor(cell.color))?;
    stdout.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    if w < CELL_W {
        for _ in 0..(CELL_W - w) {
            stdout.queue(Print(' '))?;
        }
    }
    stdout.queue(ResetColor)?;
    Ok(())
}
