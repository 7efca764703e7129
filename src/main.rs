mod display;

use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use space_cannon::compute::{
    fire, init_state, resize, take_events, tick, toggle_music, toggle_pause, touch_menu,
};
use space_cannon::config::GameConfig;
use space_cannon::entities::{GameEvent, GameState, SoundCue};
use space_cannon::menu::MenuLayout;
use space_cannon::storage::{default_score_path, TopScoreStore};

#[derive(Parser, Debug)]
#[command(name = "space_cannon", about = "Terminal Space Cannon")]
struct Cli {
    /// JSON file overriding gameplay tunables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where the top score is kept
    #[arg(long)]
    score_file: Option<PathBuf>,

    /// Seed the RNG for a reproducible halo sequence
    #[arg(long)]
    seed: Option<u64>,

    /// Forget the stored top score before starting
    #[arg(long)]
    reset_score: bool,

    /// Frames per second (overrides the config file)
    #[arg(long)]
    fps: Option<u32>,
}

/// What one input event asks the frame loop to do.
enum Command {
    Quit,
    Continue,
}

// ── Input ─────────────────────────────────────────────────────────────────────

fn handle_key(state: &mut GameState, code: KeyCode, modifiers: KeyModifiers) -> Command {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return Command::Quit,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Command::Quit,
        _ => {}
    }

    let layout = MenuLayout::for_size(state.width, state.height);
    if state.menu.is_shown() {
        // Keys stand in for taps on the menu's buttons.
        let target = match code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(layout.play.center()),
            KeyCode::Char('m') | KeyCode::Char('M') => Some(layout.music.center()),
            _ => None,
        };
        if let Some((col, row)) = target {
            *state = touch_menu(state, col, row);
        }
        if code == KeyCode::Esc {
            return Command::Quit;
        }
        return Command::Continue;
    }

    match code {
        KeyCode::Char(' ') | KeyCode::Up => *state = fire(state),
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => *state = toggle_pause(state),
        KeyCode::Char('m') | KeyCode::Char('M') => *state = toggle_music(state),
        _ => {}
    }
    Command::Continue
}

fn handle_mouse(state: &mut GameState, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    if state.menu.is_shown() {
        *state = touch_menu(state, mouse.column, mouse.row);
    } else if !state.game_paused {
        // A tap anywhere on the field fires, as on a touch screen.
        *state = fire(state);
    }
}

// ── Host side of game events ──────────────────────────────────────────────────

fn drain_events<W: Write>(out: &mut W, state: &mut GameState, store: &TopScoreStore) {
    for event in take_events(state) {
        match event {
            GameEvent::NewTopScore(score) => {
                if let Err(e) = store.save(score) {
                    warn!("could not save top score: {e:#}");
                }
            }
            GameEvent::GameOver { score } => info!("round finished with {}", score),
            GameEvent::Music(on) => info!("music {}", if on { "on" } else { "off" }),
            // The terminal has one voice: the bell, for the loud moments.
            GameEvent::Sound(SoundCue::Deep) if state.menu.music_playing => {
                let _ = out.write_all(b"\x07");
            }
            GameEvent::Sound(_) => {}
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    mut state: GameState,
    store: &TopScoreStore,
    seed: Option<u64>,
) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let frame_time = Duration::from_secs_f32(state.config.dt());

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. }) => {
                    if let Command::Quit = handle_key(&mut state, code, modifiers) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => handle_mouse(&mut state, mouse),
                Event::Resize(width, height) => state = resize(&state, width, height),
                _ => {}
            }
        }

        state = tick(&state, &mut rng);
        drain_events(out, &mut state, store);

        display::render(out, &state).context("rendering frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            std::thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(fps) = cli.fps {
        config.fps = fps;
    }
    config.validate()?;

    let store = TopScoreStore::new(cli.score_file.clone().unwrap_or_else(default_score_path));
    if cli.reset_score {
        store.reset()?;
    }
    let top_score = store.load();
    info!("top score {} from {}", top_score, store.path().display());

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Ghostty / kitty-protocol terminals report press vs. release; others
    // fall back to press-only, which is all the game needs.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = terminal::size()
        .context("querying terminal size")
        .and_then(|(width, height)| {
            let state = init_state(config, width, height, top_score);
            run(&mut out, &rx, state, &store, cli.seed)
        });

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
