use std::{
    fs,
    io::{self, IsTerminal},
};

use clap::Parser;
use embassy_executor::Spawner;
use embassy_futures::select::select3;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Instant, Timer};
use fastread_core::{
    app::{ReaderApp, ReaderConfig, TickResult},
    clock::Clock,
    history::HistoryStore,
    session::{TextSlot, submit_text},
    storage::MemoryStore,
};
use fastread_host::{
    clock::SystemClock,
    config_paths,
    input::{HELP, InputChannel, TerminalInput, spawn_stdin_reader},
    render::TerminalRenderer,
    storage::FileStore,
};
use log::{info, warn};

use cli::CliArgs;
use history_backend::HistoryBackend;
use wpm_report::WpmReport;

#[path = "main/cli.rs"]
mod cli;
#[path = "main/history_backend.rs"]
mod history_backend;
#[path = "main/wpm_report.rs"]
mod wpm_report;

const WPM_REPORT_INTERVAL_MS: u64 = 5_000;

static TEXT_SLOT: TextSlot = TextSlot::new();
static INPUT_EVENTS: InputChannel = Channel::new();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let reader_config = ReaderConfig {
        wpm: args.wpm,
        ..ReaderConfig::default()
    };

    let backend = open_history_backend(&args);
    if let Some(path) = args.file.as_deref() {
        match fs::read_to_string(path) {
            Ok(text) => {
                if let Err(err) = submit_text(&TEXT_SLOT, &text) {
                    warn!("startup: {} rejected: {:?}", path.display(), err);
                }
            }
            Err(err) => warn!("startup: cannot read {}: {}", path.display(), err),
        }
    }

    if let Err(err) = spawn_stdin_reader(&INPUT_EVENTS) {
        warn!("startup: stdin reader unavailable: {}", err);
    }

    let mut app = ReaderApp::new(
        reader_config,
        &TEXT_SLOT,
        HistoryStore::new(backend),
        TerminalInput::new(&INPUT_EVENTS),
        SystemClock,
    );

    let stdout = io::stdout();
    let clear_frames = stdout.is_terminal();
    let mut renderer = TerminalRenderer::new(stdout.lock());
    if !clear_frames {
        renderer = renderer.without_clearing();
    }

    info!(
        "Reader started: target_wpm={} min_wpm={} max_wpm={} skip_words={}",
        app.config().wpm,
        app.config().min_wpm,
        app.config().max_wpm,
        app.config().skip_words
    );
    eprintln!("{HELP}");

    let loop_start = Instant::now();
    let mut wpm_report = WpmReport::new(0);

    loop {
        let now_ms = loop_start.elapsed().as_millis();

        if app.tick(now_ms) == TickResult::RenderRequested {
            let wall_ms = SystemClock.unix_ms();
            app.with_screen(now_ms, |screen| {
                if let Err(err) = renderer.draw(screen, wall_ms) {
                    warn!("render: terminal write failed: {}", err);
                }
            });
        }

        if app.quit_requested() {
            info!("Reader stopped");
            break;
        }

        wpm_report.record(app.drain_word_updates(), now_ms);

        let wake_at = loop_start + Duration::from_millis(app.next_wakeup_ms(now_ms));
        select3(
            Timer::at(wake_at),
            TEXT_SLOT.wait_changed(),
            INPUT_EVENTS.ready_to_receive(),
        )
        .await;
    }

    std::process::exit(0);
}

fn open_history_backend(args: &CliArgs) -> HistoryBackend {
    if args.ephemeral {
        info!("history: in-memory only");
        return HistoryBackend::Memory(MemoryStore::new());
    }

    match args.history_file.clone().or_else(config_paths::history_file) {
        Some(path) => {
            info!("history: {}", path.display());
            HistoryBackend::File(FileStore::new(path))
        }
        None => {
            warn!("history: no config directory, keeping history in memory");
            HistoryBackend::Memory(MemoryStore::new())
        }
    }
}
