use std::{
    path::PathBuf,
    process::ExitCode,
    thread,
    time::{Duration, Instant},
};

use log::{info, warn};
use pivotstream_core::{
    app::{EngineConfig, PlaybackEngine, TickResult},
    input::mock::MockInput,
    settings::SettingsStore,
    state::PlaybackState,
};

use replay::ReplayDocument;
use settings_sync::{JsonSettingsStore, SettingsSyncState};
use terminal::TerminalSurface;

#[path = "main/replay.rs"]
mod replay;
#[path = "main/settings_sync.rs"]
mod settings_sync;
#[path = "main/terminal.rs"]
mod terminal;

const SETTINGS_SAVE_DEBOUNCE_MS: u64 = 1_500;
const MAX_IDLE_SLEEP_MS: u64 = 50;
const REPORT_INTERVAL_MS: u64 = 5_000;
const USAGE: &str = "usage: pivotstream <replay.json> [--wpm N] [--settings FILE]";

struct Args {
    replay: PathBuf,
    wpm: Option<u16>,
    settings: Option<PathBuf>,
}

fn parse_args() -> Option<Args> {
    let mut args = std::env::args().skip(1);
    let mut replay = None;
    let mut wpm = None;
    let mut settings = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--wpm" => wpm = Some(args.next()?.parse().ok()?),
            "--settings" => settings = Some(PathBuf::from(args.next()?)),
            _ if replay.is_none() => replay = Some(PathBuf::from(arg)),
            _ => return None,
        }
    }

    Some(Args {
        replay: replay?,
        wpm,
        settings,
    })
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(args) = parse_args() else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    let document = match ReplayDocument::load(&args.replay) {
        Ok(document) => document,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let import_kind = document.import_kind();
    let (content, text) = document.into_content();

    let mut app = PlaybackEngine::new(
        content,
        TerminalSurface::default(),
        MockInput::new(),
        EngineConfig::default(),
    );

    let mut settings_store = args.settings.map(JsonSettingsStore::new);
    if let Some(store) = settings_store.as_mut() {
        match store.load() {
            Ok(Some(saved)) => {
                app.apply_persisted_settings(saved);
                info!("settings: restored wpm={} meta={:?}", saved.wpm, saved.meta_mode);
            }
            Ok(None) => info!("settings: none saved"),
            Err(err) => warn!("settings: load failed err={}", err),
        }
    }
    if let Some(wpm) = args.wpm {
        app.set_wpm(wpm);
    }
    let mut settings_sync = SettingsSyncState::new(app.persisted_settings());

    let loop_start = Instant::now();
    let loaded = match import_kind {
        Some(kind) => app.import(kind, text.as_bytes()),
        None => {
            app.edit_text(&text, 0);
            app.parse()
        }
    };
    if let Err(err) = loaded {
        terminal::print_status(app.status(), "load");
        warn!("runner: load failed err={}", err);
        return ExitCode::FAILURE;
    }

    info!(
        "runner: started words={} anchors={} wpm={}",
        app.tokens().len(),
        app.anchors().len(),
        app.wpm()
    );
    app.play(0);
    if !app.state().is_playing() {
        terminal::print_status(app.status(), "nothing to play");
        return ExitCode::SUCCESS;
    }

    let mut report_words = 0u64;
    let mut report_start_ms = 0u64;

    loop {
        let now_ms = elapsed_ms(loop_start);

        if app.tick(now_ms) == TickResult::RenderRequested {
            let highlighted = app.mirror().surface().highlighted_word();
            app.with_frame(|frame| {
                if let Err(err) = terminal::print_frame(&frame, highlighted) {
                    warn!("runner: stdout write failed err={}", err);
                }
            });
        }

        settings_sync.track_current(app.persisted_settings(), now_ms);
        settings_sync.flush_if_due(settings_store.as_mut(), now_ms);

        report_words = report_words.saturating_add(u64::from(app.drain_word_updates()));
        let elapsed = now_ms.saturating_sub(report_start_ms);
        if elapsed >= REPORT_INTERVAL_MS {
            let wpm_x100 = report_words * 6_000_000 / elapsed.max(1);
            info!(
                "effective_wpm={}.{:02} words={} elapsed_ms={}",
                wpm_x100 / 100,
                wpm_x100 % 100,
                report_words,
                elapsed
            );
            report_words = 0;
            report_start_ms = now_ms;
        }

        if app.state() == PlaybackState::Finished {
            break;
        }

        let wait_ms = app
            .next_deadline_ms()
            .map_or(MAX_IDLE_SLEEP_MS, |due| due.saturating_sub(now_ms))
            .min(MAX_IDLE_SLEEP_MS);
        thread::sleep(Duration::from_millis(wait_ms));
    }

    settings_sync.flush_now(settings_store.as_mut(), elapsed_ms(loop_start));
    app.with_frame(|frame| terminal::print_status(frame.status, frame.anchors.heading));
    info!("runner: finished words={} wpm={}", app.tokens().len(), app.wpm());
    ExitCode::SUCCESS
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
