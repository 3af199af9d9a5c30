use super::*;
use crate::{
    clock::FixedClock,
    history::{HISTORY_CAPACITY, HISTORY_KEY},
    input::mock::MockInput,
    session::SESSION_MAX_LATENCY_MS,
    storage::MemoryStore,
};

const T0: u64 = 1_700_000_000_000;
const TEXT: &str = "alpha beta gamma delta epsilon";

type TestApp<'a> = ReaderApp<'a, MemoryStore, MockInput, FixedClock>;

fn make_app(slot: &TextSlot) -> TestApp<'_> {
    ReaderApp::new(
        ReaderConfig::default(),
        slot,
        HistoryStore::new(MemoryStore::new()),
        MockInput::new(),
        FixedClock::new(T0),
    )
}

fn send(app: &mut TestApp<'_>, event: InputEvent, now_ms: u64) -> TickResult {
    app.input_mut().push(event);
    app.tick(now_ms)
}

fn current_word(app: &TestApp<'_>, now_ms: u64) -> Option<String> {
    let mut word = None;
    app.with_screen(now_ms, |screen| {
        if let Screen::Reading { word: current, .. } = screen {
            word = Some(current.to_string());
        }
    });
    word
}

#[test]
fn empty_slot_shows_empty_screen() {
    let slot = TextSlot::new();
    let mut app = make_app(&slot);

    assert_eq!(app.tick(0), TickResult::RenderRequested);
    assert_eq!(app.tick(1), TickResult::NoRender);

    let mut empty = false;
    app.with_screen(1, |screen| empty = matches!(screen, Screen::Empty { wpm: 300, .. }));
    assert!(empty);

    send(&mut app, InputEvent::TogglePlay, 2);
    assert!(!app.engine().is_playing());
}

#[test]
fn submitted_text_is_loaded_and_played() {
    let slot = TextSlot::new();
    let mut app = make_app(&slot);

    send(&mut app, InputEvent::Submit(TEXT.to_string()), 0);
    assert_eq!(app.loaded_text(), Some(TEXT));
    assert_eq!(current_word(&app, 0).as_deref(), Some("alpha"));

    send(&mut app, InputEvent::SetRate(600), 0);
    send(&mut app, InputEvent::TogglePlay, 0);
    assert_eq!(app.tick(50), TickResult::NoRender);
    assert_eq!(app.tick(100), TickResult::RenderRequested);
    assert_eq!(current_word(&app, 100).as_deref(), Some("beta"));
    assert_eq!(app.drain_word_updates(), 1);
    assert_eq!(app.next_wakeup_ms(100), 200);
}

#[test]
fn short_submission_is_ignored() {
    let slot = TextSlot::new();
    let mut app = make_app(&slot);

    send(&mut app, InputEvent::Submit("tiny".to_string()), 0);
    assert_eq!(slot.text(), None);
    assert_eq!(app.loaded_text(), None);
}

#[test]
fn text_published_elsewhere_reaches_the_reader() {
    let slot = TextSlot::new();
    let mut app = make_app(&slot);
    app.tick(0);

    slot.set("published from another writer");
    assert_eq!(app.tick(100), TickResult::RenderRequested);
    assert_eq!(app.engine().words().len(), 4);
}

#[test]
fn skip_and_rate_controls_follow_config() {
    let slot = TextSlot::new();
    slot.set(&vec!["w"; 100].join(" "));
    let mut app = make_app(&slot);
    app.tick(0);

    send(&mut app, InputEvent::SkipForward, 0);
    assert_eq!(app.engine().index(), 30);
    send(&mut app, InputEvent::SkipBack, 0);
    send(&mut app, InputEvent::SkipBack, 0);
    assert_eq!(app.engine().index(), 0);
    send(&mut app, InputEvent::Seek(500), 0);
    assert_eq!(app.engine().index(), 99);

    send(&mut app, InputEvent::RateUp, 0);
    assert_eq!(app.engine().rate_wpm(), 325);
    for _ in 0..20 {
        send(&mut app, InputEvent::RateUp, 0);
    }
    assert_eq!(app.engine().rate_wpm(), 800);
    send(&mut app, InputEvent::SetRate(10), 0);
    assert_eq!(app.engine().rate_wpm(), 100);
    send(&mut app, InputEvent::RateDown, 0);
    assert_eq!(app.engine().rate_wpm(), 100);

    send(&mut app, InputEvent::Reset, 0);
    assert_eq!(app.engine().index(), 0);
}

#[test]
fn config_is_sanitized() {
    let slot = TextSlot::new();
    let app: TestApp<'_> = ReaderApp::new(
        ReaderConfig {
            wpm: 5_000,
            min_wpm: 600,
            max_wpm: 200,
            wpm_step: 0,
            skip_words: 10,
        },
        &slot,
        HistoryStore::new(MemoryStore::new()),
        MockInput::new(),
        FixedClock::new(T0),
    );

    let config = app.config();
    assert_eq!((config.min_wpm, config.max_wpm, config.wpm), (200, 600, 600));
    assert_eq!(config.wpm_step, 1);
    assert_eq!(app.engine().rate_wpm(), 600);
}

#[test]
fn save_adds_dated_entry_and_flashes_saved_flag() {
    let slot = TextSlot::new();
    slot.set(TEXT);
    let mut app = make_app(&slot);
    app.tick(0);

    send(&mut app, InputEvent::Save, 1_000);

    let entries = app.history();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "Reading Session - 11/14/2023");
    assert_eq!(entries[0].source_url.as_deref(), Some(SAVED_SOURCE_URL));
    assert_eq!(entries[0].text.as_deref(), Some(TEXT));
    assert_eq!(entries[0].created_at_ms, T0);

    let mut saved = false;
    app.with_screen(2_999, |screen| {
        saved = matches!(screen, Screen::Reading { saved: true, .. })
    });
    assert!(saved);
    assert_eq!(app.next_wakeup_ms(2_950), 3_000);

    assert_eq!(app.tick(3_000), TickResult::RenderRequested);
    app.with_screen(3_000, |screen| {
        saved = matches!(screen, Screen::Reading { saved: true, .. })
    });
    assert!(!saved);
}

#[test]
fn repeated_saves_stay_bounded_and_unique() {
    let slot = TextSlot::new();
    slot.set(TEXT);
    let mut app = make_app(&slot);
    app.tick(0);

    for now in 0..12 {
        send(&mut app, InputEvent::Save, now);
    }

    let entries = app.history();
    assert_eq!(entries.len(), HISTORY_CAPACITY);
    for (i, entry) in entries.iter().enumerate() {
        assert!(entries[i + 1..].iter().all(|other| other.id != entry.id));
    }
}

#[test]
fn save_without_text_writes_nothing() {
    let slot = TextSlot::new();
    let mut app = make_app(&slot);

    send(&mut app, InputEvent::Save, 0);
    assert!(app.history().is_empty());
    assert_eq!(app.history_store().store().writes(), 0);
}

#[test]
fn selecting_history_restores_its_text() {
    let slot = TextSlot::new();
    slot.set(TEXT);
    let mut app = make_app(&slot);
    app.tick(0);
    send(&mut app, InputEvent::Save, 0);
    let saved_id = app.history()[0].id.clone();

    send(&mut app, InputEvent::Submit("something else entirely".to_string()), 10);
    send(&mut app, InputEvent::Seek(1), 10);
    assert_eq!(current_word(&app, 10).as_deref(), Some("else"));

    send(&mut app, InputEvent::SelectHistory(saved_id), 20);
    assert_eq!(app.loaded_text(), Some(TEXT));
    assert_eq!(app.engine().index(), 0);
    assert!(!app.engine().is_playing());
}

#[test]
fn remove_and_clear_update_the_listing() {
    let slot = TextSlot::new();
    slot.set(TEXT);
    let mut app = make_app(&slot);
    app.tick(0);
    send(&mut app, InputEvent::Save, 0);
    send(&mut app, InputEvent::Save, 1);
    let newest = app.history()[0].id.clone();

    send(&mut app, InputEvent::RemoveHistory(newest.clone()), 2);
    assert_eq!(app.history().len(), 1);
    assert!(app.history().iter().all(|entry| entry.id != newest));

    send(&mut app, InputEvent::RemoveHistory("unknown".to_string()), 3);
    assert_eq!(app.history().len(), 1);

    send(&mut app, InputEvent::ClearHistory, 4);
    assert!(app.history().is_empty());
}

#[test]
fn unavailable_storage_shows_status_and_keeps_reading() {
    let slot = TextSlot::new();
    slot.set(TEXT);
    let mut store = MemoryStore::new();
    store.set_unavailable(true);
    let mut app = ReaderApp::new(
        ReaderConfig::default(),
        &slot,
        HistoryStore::new(store),
        MockInput::new(),
        FixedClock::new(T0),
    );
    app.tick(0);

    let mut status = None;
    app.with_screen(0, |screen| {
        if let Screen::Status { line1, .. } = screen {
            status = Some(line1.to_string());
        }
    });
    assert_eq!(status.as_deref(), Some("HISTORY UNAVAILABLE"));

    send(&mut app, InputEvent::TogglePlay, 0);
    assert!(app.engine().is_playing());
    assert_eq!(current_word(&app, 0).as_deref(), Some("alpha"));

    send(&mut app, InputEvent::Save, 10);
    assert_eq!(app.history_store().store().raw(HISTORY_KEY), None);
    app.with_screen(10, |screen| {
        assert!(matches!(screen, Screen::Status { .. }));
    });
}

#[test]
fn full_text_view_highlights_current_word() {
    let slot = TextSlot::new();
    slot.set(TEXT);
    let mut app = make_app(&slot);
    app.tick(0);

    send(&mut app, InputEvent::ToggleFullText, 0);
    send(&mut app, InputEvent::Seek(3), 0);
    assert!(app.full_text_visible());

    let mut highlighted = Vec::new();
    app.with_screen(0, |screen| {
        if let Screen::Reading {
            full_text: Some(view),
            ..
        } = screen
        {
            highlighted = view
                .marked_words()
                .filter(|(_, marked)| *marked)
                .map(|(word, _)| word.to_string())
                .collect();
        }
    });
    assert_eq!(highlighted, ["delta"]);

    send(&mut app, InputEvent::ToggleFullText, 0);
    app.with_screen(0, |screen| {
        assert!(matches!(screen, Screen::Reading { full_text: None, .. }));
    });
}

#[test]
fn quit_sets_flag() {
    let slot = TextSlot::new();
    let mut app = make_app(&slot);
    assert!(!app.quit_requested());
    send(&mut app, InputEvent::Quit, 0);
    assert!(app.quit_requested());
}

#[test]
fn idle_wakeup_uses_session_poll_interval() {
    let slot = TextSlot::new();
    let app = make_app(&slot);
    let wake = app.next_wakeup_ms(1_000);
    assert_eq!(wake, 1_000 + SESSION_POLL_INTERVAL_MS);
    assert!(wake - 1_000 <= SESSION_MAX_LATENCY_MS);
}

#[test]
fn wakeups_never_exceed_slot_latency_bound() {
    let slot = TextSlot::new();
    slot.set(TEXT);
    let mut app = make_app(&slot);
    app.tick(0);
    send(&mut app, InputEvent::SetRate(100), 0);
    send(&mut app, InputEvent::TogglePlay, 0);
    send(&mut app, InputEvent::Save, 0);

    for now in [0, 10, 250, 599, 1_999, 2_500] {
        app.tick(now);
        let wake = app.next_wakeup_ms(now);
        assert!(wake >= now);
        assert!(wake - now <= SESSION_MAX_LATENCY_MS, "now={now} wake={wake}");
    }
}

#[test]
fn queued_controls_apply_after_pending_text_loads() {
    let slot = TextSlot::new();
    slot.set(TEXT);
    let input = MockInput::from_events([
        InputEvent::Seek(3),
        InputEvent::SetRate(600),
        InputEvent::TogglePlay,
    ]);
    let mut app = ReaderApp::new(
        ReaderConfig::default(),
        &slot,
        HistoryStore::new(MemoryStore::new()),
        input,
        FixedClock::new(T0),
    );

    app.tick(0);
    assert!(app.input_mut().is_drained());
    assert_eq!(app.engine().index(), 3);
    assert_eq!(app.engine().rate_wpm(), 600);
    assert!(app.engine().is_playing());
}

#[test]
fn submit_then_play_in_one_batch_plays_new_text() {
    let slot = TextSlot::new();
    let input = MockInput::from_events([
        InputEvent::Submit(TEXT.to_string()),
        InputEvent::TogglePlay,
    ]);
    let mut app = ReaderApp::new(
        ReaderConfig::default(),
        &slot,
        HistoryStore::new(MemoryStore::new()),
        input,
        FixedClock::new(T0),
    );

    app.tick(0);
    assert_eq!(app.loaded_text(), Some(TEXT));
    assert!(app.engine().is_playing());
    assert_eq!(app.tick(200), TickResult::RenderRequested);
    assert_eq!(app.engine().index(), 1);
}
