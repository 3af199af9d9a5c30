impl<'a, S, IN, C> ReaderApp<'a, S, IN, C>
where
    S: KeyValueStore,
    IN: InputProvider,
    C: Clock,
{
    pub fn new(
        mut config: ReaderConfig,
        slot: &'a TextSlot,
        history: HistoryStore<S>,
        input: IN,
        clock: C,
    ) -> Self {
        if config.max_wpm < config.min_wpm {
            core::mem::swap(&mut config.max_wpm, &mut config.min_wpm);
        }
        let limits = RateLimits::new(config.min_wpm, config.max_wpm);
        config.min_wpm = limits.min_wpm;
        config.max_wpm = limits.max_wpm;
        config.wpm = limits.clamp(config.wpm);
        config.wpm_step = config.wpm_step.max(1);

        let mut app = Self {
            slot,
            history,
            input,
            clock,
            config,
            engine: PlaybackEngine::new(config.wpm, limits),
            loader: SessionLoader::new(),
            ui: UiState::Reader,
            history_snapshot: HistoryList::new(),
            show_full_text: false,
            saved_until_ms: None,
            pending_redraw: true,
            quit_requested: false,
        };
        app.refresh_history();
        app
    }

    pub fn with_screen<F>(&self, now_ms: u64, f: F)
    where
        F: FnOnce(Screen<'_>),
    {
        let wpm = self.engine.rate_wpm();

        if let UiState::Status { line1, line2 } = self.ui {
            f(Screen::Status {
                title: APP_TITLE,
                wpm,
                line1,
                line2,
            });
            return;
        }

        let words = self.engine.words();
        if words.is_empty() {
            f(Screen::Empty {
                title: APP_TITLE,
                wpm,
                history: &self.history_snapshot,
            });
            return;
        }

        let word_index = self.engine.index();
        let full_text = self.show_full_text.then(|| FullTextView {
            words: words.as_slice(),
            highlighted: word_index,
        });

        f(Screen::Reading {
            title: APP_TITLE,
            wpm,
            word: self.engine.current_word().unwrap_or(""),
            word_index,
            word_total: words.len(),
            playing: self.engine.is_playing(),
            saved: self.saved_flag_visible(now_ms),
            full_text,
            history: &self.history_snapshot,
        });
    }

    pub fn config(&self) -> ReaderConfig {
        self.config
    }

    pub fn engine(&self) -> &PlaybackEngine {
        &self.engine
    }

    /// History as of the last refresh, newest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history_snapshot
    }

    pub fn history_store(&self) -> &HistoryStore<S> {
        &self.history
    }

    pub fn input_mut(&mut self) -> &mut IN {
        &mut self.input
    }

    pub fn loaded_text(&self) -> Option<&str> {
        self.loader.loaded_text()
    }

    pub fn full_text_visible(&self) -> bool {
        self.show_full_text
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn drain_word_updates(&mut self) -> u32 {
        self.engine.drain_word_updates()
    }

    fn saved_flag_visible(&self, now_ms: u64) -> bool {
        self.saved_until_ms.is_some_and(|until| now_ms < until)
    }
}
