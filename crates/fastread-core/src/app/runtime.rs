impl<'a, S, IN, C> ReaderApp<'a, S, IN, C>
where
    S: KeyValueStore,
    IN: InputProvider,
    C: Clock,
{
    /// One cooperative step: slot changes, then controls in arrival order,
    /// then the word timer.
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        self.load_pending_text();
        self.process_inputs(now_ms);

        match self.engine.tick(now_ms) {
            TickOutcome::Advanced { .. } | TickOutcome::Finished { .. } => {
                self.pending_redraw = true;
            }
            TickOutcome::Idle | TickOutcome::Paused | TickOutcome::Waiting => {}
        }

        if let Some(until) = self.saved_until_ms
            && now_ms >= until
        {
            self.saved_until_ms = None;
            self.pending_redraw = true;
        }

        if self.pending_redraw {
            self.pending_redraw = false;
            TickResult::RenderRequested
        } else {
            TickResult::NoRender
        }
    }

    /// Latest time the runtime may sleep until before calling `tick` again.
    pub fn next_wakeup_ms(&self, now_ms: u64) -> u64 {
        let mut wake = now_ms.saturating_add(SESSION_POLL_INTERVAL_MS);
        if let Some(deadline) = self.engine.next_deadline_ms() {
            wake = wake.min(deadline);
        }
        if let Some(until) = self.saved_until_ms {
            wake = wake.min(until);
        }
        wake.max(now_ms)
    }

    fn load_pending_text(&mut self) {
        if self.loader.poll(self.slot, &mut self.engine).is_some() {
            self.pending_redraw = true;
        }
    }

    fn save_session(&mut self, now_ms: u64) {
        let Some(text) = self.loader.loaded_text().map(str::to_string) else {
            debug!("history: save ignored, no text loaded");
            return;
        };

        let created_at_ms = self.clock.unix_ms();
        let title = session_title(created_at_ms);
        match self
            .history
            .add(&title, Some(SAVED_SOURCE_URL), Some(&text), created_at_ms)
        {
            Ok(entry) => {
                debug!("history: saved session id={}", entry.id);
                self.saved_until_ms = Some(now_ms.saturating_add(SAVED_NOTICE_MS));
                self.refresh_history();
            }
            Err(HistoryError::EntryTooLarge { .. }) => {
                self.set_status("TEXT TOO LARGE", "NOT SAVED");
            }
            Err(err) => self.history_unavailable(err),
        }
    }

    fn select_history(&mut self, id: &str) {
        let Some(entry) = self.history.get(id) else {
            debug!("history: select of unknown id={} ignored", id);
            self.refresh_history();
            return;
        };

        match entry.text.as_deref() {
            Some(text) if self.slot.set(text) => {
                info!("history: restored id={}", entry.id);
                self.load_pending_text();
            }
            Some(_) => debug!("history: id={} already loaded", entry.id),
            None => debug!("history: id={} has no text", entry.id),
        }
    }

    fn refresh_history(&mut self) {
        match self.history.try_list() {
            Ok(entries) => self.history_snapshot = entries,
            Err(err) => self.history_unavailable(err),
        }
        self.pending_redraw = true;
    }

    fn history_unavailable(&mut self, err: HistoryError<S::Error>) {
        warn!("history: unavailable: {:?}", err);
        self.history_snapshot.clear();
        self.set_status("HISTORY UNAVAILABLE", "CHECK STORAGE");
    }

    fn set_status(&mut self, line1: &'static str, line2: &'static str) {
        self.ui = UiState::Status { line1, line2 };
        self.pending_redraw = true;
    }
}
