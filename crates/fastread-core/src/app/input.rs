impl<'a, S, IN, C> ReaderApp<'a, S, IN, C>
where
    S: KeyValueStore,
    IN: InputProvider,
    C: Clock,
{
    fn process_inputs(&mut self, now_ms: u64) {
        loop {
            match self.input.poll_event() {
                Ok(Some(event)) => self.apply_input_event(event, now_ms),
                Ok(None) => break,
                Err(err) => {
                    warn!("input: provider error: {:?}", err);
                    self.set_status("INPUT ERROR", "CHECK PROVIDER");
                    break;
                }
            }
        }
    }

    fn apply_input_event(&mut self, event: InputEvent, now_ms: u64) {
        // Any control dismisses a status screen and still applies.
        if matches!(self.ui, UiState::Status { .. }) {
            self.ui = UiState::Reader;
        }

        match event {
            InputEvent::Submit(text) => match submit_text(self.slot, &text) {
                Ok(true) => {
                    debug!("input: submitted {} chars", text.chars().count());
                    self.load_pending_text();
                }
                Ok(false) => debug!("input: submitted text already loaded"),
                Err(err) => warn!("input: submission rejected: {:?}", err),
            },
            InputEvent::TogglePlay => {
                self.engine.toggle(now_ms);
            }
            InputEvent::Seek(target) => {
                self.engine.seek(target);
            }
            InputEvent::SkipForward => {
                self.engine.step(self.skip_delta());
            }
            InputEvent::SkipBack => {
                self.engine.step(-self.skip_delta());
            }
            InputEvent::SetRate(wpm) => {
                self.engine.set_rate(wpm, now_ms);
            }
            InputEvent::RateUp => {
                let wpm = self.engine.rate_wpm().saturating_add(self.config.wpm_step);
                self.engine.set_rate(wpm, now_ms);
            }
            InputEvent::RateDown => {
                let wpm = self.engine.rate_wpm().saturating_sub(self.config.wpm_step);
                self.engine.set_rate(wpm, now_ms);
            }
            InputEvent::Reset => self.engine.reset(),
            InputEvent::Save => self.save_session(now_ms),
            InputEvent::ToggleFullText => self.show_full_text = !self.show_full_text,
            InputEvent::SelectHistory(id) => self.select_history(&id),
            InputEvent::RemoveHistory(id) => match self.history.remove(&id) {
                Ok(()) => self.refresh_history(),
                Err(err) => self.history_unavailable(err),
            },
            InputEvent::ClearHistory => match self.history.clear() {
                Ok(()) => self.refresh_history(),
                Err(err) => self.history_unavailable(err),
            },
            InputEvent::Quit => {
                info!("input: quit requested");
                self.quit_requested = true;
            }
        }

        self.pending_redraw = true;
    }

    fn skip_delta(&self) -> isize {
        isize::try_from(self.config.skip_words).unwrap_or(isize::MAX)
    }
}
