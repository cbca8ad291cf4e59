impl<CS, MS, IN> PlaybackEngine<CS, MS, IN>
where
    CS: ContentService,
    MS: MirrorSurface,
    IN: InputProvider,
{
    /// Start playback, parsing the mirror text first when nothing is loaded.
    ///
    /// Playing from `Finished` rewinds to the first word.
    pub fn play(&mut self, now_ms: u64) {
        if self.state.is_playing() {
            return;
        }
        if self.tokens.is_empty() {
            match self.parse() {
                Ok(count) if count > 0 => {}
                _ => return,
            }
        }
        if self.state == PlaybackState::Finished && self.cursor >= self.tokens.len() {
            self.cursor = 0;
        }
        self.start_chain(now_ms);
    }

    /// Continue from the current word without re-parsing.
    pub fn resume(&mut self, now_ms: u64) {
        if self.state.is_playing() || self.tokens.is_empty() {
            return;
        }
        self.start_chain(now_ms);
    }

    pub fn pause(&mut self) {
        let Some(next) = self.state.next(PlaybackEvent::Pause) else {
            return;
        };
        self.stop_chain();
        self.state = next;
        self.mirror.highlight(self.cursor);
        self.pending_redraw = true;
        info!(
            "playback: paused cursor={} total={} wpm={}",
            self.cursor,
            self.tokens.len(),
            self.wpm
        );
    }

    pub fn toggle_play(&mut self, now_ms: u64) {
        if self.state.is_playing() {
            self.pause();
        } else {
            self.play(now_ms);
        }
    }

    /// Set the speed from a user control, clamped to the configured bounds.
    pub fn set_wpm(&mut self, wpm: u16) {
        let next = wpm.clamp(self.config.min_wpm, self.config.max_wpm);
        if next != self.wpm {
            self.wpm = next;
            self.pending_redraw = true;
        }
    }

    /// Keep the current speed: the ramp stays off until new content loads.
    pub fn stabilize_speed(&mut self) {
        self.stabilize_speed_from(StabilizeSource::Control);
    }

    pub fn stabilize_speed_from(&mut self, source: StabilizeSource) {
        self.ramp.disable();
        info!("playback: speed stabilized wpm={} source={:?}", self.wpm, source);
        match source {
            StabilizeSource::Control => self.set_status(format_args!(
                "Speed stabilized. Press Play to keep current WPM."
            )),
            StabilizeSource::Hotkey => {
                self.set_status(format_args!("Speed stabilized via Ctrl+K."))
            }
        }
    }

    fn start_chain(&mut self, now_ms: u64) {
        let Some(next) = self.state.next(PlaybackEvent::Play) else {
            return;
        };
        self.chain.cancel();
        self.state = next;
        self.mirror.set_editable(false);
        self.ramp.arm(now_ms, self.wpm);
        info!(
            "playback: start cursor={} total={} wpm={} ramp={}",
            self.cursor,
            self.tokens.len(),
            self.wpm,
            self.ramp.is_armed()
        );
        self.schedule_current(now_ms);
    }

    /// Cancel the chain and ramp timer and hand the mirror back for editing.
    fn stop_chain(&mut self) {
        self.chain.cancel();
        self.ramp.disarm();
        self.mirror.set_editable(true);
    }

    fn tick_chain(&mut self, now_ms: u64) {
        if self.chain.poll(now_ms).is_none() {
            return;
        }
        self.cursor = self.cursor.saturating_add(1).min(self.tokens.len());
        self.words_since_drain = self.words_since_drain.saturating_add(1);
        self.schedule_current(now_ms);
    }

    /// Show the word at the cursor and arm the deadline for the next one, or
    /// finish when the cursor ran off the end.
    fn schedule_current(&mut self, now_ms: u64) {
        if !self.state.is_playing() {
            return;
        }

        let Some(token) = self.tokens.get(self.cursor) else {
            self.finish();
            return;
        };
        let delay_ms = token_delay_ms(self.wpm, token);

        self.show_current();
        self.chain.arm_once(now_ms, delay_ms);
    }

    fn finish(&mut self) {
        let Some(next) = self.state.next(PlaybackEvent::ReachedEnd) else {
            return;
        };
        self.stop_chain();
        self.cursor = self.tokens.len();
        self.state = next;
        self.pending_redraw = true;
        info!("playback: finished total={}", self.tokens.len());
    }

    fn show_current(&mut self) {
        self.word = render(self.tokens.get(self.cursor));
        self.mirror.highlight(self.cursor);
        self.pending_redraw = true;
    }
}
