impl<CS, MS, IN> PlaybackEngine<CS, MS, IN>
where
    CS: ContentService,
    MS: MirrorSurface,
    IN: InputProvider,
{
    pub fn new(content: CS, surface: MS, input: IN, mut config: EngineConfig) -> Self {
        if config.max_wpm < config.min_wpm {
            core::mem::swap(&mut config.max_wpm, &mut config.min_wpm);
        }
        config.min_wpm = config.min_wpm.max(1);
        config.wpm = config.wpm.clamp(config.min_wpm, config.max_wpm);

        let mut status = heapless::String::new();
        set_bounded(&mut status, format_args!("No text loaded."));

        Self {
            content,
            mirror: Mirror::new(surface, config.reparse_debounce_ms),
            input,
            wpm: config.wpm,
            ramp: RampController::new(config.ramp),
            config,
            tokens: Vec::new(),
            anchors: Vec::new(),
            anchor_labels: Vec::new(),
            anchor_mode: AnchorMode::None,
            active_anchor: None,
            cursor: 0,
            state: PlaybackState::Idle,
            chain: TimerSlot::new(),
            word: PivotView::default(),
            meta_mode: MetaMode::Words,
            status,
            pending_redraw: true,
            words_since_drain: 0,
        }
    }

    /// Drive inputs and every timer that is due at `now_ms`.
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        self.process_inputs(now_ms);

        if self.mirror.poll(now_ms) {
            self.set_status(format_args!("Text changed. Press Play to parse again."));
        }

        let (min_wpm, max_wpm) = (self.config.min_wpm, self.config.max_wpm);
        if let Some(step) = self.ramp.poll(now_ms, &mut self.wpm, min_wpm, max_wpm) {
            if step == RampTick::Capped {
                debug!("playback: ramp capped wpm={}", self.wpm);
            }
            self.pending_redraw = true;
        }

        self.tick_chain(now_ms);

        if self.pending_redraw {
            self.pending_redraw = false;
            TickResult::RenderRequested
        } else {
            TickResult::NoRender
        }
    }

    pub fn with_frame<F>(&self, f: F)
    where
        F: FnOnce(Frame<'_>),
    {
        let mut meta = heapless::String::<META_BYTES>::new();
        let _ = write_meta(
            &mut meta,
            self.meta_mode,
            self.cursor,
            self.tokens.len(),
            self.config.words_per_page,
        );

        let mut heading = heapless::String::<HEADING_BYTES>::new();
        match self.anchor_mode {
            AnchorMode::Chapters => {
                set_bounded(&mut heading, format_args!("{} chapters", self.anchors.len()))
            }
            AnchorMode::Pages { count } => {
                set_bounded(&mut heading, format_args!("PDF pages: {count}"))
            }
            AnchorMode::None => set_bounded(&mut heading, format_args!("No chapters loaded.")),
        }

        let anchors: Vec<AnchorView<'_>> = self
            .anchors
            .iter()
            .zip(&self.anchor_labels)
            .enumerate()
            .map(|(index, (anchor, label))| AnchorView {
                label,
                level: anchor.level,
                active: self.active_anchor == Some(index),
            })
            .collect();

        f(Frame {
            word: &self.word,
            wpm: self.wpm,
            state: self.state,
            meta_mode: self.meta_mode,
            meta: &meta,
            status: &self.status,
            position: self.cursor,
            total: self.tokens.len(),
            ramp_armed: self.ramp.is_armed(),
            anchors: AnchorPanel {
                mode: self.anchor_mode,
                heading: &heading,
                anchors: &anchors,
            },
        });
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn anchor_mode(&self) -> AnchorMode {
        self.anchor_mode
    }

    pub fn active_anchor(&self) -> Option<usize> {
        self.active_anchor
    }

    pub fn wpm(&self) -> u16 {
        self.wpm
    }

    pub fn word(&self) -> &PivotView {
        &self.word
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn meta_mode(&self) -> MetaMode {
        self.meta_mode
    }

    pub fn is_ramp_enabled(&self) -> bool {
        self.ramp.is_enabled()
    }

    pub fn is_ramp_armed(&self) -> bool {
        self.ramp.is_armed()
    }

    pub fn mirror(&self) -> &Mirror<MS> {
        &self.mirror
    }

    /// Number of armed pacing deadlines; never more than one.
    pub fn pending_chain_callbacks(&self) -> usize {
        usize::from(self.chain.is_armed())
    }

    /// Earliest instant at which [`Self::tick`] has work to do.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        [self.chain.due_ms(), self.ramp.due_ms(), self.mirror.due_ms()]
            .into_iter()
            .flatten()
            .min()
    }

    pub fn with_content_mut<R, F>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut CS) -> R,
    {
        f(&mut self.content)
    }

    /// Words advanced by the pacing chain since the last call.
    pub fn drain_word_updates(&mut self) -> u32 {
        let count = self.words_since_drain;
        self.words_since_drain = 0;
        count
    }

    pub fn persisted_settings(&self) -> PersistedSettings {
        PersistedSettings::new(self.wpm, self.meta_mode)
    }

    pub fn apply_persisted_settings(&mut self, settings: PersistedSettings) {
        self.meta_mode = settings.meta_mode;
        self.set_wpm(settings.wpm);
    }

    fn set_status(&mut self, args: core::fmt::Arguments<'_>) {
        set_bounded(&mut self.status, args);
        self.pending_redraw = true;
    }
}
