impl<CS, MS, IN> PlaybackEngine<CS, MS, IN>
where
    CS: ContentService,
    MS: MirrorSurface,
    IN: InputProvider,
{
    /// Replace the mirror text after a user edit.
    ///
    /// Drops loaded tokens and anchors, re-enables the ramp and returns to
    /// `Idle`; the mirror is re-segmented once edits settle.
    pub fn edit_text(&mut self, text: &str, now_ms: u64) {
        self.stop_chain();
        self.unload();
        self.mirror.edit(text, now_ms);
        debug!("content: edited bytes={}", text.len());
    }

    pub fn load_sample(&mut self, now_ms: u64) {
        self.edit_text(SAMPLE_TEXT, now_ms);
        self.set_status(format_args!("Sample loaded."));
    }

    /// Send the mirror text to the parse service and load the result.
    ///
    /// Returns the number of loaded words. Failures are reported through the
    /// status line and leave tokens, cursor, and state as they were.
    pub fn parse(&mut self) -> Result<usize, LoadError> {
        if self.mirror.raw_text().trim().is_empty() {
            self.stop_chain();
            self.tokens.clear();
            self.cursor = 0;
            self.word = render(None);
            self.clear_anchors();
            self.mirror.rebuild();
            self.state = PlaybackState::Idle;
            self.set_status(format_args!("Please enter some text."));
            return Err(LoadError::EmptyInput);
        }

        self.set_status(format_args!("Parsing..."));
        let result = self.content.parse(self.mirror.raw_text().trim());
        match result {
            Ok(parsed) => Ok(self.install(parsed)),
            Err(err) => Err(self.parse_failed(err)),
        }
    }

    /// Import a document through the content service and parse its text.
    ///
    /// The current text is replaced only once both calls succeed; any failure
    /// changes nothing but the status line.
    pub fn import(&mut self, kind: ImportKind, payload: &[u8]) -> Result<usize, LoadError> {
        info!("content: import kind={:?} bytes={}", kind, payload.len());
        self.set_status(format_args!("Importing {}...", kind.label()));

        let document = match self.content.import(kind, payload) {
            Ok(document) => document,
            Err(err) => {
                let reason = err.to_string();
                warn!("content: import failed kind={:?} err={}", kind, reason);
                self.set_status(format_args!("Could not import {}: {}", kind.label(), reason));
                return Err(LoadError::ImportFailed);
            }
        };

        let text = document.text.trim();
        if text.is_empty() {
            warn!("content: import empty kind={:?}", kind);
            self.set_status(format_args!("Please enter some text."));
            return Err(LoadError::EmptyInput);
        }

        self.set_status(format_args!("Parsing..."));
        let parsed = match self.content.parse(text) {
            Ok(parsed) => parsed,
            Err(err) => return Err(self.parse_failed(err)),
        };

        self.stop_chain();
        self.unload();
        self.mirror.set_text(&document.text);
        let count = self.install(parsed);

        if !document.chapters.is_empty() {
            self.set_anchors(document.chapters, AnchorMode::Chapters);
            if count > 0 {
                self.active_anchor = Some(0);
            }
        } else if let Some(pages) = document.pages {
            self.anchor_mode = AnchorMode::Pages { count: pages };
        }
        debug!(
            "content: imported kind={:?} anchors={} mode={:?}",
            kind,
            self.anchors.len(),
            self.anchor_mode
        );
        Ok(count)
    }

    fn parse_failed(&mut self, err: CS::Error) -> LoadError {
        warn!("content: parse failed err={}", err);
        self.set_status(format_args!("Could not parse text."));
        LoadError::ParseFailed
    }

    fn install(&mut self, parsed: ParsedText) -> usize {
        self.stop_chain();

        let ParsedText { tokens, chapters } = parsed;
        let count = tokens.len();
        self.tokens = tokens;
        if chapters.is_empty() {
            self.clear_anchors();
        } else {
            self.set_anchors(chapters, AnchorMode::Chapters);
        }

        self.cursor = 0;
        self.mirror.rebuild();
        self.show_current();

        if self.mirror.word_count() != count {
            warn!(
                "content: mirror words={} differ from tokens={}",
                self.mirror.word_count(),
                count
            );
        }

        self.state = self
            .state
            .next(PlaybackEvent::Parsed {
                has_tokens: count > 0,
            })
            .unwrap_or(PlaybackState::Idle);
        self.set_status(format_args!("Loaded {count} words."));
        info!("content: loaded words={} anchors={}", count, self.anchors.len());
        count
    }

    fn unload(&mut self) {
        self.tokens.clear();
        self.cursor = 0;
        self.word = render(None);
        self.clear_anchors();
        self.ramp.reset_for_new_content();
        self.state = self
            .state
            .next(PlaybackEvent::Edited)
            .unwrap_or(PlaybackState::Idle);
        self.pending_redraw = true;
    }
}
