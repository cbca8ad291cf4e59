impl<CS, MS, IN> PlaybackEngine<CS, MS, IN>
where
    CS: ContentService,
    MS: MirrorSurface,
    IN: InputProvider,
{
    /// Move the cursor by `delta` words, clamped into the token range.
    pub fn jump_relative(&mut self, delta: isize, now_ms: u64) {
        let Some(last) = self.tokens.len().checked_sub(1) else {
            return;
        };

        let target = if delta < 0 {
            self.cursor.saturating_sub(delta.unsigned_abs())
        } else {
            self.cursor.saturating_add(delta as usize)
        }
        .min(last);

        debug!(
            "nav: relative delta={} cursor={} -> {} total={}",
            delta,
            self.cursor,
            target,
            self.tokens.len()
        );
        self.seek(target, now_ms);
    }

    /// Jump to the start of anchor `index` and mark it active.
    pub fn jump_to_anchor(&mut self, index: usize, now_ms: u64) {
        let Some(last) = self.tokens.len().checked_sub(1) else {
            return;
        };
        let Some(anchor) = self.anchors.get(index) else {
            debug!(
                "nav: anchor missing index={} anchors={}",
                index,
                self.anchors.len()
            );
            return;
        };

        let target = anchor.start_index.min(last);
        debug!(
            "nav: anchor index={} title={:?} start_index={} -> cursor={}",
            index, anchor.title, anchor.start_index, target
        );

        self.active_anchor = Some(index);
        if self.state.is_playing() {
            self.apply_anchor_ramp_policy(now_ms);
        }
        self.seek(target, now_ms);
    }

    /// Rewind to the first word and stop.
    pub fn restart(&mut self) {
        if self.tokens.is_empty() {
            return;
        }
        let Some(next) = self.state.next(PlaybackEvent::Restart) else {
            return;
        };

        self.stop_chain();
        self.cursor = 0;
        self.show_current();
        self.state = next;
        info!("playback: restarted total={}", self.tokens.len());
    }

    /// Place the cursor, re-render, and keep a running chain running from the
    /// new position.
    fn seek(&mut self, target: usize, now_ms: u64) {
        let playing = self.state.is_playing();
        self.chain.cancel();

        self.cursor = target;
        self.show_current();

        if playing {
            self.schedule_current(now_ms);
        }
    }

    fn apply_anchor_ramp_policy(&mut self, now_ms: u64) {
        match self.config.anchor_ramp_policy {
            AnchorRampPolicy::Preserve => {}
            AnchorRampPolicy::RestartInterval => self.ramp.restart_interval(now_ms),
            AnchorRampPolicy::ResetSpeed => {
                if let Some(base) = self.ramp.base_wpm() {
                    self.set_wpm(base);
                }
                self.ramp.restart_interval(now_ms);
            }
        }
        debug!(
            "nav: anchor ramp policy={:?} wpm={}",
            self.config.anchor_ramp_policy, self.wpm
        );
    }

    fn set_anchors(&mut self, mut anchors: Vec<Anchor>, mode: AnchorMode) {
        anchors.sort_by_key(|anchor| anchor.start_index);
        self.anchor_labels = anchors
            .iter()
            .enumerate()
            .map(|(index, anchor)| {
                cap_anchor_label(&anchor.title, index + 1, ANCHOR_LABEL_MAX_CHARS).into_owned()
            })
            .collect();
        self.anchors = anchors;
        self.anchor_mode = mode;
        self.active_anchor = None;
        self.pending_redraw = true;
    }

    fn clear_anchors(&mut self) {
        self.anchors.clear();
        self.anchor_labels.clear();
        self.anchor_mode = AnchorMode::None;
        self.active_anchor = None;
        self.pending_redraw = true;
    }
}
