impl<CS, MS, IN> PlaybackEngine<CS, MS, IN>
where
    CS: ContentService,
    MS: MirrorSurface,
    IN: InputProvider,
{
    fn process_inputs(&mut self, now_ms: u64) {
        loop {
            match self.input.poll_event() {
                Ok(Some(command)) => self.apply_command(command, now_ms),
                Ok(None) => break,
                Err(_) => {
                    warn!("input: provider error");
                    self.set_status(format_args!("Input error. Check provider."));
                    break;
                }
            }
        }
    }

    pub fn apply_command(&mut self, command: Command, now_ms: u64) {
        debug!("input: command={:?} state={:?}", command, self.state);
        let step = self.config.jump_words.min(isize::MAX as usize) as isize;

        match command {
            Command::TogglePlay => self.toggle_play(now_ms),
            Command::Play => self.play(now_ms),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(now_ms),
            Command::Restart => self.restart(),
            Command::Back => self.jump_relative(-step, now_ms),
            Command::Forward => self.jump_relative(step, now_ms),
            Command::ToggleMeta => self.toggle_meta(),
            Command::Stabilize(source) => self.stabilize_speed_from(source),
            Command::JumpToAnchor(index) => self.jump_to_anchor(index, now_ms),
            Command::LoadSample => self.load_sample(now_ms),
        }
    }

    pub fn toggle_meta(&mut self) {
        self.meta_mode = self.meta_mode.toggled();
        self.pending_redraw = true;
    }
}
