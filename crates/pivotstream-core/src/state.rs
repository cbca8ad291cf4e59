//! Playback state machine.

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PlaybackState {
    #[default]
    Idle,
    Ready,
    Playing,
    Paused,
    Restarted,
    Finished,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlaybackEvent {
    Parsed { has_tokens: bool },
    Play,
    Pause,
    ReachedEnd,
    Edited,
    Restart,
}

impl PlaybackState {
    /// Target state for `event`, or `None` when the transition is illegal.
    pub const fn next(self, event: PlaybackEvent) -> Option<Self> {
        match (self, event) {
            (_, PlaybackEvent::Parsed { has_tokens: true }) => Some(Self::Ready),
            (_, PlaybackEvent::Parsed { has_tokens: false }) => Some(Self::Idle),
            (_, PlaybackEvent::Edited) => Some(Self::Idle),
            (
                Self::Ready | Self::Paused | Self::Restarted | Self::Finished,
                PlaybackEvent::Play,
            ) => Some(Self::Playing),
            (Self::Playing, PlaybackEvent::Pause) => Some(Self::Paused),
            (Self::Playing, PlaybackEvent::ReachedEnd) => Some(Self::Finished),
            (Self::Idle, PlaybackEvent::Restart) => None,
            (_, PlaybackEvent::Restart) => Some(Self::Restarted),
            _ => None,
        }
    }

    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Ready => "Ready",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::Restarted => "Restarted",
            Self::Finished => "Finished",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [PlaybackState; 6] = [
        PlaybackState::Idle,
        PlaybackState::Ready,
        PlaybackState::Playing,
        PlaybackState::Paused,
        PlaybackState::Restarted,
        PlaybackState::Finished,
    ];

    #[test]
    fn idle_cannot_play_without_parse() {
        assert_eq!(PlaybackState::Idle.next(PlaybackEvent::Play), None);
        let ready = PlaybackState::Idle
            .next(PlaybackEvent::Parsed { has_tokens: true })
            .unwrap();
        assert_eq!(ready.next(PlaybackEvent::Play), Some(PlaybackState::Playing));
    }

    #[test]
    fn edits_and_parses_are_legal_everywhere() {
        for state in ALL {
            assert_eq!(state.next(PlaybackEvent::Edited), Some(PlaybackState::Idle));
            assert_eq!(
                state.next(PlaybackEvent::Parsed { has_tokens: false }),
                Some(PlaybackState::Idle)
            );
        }
    }

    #[test]
    fn pause_and_end_only_from_playing() {
        for state in ALL {
            let pause = state.next(PlaybackEvent::Pause);
            let end = state.next(PlaybackEvent::ReachedEnd);
            if state == PlaybackState::Playing {
                assert_eq!(pause, Some(PlaybackState::Paused));
                assert_eq!(end, Some(PlaybackState::Finished));
            } else {
                assert_eq!(pause, None);
                assert_eq!(end, None);
            }
        }
    }

    #[test]
    fn restarted_is_playable() {
        let restarted = PlaybackState::Paused.next(PlaybackEvent::Restart).unwrap();
        assert_eq!(restarted, PlaybackState::Restarted);
        assert_eq!(restarted.next(PlaybackEvent::Play), Some(PlaybackState::Playing));
        assert_eq!(PlaybackState::Playing.next(PlaybackEvent::Play), None);
    }
}
