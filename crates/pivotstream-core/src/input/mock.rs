use super::{Command, InputProvider};

/// Input source that never produces commands, for hosts without controls.
#[derive(Default, Debug, Clone, Copy)]
pub struct MockInput;

impl MockInput {
    pub const fn new() -> Self {
        Self
    }
}

impl InputProvider for MockInput {
    type Error = core::convert::Infallible;

    fn poll_event(&mut self) -> Result<Option<Command>, Self::Error> {
        Ok(None)
    }
}
