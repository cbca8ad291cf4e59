//! Cancellable deadlines for the cooperative tick loop.
//!
//! A slot holds at most one armed deadline. Every arm and cancel bumps the
//! slot generation, so a handle taken before a cancel can never fire again.

/// Identity of one armed deadline.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TimerHandle {
    generation: u32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Armed {
    handle: TimerHandle,
    due_ms: u64,
    period_ms: Option<u32>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TimerSlot {
    generation: u32,
    armed: Option<Armed>,
}

impl TimerSlot {
    pub const fn new() -> Self {
        Self {
            generation: 0,
            armed: None,
        }
    }

    /// Arm a one-shot deadline `delay_ms` after `now_ms`.
    ///
    /// A live deadline is cancelled first; two deadlines never coexist.
    pub fn arm_once(&mut self, now_ms: u64, delay_ms: u32) {
        self.arm(now_ms, delay_ms, None)
    }

    /// Arm a deadline that re-arms itself every `period_ms` after firing.
    pub fn arm_interval(&mut self, now_ms: u64, period_ms: u32) {
        let period = period_ms.max(1);
        self.arm(now_ms, period, Some(period))
    }

    fn arm(&mut self, now_ms: u64, delay_ms: u32, period_ms: Option<u32>) {
        self.cancel();
        let handle = TimerHandle {
            generation: self.generation,
        };
        self.armed = Some(Armed {
            handle,
            due_ms: now_ms.saturating_add(delay_ms as u64),
            period_ms,
        });
    }

    /// Drop the armed deadline. Returns whether one was live.
    pub fn cancel(&mut self) -> bool {
        self.generation = self.generation.wrapping_add(1);
        self.armed.take().is_some()
    }

    /// Fire the deadline if it is due at `now_ms`.
    ///
    /// One-shot deadlines disarm; interval deadlines move forward by one
    /// period, so a late poll can fire several times in a row.
    pub fn poll(&mut self, now_ms: u64) -> Option<TimerHandle> {
        let armed = self.armed?;
        if now_ms < armed.due_ms {
            return None;
        }

        match armed.period_ms {
            Some(period) => {
                self.armed = Some(Armed {
                    due_ms: armed.due_ms.saturating_add(period as u64),
                    ..armed
                });
            }
            None => self.armed = None,
        }
        Some(armed.handle)
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn due_ms(&self) -> Option<u64> {
        self.armed.map(|armed| armed.due_ms)
    }

    #[cfg(test)]
    fn handle(&self) -> Option<TimerHandle> {
        self.armed.map(|armed| armed.handle)
    }

    #[cfg(test)]
    fn is_current(&self, handle: TimerHandle) -> bool {
        self.handle() == Some(handle)
    }
}
