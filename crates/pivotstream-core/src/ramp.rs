//! Time-based speed ramp.

use log::debug;

use crate::timer::TimerSlot;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RampConfig {
    pub interval_ms: u32,
    pub step_wpm: u16,
}

impl Default for RampConfig {
    fn default() -> Self {
        Self {
            interval_ms: 10_000,
            step_wpm: 20,
        }
    }
}

/// What a jump to an anchor does to a running ramp.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum AnchorRampPolicy {
    /// Leave speed and ramp interval untouched.
    #[default]
    Preserve,
    /// Start a fresh ramp interval at the jump.
    RestartInterval,
    /// Return to the speed the ramp started from and start a fresh interval.
    ResetSpeed,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RampTick {
    Stepped(u16),
    Capped,
}

/// Raises the shared speed setting on a fixed interval.
///
/// `enabled` is the user's choice for the current content; `armed` means the
/// interval timer is live. Pausing disarms, stabilizing disables.
#[derive(Clone, Copy, Debug)]
pub struct RampController {
    config: RampConfig,
    enabled: bool,
    timer: TimerSlot,
    base_wpm: Option<u16>,
}

impl RampController {
    pub const fn new(config: RampConfig) -> Self {
        Self {
            config,
            enabled: true,
            timer: TimerSlot::new(),
            base_wpm: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_armed(&self) -> bool {
        self.timer.is_armed()
    }

    pub fn due_ms(&self) -> Option<u64> {
        self.timer.due_ms()
    }

    /// Speed recorded when the ramp first armed for the current content.
    pub fn base_wpm(&self) -> Option<u16> {
        self.base_wpm
    }

    /// Start the interval if enabled and not already running.
    pub fn arm(&mut self, now_ms: u64, current_wpm: u16) -> bool {
        if !self.enabled || self.timer.is_armed() {
            return false;
        }
        self.base_wpm.get_or_insert(current_wpm);
        self.timer.arm_interval(now_ms, self.config.interval_ms);
        debug!(
            "ramp: armed wpm={} interval_ms={}",
            current_wpm, self.config.interval_ms
        );
        true
    }

    pub fn disarm(&mut self) {
        if self.timer.cancel() {
            debug!("ramp: disarmed");
        }
    }

    /// Restart the interval from `now_ms` when currently running.
    pub fn restart_interval(&mut self, now_ms: u64) {
        if self.timer.cancel() {
            self.timer.arm_interval(now_ms, self.config.interval_ms);
        }
    }

    /// Turn the ramp off until new content is loaded.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.disarm();
    }

    /// Re-enable for freshly loaded content, stopped until playback starts.
    pub fn reset_for_new_content(&mut self) {
        self.enabled = true;
        self.base_wpm = None;
        self.disarm();
    }

    /// Apply every ramp step due at `now_ms` to `wpm`, bounded to
    /// `[min_wpm, max_wpm]`. Returns the last step taken, if any.
    pub fn poll(&mut self, now_ms: u64, wpm: &mut u16, min_wpm: u16, max_wpm: u16) -> Option<RampTick> {
        let mut last = None;
        while self.timer.poll(now_ms).is_some() {
            let next = next_speed(*wpm, self.config.step_wpm, min_wpm, max_wpm);
            if next == *wpm {
                self.timer.cancel();
                debug!("ramp: cap reached wpm={}", wpm);
                return Some(RampTick::Capped);
            }
            *wpm = next;
            debug!("ramp: step wpm={}", next);
            last = Some(RampTick::Stepped(next));
        }
        last
    }
}

/// One ramp step from `current`, clamped to the speed bounds.
pub fn next_speed(current: u16, step: u16, min_wpm: u16, max_wpm: u16) -> u16 {
    current.saturating_add(step).clamp(min_wpm, max_wpm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_every_interval() {
        let mut ramp = RampController::new(RampConfig::default());
        let mut wpm = 300;
        assert!(ramp.arm(0, wpm));

        assert_eq!(ramp.poll(9_999, &mut wpm, 100, 800), None);
        assert_eq!(ramp.poll(10_000, &mut wpm, 100, 800), Some(RampTick::Stepped(320)));
        assert_eq!(ramp.poll(30_000, &mut wpm, 100, 800), Some(RampTick::Stepped(360)));
        assert_eq!(wpm, 360);
    }

    #[test]
    fn never_exceeds_cap_and_disarms_there() {
        for start in (100..=800u16).step_by(13) {
            let mut ramp = RampController::new(RampConfig::default());
            let mut wpm = start;
            ramp.arm(0, wpm);

            let mut now = 0;
            let mut previous = wpm;
            while ramp.is_armed() {
                now += 10_000;
                ramp.poll(now, &mut wpm, 100, 800);
                assert!(wpm <= 800);
                assert!(wpm >= previous);
                previous = wpm;
            }
            assert_eq!(wpm, 800, "start={start}");
        }
    }

    #[test]
    fn speed_below_floor_is_lifted() {
        assert_eq!(next_speed(40, 20, 100, 800), 100);
        assert_eq!(next_speed(790, 20, 100, 800), 800);
    }

    #[test]
    fn disabled_ramp_refuses_to_arm_until_new_content() {
        let mut ramp = RampController::new(RampConfig::default());
        ramp.disable();
        assert!(!ramp.arm(0, 300));

        ramp.reset_for_new_content();
        assert!(ramp.arm(0, 300));
        assert_eq!(ramp.base_wpm(), Some(300));
    }

    #[test]
    fn disarm_keeps_enabled() {
        let mut ramp = RampController::new(RampConfig::default());
        ramp.arm(0, 300);
        ramp.disarm();
        assert!(ramp.is_enabled());
        assert!(!ramp.is_armed());
        assert!(ramp.arm(5_000, 300));
        assert_eq!(ramp.due_ms(), Some(15_000));
    }
}
