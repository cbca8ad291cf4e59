//! Inter-word delay computation.

use crate::content::Token;

/// Shortest frame the pacing chain will ever schedule.
pub const MIN_DELAY_MS: u32 = 40;

/// Delay after showing a word with `pause_mult` at `wpm`.
///
/// `(60000 / wpm) * pause_mult`, floored at [`MIN_DELAY_MS`]. A zero speed is
/// read as 1 WPM; negative or NaN multipliers fall to the floor.
pub fn word_delay_ms(wpm: u16, pause_mult: f32) -> u32 {
    let base = 60_000.0 / f64::from(wpm.max(1));
    let delay = base * f64::from(pause_mult);

    if !(delay >= MIN_DELAY_MS as f64) {
        return MIN_DELAY_MS;
    }
    if delay >= u32::MAX as f64 {
        return u32::MAX;
    }
    delay as u32
}

pub fn token_delay_ms(wpm: u16, token: &Token) -> u32 {
    word_delay_ms(wpm, token.pause_mult)
}
