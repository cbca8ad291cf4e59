//! Playback and navigation engine for fixed-gaze RSVP reading.
//!
//! Words are shown one at a time with their optimal recognition point held
//! under a pivot. The engine paces tokens, ramps speed, navigates by word or
//! anchor, and keeps an editable mirror of the source text highlighted at the
//! current position. Everything is driven by explicit `tick(now_ms)` calls.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod app;
pub mod content;
pub mod input;
pub mod mirror;
pub mod pacing;
pub mod ramp;
pub mod render;
pub mod settings;
pub mod state;
pub mod text_policy;
pub mod timer;
