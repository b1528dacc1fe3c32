//! Auto-repeat filter for terminal key events.
//!
//! One physical key press should produce one action. Terminals that report
//! key kinds send `Repeat` events, which are dropped. Terminals that only send
//! presses repeat the press itself, so a press of a key that is still considered
//! held (seen within the release timeout) is dropped as well.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::map::handle_key_event;
use crate::types::Action;

/// Default time after which a key without a release event counts as released.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

const MAX_HELD_KEYS: usize = 8;

#[derive(Debug, Clone, Copy)]
struct HeldKey {
    code: KeyCode,
    last_seen: Instant,
}

/// Turns raw key events into at most one action per physical press.
#[derive(Debug, Clone)]
pub struct KeyRepeatFilter {
    held: ArrayVec<HeldKey, MAX_HELD_KEYS>,
    release_timeout: Duration,
}

impl KeyRepeatFilter {
    pub fn new() -> Self {
        Self::with_key_release_timeout_ms(DEFAULT_KEY_RELEASE_TIMEOUT_MS)
    }

    pub fn with_key_release_timeout_ms(timeout_ms: u64) -> Self {
        Self {
            held: ArrayVec::new(),
            release_timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// Filter one key event observed at `now`.
    ///
    /// Returns the mapped action for a fresh press, `None` for repeats, releases
    /// and unmapped keys.
    pub fn filter(&mut self, key: KeyEvent, now: Instant) -> Option<Action> {
        match key.kind {
            KeyEventKind::Repeat => {
                self.touch(key.code, now);
                None
            }
            KeyEventKind::Release => {
                self.release(key.code);
                None
            }
            KeyEventKind::Press => {
                let action = handle_key_event(key)?;
                if self.touch(key.code, now) {
                    None
                } else {
                    Some(action)
                }
            }
        }
    }

    /// Whether `code` is currently considered held.
    pub fn is_held(&self, code: KeyCode, now: Instant) -> bool {
        self.held
            .iter()
            .any(|k| k.code == code && now.saturating_duration_since(k.last_seen) <= self.release_timeout)
    }

    /// Forget keys not seen within the release timeout.
    pub fn expire(&mut self, now: Instant) {
        let timeout = self.release_timeout;
        self.held
            .retain(|k| now.saturating_duration_since(k.last_seen) <= timeout);
    }

    fn release(&mut self, code: KeyCode) {
        self.held.retain(|k| k.code != code);
    }

    /// Record `code` as held at `now`. Returns true if it already was.
    fn touch(&mut self, code: KeyCode, now: Instant) -> bool {
        self.expire(now);
        if let Some(k) = self.held.iter_mut().find(|k| k.code == code) {
            k.last_seen = now;
            return true;
        }
        if self.held.is_full() {
            self.held.remove(0);
        }
        self.held.push(HeldKey {
            code,
            last_seen: now,
        });
        false
    }
}

impl Default for KeyRepeatFilter {
    fn default() -> Self {
        Self::new()
    }
}
