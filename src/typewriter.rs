// Character-by-character text reveal, stepped by frame time.
use std::time::Duration;

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStatus {
    Revealing,
    Complete,
    Cancelled,
}

/// What a single call to [`Typewriter::tick`] produced.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RevealTick {
    /// Characters that became visible, in order.
    pub appended: Vec<char>,
    /// Set exactly once, on the interval after the last character appears.
    pub completed: bool,
}

/// Reveals one character per interval. Runs to completion unless cancelled.
#[derive(Debug)]
pub struct Typewriter {
    text: String,
    /// Byte offset of the revealed prefix.
    shown: usize,
    timer: Timer,
    status: RevealStatus,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, interval: Duration) -> Self {
        Self {
            text: text.into(),
            shown: 0,
            timer: Timer::new(interval, TimerMode::Repeating),
            status: RevealStatus::Revealing,
        }
    }

    pub fn tick(&mut self, delta: Duration) -> RevealTick {
        let mut step = RevealTick::default();
        if self.status != RevealStatus::Revealing {
            return step;
        }

        self.timer.tick(delta);

        // A long frame can cover several intervals; play them all in order.
        for _ in 0..self.timer.times_finished_this_tick() {
            match self.text[self.shown..].chars().next() {
                Some(ch) => {
                    self.shown += ch.len_utf8();
                    step.appended.push(ch);
                }
                None => {
                    self.status = RevealStatus::Complete;
                    step.completed = true;
                    break;
                }
            }
        }

        step
    }

    /// Stops the reveal where it is. No completion is reported afterwards.
    pub fn cancel(&mut self) {
        if self.status == RevealStatus::Revealing {
            self.status = RevealStatus::Cancelled;
        }
    }

    pub fn visible(&self) -> &str {
        &self.text[..self.shown]
    }

    #[cfg(test)]
    pub fn status(&self) -> RevealStatus {
        self.status
    }

    pub fn is_revealing(&self) -> bool {
        self.status == RevealStatus::Revealing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(40);

    #[test]
    fn reveals_one_character_per_interval() {
        let mut writer = Typewriter::new("Hi", INTERVAL);
        let mut frames = Vec::new();

        let first = writer.tick(INTERVAL);
        assert_eq!(first.appended, vec!['H']);
        assert!(!first.completed);
        frames.push(writer.visible().to_owned());

        let second = writer.tick(INTERVAL);
        assert_eq!(second.appended, vec!['i']);
        assert!(!second.completed);
        frames.push(writer.visible().to_owned());

        let last = writer.tick(INTERVAL);
        assert!(last.appended.is_empty());
        assert!(last.completed);

        assert_eq!(frames, vec!["H", "Hi"]);
        assert_eq!(writer.status(), RevealStatus::Complete);
    }

    #[test]
    fn waits_for_a_full_interval() {
        let mut writer = Typewriter::new("Hi", INTERVAL);
        assert!(writer.tick(Duration::from_millis(25)).appended.is_empty());
        assert_eq!(writer.tick(Duration::from_millis(25)).appended, vec!['H']);
        assert_eq!(writer.visible(), "H");
    }

    #[test]
    fn long_frame_catches_up_without_skipping() {
        let mut writer = Typewriter::new("Hey", INTERVAL);
        let step = writer.tick(Duration::from_millis(100));
        assert_eq!(step.appended, vec!['H', 'e']);

        let step = writer.tick(Duration::from_millis(200));
        assert_eq!(step.appended, vec!['y']);
        assert!(step.completed);
    }

    #[test]
    fn completion_is_reported_once() {
        let mut writer = Typewriter::new("", INTERVAL);
        assert!(writer.tick(INTERVAL).completed);
        assert!(!writer.tick(INTERVAL).completed);
        assert!(!writer.is_revealing());
    }

    #[test]
    fn handles_multibyte_characters() {
        let mut writer = Typewriter::new("a💕", INTERVAL);
        writer.tick(INTERVAL);
        assert_eq!(writer.tick(INTERVAL).appended, vec!['💕']);
        assert_eq!(writer.visible(), "a💕");
    }

    #[test]
    fn cancel_freezes_the_reveal() {
        let mut writer = Typewriter::new("Hello", INTERVAL);
        writer.tick(INTERVAL);
        writer.cancel();

        let step = writer.tick(Duration::from_secs(1));
        assert_eq!(step, RevealTick::default());
        assert_eq!(writer.visible(), "H");
        assert_eq!(writer.status(), RevealStatus::Cancelled);
    }
}
