// ABOUTME: Motivational message banks and the selection strategy used to pick from them
// ABOUTME: Ten fixed messages per trigger, chosen uniformly at random in production
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ONPER

//! Motivational messages
//!
//! Each [`TriggerType`] owns a fixed bank of ten messages. Selection goes
//! through the [`MessageSelector`] trait so services can swap the uniform
//! random picker for a deterministic one.

use std::sync::Mutex;

use onper_core::models::TriggerType;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Messages sent after a completed session
pub const COMPLETED_MESSAGES: [&str; 10] = [
    "Yesterday you were ahead of 99% of people — today just beat yourself.",
    "Every mile you run is a step closer to the 1%.",
    "Champions are made when no one is watching. You showed up today.",
    "Your future self is thanking you for this run.",
    "The hardest step is out the door. You nailed it.",
    "Progress isn't always fast, but it's always forward. Keep going.",
    "You didn't come this far to only come this far.",
    "Today you proved that excuses don't run marathons.",
    "Excellence is a habit. You just practiced it.",
    "The distance between dreams and reality is called action. You took it.",
];

/// Messages sent after a missed session
pub const MISSED_MESSAGES: [&str; 10] = [
    "A single step forward is still progress. Let's start again.",
    "Missing one workout doesn't break you. Not coming back does.",
    "The comeback is always stronger than the setback.",
    "Your goals are waiting. They haven't gone anywhere.",
    "Every champion has faced a setback. What matters is the bounce back.",
    "Today is a new opportunity to become who you want to be.",
    "The path to the 1% isn't straight. Get back on it.",
    "You're not starting over, you're starting with experience.",
    "Discipline is choosing between what you want now and what you want most.",
    "The only workout you regret is the one you didn't do. Let's change that.",
];

/// Messages sent when a milestone is reached
pub const MILESTONE_MESSAGES: [&str; 10] = [
    "You've just crossed a major milestone! The 1% is getting closer.",
    "Look how far you've come! Most people never even start.",
    "This is what dedication looks like. You're inspiring.",
    "Milestone unlocked! Your consistency is building something incredible.",
    "You're not just running, you're rewriting your limits.",
    "This achievement puts you ahead of 99% of people who only dream.",
    "Every milestone is proof that your goals aren't just dreams.",
    "You've earned this moment. Celebrate it, then keep pushing.",
    "The difference between ordinary and extraordinary is you, right now.",
    "Your progress is the definition of commitment. Keep this energy.",
];

/// Messages sent as a daily reminder
pub const REMINDER_MESSAGES: [&str; 10] = [
    "Your running shoes are waiting. Your future self will thank you.",
    "The 1% is built one run at a time. Today is your time.",
    "Champions don't wait for motivation. They create it. Let's go.",
    "Your training plan is waiting. Consistency builds legends.",
    "Every run brings you closer to your goal. Don't let today slip.",
    "The hardest part is starting. Everything else is momentum.",
    "Your body is capable of amazing things. Prove it today.",
    "Comfort zone is where dreams go to die. Step out and run.",
    "You committed to this journey. Honor that commitment today.",
    "Time passes anyway. Make it count with a run.",
];

/// Message bank for a trigger
#[must_use]
pub const fn messages_for(trigger: TriggerType) -> &'static [&'static str] {
    match trigger {
        TriggerType::Completed => &COMPLETED_MESSAGES,
        TriggerType::Missed => &MISSED_MESSAGES,
        TriggerType::Milestone => &MILESTONE_MESSAGES,
        TriggerType::Reminder => &REMINDER_MESSAGES,
    }
}

/// Pick one message from the trigger's bank using the given RNG
pub fn pick_message<R: Rng + ?Sized>(trigger: TriggerType, rng: &mut R) -> &'static str {
    let bank = messages_for(trigger);
    // Banks are non-empty constants
    bank.choose(rng).copied().unwrap_or(bank[0])
}

/// Strategy for choosing a message
pub trait MessageSelector: Send + Sync {
    /// Choose a message for the trigger
    fn select(&self, trigger: TriggerType) -> &'static str;
}

/// Uniform random selection from the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomMessageSelector;

impl MessageSelector for RandomMessageSelector {
    fn select(&self, trigger: TriggerType) -> &'static str {
        pick_message(trigger, &mut rand::thread_rng())
    }
}

/// Reproducible selection from a seeded RNG
#[derive(Debug)]
pub struct SeededMessageSelector {
    rng: Mutex<StdRng>,
}

impl SeededMessageSelector {
    /// Create a selector whose sequence is fixed by `seed`
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl MessageSelector for SeededMessageSelector {
    fn select(&self, trigger: TriggerType) -> &'static str {
        match self.rng.lock() {
            Ok(mut rng) => pick_message(trigger, &mut *rng),
            Err(poisoned) => pick_message(trigger, &mut *poisoned.into_inner()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_every_bank_has_ten_distinct_messages() {
        for trigger in TriggerType::ALL {
            let bank = messages_for(trigger);
            assert_eq!(bank.len(), 10);
            let mut sorted = bank.to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), 10, "{trigger} has duplicates");
        }
    }

    #[test]
    fn test_pick_message_stays_in_bank() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..200 {
            let message = pick_message(TriggerType::Missed, &mut rng);
            assert!(MISSED_MESSAGES.contains(&message));
        }
    }

    #[test]
    fn test_pick_message_reaches_every_entry() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1_000 {
            seen.insert(pick_message(TriggerType::Completed, &mut rng));
        }
        assert_eq!(seen.len(), COMPLETED_MESSAGES.len());
    }

    #[test]
    fn test_seeded_selector_is_reproducible() {
        let first = SeededMessageSelector::new(9);
        let second = SeededMessageSelector::new(9);
        for trigger in TriggerType::ALL {
            assert_eq!(first.select(trigger), second.select(trigger));
        }
    }
}
