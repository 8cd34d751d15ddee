//! Random sources for dice rolls.
//!
//! A [`RandomSource`] is the only source of nondeterminism in a resolution.
//! One generator is shared per battle so that a given seed always replays the
//! same sequence of rolls.

use std::collections::VecDeque;

/// Uniform integer generator consumed by roll, explosion, and chance checks.
pub trait RandomSource {
    /// Generate the next raw 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Roll a die with N sides (1-N inclusive).
    fn roll_die(&mut self, sides: u32) -> u32 {
        (self.next_u32() % sides.max(1)) + 1
    }

    /// Roll a d100 (1-100 inclusive).
    ///
    /// Used for percentage-based mechanics like critical chance.
    fn roll_d100(&mut self) -> u32 {
        self.roll_die(100)
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32() % range)
    }
}

/// Seeded PCG dice (PCG-XSH-RR: 32-bit output from 64-bit state).
///
/// # Properties
///
/// - **Deterministic**: Same seed always produces same sequence
/// - **Fast**: Single multiply + xorshift + rotate
/// - **Small state**: Only 64 bits
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcgDice {
    state: u64,
}

impl PcgDice {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Advance the LCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RandomSource for PcgDice {
    fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }
}

/// Replays a fixed sequence of die faces, then falls back to a constant.
///
/// `roll_die` returns each scripted value clamped to `1..=sides`, so a test can
/// say "the d20 shows 14, then the d100 shows 3" without reverse-engineering
/// generator output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptedDice {
    faces: VecDeque<u32>,
    fallback: u32,
}

impl ScriptedDice {
    pub fn new(faces: impl IntoIterator<Item = u32>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
            fallback: 1,
        }
    }

    /// Value returned once the script is exhausted.
    pub fn with_fallback(mut self, fallback: u32) -> Self {
        self.fallback = fallback;
        self
    }

    /// Faces not yet consumed.
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl RandomSource for ScriptedDice {
    fn next_u32(&mut self) -> u32 {
        self.faces.pop_front().unwrap_or(self.fallback)
    }

    fn roll_die(&mut self, sides: u32) -> u32 {
        self.next_u32().clamp(1, sides.max(1))
    }

    fn range(&mut self, min: u32, max: u32) -> u32 {
        self.next_u32().clamp(min, max.max(min))
    }
}

/// Compute a deterministic seed for one battle.
///
/// # Arguments
///
/// * `base_seed` - Seed chosen for the whole run (for replay)
/// * `battle_index` - Which battle in the run
/// * `actor_id` - Entity the stream belongs to (0 for a shared stream)
/// * `context` - Distinguishes independent streams within one battle
pub fn compute_seed(base_seed: u64, battle_index: u64, actor_id: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash style mixing
    let mut hash = base_seed;

    hash ^= battle_index.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_replays_same_rolls() {
        let mut a = PcgDice::new(42);
        let mut b = PcgDice::new(42);

        let rolls_a: Vec<u32> = (0..32).map(|_| a.roll_die(20)).collect();
        let rolls_b: Vec<u32> = (0..32).map(|_| b.roll_die(20)).collect();

        assert_eq!(rolls_a, rolls_b);
    }

    #[test]
    fn rolls_stay_on_the_die() {
        let mut dice = PcgDice::new(7);
        for _ in 0..1_000 {
            let roll = dice.roll_die(20);
            assert!((1..=20).contains(&roll), "roll {roll} off the die");
        }
    }

    #[test]
    fn different_battles_get_different_seeds() {
        assert_ne!(compute_seed(1, 0, 0, 0), compute_seed(1, 1, 0, 0));
        assert_ne!(compute_seed(1, 0, 0, 0), compute_seed(1, 0, 0, 1));
    }

    #[test]
    fn scripted_dice_replay_then_fall_back() {
        let mut dice = ScriptedDice::new([14, 25, 0]).with_fallback(10);

        assert_eq!(dice.roll_die(20), 14);
        assert_eq!(dice.roll_die(20), 20); // clamped to the die
        assert_eq!(dice.roll_die(20), 1); // clamped up
        assert_eq!(dice.remaining(), 0);
        assert_eq!(dice.roll_die(20), 10);
    }
}
