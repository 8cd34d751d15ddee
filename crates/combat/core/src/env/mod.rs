//! Collaborators the rules consume but do not own.
//!
//! Dice, the action data source, and action selection are traits so callers
//! can swap in seeded, scripted, or data-backed implementations.
mod actions;
mod rng;
mod selector;

pub use actions::{ActionCatalog, ActionOracle};
pub use rng::{PcgDice, RandomSource, ScriptedDice, compute_seed};
pub use selector::{ActionSelector, ComboSelector, SelectedAction};
