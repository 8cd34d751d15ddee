//! Combo sequence membership and position.
//!
//! [`ComboSequence`] is the ordered list of pool instances an actor has slotted
//! into its combo, keyed by contiguous 1-based order values. [`ComboState`] is
//! where the actor currently stands in that sequence.

use crate::error::{CombatError, ErrorSeverity};
use crate::state::ActionInstanceId;

/// Rejected combo sequence edits.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ComboError {
    #[error("action '{name}' is not combo-eligible")]
    NotComboEligible { name: String },

    #[error("action instance {0} is already in the combo sequence")]
    AlreadyInSequence(ActionInstanceId),

    #[error("action instance {0} is not in the actor's pool")]
    UnknownInstance(ActionInstanceId),

    #[error("combo slot {slot} is outside the sequence (length {len})")]
    SlotOutOfRange { slot: u32, len: u32 },
}

impl CombatError for ComboError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotComboEligible { .. } => ErrorSeverity::Validation,
            Self::AlreadyInSequence(_) | Self::UnknownInstance(_) | Self::SlotOutOfRange { .. } => {
                ErrorSeverity::Recoverable
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotComboEligible { .. } => "COMBO_NOT_ELIGIBLE",
            Self::AlreadyInSequence(_) => "COMBO_ALREADY_IN_SEQUENCE",
            Self::UnknownInstance(_) => "COMBO_UNKNOWN_INSTANCE",
            Self::SlotOutOfRange { .. } => "COMBO_SLOT_OUT_OF_RANGE",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComboSlot {
    pub instance: ActionInstanceId,
    /// 1-based, contiguous within the sequence.
    pub order: u32,
}

/// Ordered combo slots.
///
/// Invariant: `slots[i].order == i + 1` after every public operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComboSequence {
    slots: Vec<ComboSlot>,
}

impl ComboSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an instance and returns its order.
    ///
    /// Eligibility is decided by the caller, which owns the definition.
    pub fn push(&mut self, instance: ActionInstanceId) -> Result<u32, ComboError> {
        if self.contains(instance) {
            return Err(ComboError::AlreadyInSequence(instance));
        }
        let order = self.len() + 1;
        self.slots.push(ComboSlot { instance, order });
        Ok(order)
    }

    /// Removes an instance; absent instances are a no-op returning `false`.
    pub fn remove(&mut self, instance: ActionInstanceId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|s| s.instance != instance);
        let removed = self.slots.len() != before;
        if removed {
            self.renumber();
        }
        removed
    }

    /// Exchanges the instances at two 1-based slots.
    pub fn swap(&mut self, a: u32, b: u32) -> Result<(), ComboError> {
        let len = self.len();
        for slot in [a, b] {
            if slot == 0 || slot > len {
                return Err(ComboError::SlotOutOfRange { slot, len });
            }
        }
        self.slots.swap((a - 1) as usize, (b - 1) as usize);
        self.renumber();
        Ok(())
    }

    pub fn contains(&self, instance: ActionInstanceId) -> bool {
        self.slots.iter().any(|s| s.instance == instance)
    }

    /// Order of an instance, if slotted.
    pub fn position_of(&self, instance: ActionInstanceId) -> Option<u32> {
        self.slots
            .iter()
            .find(|s| s.instance == instance)
            .map(|s| s.order)
    }

    /// Slot at a 1-based order.
    pub fn slot(&self, order: u32) -> Option<&ComboSlot> {
        order
            .checked_sub(1)
            .and_then(|i| self.slots.get(i as usize))
    }

    pub fn slots(&self) -> &[ComboSlot] {
        &self.slots
    }

    pub fn len(&self) -> u32 {
        self.slots.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn renumber(&mut self) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            slot.order = i as u32 + 1;
        }
    }
}

/// Phase of the combo state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComboPhase {
    Idle,
    /// Carries the number of consecutive combo actions landed.
    InSequence(u32),
}

/// Where an actor stands in its combo.
///
/// `step` counts consecutive combo actions landed (0 = idle) and drives the
/// damage amplifier; `next_slot` is the 1-based order the selector offers next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComboState {
    step: u32,
    next_slot: u32,
}

impl ComboState {
    pub const fn idle() -> Self {
        Self {
            step: 0,
            next_slot: 1,
        }
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn next_slot(&self) -> u32 {
        self.next_slot
    }

    pub fn phase(&self) -> ComboPhase {
        match self.step {
            0 => ComboPhase::Idle,
            k => ComboPhase::InSequence(k),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.step == 0
    }

    /// Records one more landed combo action and points at `next_slot`.
    pub fn advance_to(&mut self, next_slot: u32) {
        self.step = self.step.saturating_add(1);
        self.next_slot = next_slot.max(1);
    }

    pub fn reset(&mut self) {
        *self = Self::idle();
    }
}

impl Default for ComboState {
    fn default() -> Self {
        Self::idle()
    }
}
