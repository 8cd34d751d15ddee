//! Turn resolution.
//!
//! [`ActionExecutionFlow::execute`] is the single entry point that turns an
//! actor, a target, and dice into a resolved result:
//!
//! 1. suppression: defeated, stunned, or silenced actors do nothing
//! 2. selection: forced action, or the configured [`ActionSelector`]
//! 3. roll: pre-supplied natural value or a fresh die, then modifiers
//! 4. classification against the actor's thresholds and the action's overrides,
//!    then the actor's critical chance for a roll that already hits
//! 5. damage (multi-hit) or healing when the roll lands
//! 6. follow-ups: buffs, penalties, self-damage
//! 7. status effects whose trigger conditions hold
//! 8. combo transition and cooldown
//!
//! The flow is the only writer to either actor during a call.

use crate::action::{ActionDefinition, ActionType, TargetShape};
use crate::combat::combo::{advance_combo, combo_amplifier};
use crate::combat::multi_hit::take_damage;
use crate::combat::{
    CombatEvent, ComboTransition, DamageModifiers, EffectApplication, MultiHitOutcome,
    MultiHitProcessor, RollModifier, RollOutcome, RollResult, StatusEffectRegistry,
    ThresholdManager, evaluate_conditions,
};
use crate::config::CombatConfig;
use crate::env::{ActionSelector, ComboSelector, RandomSource, SelectedAction};
use crate::state::{ActorState, StatusEffectKind};

/// Caller-supplied inputs for one resolution.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TurnRequest {
    /// Skips selection.
    pub forced_action: Option<SelectedAction>,
    /// Natural die value to use instead of rolling.
    pub base_roll: Option<u32>,
}

impl TurnRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_action(mut self, action: SelectedAction) -> Self {
        self.forced_action = Some(action);
        self
    }

    pub fn with_roll(mut self, natural: u32) -> Self {
        self.base_roll = Some(natural);
        self
    }
}

/// Why a resolution did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Suppression {
    ActorDefeated,
    Stunned,
    Silenced,
    /// The selector found nothing usable.
    NoAction,
    /// A hostile action against a target that is already down.
    TargetDefeated,
}

/// Everything one resolution produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExecutionResult {
    pub action: Option<SelectedAction>,
    pub roll: Option<RollResult>,
    pub is_combo: bool,
    pub is_critical: bool,
    /// Damage dealt to the target across all strikes.
    pub damage: u32,
    pub healing: u32,
    /// Damage the actor dealt to itself (self-damage percent, `SelfAndTarget`).
    pub self_damage: u32,
    pub events: Vec<CombatEvent>,
    pub effects: Vec<EffectApplication>,
    pub combo: ComboTransition,
    pub target_defeated: bool,
    pub suppressed: Option<Suppression>,
}

impl ExecutionResult {
    fn suppressed(reason: Suppression) -> Self {
        Self {
            suppressed: Some(reason),
            ..Self::default()
        }
    }

    /// Whether the roll landed.
    pub fn landed(&self) -> bool {
        self.roll.is_some_and(|r| r.outcome.lands())
    }
}

/// Orchestrates one action resolution.
pub struct ActionExecutionFlow<'a, S = ComboSelector> {
    config: &'a CombatConfig,
    registry: StatusEffectRegistry<'a>,
    selector: S,
}

impl<'a> ActionExecutionFlow<'a, ComboSelector> {
    pub fn new(config: &'a CombatConfig) -> Self {
        Self {
            config,
            registry: StatusEffectRegistry::new(&config.effects),
            selector: ComboSelector,
        }
    }
}

impl<'a, S: ActionSelector> ActionExecutionFlow<'a, S> {
    pub fn with_selector<T: ActionSelector>(self, selector: T) -> ActionExecutionFlow<'a, T> {
        ActionExecutionFlow {
            config: self.config,
            registry: self.registry,
            selector,
        }
    }

    pub fn config(&self) -> &CombatConfig {
        self.config
    }

    /// Registry access for custom effect handlers.
    pub fn registry_mut(&mut self) -> &mut StatusEffectRegistry<'a> {
        &mut self.registry
    }

    /// Resolves one action by `actor` against `target`.
    pub fn execute(
        &self,
        actor: &mut ActorState,
        target: &mut ActorState,
        dice: &mut (impl RandomSource + ?Sized),
        request: TurnRequest,
    ) -> ExecutionResult {
        if let Some(reason) = self.suppression(actor) {
            tracing::debug!(actor = %actor.name, ?reason, "turn suppressed");
            return ExecutionResult::suppressed(reason);
        }

        let Some(selected) = request
            .forced_action
            .or_else(|| self.selector.select(actor))
        else {
            tracing::debug!(actor = %actor.name, "no usable action");
            return ExecutionResult::suppressed(Suppression::NoAction);
        };
        let action = selected.action.clone();

        if is_hostile(&action) && target.is_defeated() {
            return ExecutionResult::suppressed(Suppression::TargetDefeated);
        }

        // ===== roll and classify =====
        let sides = self.config.die_sides();
        let natural = match request.base_roll {
            Some(value) => value.clamp(1, sides),
            None => dice.roll_die(sides),
        };
        let thresholds = ThresholdManager::new(&self.config.thresholds)
            .effective(actor)
            .with_action_overrides(&action.roll_mods);
        let modified = RollModifier::new(self.config).modify(natural, actor, &action, dice);
        let guaranteed =
            natural > thresholds.critical_miss && guaranteed_critical(natural, &action);
        let roll = RollResult::resolve(modified, &thresholds, guaranteed);
        let roll = if lucky_critical(roll.outcome, actor, dice) {
            roll.promote_critical()
        } else {
            roll
        };

        tracing::debug!(
            actor = %actor.name,
            action = %action.name,
            natural,
            explosion = roll.explosion,
            modifier = roll.modifier,
            total = roll.total,
            outcome = ?roll.outcome,
            is_combo = roll.is_combo,
            is_critical = roll.is_critical,
            "roll resolved"
        );

        let mut result = ExecutionResult {
            roll: Some(roll),
            is_combo: roll.is_combo,
            is_critical: roll.is_critical,
            ..ExecutionResult::default()
        };

        // ===== damage / healing =====
        let (actor_id, target_id) = (actor.id, target.id);
        let event = |strike: u32, damage: u32| CombatEvent {
            actor: actor_id,
            target: target_id,
            action: action.name.clone(),
            natural_roll: natural,
            roll_total: roll.total,
            outcome: roll.outcome,
            is_combo: roll.is_combo,
            is_critical: roll.is_critical,
            strike,
            damage,
        };
        let mut events = Vec::new();
        let mut strikes = MultiHitOutcome::default();
        if roll.outcome.lands() {
            if is_hostile(&action) && action.action_type.deals_damage() {
                let modifiers = DamageModifiers::neutral()
                    .with_combo_amplifier(combo_amplifier(actor, &self.config.combo))
                    .critical(self.config, roll.is_critical);
                strikes = MultiHitProcessor::new(self.config)
                    .process(actor, target, &action, modifiers);
            } else if action.action_type == ActionType::Heal {
                result.healing = actor.health.heal(action.heal_amount);
            }
        }
        events.extend(strikes.strikes.iter().map(|s| event(s.index, s.damage)));
        if events.is_empty() {
            events.push(event(0, 0));
        }
        result.damage = strikes.total_damage;
        result.self_damage = strikes.strikes.iter().map(|s| s.self_damage + s.reflected).sum();
        result.target_defeated = strikes.target_defeated || target.is_defeated();

        // ===== follow-ups =====
        if roll.outcome.lands() {
            if let Some(buff) = action.self_buff {
                actor.modifiers.grant_roll_bonus(buff);
            }
            if let Some(penalty) = action.target_roll_penalty.filter(|_| is_hostile(&action)) {
                target.modifiers.impose_roll_penalty(penalty);
            }
            if action.self_damage_percent > 0 && result.damage > 0 {
                let recoil = (u64::from(result.damage) * u64::from(action.self_damage_percent)
                    / 100) as u32;
                take_damage(actor, recoil);
                result.self_damage = result.self_damage.saturating_add(recoil);
            }
        }

        // ===== status effects =====
        if let Some(last) = events.last() {
            for trigger in &action.effects {
                let fires = if trigger.conditions.is_empty() {
                    last.lands()
                } else {
                    evaluate_conditions(&trigger.conditions, last, actor, target, &action)
                };
                if !fires {
                    continue;
                }
                let recipient = if lands_on_actor(&action, trigger.effect) {
                    &mut *actor
                } else {
                    &mut *target
                };
                let applied = self
                    .registry
                    .apply(trigger.effect, recipient, trigger.stacks, &action);
                result.effects.push(applied);
            }
        }

        // ===== combo and cooldown =====
        result.combo = advance_combo(
            actor,
            selected.instance,
            &action,
            roll.outcome,
            &self.config.combo,
        );
        if let Some(id) = selected.instance.filter(|_| action.cooldown > 0) {
            actor.pool.start_cooldown(id, action.cooldown);
        }

        tracing::debug!(
            actor = %actor.name,
            action = %action.name,
            damage = result.damage,
            healing = result.healing,
            effects = result.effects.len(),
            combo = ?result.combo,
            target_defeated = result.target_defeated,
            "action resolved"
        );

        result.events = events;
        result.action = Some(selected);
        result
    }

    fn suppression(&self, actor: &ActorState) -> Option<Suppression> {
        if actor.is_defeated() {
            Some(Suppression::ActorDefeated)
        } else if actor.status.is_active(StatusEffectKind::Stun) {
            Some(Suppression::Stunned)
        } else if actor.status.is_active(StatusEffectKind::Silence) {
            Some(Suppression::Silenced)
        } else {
            None
        }
    }
}

/// The action guarantees a critical on this natural value.
fn guaranteed_critical(natural: u32, action: &ActionDefinition) -> bool {
    action
        .roll_mods
        .critical_on_natural_at_most
        .is_some_and(|at_most| natural <= at_most)
}

/// Rolls the actor's critical chance for a plain or combo hit.
///
/// Misses and rolls already classified critical never touch the d100.
fn lucky_critical(
    outcome: RollOutcome,
    actor: &ActorState,
    dice: &mut (impl RandomSource + ?Sized),
) -> bool {
    if !matches!(outcome, RollOutcome::Hit | RollOutcome::ComboHit) {
        return false;
    }
    let chance = actor.equipment.critical_chance.min(100);
    chance > 0 && dice.roll_d100() <= chance
}

impl<S> std::fmt::Debug for ActionExecutionFlow<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionExecutionFlow")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// Actions aimed at the opponent.
fn is_hostile(action: &ActionDefinition) -> bool {
    action.target != TargetShape::SelfOnly
        && !matches!(action.action_type, ActionType::Heal | ActionType::Buff)
}

/// Harmful effects land on the opponent, beneficial ones on the actor; a
/// self-only action keeps everything on the actor.
fn lands_on_actor(action: &ActionDefinition, effect: StatusEffectKind) -> bool {
    !is_hostile(action) || !effect.is_harmful()
}
