//! Battle loop and aggregate statistics.
//!
//! The simulator owns turn order: the two actors alternate, the first mover
//! alternating between battles, and each actor's turn ends with a status tick.

use combat_core::{
    ActionExecutionFlow, ActorId, ActorState, PcgDice, RollOutcome, TurnRequest, compute_seed,
    tick_turn,
};

/// Which side won a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Victor {
    First,
    Second,
    /// Turn limit reached, or both went down on the same tick.
    Draw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BattleReport {
    pub victor: Victor,
    pub turns: u32,
}

/// Tallies across every battle of a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DuelStats {
    pub battles: u32,
    pub first_wins: u32,
    pub second_wins: u32,
    pub draws: u32,
    pub total_turns: u64,
    /// Indexed by [`outcome_index`].
    pub outcomes: [u64; 5],
    pub landed_hits: u64,
    pub hit_damage: u64,
    pub combo_hits: u64,
    pub suppressed_turns: u64,
}

pub const OUTCOMES: [RollOutcome; 5] = [
    RollOutcome::CriticalMiss,
    RollOutcome::Miss,
    RollOutcome::Hit,
    RollOutcome::ComboHit,
    RollOutcome::CriticalHit,
];

pub fn outcome_index(outcome: RollOutcome) -> usize {
    match outcome {
        RollOutcome::CriticalMiss => 0,
        RollOutcome::Miss => 1,
        RollOutcome::Hit => 2,
        RollOutcome::ComboHit => 3,
        RollOutcome::CriticalHit => 4,
    }
}

impl DuelStats {
    pub fn record(&mut self, report: BattleReport) {
        self.battles += 1;
        self.total_turns += u64::from(report.turns);
        match report.victor {
            Victor::First => self.first_wins += 1,
            Victor::Second => self.second_wins += 1,
            Victor::Draw => self.draws += 1,
        }
    }

    pub fn win_rate(&self, victor: Victor) -> f64 {
        let wins = match victor {
            Victor::First => self.first_wins,
            Victor::Second => self.second_wins,
            Victor::Draw => self.draws,
        };
        ratio(u64::from(wins), u64::from(self.battles))
    }

    pub fn average_turns(&self) -> f64 {
        ratio(self.total_turns, u64::from(self.battles))
    }

    pub fn average_damage_per_hit(&self) -> f64 {
        ratio(self.hit_damage, self.landed_hits)
    }

    pub fn rolls(&self) -> u64 {
        self.outcomes.iter().sum()
    }

    pub fn outcome_share(&self, outcome: RollOutcome) -> f64 {
        ratio(self.outcomes[outcome_index(outcome)], self.rolls())
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Runs one battle between fresh copies of `first` and `second`.
///
/// `battle_index` selects the dice stream and who moves first; the same
/// `(seed, battle_index)` always replays the same fight.
pub fn run_battle(
    flow: &ActionExecutionFlow<'_>,
    first: &ActorState,
    second: &ActorState,
    seed: u64,
    battle_index: u64,
    max_turns: u32,
    stats: &mut DuelStats,
) -> BattleReport {
    let mut dice = PcgDice::new(compute_seed(seed, battle_index, 0, 0));
    let mut fighters = [first.clone(), second.clone()];
    let mut mover = (battle_index % 2) as usize;
    let mut turns = 0;

    while turns < max_turns {
        turns += 1;
        let [a, b] = &mut fighters;
        let (actor, target) = if mover == 0 { (a, b) } else { (b, a) };

        let result = flow.execute(actor, target, &mut dice, TurnRequest::new());
        match result.roll {
            Some(roll) => {
                stats.outcomes[outcome_index(roll.outcome)] += 1;
                if roll.outcome.lands() && result.damage > 0 {
                    stats.landed_hits += result.events.len() as u64;
                    stats.hit_damage += u64::from(result.damage);
                }
                if result.is_combo {
                    stats.combo_hits += 1;
                }
            }
            None => stats.suppressed_turns += 1,
        }

        tick_turn(actor, &flow.config().effects);

        match (fighters[0].is_defeated(), fighters[1].is_defeated()) {
            (false, false) => mover = 1 - mover,
            (true, true) => return report(Victor::Draw, turns, battle_index),
            (false, true) => return report(Victor::First, turns, battle_index),
            (true, false) => return report(Victor::Second, turns, battle_index),
        }
    }

    report(Victor::Draw, turns, battle_index)
}

fn report(victor: Victor, turns: u32, battle_index: u64) -> BattleReport {
    tracing::debug!(battle = battle_index, ?victor, turns, "battle finished");
    BattleReport { victor, turns }
}

/// Fresh actor ids for the two sides.
pub const FIRST_ID: ActorId = ActorId(1);
pub const SECOND_ID: ActorId = ActorId(2);

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{ActionDefinition, ActionSource, Attributes, CombatConfig};

    fn fighter(id: ActorId, strength: i32, health: u32) -> ActorState {
        let mut actor = ActorState::new(id, "Fighter", Attributes::new(strength, 5, 5, 5), health);
        actor.grant_action(ActionSource::Default, ActionDefinition::attack("Basic Attack", 1.0));
        actor
    }

    #[test]
    fn same_seed_replays_the_same_battle() {
        let config = CombatConfig::default();
        let flow = ActionExecutionFlow::new(&config);
        let (a, b) = (fighter(FIRST_ID, 10, 50), fighter(SECOND_ID, 10, 50));

        let mut s1 = DuelStats::default();
        let mut s2 = DuelStats::default();
        let r1 = run_battle(&flow, &a, &b, 7, 3, 500, &mut s1);
        let r2 = run_battle(&flow, &a, &b, 7, 3, 500, &mut s2);

        assert_eq!(r1, r2);
        assert_eq!(s1, s2);
    }

    #[test]
    fn stronger_side_wins_most_battles() {
        let config = CombatConfig::default();
        let flow = ActionExecutionFlow::new(&config);
        let (strong, weak) = (fighter(FIRST_ID, 30, 80), fighter(SECOND_ID, 4, 20));

        let mut stats = DuelStats::default();
        for index in 0..20 {
            let report = run_battle(&flow, &strong, &weak, 11, index, 500, &mut stats);
            stats.record(report);
        }

        assert_eq!(stats.battles, 20);
        assert!(stats.win_rate(Victor::First) > 0.9);
        assert!(stats.rolls() > 0);
        assert!(stats.average_damage_per_hit() >= 1.0);
    }

    #[test]
    fn turn_limit_ends_in_a_draw() {
        let config = CombatConfig::default();
        let flow = ActionExecutionFlow::new(&config);
        let (a, b) = (fighter(FIRST_ID, 1, 10_000), fighter(SECOND_ID, 1, 10_000));

        let mut stats = DuelStats::default();
        let report = run_battle(&flow, &a, &b, 1, 0, 6, &mut stats);

        assert_eq!(report, BattleReport { victor: Victor::Draw, turns: 6 });
        assert_eq!(stats.rolls(), 6);
    }

    #[test]
    fn empty_stats_report_zero() {
        let stats = DuelStats::default();
        assert_eq!(stats.average_turns(), 0.0);
        assert_eq!(stats.outcome_share(RollOutcome::Hit), 0.0);
    }
}
