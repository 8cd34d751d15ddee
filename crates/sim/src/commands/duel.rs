//! Run seeded battles between two roster actors and report aggregates.

use anyhow::{Result, bail};
use clap::Parser;
use combat_content::ActorLoader;
use combat_core::ActionExecutionFlow;
use console::style;

use crate::battle::{DuelStats, FIRST_ID, OUTCOMES, SECOND_ID, Victor, run_battle};
use crate::content::ContentArgs;

/// Run N seeded battles between two roster actors
#[derive(Parser)]
pub struct Duel {
    /// Roster key of the first actor
    #[arg(value_name = "ATTACKER")]
    attacker: String,

    /// Roster key of the second actor
    #[arg(value_name = "DEFENDER")]
    defender: String,

    /// Base seed; the same seed replays the same battles
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Number of battles to run
    #[arg(short, long, default_value_t = 100)]
    battles: u64,

    /// Turn limit per battle before it is called a draw
    #[arg(long, default_value_t = 500)]
    max_turns: u32,

    #[command(flatten)]
    content: ContentArgs,
}

impl Duel {
    pub fn execute(self) -> Result<()> {
        if self.battles == 0 {
            bail!("--battles must be at least 1");
        }

        let content = self.content.load()?;
        let first =
            ActorLoader::spawn(&content.roster, &self.attacker, FIRST_ID, &content.catalog)?;
        let second =
            ActorLoader::spawn(&content.roster, &self.defender, SECOND_ID, &content.catalog)?;
        let flow = ActionExecutionFlow::new(&content.config);

        tracing::info!(
            first = %first.name,
            second = %second.name,
            seed = self.seed,
            battles = self.battles,
            "starting duel"
        );

        let mut stats = DuelStats::default();
        for index in 0..self.battles {
            let report = run_battle(
                &flow,
                &first,
                &second,
                self.seed,
                index,
                self.max_turns,
                &mut stats,
            );
            stats.record(report);
        }

        print_summary(&first.name, &second.name, &stats);
        Ok(())
    }
}

fn print_summary(first: &str, second: &str, stats: &DuelStats) {
    println!(
        "{}",
        style(format!("{first} vs {second}: {} battles", stats.battles)).bold()
    );
    println!();

    println!("{}", style("Win rates").cyan().bold());
    println!("  {:<14} {:>6.1}%", first, stats.win_rate(Victor::First) * 100.0);
    println!("  {:<14} {:>6.1}%", second, stats.win_rate(Victor::Second) * 100.0);
    println!("  {:<14} {:>6.1}%", "draw", stats.win_rate(Victor::Draw) * 100.0);
    println!();

    println!("{}", style("Turns").cyan().bold());
    println!("  average        {:>7.2}", stats.average_turns());
    println!("  suppressed     {:>7}", stats.suppressed_turns);
    println!();

    println!("{}", style("Outcomes").cyan().bold());
    for outcome in OUTCOMES {
        println!(
            "  {:<14} {:>6.1}%",
            format!("{outcome:?}"),
            stats.outcome_share(outcome) * 100.0
        );
    }
    println!("  combo rolls    {:>7}", stats.combo_hits);
    println!();

    println!("{}", style("Damage").cyan().bold());
    println!("  per hit        {:>7.2}", stats.average_damage_per_hit());
    println!("  strikes landed {:>7}", stats.landed_hits);
}
