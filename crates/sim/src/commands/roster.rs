//! List roster actors with their resolved kits.

use anyhow::Result;
use clap::Parser;
use combat_content::ActorLoader;
use combat_core::ActorId;
use console::style;

use crate::content::ContentArgs;

/// List roster actors and their action kits
#[derive(Parser)]
pub struct Roster {
    #[command(flatten)]
    content: ContentArgs,
}

impl Roster {
    pub fn execute(self) -> Result<()> {
        let content = self.content.load()?;

        for (index, (key, template)) in content.roster.iter().enumerate() {
            let id = ActorId(index as u32 + 1);
            let actor = ActorLoader::build(id, template, &content.catalog);
            let attrs = actor.attributes;

            println!(
                "{} {}",
                style(key).green().bold(),
                style(format!("({})", actor.name)).dim()
            );
            println!(
                "  hp {}  str {}  agi {}  tech {}  int {}",
                actor.health.max(),
                attrs.strength,
                attrs.agility,
                attrs.technique,
                attrs.intelligence
            );
            for entry in actor.pool.iter() {
                let slot = actor
                    .combo
                    .position_of(entry.id)
                    .map(|order| format!("combo {order}"))
                    .unwrap_or_default();
                println!(
                    "  {:<5} {:<16} {:<24} {}",
                    entry.id.to_string(),
                    entry.action.name,
                    format!("{:?}", entry.source),
                    slot
                );
            }
            println!();
        }

        println!(
            "{} actions available: {}",
            content.catalog.len(),
            content.catalog.names().join(", ")
        );
        Ok(())
    }
}
