mod duel;
mod roster;

pub use duel::Duel;
pub use roster::Roster;
