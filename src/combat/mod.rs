pub mod outcome;
pub mod stance;
pub mod state;

pub use outcome::{beats, resolve, rules_lines, Outcome};
pub use stance::Stance;
pub use state::DefenseState;
