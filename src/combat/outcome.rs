//! Combat outcome resolution
//!
//! A fixed lookup table, no modifiers. Each stance beats exactly two
//! others; the verb describes the victory and appears verbatim in room
//! messages, so the strings here are load-bearing.

use crate::combat::stance::Stance;

/// The beats relation: (winner, loser, verb), in authored order.
const BEATS: [(Stance, Stance, &str); 10] = [
    (Stance::Rock, Stance::Scissors, "blunts"),
    (Stance::Rock, Stance::Lizard, "crushes"),
    (Stance::Paper, Stance::Rock, "covers"),
    (Stance::Paper, Stance::Spock, "disproves"),
    (Stance::Scissors, Stance::Paper, "cuts"),
    (Stance::Scissors, Stance::Lizard, "decapitates"),
    (Stance::Lizard, Stance::Paper, "eats"),
    (Stance::Lizard, Stance::Spock, "poisons"),
    (Stance::Spock, Stance::Scissors, "disassembles"),
    (Stance::Spock, Stance::Rock, "vaporizes"),
];

/// Returns the victory verb if `a` beats `b`
pub fn beats(a: Stance, b: Stance) -> Option<&'static str> {
    BEATS
        .iter()
        .find(|(winner, loser, _)| *winner == a && *loser == b)
        .map(|(_, _, verb)| *verb)
}

/// Result of matching an attack stance against a defense stance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    AttackerWins(&'static str),
    DefenderWins(&'static str),
    Tie,
}

/// Resolve a single attack stance against the defender's current stance
pub fn resolve(attack: Stance, defense: Stance) -> Outcome {
    if let Some(verb) = beats(attack, defense) {
        Outcome::AttackerWins(verb)
    } else if let Some(verb) = beats(defense, attack) {
        Outcome::DefenderWins(verb)
    } else {
        Outcome::Tie
    }
}

/// The `<attacker> <verb> <defender>` lines for the rules command
pub fn rules_lines() -> Vec<String> {
    BEATS
        .iter()
        .map(|(winner, loser, verb)| format!("{} {} {}", winner, verb, loser))
        .collect()
}
