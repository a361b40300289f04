//! Input line tokenization
//!
//! Verbs and stance tokens are case-sensitive; object names are matched
//! case-insensitively later, by the world search. Stance tokens are kept
//! raw here so the executor can report the exact offending spelling.

/// A tokenized input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `attack <target> <stance> [<stance> ...]`
    Attack {
        target: Option<String>,
        stances: Vec<String>,
    },
    /// `defend [<stance> ...]` / `defend none` (alias: `block`)
    Defend { stances: Vec<String> },
    /// `rules` (aliases: `rps`, `combat`)
    Rules,
    /// `guard <item-or-exit>` - relayed to a controlled NPC
    Guard { target: Option<String> },
    Get { name: String },
    Drop { name: String },
    Go { name: String },
    Look,
    Help { topic: Option<String> },
    Quit,
    /// Verb not recognized at all
    Unknown { verb: String },
    /// Blank line
    Empty,
}

/// Tokenize one input line
pub fn parse_line(line: &str) -> Command {
    let mut tokens = line.split_whitespace();
    let verb = match tokens.next() {
        Some(v) => v,
        None => return Command::Empty,
    };
    let rest: Vec<String> = tokens.map(str::to_string).collect();

    match verb {
        "attack" => Command::Attack {
            target: rest.first().cloned(),
            stances: rest.into_iter().skip(1).collect(),
        },
        "defend" | "block" => Command::Defend { stances: rest },
        "rps" | "combat" | "rules" => Command::Rules,
        "guard" => Command::Guard {
            target: if rest.is_empty() {
                None
            } else {
                Some(rest.join(" "))
            },
        },
        "get" => Command::Get {
            name: rest.join(" "),
        },
        "drop" => Command::Drop {
            name: rest.join(" "),
        },
        "go" => Command::Go {
            name: rest.join(" "),
        },
        "look" | "l" => Command::Look,
        "help" => Command::Help {
            topic: rest.first().cloned(),
        },
        "quit" | "q" => Command::Quit,
        _ => Command::Unknown {
            verb: verb.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attack_splits_target_and_stances() {
        assert_eq!(
            parse_line("attack robin scissors rock"),
            Command::Attack {
                target: Some("robin".into()),
                stances: vec!["scissors".into(), "rock".into()],
            }
        );
    }

    #[test]
    fn test_attack_with_no_stances() {
        assert_eq!(
            parse_line("attack robin"),
            Command::Attack {
                target: Some("robin".into()),
                stances: vec![],
            }
        );
    }

    #[test]
    fn test_block_is_defend() {
        assert_eq!(
            parse_line("block Spock"),
            Command::Defend {
                stances: vec!["Spock".into()]
            }
        );
    }

    #[test]
    fn test_rules_aliases() {
        assert_eq!(parse_line("rps"), Command::Rules);
        assert_eq!(parse_line("combat"), Command::Rules);
        assert_eq!(parse_line("rules"), Command::Rules);
    }

    #[test]
    fn test_multiword_names_stay_joined() {
        assert_eq!(
            parse_line("get practice dagger"),
            Command::Get {
                name: "practice dagger".into()
            }
        );
        assert_eq!(
            parse_line("guard vault door"),
            Command::Guard {
                target: Some("vault door".into())
            }
        );
    }

    #[test]
    fn test_verbs_are_case_sensitive() {
        assert_eq!(
            parse_line("Attack robin rock"),
            Command::Unknown {
                verb: "Attack".into()
            }
        );
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(parse_line("   "), Command::Empty);
    }
}
