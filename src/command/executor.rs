//! Command execution - applies parsed commands to the world
//!
//! Combat commands are conferred by a held weapon and the guard command
//! by a controlled NPC in the room; without the conferring object the
//! verb is rejected exactly like one that does not exist. Validation
//! failures never mutate state.

use crate::combat::{resolve, rules_lines, DefenseState, Outcome, Stance};
use crate::command::parser::Command;
use crate::core::types::{ActorId, ExitId, ItemId, RoomId};
use crate::world::{AccessRule, GuardTarget, ItemLocation, Outbox, Thing, World};

/// Applies one command for one actor, synchronously
pub struct CommandExecutor;

impl CommandExecutor {
    /// Execute a command, returning every message it produced
    pub fn execute(world: &mut World, caller: ActorId, command: &Command) -> Outbox {
        let mut outbox = Outbox::new();
        let room = match world.actor(caller) {
            Some(actor) => {
                tracing::debug!(caller = %actor.name, ?command, "executing command");
                actor.room
            }
            None => return outbox,
        };

        match command {
            Command::Attack { target, stances } => {
                if first_weapon(world, caller).is_some() {
                    attack(world, &mut outbox, caller, room, target.as_deref(), stances);
                } else {
                    reject_unknown(&mut outbox, caller);
                }
            }
            Command::Defend { stances } => {
                if first_weapon(world, caller).is_some() {
                    defend(world, &mut outbox, caller, room, stances);
                } else {
                    reject_unknown(&mut outbox, caller);
                }
            }
            Command::Rules => {
                if first_weapon(world, caller).is_some() {
                    rules(&mut outbox, caller);
                } else {
                    reject_unknown(&mut outbox, caller);
                }
            }
            Command::Guard { target } => match controlled_npc(world, caller, room) {
                Some(npc) => guard(world, &mut outbox, caller, npc, target.as_deref()),
                None => reject_unknown(&mut outbox, caller),
            },
            Command::Get { name } => get(world, &mut outbox, caller, room, name),
            Command::Drop { name } => drop_cmd(world, &mut outbox, caller, name),
            Command::Go { name } => go(world, &mut outbox, caller, room, name),
            Command::Look => look(world, &mut outbox, caller, room),
            Command::Help { topic } => help(&mut outbox, caller, topic.as_deref()),
            Command::Quit | Command::Empty => {}
            Command::Unknown { .. } => reject_unknown(&mut outbox, caller),
        }
        outbox
    }
}

// --- availability -------------------------------------------------------

/// First weapon in the actor's inventory; the item that confers the
/// combat commands and gets recorded by `defend`.
fn first_weapon(world: &World, actor: ActorId) -> Option<ItemId> {
    world
        .actor(actor)?
        .inventory
        .iter()
        .copied()
        .find(|id| world.item(*id).map(|i| i.is_weapon()).unwrap_or(false))
}

/// The co-located NPC that accepts this caller's orders, if any
fn controlled_npc(world: &World, caller: ActorId, room: RoomId) -> Option<ActorId> {
    world
        .actors_in(room)
        .find(|a| {
            a.npc
                .as_ref()
                .map(|n| n.controller == caller)
                .unwrap_or(false)
        })
        .map(|a| a.id)
}

fn reject_unknown(outbox: &mut Outbox, caller: ActorId) {
    outbox.to_actor(caller, "Huh? Type \"help\" for a list of commands.");
}

// --- small lookups ------------------------------------------------------

fn actor_name(world: &World, id: ActorId) -> String {
    world
        .actor(id)
        .map(|a| a.name.clone())
        .unwrap_or_else(|| "someone".to_string())
}

fn item_name(world: &World, id: ItemId) -> String {
    world
        .item(id)
        .map(|i| i.name.clone())
        .unwrap_or_else(|| "something".to_string())
}

fn fumble(world: &World, outbox: &mut Outbox, caller: ActorId, room: RoomId) {
    outbox.to_room(
        room,
        &[caller],
        format!("{} fumbles with their weapon", actor_name(world, caller)),
    );
}

// --- defend -------------------------------------------------------------

fn defend(world: &mut World, outbox: &mut Outbox, caller: ActorId, room: RoomId, tokens: &[String]) {
    let clearing = tokens.len() == 1 && tokens[0] == "none";
    if clearing {
        world.clear_defense(caller);
    }
    if tokens.is_empty() || clearing {
        match world.defense(caller) {
            Some(state) => outbox.to_actor(
                caller,
                format!("Your defensive status is: {}", state.describe()),
            ),
            None => outbox.to_actor(caller, "You are not in a defensive stance at present"),
        }
        return;
    }

    let mut stances = Vec::with_capacity(tokens.len());
    for token in tokens {
        match token.parse::<Stance>() {
            Ok(stance) => stances.push(stance),
            Err(_) => {
                outbox.to_actor(
                    caller,
                    "Usage: defend <stance> [<stance>...]\nTry 'combat' for more information",
                );
                return;
            }
        }
    }

    let weapon = match first_weapon(world, caller) {
        Some(weapon) => weapon,
        None => return, // unreachable: the verb is gated on a held weapon
    };
    let weapon_name = item_name(world, weapon);
    world.set_defense(caller, DefenseState::new(stances, weapon));
    outbox.to_actor(caller, "You adopt a defensive stance.");
    outbox.to_room(
        room,
        &[caller],
        format!(
            "{} waves their {} around threateningly",
            actor_name(world, caller),
            weapon_name
        ),
    );
}

// --- attack -------------------------------------------------------------

fn attack(
    world: &mut World,
    outbox: &mut Outbox,
    caller: ActorId,
    room: RoomId,
    target: Option<&str>,
    tokens: &[String],
) {
    let caller_name = actor_name(world, caller);

    let target = match target {
        Some(target) if !tokens.is_empty() => target,
        _ => {
            outbox.to_actor(caller, "Attack whom, and how? Try typing \"help attack\"");
            fumble(world, outbox, caller, room);
            return;
        }
    };

    if world.defense(caller).is_none() {
        outbox.to_actor(
            caller,
            "You must first be defending before you can attack! Try \"help defend\"",
        );
        fumble(world, outbox, caller, room);
        return;
    }

    let mut attacks = Vec::with_capacity(tokens.len());
    let mut invalid: Vec<&str> = Vec::new();
    for token in tokens {
        match token.parse::<Stance>() {
            Ok(stance) => attacks.push(stance),
            Err(_) => {
                if !invalid.contains(&token.as_str()) {
                    invalid.push(token);
                }
            }
        }
    }
    if !invalid.is_empty() {
        outbox.to_actor(
            caller,
            format!("These are not attacks ({})! Try \"rules\"", invalid.join(", ")),
        );
        fumble(world, outbox, caller, room);
        return;
    }

    let thing = match world.search(caller, target) {
        Some(thing) => thing,
        None => {
            outbox.to_actor(caller, format!("You don't see \"{}\" here.", target));
            return;
        }
    };
    if thing == Thing::Actor(caller) {
        outbox.to_actor(caller, "Why would you do that?");
        fumble(world, outbox, caller, room);
        return;
    }

    let target_name = world
        .thing_name(thing)
        .unwrap_or("something")
        .to_string();
    let defender = match thing {
        Thing::Actor(id) if world.defense(id).is_some() => id,
        _ => {
            outbox.to_actor(caller, format!("{} is defenseless, you cad!", target_name));
            outbox.to_room(
                room,
                &[caller],
                format!(
                    "{} waves their weapon at {} threateningly",
                    caller_name, target_name
                ),
            );
            return;
        }
    };

    for attack in attacks {
        // Read the stance meeting this attack, then rotate for the next
        // one; the rotation happens whether or not this attack decides.
        let defense = match world.defense_mut(defender) {
            Some(state) => {
                let current = state.current();
                state.advance();
                current
            }
            None => break,
        };

        match resolve(attack, defense) {
            Outcome::AttackerWins(verb) => {
                outbox.to_actor(
                    caller,
                    format!("Your {} {} {}'s {}!", attack, verb, target_name, defense),
                );
                outbox.to_room(
                    room,
                    &[caller],
                    format!(
                        "{}'s {} {} {}'s {}!",
                        caller_name, attack, verb, target_name, defense
                    ),
                );
                apply_defeat(world, outbox, defender, caller);
                return;
            }
            Outcome::DefenderWins(verb) => {
                outbox.to_room(
                    room,
                    &[],
                    format!(
                        "{}'s {} {} {}'s {}!",
                        target_name, defense, verb, caller_name, attack
                    ),
                );
                apply_defeat(world, outbox, caller, defender);
                return;
            }
            Outcome::Tie => {
                outbox.to_room(
                    room,
                    &[],
                    format!("{} attacks {} but neither prevails!", caller_name, target_name),
                );
            }
        }
    }
}

/// Defeat consequence. NPCs have the defeat capability: they announce
/// their loss and the victory is recorded. Anyone else is forced to drop
/// the exact weapon their defense was recorded with.
fn apply_defeat(world: &mut World, outbox: &mut Outbox, loser: ActorId, victor: ActorId) {
    let (loser_name, room, is_npc) = match world.actor(loser) {
        Some(actor) => (actor.name.clone(), actor.room, actor.is_npc()),
        None => return,
    };

    if is_npc {
        let cry = world
            .actor(loser)
            .and_then(|a| a.npc.as_ref())
            .and_then(|n| n.defeat_cry.clone())
            .unwrap_or_else(|| "Lo, I am defeated!".to_string());
        outbox.to_room(room, &[], format!("{} says: \"{}\"", loser_name, cry));
        world.record_defeat(victor, loser);
        tracing::info!(
            victor = %actor_name(world, victor),
            npc = %loser_name,
            "defeat recorded"
        );
    } else if let Some(state) = world.defense(loser) {
        let weapon = state.weapon;
        drop_held_item(world, outbox, loser, weapon);
    }
}

// --- rules --------------------------------------------------------------

fn rules(outbox: &mut Outbox, caller: ActorId) {
    outbox.to_actor(caller, "These are the rules of combat:");
    for line in rules_lines() {
        outbox.to_actor(caller, format!("  {}", line));
    }
}

// --- guard --------------------------------------------------------------

fn guard(
    world: &mut World,
    outbox: &mut Outbox,
    caller: ActorId,
    npc: ActorId,
    target: Option<&str>,
) {
    let target = match target {
        Some(target) => target,
        None => {
            outbox.to_actor(caller, "Guard what? Try typing \"help guard\".");
            return;
        }
    };

    let thing = match world.search(npc, target) {
        Some(thing) => thing,
        None => {
            outbox.to_actor(caller, "I don't see that here?");
            return;
        }
    };

    let owner = match thing {
        Thing::Item(id) => world.item(id).and_then(|i| i.owner),
        Thing::Exit(id) => world.exit(id).and_then(|e| e.owner),
        Thing::Actor(_) => None,
    };
    if owner != Some(caller) {
        outbox.to_actor(caller, "That isn't yours to guard!");
        return;
    }

    let guarded = match thing {
        Thing::Exit(id) => {
            if world.exit(id).map(|e| e.traverse.is_open()).unwrap_or(false) {
                if let Some(exit) = world.exit_mut(id) {
                    exit.traverse = AccessRule::RequiresDefeatOf(npc);
                }
                set_guarding(world, npc, GuardTarget::Exit(id));
                true
            } else {
                false
            }
        }
        Thing::Item(id) => {
            if world.item(id).map(|i| i.get.is_open()).unwrap_or(false) {
                if let Some(item) = world.item_mut(id) {
                    item.get = AccessRule::RequiresDefeatOf(npc);
                }
                set_guarding(world, npc, GuardTarget::Item(id));
                true
            } else {
                false
            }
        }
        Thing::Actor(_) => false,
    };

    if guarded {
        tracing::info!(
            npc = %actor_name(world, npc),
            target = %world.thing_name(thing).unwrap_or("?"),
            "guard lock placed"
        );
    } else {
        outbox.to_actor(
            caller,
            "I don't know how to guard that. Maybe it's already guarded?",
        );
    }
}

fn set_guarding(world: &mut World, npc: ActorId, target: GuardTarget) {
    if let Some(actor) = world.actor_mut(npc) {
        if let Some(behavior) = actor.npc.as_mut() {
            behavior.guarding = Some(target);
        }
    }
}

// --- get / drop / go / look ---------------------------------------------

fn get(world: &mut World, outbox: &mut Outbox, caller: ActorId, room: RoomId, name: &str) {
    if name.is_empty() {
        outbox.to_actor(caller, "Get what?");
        return;
    }
    let thing = match world.search(caller, name) {
        Some(thing) => thing,
        None => {
            outbox.to_actor(caller, format!("You don't see \"{}\" here.", name));
            return;
        }
    };
    match thing {
        Thing::Actor(id) => {
            let name = actor_name(world, id);
            outbox.to_actor(
                caller,
                format!("You can't pick {} up. You aren't their type.", name),
            );
        }
        Thing::Exit(_) => outbox.to_actor(caller, "You can't pick that up."),
        Thing::Item(id) => {
            let item = match world.item(id) {
                Some(item) => item,
                None => return,
            };
            if item.location == ItemLocation::Held(caller) {
                outbox.to_actor(caller, "You already have that.");
                return;
            }
            match item.get {
                AccessRule::Open => {}
                AccessRule::Never => {
                    let refusal = item
                        .get_err_msg
                        .clone()
                        .unwrap_or_else(|| "You can't get that.".to_string());
                    outbox.to_actor(caller, refusal);
                    return;
                }
                AccessRule::RequiresDefeatOf(npc) => {
                    if !world.has_defeated(caller, npc) {
                        outbox.to_actor(
                            caller,
                            format!(
                                "{} bars your way. Defeat them first.",
                                actor_name(world, npc)
                            ),
                        );
                        return;
                    }
                }
            }
            let taken = item.name.clone();
            world.move_item(id, ItemLocation::Held(caller));
            outbox.to_actor(caller, format!("You pick up {}.", taken));
            outbox.to_room(
                room,
                &[caller],
                format!("{} picks up {}.", actor_name(world, caller), taken),
            );
        }
    }
}

fn drop_cmd(world: &mut World, outbox: &mut Outbox, caller: ActorId, name: &str) {
    if name.is_empty() {
        outbox.to_actor(caller, "Drop what?");
        return;
    }
    match carried_by_name(world, caller, name) {
        Some(item) => drop_held_item(world, outbox, caller, item),
        None => outbox.to_actor(caller, "You aren't carrying that."),
    }
}

/// Drop a held item onto the holder's room floor. Used by the drop
/// command and by forced drops on combat loss; weapon-loss cleanup
/// happens inside `move_item` either way.
fn drop_held_item(world: &mut World, outbox: &mut Outbox, actor: ActorId, item: ItemId) {
    let room = match world.actor(actor) {
        Some(actor) => actor.room,
        None => return,
    };
    let dropped = item_name(world, item);
    world.move_item(item, ItemLocation::Room(room));
    outbox.to_actor(actor, format!("You drop {}.", dropped));
    outbox.to_room(
        room,
        &[actor],
        format!("{} drops {}.", actor_name(world, actor), dropped),
    );
}

/// Exit name match within one room: exact first, then prefix
fn exit_by_name(world: &World, room: RoomId, name: &str) -> Option<ExitId> {
    let room = world.room(room)?;
    let wanted = name.to_ascii_lowercase();
    let mut prefix = None;
    for id in &room.exits {
        if let Some(exit) = world.exit(*id) {
            if exit.name.eq_ignore_ascii_case(name) {
                return Some(*id);
            }
            if prefix.is_none() && exit.name.to_ascii_lowercase().starts_with(&wanted) {
                prefix = Some(*id);
            }
        }
    }
    prefix
}

/// Inventory-only name match: exact first, then prefix
fn carried_by_name(world: &World, caller: ActorId, name: &str) -> Option<ItemId> {
    let actor = world.actor(caller)?;
    let carried: Vec<(&str, ItemId)> = actor
        .inventory
        .iter()
        .filter_map(|id| world.item(*id).map(|i| (i.name.as_str(), *id)))
        .collect();
    let wanted = name.to_ascii_lowercase();
    carried
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .or_else(|| {
            carried
                .iter()
                .find(|(n, _)| n.to_ascii_lowercase().starts_with(&wanted))
        })
        .map(|(_, id)| *id)
}

fn go(world: &mut World, outbox: &mut Outbox, caller: ActorId, room: RoomId, name: &str) {
    if name.is_empty() {
        outbox.to_actor(caller, "Go where?");
        return;
    }
    let exit_id = match exit_by_name(world, room, name) {
        Some(id) => id,
        None => {
            outbox.to_actor(caller, "You can't go that way.");
            return;
        }
    };
    let (traverse, to, through) = match world.exit(exit_id) {
        Some(exit) => (exit.traverse, exit.to, exit.name.clone()),
        None => return,
    };

    match traverse {
        AccessRule::Open => {}
        AccessRule::Never => {
            outbox.to_actor(caller, "You can't go that way.");
            return;
        }
        AccessRule::RequiresDefeatOf(npc) => {
            if !world.has_defeated(caller, npc) {
                outbox.to_actor(
                    caller,
                    format!("{} blocks your path. Defeat them first.", actor_name(world, npc)),
                );
                return;
            }
        }
    }

    let caller_name = actor_name(world, caller);
    outbox.to_room(
        room,
        &[caller],
        format!("{} leaves through {}.", caller_name, through),
    );
    world.move_actor(caller, to);
    outbox.to_room(to, &[caller], format!("{} arrives.", caller_name));
    look(world, outbox, caller, to);
}

fn look(world: &World, outbox: &mut Outbox, caller: ActorId, room_id: RoomId) {
    let room = match world.room(room_id) {
        Some(room) => room,
        None => return,
    };
    let mut text = room.name.clone();
    if !room.description.is_empty() {
        text.push('\n');
        text.push_str(&room.description);
    }

    let mut exits: Vec<&str> = room
        .exits
        .iter()
        .filter_map(|id| world.exit(*id))
        .map(|e| e.name.as_str())
        .collect();
    exits.sort_unstable();
    text.push_str("\nExits: ");
    if exits.is_empty() {
        text.push_str("none");
    } else {
        text.push_str(&exits.join(", "));
    }

    let mut floor: Vec<&str> = world.items_in(room_id).map(|i| i.name.as_str()).collect();
    floor.sort_unstable();
    if !floor.is_empty() {
        text.push_str("\nYou see: ");
        text.push_str(&floor.join(", "));
    }

    let mut others: Vec<&str> = world
        .actors_in(room_id)
        .filter(|a| a.id != caller)
        .map(|a| a.name.as_str())
        .collect();
    others.sort_unstable();
    if !others.is_empty() {
        text.push_str("\nAlso here: ");
        text.push_str(&others.join(", "));
    }

    outbox.to_actor(caller, text);
}

// --- help ---------------------------------------------------------------

fn help(outbox: &mut Outbox, caller: ActorId, topic: Option<&str>) {
    let lines: &[&str] = match topic {
        None => &[
            "Commands: attack, defend, rules, guard, get, drop, go, look, help, quit",
            "Combat commands need a weapon in hand. Try \"help <command>\".",
        ],
        Some("attack") => &[
            "Usage: attack <target> <stance> [<stance>...]",
            "Attack another combatant with your weapon.",
            "Try typing \"rules\" to learn more about stances.",
        ],
        Some("defend") | Some("block") => &[
            "Usage: defend <stance> [<stance>...]",
            "  defend         -- shows your current stances",
            "  defend Spock   -- sets a defensive stance of \"Spock\"",
            "  defend none    -- stop defending",
        ],
        Some("rules") | Some("rps") | Some("combat") => {
            &["Prints the outcome table of combat, one line per matchup."]
        }
        Some("guard") => &[
            "Usage: guard <item or exit>",
            "Asks an NPC you control to guard something that is currently open.",
        ],
        Some("get") => &["Usage: get <item>"],
        Some("drop") => &["Usage: drop <item>"],
        Some("go") => &["Usage: go <exit>"],
        Some("look") => &["Shows the room you are standing in."],
        Some("quit") => &["Leaves the arena."],
        Some(other) => {
            outbox.to_actor(caller, format!("No help available for \"{}\".", other));
            return;
        }
    };
    for line in lines {
        outbox.to_actor(caller, *line);
    }
}
