//! Combat system integration tests
//!
//! Drives the real command pipeline (parse -> execute) against a small
//! in-memory arena and checks messages and state transitions end-to-end.

use wombat_arena::combat::Stance;
use wombat_arena::command::{parse_line, CommandExecutor};
use wombat_arena::core::types::{ActorId, ItemId, RoomId};
use wombat_arena::world::{ItemKind, ItemLocation, Outbox, World};

struct Arena {
    world: World,
    room: RoomId,
    robin: ActorId,
    miki: ActorId,
    dagger: ItemId,
    sword: ItemId,
}

/// Two armed combatants in one room
fn arena() -> Arena {
    let mut world = World::new();
    let room = world.add_room("Training Hall".into(), String::new());
    let robin = world.add_actor("Robin".into(), room, None);
    let miki = world.add_actor("Miki".into(), room, None);
    let dagger = world.add_item("dagger".into(), ItemKind::Weapon, ItemLocation::Held(robin));
    let sword = world.add_item("sword".into(), ItemKind::Weapon, ItemLocation::Held(miki));
    Arena {
        world,
        room,
        robin,
        miki,
        dagger,
        sword,
    }
}

fn run(world: &mut World, actor: ActorId, line: &str) -> Outbox {
    CommandExecutor::execute(world, actor, &parse_line(line))
}

fn first_text(outbox: &Outbox, actor: ActorId, room: RoomId) -> String {
    outbox
        .texts_for(actor, room)
        .first()
        .map(|s| s.to_string())
        .unwrap_or_default()
}

#[test]
fn test_rock_blunts_scissors() {
    let mut a = arena();
    run(&mut a.world, a.miki, "defend scissors");
    run(&mut a.world, a.robin, "defend rock");

    let outbox = run(&mut a.world, a.robin, "attack Miki rock");

    let robin_sees = outbox.texts_for(a.robin, a.room);
    assert_eq!(robin_sees[0], "Your rock blunts Miki's scissors!");
    let miki_sees = outbox.texts_for(a.miki, a.room);
    assert!(miki_sees.contains(&"Robin's rock blunts Miki's scissors!"));
}

#[test]
fn test_paper_disproves_spock() {
    let mut a = arena();
    run(&mut a.world, a.miki, "defend Spock");
    run(&mut a.world, a.robin, "defend rock");

    let outbox = run(&mut a.world, a.robin, "attack Miki paper");

    assert_eq!(
        first_text(&outbox, a.robin, a.room),
        "Your paper disproves Miki's Spock!"
    );
}

#[test]
fn test_lizard_versus_lizard_ties_without_state_change() {
    let mut a = arena();
    run(&mut a.world, a.miki, "defend lizard");
    run(&mut a.world, a.robin, "defend lizard");

    let outbox = run(&mut a.world, a.robin, "attack Miki lizard");
    assert_eq!(
        first_text(&outbox, a.miki, a.room),
        "Robin attacks Miki but neither prevails!"
    );

    // Both sides still defending, nobody dropped anything.
    assert!(a.world.defense(a.robin).is_some());
    assert!(a.world.defense(a.miki).is_some());

    // And the tie is repeatable.
    let outbox = run(&mut a.world, a.robin, "attack Miki lizard");
    assert_eq!(
        first_text(&outbox, a.miki, a.room),
        "Robin attacks Miki but neither prevails!"
    );
}

#[test]
fn test_defender_win_forces_attacker_to_drop() {
    let mut a = arena();
    run(&mut a.world, a.miki, "defend paper");
    run(&mut a.world, a.robin, "defend Spock");

    // rock attacks into paper: paper covers rock, Robin loses.
    let outbox = run(&mut a.world, a.robin, "attack Miki rock");

    let texts = outbox.texts_for(a.miki, a.room);
    assert!(texts.contains(&"Miki's paper covers Robin's rock!"));
    assert!(texts.contains(&"Robin drops dagger."));

    assert!(a.world.defense(a.robin).is_none());
    assert_eq!(
        a.world.item(a.dagger).unwrap().location,
        ItemLocation::Room(a.room)
    );
    // The winner keeps everything.
    assert!(a.world.defense(a.miki).is_some());
}

#[test]
fn test_attacker_win_forces_defender_to_drop() {
    let mut a = arena();
    run(&mut a.world, a.miki, "defend scissors");
    run(&mut a.world, a.robin, "defend rock");

    run(&mut a.world, a.robin, "attack Miki rock");

    assert!(a.world.defense(a.miki).is_none());
    assert_eq!(
        a.world.item(a.sword).unwrap().location,
        ItemLocation::Room(a.room)
    );
}

#[test]
fn test_attack_needs_target_and_stance() {
    let mut a = arena();
    run(&mut a.world, a.robin, "defend rock");

    let outbox = run(&mut a.world, a.robin, "attack Miki");
    assert_eq!(
        first_text(&outbox, a.robin, a.room),
        "Attack whom, and how? Try typing \"help attack\""
    );
    assert_eq!(
        first_text(&outbox, a.miki, a.room),
        "Robin fumbles with their weapon"
    );
}

#[test]
fn test_attack_requires_standing_defense() {
    let mut a = arena();
    run(&mut a.world, a.miki, "defend rock");

    let outbox = run(&mut a.world, a.robin, "attack Miki rock");
    assert_eq!(
        first_text(&outbox, a.robin, a.room),
        "You must first be defending before you can attack! Try \"help defend\""
    );
    // Nothing changed for anyone.
    assert!(a.world.defense(a.robin).is_none());
    assert_eq!(a.world.defense(a.miki).unwrap().current(), Stance::Rock);
}

#[test]
fn test_attack_rejects_unknown_stances() {
    let mut a = arena();
    run(&mut a.world, a.miki, "defend rock");
    run(&mut a.world, a.robin, "defend rock");

    let outbox = run(&mut a.world, a.robin, "attack Miki dynamite spock dynamite");
    assert_eq!(
        first_text(&outbox, a.robin, a.room),
        "These are not attacks (dynamite, spock)! Try \"rules\""
    );
    // The defender's rotation never ran.
    assert_eq!(a.world.defense(a.miki).unwrap().current(), Stance::Rock);
}

#[test]
fn test_attack_missing_target() {
    let mut a = arena();
    run(&mut a.world, a.robin, "defend rock");

    let outbox = run(&mut a.world, a.robin, "attack ghost rock");
    assert_eq!(
        first_text(&outbox, a.robin, a.room),
        "You don't see \"ghost\" here."
    );
}

#[test]
fn test_attacking_yourself_is_refused() {
    let mut a = arena();
    run(&mut a.world, a.robin, "defend rock");

    let outbox = run(&mut a.world, a.robin, "attack Robin rock");
    assert_eq!(first_text(&outbox, a.robin, a.room), "Why would you do that?");
    assert!(a.world.defense(a.robin).is_some());
}

#[test]
fn test_attacking_a_defenseless_target() {
    let mut a = arena();
    run(&mut a.world, a.robin, "defend rock");

    let outbox = run(&mut a.world, a.robin, "attack Miki rock");
    assert_eq!(
        first_text(&outbox, a.robin, a.room),
        "Miki is defenseless, you cad!"
    );
    assert_eq!(
        first_text(&outbox, a.miki, a.room),
        "Robin waves their weapon at Miki threateningly"
    );
}

#[test]
fn test_defense_rotates_round_robin_across_attacks() {
    let mut a = arena();
    run(&mut a.world, a.miki, "defend rock paper");
    run(&mut a.world, a.robin, "defend rock");

    // rock vs rock ties; Miki's list rotates to [paper, rock].
    run(&mut a.world, a.robin, "attack Miki rock");
    assert_eq!(
        a.world.defense(a.miki).unwrap().stances(),
        &[Stance::Paper, Stance::Rock]
    );

    // The second attack meets paper.
    let outbox = run(&mut a.world, a.robin, "attack Miki scissors");
    assert_eq!(
        first_text(&outbox, a.robin, a.room),
        "Your scissors cuts Miki's paper!"
    );
}

#[test]
fn test_multiple_attack_tokens_resolve_in_sequence() {
    let mut a = arena();
    run(&mut a.world, a.miki, "defend rock paper");
    run(&mut a.world, a.robin, "defend Spock");

    // First rock ties with rock and rotates; second rock meets paper and
    // loses, so Robin is disarmed by the second token.
    let outbox = run(&mut a.world, a.robin, "attack Miki rock rock");
    let texts = outbox.texts_for(a.miki, a.room);
    assert!(texts.contains(&"Robin attacks Miki but neither prevails!"));
    assert!(texts.contains(&"Miki's paper covers Robin's rock!"));
    assert!(a.world.defense(a.robin).is_none());
}

#[test]
fn test_sequence_stops_at_first_decisive_result() {
    let mut a = arena();
    run(&mut a.world, a.miki, "defend scissors scissors");
    run(&mut a.world, a.robin, "defend rock");

    // The first token already decides; the second must never resolve.
    let outbox = run(&mut a.world, a.robin, "attack Miki rock rock");
    let decisive = outbox
        .texts_for(a.miki, a.room)
        .iter()
        .filter(|t| t.contains("blunts"))
        .count();
    assert_eq!(decisive, 1);
}

#[test]
fn test_defend_reports_status() {
    let mut a = arena();

    let outbox = run(&mut a.world, a.robin, "defend");
    assert_eq!(
        first_text(&outbox, a.robin, a.room),
        "You are not in a defensive stance at present"
    );

    run(&mut a.world, a.robin, "defend rock paper");
    let outbox = run(&mut a.world, a.robin, "defend");
    assert_eq!(
        first_text(&outbox, a.robin, a.room),
        "Your defensive status is: rock, paper"
    );
}

#[test]
fn test_defend_none_clears_state() {
    let mut a = arena();
    run(&mut a.world, a.robin, "defend Spock");
    assert!(a.world.defense(a.robin).is_some());

    let outbox = run(&mut a.world, a.robin, "defend none");
    assert_eq!(
        first_text(&outbox, a.robin, a.room),
        "You are not in a defensive stance at present"
    );
    assert!(a.world.defense(a.robin).is_none());
}

#[test]
fn test_defend_rejects_unknown_stances() {
    let mut a = arena();
    run(&mut a.world, a.robin, "defend rock");

    let outbox = run(&mut a.world, a.robin, "defend rock dynamite");
    assert_eq!(
        first_text(&outbox, a.robin, a.room),
        "Usage: defend <stance> [<stance>...]\nTry 'combat' for more information"
    );
    // Old state survives a rejected defend.
    assert_eq!(a.world.defense(a.robin).unwrap().current(), Stance::Rock);
}

#[test]
fn test_defend_announces_to_bystanders() {
    let mut a = arena();
    let outbox = run(&mut a.world, a.robin, "defend lizard");

    assert_eq!(
        first_text(&outbox, a.robin, a.room),
        "You adopt a defensive stance."
    );
    assert_eq!(
        first_text(&outbox, a.miki, a.room),
        "Robin waves their dagger around threateningly"
    );
}

#[test]
fn test_block_is_an_alias_for_defend() {
    let mut a = arena();
    run(&mut a.world, a.robin, "block Spock");
    assert_eq!(a.world.defense(a.robin).unwrap().current(), Stance::Spock);
}

#[test]
fn test_rules_prints_the_whole_table() {
    let mut a = arena();
    let outbox = run(&mut a.world, a.robin, "rules");

    let texts = outbox.texts_for(a.robin, a.room);
    assert_eq!(texts[0], "These are the rules of combat:");
    assert_eq!(texts.len(), 11);
    assert!(texts.contains(&"  rock blunts scissors"));
    assert!(texts.contains(&"  Spock vaporizes rock"));
    // Bystanders hear nothing.
    assert!(outbox.texts_for(a.miki, a.room).is_empty());
}

#[test]
fn test_combat_commands_need_a_weapon() {
    let mut a = arena();
    // Robin is disarmed first.
    run(&mut a.world, a.robin, "drop dagger");

    for line in ["attack Miki rock", "defend rock", "rules"] {
        let outbox = run(&mut a.world, a.robin, line);
        assert_eq!(
            first_text(&outbox, a.robin, a.room),
            "Huh? Type \"help\" for a list of commands.",
            "{:?} should be unavailable without a weapon",
            line
        );
    }

    // Picking the dagger back up restores them.
    run(&mut a.world, a.robin, "get dagger");
    let outbox = run(&mut a.world, a.robin, "defend rock");
    assert_eq!(
        first_text(&outbox, a.robin, a.room),
        "You adopt a defensive stance."
    );
}

#[test]
fn test_dropping_the_recorded_weapon_stops_defending() {
    let mut a = arena();
    run(&mut a.world, a.robin, "defend Spock");
    assert!(a.world.defense(a.robin).is_some());

    run(&mut a.world, a.robin, "drop dagger");
    assert!(a.world.defense(a.robin).is_none());

    // A later status check goes through the no-weapon rejection instead.
    let outbox = run(&mut a.world, a.robin, "defend");
    assert_eq!(
        first_text(&outbox, a.robin, a.room),
        "Huh? Type \"help\" for a list of commands."
    );
}

#[test]
fn test_dropping_an_unrelated_item_keeps_defense() {
    let mut a = arena();
    a.world.add_item(
        "lucky coin".into(),
        ItemKind::Prop,
        ItemLocation::Held(a.robin),
    );
    run(&mut a.world, a.robin, "defend Spock");

    run(&mut a.world, a.robin, "drop lucky coin");
    assert!(a.world.defense(a.robin).is_some());
}

#[test]
fn test_attacking_a_prop_finds_it_defenseless() {
    let mut a = arena();
    a.world
        .add_item("anvil".into(), ItemKind::Prop, ItemLocation::Room(a.room));
    run(&mut a.world, a.robin, "defend rock");

    let outbox = run(&mut a.world, a.robin, "attack anvil rock");
    assert_eq!(
        first_text(&outbox, a.robin, a.room),
        "anvil is defenseless, you cad!"
    );
}
