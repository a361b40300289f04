//! Wombat Arena - entry point
//!
//! Loads a scenario, binds stdin to one player actor, and runs the
//! synchronous command loop: one line in, one command executed, every
//! visible message printed.

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use wombat_arena::command::{parse_line, Command, CommandExecutor};
use wombat_arena::core::error::{ArenaError, Result};
use wombat_arena::core::types::ActorId;
use wombat_arena::world::loader::{load_world, DEFAULT_WORLD};
use wombat_arena::world::{Outbox, World};

#[derive(Parser, Debug)]
#[command(name = "wombat-arena", about = "Text combat settled by rock-paper-scissors-lizard-Spock")]
struct Args {
    /// Path to a scenario TOML (defaults to the built-in arena)
    #[arg(long)]
    world: Option<PathBuf>,

    /// Name of the player actor to control
    #[arg(long, default_value = "wanderer")]
    player: String,

    /// Tracing filter
    #[arg(long, default_value = "wombat_arena=warn")]
    log_filter: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(args.log_filter.as_str())
        .init();

    let text = match &args.world {
        Some(path) => std::fs::read_to_string(path)?,
        None => DEFAULT_WORLD.to_string(),
    };
    let mut world = load_world(&text)?;
    let player = world
        .find_player(&args.player)
        .ok_or_else(|| ArenaError::NoSuchPlayer(args.player.clone()))?;

    println!("=== WOMBAT ARENA ===");
    println!("Fights are settled by rock-paper-scissors-lizard-Spock.");
    println!("Pick up a weapon to unlock combat. Type \"help\" for commands.");
    println!();

    let first_look = CommandExecutor::execute(&mut world, player, &Command::Look);
    render(&world, player, &first_look);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        let command = parse_line(line.trim());
        if command == Command::Quit {
            println!("Goodbye.");
            break;
        }

        let outbox = CommandExecutor::execute(&mut world, player, &command);
        render(&world, player, &outbox);
    }

    Ok(())
}

/// Print the messages this player can see from where they now stand
fn render(world: &World, player: ActorId, outbox: &Outbox) {
    let room = match world.actor(player) {
        Some(actor) => actor.room,
        None => return,
    };
    for text in outbox.texts_for(player, room) {
        println!("{}", text);
    }
}
