use thiserror::Error;

/// Infrastructure faults. Command validation failures are not errors;
/// they surface as ordinary messages from the executor.
#[derive(Error, Debug)]
pub enum ArenaError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("world file error: {0}")]
    WorldParse(#[from] toml::de::Error),

    #[error("world file references unknown room: {0}")]
    UnknownRoom(String),

    #[error("world file references unknown item: {0}")]
    UnknownItem(String),

    #[error("world file references unknown actor: {0}")]
    UnknownActor(String),

    #[error("item {0} must have exactly one of room/holder")]
    AmbiguousItemLocation(String),

    #[error("unknown stance in world file: {0}")]
    UnknownStance(String),

    #[error("NPC {0} has an empty defense list")]
    EmptyDefense(String),

    #[error("NPC {0} defends but holds no weapon")]
    DefenseWithoutWeapon(String),

    #[error("NPC {0} has no controller")]
    NpcWithoutController(String),

    #[error("no playable actor named {0}")]
    NoSuchPlayer(String),
}

pub type Result<T> = std::result::Result<T, ArenaError>;
