//! Room definitions

use crate::core::types::{ExitId, RoomId};

#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub description: String,
    pub exits: Vec<ExitId>,
}
