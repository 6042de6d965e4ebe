use std::collections::HashSet;

use super::GameStore;
use super::model::Direction;

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    fn new(msg: impl Into<String>) -> Self {
        ValidationError {
            message: msg.into(),
        }
    }
}

/// Referential checks run after a store file is parsed. Returns every
/// problem found rather than stopping at the first.
pub fn validate_store(store: &GameStore) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = Vec::new();

    let mut room_ids: HashSet<u32> = HashSet::new();
    for room in &store.rooms {
        if !room_ids.insert(room.id) {
            errors.push(ValidationError::new(format!(
                "duplicate room id {}",
                room.id
            )));
        }
    }

    // Neighbor links must resolve to known rooms
    for room in &store.rooms {
        for dir in [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ] {
            if let Some(target) = room.neighbor(dir) {
                if !room_ids.contains(&target) {
                    errors.push(ValidationError::new(format!(
                        "room {} '{}' links {} to missing room {}",
                        room.id,
                        room.name,
                        dir.label(),
                        target
                    )));
                }
            }
        }
    }

    let mut player_ids: HashSet<u32> = HashSet::new();
    for player in &store.players {
        if !player_ids.insert(player.id) {
            errors.push(ValidationError::new(format!(
                "duplicate player id {}",
                player.id
            )));
        }

        if let Some(room_id) = player.room {
            if !room_ids.contains(&room_id) {
                errors.push(ValidationError::new(format!(
                    "player {} '{}' placed in missing room {}",
                    player.id, player.name, room_id
                )));
            }
        }

        let mut ability_ids: HashSet<u32> = HashSet::new();
        for ability in &player.abilities {
            if !ability_ids.insert(ability.id) {
                errors.push(ValidationError::new(format!(
                    "player {} '{}' has duplicate ability id {}",
                    player.id, player.name, ability.id
                )));
            }
        }
    }

    let mut monster_ids: HashSet<u32> = HashSet::new();
    for monster in &store.monsters {
        if !monster_ids.insert(monster.id) {
            errors.push(ValidationError::new(format!(
                "duplicate monster id {}",
                monster.id
            )));
        }
    }

    errors
}
