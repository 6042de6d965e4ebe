mod loader;
pub mod model;
mod validator;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use model::{Equipment, Monster, Player, Room};

pub use loader::{load_store_from_file, load_store_from_str, seed_store};
pub use validator::{ValidationError, validate_store};

/// Failures from the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(#[from] io::Error),

    #[error("invalid store data: {0}")]
    InvalidData(String),

    #[error("constraint violation: {0}")]
    Constraint(String),
}

/// File-backed record store. All reads and writes go through the owning
/// thread; `save` rewrites the whole backing file.
#[derive(Debug)]
pub struct GameStore {
    /// Backing file. `None` means in-memory only and `save` is a no-op.
    path: Option<PathBuf>,
    pub rooms: Vec<Room>,
    pub players: Vec<Player>,
    pub monsters: Vec<Monster>,
}

impl GameStore {
    pub fn in_memory() -> Self {
        GameStore {
            path: None,
            rooms: Vec::new(),
            players: Vec::new(),
            monsters: Vec::new(),
        }
    }

    pub fn with_path(path: PathBuf) -> Self {
        GameStore {
            path: Some(path),
            ..GameStore::in_memory()
        }
    }

    pub fn room(&self, id: u32) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn room_mut(&mut self, id: u32) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| r.id == id)
    }

    pub fn player(&self, id: u32) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: u32) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn monster(&self, id: u32) -> Option<&Monster> {
        self.monsters.iter().find(|m| m.id == id)
    }

    pub fn monster_mut(&mut self, id: u32) -> Option<&mut Monster> {
        self.monsters.iter_mut().find(|m| m.id == id)
    }

    /// Players currently standing in the given room.
    pub fn players_in_room(&self, room_id: u32) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| p.room == Some(room_id))
            .collect()
    }

    /// Create an unconnected room and return its assigned id.
    pub fn add_room(&mut self, name: impl Into<String>, description: impl Into<String>) -> u32 {
        let id = next_id(self.rooms.iter().map(|r| r.id));
        self.rooms.push(Room {
            id,
            name: name.into(),
            description: description.into(),
            north: None,
            south: None,
            east: None,
            west: None,
        });
        id
    }

    /// Create a player record and return its assigned id.
    pub fn add_player(&mut self, name: impl Into<String>, health: i32, experience: i32) -> u32 {
        let id = next_id(self.players.iter().map(|p| p.id));
        self.players.push(Player {
            id,
            name: name.into(),
            health,
            experience,
            abilities: Vec::new(),
            inventory: Vec::new(),
            equipment: None,
            room: None,
        });
        id
    }

    /// Remove a player record. Returns false if the id is unknown.
    pub fn remove_player(&mut self, id: u32) -> bool {
        let before = self.players.len();
        self.players.retain(|p| p.id != id);
        self.players.len() != before
    }

    /// Next ability id, unique across every player's ability list.
    pub fn next_ability_id(&self) -> u32 {
        next_id(
            self.players
                .iter()
                .flat_map(|p| p.abilities.iter().map(|a| a.id)),
        )
    }

    /// Persist the whole store back to its file. Duplicate ids are rejected
    /// before anything touches disk.
    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(err) = validator::validate_store(self)
            .iter()
            .find(|e| e.message.starts_with("duplicate"))
        {
            return Err(StoreError::Constraint(err.message.clone()));
        }

        let Some(path) = &self.path else {
            return Ok(());
        };

        let text = loader::store_to_string(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}

fn next_id(ids: impl Iterator<Item = u32>) -> u32 {
    ids.max().unwrap_or(0) + 1
}

impl Player {
    /// Move an inventory item into the weapon slot. Returns false if the
    /// item is not in this player's inventory.
    pub fn equip_from_inventory(&mut self, item_id: u32) -> bool {
        let Some(item) = self.inventory.iter().find(|i| i.id == item_id) else {
            return false;
        };
        let item = item.clone();
        self.equipment.get_or_insert_with(Equipment::default).weapon = Some(item);
        true
    }
}
