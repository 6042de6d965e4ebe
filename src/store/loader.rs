use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::model::{Ability, Equipment, Item, Monster, Player, Room};
use super::validator::validate_store;
use super::{GameStore, StoreError};

////////////////////
/// TOML LAYOUT  ///
////////////////////

/// On-disk shape of a store file: `[[room]]`, `[[player]]` and
/// `[[monster]]` blocks.
#[derive(Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    room: Vec<Room>,
    #[serde(default)]
    player: Vec<Player>,
    #[serde(default)]
    monster: Vec<Monster>,
}

pub fn load_store_from_file(path: &Path) -> Result<GameStore, StoreError> {
    let raw = fs::read_to_string(path)?;
    let mut store = load_store_from_str(&raw)?;
    store.path = Some(path.to_path_buf());
    Ok(store)
}

pub fn load_store_from_str(raw: &str) -> Result<GameStore, StoreError> {
    let file: StoreFile =
        toml::from_str(raw).map_err(|e| StoreError::InvalidData(e.to_string()))?;

    let store = GameStore {
        path: None,
        rooms: file.room,
        players: file.player,
        monsters: file.monster,
    };

    let errors = validate_store(&store);
    if !errors.is_empty() {
        let joined = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<&str>>()
            .join("; ");
        return Err(StoreError::InvalidData(joined));
    }

    Ok(store)
}

pub(super) fn store_to_string(store: &GameStore) -> Result<String, StoreError> {
    let file = StoreFile {
        room: store.rooms.clone(),
        player: store.players.clone(),
        monster: store.monsters.clone(),
    };
    toml::to_string_pretty(&file).map_err(|e| StoreError::InvalidData(e.to_string()))
}

/// Starting records written on first run: a small connected room graph
/// (including one two-hop chain north of the hall), one armed player and
/// one goblin.
pub fn seed_store(path: &Path) -> Result<GameStore, StoreError> {
    let mut store = GameStore::with_path(path.to_path_buf());

    store.rooms = vec![
        Room {
            id: 1,
            name: "Hall".to_string(),
            description: "A drafty stone hall lit by guttering torches.".to_string(),
            north: Some(2),
            south: Some(3),
            east: Some(4),
            west: Some(5),
        },
        Room {
            id: 2,
            name: "Crypt".to_string(),
            description: "Rows of sealed sarcophagi line the walls.".to_string(),
            north: Some(6),
            south: Some(1),
            east: None,
            west: None,
        },
        Room {
            id: 3,
            name: "Cellar".to_string(),
            description: "Barrels of something long past drinkable.".to_string(),
            north: Some(1),
            south: None,
            east: None,
            west: None,
        },
        Room {
            id: 4,
            name: "Forge".to_string(),
            description: "A cold anvil and a scatter of broken tools.".to_string(),
            north: None,
            south: None,
            east: None,
            west: Some(1),
        },
        Room {
            id: 5,
            name: "Garden".to_string(),
            description: "Weeds have taken the old herb beds.".to_string(),
            north: None,
            south: None,
            east: Some(1),
            west: None,
        },
        Room {
            id: 6,
            name: "Tower".to_string(),
            description: "A spiral stair climbs into darkness.".to_string(),
            north: None,
            south: Some(2),
            east: None,
            west: None,
        },
    ];

    let sword = Item {
        id: 1,
        name: "Rusty Sword".to_string(),
        attack: 5,
    };

    store.players = vec![Player {
        id: 1,
        name: "Aldric".to_string(),
        health: 100,
        experience: 0,
        abilities: vec![Ability {
            id: 1,
            name: "Power Strike".to_string(),
            description: "A heavy overhead blow.".to_string(),
            kind: "attack".to_string(),
        }],
        inventory: vec![
            sword.clone(),
            Item {
                id: 2,
                name: "Oak Shield".to_string(),
                attack: 0,
            },
        ],
        equipment: Some(Equipment {
            weapon: Some(sword),
            armor: None,
        }),
        room: Some(1),
    }];

    store.monsters = vec![Monster {
        id: 1,
        name: "Grizzle".to_string(),
        health: 30,
        kind: "goblin".to_string(),
    }];

    store.save()?;
    Ok(store)
}
