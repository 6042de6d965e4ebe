use serde::{Deserialize, Serialize};

///////////////////////////
/// PERSISTED RECORDS   ///
///////////////////////////

/// A room in the navigable world. Neighbor links are directed and may be
/// non-reciprocal; the graph may contain cycles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub north: Option<u32>,
    #[serde(default)]
    pub south: Option<u32>,
    #[serde(default)]
    pub east: Option<u32>,
    #[serde(default)]
    pub west: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub health: i32,
    #[serde(default)]
    pub experience: i32,
    #[serde(default)]
    pub abilities: Vec<Ability>,
    #[serde(default)]
    pub inventory: Vec<Item>,
    #[serde(default)]
    pub equipment: Option<Equipment>,
    /// Room the player currently occupies, if any.
    #[serde(default)]
    pub room: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ability {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Free-form type tag, e.g. "attack" or "buff".
    #[serde(default)]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub name: String,
    /// Damage dealt per hit when wielded as a weapon.
    #[serde(default)]
    pub attack: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(default)]
    pub weapon: Option<Item>,
    #[serde(default)]
    pub armor: Option<Item>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monster {
    pub id: u32,
    pub name: String,
    pub health: i32,
    #[serde(default)]
    pub kind: String,
}

///////////////////////////
/// COMBAT PARTICIPANTS ///
///////////////////////////

/// Anything that can be the target of an attack or ability: it has a name
/// and mutable health. Health is allowed to go negative.
pub trait Targetable {
    fn name(&self) -> &str;
    fn health(&self) -> i32;
    fn set_health(&mut self, value: i32);
}

impl Targetable for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn health(&self) -> i32 {
        self.health
    }

    fn set_health(&mut self, value: i32) {
        self.health = value;
    }
}

impl Targetable for Monster {
    fn name(&self) -> &str {
        &self.name
    }

    fn health(&self) -> i32 {
        self.health
    }

    fn set_health(&mut self, value: i32) {
        self.health = value;
    }
}

impl Player {
    /// The weapon currently equipped, if any.
    pub fn weapon(&self) -> Option<&Item> {
        self.equipment.as_ref().and_then(|e| e.weapon.as_ref())
    }
}

impl Room {
    pub fn neighbor(&self, direction: Direction) -> Option<u32> {
        match direction {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Parse a one-character direction token (n/s/e/w, case-insensitive).
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "n" => Some(Direction::North),
            "s" => Some(Direction::South),
            "e" => Some(Direction::East),
            "w" => Some(Direction::West),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
        }
    }
}
