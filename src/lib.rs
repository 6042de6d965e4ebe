pub mod engine;
pub mod store;

use engine::{NavContext, Output, map, player};
use store::{GameStore, StoreError};

pub use store::{load_store_from_file, load_store_from_str, seed_store};

/// Fixed delay between starting the game and the first action prompt.
pub const STARTUP_PAUSE_MS: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    MainMenu,
    InGame,
    Exited,
}

/// The pending input prompt. Multi-field flows advance one field per step,
/// carrying the fields collected so far.
#[derive(Debug)]
enum Prompt {
    MainMenu,
    GameMenu,
    CharacterMenu,
    AbilityMenu,
    RoomMenu,
    AddCharacterName,
    AddCharacterHealth {
        name: String,
    },
    AddCharacterExperience {
        name: String,
        health: i32,
    },
    UpdateCharacterId,
    UpdateCharacterName {
        id: u32,
    },
    UpdateCharacterHealth {
        id: u32,
        name: String,
    },
    UpdateCharacterExperience {
        id: u32,
        name: String,
        health: i32,
    },
    SearchCharacters,
    DeleteCharacter,
    EquipItem,
    GrantAbilityPlayer,
    GrantAbilityName {
        player_id: u32,
    },
    GrantAbilityDescription {
        player_id: u32,
        name: String,
    },
    GrantAbilityKind {
        player_id: u32,
        name: String,
        description: String,
    },
    ViewAbilitiesPlayer,
    MoveDirection,
    AddRoomName,
    AddRoomDescription {
        name: String,
    },
}

/// Top-level session: owns the store, the menu state machine and the
/// navigation context. `initialize` renders the main menu; `step` consumes
/// one input line and returns the resulting output plus a quit flag.
pub struct GameEngine {
    store: GameStore,
    state: EngineState,
    prompt: Prompt,
    nav: NavContext,
    player_id: Option<u32>,
    monster_id: Option<u32>,
}

impl GameEngine {
    pub fn new(store: GameStore) -> Self {
        GameEngine {
            store,
            state: EngineState::MainMenu,
            prompt: Prompt::MainMenu,
            nav: NavContext::new(),
            player_id: None,
            monster_id: None,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn store(&self) -> &GameStore {
        &self.store
    }

    pub fn initialize(&mut self) -> Output {
        let mut out = Output::new();
        out.say("Welcome to the RPG Game!");
        self.main_menu(&mut out);
        out
    }

    /// Process one line of input. A `StoreError` propagates unhandled; the
    /// quit flag signals an orderly return to the caller instead of exiting
    /// the process here.
    pub fn step(&mut self, input: &str) -> Result<(Output, bool), StoreError> {
        let input = input.trim();
        let mut out = Output::new();

        if self.state == EngineState::Exited {
            return Ok((out, true));
        }

        let prompt = std::mem::replace(&mut self.prompt, Prompt::GameMenu);
        match prompt {
            Prompt::MainMenu => match input {
                "1" => {
                    out.say("Starting game...");
                    self.setup_game(&mut out);
                    self.state = EngineState::InGame;
                    self.game_menu(&mut out);
                }
                "2" => {
                    out.say("Exiting game...");
                    self.state = EngineState::Exited;
                    return Ok((out, true));
                }
                _ => {
                    out.say("Invalid selection. Please choose 1 or 2.");
                    self.prompt = Prompt::MainMenu;
                    out.prompt("Selection:");
                }
            },

            Prompt::GameMenu => match input {
                "1" => {
                    self.attack(&mut out);
                    self.game_menu(&mut out);
                }
                "2" => self.character_menu(&mut out),
                "3" => self.ability_menu(&mut out),
                "4" => self.room_menu(&mut out),
                "5" => {
                    out.say("Exiting game...");
                    self.state = EngineState::Exited;
                    return Ok((out, true));
                }
                _ => {
                    out.say("Invalid selection.");
                    self.game_menu(&mut out);
                }
            },

            Prompt::CharacterMenu => match input {
                "1" => {
                    player::view_characters(&mut out, &self.store);
                    self.character_menu(&mut out);
                }
                "2" => self.ask(&mut out, "Name:", Prompt::AddCharacterName),
                "3" => self.ask(&mut out, "Character ID:", Prompt::UpdateCharacterId),
                "4" => self.ask(&mut out, "Search name:", Prompt::SearchCharacters),
                "5" => self.ask(&mut out, "Character ID:", Prompt::DeleteCharacter),
                "6" => self.ask(&mut out, "Item ID:", Prompt::EquipItem),
                "7" => {
                    if let Some(id) = self.player_id {
                        player::view_inventory(&mut out, &self.store, id);
                    }
                    self.character_menu(&mut out);
                }
                "0" => self.game_menu(&mut out),
                _ => {
                    out.say("Invalid selection.");
                    self.character_menu(&mut out);
                }
            },

            Prompt::AbilityMenu => match input {
                "1" => self.ask(&mut out, "Character ID:", Prompt::GrantAbilityPlayer),
                "2" => self.ask(&mut out, "Character ID:", Prompt::ViewAbilitiesPlayer),
                "0" => self.game_menu(&mut out),
                _ => {
                    out.say("Invalid selection.");
                    self.ability_menu(&mut out);
                }
            },

            Prompt::RoomMenu => match input {
                "1" => {
                    map::display_map(&mut out, &self.nav, &self.store);
                    self.room_menu(&mut out);
                }
                "2" => self.ask(
                    &mut out,
                    "Enter the direction (n, s, e, w):",
                    Prompt::MoveDirection,
                ),
                "3" => {
                    map::view_room(&mut out, &self.nav, &self.store);
                    self.room_menu(&mut out);
                }
                "4" => self.ask(&mut out, "Room name:", Prompt::AddRoomName),
                "0" => self.game_menu(&mut out),
                _ => {
                    out.say("Invalid selection.");
                    self.room_menu(&mut out);
                }
            },

            Prompt::AddCharacterName => {
                if input.is_empty() {
                    out.say("Enter a name.");
                    self.ask(&mut out, "Name:", Prompt::AddCharacterName);
                } else {
                    self.ask(
                        &mut out,
                        "Health:",
                        Prompt::AddCharacterHealth {
                            name: input.to_string(),
                        },
                    );
                }
            }

            Prompt::AddCharacterHealth { name } => match input.parse::<i32>() {
                Ok(health) => self.ask(
                    &mut out,
                    "Experience:",
                    Prompt::AddCharacterExperience { name, health },
                ),
                Err(_) => {
                    out.say("Enter a number.");
                    self.ask(&mut out, "Health:", Prompt::AddCharacterHealth { name });
                }
            },

            Prompt::AddCharacterExperience { name, health } => match input.parse::<i32>() {
                Ok(experience) => {
                    player::add_character(&mut out, &mut self.store, &name, health, experience)?;
                    self.character_menu(&mut out);
                }
                Err(_) => {
                    out.say("Enter a number.");
                    self.ask(
                        &mut out,
                        "Experience:",
                        Prompt::AddCharacterExperience { name, health },
                    );
                }
            },

            Prompt::UpdateCharacterId => match input.parse::<u32>() {
                Ok(id) => self.ask(&mut out, "New name:", Prompt::UpdateCharacterName { id }),
                Err(_) => {
                    out.say("Enter a number.");
                    self.ask(&mut out, "Character ID:", Prompt::UpdateCharacterId);
                }
            },

            Prompt::UpdateCharacterName { id } => {
                if input.is_empty() {
                    out.say("Enter a name.");
                    self.ask(&mut out, "New name:", Prompt::UpdateCharacterName { id });
                } else {
                    self.ask(
                        &mut out,
                        "Health:",
                        Prompt::UpdateCharacterHealth {
                            id,
                            name: input.to_string(),
                        },
                    );
                }
            }

            Prompt::UpdateCharacterHealth { id, name } => match input.parse::<i32>() {
                Ok(health) => self.ask(
                    &mut out,
                    "Experience:",
                    Prompt::UpdateCharacterExperience { id, name, health },
                ),
                Err(_) => {
                    out.say("Enter a number.");
                    self.ask(&mut out, "Health:", Prompt::UpdateCharacterHealth { id, name });
                }
            },

            Prompt::UpdateCharacterExperience { id, name, health } => {
                match input.parse::<i32>() {
                    Ok(experience) => {
                        player::update_character(
                            &mut out,
                            &mut self.store,
                            id,
                            &name,
                            health,
                            experience,
                        )?;
                        self.character_menu(&mut out);
                    }
                    Err(_) => {
                        out.say("Enter a number.");
                        self.ask(
                            &mut out,
                            "Experience:",
                            Prompt::UpdateCharacterExperience { id, name, health },
                        );
                    }
                }
            }

            Prompt::SearchCharacters => {
                player::search_characters(&mut out, &self.store, input);
                self.character_menu(&mut out);
            }

            Prompt::DeleteCharacter => match input.parse::<u32>() {
                Ok(id) => {
                    player::delete_character(&mut out, &mut self.store, id)?;
                    self.character_menu(&mut out);
                }
                Err(_) => {
                    out.say("Enter a number.");
                    self.ask(&mut out, "Character ID:", Prompt::DeleteCharacter);
                }
            },

            Prompt::EquipItem => match input.parse::<u32>() {
                Ok(item_id) => {
                    if let Some(id) = self.player_id {
                        player::equip_item(&mut out, &mut self.store, id, item_id)?;
                    }
                    self.character_menu(&mut out);
                }
                Err(_) => {
                    out.say("Enter a number.");
                    self.ask(&mut out, "Item ID:", Prompt::EquipItem);
                }
            },

            Prompt::GrantAbilityPlayer => match input.parse::<u32>() {
                Ok(player_id) => self.ask(
                    &mut out,
                    "Ability name:",
                    Prompt::GrantAbilityName { player_id },
                ),
                Err(_) => {
                    out.say("Enter a number.");
                    self.ask(&mut out, "Character ID:", Prompt::GrantAbilityPlayer);
                }
            },

            Prompt::GrantAbilityName { player_id } => {
                if input.is_empty() {
                    out.say("Enter a name.");
                    self.ask(
                        &mut out,
                        "Ability name:",
                        Prompt::GrantAbilityName { player_id },
                    );
                } else {
                    self.ask(
                        &mut out,
                        "Description:",
                        Prompt::GrantAbilityDescription {
                            player_id,
                            name: input.to_string(),
                        },
                    );
                }
            }

            Prompt::GrantAbilityDescription { player_id, name } => self.ask(
                &mut out,
                "Type:",
                Prompt::GrantAbilityKind {
                    player_id,
                    name,
                    description: input.to_string(),
                },
            ),

            Prompt::GrantAbilityKind {
                player_id,
                name,
                description,
            } => {
                player::grant_ability(
                    &mut out,
                    &mut self.store,
                    player_id,
                    &name,
                    &description,
                    input,
                )?;
                self.ability_menu(&mut out);
            }

            Prompt::ViewAbilitiesPlayer => match input.parse::<u32>() {
                Ok(id) => {
                    player::view_abilities(&mut out, &self.store, id);
                    self.ability_menu(&mut out);
                }
                Err(_) => {
                    out.say("Enter a number.");
                    self.ask(&mut out, "Character ID:", Prompt::ViewAbilitiesPlayer);
                }
            },

            Prompt::MoveDirection => {
                map::move_to_next_room(&mut out, &mut self.nav, &self.store, input);
                self.room_menu(&mut out);
            }

            Prompt::AddRoomName => {
                if input.is_empty() {
                    out.say("Enter a name.");
                    self.ask(&mut out, "Room name:", Prompt::AddRoomName);
                } else {
                    self.ask(
                        &mut out,
                        "Room description:",
                        Prompt::AddRoomDescription {
                            name: input.to_string(),
                        },
                    );
                }
            }

            Prompt::AddRoomDescription { name } => {
                map::add_room(&mut out, &mut self.store, &name, input)?;
                self.room_menu(&mut out);
            }
        }

        Ok((out, false))
    }

    /// Bind the first player and monster records, load the initial room and
    /// render the map. Missing records leave their slot unbound; later
    /// actions on them are silent no-ops.
    fn setup_game(&mut self, out: &mut Output) {
        self.player_id = self.store.players.first().map(|p| p.id);
        if let Some(player) = self.player_id.and_then(|id| self.store.player(id)) {
            out.say(format!("{} has entered the game.", player.name));
        }

        self.monster_id = self.store.monsters.first().map(|m| m.id);

        if let Some(room_id) = self.store.rooms.first().map(|r| r.id) {
            map::load_room(&mut self.nav, &self.store, room_id);
        }
        map::display_map(out, &self.nav, &self.store);

        out.pause(STARTUP_PAUSE_MS);
    }

    /// Weapon attack followed by the player's first ability on the same
    /// target; the two always run together.
    fn attack(&mut self, out: &mut Output) {
        let Some(player) = self
            .player_id
            .and_then(|id| self.store.player(id))
            .cloned()
        else {
            return;
        };
        let Some(monster) = self.monster_id.and_then(|id| self.store.monster_mut(id)) else {
            return;
        };

        player::attack(out, &player, monster);
        if let Some(ability) = player.abilities.first() {
            player::use_ability(out, &player, ability, monster);
        }
    }

    fn ask(&mut self, out: &mut Output, prompt_text: &str, next: Prompt) {
        self.prompt = next;
        out.prompt(prompt_text);
    }

    fn main_menu(&mut self, out: &mut Output) {
        out.say("1. Start Game");
        out.say("2. Exit");
        self.ask(out, "Selection:", Prompt::MainMenu);
    }

    fn game_menu(&mut self, out: &mut Output) {
        out.say("1. Attack");
        out.say("2. Manage characters");
        out.say("3. Manage abilities");
        out.say("4. Explore rooms");
        out.say("5. Quit");
        self.ask(out, "Choose an action:", Prompt::GameMenu);
    }

    fn character_menu(&mut self, out: &mut Output) {
        out.say("1. View characters");
        out.say("2. Add character");
        out.say("3. Update character");
        out.say("4. Search characters");
        out.say("5. Delete character");
        out.say("6. Equip item");
        out.say("7. View inventory");
        out.say("0. Back");
        self.ask(out, "Selection:", Prompt::CharacterMenu);
    }

    fn ability_menu(&mut self, out: &mut Output) {
        out.say("1. Add ability to character");
        out.say("2. View character abilities");
        out.say("0. Back");
        self.ask(out, "Selection:", Prompt::AbilityMenu);
    }

    fn room_menu(&mut self, out: &mut Output) {
        out.say("1. Display map");
        out.say("2. Move");
        out.say("3. View room");
        out.say("4. Add room");
        out.say("0. Back");
        self.ask(out, "Selection:", Prompt::RoomMenu);
    }
}
