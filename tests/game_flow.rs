use console_rpg::engine::OutputBlock;
use console_rpg::{EngineState, GameEngine, load_store_from_file, load_store_from_str, seed_store};

const STORE: &str = r#"
[[room]]
id = 1
name = "Hall"
description = "A drafty stone hall."
north = 2
east = 3

[[room]]
id = 2
name = "Crypt"
description = "Sealed sarcophagi."
south = 1

[[room]]
id = 3
name = "Forge"
description = "A cold anvil."
west = 1

[[player]]
id = 1
name = "Aldric"
health = 100
experience = 0
room = 1

[[player.abilities]]
id = 1
name = "Power Strike"
description = "A heavy overhead blow."
kind = "attack"

[player.equipment.weapon]
id = 1
name = "Rusty Sword"
attack = 5

[[monster]]
id = 1
name = "Grizzle"
health = 30
kind = "goblin"
"#;

fn started_engine() -> GameEngine {
    let store = load_store_from_str(STORE).unwrap();
    let mut engine = GameEngine::new(store);
    engine.initialize();
    let (_, quit) = engine.step("1").unwrap();
    assert!(!quit);
    assert_eq!(engine.state(), EngineState::InGame);
    engine
}

fn text(out: &console_rpg::engine::Output) -> String {
    out.lines().join("\n")
}

fn map_panel(out: &console_rpg::engine::Output) -> Option<String> {
    out.blocks.iter().find_map(|b| match b {
        OutputBlock::MapPanel(s) => Some(s.clone()),
        _ => None,
    })
}

#[test]
fn attack_hits_with_weapon_and_ability_together() {
    let mut engine = started_engine();

    let (out, _) = engine.step("1").unwrap();
    let text = text(&out);
    assert!(text.contains("Aldric attacks Grizzle with a Rusty Sword dealing 5 damage!"));
    assert!(text.contains("Grizzle has 25 health remaining."));
    assert!(text.contains("Aldric uses Power Strike on Grizzle!"));

    // repeated attacks keep lowering health with no floor
    for _ in 0..6 {
        engine.step("1").unwrap();
    }
    assert_eq!(engine.store().monster(1).unwrap().health, -5);
}

#[test]
fn character_crud_round_trip_through_menus() {
    let mut engine = started_engine();
    engine.step("2").unwrap(); // character menu

    // add
    engine.step("2").unwrap();
    engine.step("Rin").unwrap();
    engine.step("100").unwrap();
    let (out, _) = engine.step("0").unwrap();
    assert!(text(&out).contains("Added new player: Rin"));
    let rin_id = engine.store().players.last().unwrap().id;

    // view includes the new record
    let (out, _) = engine.step("1").unwrap();
    assert!(text(&out).contains(&format!(
        "Character ID: {rin_id}, Name: Rin, Health: 100, Experience: 0"
    )));

    // update
    engine.step("3").unwrap();
    engine.step(&rin_id.to_string()).unwrap();
    engine.step("Rin the Bold").unwrap();
    engine.step("90").unwrap();
    let (out, _) = engine.step("25").unwrap();
    assert!(text(&out).contains("Updated player: Rin the Bold"));
    assert_eq!(engine.store().player(rin_id).unwrap().experience, 25);

    // search
    engine.step("4").unwrap();
    let (out, _) = engine.step("Bold").unwrap();
    assert!(text(&out).contains("Rin the Bold"));

    // delete
    engine.step("5").unwrap();
    let (out, _) = engine.step(&rin_id.to_string()).unwrap();
    assert!(text(&out).contains("Deleted player: Rin the Bold"));
    assert!(engine.store().player(rin_id).is_none());

    // deleting again misses
    engine.step("5").unwrap();
    let (out, _) = engine.step(&rin_id.to_string()).unwrap();
    assert!(text(&out).contains("Character not found."));
}

#[test]
fn room_navigation_moves_and_rejects_missing_directions() {
    let mut engine = started_engine();
    engine.step("4").unwrap(); // room menu

    // the initial map centers the starting room with its neighbors
    let (out, _) = engine.step("1").unwrap();
    let panel = map_panel(&out).unwrap();
    assert!(panel.contains("*Hall *"));
    assert!(panel.contains("[Crypt]"));
    assert!(panel.contains("[Forge]"));

    // move north to the crypt
    engine.step("2").unwrap();
    let (out, _) = engine.step("n").unwrap();
    assert!(text(&out).contains("Moved to the North."));
    assert!(map_panel(&out).unwrap().contains("*Crypt*"));

    // the crypt has no west neighbor
    engine.step("2").unwrap();
    let (out, _) = engine.step("w").unwrap();
    assert!(text(&out).contains("No room to the West."));

    // garbage direction tokens are rejected
    engine.step("2").unwrap();
    let (out, _) = engine.step("q").unwrap();
    assert!(text(&out).contains("Invalid direction."));

    // view room reports the occupant-free crypt
    let (out, _) = engine.step("3").unwrap();
    let view = text(&out);
    assert!(view.contains("Name: Crypt"));
    assert!(view.contains("No players in the room."));
}

#[test]
fn added_rooms_persist_across_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.toml");

    let mut engine = GameEngine::new(seed_store(&path).unwrap());
    engine.initialize();
    engine.step("1").unwrap();
    engine.step("4").unwrap(); // room menu
    engine.step("4").unwrap(); // add room
    engine.step("Vault").unwrap();
    let (out, _) = engine.step("A locked vault.").unwrap();
    assert!(text(&out).contains("Added room: Vault"));

    let reloaded = load_store_from_file(&path).unwrap();
    assert!(reloaded.rooms.iter().any(|r| r.name == "Vault"));
}

#[test]
fn seeded_store_loads_and_validates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.toml");

    seed_store(&path).unwrap();
    let store = load_store_from_file(&path).unwrap();
    assert!(!store.rooms.is_empty());
    assert_eq!(store.players[0].name, "Aldric");
    assert!(store.players[0].weapon().is_some());
    assert_eq!(store.monsters[0].kind, "goblin");
}

#[test]
fn ability_menu_grants_and_lists() {
    let mut engine = started_engine();
    engine.step("3").unwrap(); // ability menu

    engine.step("1").unwrap();
    engine.step("1").unwrap(); // player id
    engine.step("Guard").unwrap();
    engine.step("Brace for impact.").unwrap();
    let (out, _) = engine.step("buff").unwrap();
    assert!(text(&out).contains("Added ability Guard to Aldric"));

    engine.step("2").unwrap();
    let (out, _) = engine.step("1").unwrap();
    let listing = text(&out);
    assert!(listing.contains("Abilities for Aldric:"));
    assert!(listing.contains("Name: Guard, Description: Brace for impact., Type: buff"));

    // unknown character id
    engine.step("2").unwrap();
    let (out, _) = engine.step("99").unwrap();
    assert!(text(&out).contains("Character not found."));
}
