use crate::engine::output::Output;
use crate::store::model::{Ability, Player, Targetable};
use crate::store::{GameStore, StoreError};

/// Swing the equipped weapon at the target. Without a weapon nothing
/// happens to the target's health.
pub fn attack(out: &mut Output, player: &Player, target: &mut dyn Targetable) {
    let Some(weapon) = player.weapon() else {
        out.say(format!("{} has no weapon equipped!", player.name));
        return;
    };

    out.say(format!(
        "{} attacks {} with a {} dealing {} damage!",
        player.name,
        target.name(),
        weapon.name,
        weapon.attack
    ));
    target.set_health(target.health() - weapon.attack);
    out.say(format!(
        "{} has {} health remaining.",
        target.name(),
        target.health()
    ));
}

/// Activate an ability against the target, provided the player owns it.
pub fn use_ability(out: &mut Output, player: &Player, ability: &Ability, target: &mut dyn Targetable) {
    if player.abilities.iter().any(|a| a.id == ability.id) {
        out.say(format!(
            "{} uses {} on {}!",
            player.name,
            ability.name,
            target.name()
        ));
    } else {
        out.say(format!(
            "{} does not have the ability {}!",
            player.name, ability.name
        ));
    }
}

pub fn view_characters(out: &mut Output, store: &GameStore) {
    if store.players.is_empty() {
        out.say("No characters available.");
        return;
    }

    out.say("Players:");
    for player in &store.players {
        out.say(describe_player(player));
    }
}

pub fn add_character(
    out: &mut Output,
    store: &mut GameStore,
    name: &str,
    health: i32,
    experience: i32,
) -> Result<(), StoreError> {
    store.add_player(name, health, experience);
    store.save()?;
    out.say(format!("Added new player: {name}"));
    Ok(())
}

pub fn update_character(
    out: &mut Output,
    store: &mut GameStore,
    id: u32,
    name: &str,
    health: i32,
    experience: i32,
) -> Result<(), StoreError> {
    let Some(player) = store.player_mut(id) else {
        out.say("Character not found.");
        return Ok(());
    };

    player.name = name.to_string();
    player.health = health;
    player.experience = experience;
    store.save()?;
    out.say(format!("Updated player: {name}"));
    Ok(())
}

/// List players whose name contains the search fragment.
pub fn search_characters(out: &mut Output, store: &GameStore, term: &str) {
    let matches: Vec<&Player> = store
        .players
        .iter()
        .filter(|p| p.name.contains(term))
        .collect();

    if matches.is_empty() {
        out.say("No characters found.");
        return;
    }

    out.say("Players:");
    for player in matches {
        out.say(describe_player(player));
    }
}

pub fn delete_character(out: &mut Output, store: &mut GameStore, id: u32) -> Result<(), StoreError> {
    let Some(name) = store.player(id).map(|p| p.name.clone()) else {
        out.say("Character not found.");
        return Ok(());
    };

    store.remove_player(id);
    store.save()?;
    out.say(format!("Deleted player: {name}"));
    Ok(())
}

/// Attach a new ability record to a player.
pub fn grant_ability(
    out: &mut Output,
    store: &mut GameStore,
    player_id: u32,
    name: &str,
    description: &str,
    kind: &str,
) -> Result<(), StoreError> {
    let ability = Ability {
        id: store.next_ability_id(),
        name: name.to_string(),
        description: description.to_string(),
        kind: kind.to_string(),
    };

    let Some(player) = store.player_mut(player_id) else {
        out.say("Character not found.");
        return Ok(());
    };

    let player_name = player.name.clone();
    player.abilities.push(ability);
    store.save()?;
    out.say(format!("Added ability {name} to {player_name}"));
    Ok(())
}

pub fn view_abilities(out: &mut Output, store: &GameStore, player_id: u32) {
    let Some(player) = store.player(player_id) else {
        out.say("Character not found.");
        return;
    };

    if player.abilities.is_empty() {
        out.say("No abilities available.");
        return;
    }

    out.say(format!("Abilities for {}:", player.name));
    for ability in &player.abilities {
        out.say(format!(
            "Ability ID: {}, Name: {}, Description: {}, Type: {}",
            ability.id, ability.name, ability.description, ability.kind
        ));
    }
}

/// Move an inventory item into the player's weapon slot.
pub fn equip_item(
    out: &mut Output,
    store: &mut GameStore,
    player_id: u32,
    item_id: u32,
) -> Result<(), StoreError> {
    let Some(player) = store.player_mut(player_id) else {
        out.say("Character not found.");
        return Ok(());
    };

    if !player.equip_from_inventory(item_id) {
        out.say(format!(
            "{} does not have that item in their inventory!",
            player.name
        ));
        return Ok(());
    }

    let name = player.name.clone();
    let weapon = player
        .weapon()
        .map(|w| w.name.clone())
        .unwrap_or_default();
    store.save()?;
    out.say(format!("{name} equips {weapon}."));
    Ok(())
}

pub fn view_inventory(out: &mut Output, store: &GameStore, player_id: u32) {
    let Some(player) = store.player(player_id) else {
        out.say("Character not found.");
        return;
    };

    if player.inventory.is_empty() {
        out.say("Inventory is empty.");
        return;
    }

    out.say("Inventory:");
    for item in &player.inventory {
        out.say(format!("Item ID: {}, Name: {}", item.id, item.name));
    }
}

fn describe_player(player: &Player) -> String {
    format!(
        "Character ID: {}, Name: {}, Health: {}, Experience: {}",
        player.id, player.name, player.health, player.experience
    )
}
