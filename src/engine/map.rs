use crate::engine::output::Output;
use crate::store::model::Direction;
use crate::store::{GameStore, StoreError};

const GRID_ROWS: usize = 5;
const GRID_COLS: usize = 5;
const LABEL_LEN: usize = 5;
const BLANK_CELL: &str = "       ";

/// Where the player currently is. Passed explicitly to every map operation
/// instead of living as hidden field state.
#[derive(Debug, Default)]
pub struct NavContext {
    pub current_room: Option<u32>,
}

impl NavContext {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Cell {
    Empty,
    /// Vertical connector between a room and its north/south neighbor.
    VLink,
    /// Horizontal connector between a room and its east/west neighbor.
    HLink,
    Room {
        label: String,
        current: bool,
    },
}

type Grid = [[Cell; GRID_COLS]; GRID_ROWS];

/// Make the room with the given id current. An unknown id silently clears
/// the context (covers both initial load and later moves).
pub fn load_room(nav: &mut NavContext, store: &GameStore, id: u32) {
    nav.current_room = store.room(id).map(|r| r.id);
}

/// Rebuild the 5x5 grid from scratch around the current room and emit it
/// as the map panel. Rooms more than two grid steps out are not rendered.
pub fn display_map(out: &mut Output, nav: &NavContext, store: &GameStore) {
    let mut grid: Grid = std::array::from_fn(|_| std::array::from_fn(|_| Cell::Empty));

    if let Some(id) = nav.current_room {
        place_room(store, &mut grid, id, GRID_ROWS / 2, GRID_COLS / 2, id);
    }

    let mut panel = String::from("Map:\n");
    for row in &grid {
        for cell in row {
            match cell {
                Cell::Empty => panel.push_str(BLANK_CELL),
                Cell::VLink => panel.push_str("   |   "),
                Cell::HLink => panel.push_str("  ---  "),
                Cell::Room { label, current } => {
                    if *current {
                        panel.push_str(&format!("*{label}*"));
                    } else {
                        panel.push_str(&format!("[{label}]"));
                    }
                }
            }
        }
        panel.push('\n');
    }

    out.map_panel(panel);
}

/// Recursive placement. An already-filled target cell ends the branch: that
/// is both the cycle guard and the silent drop of a second room mapping to
/// the same cell. Neighbors that would land outside the grid are omitted
/// from this render.
fn place_room(store: &GameStore, grid: &mut Grid, room_id: u32, row: usize, col: usize, current: u32) {
    if grid[row][col] != Cell::Empty {
        return;
    }

    let Some(room) = store.room(room_id) else {
        return;
    };

    grid[row][col] = Cell::Room {
        label: room_label(&room.name),
        current: room_id == current,
    };

    if let Some(north) = room.north {
        if row > 1 {
            grid[row - 1][col] = Cell::VLink;
            place_room(store, grid, north, row - 2, col, current);
        }
    }

    if let Some(south) = room.south {
        if row < GRID_ROWS - 2 {
            grid[row + 1][col] = Cell::VLink;
            place_room(store, grid, south, row + 2, col, current);
        }
    }

    if let Some(east) = room.east {
        if col < GRID_COLS - 2 {
            grid[row][col + 1] = Cell::HLink;
            place_room(store, grid, east, row, col + 2, current);
        }
    }

    if let Some(west) = room.west {
        if col > 1 {
            grid[row][col - 1] = Cell::HLink;
            place_room(store, grid, west, row, col - 2, current);
        }
    }
}

/// Truncate or pad a room name to the fixed label width.
fn room_label(name: &str) -> String {
    let truncated: String = name.chars().take(LABEL_LEN).collect();
    format!("{:<width$}", truncated, width = LABEL_LEN)
}

/// Handle a directional move token (n/s/e/w, case-insensitive). With no
/// current room this is a no-op.
pub fn move_to_next_room(out: &mut Output, nav: &mut NavContext, store: &GameStore, token: &str) {
    let Some(room) = nav.current_room.and_then(|id| store.room(id)) else {
        return;
    };

    let Some(direction) = Direction::parse(token) else {
        out.say("Invalid direction.");
        return;
    };

    match room.neighbor(direction) {
        Some(next) => {
            load_room(nav, store, next);
            out.say(format!("Moved to the {}.", direction.label()));
            display_map(out, nav, store);
        }
        None => out.say(format!("No room to the {}.", direction.label())),
    }
}

/// Report the current room and its occupants.
pub fn view_room(out: &mut Output, nav: &NavContext, store: &GameStore) {
    let Some(room) = nav.current_room.and_then(|id| store.room(id)) else {
        return;
    };

    out.say("Room:");
    out.say(format!("Name: {}", room.name));
    out.say(format!("Description: {}", room.description));

    let occupants = store.players_in_room(room.id);
    if occupants.is_empty() {
        out.say("No players in the room.");
    } else {
        for player in occupants {
            out.say(format!("Player: {}", player.name));
        }
    }
}

/// Create a new unconnected room and persist it.
pub fn add_room(
    out: &mut Output,
    store: &mut GameStore,
    name: &str,
    description: &str,
) -> Result<(), StoreError> {
    store.add_room(name, description);
    store.save()?;
    out.say(format!("Added room: {name}"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::output::OutputBlock;
    use crate::store::model::Room;

    fn room(id: u32, name: &str) -> Room {
        Room {
            id,
            name: name.to_string(),
            description: format!("The {name}."),
            north: None,
            south: None,
            east: None,
            west: None,
        }
    }

    fn panel(out: &Output) -> String {
        out.blocks
            .iter()
            .find_map(|b| match b {
                OutputBlock::MapPanel(s) => Some(s.clone()),
                _ => None,
            })
            .expect("map panel rendered")
    }

    fn grid_rows(panel: &str) -> Vec<String> {
        panel.lines().skip(1).map(|l| l.to_string()).collect()
    }

    fn cell(rows: &[String], row: usize, col: usize) -> String {
        rows[row][col * 7..(col + 1) * 7].to_string()
    }

    #[test]
    fn neighbors_render_two_cells_out_with_connectors() {
        let mut store = GameStore::in_memory();
        let mut hall = room(1, "Hall");
        hall.north = Some(2);
        hall.east = Some(3);
        let mut crypt = room(2, "Crypt");
        crypt.north = Some(4);
        store.rooms.extend([hall, crypt, room(3, "Forge"), room(4, "Tower")]);

        let nav = NavContext {
            current_room: Some(1),
        };
        let mut out = Output::new();
        display_map(&mut out, &nav, &store);

        let rows = grid_rows(&panel(&out));
        assert_eq!(cell(&rows, 2, 2), "*Hall *");
        assert_eq!(cell(&rows, 1, 2), "   |   ");
        assert_eq!(cell(&rows, 0, 2), "[Crypt]");
        assert_eq!(cell(&rows, 2, 3), "  ---  ");
        assert_eq!(cell(&rows, 2, 4), "[Forge]");
        // Tower is a 2nd hop north; it sits past the grid edge and is dropped
        assert!(!rows.iter().any(|r| r.contains("Tower")));
    }

    #[test]
    fn two_hops_render_three_never_does() {
        let mut store = GameStore::in_memory();
        let mut hall = room(1, "Hall");
        hall.north = Some(2);
        let mut crypt = room(2, "Crypt");
        crypt.north = Some(3);
        crypt.south = Some(1);
        let mut tower = room(3, "Tower");
        tower.north = Some(4);
        store.rooms.extend([hall, crypt, tower, room(4, "Spire")]);

        let nav = NavContext {
            current_room: Some(2),
        };
        let mut out = Output::new();
        display_map(&mut out, &nav, &store);

        let rows = grid_rows(&panel(&out));
        assert_eq!(cell(&rows, 2, 2), "*Crypt*");
        assert_eq!(cell(&rows, 0, 2), "[Tower]");
        assert_eq!(cell(&rows, 4, 2), "[Hall ]");
        assert!(!rows.iter().any(|r| r.contains("Spire")));
    }

    #[test]
    fn cyclic_graph_terminates() {
        let mut store = GameStore::in_memory();
        let mut hall = room(1, "Hall");
        hall.north = Some(2);
        let mut crypt = room(2, "Crypt");
        crypt.south = Some(1);
        store.rooms.extend([hall, crypt]);

        let nav = NavContext {
            current_room: Some(1),
        };
        let mut out = Output::new();
        display_map(&mut out, &nav, &store);

        let rows = grid_rows(&panel(&out));
        assert_eq!(cell(&rows, 2, 2), "*Hall *");
        assert_eq!(cell(&rows, 0, 2), "[Crypt]");
    }

    #[test]
    fn long_names_truncate_short_names_pad() {
        assert_eq!(room_label("Grand Atrium"), "Grand");
        assert_eq!(room_label("Den"), "Den  ");
    }

    #[test]
    fn move_without_neighbor_reports_and_stays() {
        let mut store = GameStore::in_memory();
        store.rooms.push(room(1, "Hall"));

        let mut nav = NavContext {
            current_room: Some(1),
        };
        let mut out = Output::new();
        move_to_next_room(&mut out, &mut nav, &store, "n");

        assert_eq!(out.lines(), vec!["No room to the North."]);
        assert_eq!(nav.current_room, Some(1));
    }

    #[test]
    fn move_follows_existing_neighbor_and_rerenders() {
        let mut store = GameStore::in_memory();
        let mut hall = room(1, "Hall");
        hall.east = Some(2);
        store.rooms.extend([hall, room(2, "Forge")]);

        let mut nav = NavContext {
            current_room: Some(1),
        };
        let mut out = Output::new();
        move_to_next_room(&mut out, &mut nav, &store, "E");

        assert_eq!(nav.current_room, Some(2));
        assert_eq!(out.lines(), vec!["Moved to the East."]);
        assert!(panel(&out).contains("*Forge*"));
    }

    #[test]
    fn unknown_token_is_invalid_direction() {
        let mut store = GameStore::in_memory();
        store.rooms.push(room(1, "Hall"));

        let mut nav = NavContext {
            current_room: Some(1),
        };
        let mut out = Output::new();
        move_to_next_room(&mut out, &mut nav, &store, "up");

        assert_eq!(out.lines(), vec!["Invalid direction."]);
        assert_eq!(nav.current_room, Some(1));
    }

    #[test]
    fn view_room_lists_occupants_or_none() {
        let mut store = GameStore::in_memory();
        store.rooms.push(room(1, "Hall"));
        let nav = NavContext {
            current_room: Some(1),
        };

        let mut out = Output::new();
        view_room(&mut out, &nav, &store);
        assert!(out.lines().contains(&"No players in the room."));

        let id = store.add_player("Rin", 100, 0);
        store.player_mut(id).unwrap().room = Some(1);

        let mut out = Output::new();
        view_room(&mut out, &nav, &store);
        assert!(out.lines().contains(&"Player: Rin"));
    }

    #[test]
    fn load_room_with_unknown_id_clears_context() {
        let mut store = GameStore::in_memory();
        store.rooms.push(room(1, "Hall"));

        let mut nav = NavContext {
            current_room: Some(1),
        };
        load_room(&mut nav, &store, 42);
        assert_eq!(nav.current_room, None);
    }
}
