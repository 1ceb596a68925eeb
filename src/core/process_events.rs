//! Input handling and movement.
use raylib::prelude::*;

use crate::core::maze::TileMap;
use crate::core::player::{MoveIntent, Player, Pose};
use crate::error::MapError;

/// Free when the point lies on the map in a passable cell.
pub fn cell_free(map: &TileMap, wx: f32, wy: f32) -> bool {
    map.cell_at_point(wx, wy).is_some_and(|c| !c.is_occupied())
}

/// Rejects a start pose outside the map or inside a wall.
pub fn check_spawn(map: &TileMap, pose: &Pose) -> Result<(), MapError> {
    if cell_free(map, pose.x, pose.y) {
        Ok(())
    } else {
        Err(MapError::BlockedSpawn { x: pose.x, y: pose.y })
    }
}

/// Reads W / arrow keys into a [`MoveIntent`].
pub fn read_intent(window: &RaylibHandle) -> MoveIntent {
    MoveIntent {
        forward: window.is_key_down(KeyboardKey::KEY_W),
        turn_left: window.is_key_down(KeyboardKey::KEY_LEFT),
        turn_right: window.is_key_down(KeyboardKey::KEY_RIGHT),
    }
}

/// Moves the player by one frame's worth of `intent`.
pub fn apply_intent(player: &mut Player, map: &TileMap, intent: MoveIntent, dt: f32) {
    player.update(intent, dt, |x, y| cell_free(map, x, y));
    if !intent.is_idle() {
        tracing::debug!(x = player.pose.x, y = player.pose.y, angle = player.pose.angle, "pose updated");
    }
}

pub fn process_events(window: &RaylibHandle, player: &mut Player, map: &TileMap) {
    let dt = window.get_frame_time();
    apply_intent(player, map, read_intent(window), dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::maze::CellCodes;

    #[test]
    fn walls_and_outside_are_not_free() {
        let map = TileMap::reference();
        assert!(cell_free(&map, 3.456, 2.345));
        assert!(!cell_free(&map, 0.5, 0.5));
        assert!(!cell_free(&map, -1.0, 2.0));
        assert!(!cell_free(&map, 2.0, 17.0));
    }

    #[test]
    fn spawn_must_be_on_open_floor() {
        let map = TileMap::reference();
        assert!(check_spawn(&map, &Pose::new(3.456, 2.345, 1.523)).is_ok());
        assert!(matches!(check_spawn(&map, &Pose::new(0.5, 0.5, 0.0)), Err(MapError::BlockedSpawn { .. })));

        let small = TileMap::from_rows("111\n1 1\n111\n", &CellCodes::default()).unwrap();
        assert!(check_spawn(&small, &Pose::new(1.5, 1.5, 0.0)).is_ok());
        assert!(matches!(check_spawn(&small, &Pose::new(3.456, 2.345, 0.0)), Err(MapError::BlockedSpawn { .. })));
    }

    #[test]
    fn player_stops_at_wall() {
        let map = TileMap::reference();
        // Facing -y from row 1: the next cell up is the border wall.
        let mut player = Player::new(Pose::new(3.5, 1.1, -std::f32::consts::FRAC_PI_2));
        apply_intent(&mut player, &map, MoveIntent { forward: true, ..Default::default() }, 0.5);
        assert_eq!((player.pose.x, player.pose.y), (3.5, 1.1));
    }

    #[test]
    fn player_walks_in_open_space() {
        let map = TileMap::reference();
        let mut player = Player::new(Pose::new(3.5, 1.5, 0.0));
        apply_intent(&mut player, &map, MoveIntent { forward: true, ..Default::default() }, 0.5);
        assert!((player.pose.x - 4.5).abs() < 1e-5);
    }
}
