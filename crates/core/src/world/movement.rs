//! Cursor state and the anchored-movement protocol.
//!
//! Movement is a two-state machine. `Idle` is the normal browsing state:
//! the cursor moves freely. `start_movement` anchors the cursor to a tile
//! and an entity; while anchored, cursor moves that the entity could not
//! legally make are rejected outright, and `end_movement` commits the
//! relocation from the anchor to wherever the cursor ended up.

use crate::world::{entity::EntityId, grid::GridPoint, World};
use serde::{Deserialize, Serialize};

/// The movement protocol state. UI layers read this to decide highlighting.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Movement {
    Idle,
    Anchored {
        /// The tile movement distance is measured from.
        anchor: GridPoint,
        /// The entity being moved.
        entity: EntityId,
    },
}

impl World {
    /// The tile the cursor is on.
    pub fn selected_tile(&self) -> &crate::world::tile::Tile {
        self.grid.tile_at(self.selected.x(), self.selected.y())
    }

    pub fn is_anchored(&self) -> bool {
        matches!(self.movement, Movement::Anchored { .. })
    }

    /// The current anchor tile, if a movement is in progress.
    pub fn anchor(&self) -> Option<GridPoint> {
        match self.movement {
            Movement::Anchored { anchor, .. } => Some(anchor),
            Movement::Idle => None,
        }
    }

    /// The entity being moved, if a movement is in progress.
    pub fn selected_entity(&self) -> Option<EntityId> {
        match self.movement {
            Movement::Anchored { entity, .. } => Some(entity),
            Movement::Idle => None,
        }
    }

    /// Move the cursor to the given coordinates (wrapped toroidally).
    ///
    /// When idle this always succeeds. While anchored, the candidate tile is
    /// rejected (cursor unchanged, returns false) unless it is within the
    /// anchored entity's movement budget of the anchor *and* its tile type
    /// matches the terrain the entity can traverse.
    pub fn select_tile(&mut self, x: i32, y: i32) -> bool {
        let candidate = self.grid.wrap(x, y);
        if let Movement::Anchored { anchor, entity } = self.movement {
            let entity = &self.entities[entity.index()];
            let tile = self.grid.tile_at(x, y);
            if anchor.distance_to(candidate) > entity.move_distance as f64
                || tile.tile_type != entity.terrain
            {
                return false;
            }
        }
        self.selected = candidate;
        true
    }

    /// Anchor an in-progress movement of `entity`, measured from `anchor`.
    pub fn start_movement(&mut self, anchor: GridPoint, entity: EntityId) {
        let anchor = self.grid.wrap(anchor.x(), anchor.y());
        self.movement = Movement::Anchored { anchor, entity };
    }

    /// Commit the in-progress movement: relocate the anchored entity from
    /// the anchor tile to the currently-selected tile. Returns false (with
    /// no relocation) if nothing was anchored, the entity is no longer at
    /// the anchor, or its movement budget for this turn is spent. The state
    /// returns to idle either way.
    pub fn end_movement(&mut self) -> bool {
        match self.movement {
            Movement::Anchored { anchor, entity } => {
                self.movement = Movement::Idle;
                self.move_entity(entity, anchor, self.selected)
            }
            Movement::Idle => false,
        }
    }

    /// Discard the in-progress movement without relocating anything.
    pub fn cancel_movement(&mut self) {
        self.movement = Movement::Idle;
    }

    /// Zero every entity's spent movement. The turn-keeping collaborator
    /// calls this once per turn boundary.
    pub fn reset_movement(&mut self) {
        for entity in &mut self.entities {
            entity.used_movement = 0;
        }
    }

    /// Relocate an entity between two tiles, updating the occupant lists on
    /// both sides and the entity's own location atomically. Fails (returning
    /// false, mutating nothing) if the entity isn't at the origin or has no
    /// movement budget left.
    fn move_entity(
        &mut self,
        id: EntityId,
        origin: GridPoint,
        destination: GridPoint,
    ) -> bool {
        let entity = &self.entities[id.index()];
        let origin_tile = self.grid.tile_at(origin.x(), origin.y());
        if !origin_tile.entities.contains(&id)
            || entity.used_movement >= entity.move_distance
        {
            return false;
        }

        let origin_tile = self.grid.tile_at_mut(origin.x(), origin.y());
        origin_tile.entities.retain(|&e| e != id);
        let dest_tile =
            self.grid.tile_at_mut(destination.x(), destination.y());
        dest_tile.entities.push(id);

        let entity = &mut self.entities[id.index()];
        entity.location = destination;
        entity.used_movement += origin.distance_to(destination).ceil() as u32;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{tile::TileType, World};

    /// An all-land 10x10 world with one entity (budget 2, land-bound) at the
    /// origin, and one sea tile at (5, 0).
    fn movement_world() -> (World, EntityId) {
        let mut world = World::test_world(10, 10);
        world.grid.tile_at_mut(5, 0).tile_type = TileType::Sea;
        let entity =
            world.spawn_entity('Ɣ', 2, TileType::Land, GridPoint::ORIGIN);
        (world, entity)
    }

    #[test]
    fn test_select_free_when_idle() {
        let (mut world, _) = movement_world();
        assert!(world.select_tile(9, 9));
        assert_eq!(world.selected_tile().position(), GridPoint::new(9, 9));
        // Out-of-range coordinates wrap
        assert!(world.select_tile(-1, 10));
        assert_eq!(world.selected_tile().position(), GridPoint::new(9, 0));
    }

    #[test]
    fn test_anchored_select_rejects_out_of_range() {
        let (mut world, entity) = movement_world();
        world.start_movement(GridPoint::ORIGIN, entity);

        // Distance 3 > budget 2: rejected, cursor unchanged
        assert!(!world.select_tile(3, 0));
        assert_eq!(world.selected_tile().position(), GridPoint::ORIGIN);

        // Wrong tile type at distance 2... make (0, 2) sea to check
        world.grid.tile_at_mut(0, 2).tile_type = TileType::Sea;
        assert!(!world.select_tile(0, 2));

        // Distance 2 on land: accepted
        assert!(world.select_tile(2, 0));
        assert_eq!(world.selected_tile().position(), GridPoint::new(2, 0));
    }

    #[test]
    fn test_end_movement_commits_and_spends_budget() {
        let (mut world, entity) = movement_world();
        world.start_movement(GridPoint::ORIGIN, entity);
        assert!(world.select_tile(2, 0));
        assert!(world.end_movement());
        assert!(!world.is_anchored());

        // Both sides of the two-way reference moved
        assert!(world.tile_at(0, 0).entities().is_empty());
        assert_eq!(world.tile_at(2, 0).entities(), &[entity]);
        assert_eq!(world.entity(entity).location(), GridPoint::new(2, 0));
        assert_eq!(world.entity(entity).used_movement(), 2);

        // Budget is spent: a second commit this turn fails silently
        world.start_movement(GridPoint::new(2, 0), entity);
        assert!(world.select_tile(3, 0));
        assert!(!world.end_movement());
        assert_eq!(world.tile_at(2, 0).entities(), &[entity]);
        assert_eq!(world.entity(entity).used_movement(), 2);

        // Until the turn boundary resets it
        world.reset_movement();
        world.start_movement(GridPoint::new(2, 0), entity);
        assert!(world.select_tile(3, 0));
        assert!(world.end_movement());
        assert_eq!(world.entity(entity).location(), GridPoint::new(3, 0));
    }

    #[test]
    fn test_end_movement_fails_if_entity_left_anchor() {
        let (mut world, entity) = movement_world();
        world.start_movement(GridPoint::new(4, 4), entity);
        assert!(world.select_tile(4, 5));
        // Entity is at the origin, not the anchor: silent failure
        assert!(!world.end_movement());
        assert_eq!(world.entity(entity).location(), GridPoint::ORIGIN);
        assert_eq!(world.entity(entity).used_movement(), 0);
    }

    #[test]
    fn test_cancel_movement() {
        let (mut world, entity) = movement_world();
        world.start_movement(GridPoint::ORIGIN, entity);
        world.cancel_movement();
        assert!(!world.is_anchored());
        assert_eq!(world.entity(entity).location(), GridPoint::ORIGIN);
        // Cursor is free again
        assert!(world.select_tile(7, 7));
    }

    #[test]
    fn test_end_movement_when_idle_is_noop() {
        let (mut world, _) = movement_world();
        assert!(!world.end_movement());
    }
}
