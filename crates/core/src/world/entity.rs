//! Entities as the core sees them. The full ability/economy data lives with
//! the gameplay collaborator; the world only consumes the narrow capability
//! surface movement needs (movement budget and traversable tile type), plus
//! the bookkeeping to keep tile occupant lists and entity locations in sync.

use crate::world::{grid::GridPoint, tile::TileType};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Stable handle for an entity in the world's arena.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "entity {}", _0)]
pub struct EntityId(pub(super) usize);

impl EntityId {
    pub(super) fn index(self) -> usize {
        self.0
    }
}

/// An entity placed on the grid. Lives in the world's entity arena; the tile
/// occupant lists and the `location` back-reference here form a two-way
/// index, and relocation always updates both sides together.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Entity {
    pub(super) id: EntityId,

    /// Display character.
    pub(super) icon: char,

    /// Total movement budget per turn, in distance units.
    pub(super) move_distance: u32,

    /// The tile type this entity can traverse and stand on.
    pub(super) terrain: TileType,

    /// Movement spent this turn. Reset once per turn by the turn-keeping
    /// collaborator via [World::reset_movement](crate::World::reset_movement).
    pub(super) used_movement: u32,

    /// The tile this entity currently occupies.
    pub(super) location: GridPoint,
}

impl Entity {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn icon(&self) -> char {
        self.icon
    }

    pub fn move_distance(&self) -> u32 {
        self.move_distance
    }

    pub fn terrain(&self) -> TileType {
        self.terrain
    }

    pub fn used_movement(&self) -> u32 {
        self.used_movement
    }

    pub fn location(&self) -> GridPoint {
        self.location
    }
}
