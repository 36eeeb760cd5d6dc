use std::collections::HashSet;

use rand::SeedableRng;
use rand_pcg::Pcg64;
use tessera::{RegionId, TileType, World, WorldConfig};

/// A fixed-seed config that every test here generates from. seed_count stays
/// under the 90-icon cap so partitioning can never overflow the alphabet.
fn test_config() -> WorldConfig {
    WorldConfig {
        seed: 1021522790211909,
        seed_count: 80,
        ..WorldConfig::default()
    }
}

#[test]
fn test_world_gen_heights_in_range() {
    let config = test_config();
    let world = World::generate(config).unwrap();
    for tile in world.grid().iter() {
        assert!(
            (config.min_altitude..=config.max_altitude)
                .contains(&tile.height()),
            "tile {} height {} out of range",
            tile.position(),
            tile.height()
        );
        // Leveling runs last, so no tile can still be void
        assert_ne!(tile.tile_type(), TileType::Void);
        if tile.tile_type() == TileType::Sea {
            assert!(
                tile.height() <= config.sea_level,
                "sea tile {} above sea level: {}",
                tile.position(),
                tile.height()
            );
        }
    }
}

#[test]
fn test_world_gen_region_membership() {
    let world = World::generate(test_config()).unwrap();

    assert!(world.regions().len() <= 90);

    // Region icons are unique
    let icons: HashSet<char> =
        world.regions().iter().map(|r| r.icon()).collect();
    assert_eq!(icons.len(), world.regions().len());

    // Every tile a region claims points back at that region, and no tile is
    // claimed twice
    let mut claimed: HashSet<(i32, i32)> = HashSet::new();
    for region in world.regions() {
        for &p in region.tiles() {
            assert!(
                claimed.insert((p.x(), p.y())),
                "tile {} claimed by two regions",
                p
            );
            let owner = world.region_of(p).unwrap();
            assert_eq!(owner.id(), region.id());
        }
    }

    // And the other direction: a tile with a region appears in that region's
    // tile list
    for tile in world.grid().iter() {
        if let Some(id) = tile.region() {
            assert!(world.region(id).tiles().contains(&tile.position()));
        }
    }
}

#[test]
fn test_world_gen_continent_membership() {
    let config = test_config();
    let world = World::generate(config).unwrap();

    assert_eq!(world.continents().len(), config.continent_count as usize);

    // Continents are pairwise disjoint, and each member region points back
    let mut claimed: HashSet<RegionId> = HashSet::new();
    for continent in world.continents() {
        assert!(!continent.regions().is_empty());
        for &rid in continent.regions() {
            assert!(claimed.insert(rid), "{} in two continents", rid);
            assert_eq!(
                world.region(rid).continent(),
                Some(continent.id())
            );
        }
    }

    // Continental regions produced land
    let land = world
        .grid()
        .iter()
        .filter(|t| t.tile_type() == TileType::Land)
        .count();
    assert!(land > 0, "no land generated");
}

#[test]
fn test_world_gen_is_deterministic() {
    let config = test_config();
    let a = World::generate(config).unwrap();
    let b = World::generate(config).unwrap();
    for (ta, tb) in a.grid().iter().zip(b.grid().iter()) {
        assert_eq!(ta.height(), tb.height());
        assert_eq!(ta.tile_type(), tb.tile_type());
        assert_eq!(ta.terrain(), tb.terrain());
        assert_eq!(ta.temperature(), tb.temperature());
        assert_eq!(ta.precipitation(), tb.precipitation());
    }
}

#[test]
fn test_world_gen_precipitation_capped_by_temperature() {
    let world = World::generate(test_config()).unwrap();
    for tile in world.grid().iter() {
        assert!(tile.precipitation() <= tile.temperature());
    }
}

#[test]
fn test_tile_at_wraps() {
    let config = test_config();
    let world = World::generate(config).unwrap();
    let w = config.width as i32;
    let h = config.height as i32;
    assert_eq!(
        world.tile_at(-1, -1).position(),
        world.tile_at(w - 1, h - 1).position()
    );
    assert_eq!(
        world.tile_at(w, h).position(),
        world.tile_at(0, 0).position()
    );
}

#[test]
fn test_random_land_tile_is_land() {
    let world = World::generate(test_config()).unwrap();
    let mut rng = Pcg64::seed_from_u64(99);
    for _ in 0..20 {
        let p = world.random_land_tile(&mut rng).unwrap();
        assert_eq!(world.tile_at(p.x(), p.y()).tile_type(), TileType::Land);
    }
}

#[test]
fn test_regenerate_preserves_invariants() {
    let config = test_config();
    let mut world = World::generate(config).unwrap();
    world.regenerate().unwrap();

    // New seed, same structural guarantees
    assert_eq!(world.continents().len(), config.continent_count as usize);
    for tile in world.grid().iter() {
        assert!((config.min_altitude..=config.max_altitude)
            .contains(&tile.height()));
        assert_ne!(tile.tile_type(), TileType::Void);
    }
}

#[test]
fn test_regenerate_with_invalid_config_keeps_old_world() {
    let config = test_config();
    let mut world = World::generate(config).unwrap();
    let heights: Vec<i32> =
        world.grid().iter().map(|t| t.height()).collect();

    let bad = WorldConfig {
        seed_count: 0,
        ..config
    };
    assert!(world.regenerate_with(bad).is_err());

    // The failed regenerate left the world untouched
    let after: Vec<i32> = world.grid().iter().map(|t| t.height()).collect();
    assert_eq!(heights, after);
}
