//! The continent assembler: randomized seed selection followed by greedy
//! frontier growth over the region-adjacency graph, producing mutually
//! exclusive, spatially separated continents covering a target share of the
//! valid regions.

use crate::world::{
    generate::{Generate, WorldBuilder},
    region::{Continent, ContinentId, RegionId},
};
use anyhow::{bail, ensure};
use fnv::FnvHashSet;
use log::{info, warn};
use rand::{seq::IteratorRandom, seq::SliceRandom, Rng};

/// Consecutive zero-growth passes tolerated before the contested-border
/// guard is relaxed. Growth can stall legitimately when every remaining
/// frontier region borders two continents.
const MAX_STALLED_PASSES: u32 = 3;

#[derive(Debug)]
pub struct ContinentGenerator;

impl Generate for ContinentGenerator {
    fn generate(&self, world: &mut WorldBuilder) -> anyhow::Result<()> {
        let seeds = select_seeds(world)?;

        for (i, &seed) in seeds.iter().enumerate() {
            let id = ContinentId(i);
            let region = &mut world.regions[seed.index()];
            region.continent = Some(id);
            world.continents.push(Continent {
                id,
                icon: region.icon,
                color: world.rng.gen(),
                regions: vec![seed],
            });
            // Continents start with a peak: the whole seed region is pinned
            // to the maximum altitude
            let tiles = world.regions[seed.index()].tiles.clone();
            for p in tiles {
                world.grid.tile_at_mut(p.x(), p.y()).height =
                    world.config.max_altitude;
            }
        }

        grow_continents(world);
        Ok(())
    }
}

/// Pick one seed region per continent. The first seed comes from resolving
/// random grid tiles to their owning region; each accepted seed removes
/// itself and all of its neighbors from the candidate pool, which keeps
/// seeds spatially separated. Pool exhaustion is a configuration error (too
/// many continents for the region count), reported rather than retried.
fn select_seeds(world: &mut WorldBuilder) -> anyhow::Result<Vec<RegionId>> {
    let config = &world.config;
    let continent_count = config.continent_count as usize;
    ensure!(
        !world.regions.is_empty(),
        "no valid regions to seed continents from"
    );

    let mut pool: FnvHashSet<RegionId> =
        world.regions.iter().map(|r| r.id).collect();
    let mut seeds: Vec<RegionId> = Vec::with_capacity(continent_count);

    // First seed: random tiles until one resolves to a region. Bounded so a
    // grid with no assigned tiles at all can't spin forever.
    let attempts = (config.width * config.height * 4) as usize;
    let first = (0..attempts).find_map(|_| {
        let x = world.rng.gen_range(0..config.width as i32);
        let y = world.rng.gen_range(0..config.height as i32);
        world.grid.tile_at(x, y).region()
    });
    let first = match first.or_else(|| {
        // Every tile degraded to void; fall back to any region that owns
        // tiles so seeding can still proceed
        world.regions.iter().find(|r| !r.tiles.is_empty()).map(|r| r.id)
    }) {
        Some(region) => region,
        None => bail!("no region owns any tile; cannot seed continents"),
    };
    accept_seed(world, &mut pool, &mut seeds, first);

    while seeds.len() < continent_count {
        let next = match pool.iter().copied().choose(&mut world.rng) {
            Some(region) => region,
            None => bail!(
                "continent seed pool exhausted after {} of {} seeds; \
                 lower continent_count or raise seed_count",
                seeds.len(),
                continent_count
            ),
        };
        accept_seed(world, &mut pool, &mut seeds, next);
    }
    Ok(seeds)
}

fn accept_seed(
    world: &WorldBuilder,
    pool: &mut FnvHashSet<RegionId>,
    seeds: &mut Vec<RegionId>,
    seed: RegionId,
) {
    seeds.push(seed);
    pool.remove(&seed);
    for &neighbor in &world.regions[seed.index()].adjacent {
        pool.remove(&neighbor);
    }
}

/// Grow every continent toward the land quota. Each pass shuffles the
/// continent processing order (to avoid positional bias), then lets each
/// continent claim its adjacent unclaimed regions, minus any region that is
/// also adjacent to a *different* continent: that mutual-exclusion guard is
/// what keeps two continents from ever touching. The guard can wedge growth
/// entirely, so after [MAX_STALLED_PASSES] fruitless passes it is dropped;
/// if even a relaxed pass adds nothing, the remaining frontier is empty and
/// the loop ends under quota.
fn grow_continents(world: &mut WorldBuilder) {
    let quota = (world.regions.len() as f64
        * (world.config.percent_land as f64 / 100.0))
        as usize;
    let mut claimed: FnvHashSet<RegionId> = world
        .continents
        .iter()
        .flat_map(|c| c.regions.iter().copied())
        .collect();
    let mut stalled = 0;
    let mut relaxed = false;

    'grow: while claimed.len() < quota {
        let mut grew = false;
        let mut order: Vec<usize> = (0..world.continents.len()).collect();
        order.shuffle(&mut world.rng);

        for c in order {
            // The continent's frontier: neighbors of its members that no
            // one has claimed yet
            let members = world.continents[c].regions.clone();
            let mut frontier: Vec<RegionId> = members
                .iter()
                .flat_map(|&r| world.regions[r.index()].adjacent.iter())
                .copied()
                .filter(|r| !claimed.contains(r))
                .collect();
            frontier.sort_unstable_by_key(|r| r.index());
            frontier.dedup();

            if !relaxed {
                // Contested regions (adjacent to some other continent's
                // members) are off limits to everyone this pass
                frontier.retain(|&r| {
                    !world.regions[r.index()].adjacent.iter().any(|&n| {
                        world.regions[n.index()]
                            .continent
                            .map_or(false, |owner| owner.index() != c)
                    })
                });
            }

            for r in frontier {
                if claimed.len() >= quota {
                    break 'grow;
                }
                if claimed.insert(r) {
                    world.continents[c].regions.push(r);
                    world.regions[r.index()].continent =
                        Some(ContinentId(c));
                    grew = true;
                }
            }
        }

        if grew {
            stalled = 0;
        } else {
            stalled += 1;
            if relaxed {
                warn!(
                    "continent growth exhausted at {}/{} regions",
                    claimed.len(),
                    quota
                );
                break;
            }
            if stalled >= MAX_STALLED_PASSES {
                warn!(
                    "continent growth stalled at {}/{} regions; \
                     relaxing contested-border guard",
                    claimed.len(),
                    quota
                );
                relaxed = true;
            }
        }
    }

    info!(
        "Assembled {} continents over {} regions (quota {})",
        world.continents.len(),
        claimed.len(),
        quota
    );
}
