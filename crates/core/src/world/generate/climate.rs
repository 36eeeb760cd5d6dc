//! Climate maps: an equator-falloff temperature field and a noise-perturbed
//! precipitation field. Both are integer scalars per tile, consumed by the
//! terrain classification pass and the heat/precipitation color filters.

use crate::world::generate::{noise::WorldNoiseFn, Generate, WorldBuilder};

#[derive(Debug)]
pub struct ClimateGenerator;

impl Generate for ClimateGenerator {
    fn generate(&self, world: &mut WorldBuilder) -> anyhow::Result<()> {
        let climate = world.config.climate;
        let heat_noise =
            WorldNoiseFn::new(&mut world.rng, climate.heat_noise_scale);
        let precip_noise =
            WorldNoiseFn::new(&mut world.rng, climate.precip_noise_scale);
        let equator = (world.config.height / 2) as f64;

        for tile in world.grid.iter_mut() {
            let p = tile.position();

            // Hottest at the equator, with a slightly super-linear falloff
            // toward the wrap seam "poles"
            let latitude = (p.y() as f64 - equator).abs() / equator;
            let falloff = (climate.min_temp as f64 * latitude).powf(1.1);
            let variance =
                (climate.temp_variance as f64 * heat_noise.get(p)) as i32;
            tile.temperature =
                (climate.max_temp as f64 - falloff + variance as f64) as i32;

            let variance =
                (climate.precip_variance as f64 * precip_noise.get(p)) as i32;
            tile.precipitation =
                (climate.base_precip + variance).min(tile.temperature);
        }
        Ok(())
    }
}
