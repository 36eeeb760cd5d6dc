//! Coherent-noise support and the height perturbation pass.

use crate::world::{
    generate::{Generate, WorldBuilder},
    grid::GridPoint,
};
use noise::{NoiseFn, OpenSimplex, Seedable};
use rand::Rng;

/// A seeded 2D coherent-noise function over grid points. Wraps the noise
/// crate's simplex-class generator and applies an input scale, so callers
/// just hand in a tile position.
pub struct WorldNoiseFn {
    noise_fn: OpenSimplex,
    scale: f64,
}

impl WorldNoiseFn {
    /// Build a new noise function with a seed drawn from the world RNG, so
    /// each generation pass gets its own independent field.
    pub fn new(rng: &mut impl Rng, scale: f64) -> Self {
        Self {
            noise_fn: OpenSimplex::new().set_seed(rng.gen()),
            scale,
        }
    }

    /// Noise value at the given point, roughly in [-1, 1].
    pub fn get(&self, point: GridPoint) -> f64 {
        self.noise_fn.get([
            point.x() as f64 * self.scale,
            point.y() as f64 * self.scale,
        ])
    }
}

/// Perturb every tile's height with weighted coherent noise, breaking up the
/// straight polygon edges the partitioner leaves behind.
#[derive(Debug)]
pub struct NoiseGenerator;

impl Generate for NoiseGenerator {
    fn generate(&self, world: &mut WorldBuilder) -> anyhow::Result<()> {
        let config = world.config;
        let noise_fn = WorldNoiseFn::new(&mut world.rng, config.noise_scale);
        for tile in world.grid.iter_mut() {
            let delta =
                (config.noise_weight * noise_fn.get(tile.position())).round();
            tile.height += delta as i32;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn test_noise_is_deterministic_per_seed() {
        let mut rng = Pcg64::seed_from_u64(7);
        let a = WorldNoiseFn::new(&mut rng, 0.1);
        let mut rng = Pcg64::seed_from_u64(7);
        let b = WorldNoiseFn::new(&mut rng, 0.1);
        for i in 0..32 {
            let p = GridPoint::new(i, i * 3);
            assert_eq!(a.get(p), b.get(p));
        }
    }

    #[test]
    fn test_noise_is_bounded() {
        let mut rng = Pcg64::seed_from_u64(11);
        let noise_fn = WorldNoiseFn::new(&mut rng, 0.1);
        for x in 0..64 {
            for y in 0..64 {
                let v = noise_fn.get(GridPoint::new(x, y));
                assert!((-1.0..=1.0).contains(&v), "noise {} out of range", v);
            }
        }
    }
}
