//! Gaussian smoothing of the height field.

use crate::world::generate::{Generate, WorldBuilder};

const SIGMA: f64 = 0.5;
/// Kernel radius for sigma 0.5 with the usual 4-sigma truncation.
const RADIUS: i64 = 2;

/// Blur the height field with a separable Gaussian (sigma 0.5), wrapping
/// toroidally at the grid edges, then round the heights back to integers.
/// This softens the hard steps left by region floors and mountain rasters.
#[derive(Debug)]
pub struct SmoothingGenerator;

impl Generate for SmoothingGenerator {
    fn generate(&self, world: &mut WorldBuilder) -> anyhow::Result<()> {
        let width = world.grid.width() as i64;
        let height = world.grid.height() as i64;
        let kernel = kernel();

        let heights: Vec<f64> =
            world.grid.iter().map(|t| t.height as f64).collect();

        // Horizontal pass, then vertical, both wrapping
        let mut pass1 = vec![0.0; heights.len()];
        for y in 0..height {
            for x in 0..width {
                let mut sum = 0.0;
                for (k, weight) in kernel.iter().enumerate() {
                    let sx = (x + k as i64 - RADIUS).rem_euclid(width);
                    sum += weight * heights[(y * width + sx) as usize];
                }
                pass1[(y * width + x) as usize] = sum;
            }
        }
        let mut pass2 = vec![0.0; heights.len()];
        for y in 0..height {
            for x in 0..width {
                let mut sum = 0.0;
                for (k, weight) in kernel.iter().enumerate() {
                    let sy = (y + k as i64 - RADIUS).rem_euclid(height);
                    sum += weight * pass1[(sy * width + x) as usize];
                }
                pass2[(y * width + x) as usize] = sum;
            }
        }

        for (tile, smoothed) in world.grid.iter_mut().zip(pass2) {
            tile.height = smoothed.round() as i32;
        }
        Ok(())
    }
}

/// Normalized 1D Gaussian kernel of radius [RADIUS].
fn kernel() -> [f64; (2 * RADIUS + 1) as usize] {
    let mut kernel = [0.0; (2 * RADIUS + 1) as usize];
    let mut total = 0.0;
    for (k, weight) in kernel.iter_mut().enumerate() {
        let x = (k as i64 - RADIUS) as f64;
        *weight = (-(x * x) / (2.0 * SIGMA * SIGMA)).exp();
        total += *weight;
    }
    for weight in &mut kernel {
        *weight /= total;
    }
    kernel
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_kernel_is_normalized() {
        let kernel = kernel();
        assert_approx_eq!(kernel.iter().sum::<f64>(), 1.0);
        // Symmetric, peaked in the middle
        assert_approx_eq!(kernel[0], kernel[4]);
        assert_approx_eq!(kernel[1], kernel[3]);
        assert!(kernel[2] > kernel[1] && kernel[1] > kernel[0]);
    }
}
