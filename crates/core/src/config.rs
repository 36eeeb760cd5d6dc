use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Configuration that defines a world gen process. Two worlds generated with
/// the same config will always be identical. This struct is owned by each
/// [World](crate::World); there is no shared default state between worlds.
/// Edits to a config take effect on the next generate/regenerate call, never
/// retroactively.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(default)]
// skip_on_field_errors is off so the cross-field check is reported even
// alongside per-field errors
#[validate(schema(
    function = "validate_altitudes",
    skip_on_field_errors = false
))]
pub struct WorldConfig {
    /// RNG seed to use for all randomized processes during world gen. The
    /// default is random, so two worlds generated from untouched default
    /// configs will differ in content (but never in structural invariants).
    pub seed: u64,

    /// Grid width, in tiles. The x axis wraps toroidally at this bound.
    #[validate(range(min = 4, max = 4096))]
    pub width: u32,
    /// Grid height, in tiles. The y axis wraps toroidally at this bound.
    #[validate(range(min = 4, max = 4096))]
    pub height: u32,

    /// Lowest height any tile can end up with after generation.
    pub min_altitude: i32,
    /// Sea tiles are clamped to at most this height. Must lie in
    /// `[min_altitude, max_altitude)`.
    pub sea_level: i32,
    /// Highest height any tile can end up with after generation. Mountain
    /// peaks and continent seeds are pinned to this value.
    pub max_altitude: i32,

    /// Number of random points fed to the Voronoi partition. More seeds mean
    /// smaller, more numerous regions. Zero seeds is a precondition violation
    /// and is rejected here, before generation starts. Note that the number
    /// of *valid* regions (cells fully inside the grid) must stay within the
    /// 90-symbol icon alphabet; that is checked during partitioning.
    #[validate(range(min = 1, max = 10000))]
    pub seed_count: u32,

    /// Mountain ranges rasterized per continent.
    #[validate(range(min = 0, max = 100))]
    pub mountains_per_continent: u32,
    /// Number of region-to-region steps in each mountain range walk.
    #[validate(range(min = 0, max = 1000))]
    pub mountain_range_length: u32,

    /// Number of continents to seed. Each seed consumes the seeded region
    /// plus all of its neighbors from the candidate pool, so this can't
    /// meaningfully exceed the valid region count.
    #[validate(range(min = 1, max = 90))]
    pub continent_count: u32,
    /// Target fraction (as a percentage) of valid regions that continents
    /// should cover once growth finishes.
    #[validate(range(min = 0, max = 100))]
    pub percent_land: u32,

    /// Amplitude of the coherent-noise height perturbation.
    #[validate(range(min = 0.0))]
    pub noise_weight: f64,
    /// Input scale of the coherent-noise height perturbation. Smaller values
    /// mean smoother, larger features.
    #[validate(range(min = 0.0))]
    pub noise_scale: f64,

    /// Config for the climate (temperature/precipitation) passes.
    #[validate]
    pub climate: ClimateConfig,
}

/// Configuration for the climate maps: an equator-falloff temperature field
/// and a noise-perturbed precipitation field, both of which feed the coarse
/// terrain classification and the heat/precipitation color filters.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ClimateConfig {
    /// Warmest possible temperature, found along the equator.
    #[validate(range(min = 0, max = 10))]
    pub max_temp: i32,
    /// Controls how hard temperature falls off towards the poles.
    #[validate(range(min = 0, max = 10))]
    pub min_temp: i32,
    /// Amplitude of the temperature noise term.
    #[validate(range(min = 0))]
    pub temp_variance: i32,
    /// Input scale of the temperature noise.
    #[validate(range(min = 0.0))]
    pub heat_noise_scale: f64,

    /// Precipitation level before the noise term is added.
    #[validate(range(min = 0, max = 10))]
    pub base_precip: i32,
    /// Amplitude of the precipitation noise term.
    #[validate(range(min = 0))]
    pub precip_variance: i32,
    /// Input scale of the precipitation noise.
    #[validate(range(min = 0.0))]
    pub precip_noise_scale: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        // Source of truth for a "nice world": an 80x40 grid with four
        // continents covering about half the valid regions
        Self {
            // Danger! This means the default will vary between calls!
            seed: rand::random(),

            width: 80,
            height: 40,
            min_altitude: 0,
            sea_level: 3,
            max_altitude: 9,
            seed_count: 100,
            mountains_per_continent: 1,
            mountain_range_length: 3,
            continent_count: 4,
            percent_land: 50,
            noise_weight: 3.0,
            noise_scale: 0.1,
            climate: ClimateConfig::default(),
        }
    }
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            max_temp: 7,
            min_temp: 3,
            temp_variance: 3,
            heat_noise_scale: 0.075,
            base_precip: 5,
            precip_variance: 5,
            precip_noise_scale: 0.05,
        }
    }
}

/// The three altitude fields are individually unbounded but must be mutually
/// consistent: `min_altitude <= sea_level < max_altitude`.
fn validate_altitudes(config: &WorldConfig) -> Result<(), ValidationError> {
    if config.min_altitude <= config.sea_level
        && config.sea_level < config.max_altitude
    {
        Ok(())
    } else {
        Err(ValidationError::new(
            "altitudes must satisfy min_altitude <= sea_level < max_altitude",
        ))
    }
}
