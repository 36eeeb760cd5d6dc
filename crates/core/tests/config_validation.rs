use tessera::{ClimateConfig, World, WorldConfig};
use validator::ValidationErrors;

#[test]
fn test_config_validation() {
    let config = WorldConfig {
        seed: 0,
        width: 0,  // invalid (too small)
        height: 40,
        min_altitude: 0,
        sea_level: 9, // invalid vs max_altitude below
        max_altitude: 9,
        seed_count: 0, // invalid
        mountains_per_continent: 0, // valid (but bland)
        mountain_range_length: 0,   // valid (but bland)
        continent_count: 91, // invalid (exceeds the icon alphabet)
        percent_land: 50,
        noise_weight: 3.0,
        noise_scale: 0.1,
        climate: ClimateConfig {
            max_temp: 11, // invalid
            ..ClimateConfig::default()
        },
    };

    // This is a bit of a lazy check but it works well enough
    let err = World::generate(config).unwrap_err();
    let validation_errors = err.downcast::<ValidationErrors>().unwrap();
    let mut error_fields = validation_errors
        .errors()
        .keys()
        .copied()
        .collect::<Vec<&str>>();
    error_fields.sort_unstable();
    assert_eq!(
        error_fields,
        // __all__ is the cross-field altitude ordering check
        vec!["__all__", "climate", "continent_count", "seed_count", "width"],
        "incorrect validation errors in {:#?}",
        validation_errors
    );
}
