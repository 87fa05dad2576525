//! Tests for pass configuration defaults, validation and deserialization

#[cfg(test)]
mod tests {
    use partmosaic::io::configuration::{
        DEFAULT_LUMINANCE_WEIGHT, DEFAULT_TILES_PER_LONG_SIDE, MosaicConfig,
        REFERENCE_PART_TYPE_COUNT, ROUND_1X1, ROUND_2X2, TILE_1X1,
    };
    use partmosaic::MosaicError;

    // Tests defaults of every knob
    // Verified by changing the default tile count
    #[test]
    fn test_defaults() {
        let config = MosaicConfig::default();
        assert_eq!(config.tiles_per_long_side, DEFAULT_TILES_PER_LONG_SIDE);
        assert_eq!(config.tiles_per_long_side, 96);
        assert!((config.luminance_weight - DEFAULT_LUMINANCE_WEIGHT).abs() < f32::EPSILON);
        assert!(config.validate().is_ok());
    }

    // Tests part type indices stay inside the reference catalog
    // Verified by moving ROUND_2X2 past the column count
    #[test]
    fn test_part_type_constants() {
        for part_type in [TILE_1X1, ROUND_1X1, ROUND_2X2] {
            assert!(part_type < REFERENCE_PART_TYPE_COUNT);
        }
        assert_ne!(ROUND_1X1, ROUND_2X2);
    }

    // Tests rejection of unusable luminance weights
    // Verified by accepting negative weights
    #[test]
    fn test_invalid_luminance_weight() {
        for weight in [-0.5, f32::NAN, f32::INFINITY] {
            let config = MosaicConfig::default().with_luminance_weight(weight);
            assert!(matches!(
                config.validate(),
                Err(MosaicError::InvalidParameter {
                    parameter: "luminance_weight",
                    ..
                })
            ));
        }
        assert!(
            MosaicConfig::default()
                .with_luminance_weight(0.0)
                .validate()
                .is_ok()
        );
    }

    // Tests tile count validation and tile side derivation
    // Verified by rounding the tile side up
    #[test]
    fn test_tile_side() {
        let config = MosaicConfig::default().with_tiles_per_long_side(10);
        assert_eq!(config.tile_side(105).unwrap(), 10);
        assert_eq!(config.tile_side(10).unwrap(), 1);
        assert!(config.tile_side(9).is_err());

        let zero = MosaicConfig::default().with_tiles_per_long_side(0);
        assert!(zero.validate().is_err());
        assert!(zero.tile_side(100).is_err());
    }

    // Tests partial JSON falls back to defaults for missing fields
    // Verified by removing serde(default)
    #[test]
    fn test_deserialize_with_defaults() {
        let config: MosaicConfig = serde_json::from_str(r#"{"luminance_weight": 2.5}"#).unwrap();
        assert!((config.luminance_weight - 2.5).abs() < f32::EPSILON);
        assert_eq!(config.tiles_per_long_side, DEFAULT_TILES_PER_LONG_SIDE);

        let round_trip: MosaicConfig =
            serde_json::from_str(&serde_json::to_string(&config).unwrap()).unwrap();
        assert_eq!(round_trip, config);
    }

    // Tests the diffusion weights are not a configurable knob
    // Verified by dropping deny_unknown_fields
    #[test]
    fn test_kernel_field_rejected() {
        let result = serde_json::from_str::<MosaicConfig>(r#"{"kernel": "false_floyd_steinberg"}"#);
        assert!(result.is_err());
    }
}
