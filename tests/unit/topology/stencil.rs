//! Tests for topology tables and the circle stencil

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};
    use partmosaic::io::configuration::{ROUND_1X1, ROUND_2X2, TILE_1X1};
    use partmosaic::topology::stencil::{CIRCLE_GROUP_PARTS, CIRCLE_STAGES};
    use partmosaic::{MosaicConfig, MosaicError, Topology};

    // Tests the circle stencil places each group where expected
    // Verified by painting the small disk before the large one
    #[test]
    fn test_circle_layout() {
        let topology = Topology::circle(2, 20).unwrap();
        assert_eq!(topology.side(), 10);
        assert_eq!(topology.group_count(), 6);

        assert_eq!(topology.group_at(0, 0), Some(0));
        assert_eq!(topology.group_at(0, 9), Some(1));
        assert_eq!(topology.group_at(9, 0), Some(2));
        assert_eq!(topology.group_at(9, 9), Some(3));
        assert_eq!(topology.group_at(5, 0), Some(4));
        assert_eq!(topology.group_at(5, 1), Some(4));
        assert_eq!(topology.group_at(5, 5), Some(5));
        assert_eq!(topology.group_at(5, 7), Some(5));
        assert_eq!(topology.group_at(10, 0), None);
    }

    // Tests every cell is counted in exactly one group and every group is used
    // Verified by leaving the small disk unpainted
    #[test]
    fn test_circle_group_sizes() {
        let topology = Topology::circle(4, 64).unwrap();
        let sizes = topology.group_sizes();
        assert_eq!(sizes.len(), 6);
        assert_eq!(sizes.iter().sum::<usize>(), 16 * 16);
        assert!(sizes.iter().all(|&size| size > 0));
        assert_eq!(topology.raster().dim(), (16, 16));
    }

    // Tests the circle part table and stage order
    // Verified by quantizing the quadrants first
    #[test]
    fn test_circle_parts_and_stages() {
        let topology = Topology::circle(1, 12).unwrap();
        assert_eq!(topology.group_parts(), &CIRCLE_GROUP_PARTS);
        assert_eq!(topology.part_for(0), Some(TILE_1X1));
        assert_eq!(topology.part_for(4), Some(ROUND_2X2));
        assert_eq!(topology.part_for(5), Some(ROUND_1X1));
        assert_eq!(topology.part_for(6), None);

        let stages: Vec<Vec<usize>> = CIRCLE_STAGES.iter().map(|s| s.to_vec()).collect();
        assert_eq!(topology.stages(), stages.as_slice());
        assert_eq!(topology.stages()[0], vec![4]);
    }

    // Tests tile side is the long side divided by the tile count
    // Verified by dividing the short side
    #[test]
    fn test_circle_for_uses_long_side() {
        let config = MosaicConfig::default().with_tiles_per_long_side(4);
        let topology = Topology::circle_for(&config, 30, 81).unwrap();
        assert_eq!(topology.side(), 20);
        assert_eq!(topology.tile_grid(30, 81), (2, 5));
    }

    // Tests impossible tile counts are rejected
    // Verified by allowing a zero tile side
    #[test]
    fn test_circle_rejects_empty_tiles() {
        assert!(matches!(
            Topology::circle(0, 20),
            Err(MosaicError::InvalidParameter { .. })
        ));
        assert!(matches!(
            Topology::circle(30, 20),
            Err(MosaicError::InvalidParameter { .. })
        ));
        assert!(matches!(
            Topology::circle_for(&MosaicConfig::default(), 40, 50),
            Err(MosaicError::InvalidParameter { .. })
        ));
    }

    // Tests tile sides that leave a circle group without cells are rejected
    // Verified by skipping the empty group check in circle
    #[test]
    fn test_circle_rejects_empty_groups() {
        for side in [1, 2, 4, 6] {
            assert!(
                matches!(
                    Topology::circle(1, side),
                    Err(MosaicError::InvalidParameter {
                        parameter: "tiles_per_long_side",
                        ..
                    })
                ),
                "side {side} should be rejected"
            );
        }

        for side in [3, 5, 7, 8, 9] {
            let topology = Topology::circle(1, side).unwrap();
            assert!(topology.group_sizes().iter().all(|&size| size > 0));
        }

        // 384 px at the default 96 tiles gives 4-pixel tiles
        assert!(Topology::circle_for(&MosaicConfig::default(), 384, 300).is_err());
        assert_eq!(
            Topology::circle_for(&MosaicConfig::default(), 480, 300)
                .unwrap()
                .side(),
            5
        );
    }

    // Tests partial tiles at the edges are counted
    // Verified by using floor division
    #[test]
    fn test_tile_grid() {
        let topology = Topology::new(Array2::zeros((4, 4)), vec![0], vec![vec![0]]).unwrap();
        assert_eq!(topology.tile_grid(8, 8), (2, 2));
        assert_eq!(topology.tile_grid(9, 7), (3, 2));
        assert_eq!(topology.tile_grid(0, 0), (0, 0));
    }

    // Tests malformed topology tables are refused
    // Verified by skipping the stage coverage check
    #[test]
    fn test_new_rejects_malformed_tables() {
        let square = array![[0, 1], [1, 1]];

        let not_square = Array2::zeros((2, 3));
        assert!(matches!(
            Topology::new(not_square, vec![0], vec![vec![0]]),
            Err(MosaicError::InvalidTopology { .. })
        ));

        let unknown_group = Topology::new(square.clone(), vec![0], vec![vec![0]]);
        assert!(matches!(unknown_group, Err(MosaicError::InvalidTopology { .. })));

        let no_stages = Topology::new(square.clone(), vec![0, 0], Vec::new());
        assert!(matches!(no_stages, Err(MosaicError::InvalidTopology { .. })));

        let empty_stage = Topology::new(square.clone(), vec![0, 0], vec![vec![0, 1], vec![]]);
        assert!(matches!(empty_stage, Err(MosaicError::InvalidTopology { .. })));

        let repeated = Topology::new(square.clone(), vec![0, 0], vec![vec![0, 1], vec![1]]);
        assert!(matches!(repeated, Err(MosaicError::InvalidTopology { .. })));

        let empty_group = Topology::new(square.clone(), vec![0, 0, 0], vec![vec![0, 1, 2]]);
        assert!(matches!(empty_group, Err(MosaicError::InvalidTopology { .. })));

        let missing = Topology::new(square.clone(), vec![0, 0], vec![vec![1]]);
        assert!(matches!(missing, Err(MosaicError::InvalidTopology { .. })));

        assert!(Topology::new(square, vec![0, 0], vec![vec![1], vec![0]]).is_ok());
    }
}
