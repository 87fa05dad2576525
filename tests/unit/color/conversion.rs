//! Tests for sRGB and Lab conversion of colors and pixel buffers

#[cfg(test)]
mod tests {
    use crate::assert_lab_close;
    use image::{Rgb, RgbImage};
    use ndarray::Array3;
    use partmosaic::Lab;
    use partmosaic::MosaicError;
    use partmosaic::color::conversion::{
        lab_to_rgb_image, lab_to_srgb, linear_to_srgb, rgb_image_to_lab, srgb_to_lab,
        srgb_to_linear,
    };

    // Tests the reference points of the Lab scale
    // Verified by dropping the white point normalization
    #[test]
    fn test_black_white_and_primaries() {
        assert_lab_close(srgb_to_lab([0, 0, 0]), Lab::new(0.0, 0.0, 0.0), 0.01);
        assert_lab_close(srgb_to_lab([255, 255, 255]), Lab::new(100.0, 0.0, 0.0), 0.05);
        assert_lab_close(srgb_to_lab([255, 0, 0]), Lab::new(53.24, 80.09, 67.20), 0.3);
        assert_lab_close(srgb_to_lab([0, 0, 255]), Lab::new(32.30, 79.19, -107.86), 0.3);
    }

    // Tests mid gray sits at the expected lightness with no chroma
    // Verified by skipping the sRGB decode
    #[test]
    fn test_mid_gray_is_neutral() {
        let gray = srgb_to_lab([128, 128, 128]);
        assert!((gray.l - 53.59).abs() < 0.1);
        assert!(gray.a.abs() < 0.05);
        assert!(gray.b.abs() < 0.05);
    }

    // Tests that every 8-bit gray survives a round trip
    // Verified by using the wrong inverse threshold in lab_f_inv
    #[test]
    fn test_gray_ramp_round_trips() {
        for value in 0..=255u8 {
            let rgb = [value, value, value];
            assert_eq!(lab_to_srgb(srgb_to_lab(rgb)), rgb);
        }
    }

    // Tests the transfer curve inverse pair
    // Verified by changing the linear segment slope
    #[test]
    fn test_transfer_curve_inverse() {
        for step in 0..=20 {
            let value = step as f32 / 20.0;
            assert!((linear_to_srgb(srgb_to_linear(value)) - value).abs() < 1e-5);
        }
    }

    // Tests out-of-gamut Lab clamps instead of wrapping
    // Verified by removing the clamp before the u8 cast
    #[test]
    fn test_out_of_gamut_clamps() {
        assert_eq!(lab_to_srgb(Lab::new(150.0, 0.0, 0.0)), [255, 255, 255]);
        assert_eq!(lab_to_srgb(Lab::new(-20.0, 0.0, 0.0)), [0, 0, 0]);
    }

    // Tests buffer conversion keeps the row/column layout
    // Verified by transposing x and y in rgb_image_to_lab
    #[test]
    fn test_image_buffers_round_trip() {
        let mut image = RgbImage::new(3, 2);
        image.put_pixel(2, 0, Rgb([255, 0, 0]));
        image.put_pixel(0, 1, Rgb([0, 0, 255]));

        let lab = rgb_image_to_lab(&image);
        assert_eq!(lab.dim(), (2, 3, 3));
        assert!(lab[(0, 2, 1)] > 70.0);
        assert!(lab[(1, 0, 2)] < -100.0);

        let back = lab_to_rgb_image(&lab).unwrap();
        assert_eq!(back.dimensions(), (3, 2));
        assert_eq!(back.get_pixel(2, 0), &Rgb([255, 0, 0]));
        assert_eq!(back.get_pixel(0, 1), &Rgb([0, 0, 255]));
        assert_eq!(back.get_pixel(1, 1), &Rgb([0, 0, 0]));
    }

    // Tests channel validation on the way back to RGB
    // Verified by removing the channel check
    #[test]
    fn test_wrong_channel_count_rejected() {
        let lab = Array3::<f32>::zeros((2, 2, 4));
        let result = lab_to_rgb_image(&lab);
        assert!(matches!(
            result,
            Err(MosaicError::ChannelMismatch {
                expected: 3,
                actual: 4
            })
        ));
    }
}
