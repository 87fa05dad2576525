//! Conversion between device sRGB and CIE Lab
//!
//! Uses the sRGB transfer curve, Rec.709 primaries and a D65 white point, so
//! catalog colors and image pixels land in the same perceptual space.

use image::{Rgb, RgbImage};
use ndarray::Array3;

use crate::color::lab::Lab;
use crate::io::configuration::LAB_CHANNELS;
use crate::io::error::{MosaicError, Result, invalid_parameter};

const RGB_TO_XYZ: [[f32; 3]; 3] = [
    [0.412_453, 0.357_580, 0.180_423],
    [0.212_671, 0.715_160, 0.072_169],
    [0.019_334, 0.119_193, 0.950_227],
];

const XYZ_TO_RGB: [[f32; 3]; 3] = [
    [3.240_479, -1.537_150, -0.498_535],
    [-0.969_256, 1.875_991, 0.041_556],
    [0.055_648, -0.204_043, 1.057_311],
];

// D65 reference white, Y normalized to one
const WHITE_X: f32 = 0.950_456;
const WHITE_Z: f32 = 1.088_754;

// (6/29)^3 and its image under the forward curve
const EPSILON: f32 = 0.008_856;
const EPSILON_F: f32 = 0.206_893;
const KAPPA_SLOPE: f32 = 7.787;
const F_OFFSET: f32 = 16.0 / 116.0;

/// Decode one sRGB channel in `[0, 1]` to linear light
pub fn srgb_to_linear(value: f32) -> f32 {
    if value <= 0.040_45 {
        value / 12.92
    } else {
        ((value + 0.055) / 1.055).powf(2.4)
    }
}

/// Encode one linear-light channel in `[0, 1]` with the sRGB curve
pub fn linear_to_srgb(value: f32) -> f32 {
    if value <= 0.040_45 / 12.92 {
        value * 12.92
    } else {
        1.055f32.mul_add(value.max(0.0).powf(1.0 / 2.4), -0.055)
    }
}

fn lab_f(t: f32) -> f32 {
    if t > EPSILON {
        t.cbrt()
    } else {
        KAPPA_SLOPE.mul_add(t, F_OFFSET)
    }
}

fn lab_f_inv(t: f32) -> f32 {
    if t > EPSILON_F {
        t * t * t
    } else {
        (t - F_OFFSET) / KAPPA_SLOPE
    }
}

fn multiply(matrix: [[f32; 3]; 3], v: [f32; 3]) -> [f32; 3] {
    matrix.map(|row| row[0] * v[0] + row[1] * v[1] + row[2] * v[2])
}

/// Convert an 8-bit sRGB triplet to Lab
pub fn srgb_to_lab(rgb: [u8; 3]) -> Lab {
    let linear = rgb.map(|channel| srgb_to_linear(f32::from(channel) / 255.0));
    let [x, y, z] = multiply(RGB_TO_XYZ, linear);

    let fx = lab_f(x / WHITE_X);
    let fy = lab_f(y);
    let fz = lab_f(z / WHITE_Z);

    Lab::new(
        116.0f32.mul_add(fy, -16.0),
        500.0 * (fx - fy),
        200.0 * (fy - fz),
    )
}

/// Convert a Lab color to 8-bit sRGB, clamping out-of-gamut values
pub fn lab_to_srgb(lab: Lab) -> [u8; 3] {
    let fy = (lab.l + 16.0) / 116.0;
    let fx = lab.a / 500.0 + fy;
    let fz = fy - lab.b / 200.0;

    let xyz = [
        lab_f_inv(fx) * WHITE_X,
        lab_f_inv(fy),
        lab_f_inv(fz) * WHITE_Z,
    ];

    multiply(XYZ_TO_RGB, xyz).map(|linear| {
        let encoded = linear_to_srgb(linear.clamp(0.0, 1.0));
        (encoded * 255.0).round().clamp(0.0, 255.0) as u8
    })
}

/// Convert an sRGB image into a `(rows, cols, 3)` Lab buffer
pub fn rgb_image_to_lab(image: &RgbImage) -> Array3<f32> {
    let (width, height) = image.dimensions();
    let mut lab = Array3::zeros((height as usize, width as usize, LAB_CHANNELS));

    for (x, y, pixel) in image.enumerate_pixels() {
        let channels = srgb_to_lab(pixel.0).to_array();
        for (c, value) in channels.into_iter().enumerate() {
            if let Some(slot) = lab.get_mut((y as usize, x as usize, c)) {
                *slot = value;
            }
        }
    }

    lab
}

/// Convert a `(rows, cols, 3)` Lab buffer back into an sRGB image
///
/// # Errors
///
/// Returns an error if:
/// - The buffer does not have exactly three channels
/// - A dimension does not fit in `u32`
pub fn lab_to_rgb_image(lab: &Array3<f32>) -> Result<RgbImage> {
    let (rows, cols, channels) = lab.dim();
    if channels != LAB_CHANNELS {
        return Err(MosaicError::ChannelMismatch {
            expected: LAB_CHANNELS,
            actual: channels,
        });
    }

    let width = u32::try_from(cols).map_err(|e| invalid_parameter("cols", &cols, &e))?;
    let height = u32::try_from(rows).map_err(|e| invalid_parameter("rows", &rows, &e))?;

    Ok(RgbImage::from_fn(width, height, |x, y| {
        let pixel = lab.slice(ndarray::s![y as usize, x as usize, ..]);
        let color = Lab::new(
            pixel.get(0).copied().unwrap_or_default(),
            pixel.get(1).copied().unwrap_or_default(),
            pixel.get(2).copied().unwrap_or_default(),
        );
        Rgb(lab_to_srgb(color))
    }))
}
