use image::Rgb;
use num::clamp;
use rand::Rng;

use crate::errors::*;

/// Parse `#RRGGBB` (the leading `#` is optional) into an RGB colour.
pub fn parse_hex_colour(text: &str) -> Result<Rgb<u8>> {
    let hex = text.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ErrorKind::InvalidColour(text.to_string()).into());
    }

    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).chain_err(|| ErrorKind::InvalidColour(text.to_string()))
    };
    Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}

pub fn to_hex_colour(colour: Rgb<u8>) -> String {
    format!("#{:02X}{:02X}{:02X}", colour[0], colour[1], colour[2])
}

/// Multiply every channel by `factor`, truncating and clamping each to [0, 255].
pub fn scale(colour: Rgb<u8>, factor: f32) -> Rgb<u8> {
    let channel = |c: u8| clamp(c as f32 * factor, 0.0, 255.0) as u8;
    Rgb([channel(colour[0]), channel(colour[1]), channel(colour[2])])
}

/// Scale by a factor drawn uniformly from `[low, high)`.
pub fn jitter<R: Rng + ?Sized>(colour: Rgb<u8>, low: f32, high: f32, rng: &mut R) -> Rgb<u8> {
    if high > low {
        scale(colour, rng.gen_range(low..high))
    } else {
        scale(colour, low)
    }
}
