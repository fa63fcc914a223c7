//! # Output Module
//!
//! Persists and streams rendered images:
//! - PNG export with gamma-2 tone mapping to 8-bit channels
//! - EXR export preserving linear HDR values
//! - Real-time visualization via TEV (The EXR Viewer)
//!
//! The render loop hands over a dense row-major `f32` RGB buffer; all
//! conversion and I/O happens here. I/O failures are logged and swallowed
//! so an expensive render is never lost to a write error mid-flight.

use exr::prelude::*;
use image::{ImageBuffer, Rgb};
use log::{debug, info, warn};
use std::net::TcpStream;
use tev_client::{PacketCreateImage, PacketUpdateImage, TevClient};

use crate::interval::Interval;

/// Transform one linear channel to gamma space (gamma 2).
fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Quantize one linear channel to a byte: gamma transform, clamp to
/// [0, 0.999], scale to the byte range.
fn tone_map_channel(linear: f32) -> u8 {
    let intensity = Interval::new(0.0, 0.999);
    (256.0 * intensity.clamp(linear_to_gamma(linear))) as u8
}

/// Save an f32 RGB image as PNG with gamma-2 tone mapping
///
/// Each channel is gamma-transformed (square root), clamped to
/// `[0, 0.999]` and scaled to `[0, 255]`; pixels are written row-major,
/// row 0 at the top, R,G,B channel order.
pub fn save_image_as_png(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    output_path: &str,
    width: u32,
    height: u32,
) {
    let u8_image: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_fn(width, height, |x, y| {
        let pixel = image.get_pixel(x, y);
        Rgb([
            tone_map_channel(pixel[0]),
            tone_map_channel(pixel[1]),
            tone_map_channel(pixel[2]),
        ])
    });

    match u8_image.save(output_path) {
        Ok(_) => info!("Image saved as {}", output_path),
        Err(e) => warn!("Failed to save image: {}", e),
    }
}

/// Save an f32 RGB image as EXR with full HDR precision
///
/// No tone mapping or gamma correction is applied; the file stores the
/// estimator's linear radiance values, suitable for post-processing or
/// viewing in TEV.
pub fn save_image_as_exr(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    output_path: &str,
    width: u32,
    height: u32,
) {
    let pixels = image
        .pixels()
        .map(|rgb| (rgb[0], rgb[1], rgb[2]))
        .collect::<Vec<(f32, f32, f32)>>();

    let result = write_rgb_file(output_path, width as usize, height as usize, |x, y| {
        let index = y * (width as usize) + x;
        pixels[index]
    });

    match result {
        Ok(_) => info!("HDR image saved as EXR: {}", output_path),
        Err(e) => warn!("Failed to save EXR image: {}", e),
    }
}

/// Send an f32 RGB image to TEV for real-time visualization
///
/// Establishes a TCP connection to a running TEV instance, creates the
/// image there and uploads the channel data. TEV expects planar channel
/// layout (all R, then all G, then all B), so the interleaved buffer is
/// re-ordered before transmission. Failures are logged as warnings.
pub fn send_image_to_tev(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    tev_address: &str,
    width: u32,
    height: u32,
) {
    // Add the default port if not specified.
    let tev_address = if tev_address.contains(':') {
        tev_address.to_string()
    } else {
        format!("{}:14158", tev_address)
    };

    debug!("Attempting to connect to TEV at {}", tev_address);

    let stream = match TcpStream::connect(&tev_address) {
        Ok(stream) => stream,
        Err(e) => {
            warn!("Failed to connect to TEV on {}: {}", tev_address, e);
            return;
        }
    };
    if let Err(e) = stream.set_nodelay(true) {
        debug!("Failed to set TCP_NODELAY: {}", e);
    }

    let mut client = TevClient::wrap(stream);

    let create_packet = PacketCreateImage {
        image_name: "prismpath_output",
        width,
        height,
        channel_names: &["R", "G", "B"],
        grab_focus: true,
    };
    if let Err(e) = client.send(create_packet) {
        warn!("Failed to create image in TEV: {}", e);
        return;
    }

    // Interleaved (RGBRGB...) to planar (RRR...GGG...BBB...).
    let pixel_count = (width * height) as usize;
    let mut rgb_data = Vec::with_capacity(pixel_count * 3);
    for channel in 0..3 {
        for pixel in image.pixels() {
            rgb_data.push(pixel[channel]);
        }
    }

    debug!(
        "Sending {} pixels to TEV ({:.1} MB)",
        pixel_count,
        rgb_data.len() as f32 * 4.0 / 1_000_000.0
    );
    let start_time = std::time::Instant::now();

    let update_packet = PacketUpdateImage {
        image_name: "prismpath_output",
        grab_focus: false,
        channel_names: &["R", "G", "B"],
        x: 0,
        y: 0,
        width,
        height,
        channel_offsets: &[0, (width * height) as u64, (2 * width * height) as u64],
        channel_strides: &[1, 1, 1],
        data: &rgb_data,
    };

    match client.send(update_packet) {
        Ok(_) => info!(
            "Image data sent to TEV at {} in {:.2?}",
            tev_address,
            start_time.elapsed()
        ),
        Err(e) => warn!("Failed to send image data to TEV: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_map_applies_gamma_two() {
        // 0.25 in linear is 0.5 in gamma space, which lands on byte 128.
        assert_eq!(tone_map_channel(0.25), 128);
    }

    #[test]
    fn test_tone_map_clamps_out_of_range_values() {
        assert_eq!(tone_map_channel(-1.0), 0);
        assert_eq!(tone_map_channel(0.0), 0);
        // Overexposed channels saturate just below 256.
        assert_eq!(tone_map_channel(1.0), 255);
        assert_eq!(tone_map_channel(100.0), 255);
    }

    #[test]
    fn test_linear_to_gamma_is_monotonic() {
        let mut previous = -1.0;
        for i in 0..=100 {
            let value = linear_to_gamma(i as f32 / 100.0);
            assert!(value >= previous);
            previous = value;
        }
    }
}
