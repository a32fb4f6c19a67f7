//! Mean-color distance between a candidate region and the reference template.
//!
//! Grayscale correlation is blind to hue: two occurrences with the same
//! luminance pattern but different color are indistinguishable on the match
//! surface. This metric is the secondary filter that tells them apart.

use image::RgbaImage;

/// Normalized mean-color distance in `[0, 100]`.
///
/// Averages each RGB channel over both images, sums the absolute per-channel
/// differences and normalizes by `255 x 3`. 0 means identical mean color,
/// 100 maximal divergence. The images need not share dimensions since only
/// channel means are compared.
pub fn color_diff(image: &RgbaImage, condition: &RgbaImage) -> f64 {
    let image_means = channel_means(image);
    let condition_means = channel_means(condition);

    let diff: f64 = image_means
        .iter()
        .zip(&condition_means)
        .map(|(a, b)| (a - b).abs())
        .sum();
    diff * 100.0 / (255.0 * 3.0)
}

fn channel_means(image: &RgbaImage) -> [f64; 3] {
    let count = f64::from(image.width()) * f64::from(image.height());
    if count == 0.0 {
        return [0.0; 3];
    }

    let mut sums = [0.0f64; 3];
    for pixel in image.pixels() {
        for (sum, channel) in sums.iter_mut().zip(pixel.0) {
            *sum += f64::from(channel);
        }
    }
    sums.map(|sum| sum / count)
}
