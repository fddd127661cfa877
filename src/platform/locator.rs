use std::path::Path;

use image::{DynamicImage, GenericImageView, GrayImage, Luma, RgbImage};
use imageproc::definitions::Image;
use imageproc::template_matching::{MatchTemplateMethod, find_extremes, match_template};
use tracing::{debug, trace};
use xcap::Monitor;

use crate::error::Result;
use crate::platform::ScreenLocator;

/// Production [`ScreenLocator`]: captures every monitor in turn and runs
/// normalized template matching over the capture.
///
/// Scores are `1 - SSE` with normalized sum-of-squared-errors, so an exact
/// pixel match scores 1.0 and the configured confidence is an upper
/// threshold in the same [0, 1] scale the original tool used.
pub struct TemplateLocator;

impl ScreenLocator for TemplateLocator {
    fn locate_center(
        &mut self,
        image: &Path,
        confidence: f64,
        grayscale: bool,
    ) -> Result<Option<(i32, i32)>> {
        let template = image::open(image)?;
        debug!(
            target: "input_simulation::platform",
            image = %image.display(),
            confidence,
            grayscale,
            "Locating image on screen"
        );

        for monitor in Monitor::all()? {
            let capture = monitor.capture_image()?;
            let (width, height) = (capture.width(), capture.height());
            // xcap bundles its own `image` version; round-trip the raw
            // RGBA bytes into ours.
            let screen = image::RgbaImage::from_raw(width, height, capture.into_raw())
                .expect("capture buffer matches its dimensions");
            let screen = DynamicImage::ImageRgba8(screen);

            if let Some((x, y, score)) = find_in_image(&screen, &template, grayscale) {
                trace!(target: "input_simulation::platform", x, y, score, "Best match on monitor");
                if f64::from(score) >= confidence {
                    let center = (monitor.x()? + x, monitor.y()? + y);
                    debug!(
                        target: "input_simulation::platform",
                        x = center.0,
                        y = center.1,
                        score,
                        "Image found"
                    );
                    return Ok(Some(center));
                }
            }
        }
        Ok(None)
    }
}

/// Best match of `template` inside `screen`: center coordinates and a
/// score where 1.0 is a pixel-exact match. `None` when the template is
/// empty or larger than the screen.
pub fn find_in_image(
    screen: &DynamicImage,
    template: &DynamicImage,
    grayscale: bool,
) -> Option<(i32, i32, f32)> {
    let (tw, th) = (template.width(), template.height());
    if tw == 0 || th == 0 || tw > screen.width() || th > screen.height() {
        return None;
    }

    let errors = if grayscale {
        match_template(
            &screen.to_luma8(),
            &template.to_luma8(),
            MatchTemplateMethod::SumOfSquaredErrorsNormalized,
        )
    } else {
        color_error_map(screen, template)
    };

    let extremes = find_extremes(&errors);
    let (x, y) = extremes.min_value_location;
    Some((
        (x + tw / 2) as i32,
        (y + th / 2) as i32,
        1.0 - extremes.min_value,
    ))
}

/// Per-channel normalized error, averaged over R, G and B.
fn color_error_map(screen: &DynamicImage, template: &DynamicImage) -> Image<Luma<f32>> {
    let screen = screen.to_rgb8();
    let template = template.to_rgb8();

    let mut total: Option<Image<Luma<f32>>> = None;
    for channel_index in 0..3 {
        let map = match_template(
            &channel(&screen, channel_index),
            &channel(&template, channel_index),
            MatchTemplateMethod::SumOfSquaredErrorsNormalized,
        );
        total = Some(match total {
            None => map,
            Some(mut acc) => {
                for (accumulated, value) in acc.pixels_mut().zip(map.pixels()) {
                    accumulated.0[0] += value.0[0];
                }
                acc
            }
        });
    }

    let mut averaged = total.expect("three channels accumulated");
    for pixel in averaged.pixels_mut() {
        pixel.0[0] /= 3.0;
    }
    averaged
}

fn channel(img: &RgbImage, channel_index: usize) -> GrayImage {
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        Luma([img.get_pixel(x, y).0[channel_index]])
    })
}
