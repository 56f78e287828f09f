use log::{debug, warn};
use serde::Serialize;

use crate::bitmap::Bitmap;
use crate::color::Color;
use crate::error::{PaletteError, Result};
use crate::pipeline::assign::{assign_slots, NamedSlots};
use crate::pipeline::contrast::{text_colors, TextColors};
use crate::pipeline::filter::Filter;
use crate::pipeline::quantize::{histogram, median_cut, ColorCount};

pub const DEFAULT_MAX_COLORS: usize = 16;
/// Bitmaps larger than this many pixels are grid-sampled before quantizing.
pub const DEFAULT_RESIZE_AREA: u64 = 112 * 112;

/// A representative color with its pixel population and readable text colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Swatch {
    rgb: Color,
    population: u64,
    title_text_color: Color,
    body_text_color: Color,
}

impl Swatch {
    /// Build a swatch; alpha on `rgb` is discarded.
    pub fn new(rgb: Color, population: u64) -> Self {
        let rgb = rgb.with_alpha(255);
        let TextColors { title, body } = text_colors(rgb);
        Self {
            rgb,
            population,
            title_text_color: title,
            body_text_color: body,
        }
    }

    pub fn rgb(&self) -> Color {
        self.rgb
    }

    pub fn population(&self) -> u64 {
        self.population
    }

    pub fn title_text_color(&self) -> Color {
        self.title_text_color
    }

    pub fn body_text_color(&self) -> Color {
        self.body_text_color
    }

    /// `(hue°, saturation, lightness)` of the swatch color.
    pub fn hsl(&self) -> (f32, f32, f32) {
        self.rgb.to_hsl()
    }

    /// `#rrggbb`, the string a caller copies when the swatch is picked.
    pub fn hex(&self) -> String {
        self.rgb.to_hex()
    }
}

/// Swatches extracted from one image, most populous first, with the named
/// slots resolved against them once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    swatches: Vec<Swatch>,
    slots: NamedSlots,
}

impl Palette {
    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    pub fn named_slots(&self) -> &NamedSlots {
        &self.slots
    }

    pub fn dominant(&self) -> Option<Swatch> {
        self.swatches.first().copied()
    }

    pub fn vibrant(&self) -> Option<Swatch> {
        self.slots.vibrant
    }

    pub fn light_vibrant(&self) -> Option<Swatch> {
        self.slots.light_vibrant
    }

    pub fn dark_vibrant(&self) -> Option<Swatch> {
        self.slots.dark_vibrant
    }

    pub fn muted(&self) -> Option<Swatch> {
        self.slots.muted
    }

    pub fn light_muted(&self) -> Option<Swatch> {
        self.slots.light_muted
    }

    pub fn dark_muted(&self) -> Option<Swatch> {
        self.slots.dark_muted
    }
}

/// Configures and runs one extraction over a borrowed bitmap.
pub struct PaletteBuilder<'a> {
    bitmap: &'a Bitmap<'a>,
    max_colors: usize,
    resize_area: u64,
    filters: Vec<Box<dyn Filter + 'a>>,
}

impl<'a> PaletteBuilder<'a> {
    pub fn new(bitmap: &'a Bitmap<'a>) -> Self {
        Self {
            bitmap,
            max_colors: DEFAULT_MAX_COLORS,
            resize_area: DEFAULT_RESIZE_AREA,
            filters: Vec::new(),
        }
    }

    pub fn maximum_color_count(mut self, count: usize) -> Self {
        self.max_colors = count;
        self
    }

    /// Pixel count above which the bitmap is sampled on a grid. 0 disables
    /// sampling.
    pub fn resize_area(mut self, area: u64) -> Self {
        self.resize_area = area;
        self
    }

    pub fn add_filter(mut self, filter: impl Filter + 'a) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn clear_filters(mut self) -> Self {
        self.filters.clear();
        self
    }

    pub fn generate(self) -> Result<Palette> {
        let bitmap = self.bitmap;
        if bitmap.is_empty() {
            return Err(PaletteError::invalid_input(format!(
                "bitmap has zero area ({}x{})",
                bitmap.width(),
                bitmap.height()
            )));
        }
        if self.max_colors == 0 {
            return Err(PaletteError::invalid_input(
                "maximum color count must be at least 1",
            ));
        }

        let stride = sample_stride(bitmap.area(), self.resize_area);
        let pixels = (0..bitmap.height()).step_by(stride).flat_map(|y| {
            (0..bitmap.width())
                .step_by(stride)
                .map(move |x| bitmap.pixel(x, y))
        });
        let colors = self.apply_filters(histogram(pixels));
        let sampled: u64 = colors.iter().map(|c| c.count).sum();
        debug!(
            "quantizing {} distinct colors from {} sampled pixels (stride {}, {}x{})",
            colors.len(),
            sampled,
            stride,
            bitmap.width(),
            bitmap.height()
        );

        let mut swatches: Vec<Swatch> = median_cut(colors, self.max_colors)
            .into_iter()
            .map(|c| Swatch::new(c.color, c.population))
            .collect();
        // Stable, so equal populations keep bucket order.
        swatches.sort_by(|a, b| b.population.cmp(&a.population));
        debug!("extracted {} swatches", swatches.len());

        let slots = assign_slots(&swatches);
        Ok(Palette { swatches, slots })
    }

    /// Drop filtered colors. If nothing survives, keep the unfiltered
    /// histogram so a non-empty bitmap always yields a swatch.
    fn apply_filters(&self, colors: Vec<ColorCount>) -> Vec<ColorCount> {
        if self.filters.is_empty() {
            return colors;
        }
        let kept: Vec<ColorCount> = colors
            .iter()
            .filter(|c| {
                let hsl = c.color.to_hsl();
                self.filters.iter().all(|f| f.is_allowed(c.color, hsl))
            })
            .copied()
            .collect();
        if kept.is_empty() {
            warn!(
                "filters rejected all {} sampled colors; quantizing unfiltered",
                colors.len()
            );
            return colors;
        }
        kept
    }
}

/// Grid step so that roughly `resize_area` pixels are visited.
fn sample_stride(area: u64, resize_area: u64) -> usize {
    if resize_area == 0 || area <= resize_area {
        return 1;
    }
    let ratio = area as f64 / resize_area as f64;
    (ratio.sqrt().ceil() as usize).max(1)
}

/// Extract up to `max_color_count` swatches from `bitmap` with default
/// sampling and no filters.
pub fn extract(bitmap: &Bitmap<'_>, max_color_count: usize) -> Result<Palette> {
    PaletteBuilder::new(bitmap)
        .maximum_color_count(max_color_count)
        .generate()
}
