use palette::{Hsl, IntoColor, Srgb};
use serde::{Serialize, Serializer};

/// Core color type used throughout the pipeline.
/// Wraps ARGB u8 components; packs to and from `0xAARRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    /// An opaque color.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { a: 255, r, g, b }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    pub fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    pub fn to_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Serialize to lowercase hex: `#rrggbb` when opaque, `#aarrggbb` otherwise.
    pub fn to_hex(self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.a, self.r, self.g, self.b)
        }
    }

    /// Convert to `palette::Srgb<u8>`, dropping alpha.
    pub fn to_srgb_u8(self) -> Srgb<u8> {
        Srgb::new(self.r, self.g, self.b)
    }

    /// Hue in degrees `[0, 360)`, saturation and lightness in `[0, 1]`.
    pub fn to_hsl(self) -> (f32, f32, f32) {
        let srgb_f32: Srgb<f32> = self.to_srgb_u8().into_format();
        let hsl: Hsl = srgb_f32.into_color();
        let (h, s, l) = hsl.into_components();
        (h.into_positive_degrees(), s, l)
    }

    /// Alpha-composite `self` over `background`.
    ///
    /// The result is opaque whenever the background is.
    pub fn composite_over(self, background: Color) -> Color {
        let fg_a = self.a as u32;
        let bg_a = background.a as u32;
        let a = 255 - ((255 - bg_a) * (255 - fg_a)) / 255;
        let channel = |fg: u8, bg: u8| -> u8 {
            if a == 0 {
                return 0;
            }
            ((255 * fg as u32 * fg_a + bg as u32 * bg_a * (255 - fg_a)) / (a * 255)) as u8
        };
        Color {
            a: a as u8,
            r: channel(self.r, background.r),
            g: channel(self.g, background.g),
            b: channel(self.b, background.b),
        }
    }

    /// WCAG 2.0 relative luminance.
    ///
    /// Linearizes each sRGB channel, then computes the weighted sum. Alpha is ignored.
    pub fn relative_luminance(self) -> f32 {
        fn linearize(c: u8) -> f32 {
            let c = c as f32 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        let r = linearize(self.r);
        let g = linearize(self.g);
        let b = linearize(self.b);
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    /// WCAG 2.0 contrast ratio between two colors.
    ///
    /// Returns a value in [1, 21]. Higher means more contrast.
    pub fn contrast_ratio(c1: &Color, c2: &Color) -> f32 {
        let l1 = c1.relative_luminance();
        let l2 = c2.relative_luminance();
        let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
        (lighter + 0.05) / (darker + 0.05)
    }

    /// Contrast of `foreground` drawn on an opaque `background`.
    /// A translucent foreground is composited over the background first.
    pub fn contrast_on(foreground: Color, background: Color) -> f32 {
        let fg = if foreground.is_opaque() {
            foreground
        } else {
            foreground.composite_over(background)
        };
        Self::contrast_ratio(&fg, &background)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}
