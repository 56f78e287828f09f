use crate::color::Color;

const BLACK_MAX_LIGHTNESS: f32 = 0.05;
const WHITE_MIN_LIGHTNESS: f32 = 0.95;

/// A predicate that removes colors from quantization.
///
/// Filters see each distinct sampled color once, both as RGB and as
/// `(hue°, saturation, lightness)`.
pub trait Filter: Send + Sync {
    fn is_allowed(&self, rgb: Color, hsl: (f32, f32, f32)) -> bool;
}

impl<F> Filter for F
where
    F: Fn(Color, (f32, f32, f32)) -> bool + Send + Sync,
{
    fn is_allowed(&self, rgb: Color, hsl: (f32, f32, f32)) -> bool {
        self(rgb, hsl)
    }
}

/// Rejects near-black, near-white, and colors close to the red I-line
/// (skin tones), which rarely make useful swatches.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFilter;

impl Filter for DefaultFilter {
    fn is_allowed(&self, _: Color, (h, s, l): (f32, f32, f32)) -> bool {
        !is_black(l) && !is_white(l) && !is_near_red_i_line(h, s)
    }
}

fn is_black(l: f32) -> bool {
    l <= BLACK_MAX_LIGHTNESS
}

fn is_white(l: f32) -> bool {
    l >= WHITE_MIN_LIGHTNESS
}

fn is_near_red_i_line(h: f32, s: f32) -> bool {
    (10.0..=37.0).contains(&h) && s <= 0.82
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed(color: Color) -> bool {
        DefaultFilter.is_allowed(color, color.to_hsl())
    }

    #[test]
    fn rejects_extremes() {
        assert!(!allowed(Color::BLACK));
        assert!(!allowed(Color::WHITE));
        assert!(!allowed(Color::new(5, 5, 8)));
    }

    #[test]
    fn rejects_skin_tone() {
        // hue ~25°, saturation ~0.5
        assert!(!allowed(Color::new(200, 140, 100)));
    }

    #[test]
    fn allows_saturated_colors() {
        assert!(allowed(Color::new(30, 90, 220)));
        assert!(allowed(Color::new(40, 180, 60)));
        // fully saturated orange sits above the I-line saturation cap
        assert!(allowed(Color::new(255, 128, 0)));
    }

    #[test]
    fn closures_are_filters() {
        let only_dark = |_: Color, (_, _, l): (f32, f32, f32)| l < 0.5;
        assert!(only_dark.is_allowed(Color::BLACK, Color::BLACK.to_hsl()));
        assert!(!only_dark.is_allowed(Color::WHITE, Color::WHITE.to_hsl()));
    }
}
