use crate::color::Color;

/// Minimum contrast for large title text drawn on a swatch.
pub const MIN_CONTRAST_TITLE_TEXT: f32 = 3.0;
/// Minimum contrast for body text drawn on a swatch.
pub const MIN_CONTRAST_BODY_TEXT: f32 = 4.5;

const MAX_SEARCH_STEPS: usize = 10;

/// Text colors that stay readable on a swatch background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextColors {
    pub title: Color,
    pub body: Color,
}

/// Smallest alpha at which `foreground`, composited over the opaque
/// `background`, still reaches `min_contrast`. `None` if even the opaque
/// foreground falls short.
pub fn minimum_alpha(foreground: Color, background: Color, min_contrast: f32) -> Option<u8> {
    debug_assert!(background.is_opaque(), "background must be opaque");

    let opaque = foreground.with_alpha(255);
    if Color::contrast_on(opaque, background) < min_contrast {
        return None;
    }

    // `max` always passes; binary search down towards `min`.
    let (mut min, mut max) = (0u8, 255u8);
    for _ in 0..MAX_SEARCH_STEPS {
        if max - min <= 1 {
            break;
        }
        let alpha = min + (max - min) / 2;
        let contrast = Color::contrast_on(foreground.with_alpha(alpha), background);
        if contrast < min_contrast {
            min = alpha;
        } else {
            max = alpha;
        }
    }
    Some(max)
}

/// Pick title and body text colors for a swatch.
///
/// Translucent white is preferred when it works for both roles, then
/// translucent black. Otherwise each role falls back independently.
pub fn text_colors(background: Color) -> TextColors {
    let background = background.with_alpha(255);
    let white = |min| minimum_alpha(Color::WHITE, background, min);
    let black = |min| minimum_alpha(Color::BLACK, background, min);

    let (light_body, light_title) = (white(MIN_CONTRAST_BODY_TEXT), white(MIN_CONTRAST_TITLE_TEXT));
    if let (Some(body), Some(title)) = (light_body, light_title) {
        return TextColors {
            title: Color::WHITE.with_alpha(title),
            body: Color::WHITE.with_alpha(body),
        };
    }

    let (dark_body, dark_title) = (black(MIN_CONTRAST_BODY_TEXT), black(MIN_CONTRAST_TITLE_TEXT));
    if let (Some(body), Some(title)) = (dark_body, dark_title) {
        return TextColors {
            title: Color::BLACK.with_alpha(title),
            body: Color::BLACK.with_alpha(body),
        };
    }

    // One of white/black always reaches 4.5:1 against an opaque color.
    let pick = |light: Option<u8>, dark: Option<u8>| match (light, dark) {
        (Some(a), _) => Color::WHITE.with_alpha(a),
        (None, Some(a)) => Color::BLACK.with_alpha(a),
        (None, None) => Color::BLACK,
    };
    TextColors {
        title: pick(light_title, dark_title),
        body: pick(light_body, dark_body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_background_gets_white_text() {
        let colors = text_colors(Color::new(20, 30, 60));
        assert_eq!((colors.title.r, colors.title.g, colors.title.b), (255, 255, 255));
        assert_eq!((colors.body.r, colors.body.g, colors.body.b), (255, 255, 255));
        // Body needs more contrast, so it is at least as opaque as the title.
        assert!(colors.body.a >= colors.title.a);
    }

    #[test]
    fn light_background_gets_black_text() {
        let colors = text_colors(Color::new(240, 230, 200));
        assert_eq!((colors.title.r, colors.title.g, colors.title.b), (0, 0, 0));
        assert_eq!((colors.body.r, colors.body.g, colors.body.b), (0, 0, 0));
    }

    #[test]
    fn white_on_white_is_impossible() {
        assert_eq!(minimum_alpha(Color::WHITE, Color::WHITE, 1.5), None);
    }

    #[test]
    fn minimum_alpha_is_tight() {
        let bg = Color::new(0, 0, 0);
        let alpha = minimum_alpha(Color::WHITE, bg, MIN_CONTRAST_BODY_TEXT).unwrap();
        assert!(Color::contrast_on(Color::WHITE.with_alpha(alpha), bg) >= MIN_CONTRAST_BODY_TEXT);
        assert!(
            Color::contrast_on(Color::WHITE.with_alpha(alpha - 1), bg) < MIN_CONTRAST_BODY_TEXT,
            "alpha {alpha} is not minimal"
        );
    }

    #[test]
    fn mid_tones_meet_thresholds() {
        for v in (0..=255u8).step_by(5) {
            for bg in [Color::new(v, v, v), Color::new(v, 255 - v, 128), Color::new(255, v, 0)] {
                let colors = text_colors(bg);
                let title = Color::contrast_on(colors.title, bg);
                let body = Color::contrast_on(colors.body, bg);
                assert!(title >= MIN_CONTRAST_TITLE_TEXT, "title {title:.2} on {bg}");
                assert!(body >= MIN_CONTRAST_BODY_TEXT, "body {body:.2} on {bg}");
            }
        }
    }
}
