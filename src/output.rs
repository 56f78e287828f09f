use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use crossterm::queue;
use crossterm::style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use serde::Serialize;

use crate::color::Color;
use crate::pipeline::assign::NamedSlots;
use crate::pipeline::extract::{Palette, Swatch};

const TILES_PER_ROW: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct PaletteDocument<'a> {
    swatches: &'a [Swatch],
    slots: &'a NamedSlots,
}

/// One line per swatch, then the named slots that resolved.
pub fn serialize_text(palette: &Palette) -> String {
    let mut out = String::new();
    for swatch in palette.swatches() {
        out.push_str(&format!(
            "{}  {:>7}  title={}  body={}\n",
            swatch.hex(),
            swatch.population(),
            swatch.title_text_color().to_hex(),
            swatch.body_text_color().to_hex(),
        ));
    }
    out.push('\n');
    for (name, swatch) in palette.named_slots().iter() {
        out.push_str(&format!("{name} = {}\n", swatch.hex()));
    }
    out
}

pub fn serialize_json(palette: &Palette) -> Result<String> {
    let doc = PaletteDocument {
        swatches: palette.swatches(),
        slots: palette.named_slots(),
    };
    let mut json = serde_json::to_string_pretty(&doc).context("failed to serialize palette")?;
    json.push('\n');
    Ok(json)
}

pub fn serialize(palette: &Palette, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(serialize_text(palette)),
        OutputFormat::Json => serialize_json(palette),
    }
}

/// Write the palette to an arbitrary path.
pub fn write_to(palette: &Palette, format: OutputFormat, path: &Path) -> Result<()> {
    let content = serialize(palette, format)?;
    std::fs::write(path, content)
        .with_context(|| format!("failed to write palette to {}", path.display()))?;
    Ok(())
}

fn to_term(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Render swatches as a grid of true-color tiles labelled with their hex code
/// in the swatch's title text color.
pub fn write_preview(palette: &Palette, out: &mut impl Write) -> Result<()> {
    for row in palette.swatches().chunks(TILES_PER_ROW) {
        for swatch in row {
            let bg = swatch.rgb();
            // Terminals have no alpha; flatten the text color onto the tile.
            let fg = swatch.title_text_color().composite_over(bg);
            queue!(
                out,
                SetBackgroundColor(to_term(bg)),
                SetForegroundColor(to_term(fg)),
                Print(format!("  {}  ", swatch.hex())),
                ResetColor,
                Print(" ")
            )?;
        }
        queue!(out, Print("\n"))?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::Bitmap;
    use crate::pipeline::extract::extract;
    use image::{Rgba, RgbaImage};

    fn test_palette() -> Palette {
        let img = RgbaImage::from_fn(10, 10, |x, _| {
            if x < 6 {
                Rgba([220, 40, 40, 255])
            } else {
                Rgba([30, 30, 30, 255])
            }
        });
        extract(&Bitmap::from_rgba(&img), 16).unwrap()
    }

    #[test]
    fn text_lists_swatches_then_slots() {
        let output = serialize_text(&test_palette());
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].starts_with("#dc2828"));
        assert!(lines[0].contains("60"));
        assert!(lines[1].starts_with("#1e1e1e"));
        assert_eq!(lines[2], "");
        assert!(lines.contains(&"dominant = #dc2828"));
        assert!(lines.contains(&"vibrant = #dc2828"));
        assert!(lines.contains(&"dark_muted = #1e1e1e"));
    }

    #[test]
    fn json_has_swatches_and_slots() {
        let json = serialize_json(&test_palette()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let swatches = value["swatches"].as_array().unwrap();
        assert_eq!(swatches.len(), 2);
        assert_eq!(swatches[0]["rgb"], "#dc2828");
        assert_eq!(swatches[0]["population"], 60);
        assert!(swatches[0]["title_text_color"].as_str().unwrap().starts_with('#'));
        assert_eq!(value["slots"]["dominant"]["rgb"], "#dc2828");
        assert!(value["slots"]["light_vibrant"].is_null());
    }

    #[test]
    fn serialize_dispatches_on_format() {
        let palette = test_palette();
        let text = serialize(&palette, OutputFormat::Text).unwrap();
        assert_eq!(text, serialize_text(&palette));
        let json = serialize(&palette, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["swatches"][1]["rgb"], "#1e1e1e");
    }

    #[test]
    fn write_to_creates_file() {
        let palette = test_palette();
        let dir = std::env::temp_dir().join("huepick-test-output");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("palette.txt");

        write_to(&palette, OutputFormat::Text, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, serialize_text(&palette));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn preview_emits_true_color_tiles() {
        let mut buf = Vec::new();
        write_preview(&test_palette(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\x1b[48;2;220;40;40m"));
        assert!(text.contains("#dc2828"));
        assert_eq!(text.lines().count(), 1);
    }
}
