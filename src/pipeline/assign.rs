use log::debug;
use serde::Serialize;

use crate::pipeline::extract::Swatch;

const WEIGHT_SATURATION: f32 = 0.24;
const WEIGHT_LIGHTNESS: f32 = 0.52;
const WEIGHT_POPULATION: f32 = 0.24;

/// A lightness/saturation window with the ideal point inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub name: &'static str,
    /// min, target, max
    pub lightness: [f32; 3],
    /// min, target, max
    pub saturation: [f32; 3],
}

const LIGHT: [f32; 3] = [0.55, 0.74, 1.0];
const NORMAL: [f32; 3] = [0.3, 0.5, 0.7];
const DARK: [f32; 3] = [0.0, 0.26, 0.45];
const VIBRANT: [f32; 3] = [0.35, 1.0, 1.0];
const MUTED: [f32; 3] = [0.0, 0.3, 0.4];

/// Resolution order matters: a swatch taken by an earlier target is skipped
/// by later ones.
pub const TARGETS: [Target; 6] = [
    Target {
        name: "light_vibrant",
        lightness: LIGHT,
        saturation: VIBRANT,
    },
    Target {
        name: "vibrant",
        lightness: NORMAL,
        saturation: VIBRANT,
    },
    Target {
        name: "dark_vibrant",
        lightness: DARK,
        saturation: VIBRANT,
    },
    Target {
        name: "light_muted",
        lightness: LIGHT,
        saturation: MUTED,
    },
    Target {
        name: "muted",
        lightness: NORMAL,
        saturation: MUTED,
    },
    Target {
        name: "dark_muted",
        lightness: DARK,
        saturation: MUTED,
    },
];

impl Target {
    fn accepts(&self, s: f32, l: f32) -> bool {
        (self.saturation[0]..=self.saturation[2]).contains(&s)
            && (self.lightness[0]..=self.lightness[2]).contains(&l)
    }

    fn score(&self, s: f32, l: f32, population: u64, max_population: u64) -> f32 {
        let saturation = 1.0 - (s - self.saturation[1]).abs();
        let lightness = 1.0 - (l - self.lightness[1]).abs();
        let population = if max_population > 0 {
            population as f32 / max_population as f32
        } else {
            0.0
        };
        WEIGHT_SATURATION * saturation + WEIGHT_LIGHTNESS * lightness + WEIGHT_POPULATION * population
    }
}

/// Swatches chosen for each named role. Any slot may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NamedSlots {
    pub light_vibrant: Option<Swatch>,
    pub vibrant: Option<Swatch>,
    pub dark_vibrant: Option<Swatch>,
    pub light_muted: Option<Swatch>,
    pub muted: Option<Swatch>,
    pub dark_muted: Option<Swatch>,
    pub dominant: Option<Swatch>,
}

impl NamedSlots {
    /// Present slots in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Swatch)> + '_ {
        [
            ("dominant", self.dominant),
            ("vibrant", self.vibrant),
            ("light_vibrant", self.light_vibrant),
            ("dark_vibrant", self.dark_vibrant),
            ("muted", self.muted),
            ("light_muted", self.light_muted),
            ("dark_muted", self.dark_muted),
        ]
        .into_iter()
        .filter_map(|(name, swatch)| swatch.map(|s| (name, s)))
    }
}

/// Pick the best swatch for every target.
///
/// `swatches` is expected most-populous first; `dominant` is the first one.
pub fn assign_slots(swatches: &[Swatch]) -> NamedSlots {
    let max_population = swatches.iter().map(|s| s.population()).max().unwrap_or(0);
    let hsl: Vec<(f32, f32, f32)> = swatches.iter().map(|s| s.hsl()).collect();
    let mut used = vec![false; swatches.len()];

    let mut picks = [None; TARGETS.len()];
    for (slot, target) in picks.iter_mut().zip(TARGETS.iter()) {
        let mut best: Option<(usize, f32)> = None;
        for (i, swatch) in swatches.iter().enumerate() {
            let (_, s, l) = hsl[i];
            if used[i] || !target.accepts(s, l) {
                continue;
            }
            let score = target.score(s, l, swatch.population(), max_population);
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((i, score));
            }
        }
        if let Some((i, score)) = best {
            debug!("{} -> {} (score {score:.3})", target.name, swatches[i].hex());
            used[i] = true;
            *slot = Some(swatches[i]);
        }
    }

    let [light_vibrant, vibrant, dark_vibrant, light_muted, muted, dark_muted] = picks;
    NamedSlots {
        light_vibrant,
        vibrant,
        dark_vibrant,
        light_muted,
        muted,
        dark_muted,
        dominant: swatches.first().copied(),
    }
}
