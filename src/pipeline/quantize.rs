use std::collections::BTreeMap;

use log::trace;

use crate::color::Color;

/// A distinct color and how many sampled pixels had it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorCount {
    pub color: Color,
    pub count: u64,
}

/// A quantized color: the population-weighted centroid of one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Centroid {
    pub color: Color,
    pub population: u64,
}

/// Count distinct opaque RGB colors. Alpha is dropped.
///
/// Entries come out ordered by packed RGB value, so the result does not
/// depend on pixel order.
pub fn histogram(pixels: impl IntoIterator<Item = Color>) -> Vec<ColorCount> {
    let mut counts: BTreeMap<u32, u64> = BTreeMap::new();
    for pixel in pixels {
        *counts.entry(pixel.with_alpha(255).to_argb()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(argb, count)| ColorCount {
            color: Color::from_argb(argb),
            count,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    fn of(self, c: Color) -> u8 {
        match self {
            Channel::Red => c.r,
            Channel::Green => c.g,
            Channel::Blue => c.b,
        }
    }
}

/// A contiguous run of `colors[lower..upper]`.
#[derive(Debug, Clone, Copy)]
struct Bucket {
    lower: usize,
    upper: usize,
    population: u64,
}

impl Bucket {
    fn new(colors: &[ColorCount], lower: usize, upper: usize) -> Self {
        let population = colors[lower..upper].iter().map(|c| c.count).sum();
        Self {
            lower,
            upper,
            population,
        }
    }

    fn can_split(&self) -> bool {
        self.upper - self.lower > 1
    }

    /// Channel with the widest value range. Ties prefer red, then green.
    fn widest_channel(&self, colors: &[ColorCount]) -> Channel {
        let range = |ch: Channel| {
            let values = colors[self.lower..self.upper].iter().map(|c| ch.of(c.color));
            let min = values.clone().min().unwrap_or(0);
            let max = values.max().unwrap_or(0);
            max - min
        };
        let (r, g, b) = (range(Channel::Red), range(Channel::Green), range(Channel::Blue));
        if r >= g && r >= b {
            Channel::Red
        } else if g >= b {
            Channel::Green
        } else {
            Channel::Blue
        }
    }

    /// Sort the bucket along its widest channel and cut it at the population
    /// median. Both halves are non-empty.
    fn split(self, colors: &mut [ColorCount]) -> (Bucket, Bucket) {
        let channel = self.widest_channel(colors);
        let slice = &mut colors[self.lower..self.upper];
        // Colors are distinct, so the packed value makes the order total.
        slice.sort_unstable_by_key(|c| (channel.of(c.color), c.color.to_argb()));

        let midpoint = self.population / 2;
        let mut cumulative = 0u64;
        let mut left_len = 1;
        for (i, c) in slice.iter().enumerate() {
            cumulative += c.count;
            if cumulative >= midpoint {
                left_len = (i + 1).min(slice.len() - 1);
                break;
            }
        }
        let cut = self.lower + left_len;
        trace!(
            "split bucket {}..{} (population {}) on {:?} at {}",
            self.lower,
            self.upper,
            self.population,
            channel,
            cut
        );
        (
            Bucket::new(colors, self.lower, cut),
            Bucket::new(colors, cut, self.upper),
        )
    }

    fn centroid(&self, colors: &[ColorCount]) -> Centroid {
        let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
        for c in &colors[self.lower..self.upper] {
            let n = c.count;
            r += c.color.r as u64 * n;
            g += c.color.g as u64 * n;
            b += c.color.b as u64 * n;
        }
        let total = self.population.max(1);
        let avg = |sum: u64| ((sum + total / 2) / total) as u8;
        Centroid {
            color: Color::new(avg(r), avg(g), avg(b)),
            population: self.population,
        }
    }
}

/// Median-cut quantization of a histogram into at most `max_colors` centroids.
///
/// The most populous bucket that still holds more than one distinct color is
/// split until there are `max_colors` buckets or none can be split. Centroids
/// are returned in bucket order; an empty histogram gives no centroids.
pub fn median_cut(mut colors: Vec<ColorCount>, max_colors: usize) -> Vec<Centroid> {
    if colors.is_empty() || max_colors == 0 {
        return Vec::new();
    }

    let mut buckets = vec![Bucket::new(&colors, 0, colors.len())];
    while buckets.len() < max_colors {
        let mut target: Option<usize> = None;
        for (i, bucket) in buckets.iter().enumerate() {
            if !bucket.can_split() {
                continue;
            }
            if target.map_or(true, |t| bucket.population > buckets[t].population) {
                target = Some(i);
            }
        }
        let Some(i) = target else {
            break;
        };
        let (left, right) = buckets[i].split(&mut colors);
        buckets[i] = left;
        buckets.push(right);
    }

    buckets.iter().map(|b| b.centroid(&colors)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(entries: &[((u8, u8, u8), u64)]) -> Vec<ColorCount> {
        entries
            .iter()
            .map(|&((r, g, b), count)| ColorCount {
                color: Color::new(r, g, b),
                count,
            })
            .collect()
    }

    #[test]
    fn histogram_counts_and_drops_alpha() {
        let pixels = [
            Color::new(1, 2, 3),
            Color::new(1, 2, 3).with_alpha(0),
            Color::new(9, 9, 9),
        ];
        let hist = histogram(pixels);
        assert_eq!(hist.len(), 2);
        assert_eq!(hist[0].color, Color::new(1, 2, 3));
        assert_eq!(hist[0].count, 2);
        assert_eq!(hist[1].count, 1);
    }

    #[test]
    fn single_color_is_never_split() {
        let centroids = median_cut(counts(&[((10, 20, 30), 50)]), 16);
        assert_eq!(
            centroids,
            vec![Centroid {
                color: Color::new(10, 20, 30),
                population: 50
            }]
        );
    }

    #[test]
    fn one_bucket_is_weighted_average() {
        let centroids = median_cut(counts(&[((0, 0, 0), 3), ((200, 100, 40), 1)]), 1);
        assert_eq!(centroids.len(), 1);
        assert_eq!(centroids[0].color, Color::new(50, 25, 10));
        assert_eq!(centroids[0].population, 4);
    }

    #[test]
    fn stops_when_every_bucket_is_one_color() {
        let hist = counts(&[((255, 0, 0), 5), ((0, 255, 0), 3), ((0, 0, 255), 1)]);
        let centroids = median_cut(hist, 16);
        assert_eq!(centroids.len(), 3);
        let total: u64 = centroids.iter().map(|c| c.population).sum();
        assert_eq!(total, 9);
    }

    #[test]
    fn splits_along_widest_channel() {
        // Red spans 0..=240, blue only 0..=10: the first cut separates by red.
        let hist = counts(&[
            ((0, 0, 0), 4),
            ((0, 0, 10), 4),
            ((240, 0, 0), 4),
            ((240, 0, 10), 4),
        ]);
        let mut centroids = median_cut(hist, 2);
        centroids.sort_by_key(|c| c.color.r);
        assert_eq!(centroids[0].color, Color::new(0, 0, 5));
        assert_eq!(centroids[1].color, Color::new(240, 0, 5));
    }

    #[test]
    fn splits_most_populous_bucket_first() {
        let hist = counts(&[
            ((0, 0, 0), 100),
            ((0, 0, 50), 100),
            ((250, 0, 0), 1),
            ((250, 50, 0), 1),
        ]);
        let centroids = median_cut(hist, 3);
        // The dark pair carries the population, so it gets split before the
        // sparse red pair.
        let colors: Vec<Color> = centroids.iter().map(|c| c.color).collect();
        assert!(colors.contains(&Color::new(0, 0, 0)));
        assert!(colors.contains(&Color::new(0, 0, 50)));
        assert!(colors.contains(&Color::new(250, 25, 0)));
    }

    #[test]
    fn populations_beyond_u32_do_not_wrap() {
        let big = u32::MAX as u64 + 10;
        let centroids = median_cut(counts(&[((0, 0, 0), big), ((200, 0, 0), big)]), 1);
        assert_eq!(centroids[0].population, 2 * big);
        assert_eq!(centroids[0].color, Color::new(100, 0, 0));
    }

    #[test]
    fn empty_histogram_gives_nothing() {
        assert!(median_cut(Vec::new(), 8).is_empty());
    }
}
