//! Perceptual color encoding of names.
//!
//! Hue follows the average rarity rank of a name's bigrams (rare spellings
//! and common spellings land on opposite sides of the wheel); luminosity
//! follows the name's share of its community's total frequency.

use std::fmt;

use tracing::debug;

use crate::bigram::bigrams;
use crate::error::{NetworkError, Result};
use crate::frequency::BigramIndex;

/// Lowest luminosity handed out; a name holding its whole community gets 1.0.
pub const MIN_LUMINOSITY: f64 = 0.8;

/// An HSL color with hue in degrees `[0, 360)` and the rest in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub luminosity: f64,
}

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Hsl {
    /// Standard HSL → RGB conversion.
    pub fn to_rgb(&self) -> Rgb {
        let l = self.luminosity.clamp(0.0, 1.0);
        let s = self.saturation.clamp(0.0, 1.0);
        let h = self.hue.rem_euclid(360.0) / 360.0;

        if s == 0.0 {
            let v = channel(l);
            return Rgb(v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Rgb(
            channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
            channel(hue_to_rgb(p, q, h)),
            channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
        )
    }
}

fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Computes hue and luminosity per name from the bigram rank index.
#[derive(Debug, Clone, Copy)]
pub struct ColorAssigner<'a> {
    index: &'a BigramIndex,
}

impl<'a> ColorAssigner<'a> {
    /// Fails if the index ranks are not a bijection onto `1..=len`.
    pub fn new(index: &'a BigramIndex) -> Result<Self> {
        index.check_ranks()?;
        Ok(Self { index })
    }

    /// Mean rarity rank over the name's bigrams, repeats included.
    ///
    /// `None` for a name without bigrams (the empty name).
    pub fn average_rank(&self, name: &str) -> Result<Option<f64>> {
        let mut sum = 0usize;
        let mut count = 0usize;
        for bigram in bigrams(name) {
            let rank = self
                .index
                .rank(&bigram)
                .ok_or_else(|| NetworkError::UnknownBigram {
                    name: name.to_string(),
                    bigram: bigram.to_string(),
                })?;
            sum += rank;
            count += 1;
        }
        if count == 0 {
            return Ok(None);
        }
        Ok(Some(sum as f64 / count as f64))
    }

    /// Map an average rank from `[1, max_rank]` onto `[0, 360)`.
    pub fn hue(&self, average_rank: f64) -> f64 {
        let max_rank = self.index.len();
        if max_rank <= 1 {
            return 0.0;
        }
        let scaled = (average_rank - 1.0) / (max_rank as f64 - 1.0);
        (scaled * 360.0).rem_euclid(360.0)
    }

    /// HSL color for a name. Names without bigrams get hue 0.
    pub fn assign(&self, name: &str, frequency: u64, community_frequency: u64) -> Result<Hsl> {
        let average_rank = self.average_rank(name)?;
        let hue = average_rank.map_or(0.0, |rank| self.hue(rank));
        let luminosity = luminosity(frequency, community_frequency);
        debug!(label = name, ?average_rank, hue, luminosity, "assigned color");
        Ok(Hsl {
            hue,
            saturation: 1.0,
            luminosity,
        })
    }
}

/// `0.8 + 0.2 * frequency / community_frequency`, clamped to `[0.8, 1.0]`.
pub fn luminosity(frequency: u64, community_frequency: u64) -> f64 {
    if community_frequency == 0 || frequency >= community_frequency {
        return 1.0;
    }
    let share = frequency as f64 / community_frequency as f64;
    (MIN_LUMINOSITY + (1.0 - MIN_LUMINOSITY) * share).clamp(MIN_LUMINOSITY, 1.0)
}
