//! Tailwind-style 11-step color scales in OKLCH.
//!
//! A [`ColorScale`] holds one displayable color per [`Step`].  Scales are
//! synthesized from a hue by walking a fixed lightness/chroma curve, or
//! personalized around an arbitrary input color so that the input itself
//! survives, bit-exact, at its nearest lightness step.

use rand::Rng;
use rgb::RGB8;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::color::{Color, Oklch};
use crate::parse::parse;

/// One position on the 11-step lightness ladder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Step {
    S50,
    S100,
    S200,
    S300,
    S400,
    S500,
    S600,
    S700,
    S800,
    S900,
    S950,
}

/// Target lightness and chroma of one scale step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTarget {
    pub l: f64,
    pub c: f64,
}

impl Step {
    /// All steps, lightest first.
    pub const ALL: [Step; 11] = [
        Step::S50,
        Step::S100,
        Step::S200,
        Step::S300,
        Step::S400,
        Step::S500,
        Step::S600,
        Step::S700,
        Step::S800,
        Step::S900,
        Step::S950,
    ];

    /// The conventional numeric key (50, 100, …, 950).
    pub fn key(self) -> u16 {
        match self {
            Step::S50 => 50,
            Step::S100 => 100,
            Step::S200 => 200,
            Step::S300 => 300,
            Step::S400 => 400,
            Step::S500 => 500,
            Step::S600 => 600,
            Step::S700 => 700,
            Step::S800 => 800,
            Step::S900 => 900,
            Step::S950 => 950,
        }
    }

    /// The curve this crate synthesizes scales from.  Lightness decreases
    /// strictly from 50 to 950; chroma peaks at 500 and tapers toward both
    /// ends.  These pairs are design constants, not derived values.
    pub fn target(self) -> ScaleTarget {
        let (l, c) = match self {
            Step::S50 => (0.98, 0.012),
            Step::S100 => (0.94, 0.025),
            Step::S200 => (0.88, 0.05),
            Step::S300 => (0.8, 0.09),
            Step::S400 => (0.7, 0.13),
            Step::S500 => (0.62, 0.15),
            Step::S600 => (0.54, 0.135),
            Step::S700 => (0.45, 0.11),
            Step::S800 => (0.36, 0.08),
            Step::S900 => (0.27, 0.05),
            Step::S950 => (0.18, 0.025),
        };
        ScaleTarget { l, c }
    }

    fn index(self) -> usize {
        match self {
            Step::S50 => 0,
            Step::S100 => 1,
            Step::S200 => 2,
            Step::S300 => 3,
            Step::S400 => 4,
            Step::S500 => 5,
            Step::S600 => 6,
            Step::S700 => 7,
            Step::S800 => 8,
            Step::S900 => 9,
            Step::S950 => 10,
        }
    }
}

// Chroma never drops below this during synthesis, so a multiplier of 0
// still yields faintly tinted (not dead-gray) steps.
const MIN_CHROMA: f64 = 0.005;

// Below this chroma an input color counts as achromatic and is projected
// onto the desaturated companion curve instead of a chroma offset.
const ACHROMATIC_CHROMA: f64 = 0.005;

// Companion-curve factor for achromatic inputs.
const ACHROMATIC_CURVE_SCALE: f64 = 0.1;

const FALLBACK: RGB8 = RGB8 { r: 0, g: 0, b: 0 };

/// An ordered mapping from [`Step`] to a displayable sRGB color.
///
/// Exactly one entry per step, by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorScale([RGB8; 11]);

impl ColorScale {
    /// Synthesize a scale for `hue` (degrees), scaling the curve's chroma
    /// by `chroma_multiplier`.
    ///
    /// Never fails: out-of-gamut steps are clamped into sRGB, and a step
    /// with no sRGB representation at all degrades to black.
    pub fn synthesize(hue: f64, chroma_multiplier: f64) -> ColorScale {
        let hue = hue.rem_euclid(360.);
        let mut colors = [FALLBACK; 11];
        for step in Step::ALL {
            let t = step.target();
            let oklch = Color::Oklch(Oklch {
                l: t.l,
                c: (t.c * chroma_multiplier).max(MIN_CHROMA),
                h: Some(hue),
                alpha: 1.,
            });
            colors[step.index()] = oklch.to_rgb8().unwrap_or(FALLBACK);
        }
        ColorScale(colors)
    }

    /// Build a scale around an arbitrary input color, guaranteeing the
    /// input reappears exactly at its nearest lightness step.
    ///
    /// The whole curve is shifted by the input's lightness/chroma offset
    /// from that step, so neighbouring steps extrapolate smoothly instead
    /// of being re-derived.  Near-gray inputs (chroma < 0.005 or no hue)
    /// take a desaturated companion curve with no chroma offset.
    ///
    /// `None` when the input does not parse; the caller owns the fallback.
    pub fn personalize(input: &str) -> Option<ColorScale> {
        let parsed = parse(input).ok()?;
        let oklch = parsed.oklch()?;
        let achromatic = oklch.h.is_none() || oklch.c < ACHROMATIC_CHROMA;
        let hue = oklch.h.unwrap_or(0.);

        // Nearest step by lightness, first seen winning exact ties.
        let mut closest = Step::S50;
        let mut best = f64::INFINITY;
        for step in Step::ALL {
            let d = (step.target().l - oklch.l).abs();
            if d < best {
                best = d;
                closest = step;
            }
        }
        let anchor = closest.target();
        let l_offset = oklch.l - anchor.l;
        let c_offset = if achromatic { 0. } else { oklch.c - anchor.c };

        let mut colors = [FALLBACK; 11];
        for step in Step::ALL {
            let t = step.target();
            let c = if achromatic {
                t.c * ACHROMATIC_CURVE_SCALE
            } else {
                (t.c + c_offset).max(0.)
            };
            let oklch = Color::Oklch(Oklch {
                l: (t.l + l_offset).clamp(0., 1.),
                c,
                h: Some(hue),
                alpha: 1.,
            });
            colors[step.index()] = oklch.to_rgb8().unwrap_or(FALLBACK);
        }
        // Reinstate the exact input at the anchor step.
        colors[closest.index()] = parsed.to_rgb8()?;
        Some(ColorScale(colors))
    }

    /// The quantized sRGB color at `step`.
    pub fn get(&self, step: Step) -> RGB8 {
        self.0[step.index()]
    }

    /// The color at `step` as a [`Color`] value.
    pub fn color(&self, step: Step) -> Color {
        Color::from(self.get(step))
    }

    /// The color at `step` as a lowercase hex string.
    pub fn hex(&self, step: Step) -> String {
        let c = self.get(step);
        format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
    }

    /// Iterate the scale lightest-first.
    pub fn iter(&self) -> impl Iterator<Item = (Step, RGB8)> + '_ {
        Step::ALL.iter().map(move |&s| (s, self.get(s)))
    }
}

impl Serialize for ColorScale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Step::ALL.len()))?;
        for (step, _) in self.iter() {
            map.serialize_entry(&step.key().to_string(), &self.hex(step))?;
        }
        map.end()
    }
}

/// Multiplier deriving the gray companion scale from the primary hue.
pub const GRAY_CHROMA_MULTIPLIER: f64 = 0.05;

/// A primary scale and its desaturated gray companion, sharing one hue.
///
/// Palettes are regenerated wholesale, never mutated in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Palette {
    pub primary: ColorScale,
    pub gray: ColorScale,
}

impl Palette {
    /// Deterministic core: both scales from one hue.
    pub fn from_hue(hue: f64) -> Palette {
        Palette {
            primary: ColorScale::synthesize(hue, 1.),
            gray: ColorScale::synthesize(hue, GRAY_CHROMA_MULTIPLIER),
        }
    }

    /// Generate from a caller-supplied randomness source (uniform hue in
    /// \[0, 360)), so tests can substitute a deterministic one.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Palette {
        Palette::from_hue(rng.gen_range(0.0..360.0))
    }

    /// Generate with the thread RNG.
    pub fn random() -> Palette {
        Palette::generate(&mut rand::thread_rng())
    }
}
