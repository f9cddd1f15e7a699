//! Color-wheel harmonies derived in OKLCH.
//!
//! Each scheme applies fixed hue and/or lightness deltas to a base color
//! while holding chroma constant.  This is best-effort by design: a
//! candidate that cannot be represented in sRGB is dropped rather than
//! padded with a substitute, so a scheme may yield fewer colors than it
//! names.

use crate::color::{Color, Oklch};
use crate::format::hex;
use crate::parse::parse;

/// A named harmony scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scheme {
    Monochromatic,
    Analogous,
    Complementary,
    Triadic,
    Tetradic,
}

impl Scheme {
    pub const ALL: [Scheme; 5] = [
        Scheme::Monochromatic,
        Scheme::Analogous,
        Scheme::Complementary,
        Scheme::Triadic,
        Scheme::Tetradic,
    ];

    /// The (Δhue°, Δlightness) pairs applied to the base color.
    fn deltas(self) -> &'static [(f64, f64)] {
        match self {
            Scheme::Monochromatic => &[(0., 0.1), (0., -0.1), (0., 0.2), (0., -0.2)],
            Scheme::Analogous => &[(30., 0.), (-30., 0.)],
            Scheme::Complementary => &[(180., 0.)],
            Scheme::Triadic => &[(120., 0.), (240., 0.)],
            Scheme::Tetradic => &[(60., 0.), (180., 0.), (240., 0.)],
        }
    }
}

// Bases below this chroma have no meaningful hue to harmonize on.
const NEUTRAL_CHROMA: f64 = 0.02;

const MAX_COLORS: usize = 5;

/// Derive a harmony set from `base`, base first.
///
/// The base string is echoed back unchanged as the first entry, even when
/// it does not parse (the set is then just the base).  Near-achromatic
/// bases short-circuit to the base alone: rotating the hue of a gray
/// yields more grays, not a harmony.  Derived entries are lowercase hex,
/// deduplicated, at most [`MAX_COLORS`] in total.
pub fn harmonize(base: &str, scheme: Scheme) -> Vec<String> {
    let mut colors = vec![base.to_string()];
    let Ok(parsed) = parse(base) else {
        return colors;
    };
    let Some(oklch) = parsed.oklch() else {
        return colors;
    };
    if oklch.h.is_none() || oklch.c < NEUTRAL_CHROMA {
        return colors;
    }
    let h = oklch.h.unwrap_or(0.);

    for &(dh, dl) in scheme.deltas() {
        let candidate = Color::Oklch(Oklch {
            l: (oklch.l + dl).clamp(0., 1.),
            c: oklch.c,
            h: Some((h + dh).rem_euclid(360.)),
            alpha: 1.,
        });
        // Candidates with no sRGB representation are dropped silently.
        let Some(hex) = hex(&candidate) else {
            continue;
        };
        if !colors.contains(&hex) {
            colors.push(hex);
        }
    }
    colors.truncate(MAX_COLORS);
    colors
}
