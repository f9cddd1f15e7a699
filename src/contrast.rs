//! WCAG 2.x contrast math.

use crate::color::{Color, BLACK, WHITE};
use crate::Space;

/// WCAG relative luminance of a color, computed over linearized sRGB.
///
/// Colors outside the sRGB gamut are clamped first; a color with no sRGB
/// representation at all (non-finite channels) counts as black, keeping the
/// contrast functions total.
pub fn relative_luminance(color: &Color) -> f64 {
    let lin = match color
        .clamp_to_displayable()
        .and_then(|c| c.to(Space::LinearSrgb))
    {
        Some(Color::LinearSrgb(c)) => c,
        _ => return 0.,
    };
    0.2126 * lin.r + 0.7152 * lin.g + 0.0722 * lin.b
}

/// WCAG contrast ratio between two colors, in \[1, 21\].  Symmetric.
pub fn contrast_ratio(a: &Color, b: &Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// WCAG conformance tier for normal-size text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rating {
    Aaa,
    Aa,
    Fail,
}

impl Rating {
    /// Classify a contrast ratio.  Tier lower bounds are inclusive:
    /// exactly 7.0 is AAA, exactly 4.5 is AA.
    pub fn classify(ratio: f64) -> Rating {
        if ratio >= 7. {
            Rating::Aaa
        } else if ratio >= 4.5 {
            Rating::Aa
        } else {
            Rating::Fail
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Rating::Aaa => "AAA",
            Rating::Aa => "AA",
            Rating::Fail => "Fail",
        })
    }
}

/// The more readable of white and black text over `background`.
///
/// Black wins ties: white is chosen only when it contrasts strictly better.
pub fn preferred_text_color(background: &Color) -> Color {
    if contrast_ratio(background, &WHITE) > contrast_ratio(background, &BLACK) {
        WHITE
    } else {
        BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::hex;
    use crate::parse::parse;
    use proptest::prelude::*;
    use rgb::RGBA;

    #[test]
    fn black_on_white_is_21() {
        assert!((contrast_ratio(&BLACK, &WHITE) - 21.).abs() < 1e-9);
        assert!((contrast_ratio(&WHITE, &WHITE) - 1.).abs() < 1e-9);
    }

    #[test]
    fn tier_boundaries_are_inclusive() {
        assert_eq!(Rating::classify(7.0), Rating::Aaa);
        assert_eq!(Rating::classify(6.999), Rating::Aa);
        assert_eq!(Rating::classify(4.5), Rating::Aa);
        assert_eq!(Rating::classify(4.499), Rating::Fail);
        assert_eq!(Rating::classify(21.0), Rating::Aaa);
        assert_eq!(Rating::classify(1.0), Rating::Fail);
    }

    #[test]
    fn preferred_text_on_extremes() {
        assert_eq!(hex(&preferred_text_color(&BLACK)).unwrap(), "#ffffff");
        assert_eq!(hex(&preferred_text_color(&WHITE)).unwrap(), "#000000");
    }

    #[test]
    fn preferred_text_on_midtones() {
        let bg = parse("#432dd7").unwrap();
        assert_eq!(hex(&preferred_text_color(&bg)).unwrap(), "#ffffff");
        let bg = parse("#ffe680").unwrap();
        assert_eq!(hex(&preferred_text_color(&bg)).unwrap(), "#000000");
    }

    proptest! {
        #[test]
        fn contrast_is_symmetric_and_in_range(
            r1 in any::<u8>(), g1 in any::<u8>(), b1 in any::<u8>(),
            r2 in any::<u8>(), g2 in any::<u8>(), b2 in any::<u8>(),
        ) {
            let c1 = Color::Srgb(RGBA {
                r: r1 as f64 / 255., g: g1 as f64 / 255., b: b1 as f64 / 255., a: 1.,
            });
            let c2 = Color::Srgb(RGBA {
                r: r2 as f64 / 255., g: g2 as f64 / 255., b: b2 as f64 / 255., a: 1.,
            });
            let ab = contrast_ratio(&c1, &c2);
            let ba = contrast_ratio(&c2, &c1);
            prop_assert!((ab - ba).abs() < 1e-12);
            prop_assert!((1.0..=21.0).contains(&ab));
        }
    }
}
