//! Tailwind-style color scales, contrast checks and harmonies in OKLCH.
//!
//! - [`ColorScale`]: an 11-step lightness ladder synthesized from a hue
//!   ([`ColorScale::synthesize`]) or built around a user color so that the
//!   color survives exactly at its nearest step
//!   ([`ColorScale::personalize`]).
//! - [`Palette`]: a primary scale plus its desaturated gray companion,
//!   generated from a random or injected hue.
//! - [`Color`]: parsing ([`parse()`]), conversion ([`Color::to`]) and
//!   fixed-precision formatting ([`format()`]) across sRGB, HSL, OKLCH,
//!   OKLAB, CIE LCH/LAB, linear sRGB and Display-P3.
//! - [`contrast_ratio`], [`Rating`], [`preferred_text_color`]: WCAG 2.x
//!   contrast math.
//! - [`harmonize`]: monochromatic, analogous, complementary, triadic and
//!   tetradic harmony sets.
//! - [`export`]: CSS/SCSS/JSON/SVG/Tailwind renditions of a palette.
//!
//! Everything is a pure transform over value types: no I/O, no shared
//! mutable state, and expected failures (user input that is not a color,
//! conversions undefined for the input) are ordinary `Result`/`Option`
//! values.

mod color;
mod contrast;
pub mod export;
mod format;
mod harmony;
mod named;
mod parse;
mod scale;

pub use color::{Color, Hsl, Lab, Lch, Oklab, Oklch, BLACK, WHITE};
pub use contrast::{contrast_ratio, preferred_text_color, relative_luminance, Rating};
pub use format::{format, hex};
pub use harmony::{harmonize, Scheme};
pub use parse::{parse, ParseColorError};
pub use scale::{ColorScale, Palette, ScaleTarget, Step, GRAY_CHROMA_MULTIPLIER};

/// A supported color space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Space {
    Srgb,
    LinearSrgb,
    DisplayP3,
    Hsl,
    Oklch,
    Oklab,
    Lch,
    Lab,
}

impl Space {
    pub const ALL: [Space; 8] = [
        Space::Srgb,
        Space::LinearSrgb,
        Space::DisplayP3,
        Space::Hsl,
        Space::Oklch,
        Space::Oklab,
        Space::Lch,
        Space::Lab,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_surface_round_trip() {
        let palette = Palette::from_hue(250.);
        let base = palette.primary.hex(Step::S500);
        let personalized = ColorScale::personalize(&base).expect("hex always personalizes");
        assert!(Step::ALL.iter().any(|&s| personalized.hex(s) == base));

        let text = preferred_text_color(&palette.primary.color(Step::S900));
        assert_eq!(hex(&text).as_deref(), Some("#ffffff"));

        let set = harmonize(&base, Scheme::Analogous);
        assert_eq!(set[0], base);
    }
}
