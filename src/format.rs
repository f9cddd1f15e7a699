//! Fixed-precision rendering of colors as CSS strings.
//!
//! Precision is part of the contract (one decimal of OKLCH lightness is the
//! difference between a stable and a flickering converter UI): each space
//! renders with a fixed number of decimals, chosen so that re-parsing a
//! rendered string and rendering it again reproduces it exactly.

use crate::color::Color;
use crate::Space;

/// Render `color` in `space` with that space's precision policy.
///
/// `None` when the conversion itself is undefined (non-finite channels);
/// the caller decides the fallback.
pub fn format(color: &Color, space: Space) -> Option<String> {
    let converted = color.to(space)?;
    Some(match converted {
        Color::Srgb(c) => {
            let q = |v: f64| (v.clamp(0., 1.) * 255.).round();
            if c.a < 1. {
                format!("rgba({:.0}, {:.0}, {:.0}, {:.2})", q(c.r), q(c.g), q(c.b), c.a)
            } else {
                format!("rgb({:.0}, {:.0}, {:.0})", q(c.r), q(c.g), q(c.b))
            }
        }
        Color::Hsl(c) => {
            let h = c.h.unwrap_or(0.);
            let s = (c.s * 100.).clamp(0., 100.);
            let l = (c.l * 100.).clamp(0., 100.);
            if c.alpha < 1. {
                format!("hsla({h:.0}, {s:.0}%, {l:.0}%, {:.2})", c.alpha)
            } else {
                format!("hsl({h:.0}, {s:.0}%, {l:.0}%)")
            }
        }
        Color::Oklch(c) => format!(
            "oklch({}% {} {}{})",
            dec(c.l * 100., 1),
            dec(c.c, 3),
            dec(c.h.unwrap_or(0.), 1),
            alpha(c.alpha)
        ),
        Color::Lch(c) => format!(
            "lch({} {} {}{})",
            dec(c.l, 1),
            dec(c.c, 2),
            dec(c.h.unwrap_or(0.), 1),
            alpha(c.alpha)
        ),
        Color::Lab(c) => format!(
            "lab({} {} {}{})",
            dec(c.l, 2),
            dec(c.a, 2),
            dec(c.b, 2),
            alpha(c.alpha)
        ),
        Color::Oklab(c) => format!(
            "oklab({} {} {}{})",
            dec(c.l, 3),
            dec(c.a, 3),
            dec(c.b, 3),
            alpha(c.alpha)
        ),
        Color::LinearSrgb(c) => format!(
            "color(srgb-linear {} {} {}{})",
            dec(c.r, 3),
            dec(c.g, 3),
            dec(c.b, 3),
            alpha(c.a)
        ),
        Color::DisplayP3(c) => format!(
            "color(display-p3 {} {} {}{})",
            dec(c.r, 3),
            dec(c.g, 3),
            dec(c.b, 3),
            alpha(c.a)
        ),
    })
}

/// 6-digit lowercase hex after gamut clamping; alpha is dropped.
pub fn hex(color: &Color) -> Option<String> {
    let c = color.to_rgb8()?;
    Some(format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b))
}

// Alpha suffix of the modern syntax, present only when translucent.
fn alpha(a: f64) -> String {
    if a < 1. {
        format!(" / {a:.2}")
    } else {
        String::new()
    }
}

/// Fixed-point with `places` decimals, never rendering a negative zero
/// ("-0.00" would re-parse to a value that renders as "0.00", breaking
/// render/parse/render stability).
fn dec(v: f64, places: usize) -> String {
    let s = format!("{v:.places$}");
    if s.starts_with('-') && s[1..].bytes().all(|b| b == b'0' || b == b'.') {
        s[1..].to_string()
    } else {
        s
    }
}
