//! Parsing of CSS color syntax into [`Color`].
//!
//! Accepts hex (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`), the functional
//! forms `rgb()`/`rgba()`, `hsl()`/`hsla()`, `oklch()`, `oklab()`, `lch()`,
//! `lab()` and `color()` (srgb, srgb-linear, display-p3), and CSS color
//! names.  Both the legacy comma syntax and the modern space-separated
//! syntax with `/ alpha` are understood, as is `none` for a missing hue.

use rgb::RGBA;
use thiserror::Error;

use crate::color::{Color, Hsl, Lab, Lch, Oklab, Oklch};
use crate::named;

/// The input did not match any supported color grammar.
///
/// This is an expected outcome of parsing arbitrary user text; every caller
/// branches on it rather than treating it as exceptional.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    #[error("empty color string")]
    Empty,
    #[error("invalid hex color")]
    InvalidHex,
    #[error("unknown color function `{0}`")]
    UnknownFunction(String),
    #[error("malformed arguments to `{0}()`")]
    MalformedArguments(&'static str),
    #[error("unknown color name `{0}`")]
    UnknownName(String),
}

/// Parse any supported color syntax.
pub fn parse(input: &str) -> Result<Color, ParseColorError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ParseColorError::Empty);
    }
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    let lower = s.to_ascii_lowercase();
    if let Some(open) = lower.find('(') {
        let inner = lower[open + 1..]
            .strip_suffix(')')
            .ok_or_else(|| ParseColorError::UnknownFunction(lower.clone()))?;
        return parse_function(lower[..open].trim_end(), inner);
    }
    if lower == "transparent" {
        return Ok(Color::Srgb(RGBA { r: 0., g: 0., b: 0., a: 0. }));
    }
    match named::lookup(&lower) {
        Some([r, g, b]) => Ok(Color::from(rgb::RGB8 { r, g, b })),
        None => Err(ParseColorError::UnknownName(lower)),
    }
}

fn parse_hex(hex: &str) -> Result<Color, ParseColorError> {
    let nibble = |c: u8| -> Result<u8, ParseColorError> {
        match c {
            b'0'..=b'9' => Ok(c - b'0'),
            b'a'..=b'f' => Ok(c - b'a' + 10),
            b'A'..=b'F' => Ok(c - b'A' + 10),
            _ => Err(ParseColorError::InvalidHex),
        }
    };
    let pair = |hi: u8, lo: u8| -> Result<u8, ParseColorError> {
        Ok(nibble(hi)? << 4 | nibble(lo)?)
    };
    let d = hex.as_bytes();
    let (r, g, b, a) = match d.len() {
        3 => (nibble(d[0])? * 17, nibble(d[1])? * 17, nibble(d[2])? * 17, 255),
        4 => (
            nibble(d[0])? * 17,
            nibble(d[1])? * 17,
            nibble(d[2])? * 17,
            nibble(d[3])? * 17,
        ),
        6 => (pair(d[0], d[1])?, pair(d[2], d[3])?, pair(d[4], d[5])?, 255),
        8 => (
            pair(d[0], d[1])?,
            pair(d[2], d[3])?,
            pair(d[4], d[5])?,
            pair(d[6], d[7])?,
        ),
        _ => return Err(ParseColorError::InvalidHex),
    };
    Ok(Color::Srgb(RGBA {
        r: r as f64 / 255.,
        g: g as f64 / 255.,
        b: b as f64 / 255.,
        a: a as f64 / 255.,
    }))
}

/// One argument token, before per-channel interpretation.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Arg {
    Number(f64),
    Percent(f64),
    /// The CSS `none` keyword (a missing component).
    None,
}

impl Arg {
    /// Resolve as a number, scaling percentages against `percent_ref`
    /// (`x%` → `x / 100 * percent_ref`).  `none` resolves to 0.
    fn scaled(self, percent_ref: f64) -> f64 {
        match self {
            Arg::Number(v) => v,
            Arg::Percent(p) => p / 100. * percent_ref,
            Arg::None => 0.,
        }
    }

    /// Resolve as a hue in degrees, `none` staying absent.
    fn hue(self) -> Option<f64> {
        match self {
            Arg::Number(v) => Some(v.rem_euclid(360.)),
            Arg::Percent(p) => Some((p / 100. * 360.).rem_euclid(360.)),
            Arg::None => None,
        }
    }
}

/// Split a functional argument list into component args and an optional
/// alpha.  Commas and whitespace both separate; `/` introduces the alpha.
fn split_args(name: &'static str, inner: &str) -> Result<(Vec<Arg>, Option<Arg>), ParseColorError> {
    let err = || ParseColorError::MalformedArguments(name);
    let (components, alpha) = match inner.split_once('/') {
        Some((c, a)) => (c, Some(a)),
        None => (inner, None),
    };
    let mut args = Vec::with_capacity(4);
    for tok in components.split(|c: char| c == ',' || c.is_whitespace()) {
        if tok.is_empty() {
            continue;
        }
        args.push(token(tok).ok_or_else(err)?);
    }
    // The legacy comma syntax carries alpha as a fourth component.
    let alpha = match alpha {
        Some(a) => Some(token(a.trim()).ok_or_else(err)?),
        None if args.len() == 4 => args.pop(),
        None => None,
    };
    if args.len() != 3 {
        return Err(err());
    }
    Ok((args, alpha))
}

fn token(tok: &str) -> Option<Arg> {
    if tok == "none" {
        return Some(Arg::None);
    }
    if let Some(p) = tok.strip_suffix('%') {
        return p.trim().parse().ok().map(Arg::Percent);
    }
    let tok = tok.strip_suffix("deg").unwrap_or(tok);
    tok.parse().ok().map(Arg::Number)
}

fn alpha_value(arg: Option<Arg>) -> f64 {
    match arg {
        Some(Arg::Number(v)) => v.clamp(0., 1.),
        Some(Arg::Percent(p)) => (p / 100.).clamp(0., 1.),
        Some(Arg::None) | None => 1.,
    }
}

fn parse_function(name: &str, inner: &str) -> Result<Color, ParseColorError> {
    match name {
        "rgb" | "rgba" => {
            let (args, alpha) = split_args("rgb", inner)?;
            let ch = |a: Arg| match a {
                // Numbers are 8-bit channel values, percentages full-range.
                Arg::Number(v) => v / 255.,
                Arg::Percent(p) => p / 100.,
                Arg::None => 0.,
            };
            Ok(Color::Srgb(RGBA {
                r: ch(args[0]),
                g: ch(args[1]),
                b: ch(args[2]),
                a: alpha_value(alpha),
            }))
        }
        "hsl" | "hsla" => {
            let (args, alpha) = split_args("hsl", inner)?;
            // Saturation and lightness are percentages; bare numbers are
            // read on the same 0–100 scale.
            let pc = |a: Arg| match a {
                Arg::Number(v) => v / 100.,
                Arg::Percent(p) => p / 100.,
                Arg::None => 0.,
            };
            Ok(Color::Hsl(Hsl {
                h: args[0].hue(),
                s: pc(args[1]),
                l: pc(args[2]),
                alpha: alpha_value(alpha),
            }))
        }
        "oklch" => {
            let (args, alpha) = split_args("oklch", inner)?;
            Ok(Color::Oklch(Oklch {
                l: args[0].scaled(1.),
                c: args[1].scaled(0.4),
                h: args[2].hue(),
                alpha: alpha_value(alpha),
            }))
        }
        "oklab" => {
            let (args, alpha) = split_args("oklab", inner)?;
            Ok(Color::Oklab(Oklab {
                l: args[0].scaled(1.),
                a: args[1].scaled(0.4),
                b: args[2].scaled(0.4),
                alpha: alpha_value(alpha),
            }))
        }
        "lch" => {
            let (args, alpha) = split_args("lch", inner)?;
            Ok(Color::Lch(Lch {
                l: args[0].scaled(100.),
                c: args[1].scaled(150.),
                h: args[2].hue(),
                alpha: alpha_value(alpha),
            }))
        }
        "lab" => {
            let (args, alpha) = split_args("lab", inner)?;
            Ok(Color::Lab(Lab {
                l: args[0].scaled(100.),
                a: args[1].scaled(125.),
                b: args[2].scaled(125.),
                alpha: alpha_value(alpha),
            }))
        }
        "color" => {
            let inner = inner.trim_start();
            let (space, rest) = inner
                .split_once(|c: char| c.is_whitespace())
                .ok_or(ParseColorError::MalformedArguments("color"))?;
            let (args, alpha) = split_args("color", rest)?;
            let ch = |a: Arg| a.scaled(1.);
            let rgba = RGBA {
                r: ch(args[0]),
                g: ch(args[1]),
                b: ch(args[2]),
                a: alpha_value(alpha),
            };
            match space {
                "srgb" => Ok(Color::Srgb(rgba)),
                "srgb-linear" => Ok(Color::LinearSrgb(rgba)),
                "display-p3" => Ok(Color::DisplayP3(rgba)),
                _ => Err(ParseColorError::UnknownFunction(format!("color({space}"))),
            }
        }
        other => Err(ParseColorError::UnknownFunction(other.to_string())),
    }
}

impl std::str::FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl TryFrom<&str> for Color {
    type Error = ParseColorError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Space;

    fn srgb8(color: &Color) -> (u8, u8, u8) {
        let c = color.to_rgb8().unwrap();
        (c.r, c.g, c.b)
    }

    #[test]
    fn hex_forms() {
        assert_eq!(srgb8(&parse("#f80").unwrap()), (255, 136, 0));
        assert_eq!(srgb8(&parse("#432dd7").unwrap()), (67, 45, 215));
        assert_eq!(srgb8(&parse("#432DD7").unwrap()), (67, 45, 215));
        let c = parse("#432dd780").unwrap();
        assert!((c.alpha() - 128. / 255.).abs() < 1e-12);
        assert!(parse("#12345").is_err());
        assert!(parse("#zzz").is_err());
    }

    #[test]
    fn rgb_legacy_and_modern() {
        assert_eq!(srgb8(&parse("rgb(59, 130, 246)").unwrap()), (59, 130, 246));
        assert_eq!(srgb8(&parse("rgb(59 130 246)").unwrap()), (59, 130, 246));
        assert_eq!(srgb8(&parse("rgb(100% 0% 50%)").unwrap()), (255, 0, 128));
        let c = parse("rgba(0, 0, 0, 0.5)").unwrap();
        assert!((c.alpha() - 0.5).abs() < 1e-12);
        let c = parse("rgb(0 0 0 / 25%)").unwrap();
        assert!((c.alpha() - 0.25).abs() < 1e-12);
        assert!(parse("rgb(1, 2)").is_err());
    }

    #[test]
    fn hsl_syntax() {
        let c = parse("hsl(210, 50%, 40%)").unwrap();
        match c {
            Color::Hsl(h) => {
                assert_eq!(h.h, Some(210.));
                assert!((h.s - 0.5).abs() < 1e-12);
                assert!((h.l - 0.4).abs() < 1e-12);
            }
            _ => unreachable!(),
        }
        // Modern syntax, bare numbers on the percent scale.
        assert_eq!(parse("hsl(210 50 40)").unwrap(), c);
    }

    #[test]
    fn oklch_syntax() {
        let c = parse("oklch(55% 0.15 250)").unwrap();
        match c {
            Color::Oklch(ok) => {
                assert!((ok.l - 0.55).abs() < 1e-12);
                assert!((ok.c - 0.15).abs() < 1e-12);
                assert_eq!(ok.h, Some(250.));
            }
            _ => unreachable!(),
        }
        // `none` hue stays absent; degrees suffix and negative hue wrap.
        match parse("oklch(0.8 0.001 none)").unwrap() {
            Color::Oklch(ok) => assert_eq!(ok.h, None),
            _ => unreachable!(),
        }
        match parse("oklch(0.8 0.1 -30deg)").unwrap() {
            Color::Oklch(ok) => assert_eq!(ok.h, Some(330.)),
            _ => unreachable!(),
        }
    }

    #[test]
    fn lab_and_lch_percent_scaling() {
        match parse("lab(50% 100% -100%)").unwrap() {
            Color::Lab(lab) => {
                assert!((lab.l - 50.).abs() < 1e-12);
                assert!((lab.a - 125.).abs() < 1e-12);
                assert!((lab.b + 125.).abs() < 1e-12);
            }
            _ => unreachable!(),
        }
        match parse("lch(52.2 72.2 50)").unwrap() {
            Color::Lch(lch) => {
                assert!((lch.l - 52.2).abs() < 1e-12);
                assert!((lch.c - 72.2).abs() < 1e-12);
                assert_eq!(lch.h, Some(50.));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn color_function_spaces() {
        let c = parse("color(display-p3 1 0 0.333)").unwrap();
        assert_eq!(c.space(), Space::DisplayP3);
        let c = parse("color(srgb-linear 0.5 0.5 0.5)").unwrap();
        assert_eq!(c.space(), Space::LinearSrgb);
        assert!(parse("color(rec2020 0 0 0)").is_err());
    }

    #[test]
    fn named_colors() {
        assert_eq!(srgb8(&parse("rebeccapurple").unwrap()), (102, 51, 153));
        assert_eq!(srgb8(&parse("White").unwrap()), (255, 255, 255));
        assert_eq!(parse("transparent").unwrap().alpha(), 0.);
        assert_eq!(
            parse("blurple"),
            Err(ParseColorError::UnknownName("blurple".into()))
        );
    }

    #[test]
    fn junk_is_rejected() {
        assert_eq!(parse("   "), Err(ParseColorError::Empty));
        assert!(parse("rgb(a, b, c)").is_err());
        assert!(parse("hwb(0 0% 0%)").is_err());
        assert!(parse("rgb(1 2 3").is_err());
    }
}
