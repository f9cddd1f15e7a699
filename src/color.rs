//! Color representations and conversions between them.
//!
//! [`Color`] is a tagged value: one variant per supported [`Space`], each
//! carrying that space's channels plus an alpha in \[0, 1\].  All scale and
//! harmony math in this crate runs in [`Oklch`]; everything else converts
//! through linear sRGB.

use rgb::{RGB8, RGBA};

use crate::Space;

/// Channels of an HSL color.  `s` and `l` are in \[0, 1\].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    /// Hue in degrees in \[0, 360), or `None` for achromatic colors.
    pub h: Option<f64>,
    pub s: f64,
    pub l: f64,
    pub alpha: f64,
}

/// Channels of an OKLCH color (polar OKLAB).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oklch {
    /// Perceptual lightness in \[0, 1\].
    pub l: f64,
    /// Chroma, ≥ 0 (roughly below 0.4 for displayable colors).
    pub c: f64,
    /// Hue in degrees in \[0, 360), or `None` for achromatic colors.
    pub h: Option<f64>,
    pub alpha: f64,
}

/// Channels of an OKLAB color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oklab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
    pub alpha: f64,
}

/// Channels of a CIE L\*C\*h° color (polar CIELAB, D50 white point).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lch {
    /// Lightness in \[0, 100\].
    pub l: f64,
    /// Chroma, ≥ 0 (up to ~150 in practice).
    pub c: f64,
    /// Hue in degrees in \[0, 360), or `None` for achromatic colors.
    pub h: Option<f64>,
    pub alpha: f64,
}

/// Channels of a CIE L\*a\*b\* color (D50 white point).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
    pub alpha: f64,
}

/// A color tagged with the space its channels live in.
///
/// RGB-family variants store channels in \[0, 1\] (they may transiently fall
/// outside that range for out-of-gamut colors; see
/// [`Color::clamp_to_displayable`]).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    Srgb(RGBA<f64>),
    LinearSrgb(RGBA<f64>),
    DisplayP3(RGBA<f64>),
    Hsl(Hsl),
    Oklch(Oklch),
    Oklab(Oklab),
    Lch(Lch),
    Lab(Lab),
}

/// Pure white in sRGB.
pub const WHITE: Color = Color::Srgb(RGBA { r: 1., g: 1., b: 1., a: 1. });
/// Pure black in sRGB.
pub const BLACK: Color = Color::Srgb(RGBA { r: 0., g: 0., b: 0., a: 1. });

// Chroma below which a cylindrical conversion reports no hue.
const HUELESS_CHROMA: f64 = 1e-6;

/// sRGB transfer function, decoding direction.  Extended to negative
/// values by sign as in CSS Color 4, so out-of-gamut channels survive a
/// round-trip.
fn srgb_decode(v: f64) -> f64 {
    let a = v.abs();
    if a <= 0.04045 {
        v / 12.92
    } else {
        v.signum() * ((a + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB transfer function, encoding direction.
fn srgb_encode(v: f64) -> f64 {
    let a = v.abs();
    if a <= 0.0031308 {
        v * 12.92
    } else {
        v.signum() * (1.055 * a.powf(1. / 2.4) - 0.055)
    }
}

fn mul3(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

// Linear sRGB ↔ XYZ, D65 and Bradford-adapted D50 variants.  Matrices from
// the CSS Color 4 sample code.
const LIN_SRGB_TO_XYZ_D65: [[f64; 3]; 3] = [
    [0.41239079926595934, 0.357584339383878, 0.1804807884018343],
    [0.21263900587151027, 0.715168678767756, 0.07219231536073371],
    [0.01933081871559182, 0.11919477979462598, 0.9505321522496607],
];
const XYZ_D65_TO_LIN_SRGB: [[f64; 3]; 3] = [
    [3.2409699419045226, -1.537383177570094, -0.4986107602930034],
    [-0.9692436362808796, 1.8759675015077202, 0.04155505740717559],
    [0.05563007969699366, -0.20397695888897652, 1.0569715142428786],
];
const LIN_SRGB_TO_XYZ_D50: [[f64; 3]; 3] = [
    [0.43606574282481147, 0.3851514688337912, 0.14307845442264197],
    [0.22249319175623702, 0.7168870538238823, 0.06061979053616537],
    [0.013923904500943465, 0.09708128566574634, 0.7140993584005155],
];
const XYZ_D50_TO_LIN_SRGB: [[f64; 3]; 3] = [
    [3.1341359569958707, -1.6173863321612538, -0.4906619460083532],
    [-0.978795502912089, 1.916254567259524, 0.03344273116131949],
    [0.07195537988411677, -0.2289768264158322, 1.405386058324125],
];

// Linear Display-P3 ↔ XYZ D65.
const LIN_P3_TO_XYZ_D65: [[f64; 3]; 3] = [
    [0.4865709486482162, 0.26566769316909306, 0.19821728523436247],
    [0.2289745640697488, 0.6917385218365064, 0.079286914093745],
    [0.0, 0.04511338185890264, 1.043944368900976],
];
const XYZ_D65_TO_LIN_P3: [[f64; 3]; 3] = [
    [2.493496911941425, -0.9313836179191239, -0.40271078445071684],
    [-0.8294889695615747, 1.7626640603183463, 0.023624685841943577],
    [0.03584583024378447, -0.07617238926804182, 0.9568845240076872],
];

// D50 reference white.
const WHITE_D50: [f64; 3] = [0.9642956764295677, 1.0, 0.8251046025104602];

// CIELAB companding constants, ε = (6/29)³ and κ = (29/3)³.
const LAB_EPS: f64 = 216. / 24389.;
const LAB_KAPPA: f64 = 24389. / 27.;

/// OKLAB from linear sRGB.  Constants from Björn Ottosson,
/// <https://bottosson.github.io/posts/oklab/>.
fn linear_to_oklab(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let l = (0.4122214708 * r + 0.5363325363 * g + 0.0514459929 * b).cbrt();
    let m = (0.2119034982 * r + 0.6806995451 * g + 0.1073969566 * b).cbrt();
    let s = (0.0883024619 * r + 0.2817188376 * g + 0.6299787005 * b).cbrt();
    (
        0.2104542553 * l + 0.7936177850 * m - 0.0040720468 * s,
        1.9779984951 * l - 2.4285922050 * m + 0.4505937099 * s,
        0.0259040371 * l + 0.7827717662 * m - 0.8086757660 * s,
    )
}

fn oklab_to_linear(l: f64, a: f64, b: f64) -> (f64, f64, f64) {
    let l_ = l + 0.3963377774 * a + 0.2158037573 * b;
    let m_ = l - 0.1055613458 * a - 0.0638541728 * b;
    let s_ = l - 0.0894841775 * a - 1.2914855480 * b;
    let l3 = l_ * l_ * l_;
    let m3 = m_ * m_ * m_;
    let s3 = s_ * s_ * s_;
    (
        4.0767416621 * l3 - 3.3077115913 * m3 + 0.2309699292 * s3,
        -1.2684380046 * l3 + 2.6097574011 * m3 - 0.3413193965 * s3,
        -0.0041960863 * l3 - 0.7034186147 * m3 + 1.7076147010 * s3,
    )
}

fn lab_from_linear(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let xyz = mul3(&LIN_SRGB_TO_XYZ_D50, [r, g, b]);
    let f = |t: f64| {
        if t > LAB_EPS {
            t.cbrt()
        } else {
            (LAB_KAPPA * t + 16.) / 116.
        }
    };
    let fx = f(xyz[0] / WHITE_D50[0]);
    let fy = f(xyz[1] / WHITE_D50[1]);
    let fz = f(xyz[2] / WHITE_D50[2]);
    (116. * fy - 16., 500. * (fx - fy), 200. * (fy - fz))
}

fn lab_to_linear(l: f64, a: f64, b: f64) -> (f64, f64, f64) {
    let fy = (l + 16.) / 116.;
    let fx = a / 500. + fy;
    let fz = fy - b / 200.;
    let finv = |t: f64| {
        let t3 = t * t * t;
        if t3 > LAB_EPS {
            t3
        } else {
            (116. * t - 16.) / LAB_KAPPA
        }
    };
    let x = finv(fx) * WHITE_D50[0];
    // The lightness branch of the inverse uses κ directly.
    let y = if l > LAB_KAPPA * LAB_EPS {
        fy * fy * fy
    } else {
        l / LAB_KAPPA
    };
    let z = finv(fz) * WHITE_D50[2];
    let rgb = mul3(&XYZ_D50_TO_LIN_SRGB, [x, y, z]);
    (rgb[0], rgb[1], rgb[2])
}

/// Cartesian → polar.  Hue is `None` below the chroma noise floor so that
/// grays do not acquire a fabricated hue from rounding error.
fn to_polar(a: f64, b: f64) -> (f64, Option<f64>) {
    let c = a.hypot(b);
    if c < HUELESS_CHROMA {
        (c, None)
    } else {
        (c, Some(b.atan2(a).to_degrees().rem_euclid(360.)))
    }
}

fn from_polar(c: f64, h: Option<f64>) -> (f64, f64) {
    // Undefined hue computes as 0°; achromatic either way since c ≈ 0.
    let h = h.unwrap_or(0.).to_radians();
    (c * h.cos(), c * h.sin())
}

fn hsl_from_srgb(r: f64, g: f64, b: f64) -> (Option<f64>, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.;
    let delta = max - min;
    if delta < 1e-9 {
        return (None, 0., l);
    }
    let s = delta / (1. - (2. * l - 1.).abs());
    let h = if max == r {
        60. * ((g - b) / delta).rem_euclid(6.)
    } else if max == g {
        60. * ((b - r) / delta + 2.)
    } else {
        60. * ((r - g) / delta + 4.)
    };
    (Some(h.rem_euclid(360.)), s, l)
}

fn hsl_to_srgb(h: Option<f64>, s: f64, l: f64) -> (f64, f64, f64) {
    let h = h.unwrap_or(0.).rem_euclid(360.);
    let c = (1. - (2. * l - 1.).abs()) * s;
    let x = c * (1. - ((h / 60.).rem_euclid(2.) - 1.).abs());
    let m = l - c / 2.;
    let (r, g, b) = match h {
        _ if h < 60. => (c, x, 0.),
        _ if h < 120. => (x, c, 0.),
        _ if h < 180. => (0., c, x),
        _ if h < 240. => (0., x, c),
        _ if h < 300. => (x, 0., c),
        _ => (c, 0., x),
    };
    (r + m, g + m, b + m)
}

impl Color {
    /// The space this color's channels are expressed in.
    pub fn space(&self) -> Space {
        match self {
            Color::Srgb(_) => Space::Srgb,
            Color::LinearSrgb(_) => Space::LinearSrgb,
            Color::DisplayP3(_) => Space::DisplayP3,
            Color::Hsl(_) => Space::Hsl,
            Color::Oklch(_) => Space::Oklch,
            Color::Oklab(_) => Space::Oklab,
            Color::Lch(_) => Space::Lch,
            Color::Lab(_) => Space::Lab,
        }
    }

    /// The alpha component in \[0, 1\].
    pub fn alpha(&self) -> f64 {
        match self {
            Color::Srgb(c) | Color::LinearSrgb(c) | Color::DisplayP3(c) => c.a,
            Color::Hsl(c) => c.alpha,
            Color::Oklch(c) => c.alpha,
            Color::Oklab(c) => c.alpha,
            Color::Lch(c) => c.alpha,
            Color::Lab(c) => c.alpha,
        }
    }

    fn channels(&self) -> [f64; 3] {
        match self {
            Color::Srgb(c) | Color::LinearSrgb(c) | Color::DisplayP3(c) => [c.r, c.g, c.b],
            Color::Hsl(c) => [c.h.unwrap_or(0.), c.s, c.l],
            Color::Oklch(c) => [c.l, c.c, c.h.unwrap_or(0.)],
            Color::Oklab(c) => [c.l, c.a, c.b],
            Color::Lch(c) => [c.l, c.c, c.h.unwrap_or(0.)],
            Color::Lab(c) => [c.l, c.a, c.b],
        }
    }

    fn is_finite(&self) -> bool {
        self.channels().iter().all(|v| v.is_finite()) && self.alpha().is_finite()
    }

    /// Linear sRGB channels of this color, the hub every conversion routes
    /// through.  Total on finite input; out-of-gamut values pass through
    /// unclamped.
    fn to_linear_rgba(&self) -> RGBA<f64> {
        match *self {
            Color::LinearSrgb(c) => c,
            Color::Srgb(c) => RGBA {
                r: srgb_decode(c.r),
                g: srgb_decode(c.g),
                b: srgb_decode(c.b),
                a: c.a,
            },
            Color::DisplayP3(c) => {
                let lin = [srgb_decode(c.r), srgb_decode(c.g), srgb_decode(c.b)];
                let xyz = mul3(&LIN_P3_TO_XYZ_D65, lin);
                let rgb = mul3(&XYZ_D65_TO_LIN_SRGB, xyz);
                RGBA { r: rgb[0], g: rgb[1], b: rgb[2], a: c.a }
            }
            Color::Hsl(c) => {
                let (r, g, b) = hsl_to_srgb(c.h, c.s, c.l);
                RGBA {
                    r: srgb_decode(r),
                    g: srgb_decode(g),
                    b: srgb_decode(b),
                    a: c.alpha,
                }
            }
            Color::Oklch(c) => {
                let (a, b) = from_polar(c.c, c.h);
                let (r, g, bl) = oklab_to_linear(c.l, a, b);
                RGBA { r, g, b: bl, a: c.alpha }
            }
            Color::Oklab(c) => {
                let (r, g, b) = oklab_to_linear(c.l, c.a, c.b);
                RGBA { r, g, b, a: c.alpha }
            }
            Color::Lch(c) => {
                let (a, b) = from_polar(c.c, c.h);
                let (r, g, bl) = lab_to_linear(c.l, a, b);
                RGBA { r, g, b: bl, a: c.alpha }
            }
            Color::Lab(c) => {
                let (r, g, b) = lab_to_linear(c.l, c.a, c.b);
                RGBA { r, g, b, a: c.alpha }
            }
        }
    }

    fn from_linear_rgba(lin: RGBA<f64>, space: Space) -> Color {
        match space {
            Space::LinearSrgb => Color::LinearSrgb(lin),
            Space::Srgb => Color::Srgb(RGBA {
                r: srgb_encode(lin.r),
                g: srgb_encode(lin.g),
                b: srgb_encode(lin.b),
                a: lin.a,
            }),
            Space::DisplayP3 => {
                let xyz = mul3(&LIN_SRGB_TO_XYZ_D65, [lin.r, lin.g, lin.b]);
                let p3 = mul3(&XYZ_D65_TO_LIN_P3, xyz);
                Color::DisplayP3(RGBA {
                    r: srgb_encode(p3[0]),
                    g: srgb_encode(p3[1]),
                    b: srgb_encode(p3[2]),
                    a: lin.a,
                })
            }
            Space::Hsl => {
                let (h, s, l) =
                    hsl_from_srgb(srgb_encode(lin.r), srgb_encode(lin.g), srgb_encode(lin.b));
                Color::Hsl(Hsl { h, s, l, alpha: lin.a })
            }
            Space::Oklab => {
                let (l, a, b) = linear_to_oklab(lin.r, lin.g, lin.b);
                Color::Oklab(Oklab { l, a, b, alpha: lin.a })
            }
            Space::Oklch => {
                let (l, a, b) = linear_to_oklab(lin.r, lin.g, lin.b);
                let (c, h) = to_polar(a, b);
                Color::Oklch(Oklch { l, c, h, alpha: lin.a })
            }
            Space::Lab => {
                let (l, a, b) = lab_from_linear(lin.r, lin.g, lin.b);
                Color::Lab(Lab { l, a, b, alpha: lin.a })
            }
            Space::Lch => {
                let (l, a, b) = lab_from_linear(lin.r, lin.g, lin.b);
                let (c, h) = to_polar(a, b);
                Color::Lch(Lch { l, c, h, alpha: lin.a })
            }
        }
    }

    /// Convert to another color space.
    ///
    /// Returns `None` when the conversion is undefined for the input
    /// (non-finite channels).  An undefined hue is not an error: it computes
    /// as 0° and the result of a conversion back into a cylindrical space
    /// reports `h: None` again, so callers can still detect achromatic
    /// colors instead of mistaking them for reds.
    pub fn to(&self, space: Space) -> Option<Color> {
        if !self.is_finite() {
            return None;
        }
        if self.space() == space {
            return Some(*self);
        }
        Some(Color::from_linear_rgba(self.to_linear_rgba(), space))
    }

    /// This color's OKLCH channels, or `None` for non-finite input.
    pub fn oklch(&self) -> Option<Oklch> {
        match self.to(Space::Oklch)? {
            Color::Oklch(c) => Some(c),
            _ => None,
        }
    }

    /// sRGB with channels forced into \[0, 1\].
    ///
    /// Out-of-gamut colors degrade to their nearest representable sRGB
    /// approximation rather than failing; only non-finite channels yield
    /// `None`.
    pub fn clamp_to_displayable(&self) -> Option<Color> {
        match self.to(Space::Srgb)? {
            Color::Srgb(c) => Some(Color::Srgb(RGBA {
                r: c.r.clamp(0., 1.),
                g: c.g.clamp(0., 1.),
                b: c.b.clamp(0., 1.),
                a: c.a.clamp(0., 1.),
            })),
            _ => None,
        }
    }

    /// Quantized 8-bit sRGB after gamut clamping.
    pub fn to_rgb8(&self) -> Option<RGB8> {
        match self.clamp_to_displayable()? {
            Color::Srgb(c) => Some(RGB8 {
                r: (c.r * 255. + 0.5).floor() as u8,
                g: (c.g * 255. + 0.5).floor() as u8,
                b: (c.b * 255. + 0.5).floor() as u8,
            }),
            _ => None,
        }
    }
}

impl From<RGB8> for Color {
    fn from(c: RGB8) -> Color {
        Color::Srgb(RGBA {
            r: c.r as f64 / 255.,
            g: c.g as f64 / 255.,
            b: c.b as f64 / 255.,
            a: 1.,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn srgb(r: f64, g: f64, b: f64) -> Color {
        Color::Srgb(RGBA { r, g, b, a: 1. })
    }

    #[test]
    fn transfer_round_trip() {
        for i in 0..=20 {
            let v = i as f64 / 20.;
            assert!((srgb_encode(srgb_decode(v)) - v).abs() < 1e-12, "{v}");
        }
    }

    #[test]
    fn oklab_of_white_and_black() {
        let (l, a, b) = linear_to_oklab(1., 1., 1.);
        assert!((l - 1.).abs() < 1e-3 && a.abs() < 1e-3 && b.abs() < 1e-3);
        let (l, a, b) = linear_to_oklab(0., 0., 0.);
        assert!(l.abs() < 1e-6 && a.abs() < 1e-6 && b.abs() < 1e-6);
    }

    #[test]
    fn oklab_round_trip() {
        for (r, g, b) in [(1., 0., 0.), (0., 1., 0.), (0., 0., 1.), (0.5, 0.5, 0.5)] {
            let (l, a, ob) = linear_to_oklab(r, g, b);
            let (r2, g2, b2) = oklab_to_linear(l, a, ob);
            assert!((r - r2).abs() < 1e-6);
            assert!((g - g2).abs() < 1e-6);
            assert!((b - b2).abs() < 1e-6);
        }
    }

    #[test]
    fn lab_of_white_is_100() {
        let (l, a, b) = lab_from_linear(1., 1., 1.);
        assert!((l - 100.).abs() < 1e-3, "L = {l}");
        assert!(a.abs() < 1e-2 && b.abs() < 1e-2);
    }

    #[test]
    fn gray_has_no_hue() {
        let ok = srgb(0.5, 0.5, 0.5).oklch().unwrap();
        assert_eq!(ok.h, None);
        assert!(ok.c < 1e-6);
        match srgb(0.5, 0.5, 0.5).to(Space::Hsl).unwrap() {
            Color::Hsl(c) => assert_eq!(c.h, None),
            _ => unreachable!(),
        }
    }

    #[test]
    fn hue_is_preserved_through_oklch() {
        let ok = srgb(1., 0., 0.).oklch().unwrap();
        let h = ok.h.expect("red has a hue");
        assert!((0. ..360.).contains(&h));
        let back = Color::Oklch(ok).to_rgb8().unwrap();
        assert_eq!(back, RGB8 { r: 255, g: 0, b: 0 });
    }

    #[test]
    fn p3_round_trip() {
        let c = srgb(0.2, 0.6, 0.4);
        let p3 = c.to(Space::DisplayP3).unwrap();
        let back = match p3.to(Space::Srgb).unwrap() {
            Color::Srgb(c) => c,
            _ => unreachable!(),
        };
        assert!((back.r - 0.2).abs() < 1e-9);
        assert!((back.g - 0.6).abs() < 1e-9);
        assert!((back.b - 0.4).abs() < 1e-9);
    }

    #[test]
    fn non_finite_conversion_is_none() {
        let c = srgb(f64::NAN, 0., 0.);
        assert_eq!(c.to(Space::Oklch), None);
        assert_eq!(c.to_rgb8(), None);
    }

    #[test]
    fn out_of_gamut_is_clamped() {
        // OKLCH green at high chroma falls outside sRGB.
        let c = Color::Oklch(Oklch { l: 0.9, c: 0.37, h: Some(145.), alpha: 1. });
        let clamped = match c.clamp_to_displayable().unwrap() {
            Color::Srgb(c) => c,
            _ => unreachable!(),
        };
        for v in [clamped.r, clamped.g, clamped.b] {
            assert!((0. ..=1.).contains(&v));
        }
    }
}
