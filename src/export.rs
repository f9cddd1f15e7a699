//! Serialization of palettes into stylesheet and asset formats.
//!
//! Pure string building over [`Palette`] data: CSS custom properties,
//! SCSS/LESS maps, JSON, an SVG swatch sheet, and Tailwind theme blocks at
//! two syntax versions.  Swatch values pass through [`reformat`] so every
//! exporter honors the caller's [`ColorFormat`].

use std::fmt::Write;

use crate::format;
use crate::parse::parse;
use crate::scale::Palette;
use crate::Space;

/// Output representation for exported swatches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorFormat {
    Hex,
    Rgb,
    Hsl,
    Oklch,
}

/// Re-render a color string in the requested format.
///
/// Unparseable input is echoed back unchanged; an exporter is not the
/// place to report what the palette editor already validated.
pub fn reformat(color: &str, fmt: ColorFormat) -> String {
    let Ok(parsed) = parse(color) else {
        return color.to_string();
    };
    let rendered = match fmt {
        ColorFormat::Hex => format::hex(&parsed),
        ColorFormat::Rgb => format::format(&parsed, Space::Srgb),
        ColorFormat::Hsl => format::format(&parsed, Space::Hsl),
        ColorFormat::Oklch => format::format(&parsed, Space::Oklch),
    };
    rendered.unwrap_or_else(|| color.to_string())
}

/// Tailwind configuration syntax generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TailwindVersion {
    /// `tailwind.config.js` extend-colors block.
    V3,
    /// CSS-first `@theme` block.
    V4,
}

/// A `:root` block of CSS custom properties, one per swatch.
pub fn css_variables(
    palette: &Palette,
    fmt: ColorFormat,
    primary_name: &str,
    gray_name: &str,
) -> String {
    let mut out = String::from(":root {\n");
    for (name, scale) in [(primary_name, &palette.primary), (gray_name, &palette.gray)] {
        for (step, _) in scale.iter() {
            let _ = writeln!(
                out,
                "  --{name}-{}: {};",
                step.key(),
                reformat(&scale.hex(step), fmt)
            );
        }
    }
    out.push('}');
    out
}

/// SCSS/LESS map declarations (`map-get` style usage).
pub fn scss_map(palette: &Palette, fmt: ColorFormat) -> String {
    let mut out = String::new();
    for (name, scale) in [("primary", &palette.primary), ("gray", &palette.gray)] {
        let _ = writeln!(out, "${name}: (");
        for (step, _) in scale.iter() {
            let _ = writeln!(out, "  {}: '{}',", step.key(), reformat(&scale.hex(step), fmt));
        }
        out.push_str(");\n\n");
    }
    out.push_str("// Usage: color: map-get($primary, 500);");
    out
}

/// The palette as pretty-printed JSON with numeric string keys.
pub fn json(palette: &Palette) -> String {
    // Serialization of plain value types cannot fail.
    serde_json::to_string_pretty(palette).unwrap_or_default()
}

const SWATCH_SIZE: u32 = 60;
const SWATCH_GAP: u32 = 10;
const ROW_HEIGHT: u32 = SWATCH_SIZE + 40;

/// An SVG sheet of labelled swatches, one row per scale.
pub fn svg_sheet(palette: &Palette) -> String {
    let groups = [("primary", &palette.primary), ("gray", &palette.gray)];
    let columns = crate::scale::Step::ALL.len() as u32;
    let width = (SWATCH_SIZE + SWATCH_GAP) * columns + SWATCH_GAP;
    let height = ROW_HEIGHT * groups.len() as u32 + SWATCH_GAP;

    let mut rects = String::new();
    for (row, (name, scale)) in groups.iter().enumerate() {
        let y = SWATCH_GAP + row as u32 * ROW_HEIGHT;
        for (col, (step, _)) in scale.iter().enumerate() {
            let x = SWATCH_GAP + col as u32 * (SWATCH_SIZE + SWATCH_GAP);
            let _ = write!(
                rects,
                "  <g>\n    <rect x=\"{x}\" y=\"{y}\" width=\"{SWATCH_SIZE}\" \
                 height=\"{SWATCH_SIZE}\" fill=\"{}\" rx=\"6\"/>\n    \
                 <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"10\" \
                 fill=\"#333\">{name}.{}</text>\n  </g>\n",
                scale.hex(step),
                x + SWATCH_SIZE / 2,
                y + SWATCH_SIZE + 14,
                step.key(),
            );
        }
    }

    format!(
        "<svg width=\"{width}\" height=\"{height}\" \
         xmlns=\"http://www.w3.org/2000/svg\" style=\"font-family: sans-serif;\">\n\
         {rects}</svg>"
    )
}

/// Tailwind theme text for the palette, in the requested color format.
pub fn tailwind_theme(
    palette: &Palette,
    version: TailwindVersion,
    fmt: ColorFormat,
    primary_name: &str,
    gray_name: &str,
) -> String {
    match version {
        TailwindVersion::V3 => {
            let scale_block = |scale: &crate::scale::ColorScale| {
                let mut out = String::new();
                for (step, _) in scale.iter() {
                    let _ = writeln!(
                        out,
                        "          {}: '{}',",
                        step.key(),
                        reformat(&scale.hex(step), fmt)
                    );
                }
                out
            };
            let mut out = String::from(
                "// tailwind.config.js\nmodule.exports = {\n  theme: {\n    extend: {\n      colors: {\n        primary: {\n",
            );
            out.push_str(&scale_block(&palette.primary));
            out.push_str("        },\n        gray: {\n");
            out.push_str(&scale_block(&palette.gray));
            out.push_str("        },\n      },\n    },\n  },\n};");
            out
        }
        TailwindVersion::V4 => {
            let mut out = String::from("@theme {\n");
            for (name, scale) in [(primary_name, &palette.primary), (gray_name, &palette.gray)] {
                for (step, _) in scale.iter() {
                    let _ = writeln!(
                        out,
                        "  --color-{name}-{}: {};",
                        step.key(),
                        reformat(&scale.hex(step), fmt)
                    );
                }
            }
            out.push_str("}\n");
            let _ = write!(out, "/* Use: var(--color-{primary_name}-500) */");
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::Step;

    fn palette() -> Palette {
        Palette::from_hue(250.)
    }

    #[test]
    fn reformat_translates_between_formats() {
        assert_eq!(reformat("#ff0000", ColorFormat::Rgb), "rgb(255, 0, 0)");
        assert_eq!(reformat("rgb(255, 0, 0)", ColorFormat::Hex), "#ff0000");
        assert!(reformat("#ff0000", ColorFormat::Oklch).starts_with("oklch("));
        assert!(reformat("#ff0000", ColorFormat::Hsl).starts_with("hsl("));
        // Unparseable input passes through untouched.
        assert_eq!(reformat("banana", ColorFormat::Rgb), "banana");
    }

    #[test]
    fn css_variables_lists_every_step_once() {
        let css = css_variables(&palette(), ColorFormat::Hex, "indigo", "slate");
        assert!(css.starts_with(":root {"));
        assert!(css.ends_with('}'));
        for step in Step::ALL {
            assert_eq!(
                css.matches(&format!("--indigo-{}:", step.key())).count(),
                1
            );
            assert_eq!(css.matches(&format!("--slate-{}:", step.key())).count(), 1);
        }
        let css = css_variables(&palette(), ColorFormat::Oklch, "indigo", "slate");
        assert!(css.contains("--indigo-500: oklch("));
    }

    #[test]
    fn scss_map_has_both_scales_and_usage_hint() {
        let scss = scss_map(&palette(), ColorFormat::Hex);
        assert!(scss.contains("$primary: ("));
        assert!(scss.contains("$gray: ("));
        assert!(scss.contains("500: '#"));
        assert!(scss.ends_with("map-get($primary, 500);"));
    }

    #[test]
    fn json_round_trips_through_serde() {
        let p = palette();
        let value: serde_json::Value = serde_json::from_str(&json(&p)).unwrap();
        assert_eq!(
            value["primary"]["50"].as_str().unwrap(),
            p.primary.hex(Step::S50)
        );
        assert_eq!(value["gray"].as_object().unwrap().len(), 11);
    }

    #[test]
    fn svg_sheet_has_a_rect_per_swatch() {
        let svg = svg_sheet(&palette());
        assert!(svg.starts_with("<svg "));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<rect ").count(), 22);
        assert!(svg.contains("primary.500"));
        assert!(svg.contains("gray.950"));
    }

    #[test]
    fn tailwind_v3_is_a_config_module() {
        let p = palette();
        let out = tailwind_theme(&p, TailwindVersion::V3, ColorFormat::Hex, "primary", "gray");
        assert!(out.starts_with("// tailwind.config.js"));
        assert!(out.contains("module.exports"));
        assert!(out.contains(&format!("500: '{}'", p.primary.hex(Step::S500))));
    }

    #[test]
    fn tailwind_v4_is_a_theme_block() {
        let p = palette();
        let out = tailwind_theme(&p, TailwindVersion::V4, ColorFormat::Oklch, "indigo", "slate");
        assert!(out.starts_with("@theme {"));
        assert!(out.contains("--color-indigo-500: oklch("));
        assert!(out.contains("--color-slate-950: oklch("));
        assert!(out.ends_with("/* Use: var(--color-indigo-500) */"));
    }
}
