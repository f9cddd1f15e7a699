use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error};
use color_foundry::export::{self, ColorFormat, TailwindVersion};
use color_foundry::{contrast_ratio, harmonize, hex, preferred_text_color,
                    ColorScale, Palette, Rating, Scheme, Step};

type Err = Box<dyn Error>;

fn scale_row(fh: &mut impl Write, scale: &ColorScale, comment: &str)
             -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px; border-spacing: 0px\"><tr>")?;
    for (step, _) in scale.iter() {
        let bg = scale.color(step);
        let text = hex(&preferred_text_color(&bg)).unwrap_or_default();
        writeln!(fh, "  <td style=\"width: 60px; height: 40px; \
                      text-align: center; color: {text}; \
                      background-color: {}\">{}</td>",
                 scale.hex(step), step.key())?;
    }
    writeln!(fh, "<td style=\"padding-left: 7px\">{comment}</td>\
                  </tr></table><br/>")?;
    Ok(())
}

fn harmony_row(fh: &mut impl Write, base: &str, scheme: Scheme)
               -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px; border-spacing: 0px\"><tr>")?;
    for color in harmonize(base, scheme) {
        writeln!(fh, "  <td style=\"width: 120px; height: 40px; \
                      background-color: {color}\"></td>")?;
    }
    writeln!(fh, "<td style=\"padding-left: 7px\">{scheme:?}</td>\
                  </tr></table><br/>")?;
    Ok(())
}

fn main() -> Result<(), Err> {
    let mut fh = BufWriter::new(File::create("swatches.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>color-foundry: test {}</title>\n\
                  </head>\n\
                  <body>",
             env::args().next().unwrap())?;

    let palette = Palette::random();
    writeln!(fh, "<h3>Random palette</h3>")?;
    scale_row(&mut fh, &palette.primary, "primary")?;
    scale_row(&mut fh, &palette.gray, "gray")?;

    writeln!(fh, "<h3>Personalized around #432dd7</h3>")?;
    if let Some(scale) = ColorScale::personalize("#432dd7") {
        scale_row(&mut fh, &scale, "#432dd7 kept at its nearest step")?;
    }

    let base = palette.primary.hex(Step::S500);
    writeln!(fh, "<h3>Harmonies of {base}</h3>")?;
    for scheme in Scheme::ALL {
        harmony_row(&mut fh, &base, scheme)?;
    }

    writeln!(fh, "<h3>Contrast of primary 500 against its scale</h3><ul>")?;
    let c500 = palette.primary.color(Step::S500);
    for (step, _) in palette.primary.iter() {
        let ratio = contrast_ratio(&c500, &palette.primary.color(step));
        writeln!(fh, "  <li>500 on {}: {ratio:.2} ({})</li>",
                 step.key(), Rating::classify(ratio))?;
    }
    writeln!(fh, "</ul>")?;

    writeln!(fh, "<h3>Swatch sheet</h3>")?;
    writeln!(fh, "{}", export::svg_sheet(&palette))?;

    writeln!(fh, "<h3>Exports</h3>")?;
    for (title, text) in [
        ("CSS custom properties",
         export::css_variables(&palette, ColorFormat::Hex, "primary", "gray")),
        ("SCSS map", export::scss_map(&palette, ColorFormat::Hex)),
        ("JSON", export::json(&palette)),
        ("Tailwind v3",
         export::tailwind_theme(&palette, TailwindVersion::V3,
                                ColorFormat::Hex, "primary", "gray")),
        ("Tailwind v4",
         export::tailwind_theme(&palette, TailwindVersion::V4,
                                ColorFormat::Oklch, "primary", "gray")),
    ] {
        writeln!(fh, "<h4>{title}</h4>\n<pre>{text}</pre>")?;
    }

    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
