use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use tracing::warn;

use crate::core::FontSpec;
use crate::error::{AxisLabelError, AxisLabelResult};
use crate::render::CanvasSurface;

type Rgba = (f64, f64, f64, f64);

const BLACK: Rgba = (0.0, 0.0, 0.0, 1.0);

/// Cairo + Pango drawing surface for canvas-rendered labels.
///
/// Transform and source colour live on the Cairo context; the label font is
/// tracked alongside so `save`/`restore` cover it as well.
#[derive(Debug)]
pub struct CairoCanvas {
    surface: ImageSurface,
    context: Context,
    font: FontSpec,
    fill: Rgba,
    stack: Vec<(FontSpec, Rgba)>,
}

impl CairoCanvas {
    pub fn new(width: i32, height: i32) -> AxisLabelResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(AxisLabelError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        Ok(Self {
            surface,
            context,
            font: FontSpec::new(10.0, "sans-serif"),
            fill: BLACK,
            stack: Vec::new(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    fn layout(&self, text: &str) -> pango::Layout {
        let layout = pangocairo::functions::create_layout(&self.context);
        let mut description = FontDescription::new();
        description.set_family(&self.font.family);
        description.set_absolute_size(self.font.size_px * f64::from(pango::SCALE));
        layout.set_font_description(Some(&description));
        layout.set_text(text);
        layout
    }
}

impl CanvasSurface for CairoCanvas {
    fn save(&mut self) {
        if let Err(err) = self.context.save() {
            warn!(error = %err, "cairo save failed");
        }
        self.stack.push((self.font.clone(), self.fill));
    }

    fn restore(&mut self) {
        if let Err(err) = self.context.restore() {
            warn!(error = %err, "cairo restore failed");
        }
        if let Some((font, fill)) = self.stack.pop() {
            self.font = font;
            self.fill = fill;
        }
    }

    fn set_font(&mut self, font: &FontSpec) {
        self.font = font.clone();
    }

    fn set_fill_color(&mut self, color: &str) {
        self.fill = parse_css_colour(color).unwrap_or_else(|| {
            warn!(color, "unsupported label colour; drawing in black");
            BLACK
        });
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        let (width, _height) = self.layout(text).pixel_size();
        f64::from(width)
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.context.translate(x, y);
    }

    fn rotate(&mut self, radians: f64) {
        self.context.rotate(radians);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> AxisLabelResult<()> {
        let layout = self.layout(text);
        // Canvas text is anchored on its alphabetic baseline, Pango on its top.
        let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);
        let (red, green, blue, alpha) = self.fill;
        self.context.set_source_rgba(red, green, blue, alpha);
        self.context.move_to(x, y - baseline);
        pangocairo::functions::show_layout(&self.context, &layout);
        self.context
            .status()
            .map_err(|err| map_backend_error("failed to draw label text", err))
    }

    fn clear(&mut self) {
        if let Err(err) = self.context.save() {
            warn!(error = %err, "cairo save failed");
            return;
        }
        self.context.set_operator(cairo::Operator::Clear);
        if let Err(err) = self.context.paint() {
            warn!(error = %err, "cairo clear failed");
        }
        if let Err(err) = self.context.restore() {
            warn!(error = %err, "cairo restore failed");
        }
    }
}

/// Parses `#rgb`, `#rrggbb` and a handful of named colours.
fn parse_css_colour(color: &str) -> Option<Rgba> {
    let color = color.trim().to_ascii_lowercase();
    if let Some(hex) = color.strip_prefix('#').filter(|hex| hex.is_ascii()) {
        let channel = |digits: &str| u8::from_str_radix(digits, 16).ok().map(|v| f64::from(v) / 255.0);
        return match hex.len() {
            3 => {
                let mut channels = hex.chars().map(|digit| channel(&format!("{digit}{digit}")));
                Some((channels.next()??, channels.next()??, channels.next()??, 1.0))
            }
            6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?, 1.0)),
            _ => None,
        };
    }
    match color.as_str() {
        "black" => Some(BLACK),
        "white" => Some((1.0, 1.0, 1.0, 1.0)),
        "red" => Some((1.0, 0.0, 0.0, 1.0)),
        "green" => Some((0.0, 128.0 / 255.0, 0.0, 1.0)),
        "blue" => Some((0.0, 0.0, 1.0, 1.0)),
        "gray" | "grey" => Some((128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0, 1.0)),
        "transparent" => Some((0.0, 0.0, 0.0, 0.0)),
        _ => None,
    }
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> AxisLabelError {
    AxisLabelError::Backend(format!("{prefix}: {err}"))
}
