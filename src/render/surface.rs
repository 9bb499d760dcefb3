use crate::core::{EstimatingTextMeasurer, FontSpec, TextMeasurer};
use crate::error::{AxisLabelError, AxisLabelResult};

/// 2D drawing surface shared by every canvas-rendered label.
///
/// Mirrors the state-stack model of a canvas 2D context: font, fill style and
/// transform are saved and restored together.
pub trait CanvasSurface {
    fn save(&mut self);
    fn restore(&mut self);
    fn set_font(&mut self, font: &FontSpec);
    fn set_fill_color(&mut self, color: &str);
    /// Width of `text` under the current font.
    fn measure_text(&mut self, text: &str) -> f64;
    fn translate(&mut self, x: f64, y: f64);
    fn rotate(&mut self, radians: f64);
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> AxisLabelResult<()>;
    /// Wipes drawn output at the start of a draw cycle.
    fn clear(&mut self);
}

impl TextMeasurer for dyn CanvasSurface + '_ {
    fn text_width(&mut self, text: &str, font: &FontSpec) -> f64 {
        self.set_font(font);
        self.measure_text(text)
    }
}

/// Affine transform `[a c e; b d f]` in canvas order.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Affine {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Affine {
    const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn translate(&mut self, x: f64, y: f64) {
        self.e += self.a * x + self.c * y;
        self.f += self.b * x + self.d * y;
    }

    fn rotate(&mut self, radians: f64) {
        let (sin, cos) = radians.sin_cos();
        let (a, b, c, d) = (self.a, self.b, self.c, self.d);
        self.a = a * cos + c * sin;
        self.b = b * cos + d * sin;
        self.c = c * cos - a * sin;
        self.d = d * cos - b * sin;
    }

    fn apply(self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    fn angle(self) -> f64 {
        self.b.atan2(self.a)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct DrawState {
    font: FontSpec,
    fill_color: String,
    transform: Affine,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            font: FontSpec::new(10.0, "sans-serif"),
            fill_color: "black".to_owned(),
            transform: Affine::IDENTITY,
        }
    }
}

/// One call recorded by [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasOp {
    Save,
    Restore,
    SetFont(String),
    SetFillColor(String),
    Translate { x: f64, y: f64 },
    Rotate { radians: f64 },
    FillText { text: String, x: f64, y: f64 },
}

/// Text resolved into surface space at fill time.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnText {
    pub text: String,
    /// Surface-space origin of the text baseline start.
    pub x: f64,
    pub y: f64,
    /// Effective rotation in radians.
    pub angle: f64,
    pub font: FontSpec,
    pub color: String,
}

/// Headless canvas that records calls and resolves drawn text positions.
///
/// Text is measured with [`EstimatingTextMeasurer`], so geometry is
/// deterministic across machines.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    state: DrawState,
    stack: Vec<DrawState>,
    ops: Vec<CanvasOp>,
    drawn: Vec<DrawnText>,
}

impl RecordingCanvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ops(&self) -> &[CanvasOp] {
        &self.ops
    }

    #[must_use]
    pub fn drawn_texts(&self) -> &[DrawnText] {
        &self.drawn
    }

    /// Number of unmatched `save` calls.
    #[must_use]
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }
}

impl CanvasSurface for RecordingCanvas {
    fn save(&mut self) {
        self.stack.push(self.state.clone());
        self.ops.push(CanvasOp::Save);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
        self.ops.push(CanvasOp::Restore);
    }

    fn set_font(&mut self, font: &FontSpec) {
        if self.state.font != *font {
            self.ops.push(CanvasOp::SetFont(font.css()));
            self.state.font = font.clone();
        }
    }

    fn set_fill_color(&mut self, color: &str) {
        self.ops.push(CanvasOp::SetFillColor(color.to_owned()));
        self.state.fill_color = color.to_owned();
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        EstimatingTextMeasurer::estimate(text, self.state.font.size_px)
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.ops.push(CanvasOp::Translate { x, y });
        self.state.transform.translate(x, y);
    }

    fn rotate(&mut self, radians: f64) {
        self.ops.push(CanvasOp::Rotate { radians });
        self.state.transform.rotate(radians);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> AxisLabelResult<()> {
        if !x.is_finite() || !y.is_finite() {
            return Err(AxisLabelError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        self.ops.push(CanvasOp::FillText {
            text: text.to_owned(),
            x,
            y,
        });
        let (origin_x, origin_y) = self.state.transform.apply(x, y);
        self.drawn.push(DrawnText {
            text: text.to_owned(),
            x: origin_x,
            y: origin_y,
            angle: self.state.transform.angle(),
            font: self.state.font.clone(),
            color: self.state.fill_color.clone(),
        });
        Ok(())
    }

    /// Forgets recorded output. Pending saves are kept.
    fn clear(&mut self) {
        self.ops.clear();
        self.drawn.clear();
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    use super::{CanvasSurface, RecordingCanvas};

    #[test]
    fn fill_text_resolves_translate_then_rotate() {
        let mut canvas = RecordingCanvas::new();
        canvas.save();
        canvas.translate(40.0, 120.0);
        canvas.rotate(-FRAC_PI_2);
        canvas.fill_text("y", 0.0, 0.0).expect("fill");
        canvas.fill_text("y", 10.0, 0.0).expect("fill");
        canvas.restore();

        let drawn = canvas.drawn_texts();
        assert_relative_eq!(drawn[0].x, 40.0);
        assert_relative_eq!(drawn[0].y, 120.0);
        assert_relative_eq!(drawn[0].angle, -FRAC_PI_2);
        // Ten pixels along the rotated baseline point up the screen.
        assert_relative_eq!(drawn[1].x, 40.0, epsilon = 1e-9);
        assert_relative_eq!(drawn[1].y, 110.0, epsilon = 1e-9);
        assert_eq!(canvas.save_depth(), 0);
    }

    #[test]
    fn restore_rewinds_transform() {
        let mut canvas = RecordingCanvas::new();
        canvas.save();
        canvas.translate(5.0, 5.0);
        canvas.restore();
        canvas.fill_text("x", 1.0, 2.0).expect("fill");
        let drawn = &canvas.drawn_texts()[0];
        assert_relative_eq!(drawn.x, 1.0);
        assert_relative_eq!(drawn.y, 2.0);
    }
}
