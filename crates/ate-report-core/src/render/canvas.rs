use crate::render::color::Color;
use crate::render::primitives::*;

const FONT_FAMILY: &str = "DejaVu Sans, Arial, Helvetica, sans-serif";

#[derive(Debug, Clone)]
enum SvgElement {
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        style: Style,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        style: LineStyle,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        style: Style,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        style: TextStyle,
        rotate: Option<f64>,
    },
}

/// Immediate-mode SVG canvas. Coordinates are in points (1pt = 1/72").
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    elements: Vec<SvgElement>,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
        }
    }

    /// Canvas for a figure measured in inches.
    pub fn from_inches(width_in: f64, height_in: f64) -> Self {
        Self::new(width_in * 72.0, height_in * 72.0)
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: &Style) {
        self.elements.push(SvgElement::Rect { x, y, w, h, style: style.clone() });
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: &LineStyle) {
        self.elements.push(SvgElement::Line { x1, y1, x2, y2, style: style.clone() });
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, style: &Style) {
        self.elements.push(SvgElement::Circle { cx, cy, r, style: style.clone() });
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, style: &TextStyle) {
        self.elements.push(SvgElement::Text {
            x,
            y,
            content: content.to_string(),
            style: style.clone(),
            rotate: None,
        });
    }

    /// Text rotated by `angle` degrees (clockwise, SVG convention) around its anchor.
    pub fn text_rotated(&mut self, x: f64, y: f64, content: &str, style: &TextStyle, angle: f64) {
        self.elements.push(SvgElement::Text {
            x,
            y,
            content: content.to_string(),
            style: style.clone(),
            rotate: Some(angle),
        });
    }

    /// Vertical error bar from `y_lo` to `y_hi` with horizontal caps.
    pub fn error_bar(&mut self, x: f64, y_lo: f64, y_hi: f64, cap_width: f64, style: &LineStyle) {
        self.line(x, y_lo, x, y_hi, style);
        if cap_width > 0.0 {
            let half = cap_width / 2.0;
            self.line(x - half, y_lo, x + half, y_lo, style);
            self.line(x - half, y_hi, x + half, y_hi, style);
        }
    }

    pub fn frame(&mut self, x: f64, y: f64, w: f64, h: f64, style: &LineStyle) {
        self.line(x, y, x + w, y, style);
        self.line(x, y + h, x + w, y + h, style);
        self.line(x, y, x, y + h, style);
        self.line(x + w, y, x + w, y + h, style);
    }

    pub fn measure_text(&self, content: &str, style: &TextStyle) -> f64 {
        estimate_text_width(content, style.size)
    }

    pub fn finish_svg(&self) -> String {
        let mut out = String::with_capacity(16 * 1024);
        out.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            w = self.width,
            h = self.height,
        ));
        out.push_str(&format!(
            "<rect width=\"{}\" height=\"{}\" fill=\"{}\" />\n",
            self.width,
            self.height,
            Color::WHITE
        ));
        for elem in &self.elements {
            render_element(&mut out, elem);
        }
        out.push_str("</svg>\n");
        out
    }
}

fn render_element(out: &mut String, elem: &SvgElement) {
    match elem {
        SvgElement::Rect { x, y, w, h, style } => {
            out.push_str(&format!(
                "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{w:.2}\" height=\"{h:.2}\""
            ));
            write_style_attrs(out, style);
            out.push_str(" />\n");
        }
        SvgElement::Line { x1, y1, x2, y2, style } => {
            out.push_str(&format!(
                "<line x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" stroke=\"{}\" stroke-width=\"{:.2}\" />\n",
                style.color, style.width
            ));
        }
        SvgElement::Circle { cx, cy, r, style } => {
            out.push_str(&format!("<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{r:.2}\""));
            write_style_attrs(out, style);
            out.push_str(" />\n");
        }
        SvgElement::Text { x, y, content, style, rotate } => {
            out.push_str(&format!(
                "<text x=\"{x:.2}\" y=\"{y:.2}\" font-family=\"{FONT_FAMILY}\" font-size=\"{:.1}\" fill=\"{}\" text-anchor=\"{}\" dominant-baseline=\"{}\"",
                style.size,
                style.color,
                style.anchor.as_str(),
                style.baseline.as_str(),
            ));
            if let Some(angle) = rotate {
                out.push_str(&format!(" transform=\"rotate({angle:.1},{x:.2},{y:.2})\""));
            }
            out.push('>');
            push_escaped(out, content);
            out.push_str("</text>\n");
        }
    }
}

fn write_style_attrs(out: &mut String, style: &Style) {
    match &style.fill {
        Some(fill) => out.push_str(&format!(" fill=\"{fill}\"")),
        None => out.push_str(" fill=\"none\""),
    }
    if let Some(stroke) = &style.stroke {
        out.push_str(&format!(
            " stroke=\"{stroke}\" stroke-width=\"{:.2}\"",
            style.stroke_width
        ));
    }
}

fn push_escaped(out: &mut String, content: &str) {
    for ch in content.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_canvas() {
        let svg = Canvas::new(100.0, 50.0).finish_svg();
        assert!(svg.contains("width=\"100\""));
        assert!(svg.contains("height=\"50\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn rect_rendering() {
        let mut c = Canvas::new(200.0, 100.0);
        c.rect(10.0, 20.0, 50.0, 30.0, &Style::filled(Color::hex("#ff0000")));
        let svg = c.finish_svg();
        assert!(svg.contains(r##"fill="#ff0000""##));
        assert!(svg.contains("width=\"50.00\""));
    }

    #[test]
    fn text_is_escaped() {
        let mut c = Canvas::new(200.0, 100.0);
        c.text(10.0, 20.0, "Drinker/Alcoholic & <Other>", &TextStyle::default());
        let svg = c.finish_svg();
        assert!(svg.contains("Drinker/Alcoholic &amp; &lt;Other&gt;"));
    }

    #[test]
    fn rotated_text_carries_transform() {
        let mut c = Canvas::new(200.0, 100.0);
        c.text_rotated(40.0, 80.0, "ACEDRINK HD", &TextStyle::default(), -60.0);
        assert!(c.finish_svg().contains("rotate(-60.0,40.00,80.00)"));
    }

    #[test]
    fn error_bar_draws_stem_and_caps() {
        let mut c = Canvas::new(100.0, 100.0);
        c.error_bar(50.0, 80.0, 20.0, 10.0, &LineStyle::solid(Color::BLACK, 1.0));
        assert_eq!(c.finish_svg().matches("<line").count(), 3);
    }
}
