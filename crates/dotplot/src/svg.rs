use crate::scatter::{Axis, Dot, Legend, Marker, RefLine, ScatterPlot};
use std::fmt::Write as FmtWrite;

const FRAME_WIDTH: f64 = 800.0;
const FRAME_HEIGHT: f64 = 320.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 56.0;
const MARGIN_BOTTOM: f64 = 56.0;
const LEGEND_HEIGHT: f64 = 36.0;
const DOT_RADIUS: f64 = 2.5;
const FONT: &str = r#"font-family="sans-serif""#;

pub fn generate_string(plot: &ScatterPlot) -> String {
    let mut generator = Generator::new(&plot.x_axis, &plot.y_axis);
    generator.generate(plot);
    generator.buf
}

struct Generator {
    x_range: (f64, f64),
    y_range: (f64, f64),
    buf: String,
}

impl Generator {
    fn new(x_axis: &Axis, y_axis: &Axis) -> Self {
        Self {
            x_range: (x_axis.min, x_axis.span()),
            y_range: (y_axis.min, y_axis.span()),
            buf: String::new(),
        }
    }

    fn generate(&mut self, plot: &ScatterPlot) {
        let width = MARGIN_LEFT + FRAME_WIDTH + MARGIN_RIGHT;
        let height = MARGIN_TOP + FRAME_HEIGHT + MARGIN_BOTTOM + LEGEND_HEIGHT;
        self.start_svg(width, height);
        self.add_background();
        self.add_title(&plot.title, width);
        self.plot_frame();
        self.plot_x_axis(&plot.x_axis);
        self.plot_y_axis(&plot.y_axis);

        for line in &plot.ref_lines {
            self.plot_ref_line(line);
        }
        for dot in &plot.dots {
            self.plot_dot(dot);
        }
        for marker in &plot.markers {
            self.plot_marker(marker);
        }

        self.plot_legend(&plot.legend);
        self.end_svg();
    }

    fn plot_frame(&mut self) {
        let style = r##"stroke="#000000" stroke-width="1" fill="transparent""##;
        self.push(format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" {} />",
            MARGIN_LEFT, MARGIN_TOP, FRAME_WIDTH, FRAME_HEIGHT, style
        ));
    }

    fn plot_x_axis(&mut self, axis: &Axis) {
        let y = MARGIN_TOP + FRAME_HEIGHT;
        for value in axis.tick_values() {
            let x = self.to_x(value);
            self.add_line((x, y), (x, y + 5.0), "#000000", 1.0, false);
            let label = format!("{:.*}", axis.precision, value);
            self.add_text((x, y + 18.0), &label, 12, "middle");
        }
        let center = MARGIN_LEFT + FRAME_WIDTH / 2.0;
        self.add_text((center, y + 40.0), &axis.label, 14, "middle");
    }

    fn plot_y_axis(&mut self, axis: &Axis) {
        let x = MARGIN_LEFT;
        for value in axis.tick_values() {
            let y = self.to_y(value);
            self.add_line((x - 5.0, y), (x, y), "#000000", 1.0, false);
            let label = format!("{:.*}", axis.precision, value);
            self.add_text((x - 8.0, y + 4.0), &label, 12, "end");
        }
        let center_y = MARGIN_TOP + FRAME_HEIGHT / 2.0;
        let label_x = 20.0;
        self.push(format!(
            "<text x=\"{}\" y=\"{}\" {} font-size=\"14px\" text-anchor=\"middle\" transform=\"rotate(-90 {} {})\">{}</text>",
            label_x,
            center_y,
            FONT,
            label_x,
            center_y,
            escape(&axis.label)
        ));
    }

    fn plot_ref_line(&mut self, line: &RefLine) {
        let y = self.to_y(line.y);
        let start = (MARGIN_LEFT, y);
        let end = (MARGIN_LEFT + FRAME_WIDTH, y);
        self.add_line(start, end, &line.color, 1.5, false);
    }

    fn plot_dot(&mut self, dot: &Dot) {
        let cx = self.to_x(dot.x);
        let cy = self.to_y(dot.y);
        self.push(format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" opacity=\"0.85\" />",
            cx, cy, DOT_RADIUS, dot.color
        ));
    }

    fn plot_marker(&mut self, marker: &Marker) {
        let x = self.to_x(marker.x);
        let top = MARGIN_TOP;
        let bottom = MARGIN_TOP + FRAME_HEIGHT;
        self.add_line((x, top), (x, bottom), &marker.color, 1.0, true);
        self.add_text((x, top - 6.0), &marker.label, 14, "middle");
    }

    fn plot_legend(&mut self, legend: &Legend) {
        if legend.labels.is_empty() {
            return;
        }
        let base_y = MARGIN_TOP + FRAME_HEIGHT + MARGIN_BOTTOM;
        let mut x = MARGIN_LEFT;
        if !legend.title.is_empty() {
            self.add_text((x, base_y + 12.0), &legend.title, 12, "start");
            x += 8.0 * legend.title.len() as f64 + 12.0;
        }
        let size = 12.0;
        for (label, color) in &legend.labels {
            self.push(format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" />",
                x, base_y, size, size, color
            ));
            x += size + 4.0;
            self.add_text((x, base_y + size - 1.0), label, 12, "start");
            x += 7.0 * label.len() as f64 + 16.0;
        }
    }

    fn add_title(&mut self, title: &str, width: f64) {
        self.push(format!(
            "<text x=\"{}\" y=\"{}\" {} font-size=\"16px\" font-weight=\"bold\" text-anchor=\"middle\">{}</text>",
            width / 2.0,
            22.0,
            FONT,
            escape(title)
        ));
    }

    fn add_line(
        &mut self,
        start: (f64, f64),
        end: (f64, f64),
        color: &str,
        stroke: f64,
        dashed: bool,
    ) {
        let dash = if dashed {
            r#" stroke-dasharray="4 3""#
        } else {
            ""
        };
        self.push(format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\"{} />",
            start.0, start.1, end.0, end.1, color, stroke, dash
        ));
    }

    fn add_text(&mut self, pos: (f64, f64), text: &str, size: u32, anchor: &str) {
        self.push(format!(
            "<text x=\"{}\" y=\"{}\" {} font-size=\"{}px\" text-anchor=\"{}\">{}</text>",
            pos.0,
            pos.1,
            FONT,
            size,
            anchor,
            escape(text)
        ));
    }

    fn start_svg(&mut self, width: f64, height: f64) {
        self.push(r#"<?xml version="1.0"?>"#.to_string());
        self.push(format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{}" height="{}">"#,
            width, height
        ));
    }

    fn end_svg(&mut self) {
        self.push("</svg>".to_string());
    }

    fn add_background(&mut self) {
        self.push(r#"<rect width="100%" height="100%" fill="white"/>"#.to_string());
    }

    fn push(&mut self, line: String) {
        // Writing into a String cannot fail
        let _ = writeln!(self.buf, "{}", line);
    }

    /// Values outside the axis range are pinned to the frame edge
    fn to_x(&self, x: f64) -> f64 {
        let (min, span) = self.x_range;
        let frac = ((x - min) / span).clamp(0.0, 1.0);
        MARGIN_LEFT + frac * FRAME_WIDTH
    }

    fn to_y(&self, y: f64) -> f64 {
        let (min, span) = self.y_range;
        let frac = ((y - min) / span).clamp(0.0, 1.0);
        MARGIN_TOP + (1.0 - frac) * FRAME_HEIGHT
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
