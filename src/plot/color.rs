use std::fmt;

/// LRR values at or beyond +/- this span take the end colors of the gradient
pub const LRR_COLOR_SPAN: f64 = 1.0;

#[derive(Debug, PartialEq, Clone)]
pub enum Color {
    Black,
    Gray,
    Grad(f64),
}

impl fmt::Display for Color {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::Black => write!(formatter, "#000000"),
            Color::Gray => write!(formatter, "#BABABA"),
            Color::Grad(value) => write!(formatter, "{}", get_gradient(*value)),
        }
    }
}

pub fn baf_color(b_allele_freq: f64) -> Color {
    Color::Grad(b_allele_freq.clamp(0.0, 1.0))
}

pub fn lrr_color(log_r_ratio: f64) -> Color {
    let scaled = (log_r_ratio + LRR_COLOR_SPAN) / (2.0 * LRR_COLOR_SPAN);
    Color::Grad(scaled.clamp(0.0, 1.0))
}

fn get_gradient(value: f64) -> String {
    let blue: (u8, u8, u8) = (0, 73, 255);
    let red: (u8, u8, u8) = (255, 0, 0);
    let mix = |from: u8, to: u8| (from as f64 * (1.0 - value) + to as f64 * value).round() as u8;

    format!(
        "#{:02X}{:02X}{:02X}",
        mix(blue.0, red.0),
        mix(blue.1, red.1),
        mix(blue.2, red.2)
    )
}
