pub type Color = String;

#[derive(Debug, Clone, PartialEq)]
pub struct Dot {
    pub x: f64,
    pub y: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub ticks: usize,
    /// Decimal places used for tick labels
    pub precision: usize,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            label: label.into(),
            min,
            max,
            ticks: 5,
            precision: 0,
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_ticks(mut self, ticks: usize) -> Self {
        self.ticks = ticks;
        self
    }

    /// Width of the axis range; degenerate ranges are widened to 1.0
    pub fn span(&self) -> f64 {
        let span = self.max - self.min;
        if span > 0.0 {
            span
        } else {
            1.0
        }
    }

    pub fn tick_values(&self) -> Vec<f64> {
        match self.ticks {
            0 => Vec::new(),
            1 => vec![self.min],
            n => {
                let step = self.span() / (n - 1) as f64;
                (0..n).map(|i| self.min + step * i as f64).collect()
            }
        }
    }
}

/// Horizontal line drawn across the frame at a data-space y value
#[derive(Debug, Clone, PartialEq)]
pub struct RefLine {
    pub y: f64,
    pub color: Color,
}

/// Vertical dashed line at a data-space x value, labelled above the frame
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub x: f64,
    pub label: String,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub title: String,
    pub labels: Vec<(String, Color)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPlot {
    pub title: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub dots: Vec<Dot>,
    pub ref_lines: Vec<RefLine>,
    pub markers: Vec<Marker>,
    pub legend: Legend,
}
