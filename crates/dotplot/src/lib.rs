/*!
This crate renders simple annotated scatter plots. A plot is a set of colored
dots placed on a two-dimensional frame with labelled axes, optional horizontal
reference lines, vertical markers, and a color legend. Plots can be rendered
as SVG, PNG, and PDF images.

Scatter plots are useful for inspecting per-site array metrics, such as
B-allele frequency or log R ratio, across a genomic window.
*/

mod image;
mod render;
mod scatter;
mod svg;

pub use image::generate as generate_image;
pub use scatter::{Axis, Color, Dot, Legend, Marker, RefLine, ScatterPlot};
pub use svg::generate_string as generate_svg_string;
