pub mod color;
pub mod panels;

pub use panels::{plot_baf, plot_lrr};
