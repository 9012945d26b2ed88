pub mod plot;
pub mod score;
