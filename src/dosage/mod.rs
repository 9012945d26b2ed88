//! Per-sample CNV dosage scoring.
//!
//! Observations of B-allele frequency and log R ratio for every sample in a
//! region are reduced to three dosage fractions per sample, and the sample
//! with the strongest signal is selected for plotting.

pub mod aggregate;
pub mod error;
pub mod observation;
pub mod output;
pub mod select;
pub mod summary;

pub use aggregate::{aggregate, aggregate_par, Thresholds};
pub use error::DosageError;
pub use observation::{
    cohort_code, load_observations, read_observations, restrict_to_region, Observation,
};
pub use select::{
    category_maxima, category_maximum, extract_sample_records, rank_samples, select_top_sample,
    DosageMaxima,
};
pub use summary::{Category, DosageScores, SampleSummary};
