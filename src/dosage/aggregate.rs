use crate::dosage::{
    summary::{DosageScores, SampleSummary},
    DosageError, Observation,
};
use crate::utils::{fraction, Result};
use rayon::{prelude::*, ThreadPoolBuilder};
use std::collections::HashMap;

/// Classification bounds. Every comparison is strict, so a value sitting
/// exactly on a bound is never flagged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub baf_lower_band: (f64, f64),
    pub baf_upper_band: (f64, f64),
    pub lrr_deletion: f64,
    pub lrr_insertion: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            baf_lower_band: (0.15, 0.35),
            baf_upper_band: (0.65, 0.85),
            lrr_deletion: -0.2,
            lrr_insertion: 0.2,
        }
    }
}

impl Thresholds {
    /// Symmetric LRR cutoffs around zero with the default BAF bands
    pub fn with_lrr_cutoff(lrr_cutoff: f64) -> Self {
        Self {
            lrr_deletion: -lrr_cutoff,
            lrr_insertion: lrr_cutoff,
            ..Self::default()
        }
    }

    /// Heterozygous sites shift from 0.5 toward 1/3 and 2/3 under a duplication
    pub fn is_baf_insertion(&self, b_allele_freq: f64) -> bool {
        within_open(b_allele_freq, self.baf_lower_band)
            || within_open(b_allele_freq, self.baf_upper_band)
    }

    pub fn is_l2r_deletion(&self, log_r_ratio: f64) -> bool {
        log_r_ratio < self.lrr_deletion
    }

    pub fn is_l2r_insertion(&self, log_r_ratio: f64) -> bool {
        log_r_ratio > self.lrr_insertion
    }
}

fn within_open(value: f64, (low, high): (f64, f64)) -> bool {
    low < value && value < high
}

/// Groups observations by sample, keeping samples in order of first appearance
pub fn group_by_sample(observations: &[Observation]) -> Vec<(&str, Vec<&Observation>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&Observation>)> = Vec::new();
    for obs in observations {
        let slot = *index.entry(obs.sample_id.as_str()).or_insert_with(|| {
            groups.push((obs.sample_id.as_str(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(obs);
    }
    groups
}

pub fn summarize_sample(
    sample_id: &str,
    records: &[&Observation],
    gene_label: &str,
    min_variants: usize,
    thresholds: &Thresholds,
) -> SampleSummary {
    let num_variants = records.len();
    let scores = if num_variants < min_variants {
        log::info!(
            "{}",
            DosageError::InsufficientEvidence {
                sample_id: sample_id.to_string(),
                num_variants,
                min_variants,
            }
        );
        None
    } else {
        score_records(records, thresholds)
    };

    SampleSummary {
        sample_id: sample_id.to_string(),
        gene_label: gene_label.to_string(),
        num_variants,
        scores,
    }
}

fn score_records(records: &[&Observation], thresholds: &Thresholds) -> Option<DosageScores> {
    let baf_insertion = fraction(
        records
            .iter()
            .map(|obs| thresholds.is_baf_insertion(obs.b_allele_freq)),
    )?;
    let l2r_deletion = fraction(
        records
            .iter()
            .map(|obs| thresholds.is_l2r_deletion(obs.log_r_ratio)),
    )?;
    let l2r_insertion = fraction(
        records
            .iter()
            .map(|obs| thresholds.is_l2r_insertion(obs.log_r_ratio)),
    )?;
    Some(DosageScores {
        baf_insertion,
        l2r_deletion,
        l2r_insertion,
    })
}

/// One summary per distinct sample, in order of first appearance in `observations`
pub fn aggregate(
    observations: &[Observation],
    gene_label: &str,
    min_variants: usize,
    thresholds: &Thresholds,
) -> Vec<SampleSummary> {
    group_by_sample(observations)
        .iter()
        .map(|(sample_id, records)| {
            summarize_sample(sample_id, records, gene_label, min_variants, thresholds)
        })
        .collect()
}

/// Same output as [`aggregate`], with samples scored on a dedicated thread pool
pub fn aggregate_par(
    observations: &[Observation],
    gene_label: &str,
    min_variants: usize,
    thresholds: &Thresholds,
    num_threads: usize,
) -> Result<Vec<SampleSummary>> {
    if num_threads <= 1 {
        return Ok(aggregate(observations, gene_label, min_variants, thresholds));
    }

    log::debug!("Initializing thread pool with {} threads...", num_threads);
    let pool = ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|i| format!("cnvdose-{}", i))
        .build()
        .map_err(|e| format!("Failed to initialize thread pool: {}", e))?;

    let groups = group_by_sample(observations);
    // Indexed collect keeps the first-appearance order of the sequential path
    let summaries: Vec<SampleSummary> = pool.install(|| {
        groups
            .par_iter()
            .map(|(sample_id, records)| {
                summarize_sample(sample_id, records, gene_label, min_variants, thresholds)
            })
            .collect()
    });
    Ok(summaries)
}
