use crate::dosage::{
    summary::{Category, SampleSummary},
    DosageError, Observation,
};
use crate::utils::max_defined;
use itertools::Itertools;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DosageMaxima {
    pub baf_insertion: Option<f64>,
    pub l2r_deletion: Option<f64>,
    pub l2r_insertion: Option<f64>,
}

impl DosageMaxima {
    pub fn get(&self, category: Category) -> Option<f64> {
        match category {
            Category::BafInsertion => self.baf_insertion,
            Category::L2rDeletion => self.l2r_deletion,
            Category::L2rInsertion => self.l2r_insertion,
        }
    }
}

pub fn category_maximum(summaries: &[SampleSummary], category: Category) -> Option<f64> {
    max_defined(summaries.iter().map(|summary| summary.score(category)))
}

pub fn category_maxima(summaries: &[SampleSummary]) -> DosageMaxima {
    DosageMaxima {
        baf_insertion: category_maximum(summaries, Category::BafInsertion),
        l2r_deletion: category_maximum(summaries, Category::L2rDeletion),
        l2r_insertion: category_maximum(summaries, Category::L2rInsertion),
    }
}

/// Picks the first sample, in table order, whose score equals the category maximum
pub fn select_top_sample(
    summaries: &[SampleSummary],
    category: Category,
) -> Result<&SampleSummary, DosageError> {
    let no_eligible = || DosageError::NoEligibleSample { category };
    let maximum = category_maximum(summaries, category).ok_or_else(no_eligible)?;
    summaries
        .iter()
        .find(|summary| summary.score(category) == Some(maximum))
        .ok_or_else(no_eligible)
}

/// Summaries by descending score; ties keep table order and missing scores come last
pub fn rank_samples(summaries: &[SampleSummary], category: Category) -> Vec<&SampleSummary> {
    summaries
        .iter()
        .sorted_by(|a, b| match (a.score(category), b.score(category)) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .collect()
}

/// All observations of one sample ordered by position, ready for plotting
pub fn extract_sample_records(observations: &[Observation], sample_id: &str) -> Vec<Observation> {
    observations
        .iter()
        .filter(|obs| obs.sample_id == sample_id)
        .sorted_by_key(|obs| obs.position)
        .cloned()
        .collect()
}
