use std::{fmt, str::FromStr};

/// The three dosage signatures scored per sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    BafInsertion,
    L2rDeletion,
    L2rInsertion,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::BafInsertion,
        Category::L2rDeletion,
        Category::L2rInsertion,
    ];

    pub fn column_name(&self) -> &'static str {
        match self {
            Category::BafInsertion => "percent_baf_insertion",
            Category::L2rDeletion => "percent_l2r_deletion",
            Category::L2rInsertion => "percent_l2r_insertion",
        }
    }
}

impl FromStr for Category {
    type Err = &'static str;
    fn from_str(category: &str) -> Result<Self, Self::Err> {
        match category {
            "baf-insertion" => Ok(Category::BafInsertion),
            "l2r-deletion" => Ok(Category::L2rDeletion),
            "l2r-insertion" => Ok(Category::L2rInsertion),
            _ => Err("Invalid category. Options are: baf-insertion, l2r-deletion, l2r-insertion"),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Category::BafInsertion => write!(formatter, "baf-insertion"),
            Category::L2rDeletion => write!(formatter, "l2r-deletion"),
            Category::L2rInsertion => write!(formatter, "l2r-insertion"),
        }
    }
}

/// Fractions of a sample's variants showing each signature, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DosageScores {
    pub baf_insertion: f64,
    pub l2r_deletion: f64,
    pub l2r_insertion: f64,
}

impl DosageScores {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::BafInsertion => self.baf_insertion,
            Category::L2rDeletion => self.l2r_deletion,
            Category::L2rInsertion => self.l2r_insertion,
        }
    }
}

/// Per-sample result of aggregation. `scores` is `None` when the sample
/// fell below the minimum variant count, so all three fractions are
/// missing together.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSummary {
    pub sample_id: String,
    pub gene_label: String,
    pub num_variants: usize,
    pub scores: Option<DosageScores>,
}

impl SampleSummary {
    pub fn score(&self, category: Category) -> Option<f64> {
        self.scores.map(|scores| scores.get(category))
    }
}
