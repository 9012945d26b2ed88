use crate::dosage::summary::Category;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum DosageError {
    /// A sample has fewer observations than the minimum; recovered locally as missing scores
    InsufficientEvidence {
        sample_id: String,
        num_variants: usize,
        min_variants: usize,
    },
    /// No sample has a defined score in the category being maximized
    NoEligibleSample { category: Category },
    /// A row of the observation table could not be accepted
    MalformedObservation { line: u64, reason: String },
}

impl fmt::Display for DosageError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DosageError::InsufficientEvidence {
                sample_id,
                num_variants,
                min_variants,
            } => write!(
                f,
                "Insufficient evidence for sample {}: {} variants (minimum {})",
                sample_id, num_variants, min_variants
            ),
            DosageError::NoEligibleSample { category } => write!(
                f,
                "No sample has a defined {} score",
                category.column_name()
            ),
            DosageError::MalformedObservation { line, reason } => {
                write!(f, "Malformed observation at line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for DosageError {}

impl From<DosageError> for String {
    fn from(err: DosageError) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        let err = DosageError::NoEligibleSample {
            category: Category::L2rDeletion,
        };
        assert_eq!(
            err.to_string(),
            "No sample has a defined percent_l2r_deletion score"
        );

        let err = DosageError::MalformedObservation {
            line: 7,
            reason: "missing log_r_ratio".to_string(),
        };
        assert_eq!(
            String::from(err),
            "Malformed observation at line 7: missing log_r_ratio"
        );
    }

    #[test]
    fn insufficient_evidence_reports_counts() {
        let err = DosageError::InsufficientEvidence {
            sample_id: "NA12878".to_string(),
            num_variants: 3,
            min_variants: 10,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient evidence for sample NA12878: 3 variants (minimum 10)"
        );
    }
}
