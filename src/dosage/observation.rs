use crate::dosage::DosageError;
use crate::utils::{open_table_reader, GenomicRegion, Result};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, io, path::Path, str::FromStr};

const REQUIRED_COLUMNS: [&str; 4] = ["sample_id", "position", "b_allele_freq", "log_r_ratio"];

/// One array measurement for one sample at one site
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub sample_id: String,
    pub position: u32,
    pub b_allele_freq: f64,
    pub log_r_ratio: f64,
    /// Only set when the table carries a chromosome column
    pub chrom: Option<String>,
}

/// Cohort code encoded as the sample id prefix before the first underscore
pub fn cohort_code(sample_id: &str) -> &str {
    sample_id
        .split_once('_')
        .map_or(sample_id, |(code, _)| code)
}

#[derive(Debug, Deserialize)]
struct ObservationRow {
    sample_id: Option<String>,
    position: Option<String>,
    b_allele_freq: Option<String>,
    log_r_ratio: Option<String>,
    #[serde(alias = "chromosome")]
    chrom: Option<String>,
}

impl ObservationRow {
    fn into_observation(self, line: u64) -> std::result::Result<Observation, DosageError> {
        let malformed = |reason: String| DosageError::MalformedObservation { line, reason };

        let sample_id = self
            .sample_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| malformed("missing sample_id".to_string()))?;
        let position: u32 = parse_field(self.position, "position").map_err(malformed)?;
        let b_allele_freq: f64 =
            parse_field(self.b_allele_freq, "b_allele_freq").map_err(malformed)?;
        let log_r_ratio: f64 = parse_field(self.log_r_ratio, "log_r_ratio").map_err(malformed)?;

        if !b_allele_freq.is_finite() || !(0.0..=1.0).contains(&b_allele_freq) {
            return Err(malformed(format!(
                "b_allele_freq must be within [0, 1], got {}",
                b_allele_freq
            )));
        }
        if !log_r_ratio.is_finite() {
            return Err(malformed(format!(
                "log_r_ratio must be finite, got {}",
                log_r_ratio
            )));
        }

        Ok(Observation {
            sample_id,
            position,
            b_allele_freq,
            log_r_ratio,
            chrom: self.chrom.filter(|chrom| !chrom.is_empty()),
        })
    }
}

fn parse_field<T: FromStr>(value: Option<String>, name: &str) -> std::result::Result<T, String> {
    let value = value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| format!("missing {}", name))?;
    value
        .parse()
        .map_err(|_| format!("invalid {} value: {}", name, value))
}

/// Parses a tab-separated observation table with a header row. Extra columns
/// are ignored except an optional `chrom` (or `chromosome`) column. A sample
/// may appear only once per site.
pub fn read_observations<R: io::Read>(
    reader: R,
) -> std::result::Result<Vec<Observation>, DosageError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| DosageError::MalformedObservation {
            line: 1,
            reason: e.to_string(),
        })?
        .clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(DosageError::MalformedObservation {
                line: 1,
                reason: format!("header is missing column {}", column),
            });
        }
    }

    let mut observations = Vec::new();
    let mut seen_sites: HashSet<(String, Option<String>, u32)> = HashSet::new();
    let mut record = csv::StringRecord::new();
    loop {
        let has_record =
            csv_reader
                .read_record(&mut record)
                .map_err(|e| DosageError::MalformedObservation {
                    line: e.position().map_or(0, |pos| pos.line()),
                    reason: e.to_string(),
                })?;
        if !has_record {
            break;
        }
        let line = record.position().map_or(0, |pos| pos.line());
        let row: ObservationRow =
            record
                .deserialize(Some(&headers))
                .map_err(|e| DosageError::MalformedObservation {
                    line,
                    reason: e.to_string(),
                })?;
        let obs = row.into_observation(line)?;

        let site = (obs.sample_id.clone(), obs.chrom.clone(), obs.position);
        if !seen_sites.insert(site) {
            return Err(DosageError::MalformedObservation {
                line,
                reason: format!(
                    "duplicate observation for sample {} at position {}",
                    obs.sample_id, obs.position
                ),
            });
        }
        observations.push(obs);
    }

    Ok(observations)
}

pub fn load_observations(path: &Path) -> Result<Vec<Observation>> {
    let reader = open_table_reader(path)?;
    let observations =
        read_observations(reader).map_err(|e| format!("{}: {}", path.display(), e))?;
    log::info!(
        "Loaded {} observations from {}",
        observations.len(),
        path.display()
    );
    Ok(observations)
}

/// Keeps observations inside `region`. Rows that carry a chromosome must
/// also match the region's contig.
pub fn restrict_to_region(
    mut observations: Vec<Observation>,
    region: &GenomicRegion,
) -> Vec<Observation> {
    let before = observations.len();
    observations.retain(|obs| {
        obs.chrom
            .as_deref()
            .map_or(true, |chrom| chrom == region.contig)
            && region.intersect_position(obs.position)
    });
    let dropped = before - observations.len();
    if dropped > 0 {
        log::info!(
            "Dropped {} of {} observations outside {}",
            dropped,
            before,
            region
        );
    }
    observations
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "sample_id\tposition\tb_allele_freq\tlog_r_ratio\n";

    fn parse(body: &str) -> std::result::Result<Vec<Observation>, DosageError> {
        read_observations(format!("{}{}", HEADER, body).as_bytes())
    }

    fn malformed_line(err: DosageError) -> u64 {
        match err {
            DosageError::MalformedObservation { line, .. } => line,
            other => panic!("Expected MalformedObservation, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_valid_table() {
        let observations = parse("A_1\t100\t0.5\t-0.1\nB_2\t200\t0.25\t0.3\n").unwrap();
        assert_eq!(
            observations,
            vec![
                Observation {
                    sample_id: "A_1".to_string(),
                    position: 100,
                    b_allele_freq: 0.5,
                    log_r_ratio: -0.1,
                    chrom: None,
                },
                Observation {
                    sample_id: "B_2".to_string(),
                    position: 200,
                    b_allele_freq: 0.25,
                    log_r_ratio: 0.3,
                    chrom: None,
                },
            ]
        );
    }

    #[test]
    fn test_columns_in_any_order_with_extras() {
        let table = "chrom\tlog_r_ratio\tposition\tsample_id\tb_allele_freq\n\
                     chr22\t0.1\t500\tS1\t0.75\n";
        let observations = read_observations(table.as_bytes()).unwrap();
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].sample_id, "S1");
        assert_eq!(observations[0].position, 500);
        assert_eq!(observations[0].b_allele_freq, 0.75);
        assert_eq!(observations[0].log_r_ratio, 0.1);
        assert_eq!(observations[0].chrom.as_deref(), Some("chr22"));
    }

    #[test]
    fn test_chromosome_column_alias() {
        let table = "sample_id\tchromosome\tposition\tb_allele_freq\tlog_r_ratio\n\
                     S1\t22\t500\t0.75\t0.1\n";
        let observations = read_observations(table.as_bytes()).unwrap();
        assert_eq!(observations[0].chrom.as_deref(), Some("22"));
    }

    #[test]
    fn test_duplicate_site_rejected() {
        let err = parse("S1\t1\t0.5\t0.0\nS2\t1\t0.5\t0.0\nS1\t1\t0.4\t0.1\n").unwrap_err();
        assert_eq!(malformed_line(err.clone()), 4);
        assert!(err
            .to_string()
            .contains("duplicate observation for sample S1 at position 1"));
    }

    #[test]
    fn test_same_position_on_other_chromosome_accepted() {
        let table = "sample_id\tchrom\tposition\tb_allele_freq\tlog_r_ratio\n\
                     S1\tchr1\t500\t0.5\t0.0\n\
                     S1\tchr22\t500\t0.5\t0.0\n";
        assert_eq!(read_observations(table.as_bytes()).unwrap().len(), 2);
    }

    #[test]
    fn test_quotes_are_literal() {
        let observations = parse("\"S1\t1\t0.5\t0.0\nS\"2\t2\t0.5\t0.0\n").unwrap();
        assert_eq!(observations[0].sample_id, "\"S1");
        assert_eq!(observations[1].sample_id, "S\"2");
    }

    #[test]
    fn test_missing_column_rejected() {
        let table = "sample_id\tposition\tb_allele_freq\nS1\t1\t0.5\n";
        let err = read_observations(table.as_bytes()).unwrap_err();
        assert_eq!(
            err,
            DosageError::MalformedObservation {
                line: 1,
                reason: "header is missing column log_r_ratio".to_string()
            }
        );
    }

    #[test]
    fn test_empty_value_rejected_with_line() {
        let err = parse("S1\t1\t0.5\t0.0\nS1\t2\t\t0.0\n").unwrap_err();
        assert_eq!(malformed_line(err.clone()), 3);
        assert!(err.to_string().contains("missing b_allele_freq"));
    }

    #[test]
    fn test_nan_rejected() {
        let err = parse("S1\t1\t0.5\tNaN\n").unwrap_err();
        assert_eq!(malformed_line(err.clone()), 2);
        assert!(err.to_string().contains("log_r_ratio must be finite"));
    }

    #[test]
    fn test_na_token_rejected() {
        let err = parse("S1\t1\tNA\t0.1\n").unwrap_err();
        assert!(err.to_string().contains("invalid b_allele_freq value: NA"));
    }

    #[test]
    fn test_baf_out_of_range_rejected() {
        let err = parse("S1\t1\t1.2\t0.1\n").unwrap_err();
        assert!(err.to_string().contains("b_allele_freq must be within [0, 1]"));
    }

    #[test]
    fn test_invalid_position_rejected() {
        let err = parse("S1\t-5\t0.5\t0.1\n").unwrap_err();
        assert!(err.to_string().contains("invalid position value: -5"));
    }

    #[test]
    fn test_short_row_rejected() {
        let err = parse("S1\t1\t0.5\n").unwrap_err();
        assert_eq!(malformed_line(err), 2);
    }

    #[test]
    fn test_baf_bounds_accepted() {
        let observations = parse("S1\t1\t0\t0\nS1\t2\t1\t0\n").unwrap();
        assert_eq!(observations.len(), 2);
    }

    #[test]
    fn test_cohort_code() {
        assert_eq!(cohort_code("EUR_NA12878"), "EUR");
        assert_eq!(cohort_code("EUR_NA_12878"), "EUR");
        assert_eq!(cohort_code("NA12878"), "NA12878");
    }

    #[test]
    fn test_restrict_to_region() {
        let observations = parse("S1\t99\t0.5\t0\nS1\t100\t0.5\t0\nS1\t200\t0.5\t0\nS1\t201\t0.5\t0\n")
            .unwrap();
        let region = GenomicRegion::new("chr1", 100, 200).unwrap();
        let kept = restrict_to_region(observations, &region);
        let positions: Vec<u32> = kept.iter().map(|obs| obs.position).collect();
        assert_eq!(positions, vec![100, 200]);
    }

    #[test]
    fn test_restrict_to_region_matches_contig() {
        let mut table = String::from("sample_id\tchrom\tposition\tb_allele_freq\tlog_r_ratio\n");
        for i in 0..10 {
            table.push_str(&format!("S1\tchr22\t{}\t0.5\t0.0\n", 1000 + i));
            table.push_str(&format!("S1\tchr1\t{}\t0.5\t-1.0\n", 1000 + i));
        }
        let observations = read_observations(table.as_bytes()).unwrap();
        let region = GenomicRegion::new("chr22", 1000, 2000).unwrap();
        let kept = restrict_to_region(observations, &region);
        assert_eq!(kept.len(), 10);
        assert!(kept.iter().all(|obs| obs.chrom.as_deref() == Some("chr22")));
        assert!(kept.iter().all(|obs| obs.log_r_ratio == 0.0));
    }

    #[test]
    fn test_load_gzipped_file() {
        use flate2::{write::GzEncoder, Compression};
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("obs.tsv.gz");
        let mut encoder = GzEncoder::new(
            std::fs::File::create(&path).unwrap(),
            Compression::default(),
        );
        encoder
            .write_all(format!("{}S1\t10\t0.3\t0.5\n", HEADER).as_bytes())
            .unwrap();
        encoder.finish().unwrap();

        let observations = load_observations(&path).unwrap();
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].chrom, None);
    }

    #[test]
    fn test_load_reports_path_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.tsv");
        std::fs::write(&path, format!("{}S1\tx\t0.3\t0.5\n", HEADER)).unwrap();
        let err = load_observations(&path).unwrap_err();
        assert!(err.contains("bad.tsv"));
        assert!(err.contains("line 2"));
    }
}
