use crate::dosage::{cohort_code, Category, Observation, SampleSummary};
use crate::utils::Result;
use std::io;

const MISSING_VALUE: &str = "NA";

fn format_score(score: Option<f64>) -> String {
    match score {
        Some(value) => format!("{:.6}", value),
        None => MISSING_VALUE.to_string(),
    }
}

fn tsv_writer<W: io::Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer)
}

/// Writes the per-sample table; missing scores are written as `NA`
pub fn write_summaries<W: io::Write>(writer: W, summaries: &[SampleSummary]) -> Result<()> {
    let mut csv_writer = tsv_writer(writer);
    let mut header = vec!["sample_id", "cohort", "gene_label", "num_variants"];
    header.extend(Category::ALL.iter().map(|category| category.column_name()));
    csv_writer
        .write_record(&header)
        .map_err(|e| format!("Failed to write summary header: {}", e))?;

    for summary in summaries {
        let mut row = vec![
            summary.sample_id.clone(),
            cohort_code(&summary.sample_id).to_string(),
            summary.gene_label.clone(),
            summary.num_variants.to_string(),
        ];
        row.extend(
            Category::ALL
                .iter()
                .map(|&category| format_score(summary.score(category))),
        );
        csv_writer
            .write_record(&row)
            .map_err(|e| format!("Failed to write summary for {}: {}", summary.sample_id, e))?;
    }
    csv_writer.flush().map_err(|e| e.to_string())
}

/// Writes observation rows with the same columns the loader reads
pub fn write_records<W: io::Write>(writer: W, records: &[Observation]) -> Result<()> {
    let mut csv_writer = tsv_writer(writer);
    for record in records {
        csv_writer
            .serialize(record)
            .map_err(|e| format!("Failed to write record: {}", e))?;
    }
    csv_writer.flush().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dosage::{read_observations, DosageScores};

    #[test]
    fn summary_table_marks_missing_scores() {
        let summaries = vec![
            SampleSummary {
                sample_id: "EUR_S1".to_string(),
                gene_label: "CYP2D6".to_string(),
                num_variants: 15,
                scores: Some(DosageScores {
                    baf_insertion: 10.0 / 15.0,
                    l2r_deletion: 0.0,
                    l2r_insertion: 1.0,
                }),
            },
            SampleSummary {
                sample_id: "S2".to_string(),
                gene_label: "CYP2D6".to_string(),
                num_variants: 3,
                scores: None,
            },
        ];
        let mut buf = Vec::new();
        write_summaries(&mut buf, &summaries).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "sample_id\tcohort\tgene_label\tnum_variants\tpercent_baf_insertion\tpercent_l2r_deletion\tpercent_l2r_insertion",
                "EUR_S1\tEUR\tCYP2D6\t15\t0.666667\t0.000000\t1.000000",
                "S2\tS2\tCYP2D6\t3\tNA\tNA\tNA",
            ]
        );
    }

    #[test]
    fn written_records_can_be_read_back() {
        let records = vec![
            Observation {
                sample_id: "S1".to_string(),
                position: 100,
                b_allele_freq: 0.25,
                log_r_ratio: -0.5,
                chrom: None,
            },
            Observation {
                sample_id: "S1".to_string(),
                position: 200,
                b_allele_freq: 0.5,
                log_r_ratio: 0.125,
                chrom: None,
            },
        ];
        let mut buf = Vec::new();
        write_records(&mut buf, &records).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("sample_id\tposition\tb_allele_freq\tlog_r_ratio\tchrom\n"));
        assert_eq!(read_observations(buf.as_slice()).unwrap(), records);
    }

    #[test]
    fn sample_ids_are_written_verbatim() {
        let records = vec![Observation {
            sample_id: "S\"1".to_string(),
            position: 7,
            b_allele_freq: 0.5,
            log_r_ratio: 0.0,
            chrom: Some("chr22".to_string()),
        }];
        let mut buf = Vec::new();
        write_records(&mut buf, &records).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert_eq!(text.lines().nth(1), Some("S\"1\t7\t0.5\t0.0\tchr22"));
        assert_eq!(read_observations(buf.as_slice()).unwrap(), records);
    }
}
