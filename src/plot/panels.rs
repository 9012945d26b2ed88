use crate::dosage::Observation;
use crate::plot::color::{baf_color, lrr_color, Color, LRR_COLOR_SPAN};
use crate::utils::GenomicRegion;
use dotplot::{Axis, Dot, Legend, Marker, RefLine, ScatterPlot};

const BAF_REFERENCE: f64 = 0.5;
const LRR_REFERENCE: f64 = 0.0;

/// BAF against position, each site colored by its LRR
pub fn plot_baf(
    records: &[Observation],
    region: &GenomicRegion,
    gene_label: &str,
    sample_id: &str,
) -> ScatterPlot {
    let dots = records
        .iter()
        .map(|obs| Dot {
            x: obs.position as f64,
            y: obs.b_allele_freq,
            color: lrr_color(obs.log_r_ratio).to_string(),
        })
        .collect();

    ScatterPlot {
        title: format!("{} B-allele frequency, {} ({})", sample_id, gene_label, region),
        x_axis: position_axis(region),
        y_axis: Axis::new("B-allele frequency", 0.0, 1.0).with_precision(2),
        dots,
        ref_lines: vec![RefLine {
            y: BAF_REFERENCE,
            color: Color::Gray.to_string(),
        }],
        markers: vec![gene_marker(region, gene_label)],
        legend: Legend {
            title: "Log R ratio".to_string(),
            labels: [-LRR_COLOR_SPAN, 0.0, LRR_COLOR_SPAN]
                .iter()
                .map(|&lrr| (format!("{:+.1}", lrr), lrr_color(lrr).to_string()))
                .collect(),
        },
    }
}

/// LRR against position, each site colored by its BAF
pub fn plot_lrr(
    records: &[Observation],
    region: &GenomicRegion,
    gene_label: &str,
    sample_id: &str,
) -> ScatterPlot {
    let dots = records
        .iter()
        .map(|obs| Dot {
            x: obs.position as f64,
            y: obs.log_r_ratio,
            color: baf_color(obs.b_allele_freq).to_string(),
        })
        .collect();

    ScatterPlot {
        title: format!("{} log R ratio, {} ({})", sample_id, gene_label, region),
        x_axis: position_axis(region),
        y_axis: lrr_axis(records),
        dots,
        ref_lines: vec![RefLine {
            y: LRR_REFERENCE,
            color: Color::Gray.to_string(),
        }],
        markers: vec![gene_marker(region, gene_label)],
        legend: Legend {
            title: "B-allele frequency".to_string(),
            labels: [0.0, 0.5, 1.0]
                .iter()
                .map(|&baf| (format!("{:.1}", baf), baf_color(baf).to_string()))
                .collect(),
        },
    }
}

fn position_axis(region: &GenomicRegion) -> Axis {
    Axis::new(
        format!("Position on {} (bp)", region.contig),
        region.start as f64,
        region.end as f64,
    )
}

fn gene_marker(region: &GenomicRegion, gene_label: &str) -> Marker {
    Marker {
        x: region.midpoint(),
        label: gene_label.to_string(),
        color: Color::Black.to_string(),
    }
}

/// Symmetric around zero, at least +/-1, widened in steps of 0.5 to fit every value
fn lrr_axis(records: &[Observation]) -> Axis {
    let extent = records
        .iter()
        .map(|obs| obs.log_r_ratio.abs())
        .fold(1.0, f64::max);
    let half_width = (extent * 2.0).ceil() / 2.0;
    // One tick every 0.5
    let ticks = (half_width * 4.0).round() as usize + 1;
    Axis::new("Log R ratio", -half_width, half_width)
        .with_precision(1)
        .with_ticks(ticks)
}
