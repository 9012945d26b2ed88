use crate::cli::PlotArgs;
use crate::commands::score::score_region;
use crate::dosage::{extract_sample_records, select_top_sample};
use crate::plot::{plot_baf, plot_lrr};
use crate::utils::{output_path, Result};
use dotplot::generate_image;
use std::path::Path;

pub fn plot(args: PlotArgs) -> Result<()> {
    let (observations, summaries) = score_region(&args.scoring)?;

    let sample_id = match &args.sample_id {
        Some(sample_id) => {
            if !summaries.iter().any(|s| &s.sample_id == sample_id) {
                return Err(format!(
                    "Sample {} has no observations in {}",
                    sample_id, args.scoring.region
                ));
            }
            sample_id.clone()
        }
        None => select_top_sample(&summaries, args.scoring.rank_by)?
            .sample_id
            .clone(),
    };

    let records = extract_sample_records(&observations, &sample_id);
    log::info!("Plotting {} sites of {}", records.len(), sample_id);

    let region = &args.scoring.region;
    let gene_label = &args.scoring.gene_label;
    let panels = [
        ("baf", plot_baf(&records, region, gene_label, &sample_id)),
        ("lrr", plot_lrr(&records, region, gene_label, &sample_id)),
    ];
    for (name, panel) in &panels {
        let path = output_path(&args.output_prefix, &format!("{}.{}", name, args.format));
        generate_image(panel, Path::new(&path))?;
        log::info!("Wrote {}", path);
    }
    Ok(())
}
