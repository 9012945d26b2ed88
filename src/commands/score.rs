use crate::cli::{ScoreArgs, ScoringArgs};
use crate::dosage::{
    aggregate_par, category_maxima, extract_sample_records, load_observations, output,
    rank_samples, restrict_to_region, select_top_sample, Category, Observation, SampleSummary,
    Thresholds,
};
use crate::utils::{create_writer, Result};

/// Loads the observation table, keeps the region and scores every sample
pub fn score_region(args: &ScoringArgs) -> Result<(Vec<Observation>, Vec<SampleSummary>)> {
    let observations = load_observations(&args.observations_path)?;
    let observations = restrict_to_region(observations, &args.region);
    if observations.is_empty() {
        log::warn!("No observations fall inside {}", args.region);
    }

    let thresholds = Thresholds::with_lrr_cutoff(args.lrr_cutoff);
    let summaries = aggregate_par(
        &observations,
        &args.gene_label,
        args.min_variants,
        &thresholds,
        args.num_threads,
    )?;

    let scored = summaries.iter().filter(|s| s.scores.is_some()).count();
    log::info!(
        "Scored {} of {} samples for {} ({})",
        scored,
        summaries.len(),
        args.gene_label,
        args.region
    );
    Ok((observations, summaries))
}

pub fn score(args: ScoreArgs) -> Result<()> {
    let (observations, summaries) = score_region(&args.scoring)?;

    create_writer(&args.output_prefix, "summary.tsv", |writer| {
        output::write_summaries(writer, &summaries)
    })?;

    let maxima = category_maxima(&summaries);
    for category in Category::ALL {
        match maxima.get(category) {
            Some(value) => log::info!("Maximum {}: {:.6}", category.column_name(), value),
            None => log::info!("Maximum {}: NA", category.column_name()),
        }
    }
    report_ranking(&summaries, args.scoring.rank_by, args.report_top);

    // The summary table is already on disk when selection fails
    let selected = select_top_sample(&summaries, args.scoring.rank_by)?;
    log::info!(
        "Selected {} by {} ({} variants)",
        selected.sample_id,
        args.scoring.rank_by,
        selected.num_variants
    );

    let records = extract_sample_records(&observations, &selected.sample_id);
    create_writer(&args.output_prefix, "selected.tsv", |writer| {
        output::write_records(writer, &records)
    })?;
    Ok(())
}

fn report_ranking(summaries: &[SampleSummary], category: Category, top: usize) {
    for (rank, summary) in rank_samples(summaries, category)
        .into_iter()
        .take(top)
        .enumerate()
    {
        let score = summary
            .score(category)
            .map_or("NA".to_string(), |value| format!("{:.6}", value));
        log::info!(
            "#{} {} {}={} n={}",
            rank + 1,
            summary.sample_id,
            category,
            score,
            summary.num_variants
        );
    }
}
