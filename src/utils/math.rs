/// Fraction of `true` values, or `None` for an empty input
pub fn fraction<I>(flags: I) -> Option<f64>
where
    I: IntoIterator<Item = bool>,
{
    let (hits, total) = flags
        .into_iter()
        .fold((0usize, 0usize), |(hits, total), flag| {
            (hits + usize::from(flag), total + 1)
        });
    match total {
        0 => None,
        _ => Some(hits as f64 / total as f64),
    }
}

/// Maximum over the defined values; missing values are skipped rather than treated as zero
pub fn max_defined<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    values
        .into_iter()
        .flatten()
        .fold(None, |best: Option<f64>, value| match best {
            Some(current) if current >= value => Some(current),
            _ => Some(value),
        })
}
