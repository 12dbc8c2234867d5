use std::collections::BTreeSet;

use crate::error::{Result, ensure_config};

/// Validate county labels, or put every unit in county 1 when none are given.
///
/// Labels must cover `1..=max` with no gaps. Splitting counties is the
/// sampler's job; here we only make sure the labelling is well formed.
pub fn normalize_counties(counties: Option<&[u32]>, num_units: usize) -> Result<Vec<u32>> {
    let Some(counties) = counties else { return Ok(vec![1; num_units]) };

    ensure_config!(counties.len() == num_units,
        "counties has length {}, expected {num_units}", counties.len());

    let labels = counties.iter().copied().collect::<BTreeSet<u32>>();
    let max = labels.last().copied().unwrap_or(0);
    ensure_config!(labels.first() != Some(&0),
        "county labels must start at 1");
    ensure_config!(labels.len() == max as usize,
        "county labels must run from 1 to {max} with no gaps ({} distinct labels found)", labels.len());

    Ok(counties.to_vec())
}

/// Number of distinct counties in a normalized labelling.
#[inline]
pub fn num_counties(counties: &[u32]) -> u32 {
    counties.iter().copied().max().unwrap_or(0)
}
