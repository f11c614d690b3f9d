//! Frame operations shared by the statistics engine and the chart builders.
//!
//! All functions take column slices and skip missing cells.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// Frequency of each distinct value, most frequent first.
///
/// Ties keep the order in which values were first encountered.
pub fn value_counts(values: &[Option<String>]) -> Vec<(String, usize)> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for value in values.iter().flatten() {
        match positions.get(value.as_str()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                positions.insert(value.as_str(), counts.len());
                counts.push((value.clone(), 1));
            }
        }
    }

    // Stable sort preserves first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Number of distinct present values.
pub fn distinct_count(values: &[Option<String>]) -> usize {
    values
        .iter()
        .flatten()
        .map(String::as_str)
        .collect::<std::collections::HashSet<_>>()
        .len()
}

/// Mean of `values` per category of `keys`, highest mean first.
///
/// Rows with a missing key are ignored. A category whose values are all
/// missing has a NaN mean and sorts last.
pub fn group_mean(keys: &[Option<String>], values: &[Option<f64>]) -> Vec<(String, f64)> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();

    for (key, value) in keys.iter().zip(values) {
        let Some(key) = key else { continue };
        let entry = groups.entry(key.as_str()).or_insert((0.0, 0));
        if let Some(v) = value {
            entry.0 += v;
            entry.1 += 1;
        }
    }

    let mut means: Vec<(String, f64)> = groups
        .into_iter()
        .map(|(key, (sum, n))| {
            let mean = if n == 0 { f64::NAN } else { sum / n as f64 };
            (key.to_string(), mean)
        })
        .collect();

    means.sort_by(|a, b| descending_nan_last(a.1, b.1));
    means
}

/// Aggregate of one numeric group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericGroup {
    pub key: f64,
    pub mean: f64,
    /// Number of present values in the group.
    pub count: usize,
}

/// Mean and count of `values` per distinct numeric key, ascending by key.
pub fn group_by_number(keys: &[Option<f64>], values: &[Option<f64>]) -> Vec<NumericGroup> {
    let mut rows: Vec<(f64, Option<f64>)> = keys
        .iter()
        .zip(values)
        .filter_map(|(key, value)| key.map(|k| (k, *value)))
        .collect();
    rows.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut groups: Vec<NumericGroup> = Vec::new();
    let mut sums: Vec<f64> = Vec::new();

    for (key, value) in rows {
        if groups.last().is_none_or(|g| g.key != key) {
            groups.push(NumericGroup {
                key,
                mean: f64::NAN,
                count: 0,
            });
            sums.push(0.0);
        }
        if let (Some(v), Some(group), Some(sum)) = (value, groups.last_mut(), sums.last_mut()) {
            *sum += v;
            group.count += 1;
        }
    }

    for (group, sum) in groups.iter_mut().zip(sums) {
        if group.count > 0 {
            group.mean = sum / group.count as f64;
        }
    }
    groups
}

/// Present values, sorted ascending.
pub fn sorted_present(values: &[Option<f64>]) -> Vec<f64> {
    let mut present: Vec<f64> = values.iter().flatten().copied().collect();
    present.sort_by(f64::total_cmp);
    present
}

/// Quantile of sorted data with linear interpolation between closest ranks.
///
/// Returns NaN for empty input.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let position = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Arithmetic mean, NaN for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator), NaN below two values.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Pearson correlation over rows where both values are present.
///
/// NaN when fewer than two complete rows remain or either side is constant.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denominator = (var_x * var_y).sqrt();
    if denominator == 0.0 {
        return f64::NAN;
    }
    (cov / denominator).clamp(-1.0, 1.0)
}

/// Round to `decimals` places, ties to even: scale, round to the nearest
/// integer, scale back. NaN stays NaN.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Up to `amount` distinct row indices drawn with a fixed seed.
///
/// The same `(len, amount, seed)` always yields the same indices in the same
/// order. ChaCha8 keeps the stream stable across rand releases.
pub fn sample_indices(len: usize, amount: usize, seed: u64) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rand::seq::index::sample(&mut rng, len, amount.min(len)).into_vec()
}

fn descending_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(values: &[&str]) -> Vec<Option<String>> {
        values.iter().map(|s| Some(s.to_string())).collect()
    }

    #[test]
    fn test_value_counts_descending_with_first_seen_ties() {
        let counts = value_counts(&text(&["b", "a", "c", "a", "c", "d"]));
        assert_eq!(
            counts,
            vec![
                ("a".to_string(), 2),
                ("c".to_string(), 2),
                ("b".to_string(), 1),
                ("d".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_value_counts_skip_missing() {
        let counts = value_counts(&[None, Some("x".to_string()), None]);
        assert_eq!(counts, vec![("x".to_string(), 1)]);
        assert_eq!(distinct_count(&[None, Some("x".to_string())]), 1);
    }

    #[test]
    fn test_group_mean_sorted_descending() {
        let keys = text(&["A", "B", "A", "C"]);
        let values = vec![Some(1000.0), Some(3000.0), Some(2000.0), None];
        let means = group_mean(&keys, &values);

        assert_eq!(means[0], ("B".to_string(), 3000.0));
        assert_eq!(means[1], ("A".to_string(), 1500.0));
        assert_eq!(means[2].0, "C");
        assert!(means[2].1.is_nan(), "all-missing group should be NaN");
    }

    #[test]
    fn test_group_by_number_counts_present_values() {
        let keys = vec![Some(2021.0), Some(2020.0), Some(2021.0), None, Some(2020.0)];
        let values = vec![Some(10.0), Some(4.0), Some(20.0), Some(99.0), None];
        let groups = group_by_number(&keys, &values);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], NumericGroup { key: 2020.0, mean: 4.0, count: 1 });
        assert_eq!(groups[1], NumericGroup { key: 2021.0, mean: 15.0, count: 2 });
    }

    #[test]
    fn test_quantile_linear_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_sorted(&sorted, 0.25), 1.75);
        assert_eq!(quantile_sorted(&sorted, 0.5), 2.5);
        assert_eq!(quantile_sorted(&sorted, 0.75), 3.25);
        assert_eq!(quantile_sorted(&sorted, 0.0), 1.0);
        assert_eq!(quantile_sorted(&sorted, 1.0), 4.0);
        assert!(quantile_sorted(&[], 0.5).is_nan());
    }

    #[test]
    fn test_sample_std() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let expected = (32.0f64 / 7.0).sqrt();
        assert!((sample_std(&values) - expected).abs() < 1e-12);
        assert!(sample_std(&[1.0]).is_nan());
    }

    #[test]
    fn test_pearson() {
        let x = vec![Some(1.0), Some(2.0), Some(3.0), None];
        let y = vec![Some(2.0), Some(4.0), Some(6.0), Some(100.0)];
        assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);

        let inverse = vec![Some(3.0), Some(2.0), Some(1.0), None];
        assert!((pearson(&x, &inverse) + 1.0).abs() < 1e-12);

        let constant = vec![Some(5.0), Some(5.0), Some(5.0), Some(5.0)];
        assert!(pearson(&x, &constant).is_nan());
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1234.5678, 2), 1234.57);
        assert_eq!(round_to(0.12345, 3), 0.123);
        assert!(round_to(f64::NAN, 2).is_nan());

        // exact halves go to the even neighbour
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(1000.125, 2), 1000.12);
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(-0.125, 2), -0.12);
    }

    #[test]
    fn test_sample_indices_deterministic_and_distinct() {
        let a = sample_indices(10_000, 2000, 42);
        let b = sample_indices(10_000, 2000, 42);
        assert_eq!(a, b);
        assert_eq!(a.len(), 2000);

        let mut unique = a.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 2000);

        assert_eq!(sample_indices(5, 2000, 42).len(), 5);
    }
}
