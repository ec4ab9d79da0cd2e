//! Utility functions for the move pool

use rand::Rng;

/// Calculate Shannon entropy from a probability distribution.
///
/// The Shannon entropy is calculated as: H = -Σ(p * ln(p)) for p > 0
///
/// # Examples
///
/// ```
/// use movepool::utils::shannon_entropy;
///
/// let entropy = shannon_entropy(vec![0.5, 0.5]);
/// assert!((entropy - std::f64::consts::LN_2).abs() < 0.001);
/// ```
pub fn shannon_entropy<I>(probabilities: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    probabilities
        .into_iter()
        .filter(|&p| p > 0.0)
        .map(|p| -p * p.ln())
        .sum()
}

/// Calculate entropy from integer weights, normalizing first.
///
/// Returns 0.0 when the total weight is zero.
pub fn entropy_from_counts<I>(counts: I) -> f64
where
    I: IntoIterator<Item = u32>,
{
    let counts: Vec<u32> = counts.into_iter().collect();
    let total: u64 = counts.iter().map(|&c| u64::from(c)).sum();
    if total == 0 {
        return 0.0;
    }
    shannon_entropy(counts.iter().map(|&c| f64::from(c) / total as f64))
}

/// Select the item whose cumulative weight range contains `ticket`.
///
/// Items are walked in the given order; item `i` owns the half-open range
/// `[sum(w_0..w_i), sum(w_0..=w_i))`. Returns `None` when `ticket` lies past
/// the total weight.
pub fn pick_by_ticket<T>(ticket: u64, items: &[(T, u32)]) -> Option<T>
where
    T: Clone,
{
    let mut start = 0u64;
    for (item, weight) in items {
        let end = start + u64::from(*weight);
        if ticket < end {
            return Some(item.clone());
        }
        start = end;
    }
    None
}

/// Sample an item from integer weights.
///
/// Draws a uniform ticket in `[0, total)` and resolves it with
/// [`pick_by_ticket`]. Returns `None` if the items carry no weight.
///
/// # Examples
///
/// ```
/// use movepool::utils::weighted_sample;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let items = vec![("a", 1u32), ("b", 0u32)];
/// assert_eq!(weighted_sample(&mut rng, &items), Some("a"));
/// ```
pub fn weighted_sample<R, T>(rng: &mut R, items: &[(T, u32)]) -> Option<T>
where
    R: Rng,
    T: Clone,
{
    let total: u64 = items.iter().map(|(_, w)| u64::from(*w)).sum();
    if total == 0 {
        return None;
    }

    let ticket = rng.random_range(0..total);
    pick_by_ticket(ticket, items)
}
