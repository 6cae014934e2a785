//! Order statistics over sorted samples
//!
//! All functions expect their input sorted ascending and return `None` for an
//! empty sample; callers decide what an empty group reports.

/// Nearest-rank percentile, rounding the rank up
///
/// The element at 0-based index `ceil(p/100 * n) - 1`, clamped to
/// `[0, n-1]`. No interpolation. The rank is computed in integer arithmetic
/// so results do not depend on floating-point rounding of `p/100`.
pub fn percentile<T: Copy>(sorted: &[T], p: u32) -> Option<T> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }

    let p = p.min(100) as usize;
    let rank = (p * n).div_ceil(100);
    let index = rank.saturating_sub(1).min(n - 1);

    Some(sorted[index])
}

/// Median of a sorted sample
///
/// Odd sizes return the middle element, even sizes the mean of the two
/// central elements. Halving before adding keeps the result finite for
/// finite inputs near `f64::MAX`.
pub fn median(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }

    let mid = n / 2;
    if n % 2 == 0 {
        Some(sorted[mid - 1] / 2.0 + sorted[mid] / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Arithmetic mean, accumulated as a running mean so no intermediate sum
/// can overflow
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut running = 0.0_f64;
    for (i, &value) in values.iter().enumerate() {
        let count = (i + 1) as f64;
        let delta = value - running;
        if delta.is_finite() {
            running += delta / count;
        } else {
            // Opposite-sign extremes: divide each term before subtracting
            running += value / count - running / count;
        }
    }
    Some(running)
}

/// Smallest element of a sorted sample
pub fn min<T: Copy>(sorted: &[T]) -> Option<T> {
    sorted.first().copied()
}

/// Largest element of a sorted sample
pub fn max<T: Copy>(sorted: &[T]) -> Option<T> {
    sorted.last().copied()
}

/// Minimum, median, mean and maximum of a sample
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DistributionSummary {
    pub minimum: f64,
    pub median: f64,
    pub average: f64,
    pub maximum: f64,
}

impl DistributionSummary {
    /// Summarize a sorted sample; an empty sample reports zero everywhere
    pub fn from_sorted(sorted: &[f64]) -> Self {
        Self {
            minimum: min(sorted).unwrap_or_default(),
            median: median(sorted).unwrap_or_default(),
            average: mean(sorted).unwrap_or_default(),
            maximum: max(sorted).unwrap_or_default(),
        }
    }
}
