//! Log-space probability arithmetic.
//!
//! Probabilities of whole sentences underflow `f64` quickly, so scores are
//! carried as natural logarithms. The helpers here add, normalize and combine
//! log-probabilities without leaving log space, always factoring out the
//! largest term before exponentiating.

/// `ln(exp(a) + exp(b))`.
///
/// A `-inf` operand is a zero probability and returns the other operand.
pub fn log_sum_exp_pair(a: f64, b: f64) -> f64 {
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
    if lo.is_infinite() {
        // lo is -inf here, or both are +inf
        return hi;
    }
    (lo - hi).exp().ln_1p() + hi
}

/// `ln(Σ exp(v))` over a non-empty slice.
///
/// # Panics
///
/// Panics if `values` is empty.
pub fn log_sum_exp(values: &[f64]) -> f64 {
    assert!(!values.is_empty(), "log_sum_exp of an empty slice");

    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max.is_infinite() {
        return max;
    }

    let sum: f64 = values.iter().map(|v| (v - max).exp()).sum();
    sum.ln() + max
}

/// Dot product of two vectors given in log space, returned in log space.
///
/// # Panics
///
/// Panics if the vectors differ in length or are empty.
pub fn log_dot(v1: &[f64], v2: &[f64]) -> f64 {
    assert_eq!(v1.len(), v2.len(), "log_dot vectors must be the same length");
    let summands: Vec<f64> = v1.iter().zip(v2).map(|(a, b)| a + b).collect();
    log_sum_exp(&summands)
}

/// Probabilistic OR `p + q - pq` of two log-probabilities.
pub fn log_fuzzy_or_pair(a: f64, b: f64) -> f64 {
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
    if lo == f64::NEG_INFINITY {
        return hi;
    }
    // ln(p + q - pq) = ln(p) + ln(1 + q(1/p - 1))
    (lo.exp() * (-hi).exp_m1()).ln_1p() + hi
}

/// Probabilistic OR over a slice, combined as a balanced binary tree.
///
/// An empty slice yields `0.0` and a single value is returned unchanged.
pub fn log_fuzzy_or(values: &[f64]) -> f64 {
    match values {
        [] => 0.0,
        [single] => *single,
        [a, b] => log_fuzzy_or_pair(*a, *b),
        _ => {
            let (left, right) = values.split_at(values.len() / 2);
            log_fuzzy_or_pair(log_fuzzy_or(left), log_fuzzy_or(right))
        }
    }
}

/// Shift log-probabilities so they sum to one in normal space.
///
/// # Panics
///
/// Panics if `values` is empty.
pub fn log_sum_exp_normalize(values: &[f64]) -> Vec<f64> {
    let total = log_sum_exp(values);
    values.iter().map(|v| v - total).collect()
}

/// Normalize log-probabilities into a normal-space distribution.
///
/// # Panics
///
/// Panics if `values` is empty.
pub fn exp_normalize(values: &[f64]) -> Vec<f64> {
    log_sum_exp_normalize(values)
        .into_iter()
        .map(f64::exp)
        .collect()
}
