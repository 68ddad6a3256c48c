//! Shared benchmark utilities.
//!
//! Wall-clock timing and the statistics used to summarise iteration
//! samples.

use std::time::{Duration, Instant};

/// Read the current time
#[inline(always)]
pub fn now() -> Instant {
    Instant::now()
}

/// Elapsed time since `start`
#[inline(always)]
pub fn elapsed(start: Instant) -> Duration {
    start.elapsed()
}

/// Arithmetic mean, `0.0` for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator)
pub fn calculate_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let variance: f64 = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / (values.len() - 1) as f64;

    variance.sqrt()
}

/// Two-sided 99.9% critical values of Student's t for 1..=30 degrees of
/// freedom.
const T_999: [f64; 30] = [
    636.619, 31.599, 12.924, 8.610, 6.869, 5.959, 5.408, 5.041, 4.781, 4.587, 4.437, 4.318,
    4.221, 4.140, 4.073, 4.015, 3.965, 3.922, 3.883, 3.850, 3.819, 3.792, 3.768, 3.745, 3.725,
    3.707, 3.690, 3.674, 3.659, 3.646,
];

/// Critical value of Student's t at 99.9% confidence.
///
/// Past the table, each bracket uses the value at its lower bound so the
/// error is never understated.
pub fn student_t_999(degrees_of_freedom: usize) -> f64 {
    match degrees_of_freedom {
        0 => f64::INFINITY,
        df if df <= T_999.len() => T_999[df - 1],
        df if df <= 40 => 3.646,
        df if df <= 60 => 3.551,
        df if df <= 120 => 3.460,
        _ => 3.373,
    }
}

/// Half-width of the 99.9% confidence interval of the mean.
///
/// Returns `0.0` when fewer than two samples exist.
pub fn confidence_half_width(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let sd = calculate_std_dev(values, mean(values));
    student_t_999(n - 1) * sd / (n as f64).sqrt()
}

/// Summary statistics of throughput samples
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub samples: usize,
    pub mean: f64,
    pub error: f64,
}

/// Compute the sample count, mean and 99.9% confidence error
pub fn compute_stats(values: &[f64]) -> Summary {
    Summary {
        samples: values.len(),
        mean: mean(values),
        error: confidence_half_width(values),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let m = mean(&values);
        assert_eq!(m, 5.0);
        let sd = calculate_std_dev(&values, m);
        assert!((sd - 2.138).abs() < 1e-3);
    }

    #[test]
    fn test_single_sample_has_zero_error() {
        let stats = compute_stats(&[10.0]);
        assert_eq!(stats.samples, 1);
        assert_eq!(stats.mean, 10.0);
        assert_eq!(stats.error, 0.0);
    }

    #[test]
    fn test_identical_samples_have_zero_error() {
        let stats = compute_stats(&[3.0, 3.0, 3.0]);
        assert_eq!(stats.error, 0.0);
        assert_eq!(stats.mean, 3.0);
    }

    #[test]
    fn test_empty_samples() {
        assert_eq!(
            compute_stats(&[]),
            Summary {
                samples: 0,
                mean: 0.0,
                error: 0.0
            }
        );
    }

    #[test]
    fn test_confidence_half_width() {
        // n = 2, sd = sqrt(2), t(1) = 636.619
        let hw = confidence_half_width(&[1.0, 3.0]);
        assert!((hw - 636.619).abs() < 1e-6);
    }

    #[test]
    fn test_t_brackets_use_lower_bound_value() {
        assert_eq!(student_t_999(30), 3.646);
        assert_eq!(student_t_999(31), 3.646);
        assert_eq!(student_t_999(40), 3.646);
        assert_eq!(student_t_999(41), 3.551);
        assert_eq!(student_t_999(60), 3.551);
        assert_eq!(student_t_999(61), 3.460);
        assert_eq!(student_t_999(120), 3.460);
        assert_eq!(student_t_999(121), 3.373);
        assert_eq!(student_t_999(10_000), 3.373);
        // never below the limiting normal value
        assert!(student_t_999(usize::MAX) > 3.291);
    }

    #[test]
    fn test_t_table_is_decreasing() {
        for df in 1..200 {
            assert!(student_t_999(df) >= student_t_999(df + 1));
        }
    }
}
