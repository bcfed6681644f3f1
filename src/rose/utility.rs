use crate::rose::types::SpeedSummary;

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Computes the population standard deviation given a pre-computed mean.
/// Returns 0.0 for empty input.
pub fn stddev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;

    variance.sqrt()
}

/// Descriptive statistics over a set of speed values. All fields are 0 for
/// empty input.
pub fn summarize_speeds(speeds: &[f64]) -> SpeedSummary {
    if speeds.is_empty() {
        return SpeedSummary {
            count: 0,
            mean: 0.0,
            std_dev: 0.0,
            min: 0.0,
            max: 0.0,
        };
    }

    let average = mean(speeds);
    let (mut min, mut max) = (speeds[0], speeds[0]);
    for &speed in speeds {
        min = min.min(speed);
        max = max.max(speed);
    }

    SpeedSummary {
        count: speeds.len(),
        mean: average,
        std_dev: stddev(speeds, average),
        min,
        max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_speeds() {
        let summary = summarize_speeds(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(summary.count, 5);
        assert_eq!(summary.mean, 3.0);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 5.0);
        assert!((summary.std_dev - std::f64::consts::SQRT_2).abs() < 0.001);
    }

    #[test]
    fn test_summarize_speeds_empty() {
        let summary = summarize_speeds(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.mean, 0.0);
        assert_eq!(summary.max, 0.0);
    }
}
