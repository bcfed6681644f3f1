//! Speed-class scales used to bucket observations along the speed axis.

use anyhow::{Result, ensure};
use tracing::warn;

/// Edges of the default fixed scale, in knots.
static DEFAULT_EDGES: [f64; 6] = [0.0, 5.0, 10.0, 15.0, 20.0, 25.0];

/// Labels of the default fixed scale. The last class is open-ended above the
/// final edge.
static DEFAULT_LABELS: [&str; 6] = [
    "0-5 knot",
    "6-10 knot",
    "11-15 knot",
    "16-20 knot",
    "20-25 knot",
    ">25 knot",
];

/// Number of classes a dynamic scale spans over the observed range.
const DYNAMIC_CLASSES: usize = 5;

/// How speed classes are derived for one aggregation run.
#[derive(Debug, Clone)]
pub enum SpeedScaleSpec {
    /// The default fixed knot bins.
    FixedDefault,
    /// Caller-supplied ascending edges; the last class is unbounded above the
    /// final edge.
    Edges { edges: Vec<f64>, labels: Vec<String> },
    /// Equal-width classes spanning the dataset's own speed range.
    Dynamic,
}

impl SpeedScaleSpec {
    /// Resolves the scale definition against the surviving speed values of
    /// the dataset.
    pub fn resolve(&self, speeds: &[f64]) -> Result<SpeedScale> {
        match self {
            SpeedScaleSpec::FixedDefault => SpeedScale::from_edges(
                DEFAULT_EDGES.to_vec(),
                DEFAULT_LABELS.iter().map(|label| label.to_string()).collect(),
            ),
            SpeedScaleSpec::Edges { edges, labels } => {
                SpeedScale::from_edges(edges.clone(), labels.clone())
            }
            SpeedScaleSpec::Dynamic => Ok(SpeedScale::dynamic(speeds)),
        }
    }
}

/// A resolved, ordered set of speed classes.
///
/// Classes are half-open intervals `(lo, hi]`, except the first class which
/// keeps its lower edge closed so a dead-calm observation at the scale's
/// minimum still counts. An open-ended scale has one extra class above its
/// final edge.
#[derive(Debug, Clone)]
pub struct SpeedScale {
    edges: Vec<f64>,
    labels: Vec<String>,
    open_ended: bool,
}

impl SpeedScale {
    /// Builds an open-ended scale from ascending edges. Each edge starts the
    /// interval of the label at the same position; the last label covers
    /// everything above the final edge.
    pub fn from_edges(edges: Vec<f64>, labels: Vec<String>) -> Result<SpeedScale> {
        ensure!(edges.len() >= 2, "a speed scale needs at least two edges");
        ensure!(
            edges.len() == labels.len(),
            "expected one label per class, got {} edges and {} labels",
            edges.len(),
            labels.len()
        );
        ensure!(
            edges.windows(2).all(|pair| pair[0] < pair[1]),
            "speed scale edges must be strictly ascending"
        );
        Ok(SpeedScale {
            edges,
            labels,
            open_ended: true,
        })
    }

    /// Builds equal-width classes spanning the observed speed range.
    ///
    /// A dataset with a single distinct speed (or a single observation)
    /// collapses to one class covering that value; an empty dataset gets a
    /// `0.0-0.0` placeholder so downstream tables stay well formed.
    pub fn dynamic(speeds: &[f64]) -> SpeedScale {
        let Some(&first) = speeds.first() else {
            warn!("no speed values for dynamic classes, using a 0.0-0.0 placeholder");
            return SpeedScale::collapsed(0.0);
        };

        let (mut min, mut max) = (first, first);
        for &speed in speeds {
            min = min.min(speed);
            max = max.max(speed);
        }

        if min == max {
            warn!(speed = min, "all observations share one speed, collapsing to a single class");
            return SpeedScale::collapsed(min);
        }

        let width = (max - min) / DYNAMIC_CLASSES as f64;
        let mut edges: Vec<f64> = (0..=DYNAMIC_CLASSES)
            .map(|i| min + width * i as f64)
            .collect();
        // Pin the last edge to the true maximum so the largest observation
        // always classifies despite accumulated rounding.
        edges[DYNAMIC_CLASSES] = max;

        let labels = edges
            .windows(2)
            .map(|pair| format!("{:.1}-{:.1}", pair[0], pair[1]))
            .collect();

        SpeedScale {
            edges,
            labels,
            open_ended: false,
        }
    }

    fn collapsed(value: f64) -> SpeedScale {
        SpeedScale {
            edges: vec![value, value],
            labels: vec![format!("{:.1}-{:.1}", value, value)],
            open_ended: false,
        }
    }

    /// Class labels in scale order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of classes in the scale.
    pub fn class_count(&self) -> usize {
        self.labels.len()
    }

    /// Index of the class containing `speed`, or `None` when the value falls
    /// outside a bounded scale.
    pub fn classify(&self, speed: f64) -> Option<usize> {
        if self.labels.len() == 1 {
            // collapsed scale: every observation shares the single class
            return Some(0);
        }
        if speed < self.edges[0] {
            return None;
        }
        let bounded = self.edges.len() - 1;
        for class in 0..bounded {
            if speed <= self.edges[class + 1] {
                return Some(class);
            }
        }
        if self.open_ended { Some(bounded) } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_scale() -> SpeedScale {
        SpeedScaleSpec::FixedDefault.resolve(&[]).unwrap()
    }

    #[test]
    fn test_default_scale_classify() {
        let scale = default_scale();
        assert_eq!(scale.class_count(), 6);
        // first class keeps its lower edge closed
        assert_eq!(scale.classify(0.0), Some(0));
        assert_eq!(scale.classify(3.0), Some(0));
        assert_eq!(scale.classify(5.0), Some(0));
        assert_eq!(scale.classify(5.1), Some(1));
        assert_eq!(scale.classify(12.0), Some(2));
        assert_eq!(scale.labels()[2], "11-15 knot");
        assert_eq!(scale.classify(25.0), Some(4));
        // open-ended top class
        assert_eq!(scale.classify(25.1), Some(5));
        assert_eq!(scale.classify(80.0), Some(5));
        assert_eq!(scale.labels()[5], ">25 knot");
    }

    #[test]
    fn test_dynamic_scale_five_classes() {
        let speeds = [0.0, 2.5, 5.0, 7.5, 10.0];
        let scale = SpeedScale::dynamic(&speeds);

        assert_eq!(scale.class_count(), 5);
        assert_eq!(scale.labels()[0], "0.0-2.0");
        assert_eq!(scale.labels()[4], "8.0-10.0");

        // every observed value classifies, including both range ends
        for speed in speeds {
            assert!(scale.classify(speed).is_some());
        }
        assert_eq!(scale.classify(10.0), Some(4));
        assert_eq!(scale.classify(10.5), None);
    }

    #[test]
    fn test_dynamic_scale_collapses_identical_speeds() {
        let scale = SpeedScale::dynamic(&[7.0, 7.0, 7.0]);
        assert_eq!(scale.class_count(), 1);
        assert_eq!(scale.labels()[0], "7.0-7.0");
        assert_eq!(scale.classify(7.0), Some(0));
    }

    #[test]
    fn test_dynamic_scale_empty_placeholder() {
        let scale = SpeedScale::dynamic(&[]);
        assert_eq!(scale.class_count(), 1);
        assert_eq!(scale.labels()[0], "0.0-0.0");
    }

    #[test]
    fn test_caller_supplied_edges() {
        let spec = SpeedScaleSpec::Edges {
            edges: vec![0.0, 10.0, 20.0],
            labels: vec![
                "0-10 m/s".to_string(),
                "10-20 m/s".to_string(),
                ">20 m/s".to_string(),
            ],
        };
        let scale = spec.resolve(&[]).unwrap();

        assert_eq!(scale.class_count(), 3);
        assert_eq!(scale.classify(0.0), Some(0));
        assert_eq!(scale.classify(15.0), Some(1));
        assert_eq!(scale.classify(21.0), Some(2));
    }

    #[test]
    fn test_from_edges_rejects_bad_input() {
        assert!(SpeedScale::from_edges(vec![0.0], vec!["calm".to_string()]).is_err());
        assert!(
            SpeedScale::from_edges(vec![0.0, 5.0, 5.0], vec![String::new(); 3]).is_err()
        );
        assert!(SpeedScale::from_edges(vec![0.0, 5.0], vec![String::new(); 3]).is_err());
    }
}
