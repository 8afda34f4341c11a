//! Air-quality severity bands and sample aggregation.

use serde::{Deserialize, Serialize};

/// Discrete severity band derived from an air-quality scalar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AqiBand {
    Green,
    Yellow,
    Orange,
    Blue,
    Red,
    /// No reading available.
    #[default]
    Gray,
}

impl AqiBand {
    pub fn from_aqi(aqi: Option<f64>) -> Self {
        match aqi {
            None => Self::Gray,
            Some(v) if v <= 50.0 => Self::Green,
            Some(v) if v <= 100.0 => Self::Yellow,
            Some(v) if v <= 150.0 => Self::Orange,
            Some(v) if v <= 200.0 => Self::Blue,
            Some(_) => Self::Red,
        }
    }

    /// Map display color for this band.
    pub fn hex(&self) -> &'static str {
        match self {
            Self::Green => "#22c55e",
            Self::Yellow => "#eab308",
            Self::Orange => "#f97316",
            Self::Blue => "#3b82f6",
            Self::Red => "#ef4444",
            Self::Gray => "#9ca3af",
        }
    }
}

/// Aggregate over the air-quality samples that succeeded along a path.
///
/// Failed lookups are simply excluded; `avg`/`max` are `None` only when no
/// sample succeeded at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QualitySummary {
    pub avg: Option<f64>,
    pub max: Option<f64>,
    pub samples_used: usize,
}

impl QualitySummary {
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let mut sum = 0.0;
        let mut max: Option<f64> = None;
        let mut count = 0usize;
        for v in values {
            sum += v;
            max = Some(max.map_or(v, |m: f64| m.max(v)));
            count += 1;
        }
        if count == 0 {
            return Self::default();
        }
        Self {
            avg: Some(sum / count as f64),
            max,
            samples_used: count,
        }
    }

    /// The more pessimistic aggregate, preferring the maximum when present.
    pub fn worst(&self) -> Option<f64> {
        self.max.or(self.avg)
    }
}
