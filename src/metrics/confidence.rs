//! Confidence Scoring
//!
//! Additive heuristic grading how much weight a metric deserves given the
//! data behind it. This is a scoring policy, not a statistical estimator -
//! treat the result as an indicator, never as a probability.

use serde::{Deserialize, Serialize};

use crate::model::SourceKind;

/// Data-volume tiers: (minimum points, awarded points). Checked in order.
pub const VOLUME_TIERS: &[(usize, f64)] = &[(1000, 40.0), (500, 30.0), (100, 20.0)];

/// Points awarded below the smallest volume tier.
pub const VOLUME_FLOOR: f64 = 10.0;

/// Time-span tiers: (minimum years, awarded points). Checked in order.
pub const SPAN_TIERS: &[(f64, f64)] = &[(3.0, 30.0), (2.0, 20.0), (1.0, 10.0)];

/// Points awarded below the smallest span tier.
pub const SPAN_FLOOR: f64 = 5.0;

/// Points per source quality.
pub const PRIMARY_SOURCE_POINTS: f64 = 30.0;
pub const SECONDARY_SOURCE_POINTS: f64 = 20.0;
pub const ESTIMATED_SOURCE_POINTS: f64 = 10.0;

/// Total-score thresholds for the discrete levels.
pub const HIGH_THRESHOLD: f64 = 80.0;
pub const MEDIUM_THRESHOLD: f64 = 60.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

/// Score with its three components broken out, mirroring the CAGR
/// breakdown's auditability.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ConfidenceScore {
    /// Data-volume component (max 40).
    pub volume_points: f64,

    /// Time-span component (max 30).
    pub span_points: f64,

    /// Source-quality component (max 30).
    pub source_points: f64,

    /// Sum of the three components, in [0, 100].
    pub total: f64,

    /// Discrete grade of the total.
    pub level: ConfidenceLevel,
}

/// Score a series by volume, span, and provenance.
pub fn calculate(data_points: usize, years: f64, source: SourceKind) -> ConfidenceScore {
    let volume_points = VOLUME_TIERS
        .iter()
        .find(|(min, _)| data_points >= *min)
        .map_or(VOLUME_FLOOR, |(_, pts)| *pts);

    let span_points = SPAN_TIERS
        .iter()
        .find(|(min, _)| years >= *min)
        .map_or(SPAN_FLOOR, |(_, pts)| *pts);

    let source_points = match source {
        SourceKind::Primary => PRIMARY_SOURCE_POINTS,
        SourceKind::Secondary => SECONDARY_SOURCE_POINTS,
        SourceKind::Estimated => ESTIMATED_SOURCE_POINTS,
    };

    let total = volume_points + span_points + source_points;
    let level = if total >= HIGH_THRESHOLD {
        ConfidenceLevel::High
    } else if total >= MEDIUM_THRESHOLD {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    };

    ConfidenceScore {
        volume_points,
        span_points,
        source_points,
        total,
        level,
    }
}
