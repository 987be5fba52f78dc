//! Assessment output and dashboard summaries

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::kind::{EntityKind, RiskLevel, Status, Tier};

/// A numeric score on a fixed scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub value: u8,
    pub max: u8,
}

impl Score {
    /// Build a score, clamping `raw` to `[0, max]` and rounding
    pub fn clamped(raw: f64, max: u8) -> Self {
        let value = if raw.is_nan() {
            0.0
        } else {
            raw.round().clamp(0.0, max as f64)
        };
        Self {
            value: value as u8,
            max,
        }
    }

    /// Score as a percentage of its scale
    pub fn percent(&self) -> f64 {
        if self.max == 0 {
            return 0.0;
        }
        self.value as f64 * 100.0 / self.max as f64
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.value, self.max)
    }
}

/// The derived result of assessing one observation
///
/// Always recomputed in full from the observation; stored as plain data by
/// the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment<S> {
    pub kind: EntityKind,
    pub score: Score,
    pub status: S,
    pub tier: Tier,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<String>,
    pub next_action_date: NaiveDate,
}

impl<S: Status> Assessment<S> {
    /// Whether the dashboard should alert on this assessment
    pub fn needs_attention(&self) -> bool {
        self.tier.needs_attention()
    }
}

/// Aggregate view over many assessments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub not_assessed: usize,
    pub needs_attention: usize,
    pub by_risk: BTreeMap<RiskLevel, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earliest_next_action: Option<NaiveDate>,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one result; `None` counts as not assessed
    pub fn record<S: Status>(&mut self, assessment: Option<&Assessment<S>>) {
        self.total += 1;
        let Some(a) = assessment else {
            self.not_assessed += 1;
            return;
        };
        if a.needs_attention() {
            self.needs_attention += 1;
        }
        *self.by_risk.entry(a.risk_level).or_insert(0) += 1;
        self.earliest_next_action = match self.earliest_next_action {
            Some(d) if d <= a.next_action_date => Some(d),
            _ => Some(a.next_action_date),
        };
    }

    /// Fold another summary into this one
    pub fn merge(&mut self, other: &Summary) {
        self.total += other.total;
        self.not_assessed += other.not_assessed;
        self.needs_attention += other.needs_attention;
        for (risk, count) in &other.by_risk {
            *self.by_risk.entry(*risk).or_insert(0) += count;
        }
        self.earliest_next_action = match (self.earliest_next_action, other.earliest_next_action) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
    }

    pub fn count(&self, risk: RiskLevel) -> usize {
        self.by_risk.get(&risk).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::HiveStatus;

    fn sample(tier: Tier, day: u32) -> Assessment<HiveStatus> {
        Assessment {
            kind: EntityKind::Hive,
            score: Score { value: 20, max: 40 },
            status: HiveStatus::from(tier),
            tier,
            risk_level: RiskLevel::from(tier),
            recommendations: Vec::new(),
            next_action_date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
        }
    }

    #[test]
    fn test_score_clamped() {
        assert_eq!(Score::clamped(-12.0, 100).value, 0);
        assert_eq!(Score::clamped(140.0, 100).value, 100);
        assert_eq!(Score::clamped(86.6, 100).value, 87);
        assert_eq!(Score::clamped(45.0, 40).value, 40);
        assert_eq!(Score::clamped(f64::NAN, 40).value, 0);
    }

    #[test]
    fn test_score_percent() {
        assert_eq!(Score { value: 20, max: 40 }.percent(), 50.0);
        assert_eq!(Score { value: 87, max: 100 }.percent(), 87.0);
        assert_eq!(Score { value: 0, max: 0 }.percent(), 0.0);
    }

    #[test]
    fn test_summary() {
        let mut summary = Summary::new();
        summary.record(Some(&sample(Tier::Healthy, 20)));
        summary.record(Some(&sample(Tier::Critical, 4)));
        summary.record(Some(&sample(Tier::Concern, 9)));
        summary.record::<HiveStatus>(None);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.not_assessed, 1);
        assert_eq!(summary.needs_attention, 2);
        assert_eq!(summary.count(RiskLevel::Critical), 1);
        assert_eq!(summary.count(RiskLevel::Medium), 0);
        assert_eq!(
            summary.earliest_next_action,
            NaiveDate::from_ymd_opt(2024, 5, 4)
        );
    }

    #[test]
    fn test_summary_merge() {
        let mut left = Summary::new();
        left.record(Some(&sample(Tier::Watch, 12)));
        let mut right = Summary::new();
        right.record(Some(&sample(Tier::Watch, 7)));
        right.record::<HiveStatus>(None);

        left.merge(&right);
        assert_eq!(left.total, 3);
        assert_eq!(left.not_assessed, 1);
        assert_eq!(left.count(RiskLevel::Medium), 2);
        assert_eq!(left.earliest_next_action, NaiveDate::from_ymd_opt(2024, 5, 7));

        let mut empty = Summary::new();
        empty.merge(&left);
        assert_eq!(empty, left);
    }
}
