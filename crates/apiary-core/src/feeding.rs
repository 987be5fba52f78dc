//! Feeding outcomes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::Assessable;
use crate::kind::{EntityKind, FeedingStatus, Tier};
use crate::limits::{self, ValidationError};
use crate::profile::{
    tier_is_concern, tier_is_critical, Category, Floor, Override, Profile, Rule, Scale, Thresholds,
};

/// How quickly the colony took the feed, slowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumptionRate {
    #[serde(rename = "none")]
    Untouched,
    Slow,
    Moderate,
    Fast,
    VeryFast,
}

impl ConsumptionRate {
    pub const ALL: [ConsumptionRate; 5] =
        [Self::Untouched, Self::Slow, Self::Moderate, Self::Fast, Self::VeryFast];

    fn fraction(self) -> f64 {
        match self {
            Self::Untouched => 0.0,
            Self::Slow => 0.4,
            Self::Moderate => 0.7,
            Self::Fast => 0.9,
            Self::VeryFast => 1.0,
        }
    }

    fn is_rapid(self) -> bool {
        matches!(self, Self::Fast | Self::VeryFast)
    }
}

/// Colony behaviour around the feeder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeeResponse {
    Positive,
    Neutral,
    Negative,
    Aggressive,
}

impl BeeResponse {
    pub const ALL: [BeeResponse; 4] = [Self::Positive, Self::Neutral, Self::Negative, Self::Aggressive];

    fn fraction(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Neutral => 0.6,
            Self::Negative => 0.2,
            Self::Aggressive => 0.0,
        }
    }
}

/// What happened after a feeding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedingObservation {
    #[serde(default, deserialize_with = "crate::lenient::deserialize", skip_serializing_if = "Option::is_none")]
    pub consumption_rate: Option<ConsumptionRate>,

    #[serde(default, deserialize_with = "crate::lenient::deserialize", skip_serializing_if = "Option::is_none")]
    pub bee_response: Option<BeeResponse>,

    /// Beekeeper's rating, 1-10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effectiveness: Option<u8>,

    pub fed_at: DateTime<Utc>,
}

impl FeedingObservation {
    pub fn new(fed_at: DateTime<Utc>) -> Self {
        Self {
            consumption_rate: None,
            bee_response: None,
            effectiveness: None,
            fed_at,
        }
    }

    pub fn with_consumption(mut self, rate: ConsumptionRate) -> Self {
        self.consumption_rate = Some(rate);
        self
    }

    pub fn with_response(mut self, response: BeeResponse) -> Self {
        self.bee_response = Some(response);
        self
    }

    pub fn with_effectiveness(mut self, rating: u8) -> Self {
        self.effectiveness = Some(rating);
        self
    }
}

impl Assessable for FeedingObservation {
    type Status = FeedingStatus;

    fn profile() -> &'static Profile<Self> {
        &PROFILE
    }

    fn observed_at(&self) -> DateTime<Utc> {
        self.fed_at
    }

    fn validate(&self) -> Result<(), ValidationError> {
        match self.effectiveness {
            Some(rating) => limits::validate_effectiveness(rating),
            None => Ok(()),
        }
    }
}

pub static PROFILE: Profile<FeedingObservation> = Profile {
    kind: EntityKind::Feeding,
    scale: Scale::Normalized { max: 100 },
    categories: &[
        Category { name: "consumption_rate", points: 40.0, earned: consumption_points },
        Category { name: "bee_response", points: 30.0, earned: response_points },
        Category { name: "effectiveness", points: 30.0, earned: effectiveness_points },
    ],
    penalties: &[],
    overrides: &[
        Override { name: "feed_rejected", applies: feed_rejected, forces: Tier::Critical },
        Override { name: "aggressive_response", applies: aggressive, forces: Tier::Critical },
    ],
    floors: &[Floor { name: "negative_response", applies: negative, at_least: Tier::Concern }],
    thresholds: Thresholds::STANDARD,
    rules: &[
        Rule {
            name: "feed_rejected",
            applies: rule_feed_rejected,
            recommendations: &[
                "Check syrup concentration and freshness",
                "Verify feeder placement and access",
            ],
        },
        Rule {
            name: "slow_uptake",
            applies: rule_slow_uptake,
            recommendations: &["Move feeder closer to the cluster"],
        },
        Rule {
            name: "rapid_uptake",
            applies: rule_rapid_uptake,
            recommendations: &["Increase feeding amount", "Refill feeder within a week"],
        },
        Rule {
            name: "robbing_risk",
            applies: rule_robbing_risk,
            recommendations: &["Reduce entrance to prevent robbing", "Feed in the evening"],
        },
        Rule {
            name: "low_effectiveness",
            applies: rule_low_effectiveness,
            recommendations: &["Reconsider feed type"],
        },
        Rule {
            name: "status_failed",
            applies: tier_is_critical,
            recommendations: &["Review feeding within 3 days", "Consult expert beekeeper"],
        },
        Rule {
            name: "status_poor",
            applies: tier_is_concern,
            recommendations: &["Re-check feeder within 7 days"],
        },
    ],
    interval_cap,
};

fn consumption_points(o: &FeedingObservation) -> Option<f64> {
    o.consumption_rate.map(ConsumptionRate::fraction)
}

fn response_points(o: &FeedingObservation) -> Option<f64> {
    o.bee_response.map(BeeResponse::fraction)
}

fn effectiveness_points(o: &FeedingObservation) -> Option<f64> {
    o.effectiveness
        .map(|e| e.clamp(limits::MIN_EFFECTIVENESS, limits::MAX_EFFECTIVENESS) as f64 / 10.0)
}

fn feed_rejected(o: &FeedingObservation) -> bool {
    o.consumption_rate == Some(ConsumptionRate::Untouched)
}

fn aggressive(o: &FeedingObservation) -> bool {
    o.bee_response == Some(BeeResponse::Aggressive)
}

fn negative(o: &FeedingObservation) -> bool {
    o.bee_response == Some(BeeResponse::Negative)
}

fn rule_feed_rejected(o: &FeedingObservation, _: Tier) -> bool {
    feed_rejected(o)
}

fn rule_slow_uptake(o: &FeedingObservation, _: Tier) -> bool {
    o.consumption_rate == Some(ConsumptionRate::Slow)
}

fn rule_rapid_uptake(o: &FeedingObservation, _: Tier) -> bool {
    o.consumption_rate.is_some_and(ConsumptionRate::is_rapid)
}

fn rule_robbing_risk(o: &FeedingObservation, _: Tier) -> bool {
    negative(o) || aggressive(o)
}

fn rule_low_effectiveness(o: &FeedingObservation, _: Tier) -> bool {
    o.effectiveness.is_some_and(|e| e <= 3)
}

// Rapid uptake means the feeder runs dry within a week.
fn interval_cap(o: &FeedingObservation) -> Option<u32> {
    rule_rapid_uptake(o, Tier::Healthy).then_some(7)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{assess, compute_score};
    use crate::kind::RiskLevel;
    use chrono::{NaiveDate, TimeZone};

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 14, 18, 0, 0).unwrap()
    }

    #[test]
    fn test_good_feeding() {
        let obs = FeedingObservation::new(ts())
            .with_consumption(ConsumptionRate::Moderate)
            .with_response(BeeResponse::Positive)
            .with_effectiveness(8);
        let a = assess(&obs).unwrap().unwrap();
        // 28 + 30 + 24
        assert_eq!(a.score.value, 82);
        assert_eq!(a.status, FeedingStatus::Effective);
        assert_eq!(a.next_action_date, NaiveDate::from_ymd_opt(2024, 10, 5).unwrap());
    }

    #[test]
    fn test_rapid_uptake_caps_interval() {
        let obs = FeedingObservation::new(ts())
            .with_consumption(ConsumptionRate::VeryFast)
            .with_response(BeeResponse::Positive);
        let a = assess(&obs).unwrap().unwrap();
        assert_eq!(a.score.value, 100);
        assert_eq!(a.risk_level, RiskLevel::Low);
        assert_eq!(a.next_action_date, NaiveDate::from_ymd_opt(2024, 9, 21).unwrap());
        assert_eq!(
            a.recommendations,
            vec!["Increase feeding amount", "Refill feeder within a week"]
        );
    }

    #[test]
    fn test_rejected_feed_fails() {
        let obs = FeedingObservation::new(ts())
            .with_consumption(ConsumptionRate::Untouched)
            .with_response(BeeResponse::Neutral);
        let a = assess(&obs).unwrap().unwrap();
        assert_eq!(a.status, FeedingStatus::Failed);
        assert_eq!(a.risk_level, RiskLevel::Critical);
        assert_eq!(a.recommendations[0], "Check syrup concentration and freshness");
    }

    #[test]
    fn test_aggressive_overrides() {
        let obs = FeedingObservation::new(ts())
            .with_consumption(ConsumptionRate::Fast)
            .with_response(BeeResponse::Aggressive)
            .with_effectiveness(10);
        let a = assess(&obs).unwrap().unwrap();
        assert_eq!(a.status, FeedingStatus::Failed);
        assert!(a
            .recommendations
            .contains(&"Reduce entrance to prevent robbing".to_string()));
        // Rapid uptake caps at 7, but critical risk is already shorter.
        assert_eq!(a.next_action_date, NaiveDate::from_ymd_opt(2024, 9, 17).unwrap());
    }

    #[test]
    fn test_effectiveness_only() {
        let obs = FeedingObservation::new(ts()).with_effectiveness(5);
        assert_eq!(compute_score(&PROFILE, &obs).unwrap().value, 50);
    }

    #[test]
    fn test_nothing_recorded() {
        assert!(assess(&FeedingObservation::new(ts())).unwrap().is_none());
    }

    #[test]
    fn test_effectiveness_out_of_range() {
        let obs = FeedingObservation::new(ts()).with_effectiveness(11);
        assert!(assess(&obs).is_err());
        let obs = FeedingObservation::new(ts()).with_effectiveness(0);
        assert!(assess(&obs).is_err());
    }

    #[test]
    fn test_effectiveness_null_in_json() {
        let json = r#"{"consumption_rate": "slow", "effectiveness": null, "fed_at": "2024-09-14T18:00:00Z"}"#;
        let obs: FeedingObservation = serde_json::from_str(json).unwrap();
        assert_eq!(obs.consumption_rate, Some(ConsumptionRate::Slow));
        assert_eq!(obs.effectiveness, None);
    }
}
