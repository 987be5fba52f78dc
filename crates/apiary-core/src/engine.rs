//! The assessment engine
//!
//! Four chained stages turn an observation into an [`Assessment`]:
//! score, classify, derive risk and recommendations, schedule. Every stage is
//! a pure function of its inputs and the kind's [`Profile`]; nothing reads
//! back from a later stage.

use chrono::{DateTime, Utc};

use crate::assessment::{Assessment, Score};
use crate::error::Result;
use crate::kind::{RiskLevel, Status, Tier};
use crate::limits::ValidationError;
use crate::profile::{Profile, Scale};
use crate::schedule;

/// Appended when a kind's rules leave an alerting tier without advice
pub const FALLBACK_ESCALATION: &str = "Schedule a follow-up check";

/// An observation the engine knows how to assess
pub trait Assessable: Sized + 'static {
    /// Status vocabulary for this kind
    type Status: Status;

    /// Configuration driving every engine stage
    fn profile() -> &'static Profile<Self>;

    /// When the observation was taken
    fn observed_at(&self) -> DateTime<Utc>;

    /// Reject observations that break input invariants
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        Ok(())
    }
}

/// Score an observation, or `None` when no category is answered
pub fn compute_score<O: 'static>(profile: &Profile<O>, observation: &O) -> Option<Score> {
    let mut earned = 0.0;
    let mut achievable = 0.0;

    for category in profile.categories {
        if let Some(fraction) = (category.earned)(observation) {
            let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
            earned += category.points * fraction;
            achievable += category.points;
        }
    }

    if achievable <= 0.0 {
        tracing::debug!(kind = %profile.kind, "No answered categories");
        return None;
    }

    let raw = match profile.scale {
        Scale::Normalized { max } => earned / achievable * max as f64,
        Scale::Additive { .. } => earned,
    };
    let penalty: f64 = profile
        .penalties
        .iter()
        .map(|p| (p.points)(observation).max(0.0))
        .sum();

    let score = Score::clamped(raw - penalty, profile.scale.max());
    tracing::trace!(kind = %profile.kind, raw, penalty, score = %score, "Computed score");
    Some(score)
}

/// The score measured against what this observation can actually reach
///
/// Additive profiles drop categories that don't apply without re-weighting,
/// so an observation may top out below the scale maximum. Thresholds and
/// risk read this rating; the reported score stays as computed.
pub fn rating<O: 'static>(profile: &Profile<O>, score: Score, observation: &O) -> Score {
    if let Scale::Normalized { .. } = profile.scale {
        return score;
    }
    let reachable: f64 = profile
        .categories
        .iter()
        .filter(|c| (c.earned)(observation).is_some())
        .map(|c| c.points)
        .sum();
    let max = profile.scale.max();
    if reachable <= 0.0 || reachable >= max as f64 {
        return score;
    }
    Score::clamped(score.value as f64 * max as f64 / reachable, max)
}

/// Classify a scored observation
///
/// Overrides are checked first and win outright; only when none applies do
/// the score thresholds decide, after which floors may lift the tier.
pub fn classify<O: 'static>(profile: &Profile<O>, score: Score, observation: &O) -> Tier {
    if let Some(o) = profile.overrides.iter().find(|o| (o.applies)(observation)) {
        tracing::info!(kind = %profile.kind, rule = o.name, tier = ?o.forces, "Override applied");
        return o.forces;
    }

    let mut tier = profile
        .thresholds
        .tier_for(rating(profile, score, observation).percent());
    for floor in profile.floors {
        if tier < floor.at_least && (floor.applies)(observation) {
            tracing::debug!(kind = %profile.kind, rule = floor.name, "Tier lifted");
            tier = floor.at_least;
        }
    }
    tier
}

/// Risk level for a tier, escalated further by very low scores
pub fn derive_risk(tier: Tier, score: Score) -> RiskLevel {
    let risk = RiskLevel::from(tier);
    let percent = score.percent();
    if percent < 30.0 {
        RiskLevel::Critical
    } else if percent < 50.0 {
        risk.max(RiskLevel::High)
    } else {
        risk
    }
}

/// Evaluate the kind's rules in order and collect their recommendations
pub fn generate_recommendations<O: 'static>(profile: &Profile<O>, observation: &O, tier: Tier) -> Vec<String> {
    let mut recommendations: Vec<String> = profile
        .rules
        .iter()
        .filter_map(|rule| rule.evaluate(observation, tier))
        .flatten()
        .map(|r| r.to_string())
        .collect();

    if recommendations.is_empty() && tier.needs_attention() {
        tracing::warn!(kind = %profile.kind, ?tier, "No rule produced an escalation");
        recommendations.push(FALLBACK_ESCALATION.to_string());
    }
    recommendations
}

/// Run every stage on one observation
///
/// Returns `Ok(None)` when the observation has nothing to score; callers
/// must treat that as "not yet assessed", not as a zero score.
pub fn assess<O: Assessable>(observation: &O) -> Result<Option<Assessment<O::Status>>> {
    observation.validate()?;
    let profile = O::profile();

    let Some(score) = compute_score(profile, observation) else {
        return Ok(None);
    };
    let tier = classify(profile, score, observation);
    let risk_level = derive_risk(tier, rating(profile, score, observation));
    let recommendations = generate_recommendations(profile, observation, tier);
    let next_action_date = schedule::next_action_date(
        observation.observed_at(),
        risk_level,
        (profile.interval_cap)(observation),
    )?;

    tracing::debug!(
        kind = %profile.kind,
        score = %score,
        ?tier,
        risk = %risk_level,
        next = %next_action_date,
        "Assessed observation"
    );

    Ok(Some(Assessment {
        kind: profile.kind,
        score,
        status: O::Status::from(tier),
        tier,
        risk_level,
        recommendations,
        next_action_date,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{EntityKind, HiveStatus};
    use crate::profile::{Category, Floor, Override, Penalty, Rule, Thresholds};
    use chrono::TimeZone;

    // Minimal observation: two optional levels and a flag.
    struct Sample {
        a: Option<f64>,
        b: Option<f64>,
        broken: bool,
        sick: bool,
        penalty: f64,
    }

    fn sample(a: Option<f64>, b: Option<f64>) -> Sample {
        Sample {
            a,
            b,
            broken: false,
            sick: false,
            penalty: 0.0,
        }
    }

    fn a(p: &Sample) -> Option<f64> {
        p.a
    }
    fn b(p: &Sample) -> Option<f64> {
        p.b
    }
    fn penalty(p: &Sample) -> f64 {
        p.penalty
    }
    fn broken(p: &Sample) -> bool {
        p.broken
    }
    fn sick(p: &Sample) -> bool {
        p.sick
    }
    fn sick_rule(p: &Sample, _: Tier) -> bool {
        p.sick
    }
    fn no_cap(_: &Sample) -> Option<u32> {
        None
    }

    static SAMPLE: Profile<Sample> = Profile {
        kind: EntityKind::Hive,
        scale: Scale::Normalized { max: 100 },
        categories: &[
            Category { name: "a", points: 60.0, earned: a },
            Category { name: "b", points: 40.0, earned: b },
        ],
        penalties: &[Penalty { name: "flat", points: penalty }],
        overrides: &[Override { name: "broken", applies: broken, forces: Tier::Critical }],
        floors: &[Floor { name: "sick", applies: sick, at_least: Tier::Concern }],
        thresholds: Thresholds::STANDARD,
        rules: &[Rule {
            name: "sick",
            applies: sick_rule,
            recommendations: &["Treat"],
        }],
        interval_cap: no_cap,
    };

    static ADDITIVE: Profile<Sample> = Profile {
        kind: EntityKind::Frame,
        scale: Scale::Additive { max: 100 },
        categories: &[
            Category { name: "a", points: 60.0, earned: a },
            Category { name: "b", points: 40.0, earned: b },
        ],
        penalties: &[],
        overrides: &[],
        floors: &[],
        thresholds: Thresholds::STANDARD,
        rules: &[],
        interval_cap: no_cap,
    };

    impl Assessable for Sample {
        type Status = HiveStatus;

        fn profile() -> &'static Profile<Self> {
            &SAMPLE
        }

        fn observed_at(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
        }
    }

    #[test]
    fn test_normalizes_over_answered_categories() {
        let score = compute_score(&SAMPLE, &sample(Some(0.5), None)).unwrap();
        assert_eq!(score.value, 50);
        let score = compute_score(&SAMPLE, &sample(Some(1.0), Some(0.5))).unwrap();
        assert_eq!(score.value, 80);
    }

    #[test]
    fn test_no_answers_is_no_score() {
        assert_eq!(compute_score(&SAMPLE, &sample(None, None)), None);
        assert!(assess(&sample(None, None)).unwrap().is_none());
    }

    #[test]
    fn test_penalty_never_goes_negative() {
        let mut p = sample(Some(0.1), None);
        p.penalty = 50.0;
        assert_eq!(compute_score(&SAMPLE, &p).unwrap().value, 0);
    }

    #[test]
    fn test_override_beats_perfect_score() {
        let mut p = sample(Some(1.0), Some(1.0));
        p.broken = true;
        let score = compute_score(&SAMPLE, &p).unwrap();
        assert_eq!(score.value, 100);
        assert_eq!(classify(&SAMPLE, score, &p), Tier::Critical);
    }

    #[test]
    fn test_floor_lifts_but_never_lowers() {
        let mut p = sample(Some(1.0), Some(1.0));
        p.sick = true;
        let score = compute_score(&SAMPLE, &p).unwrap();
        assert_eq!(classify(&SAMPLE, score, &p), Tier::Concern);

        let low = Score { value: 10, max: 100 };
        assert_eq!(classify(&SAMPLE, low, &p), Tier::Critical);
    }

    #[test]
    fn test_rating_uses_reachable_points() {
        // b does not apply: 48 of a reachable 60
        let p = sample(Some(0.8), None);
        let score = compute_score(&ADDITIVE, &p).unwrap();
        assert_eq!(score.value, 48);
        assert_eq!(rating(&ADDITIVE, score, &p).value, 80);
        assert_eq!(classify(&ADDITIVE, score, &p), Tier::Healthy);

        let full = sample(Some(0.8), Some(0.5));
        let score = compute_score(&ADDITIVE, &full).unwrap();
        assert_eq!(rating(&ADDITIVE, score, &full), score);

        // Normalized scores are already relative to what was answered
        let score = compute_score(&SAMPLE, &p).unwrap();
        assert_eq!(rating(&SAMPLE, score, &p), score);
    }

    #[test]
    fn test_derive_risk_tie_break() {
        let s = |value| Score { value, max: 100 };
        assert_eq!(derive_risk(Tier::Healthy, s(95)), RiskLevel::Low);
        assert_eq!(derive_risk(Tier::Watch, s(70)), RiskLevel::Medium);
        assert_eq!(derive_risk(Tier::Concern, s(45)), RiskLevel::High);
        assert_eq!(derive_risk(Tier::Healthy, s(45)), RiskLevel::High);
        assert_eq!(derive_risk(Tier::Watch, s(29)), RiskLevel::Critical);
        assert_eq!(derive_risk(Tier::Critical, s(90)), RiskLevel::Critical);
    }

    #[test]
    fn test_fallback_escalation() {
        let p = sample(Some(0.1), None);
        let recs = generate_recommendations(&SAMPLE, &p, Tier::Critical);
        assert_eq!(recs, vec![FALLBACK_ESCALATION.to_string()]);
        assert!(generate_recommendations(&SAMPLE, &p, Tier::Healthy).is_empty());
    }

    #[test]
    fn test_assess_end_to_end() {
        let mut p = sample(Some(1.0), Some(1.0));
        p.sick = true;
        let assessment = assess(&p).unwrap().unwrap();
        assert_eq!(assessment.status, HiveStatus::Warning);
        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert_eq!(assessment.recommendations, vec!["Treat".to_string()]);
        assert_eq!(
            assessment.next_action_date,
            chrono::NaiveDate::from_ymd_opt(2024, 6, 8).unwrap()
        );
    }
}
