//! Frame content readings and productivity scoring

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::Assessable;
use crate::kind::{EntityKind, FrameStatus, Tier};
use crate::limits::{self, ValidationError};
use crate::profile::{
    no_interval_cap, tier_is_concern, tier_is_critical, Category, Floor, Override, Penalty,
    Profile, Rule, Scale, Thresholds,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameType {
    Brood,
    Honey,
    Pollen,
    Mixed,
    Foundation,
}

impl FrameType {
    pub const ALL: [FrameType; 5] =
        [Self::Brood, Self::Honey, Self::Pollen, Self::Mixed, Self::Foundation];

    fn holds_brood(self) -> bool {
        matches!(self, Self::Brood | Self::Mixed)
    }

    fn holds_honey(self) -> bool {
        matches!(self, Self::Honey | Self::Mixed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaxCondition {
    New,
    Good,
    Fair,
    Old,
    Damaged,
}

impl WaxCondition {
    pub const ALL: [WaxCondition; 5] = [Self::New, Self::Good, Self::Fair, Self::Old, Self::Damaged];

    /// Points deducted from the productivity score
    pub fn deduction(self) -> f64 {
        match self {
            Self::New => 0.0,
            Self::Good => 5.0,
            Self::Fair => 15.0,
            Self::Old => 30.0,
            Self::Damaged => 50.0,
        }
    }
}

/// Brood pattern on a single frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FramePattern {
    Solid,
    Patchy,
    Spotty,
    #[serde(rename = "none")]
    NoBrood,
}

impl FramePattern {
    pub const ALL: [FramePattern; 4] = [Self::Solid, Self::Patchy, Self::Spotty, Self::NoBrood];

    fn fraction(self) -> f64 {
        match self {
            Self::Solid => 1.0,
            Self::Patchy => 0.7,
            Self::Spotty => 0.4,
            Self::NoBrood => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BroodContent {
    pub eggs: f64,
    pub larvae: f64,
    pub pupae: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoneyContent {
    pub capped: f64,
    pub uncapped: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollenContent {
    pub stored: f64,
}

/// Share of the frame surface, in percent, taken by each kind of content
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameContent {
    pub brood: BroodContent,
    pub honey: HoneyContent,
    pub pollen: PollenContent,
    pub empty: f64,
}

impl FrameContent {
    pub fn brood_total(&self) -> f64 {
        self.brood.eggs + self.brood.larvae + self.brood.pupae
    }

    pub fn honey_total(&self) -> f64 {
        self.honey.capped + self.honey.uncapped
    }

    /// Every percentage with its field name
    pub fn parts(&self) -> [(&'static str, f64); 7] {
        [
            ("brood.eggs", self.brood.eggs),
            ("brood.larvae", self.brood.larvae),
            ("brood.pupae", self.brood.pupae),
            ("honey.capped", self.honey.capped),
            ("honey.uncapped", self.honey.uncapped),
            ("pollen.stored", self.pollen.stored),
            ("empty", self.empty),
        ]
    }

    /// Each percentage is in range and together they fit on one frame
    pub fn validate(&self) -> Result<(), ValidationError> {
        let parts = self.parts();
        for (field, value) in parts {
            limits::validate_percentage(field, value)?;
        }
        let values: Vec<f64> = parts.iter().map(|(_, v)| *v).collect();
        limits::validate_content_total(&values)
    }
}

/// A content reading of one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameObservation {
    pub frame_type: FrameType,
    pub wax_condition: WaxCondition,
    #[serde(default, deserialize_with = "crate::lenient::deserialize", skip_serializing_if = "Option::is_none")]
    pub brood_pattern: Option<FramePattern>,
    /// `None` when no content was recorded; content categories then go unanswered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<FrameContent>,
    pub observed_at: DateTime<Utc>,
}

impl FrameObservation {
    pub fn new(frame_type: FrameType, wax_condition: WaxCondition, observed_at: DateTime<Utc>) -> Self {
        Self {
            frame_type,
            wax_condition,
            brood_pattern: None,
            content: None,
            observed_at,
        }
    }

    pub fn with_content(mut self, content: FrameContent) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_pattern(mut self, pattern: FramePattern) -> Self {
        self.brood_pattern = Some(pattern);
        self
    }
}

impl Assessable for FrameObservation {
    type Status = FrameStatus;

    fn profile() -> &'static Profile<Self> {
        &PROFILE
    }

    fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }

    fn validate(&self) -> Result<(), ValidationError> {
        match &self.content {
            Some(content) => content.validate(),
            None => Ok(()),
        }
    }
}

/// Productivity blend: 40% utilization, 30% brood quality, 30% honey, minus
/// wax wear. Categories that don't apply to the frame type are left out
/// without re-weighting the reported score; status is judged against what
/// the frame type can reach (see [`crate::engine::rating`]).
pub static PROFILE: Profile<FrameObservation> = Profile {
    kind: EntityKind::Frame,
    scale: Scale::Additive { max: 100 },
    categories: &[
        Category { name: "utilization", points: 40.0, earned: utilization },
        Category { name: "brood_quality", points: 30.0, earned: brood_quality },
        Category { name: "honey", points: 30.0, earned: honey_share },
    ],
    penalties: &[Penalty { name: "wax_condition", points: wax_deduction }],
    overrides: &[Override { name: "wax_damaged", applies: wax_damaged, forces: Tier::Critical }],
    floors: &[Floor { name: "spotty_brood", applies: spotty_brood, at_least: Tier::Concern }],
    thresholds: Thresholds::STANDARD,
    rules: &[
        Rule {
            name: "wax_worn",
            applies: rule_wax_worn,
            recommendations: &["Replace frame comb"],
        },
        Rule {
            name: "brood_spotty",
            applies: rule_brood_spotty,
            recommendations: &["Check queen laying quality"],
        },
        Rule {
            name: "ready_for_harvest",
            applies: rule_ready_for_harvest,
            recommendations: &["Frame ready for harvest"],
        },
        Rule {
            name: "honey_uncapped",
            applies: rule_honey_uncapped,
            recommendations: &["Leave frame until honey is capped"],
        },
        Rule {
            name: "mostly_empty",
            applies: rule_mostly_empty,
            recommendations: &[
                "Move frame toward the brood nest",
                "Consider removing to reduce hive volume",
            ],
        },
        Rule {
            name: "pollen_bound",
            applies: rule_pollen_bound,
            recommendations: &["Add empty comb to relieve pollen-bound frame"],
        },
        Rule {
            name: "status_critical",
            applies: tier_is_critical,
            recommendations: &["Inspect frame within 3 days", "Replace frame if comb cannot be salvaged"],
        },
        Rule {
            name: "status_low",
            applies: tier_is_concern,
            recommendations: &["Re-check frame at next inspection"],
        },
    ],
    interval_cap: no_interval_cap,
};

fn utilization(o: &FrameObservation) -> Option<f64> {
    o.content.map(|c| (100.0 - c.empty) / 100.0)
}

fn brood_quality(o: &FrameObservation) -> Option<f64> {
    if !o.frame_type.holds_brood() {
        return None;
    }
    o.brood_pattern.map(FramePattern::fraction)
}

fn honey_share(o: &FrameObservation) -> Option<f64> {
    if !o.frame_type.holds_honey() {
        return None;
    }
    o.content.map(|c| c.honey_total() / 100.0)
}

fn wax_deduction(o: &FrameObservation) -> f64 {
    o.wax_condition.deduction()
}

fn wax_damaged(o: &FrameObservation) -> bool {
    o.wax_condition == WaxCondition::Damaged
}

fn spotty_brood(o: &FrameObservation) -> bool {
    o.frame_type.holds_brood() && o.brood_pattern == Some(FramePattern::Spotty)
}

fn rule_wax_worn(o: &FrameObservation, _: Tier) -> bool {
    matches!(o.wax_condition, WaxCondition::Old | WaxCondition::Damaged)
}

fn rule_brood_spotty(o: &FrameObservation, _: Tier) -> bool {
    o.frame_type.holds_brood()
        && matches!(o.brood_pattern, Some(FramePattern::Spotty | FramePattern::NoBrood))
}

fn rule_ready_for_harvest(o: &FrameObservation, _: Tier) -> bool {
    o.frame_type.holds_honey() && o.content.is_some_and(|c| c.honey.capped >= 80.0)
}

fn rule_honey_uncapped(o: &FrameObservation, _: Tier) -> bool {
    o.frame_type.holds_honey() && o.content.is_some_and(|c| c.honey.uncapped > c.honey.capped)
}

fn rule_mostly_empty(o: &FrameObservation, _: Tier) -> bool {
    o.content.is_some_and(|c| c.empty >= 70.0)
}

fn rule_pollen_bound(o: &FrameObservation, _: Tier) -> bool {
    o.content.is_some_and(|c| c.pollen.stored >= 50.0)
}
