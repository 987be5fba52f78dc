//! Colony inspection observations
//!
//! Five weighted categories (queen presence 25, queen laying 25, brood
//! pattern 20, population 15, food stores 15) normalized over whatever was
//! answered, minus flat penalties for diseases and pests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::Assessable;
use crate::kind::{EntityKind, InspectionStatus, Tier};
use crate::limits::{self, ValidationError};
use crate::profile::{
    capped, tier_is_concern, tier_is_critical, Category, Floor, Override, Penalty, Profile, Rule,
    Scale, Thresholds,
};

/// Was the queen seen during the inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueenPresence {
    Yes,
    No,
    NotSeen,
    Unknown,
}

impl QueenPresence {
    pub const ALL: [QueenPresence; 4] = [Self::Yes, Self::No, Self::NotSeen, Self::Unknown];

    fn fraction(self) -> Option<f64> {
        match self {
            Self::Yes => Some(1.0),
            Self::NotSeen => Some(0.6),
            Self::No => Some(0.0),
            Self::Unknown => None,
        }
    }
}

/// Is the queen laying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueenLaying {
    Yes,
    No,
    Poor,
    Unknown,
}

impl QueenLaying {
    pub const ALL: [QueenLaying; 4] = [Self::Yes, Self::No, Self::Poor, Self::Unknown];

    fn fraction(self) -> Option<f64> {
        match self {
            Self::Yes => Some(1.0),
            Self::Poor => Some(0.5),
            Self::No => Some(0.0),
            Self::Unknown => None,
        }
    }
}

/// Brood pattern quality, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BroodPattern {
    Excellent,
    Good,
    Fair,
    Poor,
    #[serde(rename = "none")]
    NoBrood,
}

impl BroodPattern {
    pub const ALL: [BroodPattern; 5] =
        [Self::Excellent, Self::Good, Self::Fair, Self::Poor, Self::NoBrood];

    fn fraction(self) -> f64 {
        match self {
            Self::Excellent => 1.0,
            Self::Good => 0.8,
            Self::Fair => 0.6,
            Self::Poor => 0.3,
            Self::NoBrood => 0.0,
        }
    }
}

/// Population strength, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopulationStrength {
    VeryStrong,
    Strong,
    Moderate,
    Weak,
    VeryWeak,
}

impl PopulationStrength {
    pub const ALL: [PopulationStrength; 5] =
        [Self::VeryStrong, Self::Strong, Self::Moderate, Self::Weak, Self::VeryWeak];

    fn fraction(self) -> f64 {
        match self {
            Self::VeryStrong => 1.0,
            Self::Strong => 0.8,
            Self::Moderate => 0.6,
            Self::Weak => 0.3,
            Self::VeryWeak => 0.1,
        }
    }
}

/// Food stores in the hive, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodStores {
    Abundant,
    Adequate,
    Low,
    Critical,
    #[serde(rename = "none")]
    Empty,
}

impl FoodStores {
    pub const ALL: [FoodStores; 5] =
        [Self::Abundant, Self::Adequate, Self::Low, Self::Critical, Self::Empty];

    fn fraction(self) -> f64 {
        match self {
            Self::Abundant => 1.0,
            Self::Adequate => 0.8,
            Self::Low => 0.4,
            Self::Critical => 0.1,
            Self::Empty => 0.0,
        }
    }
}

/// Purpose of the inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InspectionType {
    #[default]
    Routine,
    DiseaseCheck,
    Harvest,
    Feeding,
    Treatment,
    Emergency,
}

impl InspectionType {
    pub const ALL: [InspectionType; 6] = [
        Self::Routine,
        Self::DiseaseCheck,
        Self::Harvest,
        Self::Feeding,
        Self::Treatment,
        Self::Emergency,
    ];

    /// Longest allowed gap before the follow-up, in days
    pub fn interval_cap(self) -> Option<u32> {
        match self {
            Self::DiseaseCheck => Some(7),
            Self::Treatment => Some(5),
            Self::Emergency => Some(3),
            Self::Routine | Self::Harvest | Self::Feeding => None,
        }
    }
}

/// Findings from one colony inspection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionObservation {
    #[serde(default, deserialize_with = "crate::lenient::deserialize", skip_serializing_if = "Option::is_none")]
    pub queen_present: Option<QueenPresence>,

    #[serde(default, deserialize_with = "crate::lenient::deserialize", skip_serializing_if = "Option::is_none")]
    pub queen_laying: Option<QueenLaying>,

    #[serde(default, deserialize_with = "crate::lenient::deserialize", skip_serializing_if = "Option::is_none")]
    pub brood_pattern: Option<BroodPattern>,

    #[serde(default, deserialize_with = "crate::lenient::deserialize", skip_serializing_if = "Option::is_none")]
    pub population_strength: Option<PopulationStrength>,

    #[serde(default, deserialize_with = "crate::lenient::deserialize", skip_serializing_if = "Option::is_none")]
    pub food_stores: Option<FoodStores>,

    #[serde(default)]
    pub diseases: Vec<String>,

    #[serde(default)]
    pub pests: Vec<String>,

    #[serde(default)]
    pub inspection_type: InspectionType,

    pub inspected_at: DateTime<Utc>,
}

impl InspectionObservation {
    /// Create an empty routine inspection
    pub fn new(inspected_at: DateTime<Utc>) -> Self {
        Self {
            queen_present: None,
            queen_laying: None,
            brood_pattern: None,
            population_strength: None,
            food_stores: None,
            diseases: Vec::new(),
            pests: Vec::new(),
            inspection_type: InspectionType::Routine,
            inspected_at,
        }
    }

    pub fn with_queen(mut self, present: QueenPresence, laying: QueenLaying) -> Self {
        self.queen_present = Some(present);
        self.queen_laying = Some(laying);
        self
    }

    pub fn with_brood(mut self, pattern: BroodPattern) -> Self {
        self.brood_pattern = Some(pattern);
        self
    }

    pub fn with_population(mut self, strength: PopulationStrength) -> Self {
        self.population_strength = Some(strength);
        self
    }

    pub fn with_food(mut self, stores: FoodStores) -> Self {
        self.food_stores = Some(stores);
        self
    }

    pub fn with_disease(mut self, disease: impl Into<String>) -> Self {
        self.diseases.push(disease.into());
        self
    }

    pub fn with_pest(mut self, pest: impl Into<String>) -> Self {
        self.pests.push(pest.into());
        self
    }

    pub fn with_type(mut self, inspection_type: InspectionType) -> Self {
        self.inspection_type = inspection_type;
        self
    }

    fn disease_count(&self) -> usize {
        limits::distinct_findings(&self.diseases)
    }

    fn pest_count(&self) -> usize {
        limits::distinct_findings(&self.pests)
    }
}

impl Assessable for InspectionObservation {
    type Status = InspectionStatus;

    fn profile() -> &'static Profile<Self> {
        &PROFILE
    }

    fn observed_at(&self) -> DateTime<Utc> {
        self.inspected_at
    }

    fn validate(&self) -> Result<(), ValidationError> {
        limits::validate_findings("diseases", &self.diseases)?;
        limits::validate_findings("pests", &self.pests)
    }
}

pub static PROFILE: Profile<InspectionObservation> = Profile {
    kind: EntityKind::Inspection,
    scale: Scale::Normalized { max: 100 },
    categories: &[
        Category { name: "queen_present", points: 25.0, earned: queen_present_points },
        Category { name: "queen_laying", points: 25.0, earned: queen_laying_points },
        Category { name: "brood_pattern", points: 20.0, earned: brood_points },
        Category { name: "population_strength", points: 15.0, earned: population_points },
        Category { name: "food_stores", points: 15.0, earned: food_points },
    ],
    penalties: &[
        Penalty { name: "diseases", points: disease_penalty },
        Penalty { name: "pests", points: pest_penalty },
    ],
    overrides: &[
        Override { name: "queen_absent", applies: queen_absent, forces: Tier::Critical },
        Override { name: "food_exhausted", applies: food_exhausted, forces: Tier::Critical },
    ],
    floors: &[Floor { name: "findings_present", applies: findings_present, at_least: Tier::Concern }],
    thresholds: Thresholds::STANDARD,
    rules: &[
        Rule {
            name: "queen_absent",
            applies: rule_queen_absent,
            recommendations: &["Introduce new queen", "Investigate queen loss"],
        },
        Rule {
            name: "queen_not_seen",
            applies: rule_queen_not_seen,
            recommendations: &["Look for eggs to confirm queen presence"],
        },
        Rule {
            name: "laying_poor",
            applies: rule_laying_poor,
            recommendations: &["Monitor laying pattern", "Inspect queen condition"],
        },
        Rule {
            name: "laying_stopped",
            applies: rule_laying_stopped,
            recommendations: &["Check for a drone-laying queen", "Prepare to requeen"],
        },
        Rule {
            name: "brood_failing",
            applies: rule_brood_failing,
            recommendations: &["Check brood for disease"],
        },
        Rule {
            name: "population_weak",
            applies: rule_population_weak,
            recommendations: &["Strengthen colony", "Reduce hive volume", "Increase feeding"],
        },
        Rule {
            name: "food_low",
            applies: rule_food_low,
            recommendations: &["Emergency sugar-syrup feeding", "Add protein patty"],
        },
        Rule {
            name: "diseases_found",
            applies: rule_diseases_found,
            recommendations: &["Begin treatment", "Consider isolation", "Disinfect tools"],
        },
        Rule {
            name: "pests_found",
            applies: rule_pests_found,
            recommendations: &["Apply pest control", "Monitor pest levels"],
        },
        Rule {
            name: "status_critical",
            applies: tier_is_critical,
            recommendations: &["Inspect within 3 days", "Consult expert beekeeper"],
        },
        Rule {
            name: "status_concern",
            applies: tier_is_concern,
            recommendations: &["Re-inspect within 7 days"],
        },
    ],
    interval_cap,
};

fn queen_present_points(o: &InspectionObservation) -> Option<f64> {
    o.queen_present.and_then(QueenPresence::fraction)
}

fn queen_laying_points(o: &InspectionObservation) -> Option<f64> {
    o.queen_laying.and_then(QueenLaying::fraction)
}

fn brood_points(o: &InspectionObservation) -> Option<f64> {
    o.brood_pattern.map(BroodPattern::fraction)
}

fn population_points(o: &InspectionObservation) -> Option<f64> {
    o.population_strength.map(PopulationStrength::fraction)
}

fn food_points(o: &InspectionObservation) -> Option<f64> {
    o.food_stores.map(FoodStores::fraction)
}

fn disease_penalty(o: &InspectionObservation) -> f64 {
    capped(o.disease_count(), 5.0, 10.0)
}

fn pest_penalty(o: &InspectionObservation) -> f64 {
    capped(o.pest_count(), 3.0, 5.0)
}

fn queen_absent(o: &InspectionObservation) -> bool {
    o.queen_present == Some(QueenPresence::No)
}

fn food_exhausted(o: &InspectionObservation) -> bool {
    matches!(o.food_stores, Some(FoodStores::Critical | FoodStores::Empty))
}

fn findings_present(o: &InspectionObservation) -> bool {
    o.disease_count() > 0 || o.pest_count() > 0
}

fn rule_queen_absent(o: &InspectionObservation, _: Tier) -> bool {
    queen_absent(o)
}

fn rule_queen_not_seen(o: &InspectionObservation, _: Tier) -> bool {
    o.queen_present == Some(QueenPresence::NotSeen)
}

fn rule_laying_poor(o: &InspectionObservation, _: Tier) -> bool {
    o.queen_laying == Some(QueenLaying::Poor)
}

fn rule_laying_stopped(o: &InspectionObservation, _: Tier) -> bool {
    o.queen_laying == Some(QueenLaying::No) && !queen_absent(o)
}

fn rule_brood_failing(o: &InspectionObservation, _: Tier) -> bool {
    matches!(o.brood_pattern, Some(BroodPattern::Poor | BroodPattern::NoBrood))
}

fn rule_population_weak(o: &InspectionObservation, _: Tier) -> bool {
    matches!(
        o.population_strength,
        Some(PopulationStrength::Weak | PopulationStrength::VeryWeak)
    )
}

fn rule_food_low(o: &InspectionObservation, _: Tier) -> bool {
    matches!(
        o.food_stores,
        Some(FoodStores::Low | FoodStores::Critical | FoodStores::Empty)
    )
}

fn rule_diseases_found(o: &InspectionObservation, _: Tier) -> bool {
    o.disease_count() > 0
}

fn rule_pests_found(o: &InspectionObservation, _: Tier) -> bool {
    o.pest_count() > 0
}

fn interval_cap(o: &InspectionObservation) -> Option<u32> {
    o.inspection_type.interval_cap()
}
