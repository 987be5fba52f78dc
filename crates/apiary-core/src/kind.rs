//! Entity kinds, classification tiers, status vocabularies and risk levels

use serde::{Deserialize, Serialize};

/// The kind of record an observation was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Full colony inspection
    Inspection,
    /// Hive-level summary derived from the latest inspection
    Hive,
    /// Content reading of a single frame
    Frame,
    /// Outcome of a feeding
    Feeding,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [Self::Inspection, Self::Hive, Self::Frame, Self::Feeding];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inspection => "inspection",
            Self::Hive => "hive",
            Self::Frame => "frame",
            Self::Feeding => "feeding",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inspection" => Ok(Self::Inspection),
            "hive" => Ok(Self::Hive),
            "frame" => Ok(Self::Frame),
            "feeding" => Ok(Self::Feeding),
            other => Err(format!("Unknown entity kind: {}", other)),
        }
    }
}

/// Kind-agnostic classification, ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Healthy,
    Watch,
    Concern,
    Critical,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Self::Healthy, Self::Watch, Self::Concern, Self::Critical];

    /// Tiers at which the dashboard raises an alert
    pub fn needs_attention(self) -> bool {
        self >= Tier::Concern
    }
}

/// A kind-specific status vocabulary over [`Tier`]
pub trait Status:
    From<Tier> + Copy + PartialEq + std::fmt::Debug + std::fmt::Display + Serialize
{
    fn tier(self) -> Tier;
}

/// Inspection status: green is best, red is worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InspectionStatus {
    Green,
    Yellow,
    Orange,
    Red,
}

impl From<Tier> for InspectionStatus {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::Healthy => Self::Green,
            Tier::Watch => Self::Yellow,
            Tier::Concern => Self::Orange,
            Tier::Critical => Self::Red,
        }
    }
}

impl Status for InspectionStatus {
    fn tier(self) -> Tier {
        match self {
            Self::Green => Tier::Healthy,
            Self::Yellow => Tier::Watch,
            Self::Orange => Tier::Concern,
            Self::Red => Tier::Critical,
        }
    }
}

impl std::fmt::Display for InspectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Green => write!(f, "green"),
            Self::Yellow => write!(f, "yellow"),
            Self::Orange => write!(f, "orange"),
            Self::Red => write!(f, "red"),
        }
    }
}

/// Hive health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HiveStatus {
    Excellent,
    Good,
    Warning,
    Critical,
}

impl From<Tier> for HiveStatus {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::Healthy => Self::Excellent,
            Tier::Watch => Self::Good,
            Tier::Concern => Self::Warning,
            Tier::Critical => Self::Critical,
        }
    }
}

impl Status for HiveStatus {
    fn tier(self) -> Tier {
        match self {
            Self::Excellent => Tier::Healthy,
            Self::Good => Tier::Watch,
            Self::Warning => Tier::Concern,
            Self::Critical => Tier::Critical,
        }
    }
}

impl std::fmt::Display for HiveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Excellent => write!(f, "excellent"),
            Self::Good => write!(f, "good"),
            Self::Warning => write!(f, "warning"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Frame productivity status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameStatus {
    Productive,
    Moderate,
    Low,
    Unproductive,
}

impl From<Tier> for FrameStatus {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::Healthy => Self::Productive,
            Tier::Watch => Self::Moderate,
            Tier::Concern => Self::Low,
            Tier::Critical => Self::Unproductive,
        }
    }
}

impl Status for FrameStatus {
    fn tier(self) -> Tier {
        match self {
            Self::Productive => Tier::Healthy,
            Self::Moderate => Tier::Watch,
            Self::Low => Tier::Concern,
            Self::Unproductive => Tier::Critical,
        }
    }
}

impl std::fmt::Display for FrameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Productive => write!(f, "productive"),
            Self::Moderate => write!(f, "moderate"),
            Self::Low => write!(f, "low"),
            Self::Unproductive => write!(f, "unproductive"),
        }
    }
}

/// Feeding outcome status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedingStatus {
    Effective,
    Adequate,
    Poor,
    Failed,
}

impl From<Tier> for FeedingStatus {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::Healthy => Self::Effective,
            Tier::Watch => Self::Adequate,
            Tier::Concern => Self::Poor,
            Tier::Critical => Self::Failed,
        }
    }
}

impl Status for FeedingStatus {
    fn tier(self) -> Tier {
        match self {
            Self::Effective => Tier::Healthy,
            Self::Adequate => Tier::Watch,
            Self::Poor => Tier::Concern,
            Self::Failed => Tier::Critical,
        }
    }
}

impl std::fmt::Display for FeedingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Effective => write!(f, "effective"),
            Self::Adequate => write!(f, "adequate"),
            Self::Poor => write!(f, "poor"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Urgency of the next required action
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    /// Days until the next action before any entity-specific cap
    pub fn base_interval_days(self) -> u32 {
        match self {
            Self::Critical => 3,
            Self::High => 7,
            Self::Medium => 14,
            Self::Low => 21,
        }
    }
}

impl From<Tier> for RiskLevel {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::Healthy => Self::Low,
            Tier::Watch => Self::Medium,
            Tier::Concern => Self::High,
            Tier::Critical => Self::Critical,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(Tier::Healthy < Tier::Watch);
        assert!(Tier::Concern < Tier::Critical);
        assert!(!Tier::Watch.needs_attention());
        assert!(Tier::Concern.needs_attention());
    }

    #[test]
    fn test_status_round_trip_through_tier() {
        for tier in Tier::ALL {
            assert_eq!(InspectionStatus::from(tier).tier(), tier);
            assert_eq!(HiveStatus::from(tier).tier(), tier);
            assert_eq!(FrameStatus::from(tier).tier(), tier);
            assert_eq!(FeedingStatus::from(tier).tier(), tier);
        }
    }

    #[test]
    fn test_risk_intervals() {
        assert_eq!(RiskLevel::Critical.base_interval_days(), 3);
        assert_eq!(RiskLevel::High.base_interval_days(), 7);
        assert_eq!(RiskLevel::Medium.base_interval_days(), 14);
        assert_eq!(RiskLevel::Low.base_interval_days(), 21);
        assert_eq!(RiskLevel::from(Tier::Concern), RiskLevel::High);
    }

    #[test]
    fn test_entity_kind_parse() {
        assert_eq!("Hive".parse::<EntityKind>(), Ok(EntityKind::Hive));
        assert!("apiary".parse::<EntityKind>().is_err());
        assert_eq!(
            serde_json::to_string(&EntityKind::Feeding).unwrap(),
            "\"feeding\""
        );
    }
}
