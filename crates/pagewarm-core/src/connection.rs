//! Connection-aware image quality classification.
//!
//! Runs once at session start. The runtime may not expose any network
//! information at all; that case is classified optimistically as `High`.
//! A user-requested data-saving mode forces `Low` no matter what the
//! effective type says.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::prefs::{PrefStore, QualityTier};

/// Coarse link-speed bucket as reported by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectiveType {
    #[serde(rename = "slow-2g")]
    Slow2g,
    #[serde(rename = "2g")]
    TwoG,
    #[serde(rename = "3g")]
    ThreeG,
    #[serde(rename = "4g")]
    FourG,
}

impl fmt::Display for EffectiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EffectiveType::Slow2g => "slow-2g",
            EffectiveType::TwoG => "2g",
            EffectiveType::ThreeG => "3g",
            EffectiveType::FourG => "4g",
        };
        f.write_str(s)
    }
}

impl FromStr for EffectiveType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "slow-2g" => Ok(EffectiveType::Slow2g),
            "2g" => Ok(EffectiveType::TwoG),
            "3g" => Ok(EffectiveType::ThreeG),
            "4g" => Ok(EffectiveType::FourG),
            other => Err(format!("unknown effective type: {other:?}")),
        }
    }
}

/// Snapshot of the runtime's network-information capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectionInfo {
    /// None when the runtime reports a connection but no effective type.
    pub effective_type: Option<EffectiveType>,
    /// User has requested reduced data usage.
    pub save_data: bool,
}

/// Map connection info to a quality tier. `None` means the capability is
/// absent entirely; the optimistic default applies.
pub fn classify(info: Option<&ConnectionInfo>) -> QualityTier {
    let Some(info) = info else {
        return QualityTier::High;
    };

    let mut tier = match info.effective_type {
        Some(EffectiveType::Slow2g) | Some(EffectiveType::TwoG) => QualityTier::Low,
        Some(EffectiveType::ThreeG) => QualityTier::Medium,
        Some(EffectiveType::FourG) | None => QualityTier::High,
    };

    // Data-saving overrides the type-based classification.
    if info.save_data {
        tier = QualityTier::Low;
    }

    tier
}

/// Classify once and record the result in the preference store.
pub fn apply(info: Option<&ConnectionInfo>, prefs: &mut PrefStore) -> QualityTier {
    let tier = classify(info);
    prefs.set_image_quality(tier);
    tracing::debug!("connection classified as {tier}");
    tier
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemPrefs;

    fn info(effective_type: Option<EffectiveType>, save_data: bool) -> ConnectionInfo {
        ConnectionInfo { effective_type, save_data }
    }

    #[test]
    fn absent_capability_is_high() {
        assert_eq!(classify(None), QualityTier::High);
    }

    #[test]
    fn slow_types_map_to_low() {
        assert_eq!(
            classify(Some(&info(Some(EffectiveType::Slow2g), false))),
            QualityTier::Low
        );
        assert_eq!(
            classify(Some(&info(Some(EffectiveType::TwoG), false))),
            QualityTier::Low
        );
    }

    #[test]
    fn three_g_maps_to_medium() {
        assert_eq!(
            classify(Some(&info(Some(EffectiveType::ThreeG), false))),
            QualityTier::Medium
        );
    }

    #[test]
    fn fast_or_unreported_type_maps_to_high() {
        assert_eq!(
            classify(Some(&info(Some(EffectiveType::FourG), false))),
            QualityTier::High
        );
        assert_eq!(classify(Some(&info(None, false))), QualityTier::High);
    }

    #[test]
    fn save_data_overrides_fast_type() {
        assert_eq!(
            classify(Some(&info(Some(EffectiveType::FourG), true))),
            QualityTier::Low
        );
    }

    #[test]
    fn apply_writes_tier_into_prefs() {
        let mut prefs = PrefStore::new(Box::new(MemPrefs::default()));
        let tier = apply(Some(&info(Some(EffectiveType::ThreeG), false)), &mut prefs);
        assert_eq!(tier, QualityTier::Medium);
        assert_eq!(prefs.image_quality(), QualityTier::Medium);
    }

    #[test]
    fn effective_type_string_roundtrip() {
        for et in [
            EffectiveType::Slow2g,
            EffectiveType::TwoG,
            EffectiveType::ThreeG,
            EffectiveType::FourG,
        ] {
            assert_eq!(et.to_string().parse::<EffectiveType>().unwrap(), et);
        }
        assert!("5g".parse::<EffectiveType>().is_err());
    }
}
