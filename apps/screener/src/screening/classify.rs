//! Tier classification as a pure function of (match ratio, missing-critical flag).
//!
//! Rules, applied in this order:
//! 1. any critical skill missing → Reject, whatever the ratio
//! 2. ratio ≥ suitable threshold → Suitable
//! 3. ratio ≥ maybe threshold → Maybe
//! 4. otherwise → Reject
//!
//! Lower bounds are inclusive: a ratio sitting exactly on a threshold gets
//! the higher tier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Suitable,
    Maybe,
    Reject,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Suitable => "Suitable",
            Tier::Maybe => "Maybe",
            Tier::Reject => "Reject",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ratio cut-offs for the Suitable and Maybe tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    suitable: f64,
    maybe: f64,
}

impl Thresholds {
    pub const DEFAULT_SUITABLE: f64 = 0.70;
    pub const DEFAULT_MAYBE: f64 = 0.40;

    /// Both cut-offs must lie in `[0, 1]` with `maybe <= suitable`.
    pub fn new(suitable: f64, maybe: f64) -> Result<Self, AppError> {
        let in_range = |v: f64| (0.0..=1.0).contains(&v);
        if !in_range(suitable) || !in_range(maybe) {
            return Err(AppError::Configuration(format!(
                "Thresholds must be between 0 and 1 (suitable={suitable}, maybe={maybe})"
            )));
        }
        if maybe > suitable {
            return Err(AppError::Configuration(format!(
                "Maybe threshold ({maybe}) cannot exceed suitable threshold ({suitable})"
            )));
        }
        Ok(Self { suitable, maybe })
    }

    pub fn suitable(&self) -> f64 {
        self.suitable
    }

    pub fn maybe(&self) -> f64 {
        self.maybe
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            suitable: Self::DEFAULT_SUITABLE,
            maybe: Self::DEFAULT_MAYBE,
        }
    }
}

pub fn classify(ratio: f64, missing_critical: bool, thresholds: &Thresholds) -> Tier {
    if missing_critical {
        Tier::Reject
    } else if ratio >= thresholds.suitable {
        Tier::Suitable
    } else if ratio >= thresholds.maybe {
        Tier::Maybe
    } else {
        Tier::Reject
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(ratio: f64, missing_critical: bool) -> Tier {
        classify(ratio, missing_critical, &Thresholds::default())
    }

    #[test]
    fn test_missing_critical_always_rejects() {
        for ratio in [0.0, 0.39, 0.4, 0.5, 0.7, 0.99, 1.0] {
            assert_eq!(tier(ratio, true), Tier::Reject, "ratio {ratio}");
        }
    }

    #[test]
    fn test_boundaries_resolve_to_higher_tier() {
        assert_eq!(tier(0.70, false), Tier::Suitable);
        assert_eq!(tier(0.699999, false), Tier::Maybe);
        assert_eq!(tier(0.40, false), Tier::Maybe);
        assert_eq!(tier(0.399999, false), Tier::Reject);
    }

    #[test]
    fn test_exact_fractions_hit_boundaries() {
        assert_eq!(tier(7.0 / 10.0, false), Tier::Suitable);
        assert_eq!(tier(2.0 / 5.0, false), Tier::Maybe);
        assert_eq!(tier(2.0 / 3.0, false), Tier::Maybe);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(tier(1.0, false), Tier::Suitable);
        assert_eq!(tier(0.0, false), Tier::Reject);
    }

    #[test]
    fn test_custom_thresholds_keep_inclusive_bounds() {
        let t = Thresholds::new(0.8, 0.5).unwrap();
        assert_eq!(classify(0.8, false, &t), Tier::Suitable);
        assert_eq!(classify(0.79, false, &t), Tier::Maybe);
        assert_eq!(classify(0.5, false, &t), Tier::Maybe);
        assert_eq!(classify(0.49, false, &t), Tier::Reject);
        assert_eq!(classify(1.0, true, &t), Tier::Reject);
    }

    #[test]
    fn test_thresholds_reject_inverted_order() {
        assert!(matches!(
            Thresholds::new(0.3, 0.6),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn test_thresholds_reject_out_of_range() {
        assert!(Thresholds::new(1.2, 0.4).is_err());
        assert!(Thresholds::new(0.7, -0.1).is_err());
        assert!(Thresholds::new(f64::NAN, 0.4).is_err());
    }

    #[test]
    fn test_tier_labels() {
        let labels: Vec<_> = [Tier::Suitable, Tier::Maybe, Tier::Reject]
            .iter()
            .map(|t| t.to_string())
            .collect();
        assert_eq!(labels, vec!["Suitable", "Maybe", "Reject"]);
    }
}
