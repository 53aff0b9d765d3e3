//! Closed set of quality policies a stock item can carry.

use serde::{Deserialize, Serialize};

use shelflife_core::{DomainError, DomainResult, ValueObject};

use crate::degradation::{DegradationPolicy, TransientQuality};

/// Conventional upper bound on item quality.
pub const DEFAULT_QUALITY_CEILING: i64 = 50;

/// How an item's quality changes from one tick to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QualityPolicyRepr", into = "QualityPolicyRepr")]
pub enum QualityPolicy {
    /// Loses quality every tick, twice as fast past the sell-by date.
    Standard { policy: DegradationPolicy },
    /// Gains quality every tick (negative amount) up to `ceiling`.
    Improving {
        policy: DegradationPolicy,
        ceiling: i64,
    },
    /// Never changes.
    Preserved,
}

impl ValueObject for QualityPolicy {}

/// Wire shape of [`QualityPolicy`]; deserialized values are validated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum QualityPolicyRepr {
    Standard {
        policy: DegradationPolicy,
    },
    Improving {
        policy: DegradationPolicy,
        ceiling: i64,
    },
    Preserved,
}

impl TryFrom<QualityPolicyRepr> for QualityPolicy {
    type Error = DomainError;

    fn try_from(repr: QualityPolicyRepr) -> Result<Self, Self::Error> {
        let policy = match repr {
            QualityPolicyRepr::Standard { policy } => Self::Standard { policy },
            QualityPolicyRepr::Improving { policy, ceiling } => Self::Improving { policy, ceiling },
            QualityPolicyRepr::Preserved => Self::Preserved,
        };
        policy.validate()?;
        Ok(policy)
    }
}

impl From<QualityPolicy> for QualityPolicyRepr {
    fn from(policy: QualityPolicy) -> Self {
        match policy {
            QualityPolicy::Standard { policy } => Self::Standard { policy },
            QualityPolicy::Improving { policy, ceiling } => Self::Improving { policy, ceiling },
            QualityPolicy::Preserved => Self::Preserved,
        }
    }
}

impl Default for QualityPolicy {
    fn default() -> Self {
        Self::Standard {
            policy: DegradationPolicy::default(),
        }
    }
}

impl QualityPolicy {
    pub const fn standard(policy: DegradationPolicy) -> Self {
        Self::Standard { policy }
    }

    /// Improving policy gaining `rate` per tick (`2 × rate` past sell-by).
    ///
    /// The sign of `rate` is ignored; improvement is always upward.
    pub const fn improving(rate: i64, ceiling: i64) -> Self {
        Self::Improving {
            policy: DegradationPolicy::new(-rate.saturating_abs()),
            ceiling,
        }
    }

    /// An improving policy must not lose quality and needs a non-negative ceiling.
    pub fn validate(&self) -> DomainResult<()> {
        if let Self::Improving { policy, ceiling } = self {
            if *ceiling < 0 {
                return Err(DomainError::invariant(format!(
                    "improving ceiling cannot be negative (got {ceiling})"
                )));
            }
            if policy.standard_degradation_amount() > 0 {
                return Err(DomainError::invariant(
                    "improving policy cannot have a positive degradation amount",
                ));
            }
        }
        Ok(())
    }

    pub const fn is_degradable(&self) -> bool {
        match self {
            Self::Standard { .. } | Self::Improving { .. } => DegradationPolicy::DEGRADABLE,
            Self::Preserved => false,
        }
    }

    /// Quality ceiling enforced by this policy, if any.
    pub const fn ceiling(&self) -> Option<i64> {
        match self {
            Self::Improving { ceiling, .. } => Some(*ceiling),
            Self::Standard { .. } | Self::Preserved => None,
        }
    }

    /// Requested amount for the current tick, before clamping.
    pub fn degradation_amount<T: TransientQuality + ?Sized>(&self, item: &T) -> i64 {
        match self {
            Self::Standard { policy } | Self::Improving { policy, .. } => {
                policy.degradation_amount(item)
            }
            Self::Preserved => 0,
        }
    }

    /// Amount that will actually be removed on the next [`degrade`](Self::degrade).
    pub fn max_possible_degradation_amount<T: TransientQuality + ?Sized>(&self, item: &T) -> i64 {
        match self {
            Self::Standard { policy } => policy.max_possible_degradation_amount(item),
            // quality - amount <= ceiling, but never below zero
            Self::Improving { policy, ceiling } => policy
                .max_possible_degradation_amount(item)
                .max(item.quality().saturating_sub(*ceiling))
                .min(item.quality()),
            Self::Preserved => 0,
        }
    }

    /// Apply one tick to `item`. Quality stays within `[0, ceiling]`.
    pub fn degrade<'a, T: TransientQuality + ?Sized>(&self, item: &'a mut T) -> &'a mut T {
        match self {
            Self::Standard { policy } => policy.degrade(item),
            Self::Improving { ceiling, .. } => {
                let before = item.quality();
                let amount = self.max_possible_degradation_amount(item);
                item.set_quality(before.saturating_sub(amount));

                tracing::debug!(
                    before,
                    after = item.quality(),
                    amount,
                    ceiling = *ceiling,
                    past_sell_by = item.is_past_sell_by_date(),
                    "quality improved"
                );

                item
            }
            Self::Preserved => {
                tracing::trace!(quality = item.quality(), "preserved item skipped");
                item
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::degradation::tests::Perishable;

    #[test]
    fn standard_matches_base_policy() {
        let policy = QualityPolicy::default();
        let mut item = Perishable::new(10, true);

        assert!(policy.is_degradable());
        assert_eq!(policy.degradation_amount(&item), 2);
        policy.degrade(&mut item);
        assert_eq!(item.quality, 8);
    }

    #[test]
    fn improving_gains_quality() {
        let policy = QualityPolicy::improving(1, DEFAULT_QUALITY_CEILING);

        let mut fresh = Perishable::new(10, false);
        policy.degrade(&mut fresh);
        assert_eq!(fresh.quality, 11);

        let mut aged = Perishable::new(10, true);
        policy.degrade(&mut aged);
        assert_eq!(aged.quality, 12);
    }

    #[test]
    fn improving_clamps_at_ceiling() {
        let policy = QualityPolicy::improving(1, 50);

        let mut item = Perishable::new(49, true);
        assert_eq!(policy.degradation_amount(&item), -2);
        assert_eq!(policy.max_possible_degradation_amount(&item), -1);
        policy.degrade(&mut item);
        assert_eq!(item.quality, 50);

        policy.degrade(&mut item);
        assert_eq!(item.quality, 50);
    }

    #[test]
    fn improving_pulls_overfull_quality_back_to_ceiling() {
        let policy = QualityPolicy::improving(1, 50);
        let mut item = Perishable::new(80, false);

        policy.degrade(&mut item);
        assert_eq!(item.quality, 50);
    }

    #[test]
    fn improving_ignores_rate_sign() {
        assert_eq!(
            QualityPolicy::improving(-3, 50),
            QualityPolicy::improving(3, 50)
        );
    }

    #[test]
    fn preserved_never_changes() {
        let policy = QualityPolicy::Preserved;
        let mut item = Perishable::new(80, true);

        assert!(!policy.is_degradable());
        assert_eq!(policy.degradation_amount(&item), 0);
        assert_eq!(policy.ceiling(), None);

        policy.degrade(&mut item);
        assert_eq!(item.quality, 80);
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(QualityPolicy::improving(1, 50)).unwrap();
        assert_eq!(json["kind"], "improving");
        assert_eq!(json["ceiling"], 50);
        assert_eq!(json["policy"]["standard_degradation_amount"], -1);

        let back: QualityPolicy =
            serde_json::from_str(r#"{"kind":"preserved"}"#).unwrap();
        assert_eq!(back, QualityPolicy::Preserved);
    }

    #[test]
    fn improving_with_ceiling_below_quality_stops_at_ceiling() {
        let policy = QualityPolicy::improving(1, 10);
        let mut item = Perishable::new(30, true);

        policy.degrade(&mut item);
        assert_eq!(item.quality, 10);
    }

    #[test]
    fn improving_with_negative_ceiling_never_goes_below_zero() {
        let policy = QualityPolicy::improving(1, -5);

        let mut empty = Perishable::new(0, false);
        assert_eq!(policy.max_possible_degradation_amount(&empty), 0);
        policy.degrade(&mut empty);
        assert_eq!(empty.quality, 0);

        let mut full = Perishable::new(20, true);
        policy.degrade(&mut full);
        assert_eq!(full.quality, 0);
    }

    #[test]
    fn validate_rejects_negative_ceiling() {
        let err = QualityPolicy::improving(1, -5).validate().unwrap_err();
        match err {
            DomainError::InvariantViolation(msg) => assert!(msg.contains("ceiling")),
            _ => panic!("Expected InvariantViolation for negative ceiling"),
        }
    }

    #[test]
    fn validate_rejects_losing_improving_policy() {
        let policy = QualityPolicy::Improving {
            policy: DegradationPolicy::new(5),
            ceiling: 50,
        };
        assert!(matches!(
            policy.validate(),
            Err(DomainError::InvariantViolation(_))
        ));
        assert!(QualityPolicy::default().validate().is_ok());
        assert!(QualityPolicy::Preserved.validate().is_ok());
    }

    #[test]
    fn deserialize_rejects_invalid_improving_policy() {
        let positive = r#"{"kind":"improving","policy":{"standard_degradation_amount":5},"ceiling":50}"#;
        let err = serde_json::from_str::<QualityPolicy>(positive).unwrap_err();
        assert!(err.to_string().contains("positive degradation amount"));

        let negative_ceiling = r#"{"kind":"improving","policy":{"standard_degradation_amount":-1},"ceiling":-5}"#;
        assert!(serde_json::from_str::<QualityPolicy>(negative_ceiling).is_err());

        let valid = r#"{"kind":"improving","policy":{"standard_degradation_amount":-1},"ceiling":50}"#;
        let policy: QualityPolicy = serde_json::from_str(valid).unwrap();
        assert_eq!(policy, QualityPolicy::improving(1, 50));
    }

    #[test]
    fn extreme_rates_do_not_overflow() {
        let policy = QualityPolicy::improving(i64::MIN, 50);
        let mut item = Perishable::new(10, true);

        policy.degrade(&mut item);
        assert_eq!(item.quality, 50);

        let standard = QualityPolicy::standard(DegradationPolicy::new(i64::MAX));
        let mut item = Perishable::new(10, true);
        standard.degrade(&mut item);
        assert_eq!(item.quality, 0);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: improving never drops below zero, whatever the ceiling.
            #[test]
            fn improving_respects_floor_for_any_ceiling(
                quality in 0i64..1000,
                past_sell_by in any::<bool>(),
                rate in 0i64..100,
                ceiling in -100i64..100,
            ) {
                let policy = QualityPolicy::improving(rate, ceiling);
                let mut item = Perishable::new(quality, past_sell_by);

                policy.degrade(&mut item);
                prop_assert!(item.quality >= 0);
            }

            /// Property: improving items stay within [0, ceiling].
            #[test]
            fn improving_stays_within_bounds(
                quality in 0i64..=50,
                past_sell_by in any::<bool>(),
                rate in 1i64..10,
                ticks in 1usize..60,
            ) {
                let policy = QualityPolicy::improving(rate, DEFAULT_QUALITY_CEILING);
                let mut item = Perishable::new(quality, past_sell_by);

                for _ in 0..ticks {
                    policy.degrade(&mut item);
                    prop_assert!(item.quality >= 0);
                    prop_assert!(item.quality <= DEFAULT_QUALITY_CEILING);
                }
            }
        }
    }
}
