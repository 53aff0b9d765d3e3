//! Per-tick quality degradation for items with transient quality.
//!
//! A [`DegradationPolicy`] decides how much quality an item loses on one tick
//! and applies it. The amount doubles once the item's sell-by date has passed
//! and is clamped so quality never drops below zero. Negative amounts model
//! items that improve with age; the base policy does not cap those (see
//! [`crate::QualityPolicy::Improving`] for the ceiling-bounded variant).

use serde::{Deserialize, Serialize};

use shelflife_core::ValueObject;

/// Baseline daily quality loss while the sell-by date has not passed.
pub const DEFAULT_STANDARD_DEGRADATION_AMOUNT: i64 = 1;

/// Capabilities an item must expose to take part in a degradation tick.
pub trait TransientQuality {
    /// Current quality.
    fn quality(&self) -> i64;

    /// Overwrite the current quality.
    fn set_quality(&mut self, quality: i64);

    /// Whether the item's sell-by date has passed.
    ///
    /// Read only by the policy; the item owns its sell-by counter.
    fn is_past_sell_by_date(&self) -> bool;
}

/// Degradation rule for one class of transient-quality item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegradationPolicy {
    standard_degradation_amount: i64,
}

impl ValueObject for DegradationPolicy {}

impl Default for DegradationPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_STANDARD_DEGRADATION_AMOUNT)
    }
}

impl DegradationPolicy {
    /// Items governed by this policy degrade.
    pub const DEGRADABLE: bool = true;

    pub const fn new(standard_degradation_amount: i64) -> Self {
        Self {
            standard_degradation_amount,
        }
    }

    pub const fn standard_degradation_amount(&self) -> i64 {
        self.standard_degradation_amount
    }

    /// Decay accelerates (doubles) once the sell-by date has passed.
    pub const fn post_sell_by_date_degradation_amount(&self) -> i64 {
        self.standard_degradation_amount.saturating_mul(2)
    }

    /// Requested amount for the current tick, before clamping.
    pub fn degradation_amount<T: TransientQuality + ?Sized>(&self, item: &T) -> i64 {
        if item.is_past_sell_by_date() {
            self.post_sell_by_date_degradation_amount()
        } else {
            self.standard_degradation_amount()
        }
    }

    /// True when the full requested amount fits in the item's current quality.
    pub fn can_further_degrade<T: TransientQuality + ?Sized>(&self, item: &T) -> bool {
        item.quality() >= self.degradation_amount(item)
    }

    /// Requested amount, clamped to the item's current quality.
    ///
    /// Subtracting the result can never take quality below zero.
    pub fn max_possible_degradation_amount<T: TransientQuality + ?Sized>(&self, item: &T) -> i64 {
        if self.can_further_degrade(item) {
            self.degradation_amount(item)
        } else {
            item.quality()
        }
    }

    /// Apply one tick of degradation to `item`.
    ///
    /// Call once per tick, after the item's sell-by counter has been advanced.
    pub fn degrade<'a, T: TransientQuality + ?Sized>(&self, item: &'a mut T) -> &'a mut T {
        let before = item.quality();
        let amount = self.max_possible_degradation_amount(item);
        item.set_quality(before.saturating_sub(amount));

        tracing::debug!(
            before,
            after = item.quality(),
            amount,
            past_sell_by = item.is_past_sell_by_date(),
            "quality degraded"
        );

        item
    }
}
