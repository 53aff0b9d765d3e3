use serde::Serialize;

use shelflife_core::{DomainError, DomainResult, Entity, StockItemId};

use crate::degradation::TransientQuality;
use crate::policy::QualityPolicy;

/// A stock item with a sell-by countdown and a quality policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockItem {
    id: StockItemId,
    name: String,
    sell_in: i64,
    quality: i64,
    policy: QualityPolicy,
}

impl StockItem {
    pub fn new(
        id: StockItemId,
        name: impl Into<String>,
        sell_in: i64,
        quality: i64,
        policy: QualityPolicy,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if quality < 0 {
            return Err(DomainError::validation("quality cannot be negative"));
        }
        policy.validate()?;
        if let Some(ceiling) = policy.ceiling() {
            if quality > ceiling {
                return Err(DomainError::validation(format!(
                    "quality {quality} exceeds ceiling {ceiling}"
                )));
            }
        }

        Ok(Self {
            id,
            name,
            sell_in,
            quality,
            policy,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Days left until the sell-by date. Negative once it has passed.
    pub fn sell_in(&self) -> i64 {
        self.sell_in
    }

    pub fn policy(&self) -> QualityPolicy {
        self.policy
    }

    pub fn advance_sell_by(&mut self) -> &mut Self {
        self.sell_in = self.sell_in.saturating_sub(1);
        self
    }

    /// One logical day: the sell-by counter moves first, then the policy runs
    /// against the post-advance state.
    pub fn tick(&mut self) -> &mut Self {
        self.advance_sell_by();
        let policy = self.policy;
        policy.degrade(self)
    }
}

impl Entity for StockItem {
    type Id = StockItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl TransientQuality for StockItem {
    fn quality(&self) -> i64 {
        self.quality
    }

    /// Out-of-range values are clamped into `[0, ceiling]`.
    fn set_quality(&mut self, quality: i64) {
        let quality = match self.policy.ceiling() {
            Some(ceiling) => quality.min(ceiling),
            None => quality,
        };
        self.quality = quality.max(0);
    }

    fn is_past_sell_by_date(&self) -> bool {
        self.sell_in < 0
    }
}
