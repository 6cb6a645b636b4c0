use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::category::IngredientCategory;

/// An item currently in the user's fridge.
///
/// The id is assigned on creation and never changes; updates replace every
/// other field while keeping the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    id: Uuid,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: IngredientCategory,
    pub purchase_date: DateTime<Utc>,
    #[serde(default)]
    pub expiration_date: Option<DateTime<Utc>>,
}

impl Ingredient {
    pub fn new(
        name: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        category: IngredientCategory,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            quantity: clamp_quantity(quantity),
            unit: unit.into(),
            category,
            purchase_date: Utc::now(),
            expiration_date: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = clamp_quantity(quantity);
        self
    }

    pub fn with_purchase_date(mut self, date: DateTime<Utc>) -> Self {
        self.purchase_date = date;
        self
    }

    pub fn with_expiration_date(mut self, date: DateTime<Utc>) -> Self {
        self.expiration_date = Some(date);
        self
    }

    /// Re-applies the quantity invariant after fields were edited directly.
    pub fn normalized(mut self) -> Self {
        self.quantity = clamp_quantity(self.quantity);
        self
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expiration_date {
            Some(expires) => now > expires,
            None => false,
        }
    }

    pub fn days_until_expiration(&self) -> Option<i64> {
        self.days_until_expiration_at(Utc::now())
    }

    /// Whole days from `now` until expiry, truncated toward zero.
    pub fn days_until_expiration_at(&self, now: DateTime<Utc>) -> Option<i64> {
        self.expiration_date
            .map(|expires| (expires - now).num_days())
    }
}

fn clamp_quantity(quantity: f64) -> f64 {
    if quantity.is_nan() || quantity < 0.0 {
        0.0
    } else {
        quantity
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_empty() {
            write!(f, "{} {}", self.quantity, self.name)
        } else {
            write!(f, "{} {} {}", self.quantity, self.unit, self.name)
        }
    }
}
