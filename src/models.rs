// ABOUTME: Domain data types for nutrition records, food items, and the daily meal log
// ABOUTME: Encodes the fixed meal-slot partition and nutrition field invariants in the types
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain data types.
//!
//! The invariants this service cares about live here:
//! [`NutritionInfo`] fields are unsigned whole units so negative values are
//! unrepresentable, and [`MealLog`] carries one field per meal slot so no
//! slot can ever be absent or null.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Four-field nutrition summary, in whole units (kcal and grams).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionInfo {
    /// Energy in kcal
    pub calories: u32,
    /// Protein in grams
    pub protein: u32,
    /// Carbohydrates in grams
    pub carbs: u32,
    /// Fat in grams
    pub fats: u32,
}

impl NutritionInfo {
    /// Field-wise sum. Saturating so a pathological log cannot overflow.
    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self {
            calories: self.calories.saturating_add(other.calories),
            protein: self.protein.saturating_add(other.protein),
            carbs: self.carbs.saturating_add(other.carbs),
            fats: self.fats.saturating_add(other.fats),
        }
    }
}

/// A single logged food entry. Immutable once created; entries are only
/// ever appended to or removed from the log, never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    /// Unique id, generated at creation time
    pub id: Uuid,
    /// Food name as identified or entered
    pub name: String,
    /// Nutrition facts for this entry
    pub nutrition: NutritionInfo,
    /// Creation instant
    pub timestamp: DateTime<Utc>,
    /// Optional reference to the source image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl FoodItem {
    /// Create a new entry with a fresh id and the current timestamp.
    #[must_use]
    pub fn new(name: impl Into<String>, nutrition: NutritionInfo, image_url: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            nutrition,
            timestamp: Utc::now(),
            image_url,
        }
    }
}

/// One of the four fixed meal slots of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    /// Morning meal
    Breakfast,
    /// Midday meal
    Lunch,
    /// Evening meal
    Dinner,
    /// Anything between meals
    Snacks,
}

impl MealSlot {
    /// All slots, in display order.
    pub const ALL: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snacks];
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snacks => "snacks",
        };
        write!(f, "{name}")
    }
}

/// A day's meal log: one ordered entry list per slot.
///
/// Slots are struct fields rather than map keys so every slot is present by
/// construction. JSON form is an object keyed by the four slot names, each
/// an array of [`FoodItem`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealLog {
    /// Breakfast entries, in logging order
    #[serde(default)]
    pub breakfast: Vec<FoodItem>,
    /// Lunch entries, in logging order
    #[serde(default)]
    pub lunch: Vec<FoodItem>,
    /// Dinner entries, in logging order
    #[serde(default)]
    pub dinner: Vec<FoodItem>,
    /// Snack entries, in logging order
    #[serde(default)]
    pub snacks: Vec<FoodItem>,
}

impl MealLog {
    /// Borrow the entries of one slot.
    #[must_use]
    pub fn slot(&self, slot: MealSlot) -> &[FoodItem] {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
            MealSlot::Snacks => &self.snacks,
        }
    }

    /// Mutably borrow the entries of one slot.
    pub fn slot_mut(&mut self, slot: MealSlot) -> &mut Vec<FoodItem> {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
            MealSlot::Snacks => &mut self.snacks,
        }
    }

    /// Iterate all entries across all slots.
    pub fn iter_items(&self) -> impl Iterator<Item = &FoodItem> {
        MealSlot::ALL.into_iter().flat_map(|slot| self.slot(slot).iter())
    }

    /// Total number of entries across all slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter_items().count()
    }

    /// True when no slot holds any entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter_items().next().is_none()
    }
}

/// One component of a multi-part food (e.g. bun + patty + cheese).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodComponent {
    /// Component name, used as the lookup query and breakdown key
    pub name: String,
    /// Quantity qualifier for the lookup, defaulting to "1"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
}

/// Result of pricing a multi-component food.
///
/// `skipped` names components whose lookup failed and were therefore
/// excluded from both the total and the breakdown, so callers can tell a
/// complete total from a partial one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentNutrition {
    /// Field-wise sum over the successfully priced components
    pub total: NutritionInfo,
    /// Per-component breakdown, keyed by component name
    pub by_component: BTreeMap<String, NutritionInfo>,
    /// Components omitted because their lookup failed
    pub skipped: Vec<String>,
}
