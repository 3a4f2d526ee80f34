// ABOUTME: Action-driven meal log store with a pure reducer core
// ABOUTME: Hydrates once at construction, recomputes totals and persists after every mutation
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The meal log store.
//!
//! State transitions go through a pure reducer ([`apply`]) so they can be
//! tested without I/O; [`MealLogStore::dispatch`] wraps the reducer with the
//! two side effects every mutation carries: totals recomputation and a full
//! write-through to the storage adapter.
//!
//! Entries are never edited in place. Every transition produces a new
//! [`MealLog`] value.

use uuid::Uuid;

use super::storage::MealLogStorage;
use super::totals::daily_totals;
use crate::errors::AppError;
use crate::models::{FoodItem, MealLog, MealSlot, NutritionInfo};

/// A state transition of the meal log.
#[derive(Debug, Clone, PartialEq)]
pub enum MealLogAction {
    /// Append a food entry to a slot
    AddFood {
        /// Target slot
        slot: MealSlot,
        /// Entry to append
        food: FoodItem,
    },
    /// Remove the entry with the given id from a slot; no-op if absent
    RemoveFood {
        /// Target slot
        slot: MealSlot,
        /// Id of the entry to remove
        food_id: Uuid,
    },
    /// Wholesale replacement, used at hydration time only
    SetMeals(MealLog),
}

/// Pure reducer: produce the next log value for an action.
///
/// Other slots are untouched by slot-addressed actions, and removing an
/// unknown id returns a log equal to the input.
#[must_use]
pub fn apply(log: &MealLog, action: &MealLogAction) -> MealLog {
    match action {
        MealLogAction::AddFood { slot, food } => {
            let mut next = log.clone();
            next.slot_mut(*slot).push(food.clone());
            next
        }
        MealLogAction::RemoveFood { slot, food_id } => {
            let mut next = log.clone();
            next.slot_mut(*slot).retain(|item| item.id != *food_id);
            next
        }
        MealLogAction::SetMeals(meals) => meals.clone(),
    }
}

/// State container over the meal log and its derived daily totals.
pub struct MealLogStore {
    meals: MealLog,
    totals: NutritionInfo,
    storage: Box<dyn MealLogStorage>,
}

impl MealLogStore {
    /// Build a store over `storage`, hydrating from it if a log was
    /// previously persisted. Hydration happens exactly once, here.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage adapter fails to read.
    pub fn open(storage: Box<dyn MealLogStorage>) -> Result<Self, AppError> {
        let meals = storage.load()?.unwrap_or_default();
        let totals = daily_totals(&meals);
        Ok(Self {
            meals,
            totals,
            storage,
        })
    }

    /// Apply an action, recompute totals, and persist the full log.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails. The in-memory state is still
    /// advanced in that case; the next successful dispatch rewrites the
    /// whole log.
    pub fn dispatch(&mut self, action: &MealLogAction) -> Result<(), AppError> {
        self.meals = apply(&self.meals, action);
        self.totals = daily_totals(&self.meals);
        self.storage.save(&self.meals)
    }

    /// Current meal log.
    #[must_use]
    pub fn meals(&self) -> &MealLog {
        &self.meals
    }

    /// Cached daily totals, recomputed after every mutation.
    #[must_use]
    pub fn totals(&self) -> NutritionInfo {
        self.totals
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::meal_log::storage::MemoryStorage;

    fn banana() -> FoodItem {
        FoodItem::new(
            "banana",
            NutritionInfo {
                calories: 105,
                protein: 1,
                carbs: 27,
                fats: 0,
            },
            None,
        )
    }

    #[test]
    fn test_add_food_appends_without_touching_other_slots() {
        let log = MealLog::default();
        let food = banana();
        let next = apply(
            &log,
            &MealLogAction::AddFood {
                slot: MealSlot::Breakfast,
                food: food.clone(),
            },
        );
        assert_eq!(next.breakfast, vec![food]);
        assert!(next.lunch.is_empty());
        assert!(next.dinner.is_empty());
        assert!(next.snacks.is_empty());
        // the input value is untouched
        assert!(log.is_empty());
    }

    #[test]
    fn test_remove_unknown_id_is_a_no_op() {
        let mut log = MealLog::default();
        log.slot_mut(MealSlot::Lunch).push(banana());

        let next = apply(
            &log,
            &MealLogAction::RemoveFood {
                slot: MealSlot::Lunch,
                food_id: Uuid::new_v4(),
            },
        );
        assert_eq!(next, log);
    }

    #[test]
    fn test_add_then_remove_round_trips() {
        let log = MealLog::default();
        let food = banana();
        let added = apply(
            &log,
            &MealLogAction::AddFood {
                slot: MealSlot::Snacks,
                food: food.clone(),
            },
        );
        let removed = apply(
            &added,
            &MealLogAction::RemoveFood {
                slot: MealSlot::Snacks,
                food_id: food.id,
            },
        );
        assert_eq!(removed, log);
    }

    #[test]
    fn test_dispatch_recomputes_totals_and_persists() {
        let mut store = MealLogStore::open(Box::new(MemoryStorage::new())).unwrap();
        assert_eq!(store.totals(), NutritionInfo::default());

        store
            .dispatch(&MealLogAction::AddFood {
                slot: MealSlot::Breakfast,
                food: banana(),
            })
            .unwrap();

        assert_eq!(store.totals().calories, 105);
        assert_eq!(store.meals().breakfast.len(), 1);
    }

    #[test]
    fn test_hydration_restores_persisted_log() {
        let mut seed = MealLog::default();
        seed.slot_mut(MealSlot::Dinner).push(banana());

        let store = MealLogStore::open(Box::new(MemoryStorage::seeded(seed.clone()))).unwrap();
        assert_eq!(store.meals(), &seed);
        assert_eq!(store.totals().calories, 105);
    }
}
