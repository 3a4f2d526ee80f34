// ABOUTME: Daily nutrition totals aggregation over the meal log
// ABOUTME: Pure fold with field-wise addition, re-derivable from the log at any time
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Daily totals aggregation.
//!
//! [`daily_totals`] is a pure function of the meal log and never
//! authoritative on its own; the store caches its result for display but
//! recomputes it after every mutation.

use crate::models::{MealLog, NutritionInfo};

/// Field-wise sum of every entry's nutrition across all slots.
///
/// Deterministic and order-independent; an empty log yields all zeros.
#[must_use]
pub fn daily_totals(log: &MealLog) -> NutritionInfo {
    log.iter_items()
        .fold(NutritionInfo::default(), |acc, item| acc.add(item.nutrition))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::models::{FoodItem, MealSlot};

    fn item(name: &str, calories: u32, protein: u32, carbs: u32, fats: u32) -> FoodItem {
        FoodItem::new(
            name,
            NutritionInfo {
                calories,
                protein,
                carbs,
                fats,
            },
            None,
        )
    }

    #[test]
    fn test_empty_log_is_all_zeros() {
        assert_eq!(daily_totals(&MealLog::default()), NutritionInfo::default());
    }

    #[test]
    fn test_totals_sum_across_slots() {
        let mut log = MealLog::default();
        log.slot_mut(MealSlot::Breakfast)
            .push(item("banana", 105, 1, 27, 0));
        log.slot_mut(MealSlot::Lunch)
            .push(item("chicken breast", 165, 31, 0, 4));
        log.slot_mut(MealSlot::Snacks).push(item("apple", 52, 0, 14, 0));

        let totals = daily_totals(&log);
        assert_eq!(totals.calories, 322);
        assert_eq!(totals.protein, 32);
        assert_eq!(totals.carbs, 41);
        assert_eq!(totals.fats, 4);
    }

    #[test]
    fn test_totals_are_order_independent() {
        let mut a = MealLog::default();
        a.slot_mut(MealSlot::Dinner).push(item("rice", 206, 4, 45, 0));
        a.slot_mut(MealSlot::Dinner).push(item("salmon", 208, 20, 0, 13));

        let mut b = MealLog::default();
        b.slot_mut(MealSlot::Dinner).push(item("salmon", 208, 20, 0, 13));
        b.slot_mut(MealSlot::Dinner).push(item("rice", 206, 4, 45, 0));

        assert_eq!(daily_totals(&a), daily_totals(&b));
    }
}
