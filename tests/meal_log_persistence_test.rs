// ABOUTME: Integration tests for file-backed meal log persistence
// ABOUTME: Validates that a reopened store hydrates the exact log a prior store wrote
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used)]

use tempfile::TempDir;

use bitelog::meal_log::{JsonFileStorage, MealLogAction, MealLogStore};
use bitelog::models::{FoodItem, MealSlot, NutritionInfo};

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

fn oatmeal() -> FoodItem {
    FoodItem::new(
        "oatmeal",
        NutritionInfo {
            calories: 150,
            protein: 5,
            carbs: 27,
            fats: 3,
        },
        Some("https://example.com/oatmeal.jpg".into()),
    )
}

#[test]
fn test_reopened_store_hydrates_persisted_log() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("meals.json");

    {
        let mut store = MealLogStore::open(Box::new(JsonFileStorage::new(&path))).unwrap();
        store
            .dispatch(&MealLogAction::AddFood {
                slot: MealSlot::Breakfast,
                food: oatmeal(),
            })
            .unwrap();
        store
            .dispatch(&MealLogAction::AddFood {
                slot: MealSlot::Snacks,
                food: banana(),
            })
            .unwrap();
    }

    let reopened = MealLogStore::open(Box::new(JsonFileStorage::new(&path))).unwrap();

    assert_eq!(reopened.meals().slot(MealSlot::Breakfast).len(), 1);
    assert_eq!(reopened.meals().slot(MealSlot::Breakfast)[0].name, "oatmeal");
    assert_eq!(reopened.meals().slot(MealSlot::Snacks)[0].name, "banana");
    assert_eq!(reopened.totals().calories, 255);
    assert_eq!(reopened.totals().carbs, 54);
}

#[test]
fn test_removal_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("meals.json");

    let food = banana();
    let id = food.id;

    {
        let mut store = MealLogStore::open(Box::new(JsonFileStorage::new(&path))).unwrap();
        store
            .dispatch(&MealLogAction::AddFood {
                slot: MealSlot::Lunch,
                food,
            })
            .unwrap();
        store
            .dispatch(&MealLogAction::RemoveFood {
                slot: MealSlot::Lunch,
                food_id: id,
            })
            .unwrap();
    }

    let reopened = MealLogStore::open(Box::new(JsonFileStorage::new(&path))).unwrap();
    assert!(reopened.meals().is_empty());
    assert_eq!(reopened.totals(), NutritionInfo::default());
}

#[test]
fn test_missing_file_opens_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope").join("meals.json");

    let store = MealLogStore::open(Box::new(JsonFileStorage::new(path))).unwrap();
    assert!(store.meals().is_empty());
    assert_eq!(store.totals().calories, 0);
}

#[test]
fn test_corrupt_file_opens_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("meals.json");
    std::fs::write(&path, "{not json").unwrap();

    let store = MealLogStore::open(Box::new(JsonFileStorage::new(&path))).unwrap();
    assert!(store.meals().is_empty());
}
