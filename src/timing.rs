//! Meal-time inference and the time-of-day menu filter. A dish survives
//! the filter only when both its timing category and its dish type overlap
//! the tables for the inferred meal time.

use chrono::{NaiveTime, Timelike};
use strum::Display;

use crate::menu::Dish;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MealTime {
    Breakfast,
    Brunch,
    Lunch,
    Dinner,
    Snack,
    #[strum(serialize = "Midnight Snack")]
    MidnightSnack,
}

/// Maps a wall-clock time to the meal it falls into. The midnight snack
/// window wraps past midnight; the 2:00-6:00 gap reads as a plain snack.
pub fn infer_meal_time(time: NaiveTime) -> MealTime {
    match time.hour() {
        6..=9 => MealTime::Breakfast,
        10..=11 => MealTime::Brunch,
        12..=16 => MealTime::Lunch,
        17..=21 => MealTime::Dinner,
        22..=23 | 0..=1 => MealTime::MidnightSnack,
        _ => MealTime::Snack,
    }
}

/// Which labeled timing categories count as a match for the meal time.
pub fn matching_timing_categories(meal: MealTime) -> &'static [&'static str] {
    match meal {
        MealTime::Breakfast => &["Breakfast"],
        MealTime::Brunch | MealTime::Lunch | MealTime::Dinner => &["Brunch", "Lunch", "Dinner"],
        MealTime::Snack | MealTime::MidnightSnack => &["Snack", "Midnight Snack"],
    }
}

/// Which dish types are worth suggesting at the meal time.
pub fn suggested_meal_categories(meal: MealTime) -> &'static [&'static str] {
    match meal {
        MealTime::Breakfast => &["Main Course", "Salad", "Drink"],
        MealTime::Brunch | MealTime::Lunch | MealTime::Dinner => {
            &["Main Course", "Side Dish", "Starter", "Soup"]
        }
        MealTime::Snack | MealTime::MidnightSnack => &[
            "Main Course",
            "Side Dish",
            "Starter",
            "Soup",
            "Salad",
            "Dessert",
            "Drink",
            "Snack",
        ],
    }
}

fn intersects(labels: &[String], table: &[&str]) -> bool {
    labels.iter().any(|label| table.contains(&label.as_str()))
}

pub fn filter_menu(menu: &[Dish], meal: MealTime) -> Vec<&Dish> {
    let timings = matching_timing_categories(meal);
    let types = suggested_meal_categories(meal);
    menu.iter()
        .filter(|dish| {
            intersects(dish.timing_categories(), timings)
                && intersects(dish.dish_types(), types)
        })
        .collect()
}
