#![allow(dead_code)]

pub mod mocks;

use forkful_core::domain::entities::DraftFields;

pub fn named_snapshot(name: &str) -> DraftFields {
    DraftFields {
        name: name.to_string(),
        ..DraftFields::default()
    }
}

pub fn full_snapshot() -> DraftFields {
    DraftFields {
        name: "Tomato Soup".to_string(),
        ingredients: "tomatoes\nwater\nsalt".to_string(),
        instructions: "Simmer everything for 20 minutes.".to_string(),
        category: "Dinner".to_string(),
        prep_time: "10".to_string(),
        cook_time: "20".to_string(),
        servings: "4".to_string(),
        image_url: "https://example.com/soup.jpg".to_string(),
    }
}
