use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single ingredient line item. Always owned by exactly one recipe;
/// callers never see an independent identity for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: f64,
    pub units: String,
}

/// A recipe as exchanged with callers. The stored image blob is not part of
/// this type; it travels separately through `fetch_picture` and `ImagePatch`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Store-assigned on insert; `None` for a recipe that has not been saved.
    pub id: Option<i32>,
    pub author: String,
    pub title: String,
    pub description: String,
    /// Ordered preparation steps, persisted as a JSON-encoded list.
    pub steps: Vec<String>,
    pub cooking_time: i32,
    pub servings: i32,
    pub ingredients: Vec<Ingredient>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    /// Recipe ids this user has posted and is therefore allowed to modify.
    pub posts: Vec<i32>,
}

/// A feed entry: somebody posted a recipe at some point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub author: String,
    pub recipe_id: i32,
    pub posted_at: NaiveDateTime,
}
