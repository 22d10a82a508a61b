use chrono::NaiveDateTime;
use diesel::prelude::*;
use potluck_core::types::{Ingredient, Recipe};

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RecipeRow {
    pub id: i32,
    pub author: String,
    pub title: String,
    pub description: String,
    pub steps: String,
    pub cooking_time: i32,
    pub servings: i32,
    pub image: Option<Vec<u8>>,
}

impl RecipeRow {
    /// Assemble the caller-facing recipe from its row plus the structured
    /// ingredient rows loaded alongside it.
    pub fn into_recipe(self, ingredients: Vec<IngredientRow>) -> Recipe {
        let steps: Vec<String> = serde_json::from_str(&self.steps).unwrap_or_default();
        Recipe {
            id: Some(self.id),
            author: self.author,
            title: self.title,
            description: self.description,
            steps,
            cooking_time: self.cooking_time,
            servings: self.servings,
            ingredients: ingredients
                .into_iter()
                .map(|row| Ingredient {
                    name: row.name,
                    quantity: row.quantity,
                    units: row.units,
                })
                .collect(),
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipeRow<'a> {
    pub author: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub steps: &'a str,
    pub cooking_time: i32,
    pub servings: i32,
    pub image: Option<&'a [u8]>,
}

/// Changeset for `update`. The double-`Option` image field carries the
/// three-state patch: `None` leaves the stored blob untouched, `Some(None)`
/// clears it, `Some(Some(_))` replaces it.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::recipes)]
pub struct RecipeChangeset<'a> {
    pub author: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub steps: &'a str,
    pub cooking_time: i32,
    pub servings: i32,
    pub image: Option<Option<Vec<u8>>>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::ingredients)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[allow(dead_code)]
pub struct IngredientRow {
    pub id: i32,
    pub name: String,
    pub quantity: f64,
    pub units: String,
    pub recipe_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::ingredients)]
pub struct NewIngredientRow<'a> {
    pub name: &'a str,
    pub quantity: f64,
    pub units: &'a str,
    pub recipe_id: i32,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRow {
    pub id: i32,
    pub username: String,
    pub email: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
#[allow(dead_code)]
pub struct NewUserRow<'a> {
    pub username: &'a str,
    pub email: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::posts)]
#[allow(dead_code)]
pub struct NewPostRow {
    pub user_id: i32,
    pub recipe_id: i32,
    pub posted_at: NaiveDateTime,
}
