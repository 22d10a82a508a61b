//! Store accessors. Each call checks a connection out of the pool, does its
//! work (mutations inside a single transaction) and releases the connection
//! on return; nothing is held across calls.

pub mod posts;
pub mod recipes;
pub mod users;

use potluck_core::error::ImageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No recipe with id {0}")]
    RecipeNotFound(i32),

    #[error("No picture for recipe {0}")]
    PictureNotFound(i32),

    #[error("No user with email {0}")]
    UserNotFound(String),

    #[error("User {email} cannot edit recipe {recipe_id}")]
    NotOwner { email: String, recipe_id: i32 },

    #[error("Recipe has not been saved yet")]
    Unsaved,

    #[error("Bad recipe image: {0}")]
    Image(#[from] ImageError),

    #[error("Invalid steps payload: {0}")]
    Steps(#[from] serde_json::Error),

    #[error("Database connection failed: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error(transparent)]
    Database(#[from] diesel::result::Error),
}

#[cfg(test)]
pub mod testing {
    use chrono::NaiveDateTime;
    use diesel::prelude::*;
    use potluck_core::types::{Ingredient, Recipe};

    use crate::db::DbPool;
    use crate::models::{NewPostRow, NewUserRow};
    use crate::schema::{posts, users};

    pub fn seed_user(pool: &DbPool, username: &str, email: &str) -> i32 {
        let mut conn = pool.get().unwrap();
        diesel::insert_into(users::table)
            .values(NewUserRow { username, email })
            .returning(users::id)
            .get_result(&mut conn)
            .unwrap()
    }

    pub fn seed_post(pool: &DbPool, user_id: i32, recipe_id: i32, posted_at: NaiveDateTime) -> i32 {
        let mut conn = pool.get().unwrap();
        diesel::insert_into(posts::table)
            .values(NewPostRow {
                user_id,
                recipe_id,
                posted_at,
            })
            .returning(posts::id)
            .get_result(&mut conn)
            .unwrap()
    }

    pub fn sample_recipe() -> Recipe {
        Recipe {
            id: None,
            author: "carol".to_string(),
            title: "Spaghetti".to_string(),
            description: "Weeknight pasta".to_string(),
            steps: vec!["boil".to_string(), "drain".to_string()],
            cooking_time: 20,
            servings: 2,
            ingredients: vec![
                Ingredient {
                    name: "spaghetti".to_string(),
                    quantity: 500.0,
                    units: "g".to_string(),
                },
                Ingredient {
                    name: "olive oil".to_string(),
                    quantity: 2.0,
                    units: "tbsp".to_string(),
                },
            ],
        }
    }
}
