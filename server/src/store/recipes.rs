//! Recipe accessor: fetch-by-id, fetch-picture, update, insert.

use diesel::prelude::*;
use potluck_core::image::{decompress_stored, transcode_for_storage, ImagePatch};
use potluck_core::types::Recipe;

use crate::db::DbPool;
use crate::models::{IngredientRow, NewIngredientRow, NewRecipeRow, RecipeChangeset, RecipeRow};
use crate::schema::{ingredients, recipes};
use crate::store::{users, StoreError};

/// Load a recipe together with its ingredient rows.
///
/// Ingredients come back as a second structured query, one row each in
/// insertion order, rather than any aggregated encoding.
pub fn fetch_by_id(pool: &DbPool, idx: i32) -> Result<Recipe, StoreError> {
    let mut conn = pool.get()?;

    let row: RecipeRow = recipes::table
        .find(idx)
        .select(RecipeRow::as_select())
        .first(&mut conn)
        .optional()?
        .ok_or(StoreError::RecipeNotFound(idx))?;

    let ingredient_rows: Vec<IngredientRow> = ingredients::table
        .filter(ingredients::recipe_id.eq(idx))
        .order(ingredients::id.asc())
        .select(IngredientRow::as_select())
        .load(&mut conn)?;

    Ok(row.into_recipe(ingredient_rows))
}

/// Return the stored picture, decompressed. Missing recipe and missing
/// picture are indistinguishable to the caller.
pub fn fetch_picture(pool: &DbPool, idx: i32) -> Result<Vec<u8>, StoreError> {
    let mut conn = pool.get()?;

    let image: Option<Option<Vec<u8>>> = recipes::table
        .find(idx)
        .select(recipes::image)
        .first(&mut conn)
        .optional()?;

    match image.flatten() {
        Some(blob) => Ok(decompress_stored(&blob)?),
        None => Err(StoreError::PictureNotFound(idx)),
    }
}

/// Update a recipe the caller owns. The ingredient set is replaced wholesale
/// (delete then bulk insert) in the same transaction as the row update.
pub fn update(
    pool: &DbPool,
    caller_email: &str,
    recipe: &Recipe,
    image: ImagePatch,
) -> Result<Recipe, StoreError> {
    let idx = recipe.id.ok_or(StoreError::Unsaved)?;

    let image_patch: Option<Option<Vec<u8>>> = match image {
        ImagePatch::Unchanged => None,
        ImagePatch::Clear => Some(None),
        ImagePatch::Set(raw) => Some(Some(transcode_for_storage(&raw)?)),
    };
    let steps = serde_json::to_string(&recipe.steps)?;

    let mut conn = pool.get()?;

    if !users::owns_recipe(&mut conn, caller_email, idx)? {
        return Err(StoreError::NotOwner {
            email: caller_email.to_string(),
            recipe_id: idx,
        });
    }

    conn.transaction::<_, StoreError, _>(|conn| {
        let updated = diesel::update(recipes::table.find(idx))
            .set(&RecipeChangeset {
                author: &recipe.author,
                title: &recipe.title,
                description: &recipe.description,
                steps: &steps,
                cooking_time: recipe.cooking_time,
                servings: recipe.servings,
                image: image_patch,
            })
            .execute(conn)?;
        if updated == 0 {
            return Err(StoreError::RecipeNotFound(idx));
        }

        diesel::delete(ingredients::table.filter(ingredients::recipe_id.eq(idx)))
            .execute(conn)?;

        let new_rows: Vec<NewIngredientRow> = recipe
            .ingredients
            .iter()
            .map(|i| NewIngredientRow {
                name: &i.name,
                quantity: i.quantity,
                units: &i.units,
                recipe_id: idx,
            })
            .collect();
        diesel::insert_into(ingredients::table)
            .values(&new_rows)
            .execute(conn)?;

        Ok(())
    })?;

    Ok(recipe.clone())
}

/// Insert a recipe and its ingredients, returning it with the store-assigned
/// id filled in. On insert only `ImagePatch::Set` stores a picture.
pub fn insert(pool: &DbPool, mut recipe: Recipe, image: ImagePatch) -> Result<Recipe, StoreError> {
    let stored_image = match image {
        ImagePatch::Set(raw) => Some(transcode_for_storage(&raw)?),
        ImagePatch::Unchanged | ImagePatch::Clear => None,
    };
    let steps = serde_json::to_string(&recipe.steps)?;

    let mut conn = pool.get()?;

    let idx = conn.transaction::<i32, StoreError, _>(|conn| {
        let idx: i32 = diesel::insert_into(recipes::table)
            .values(NewRecipeRow {
                author: &recipe.author,
                title: &recipe.title,
                description: &recipe.description,
                steps: &steps,
                cooking_time: recipe.cooking_time,
                servings: recipe.servings,
                image: stored_image.as_deref(),
            })
            .returning(recipes::id)
            .get_result(conn)?;

        let new_rows: Vec<NewIngredientRow> = recipe
            .ingredients
            .iter()
            .map(|i| NewIngredientRow {
                name: &i.name,
                quantity: i.quantity,
                units: &i.units,
                recipe_id: idx,
            })
            .collect();
        diesel::insert_into(ingredients::table)
            .values(&new_rows)
            .execute(conn)?;

        Ok(idx)
    })?;

    recipe.id = Some(idx);
    Ok(recipe)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use chrono::Utc;
    use potluck_core::types::Ingredient;

    use super::*;
    use crate::db::test_pool;
    use crate::store::testing::{sample_recipe, seed_post, seed_user};

    fn sample_png() -> Vec<u8> {
        let img = image::DynamicImage::new_rgb8(8, 8);
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    /// Insert + seed a post so `owner@example.com` may edit the recipe.
    fn insert_owned(pool: &crate::db::DbPool, image: ImagePatch) -> Recipe {
        let saved = insert(pool, sample_recipe(), image).unwrap();
        let user_id = seed_user(pool, "owner", "owner@example.com");
        seed_post(pool, user_id, saved.id.unwrap(), Utc::now().naive_utc());
        saved
    }

    #[test]
    fn insert_assigns_id_and_roundtrips() {
        let pool = test_pool();
        let saved = insert(&pool, sample_recipe(), ImagePatch::Unchanged).unwrap();
        let idx = saved.id.expect("insert must assign an id");

        let fetched = fetch_by_id(&pool, idx).unwrap();
        assert_eq!(fetched, saved);
        assert_eq!(fetched.steps, vec!["boil", "drain"]);
        assert_eq!(fetched.servings, 2);
        assert_eq!(fetched.ingredients.len(), 2);
        assert_eq!(fetched.ingredients[0].name, "spaghetti");
    }

    #[test]
    fn fetch_unknown_recipe_is_not_found() {
        let pool = test_pool();
        assert!(matches!(
            fetch_by_id(&pool, 999),
            Err(StoreError::RecipeNotFound(999))
        ));
    }

    #[test]
    fn picture_roundtrips_through_transcoding() {
        let pool = test_pool();
        let raw = sample_png();
        let saved = insert(&pool, sample_recipe(), ImagePatch::Set(raw.clone())).unwrap();

        let picture = fetch_picture(&pool, saved.id.unwrap()).unwrap();
        let expected = decompress_stored(&transcode_for_storage(&raw).unwrap()).unwrap();
        assert_eq!(picture, expected);
    }

    #[test]
    fn picture_missing_when_inserted_without_one() {
        let pool = test_pool();
        let saved = insert(&pool, sample_recipe(), ImagePatch::Unchanged).unwrap();
        assert!(matches!(
            fetch_picture(&pool, saved.id.unwrap()),
            Err(StoreError::PictureNotFound(_))
        ));
    }

    #[test]
    fn picture_missing_for_unknown_recipe() {
        let pool = test_pool();
        assert!(matches!(
            fetch_picture(&pool, 42),
            Err(StoreError::PictureNotFound(42))
        ));
    }

    #[test]
    fn update_rejects_non_owner() {
        let pool = test_pool();
        let saved = insert(&pool, sample_recipe(), ImagePatch::Unchanged).unwrap();
        seed_user(&pool, "mallory", "mallory@example.com");

        let result = update(&pool, "mallory@example.com", &saved, ImagePatch::Unchanged);
        assert!(matches!(result, Err(StoreError::NotOwner { .. })));
    }

    #[test]
    fn update_rejects_unsaved_recipe() {
        let pool = test_pool();
        let result = update(
            &pool,
            "owner@example.com",
            &sample_recipe(),
            ImagePatch::Unchanged,
        );
        assert!(matches!(result, Err(StoreError::Unsaved)));
    }

    #[test]
    fn update_replaces_fields_and_ingredients() {
        let pool = test_pool();
        let saved = insert_owned(&pool, ImagePatch::Unchanged);

        let mut edited = saved.clone();
        edited.title = "Spaghetti aglio e olio".to_string();
        edited.servings = 4;
        edited.steps = vec!["boil".to_string(), "fry garlic".to_string(), "toss".to_string()];
        edited.ingredients = vec![Ingredient {
            name: "garlic".to_string(),
            quantity: 3.0,
            units: "cloves".to_string(),
        }];

        let returned = update(&pool, "owner@example.com", &edited, ImagePatch::Unchanged).unwrap();
        assert_eq!(returned, edited);

        let fetched = fetch_by_id(&pool, saved.id.unwrap()).unwrap();
        assert_eq!(fetched, edited);
        assert_eq!(fetched.ingredients.len(), 1);
    }

    #[test]
    fn update_without_image_preserves_stored_picture() {
        let pool = test_pool();
        let raw = sample_png();
        let saved = insert_owned(&pool, ImagePatch::Set(raw));
        let before = fetch_picture(&pool, saved.id.unwrap()).unwrap();

        update(&pool, "owner@example.com", &saved, ImagePatch::Unchanged).unwrap();

        let after = fetch_picture(&pool, saved.id.unwrap()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn update_with_clear_drops_stored_picture() {
        let pool = test_pool();
        let raw = sample_png();
        let saved = insert_owned(&pool, ImagePatch::Set(raw));

        update(&pool, "owner@example.com", &saved, ImagePatch::Clear).unwrap();

        assert!(matches!(
            fetch_picture(&pool, saved.id.unwrap()),
            Err(StoreError::PictureNotFound(_))
        ));
    }

    #[test]
    fn update_with_set_replaces_stored_picture() {
        let pool = test_pool();
        let saved = insert_owned(&pool, ImagePatch::Unchanged);
        let raw = sample_png();

        update(
            &pool,
            "owner@example.com",
            &saved,
            ImagePatch::Set(raw.clone()),
        )
        .unwrap();

        let picture = fetch_picture(&pool, saved.id.unwrap()).unwrap();
        let expected = decompress_stored(&transcode_for_storage(&raw).unwrap()).unwrap();
        assert_eq!(picture, expected);
    }
}
