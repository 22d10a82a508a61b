//! User accessor: lookup by email plus the ownership check mutations rely on.

use diesel::dsl::exists;
use diesel::prelude::*;
use potluck_core::types::User;

use crate::db::DbPool;
use crate::models::UserRow;
use crate::schema::{posts, users};
use crate::store::StoreError;

pub fn get_user_by_email(pool: &DbPool, email: &str) -> Result<User, StoreError> {
    let mut conn = pool.get()?;

    let row: UserRow = users::table
        .filter(users::email.eq(email))
        .select(UserRow::as_select())
        .first(&mut conn)
        .optional()?
        .ok_or_else(|| StoreError::UserNotFound(email.to_string()))?;

    let owned_posts: Vec<i32> = posts::table
        .filter(posts::user_id.eq(row.id))
        .order(posts::id.asc())
        .select(posts::recipe_id)
        .load(&mut conn)?;

    Ok(User {
        id: row.id,
        username: row.username,
        email: row.email,
        posts: owned_posts,
    })
}

/// Direct capability check: does a post by this caller cover this recipe?
pub fn owns_recipe(
    conn: &mut SqliteConnection,
    email: &str,
    recipe_id: i32,
) -> QueryResult<bool> {
    diesel::select(exists(
        posts::table
            .inner_join(users::table)
            .filter(users::email.eq(email))
            .filter(posts::recipe_id.eq(recipe_id)),
    ))
    .get_result(conn)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::db::test_pool;
    use crate::store::testing::{seed_post, seed_user};

    #[test]
    fn lookup_returns_owned_recipe_ids() {
        let pool = test_pool();
        let user_id = seed_user(&pool, "carol", "carol@example.com");
        seed_post(&pool, user_id, 11, Utc::now().naive_utc());
        seed_post(&pool, user_id, 12, Utc::now().naive_utc());

        let user = get_user_by_email(&pool, "carol@example.com").unwrap();
        assert_eq!(user.username, "carol");
        assert_eq!(user.posts, vec![11, 12]);
    }

    #[test]
    fn lookup_unknown_email_is_not_found() {
        let pool = test_pool();
        assert!(matches!(
            get_user_by_email(&pool, "nobody@example.com"),
            Err(StoreError::UserNotFound(email)) if email == "nobody@example.com"
        ));
    }

    #[test]
    fn ownership_check_is_per_recipe() {
        let pool = test_pool();
        let user_id = seed_user(&pool, "carol", "carol@example.com");
        seed_post(&pool, user_id, 7, Utc::now().naive_utc());

        let mut conn = pool.get().unwrap();
        assert!(owns_recipe(&mut conn, "carol@example.com", 7).unwrap());
        assert!(!owns_recipe(&mut conn, "carol@example.com", 8).unwrap());
        assert!(!owns_recipe(&mut conn, "nobody@example.com", 7).unwrap());
    }
}
