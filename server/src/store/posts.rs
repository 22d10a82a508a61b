//! Feed accessor: newest-first pages of posts.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use potluck_core::types::Post;

use crate::db::DbPool;
use crate::schema::{posts, users};
use crate::store::StoreError;

/// One page of the feed, newest first. The caller's identity is established
/// upstream; the page itself is the global stream.
pub fn get_feed(
    pool: &DbPool,
    _email: &str,
    items: i64,
    offset: i64,
) -> Result<Vec<Post>, StoreError> {
    let mut conn = pool.get()?;

    let rows: Vec<(i32, String, i32, NaiveDateTime)> = posts::table
        .inner_join(users::table)
        .order(posts::posted_at.desc())
        .limit(items)
        .offset(offset)
        .select((
            posts::id,
            users::username,
            posts::recipe_id,
            posts::posted_at,
        ))
        .load(&mut conn)?;

    Ok(rows
        .into_iter()
        .map(|(id, author, recipe_id, posted_at)| Post {
            id,
            author,
            recipe_id,
            posted_at,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::db::test_pool;
    use crate::store::testing::{seed_post, seed_user};

    #[test]
    fn feed_pages_newest_first() {
        let pool = test_pool();
        let carol = seed_user(&pool, "carol", "carol@example.com");
        let dan = seed_user(&pool, "dan", "dan@example.com");

        let base = Utc::now().naive_utc();
        seed_post(&pool, carol, 1, base - Duration::hours(3));
        seed_post(&pool, dan, 2, base - Duration::hours(2));
        seed_post(&pool, carol, 3, base - Duration::hours(1));

        let page = get_feed(&pool, "carol@example.com", 2, 0).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].recipe_id, 3);
        assert_eq!(page[0].author, "carol");
        assert_eq!(page[1].recipe_id, 2);
        assert_eq!(page[1].author, "dan");

        let rest = get_feed(&pool, "carol@example.com", 2, 2).unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].recipe_id, 1);
    }

    #[test]
    fn feed_is_empty_without_posts() {
        let pool = test_pool();
        assert!(get_feed(&pool, "carol@example.com", 10, 0)
            .unwrap()
            .is_empty());
    }
}
