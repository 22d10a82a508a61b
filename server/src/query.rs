//! Read-side resolver: the operations the GraphQL layer exposes. Schema
//! wiring lives with the API gateway; this type only authenticates callers
//! and delegates to the store accessors.

use potluck_core::error::TokenError;
use potluck_core::token::{decode_token, TokenKey, ACCESS_SCOPE};
use potluck_core::types::{Post, Recipe, User};
use thiserror::Error;

use crate::db::DbPool;
use crate::store::{self, StoreError};

#[derive(Error, Debug)]
pub enum QueryError {
    /// Authentication failure: the token's identity has no user record. The
    /// underlying not-found is deliberately collapsed into this so callers
    /// cannot probe which emails exist.
    #[error("No logged user")]
    NoLoggedUser,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct Query {
    pub pool: DbPool,
    pub key: TokenKey,
}

impl Query {
    pub fn new(pool: DbPool, key: TokenKey) -> Self {
        Self { pool, key }
    }

    /// Unauthenticated passthrough to the recipe accessor.
    pub fn recipe(&self, idx: i32) -> Result<Recipe, QueryError> {
        Ok(store::recipes::fetch_by_id(&self.pool, idx)?)
    }

    pub fn current_user(&self, token: &str) -> Result<User, QueryError> {
        let claims = decode_token(token, ACCESS_SCOPE, &self.key)?;
        match store::users::get_user_by_email(&self.pool, &claims.identity) {
            Err(StoreError::UserNotFound(_)) => Err(QueryError::NoLoggedUser),
            result => Ok(result?),
        }
    }

    pub fn feed(&self, token: &str, items: i64, offset: i64) -> Result<Vec<Post>, QueryError> {
        let claims = decode_token(token, ACCESS_SCOPE, &self.key)?;
        Ok(store::posts::get_feed(
            &self.pool,
            &claims.identity,
            items,
            offset,
        )?)
    }
}
