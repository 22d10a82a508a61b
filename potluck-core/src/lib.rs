pub mod error;
pub mod image;
pub mod token;
pub mod types;

pub use error::{ImageError, TokenError};
pub use image::{decompress_stored, transcode_for_storage, ImagePatch, STORED_IMAGE_WIDTH};
pub use token::{decode_token, issue_token, Claims, TokenKey, ACCESS_SCOPE};
pub use types::{Ingredient, Post, Recipe, User};
