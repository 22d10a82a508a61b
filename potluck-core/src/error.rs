use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Invalid transport encoding: {0}")]
    Transport(#[from] base64::DecodeError),

    #[error("Failed to process image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Failed to read image stream: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Invalid token: {0}")]
    Invalid(#[from] jwt::Error),

    #[error("Token is not valid for scope {0:?}")]
    WrongScope(String),

    #[error("Token has expired")]
    Expired,
}
