use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content backend error: {0}")]
    Backend(#[from] opendal::Error),
}
