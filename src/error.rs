#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("codec error: {0}")]
    Codec(#[from] crate::codec::Error),

    #[error("format error: {0}")]
    Format(#[from] crate::format::Error),
}
