#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("bad char {0:?} in format")]
    BadChar(char),

    #[error("repeat count overflows field count")]
    CountOverflow,

    #[error("repeat count given without a type code")]
    DanglingCount,

    #[error("format has no order marker and no type codes")]
    Empty,
}
