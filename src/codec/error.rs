#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("expected {expected} values for packing (got {actual})")]
    Arity { expected: usize, actual: usize },

    #[error("value {index} ({value}) out of range [{min}, {max}]")]
    OutOfRange {
        index: usize,
        value: i128,
        min: i128,
        max: i128,
    },

    #[error("buffer of {actual} bytes does not match format size {expected}")]
    Size { expected: usize, actual: usize },

    #[error("value {index} expected to be {expected} (got {actual})")]
    Type {
        index: usize,
        expected: &'static str,
        actual: &'static str,
    },
}
