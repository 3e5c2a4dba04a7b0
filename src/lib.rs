#![cfg_attr(nightly, feature(no_coverage))]

pub mod codec;
pub use codec::Value;

mod error;
pub use error::Error;

pub mod format;
pub use format::Format;

/// Packs `values` into a byte buffer laid out by `fmt`.
///
/// The format is parsed fresh on every call; parse a [`Format`] yourself
/// and use [`codec::encode`] to reuse one layout across calls.
pub fn pack(fmt: &str, values: &[Value]) -> Result<Vec<u8>, Error> {
    let format = Format::parse(fmt)?;
    Ok(codec::encode(&format, values)?)
}

/// Unpacks `buffer` into the scalar values laid out by `fmt`.
///
/// The buffer length must match the format's size exactly.
pub fn unpack(fmt: &str, buffer: &[u8]) -> Result<Vec<Value>, Error> {
    let format = Format::parse(fmt)?;
    Ok(codec::decode(&format, buffer)?)
}

/// Variadic front end for [`pack`]: any mix of primitive integers, floats
/// and bools that convert into [`Value`].
///
/// ```rust
/// let data = packform::pack!("<IH", 14u32, 12u16)?;
/// assert_eq!(data, [14, 0, 0, 0, 12, 0]);
/// # Ok::<(), packform::Error>(())
/// ```
#[macro_export]
macro_rules! pack {
    ($fmt:expr $(, $value:expr)* $(,)?) => {
        $crate::pack($fmt, &[$($crate::Value::from($value)),*])
    };
}

#[cfg(test)]
mod tests {

    use coverage_helper::test;
    use matches::assert_matches;

    use crate::{codec, format, pack, unpack, Error, Value};

    #[test]
    fn pack_unpack_two_fields() {
        let data = pack!("<IH", 14u32, 12u16).expect("pack");
        assert_eq!(data, [14, 0, 0, 0, 12, 0]);

        let values = unpack("<IH", &data).expect("unpack");
        assert_eq!(values, [Value::Int(14), Value::Int(12)]);

        // native mode needs no padding here, so the size is stable too.
        assert_eq!(pack!("IH", 14u32, 12u16).expect("pack").len(), 6);
    }

    #[test]
    fn float_fields() {
        assert_eq!(pack!("<f", 10.0f32).expect("pack"), [0, 0, 32, 65]);
        assert_eq!(
            pack!("<d", 10.0).expect("pack"),
            [0, 0, 0, 0, 0, 0, 36, 64]
        );
        // a double narrows into an `f` field.
        assert_eq!(pack!("<f", 10.0).expect("pack"), [0, 0, 32, 65]);
    }

    #[test]
    fn bad_format() {
        assert_matches!(
            pack("a", &[]),
            Err(Error::Format(format::Error::BadChar('a')))
        );
        assert_matches!(pack("", &[]), Err(Error::Format(format::Error::Empty)));
    }

    #[test]
    fn bad_arity() {
        assert_matches!(
            pack("i", &[]),
            Err(Error::Codec(codec::Error::Arity { .. }))
        );
        assert_matches!(
            pack!("i", 2, 2),
            Err(Error::Codec(codec::Error::Arity { .. }))
        );
    }

    #[test]
    fn bad_buffer_size() {
        assert_matches!(
            unpack("<IH", &[0; 5]),
            Err(Error::Codec(codec::Error::Size {
                expected: 6,
                actual: 5
            }))
        );
    }

    #[test]
    fn marker_only_format() {
        assert_eq!(pack!("<").expect("pack"), Vec::<u8>::new());
        assert_eq!(unpack("<", &[]).expect("unpack"), Vec::<Value>::new());
    }

    #[test]
    fn mixed_round_trip() {
        let data = pack!(">2h?dQ", -300i16, 300i16, true, -2.5, u64::MAX).expect("pack");
        let values = unpack(">2h?dQ", &data).expect("unpack");
        assert_eq!(
            values,
            [
                Value::Int(-300),
                Value::Int(300),
                Value::Bool(true),
                Value::F64(-2.5),
                Value::Int(i128::from(u64::MAX)),
            ]
        );
    }
}
