use log::trace;

use crate::format::{Code, Format};

mod error;
pub use error::Error;

/// A scalar crossing the pack/unpack boundary.
///
/// `Int` covers the full signed and unsigned 64-bit ranges; range checks
/// against the target field happen at encode time. Float fields keep their
/// own width so decoded bit patterns survive a re-encode untouched.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Value {
    Int(i128),
    F32(f32),
    F64(f64),
    Bool(bool),
}

impl Value {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::F32(_) | Self::F64(_) => "float",
            Self::Bool(_) => "bool",
        }
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Self::Int(v as i128)
            }
        })*
    };
}

value_from_int!(i8, u8, i16, u16, i32, u32, i64, u64);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::F32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// # Description
/// Encodes `values` into the byte layout described by `format`.
///
/// Fields are written in order, each in the format's byte-order mode;
/// aligned mode inserts zero bytes before a field so its offset is a
/// multiple of its width.
///
/// # Errors
/// Fails if the value count does not match the format, a value's kind
/// does not match its field, or an integer does not fit its field's
/// width. Nothing is returned on failure; there is no partial output.
pub fn encode(format: &Format, values: &[Value]) -> Result<Vec<u8>, Error> {
    let expected = format.count();
    if values.len() != expected {
        return Err(Error::Arity {
            expected,
            actual: values.len(),
        });
    }

    trace!("encoding {} values into {} bytes", expected, format.size());

    let big = format.mode().big_endian();
    let mut out = Vec::with_capacity(format.size());
    let mut index = 0;
    for field in format.fields() {
        let pad = format.mode().padding(out.len(), field.code.width());
        out.resize(out.len() + pad, 0);
        for _ in 0..field.count {
            encode_one(field.code, values[index], index, big, &mut out)?;
            index += 1;
        }
    }

    Ok(out)
}

/// # Description
/// Decodes `buf` back into the scalar values described by `format`.
///
/// The exact mathematical inverse of [`encode`]: integers reconstruct
/// exactly and floats reassemble their IEEE-754 bit pattern bit for bit,
/// NaN payloads included.
///
/// # Errors
/// Fails if the buffer length is not exactly the format's size; truncated
/// or oversized buffers are never partially decoded.
pub fn decode(format: &Format, buf: &[u8]) -> Result<Vec<Value>, Error> {
    let expected = format.size();
    if buf.len() != expected {
        return Err(Error::Size {
            expected,
            actual: buf.len(),
        });
    }

    trace!("decoding {} bytes into {} values", expected, format.count());

    let big = format.mode().big_endian();
    let mut values = Vec::with_capacity(format.count());
    let mut off = 0;
    for field in format.fields() {
        let width = field.code.width();
        off += format.mode().padding(off, width);
        for _ in 0..field.count {
            values.push(decode_one(field.code, &buf[off..off + width], big));
            off += width;
        }
    }

    Ok(values)
}

fn encode_one(
    code: Code,
    value: Value,
    index: usize,
    big: bool,
    out: &mut Vec<u8>,
) -> Result<(), Error> {
    match code {
        Code::F32 => {
            let v = match value {
                Value::F32(v) => v,
                Value::F64(v) => v as f32,
                Value::Int(v) => v as f32,
                Value::Bool(_) => return Err(type_error(index, "float", value)),
            };
            put_uint(u64::from(v.to_bits()), 4, big, out);
        }
        Code::F64 => {
            let v = match value {
                Value::F64(v) => v,
                Value::F32(v) => f64::from(v),
                Value::Int(v) => v as f64,
                Value::Bool(_) => return Err(type_error(index, "float", value)),
            };
            put_uint(v.to_bits(), 8, big, out);
        }
        Code::Bool => match value {
            Value::Bool(v) => out.push(u8::from(v)),
            _ => return Err(type_error(index, "bool", value)),
        },
        _ => {
            let v = match value {
                Value::Int(v) => v,
                _ => return Err(type_error(index, "integer", value)),
            };
            let (min, max) = bounds(code.width(), code.signed());
            if v < min || v > max {
                return Err(Error::OutOfRange {
                    index,
                    value: v,
                    min,
                    max,
                });
            }
            put_uint(v as u64, code.width(), big, out);
        }
    }

    Ok(())
}

fn decode_one(code: Code, raw: &[u8], big: bool) -> Value {
    match code {
        Code::F32 => Value::F32(f32::from_bits(get_uint(raw, big) as u32)),
        Code::F64 => Value::F64(f64::from_bits(get_uint(raw, big))),
        Code::Bool => Value::Bool(raw[0] != 0),
        _ => {
            let v = get_uint(raw, big);
            let v = if code.signed() {
                i128::from(sign_extend(v, raw.len()))
            } else {
                i128::from(v)
            };
            Value::Int(v)
        }
    }
}

const fn type_error(index: usize, expected: &'static str, value: Value) -> Error {
    Error::Type {
        index,
        expected,
        actual: value.kind(),
    }
}

const fn bounds(width: usize, signed: bool) -> (i128, i128) {
    let bits = width as u32 * 8;
    if signed {
        (-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1)
    } else {
        (0, (1i128 << bits) - 1)
    }
}

// Writes the low `width` bytes of `v`; negative values are passed as
// their two's complement, so the low bytes are the field's encoding.
fn put_uint(v: u64, width: usize, big: bool, out: &mut Vec<u8>) {
    let bytes = v.to_le_bytes();
    if big {
        out.extend(bytes[..width].iter().rev());
    } else {
        out.extend_from_slice(&bytes[..width]);
    }
}

fn get_uint(raw: &[u8], big: bool) -> u64 {
    let mut v = 0u64;
    if big {
        for &b in raw {
            v = (v << 8) | u64::from(b);
        }
    } else {
        for &b in raw.iter().rev() {
            v = (v << 8) | u64::from(b);
        }
    }
    v
}

const fn sign_extend(v: u64, width: usize) -> i64 {
    let shift = 64 - width as u32 * 8;
    ((v << shift) as i64) >> shift
}
