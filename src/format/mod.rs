use log::trace;

mod error;
pub use error::Error;

/// One-letter type code from the format alphabet.
///
/// The code is the single source of truth for a field's width and
/// signedness; the codec never carries its own width table.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Code {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    Bool,
}

impl Code {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'b' => Some(Self::I8),
            'B' => Some(Self::U8),
            'h' => Some(Self::I16),
            'H' => Some(Self::U16),
            'i' | 'l' => Some(Self::I32),
            'I' | 'L' => Some(Self::U32),
            'q' => Some(Self::I64),
            'Q' => Some(Self::U64),
            'f' => Some(Self::F32),
            'd' => Some(Self::F64),
            '?' => Some(Self::Bool),
            _ => None,
        }
    }

    /// Encoded width in bytes.
    pub const fn width(self) -> usize {
        match self {
            Self::I8 | Self::U8 | Self::Bool => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::U64 | Self::F64 => 8,
        }
    }

    pub const fn signed(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

/// Byte order and alignment selected by the optional leading marker.
///
/// One mode applies to the whole format; mixing modes mid-string is not
/// supported.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Mode {
    /// `<`: little-endian, no padding.
    LittleEndian,
    /// `>` or `!`: big-endian, no padding.
    BigEndian,
    /// `=`: host order, no padding.
    Native,
    /// `@` or no marker: host order, fields padded to their own width.
    NativeAligned,
}

impl Mode {
    fn from_marker(c: char) -> Option<Self> {
        match c {
            '<' => Some(Self::LittleEndian),
            '>' | '!' => Some(Self::BigEndian),
            '=' => Some(Self::Native),
            '@' => Some(Self::NativeAligned),
            _ => None,
        }
    }

    pub(crate) const fn big_endian(self) -> bool {
        match self {
            Self::LittleEndian => false,
            Self::BigEndian => true,
            Self::Native | Self::NativeAligned => cfg!(target_endian = "big"),
        }
    }

    /// Zero bytes inserted before a field of `width` at offset `off`.
    pub(crate) const fn padding(self, off: usize, width: usize) -> usize {
        match self {
            Self::NativeAligned => (width - off % width) % width,
            _ => 0,
        }
    }
}

/// One parsed field: a type code and its repeat count.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Field {
    pub code: Code,
    pub count: usize,
}

/// A parsed format string: the byte-order mode and the ordered fields.
///
/// Parse once, then hand to [`crate::codec::encode`] or
/// [`crate::codec::decode`] as many times as needed. A `Format` is never
/// mutated after parsing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Format {
    mode: Mode,
    fields: Vec<Field>,
}

impl Format {
    /// # Description
    /// Parses a format string into its byte-order mode and field list.
    ///
    /// An optional leading `<`, `>`, `!`, `=` or `@` selects the mode;
    /// each following type code may carry a decimal repeat count (`4I`
    /// reads as four `I` fields). Whitespace between fields is ignored.
    ///
    /// # Errors
    /// Fails if the string contains an unknown type code, a repeat count
    /// with no code after it, or neither a marker nor any type code at
    /// all. A marker-only string is legal and describes zero bytes.
    pub fn parse(fmt: &str) -> Result<Self, Error> {
        let mut chars = fmt.chars().peekable();

        let mut mode = None;
        if let Some(&c) = chars.peek() {
            if let Some(m) = Mode::from_marker(c) {
                chars.next();
                mode = Some(m);
            }
        }
        let marked = mode.is_some();
        let mode = mode.unwrap_or(Mode::NativeAligned);

        let mut fields = Vec::new();
        while let Some(c) = chars.next() {
            if c.is_whitespace() {
                continue;
            }

            let mut count = None;
            let mut c = c;
            if c.is_ascii_digit() {
                let mut n = 0usize;
                loop {
                    let digit = c as usize - '0' as usize;
                    n = n
                        .checked_mul(10)
                        .and_then(|n| n.checked_add(digit))
                        .ok_or(Error::CountOverflow)?;
                    match chars.next() {
                        Some(next) if next.is_ascii_digit() => c = next,
                        Some(next) => {
                            c = next;
                            break;
                        }
                        None => return Err(Error::DanglingCount),
                    }
                }
                count = Some(n);
            }

            let code = Code::from_char(c).ok_or(Error::BadChar(c))?;
            fields.push(Field {
                code,
                count: count.unwrap_or(1),
            });
        }

        // A bare string with nothing to describe is an error, not a no-op;
        // a lone marker still describes an empty (zero-byte) layout.
        if fields.is_empty() && !marked {
            return Err(Error::Empty);
        }

        trace!("parsed {:?} into {} fields, mode {:?}", fmt, fields.len(), mode);

        Ok(Self { mode, fields })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Total number of scalar values the format describes.
    pub fn count(&self) -> usize {
        self.fields.iter().map(|field| field.count).sum()
    }

    /// Encoded size in bytes, including any alignment padding.
    pub fn size(&self) -> usize {
        let mut size = 0;
        for field in &self.fields {
            size += self.mode.padding(size, field.code.width());
            size += field.code.width() * field.count;
        }
        size
    }
}
