use tracing::{debug, trace};

use crate::bytestring::ByteString;
use crate::error::{ErrorKind, SyntaxError};
use crate::value::{Dictionary, Value};

type Result<T> = std::result::Result<T, SyntaxError>;

pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Knobs for [`BDecoder`].
///
/// The defaults accept exactly the grammar `i` 1*DIGIT `e` for integers, so
/// `i-3e` is rejected unless `allow_negative` is set.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DecodeOptions {
    /// Maximum number of nested lists/dictionaries.
    pub max_depth: usize,
    /// Accept a leading `-` inside integers (never in string lengths).
    pub allow_negative: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            allow_negative: false,
        }
    }
}

/// Recursive-descent decoder over a borrowed buffer.
///
/// The cursor only ever moves forward. After an error the decoder's position
/// is unspecified and it should be dropped.
pub struct BDecoder<'a> {
    bytes: &'a [u8],
    cursor: usize,
    depth: usize,
    options: DecodeOptions,
}

impl<'a> BDecoder<'a> {
    pub fn new(bytes: &'a [u8]) -> BDecoder<'a> {
        Self::with_options(bytes, DecodeOptions::default())
    }

    pub fn with_options(bytes: &'a [u8], options: DecodeOptions) -> BDecoder<'a> {
        BDecoder {
            bytes,
            cursor: 0,
            depth: 0,
            options,
        }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// The unconsumed suffix of the input.
    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.cursor..]
    }

    /// Parses the next complete value and advances past it.
    pub fn decode(&mut self) -> Result<Value> {
        self.depth = 0;
        self.parse_type()
    }

    fn parse_str(&mut self) -> Result<ByteString> {
        let len = self.read_length()?;
        self.expect_char(b':')?;
        let remaining = self.bytes.len() - self.cursor;
        if len > remaining {
            return Err(self.error(ErrorKind::StringTooLong {
                declared: len,
                remaining,
            }));
        }
        let start = self.cursor;
        self.cursor += len;
        Ok(ByteString(self.bytes[start..self.cursor].to_vec()))
    }

    fn parse_int(&mut self) -> Result<i64> {
        self.expect_char(b'i')?;
        let i = self.read_int()?;
        self.expect_char(b'e')?;
        Ok(i)
    }

    fn parse_list(&mut self) -> Result<Vec<Value>> {
        self.enter()?;
        self.expect_char(b'l')?;
        let mut list = Vec::new();
        while self.peek().filter(|&c| c != b'e').is_some() {
            list.push(self.parse_type()?);
        }
        self.expect_char(b'e')?;
        self.depth -= 1;
        Ok(list)
    }

    // Duplicate keys overwrite earlier ones; key order is not checked.
    fn parse_dict(&mut self) -> Result<Dictionary> {
        self.enter()?;
        self.expect_char(b'd')?;
        let mut dict = Dictionary::new();
        while self.peek().filter(|&c| c != b'e').is_some() {
            let key = self.parse_str()?;
            let value = self.parse_type()?;
            dict.insert(key, value);
        }
        self.expect_char(b'e')?;
        self.depth -= 1;
        Ok(dict)
    }

    fn parse_type(&mut self) -> Result<Value> {
        match self.peek() {
            None => Err(self.error(ErrorKind::EndOfFile)),
            Some(b'0'..=b'9') => self.parse_str().map(Value::String),
            Some(b'i') => self.parse_int().map(Value::Integer),
            Some(b'l') => self.parse_list().map(Value::List),
            Some(b'd') => self.parse_dict().map(Value::Dictionary),
            Some(chr) => Err(self.error(ErrorKind::UnexpectedByte(chr))),
        }
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.options.max_depth {
            return Err(self.error(ErrorKind::NestingTooDeep(self.options.max_depth)));
        }
        self.depth += 1;
        Ok(())
    }

    fn read_length(&mut self) -> Result<usize> {
        let start = self.cursor;
        let digits = self.read_digits();
        if digits.is_empty() {
            return Err(self.error(ErrorKind::StringWithoutLength));
        }
        digits
            .iter()
            .try_fold(0usize, |acc, &d| {
                acc.checked_mul(10)?.checked_add(usize::from(d - b'0'))
            })
            .ok_or(SyntaxError::new(start, ErrorKind::NumberOverflow))
    }

    fn read_int(&mut self) -> Result<i64> {
        let start = self.cursor;
        let negative = self.options.allow_negative && self.peek() == Some(b'-');
        if negative {
            self.cursor += 1;
        }
        let digits = self.read_digits();
        match digits.first() {
            None => return Err(self.error(ErrorKind::NotANumber)),
            Some(b'0') if negative => {
                return Err(SyntaxError::new(start, ErrorKind::NegativeZero))
            }
            _ => {}
        }
        // Accumulating towards the sign keeps i64::MIN representable.
        digits
            .iter()
            .try_fold(0i64, |acc, &d| {
                let d = i64::from(d - b'0');
                let acc = acc.checked_mul(10)?;
                if negative {
                    acc.checked_sub(d)
                } else {
                    acc.checked_add(d)
                }
            })
            .ok_or(SyntaxError::new(start, ErrorKind::NumberOverflow))
    }

    fn read_digits(&mut self) -> &'a [u8] {
        let start = self.cursor;
        while self.peek().filter(u8::is_ascii_digit).is_some() {
            self.cursor += 1;
        }
        &self.bytes[start..self.cursor]
    }

    fn expect_char(&mut self, expected: u8) -> Result<u8> {
        match self.peek() {
            None => Err(self.error(ErrorKind::EndOfFile)),
            Some(chr) if chr == expected => self.advance(),
            Some(chr) => Err(self.error(ErrorKind::MissingIdentifier {
                expected: expected as char,
                found: chr,
            })),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.cursor).copied()
    }

    fn advance(&mut self) -> Result<u8> {
        let v = self.peek().ok_or_else(|| self.error(ErrorKind::EndOfFile))?;
        self.cursor += 1;
        Ok(v)
    }

    fn error(&self, kind: ErrorKind) -> SyntaxError {
        SyntaxError::new(self.cursor, kind)
    }
}

/// Decodes the first value in `inp`. Bytes after it are ignored.
pub fn decode(inp: &[u8]) -> Result<Value> {
    decode_prefix(inp).map(|(value, _)| value)
}

/// Decodes the first value in `inp` and reports how many bytes it took.
pub fn decode_prefix(inp: &[u8]) -> Result<(Value, usize)> {
    decode_with(inp, DecodeOptions::default())
}

/// Like [`decode_prefix`] with explicit options.
pub fn decode_with(inp: &[u8], options: DecodeOptions) -> Result<(Value, usize)> {
    let mut parser = BDecoder::with_options(inp, options);
    match parser.decode() {
        Ok(value) => {
            let consumed = parser.position();
            trace!(
                consumed,
                trailing = inp.len() - consumed,
                kind = value.kind(),
                "decoded bencode value"
            );
            Ok((value, consumed))
        }
        Err(err) => {
            debug!(offset = err.offset, error = %err.kind, "bencode syntax error");
            Err(err)
        }
    }
}

/// Decodes `inp` as exactly one value; trailing bytes are an error.
pub fn decode_exact(inp: &[u8]) -> Result<Value> {
    let (value, consumed) = decode_prefix(inp)?;
    if consumed != inp.len() {
        return Err(SyntaxError::new(
            consumed,
            ErrorKind::TrailingData(inp.len() - consumed),
        ));
    }
    Ok(value)
}
