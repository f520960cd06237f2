use thiserror::Error;

/// The single error returned by the decoder.
///
/// `offset` is the byte position in the input where the problem was detected.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
#[error("syntax error at byte {offset}: {kind}")]
pub struct SyntaxError {
    pub offset: usize,
    pub kind: ErrorKind,
}

impl SyntaxError {
    pub(crate) fn new(offset: usize, kind: ErrorKind) -> Self {
        SyntaxError { offset, kind }
    }
}

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    #[error("unexpected end of file")]
    EndOfFile,
    #[error("expected identifier '{}', found '{}'", .expected, .found.escape_ascii())]
    MissingIdentifier { expected: char, found: u8 },
    #[error("expected string length")]
    StringWithoutLength,
    #[error("expected a number")]
    NotANumber,
    #[error("number overflows its integer type")]
    NumberOverflow,
    #[error("negative zero is not allowed, use 0 instead")]
    NegativeZero,
    #[error("declared string length {declared} exceeds the {remaining} remaining bytes")]
    StringTooLong { declared: usize, remaining: usize },
    #[error("unexpected byte '{}'", .0.escape_ascii())]
    UnexpectedByte(u8),
    #[error("nesting deeper than {0} levels")]
    NestingTooDeep(usize),
    #[error("{0} bytes of trailing data after value")]
    TrailingData(usize),
}

/// Raised when a generic literal tree contains a shape bencode cannot hold.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ConstructError {
    #[error("unsupported type {shape} at {path}: only integers, strings, arrays and objects are allowed")]
    UnsupportedType { shape: &'static str, path: String },
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn messages_name_offset_and_bytes() {
        let err = SyntaxError::new(
            3,
            ErrorKind::MissingIdentifier {
                expected: 'e',
                found: b'f',
            },
        );
        assert_eq!(
            err.to_string(),
            "syntax error at byte 3: expected identifier 'e', found 'f'"
        );

        let err = SyntaxError::new(0, ErrorKind::UnexpectedByte(0x01));
        assert_eq!(err.to_string(), "syntax error at byte 0: unexpected byte '\\x01'");
    }
}
