use std::borrow::Borrow;
use std::fmt::Display;

// Custom ByteString wrapper so keys and values are raw bytes, never text.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ByteString(pub Vec<u8>);

impl ByteString {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the contents as text if they are valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

pub trait ToByteString {
    fn to_byte_string(&self) -> ByteString;
}

impl ToByteString for &str {
    fn to_byte_string(&self) -> ByteString {
        ByteString(self.as_bytes().to_vec())
    }
}

impl ToByteString for &[u8] {
    fn to_byte_string(&self) -> ByteString {
        ByteString(self.to_vec())
    }
}

impl From<&str> for ByteString {
    fn from(s: &str) -> Self {
        s.to_byte_string()
    }
}

impl From<String> for ByteString {
    fn from(s: String) -> Self {
        ByteString(s.into_bytes())
    }
}

impl From<&[u8]> for ByteString {
    fn from(b: &[u8]) -> Self {
        b.to_byte_string()
    }
}

impl<const N: usize> From<&[u8; N]> for ByteString {
    fn from(b: &[u8; N]) -> Self {
        ByteString(b.to_vec())
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(b: Vec<u8>) -> Self {
        ByteString(b)
    }
}

// Lets a `LinkedHashMap<ByteString, _>` be queried with a plain `&[u8]`.
impl Borrow<[u8]> for ByteString {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for ByteString {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Display for ByteString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = String::from_utf8_lossy(&self.0);
        write!(f, "{}", s)
    }
}
