use linked_hash_map::LinkedHashMap;

use crate::bytestring::ByteString;

/// Dictionary keys iterate in insertion order, which for a decoded value is
/// the order they appeared on the wire.
pub type Dictionary = LinkedHashMap<ByteString, Value>;

/// One bencode value.
///
/// The four variants mirror the four grammar productions; matching on them is
/// exhaustive, so the encoder and pretty-printer have no fallback case.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Value {
    Integer(i64),
    String(ByteString),
    List(Vec<Value>),
    Dictionary(Dictionary),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Dictionary(_) => "dictionary",
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::String(bs) => Some(bs.as_bytes()),
            _ => None,
        }
    }

    /// Returns the byte string as text, if it is one and holds valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(bs) => bs.as_str(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Value::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// Looks up `key` if this value is a dictionary.
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.as_dict().and_then(|dict| dict.get(key))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn value_is_shareable() {
        assert_send_sync::<Value>();
    }

    #[test]
    fn accessors_match_variant() {
        let int = Value::Integer(42);
        assert_eq!(int.as_integer(), Some(42));
        assert_eq!(int.as_bytes(), None);
        assert_eq!(int.kind(), "integer");

        let s = Value::String(ByteString(b"moo".to_vec()));
        assert_eq!(s.as_str(), Some("moo"));
        assert_eq!(s.as_bytes(), Some(&b"moo"[..]));
        assert_eq!(s.as_list(), None);

        let bin = Value::String(ByteString(vec![0xff, 0x00]));
        assert_eq!(bin.as_str(), None);
        assert_eq!(bin.as_bytes(), Some(&[0xff, 0x00][..]));
    }

    #[test]
    fn get_reads_dictionary_entries() {
        let mut dict = Dictionary::new();
        dict.insert(ByteString(b"cow".to_vec()), Value::String(ByteString(b"moo".to_vec())));
        let value = Value::Dictionary(dict);

        assert_eq!(value.get(b"cow").and_then(Value::as_str), Some("moo"));
        assert_eq!(value.get(b"pig"), None);
        assert_eq!(Value::Integer(1).get(b"cow"), None);
    }
}
