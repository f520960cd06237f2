//! Building [`Value`]s from plain Rust data.
//!
//! Statically shaped data goes through the `From` impls and the `Value::list`
//! / `Value::dict` helpers, which cannot fail. Loosely typed literal trees
//! (anything already held as a `serde_json::Value`) go through [`from_json`],
//! which rejects the shapes bencode has no production for.

use serde_json::Value as Json;

use crate::bytestring::ByteString;
use crate::error::ConstructError;
use crate::value::{Dictionary, Value};

impl Value {
    pub fn integer(i: i64) -> Value {
        Value::Integer(i)
    }

    pub fn string(s: &str) -> Value {
        Value::String(ByteString::from(s))
    }

    pub fn bytes(b: impl Into<Vec<u8>>) -> Value {
        Value::String(ByteString(b.into()))
    }

    pub fn list<I, V>(items: I) -> Value
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Later duplicates of a key replace earlier ones, as in the decoder.
    pub fn dict<I, K, V>(entries: I) -> Value
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<ByteString>,
        V: Into<Value>,
    {
        Value::Dictionary(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(ByteString::from(s))
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::String(ByteString::from(b))
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::String(ByteString(b))
    }
}

impl From<ByteString> for Value {
    fn from(bs: ByteString) -> Self {
        Value::String(bs)
    }
}

impl From<Vec<Value>> for Value {
    fn from(list: Vec<Value>) -> Self {
        Value::List(list)
    }
}

impl From<Dictionary> for Value {
    fn from(dict: Dictionary) -> Self {
        Value::Dictionary(dict)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::List(iter.into_iter().collect())
    }
}

impl FromIterator<(ByteString, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (ByteString, Value)>>(iter: I) -> Self {
        Value::Dictionary(iter.into_iter().collect())
    }
}

/// Converts a JSON-shaped literal tree into a [`Value`].
///
/// Integers become `Integer`, strings become their UTF-8 bytes, arrays become
/// lists and objects become dictionaries (in the object's iteration order).
/// `null`, booleans, floats and integers beyond `i64` are rejected at the point
/// they are met; the error names the shape and its JSON path.
pub fn from_json(json: &Json) -> Result<Value, ConstructError> {
    convert(json, &mut String::from("$"))
}

fn convert(json: &Json, path: &mut String) -> Result<Value, ConstructError> {
    match json {
        Json::String(s) => Ok(Value::string(s)),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Ok(Value::Integer(i)),
            None if n.is_u64() => Err(unsupported("integer out of range", path)),
            None => Err(unsupported("float", path)),
        },
        Json::Array(items) => {
            let mut list = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let len = path.len();
                path.push_str(&format!("[{}]", i));
                list.push(convert(item, path)?);
                path.truncate(len);
            }
            Ok(Value::List(list))
        }
        Json::Object(map) => {
            let mut dict = Dictionary::new();
            for (key, item) in map {
                let len = path.len();
                path.push('.');
                path.push_str(key);
                dict.insert(ByteString::from(key.as_str()), convert(item, path)?);
                path.truncate(len);
            }
            Ok(Value::Dictionary(dict))
        }
        Json::Bool(_) => Err(unsupported("bool", path)),
        Json::Null => Err(unsupported("null", path)),
    }
}

fn unsupported(shape: &'static str, path: &str) -> ConstructError {
    ConstructError::UnsupportedType {
        shape,
        path: path.to_string(),
    }
}

impl TryFrom<&Json> for Value {
    type Error = ConstructError;

    fn try_from(json: &Json) -> Result<Self, Self::Error> {
        from_json(json)
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn static_constructors() {
        assert_eq!(Value::from(7i64), Value::Integer(7));
        assert_eq!(Value::from(-7i32), Value::Integer(-7));
        assert_eq!(Value::from("spam"), Value::String(ByteString(b"spam".to_vec())));
        assert_eq!(Value::bytes(vec![0u8, 0xff]), Value::String(ByteString(vec![0, 0xff])));

        let list = Value::list(vec![1i64, 2, 3]);
        assert_eq!(
            list,
            Value::List(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)])
        );

        let dict = Value::dict([("cow", Value::from("moo")), ("spam", Value::from("eggs"))]);
        assert_eq!(dict.encode(), b"d3:cow3:moo4:spam4:eggse".to_vec());
    }

    #[test]
    fn dict_helper_last_write_wins() {
        let dict = Value::dict([("a", 1i64), ("a", 2i64)]);
        assert_eq!(dict.as_dict().map(|d| d.len()), Some(1));
        assert_eq!(dict.get(b"a"), Some(&Value::Integer(2)));
    }

    #[test]
    fn json_tree_converts_recursively() {
        let json = json!({
            "name": "node",
            "port": 6881,
            "peers": [[1, "a"], {"id": "x"}],
        });
        let value = from_json(&json).unwrap();

        assert_eq!(value.get(b"name").and_then(Value::as_str), Some("node"));
        assert_eq!(value.get(b"port").and_then(Value::as_integer), Some(6881));
        let peers = value.get(b"peers").and_then(Value::as_list).unwrap();
        assert_eq!(peers[0], Value::list(vec![Value::from(1i64), Value::from("a")]));
        assert_eq!(peers[1].get(b"id").and_then(Value::as_str), Some("x"));
    }

    #[test]
    fn json_rejects_unsupported_shapes() {
        let err = from_json(&json!({"ok": 1, "bad": [1, null]})).unwrap_err();
        assert_eq!(
            err,
            ConstructError::UnsupportedType {
                shape: "null",
                path: "$.bad[1]".to_string(),
            }
        );

        assert_eq!(
            Value::try_from(&json!(true)),
            Err(ConstructError::UnsupportedType {
                shape: "bool",
                path: "$".to_string(),
            })
        );
        assert!(matches!(
            from_json(&json!([1.5])),
            Err(ConstructError::UnsupportedType { shape: "float", .. })
        ));
        assert!(matches!(
            from_json(&json!(u64::MAX)),
            Err(ConstructError::UnsupportedType { shape: "integer out of range", .. })
        ));
    }

    #[test]
    fn json_negative_integers_are_kept() {
        assert_eq!(from_json(&json!(-3)), Ok(Value::Integer(-3)));
    }
}
