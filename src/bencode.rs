use tracing::trace;

use crate::bytestring::ByteString;
use crate::value::{Dictionary, Value};

/// Order in which dictionary entries are written.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum KeyOrder {
    /// Iteration order of the map, i.e. insertion or wire order.
    #[default]
    Insertion,
    /// Sorted by raw key bytes, as BitTorrent canonical form requires.
    Canonical,
}

/// Encodes `value`, writing dictionary entries in insertion order.
pub fn encode(value: &Value) -> Vec<u8> {
    encode_ordered(value, KeyOrder::Insertion)
}

/// Encodes `value` with every dictionary's keys sorted by raw bytes.
pub fn encode_canonical(value: &Value) -> Vec<u8> {
    encode_ordered(value, KeyOrder::Canonical)
}

pub fn encode_ordered(value: &Value, order: KeyOrder) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_into(value, order, &mut buf);
    trace!(len = buf.len(), ?order, "encoded bencode value");
    buf
}

/// Appends the encoding of `value` to `buf`.
pub fn encode_into(value: &Value, order: KeyOrder, buf: &mut Vec<u8>) {
    match value {
        Value::Integer(int) => encode_int(*int, buf),
        Value::String(bytes) => encode_bytestring(bytes, buf),
        Value::List(list) => encode_list(list, order, buf),
        Value::Dictionary(dict) => encode_dict(dict, order, buf),
    }
}

impl Value {
    pub fn encode(&self) -> Vec<u8> {
        encode(self)
    }

    pub fn encode_canonical(&self) -> Vec<u8> {
        encode_canonical(self)
    }
}

fn encode_dict(dict: &Dictionary, order: KeyOrder, buf: &mut Vec<u8>) {
    buf.push(b'd');
    match order {
        KeyOrder::Insertion => {
            for (key, val) in dict.iter() {
                encode_bytestring(key, buf);
                encode_into(val, order, buf);
            }
        }
        KeyOrder::Canonical => {
            let mut entries: Vec<_> = dict.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            for (key, val) in entries {
                encode_bytestring(key, buf);
                encode_into(val, order, buf);
            }
        }
    }
    buf.push(b'e');
}

fn encode_list(list: &[Value], order: KeyOrder, buf: &mut Vec<u8>) {
    buf.push(b'l');
    for item in list {
        encode_into(item, order, buf);
    }
    buf.push(b'e')
}

fn encode_bytestring(bs: &ByteString, buf: &mut Vec<u8>) {
    encode_num(bs.len(), buf);
    buf.push(b':');
    buf.extend_from_slice(bs.as_bytes());
}

// Negative values are written as-is; only a decoder with `allow_negative`
// reads them back.
fn encode_int(int: i64, buf: &mut Vec<u8>) {
    buf.push(b'i');
    encode_num(int, buf);
    buf.push(b'e');
}

fn encode_num(num: impl ToString, buf: &mut Vec<u8>) {
    buf.extend(num.to_string().bytes());
}
