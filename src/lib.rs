//! Bencode codec for BitTorrent and DHT messages.
//!
//! ```
//! use dht_bencode::{decode, encode, Value};
//!
//! let value = decode(b"d3:cow3:moo4:spam4:eggse").unwrap();
//! assert_eq!(value.get(b"cow"), Some(&Value::string("moo")));
//! assert_eq!(encode(&value), b"d3:cow3:moo4:spam4:eggse");
//! ```
//!
//! Decoding stops after the first complete value; use [`decode_exact`] to
//! reject trailing bytes. Integers are non-negative unless
//! [`DecodeOptions::allow_negative`] is set. Dictionaries keep their wire
//! order; [`encode_canonical`] sorts keys for hashing.

mod bdecode;
mod bencode;
mod bytestring;
mod construct;
mod error;
mod pretty;
mod value;

pub use bdecode::{
    decode, decode_exact, decode_prefix, decode_with, BDecoder, DecodeOptions, DEFAULT_MAX_DEPTH,
};
pub use bencode::{encode, encode_canonical, encode_into, encode_ordered, KeyOrder};
pub use bytestring::{ByteString, ToByteString};
pub use construct::from_json;
pub use error::{ConstructError, ErrorKind, SyntaxError};
pub use pretty::prettify;
pub use value::{Dictionary, Value};
