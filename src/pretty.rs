//! JSON-like rendering for diagnostics.
//!
//! The output is not JSON: string contents are written lossily as UTF-8 with no
//! escaping. Use it for logs and debugging, never for interchange.

use std::fmt;

use crate::value::Value;

pub fn prettify(value: &Value) -> String {
    value.to_string()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(int) => write!(f, "{}", int),
            Value::String(bs) => write!(f, "\"{}\"", bs),
            Value::List(list) => {
                f.write_str("[")?;
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Dictionary(dict) => {
                f.write_str("{")?;
                for (i, (key, item)) in dict.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "\"{}\": {}", key, item)?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bdecode::decode;

    #[test]
    fn scalars() {
        assert_eq!(prettify(&Value::Integer(42)), "42");
        assert_eq!(prettify(&Value::string("spam")), "\"spam\"");
        assert_eq!(prettify(&Value::string("")), "\"\"");
    }

    #[test]
    fn containers_have_no_trailing_comma() {
        assert_eq!(prettify(&Value::List(vec![])), "[]");
        assert_eq!(prettify(&decode(b"de").unwrap()), "{}");
        assert_eq!(prettify(&decode(b"li1e3:abce").unwrap()), "[1,\"abc\"]");
        assert_eq!(
            prettify(&decode(b"d3:cow3:moo4:spaml1:a1:bee").unwrap()),
            "{\"cow\": \"moo\",\"spam\": [\"a\",\"b\"]}"
        );
    }

    #[test]
    fn strings_are_not_escaped() {
        assert_eq!(prettify(&Value::string("a\"b\n")), "\"a\"b\n\"");
        assert_eq!(prettify(&Value::bytes(vec![b'x', 0xff])), "\"x\u{fffd}\"");
    }
}
