//! Column kind definitions for relation schemas.

use std::fmt;

/// Column kinds supported by relation schemas.
///
/// Schema files declare each column with a single token: `int` marks an
/// integer column and any other token marks a string column, which is why
/// the conversion from a token never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// 64-bit signed integer column.
    Integer,
    /// UTF-8 string column.
    Text,
}

impl From<&str> for DataType {
    fn from(token: &str) -> Self {
        if token == "int" {
            Self::Integer
        } else {
            Self::Text
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let type_str = match self {
            Self::Integer => "int",
            Self::Text => "string",
        };
        write!(f, "{type_str}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_token_maps_to_integer() {
        assert_eq!(DataType::from("int"), DataType::Integer);
    }

    #[test]
    fn any_other_token_maps_to_text() {
        for token in ["string", "str", "text", "varchar"] {
            assert_eq!(DataType::from(token), DataType::Text);
        }
    }

    #[test]
    fn display_roundtrip() {
        for t in [DataType::Integer, DataType::Text] {
            assert_eq!(DataType::from(t.to_string().as_str()), t);
        }
    }
}
