//! Text encodings for leaf element values.
//!
//! Every leaf decodes from and encodes to the invariant textual form: decimal
//! point `.`, no grouping separators, `true`/`false` for booleans.

use rust_decimal::Decimal;
use std::str::FromStr;

/// A value that lives in the text content of a single element.
pub trait XmlValue: Sized {
    /// Name of the expected type, used in decode errors.
    const KIND: &'static str;

    fn decode(text: &str) -> Option<Self>;

    fn encode(&self) -> String;
}

macro_rules! integer_value {
    ($($ty:ty => $kind:literal),* $(,)?) => {
        $(
            impl XmlValue for $ty {
                const KIND: &'static str = $kind;

                fn decode(text: &str) -> Option<Self> {
                    text.trim().parse().ok()
                }

                fn encode(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

integer_value!(
    i32 => "integer",
    u32 => "non-negative integer",
    i64 => "long integer",
    u64 => "non-negative long integer",
);

impl XmlValue for f64 {
    const KIND: &'static str = "double";

    fn decode(text: &str) -> Option<Self> {
        let value: f64 = text.trim().parse().ok()?;
        value.is_finite().then_some(value)
    }

    fn encode(&self) -> String {
        self.to_string()
    }
}

impl XmlValue for Decimal {
    const KIND: &'static str = "decimal";

    fn decode(text: &str) -> Option<Self> {
        Decimal::from_str(text.trim()).ok()
    }

    fn encode(&self) -> String {
        self.normalize().to_string()
    }
}

impl XmlValue for bool {
    const KIND: &'static str = "boolean";

    fn decode(text: &str) -> Option<Self> {
        match text.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }

    fn encode(&self) -> String {
        let text = if *self { "true" } else { "false" };
        text.to_string()
    }
}

impl XmlValue for String {
    const KIND: &'static str = "string";

    fn decode(text: &str) -> Option<Self> {
        Some(text.to_string())
    }

    fn encode(&self) -> String {
        self.clone()
    }
}
