//! Rule configuration.
//!
//! The host hands the rule either a ready-made [`IndentOptions`] value or
//! raw JSON configuration deserialized through serde. `indentUnit` accepts
//! a positive integer (that many spaces per level) or the string `"tab"`.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

/// The indentation unit: what one level of nesting is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentUnit {
    /// Each level is this many space characters.
    Spaces(u8),
    /// Each level is a single tab character.
    Tab,
}

impl IndentUnit {
    /// Character count of one indentation level.
    #[inline]
    pub fn size(self) -> u32 {
        match self {
            IndentUnit::Spaces(n) => u32::from(n),
            IndentUnit::Tab => 1,
        }
    }

    /// The configured indentation character.
    #[inline]
    pub fn ch(self) -> char {
        match self {
            IndentUnit::Spaces(_) => ' ',
            IndentUnit::Tab => '\t',
        }
    }

    /// Singular unit name for messages.
    #[inline]
    pub fn unit_name(self) -> &'static str {
        match self {
            IndentUnit::Spaces(_) => "space",
            IndentUnit::Tab => "tab",
        }
    }
}

impl Default for IndentUnit {
    fn default() -> Self {
        IndentUnit::Spaces(2)
    }
}

impl<'de> Deserialize<'de> for IndentUnit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct UnitVisitor;

        impl Visitor<'_> for UnitVisitor {
            type Value = IndentUnit;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a positive integer or \"tab\"")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<IndentUnit, E> {
                match u8::try_from(value) {
                    Ok(0) | Err(_) => Err(E::custom(format!(
                        "indentUnit must be between 1 and 255, got {value}"
                    ))),
                    Ok(n) => Ok(IndentUnit::Spaces(n)),
                }
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<IndentUnit, E> {
                let Ok(unsigned) = u64::try_from(value) else {
                    return Err(E::custom(format!("indentUnit must be positive, got {value}")));
                };
                self.visit_u64(unsigned)
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<IndentUnit, E> {
                if value == "tab" {
                    Ok(IndentUnit::Tab)
                } else {
                    Err(E::custom(format!(
                        "indentUnit must be an integer or \"tab\", got {value:?}"
                    )))
                }
            }
        }

        deserializer.deserialize_any(UnitVisitor)
    }
}

/// Options of the indentation rule.
///
/// Immutable once parsed; one value is shared by a whole analysis pass.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IndentOptions {
    /// The indentation unit.
    #[serde(rename = "indentUnit")]
    pub unit: IndentUnit,

    /// Multiplier for `case`/`default` clauses relative to the switch body
    /// brace. `0` puts case labels flush with the brace.
    #[serde(rename = "switchCaseMultiplier")]
    pub switch_case: i32,

    /// Node-kind name patterns whose subtrees are exempt from validation.
    /// `*` matches any run of characters.
    #[serde(rename = "ignoredSelectors")]
    pub ignored_patterns: Vec<String>,
}

impl Default for IndentOptions {
    fn default() -> Self {
        IndentOptions {
            unit: IndentUnit::default(),
            switch_case: 1,
            ignored_patterns: Vec::new(),
        }
    }
}

impl IndentOptions {
    /// Check invariants that the type system does not enforce.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.unit == IndentUnit::Spaces(0) {
            return Err(OptionsError::ZeroIndentSize);
        }
        Ok(())
    }
}

/// Error validating [`IndentOptions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    /// `indentUnit` was zero spaces; every line would be expected at column 0.
    ZeroIndentSize,
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionsError::ZeroIndentSize => {
                write!(f, "indentUnit must be at least 1 space")
            }
        }
    }
}

impl std::error::Error for OptionsError {}
