//! Language variant selection
//!
//! The interpreter models two mutually exclusive variants of the language. A
//! variant decides both the program grammar and how variable names compare.

use crate::runtime::NamePolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `PROGRAM name; VAR ...; BEGIN ... END.` with case-insensitive names
    #[default]
    Typed,
    /// Bare `BEGIN ... END.` with case-sensitive names
    Untyped,
}

impl Dialect {
    /// How the calculator compares variable names under this variant
    pub fn name_policy(&self) -> NamePolicy {
        match self {
            Dialect::Typed => NamePolicy::CaseInsensitive,
            Dialect::Untyped => NamePolicy::Exact,
        }
    }

    /// Whether programs start with a `PROGRAM` header and declarations
    pub fn has_program_header(&self) -> bool {
        matches!(self, Dialect::Typed)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Dialect::Typed => write!(f, "typed"),
            Dialect::Untyped => write!(f, "untyped"),
        }
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "typed" => Ok(Dialect::Typed),
            "untyped" => Ok(Dialect::Untyped),
            other => Err(format!(
                "unknown dialect '{}', expected 'typed' or 'untyped'",
                other
            )),
        }
    }
}
