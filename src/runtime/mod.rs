//! Tree-walking evaluators for minipascal programs

mod calculator;
mod notation;
mod scope;
mod value;

pub use calculator::Calculator;
pub use notation::{LispTranslator, RpnTranslator};
pub use scope::{NamePolicy, Scope};
pub use value::Number;
