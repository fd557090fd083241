//! Interpolation method selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TableError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum InterpMethod {
    Linear,
    Nearest,
    Cubic,
}

impl InterpMethod {
    pub const ALL: [InterpMethod; 3] = [Self::Linear, Self::Nearest, Self::Cubic];

    pub fn label(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Nearest => "nearest",
            Self::Cubic => "cubic",
        }
    }
}

impl fmt::Display for InterpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for InterpMethod {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TableError::UnsupportedMethod {
                method: wanted.to_string(),
            })
    }
}

impl TryFrom<String> for InterpMethod {
    type Error = TableError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InterpMethod> for String {
    fn from(method: InterpMethod) -> Self {
        method.label().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_methods() {
        assert_eq!("Linear".parse::<InterpMethod>().unwrap(), InterpMethod::Linear);
        assert_eq!(" cubic".parse::<InterpMethod>().unwrap(), InterpMethod::Cubic);
        assert!(matches!(
            "spline".parse::<InterpMethod>(),
            Err(TableError::UnsupportedMethod { method }) if method == "spline"
        ));
    }
}
