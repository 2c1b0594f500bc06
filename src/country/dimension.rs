//! The canonical Hofstede dimensions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CultureMapError;

/// One of the seven Hofstede cultural dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// Power distance index
    Pdi,
    /// Individualism
    Idv,
    /// Masculinity
    Mas,
    /// Uncertainty avoidance index
    Uai,
    /// Long-term orientation
    Lto,
    /// Indulgence
    Ind,
    /// Indulgence versus restraint
    Ivr,
}

impl Dimension {
    /// Number of canonical dimensions
    pub const COUNT: usize = 7;

    /// All dimensions in canonical column order.
    pub const ALL: [Dimension; Self::COUNT] = [
        Dimension::Pdi,
        Dimension::Idv,
        Dimension::Mas,
        Dimension::Uai,
        Dimension::Lto,
        Dimension::Ind,
        Dimension::Ivr,
    ];

    /// The dimensions shown one-by-one in the dashboard; `ivr` is left out.
    pub const DISPLAYED: [Dimension; 6] = [
        Dimension::Pdi,
        Dimension::Idv,
        Dimension::Mas,
        Dimension::Uai,
        Dimension::Lto,
        Dimension::Ind,
    ];

    /// Lower-case field name, e.g. `"pdi"`.
    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Pdi => "pdi",
            Dimension::Idv => "idv",
            Dimension::Mas => "mas",
            Dimension::Uai => "uai",
            Dimension::Lto => "lto",
            Dimension::Ind => "ind",
            Dimension::Ivr => "ivr",
        }
    }

    /// Column position in a dimension table.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dimension {
    type Err = CultureMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Dimension::ALL
            .iter()
            .copied()
            .find(|d| d.name() == lower)
            .ok_or_else(|| CultureMapError::ConfigError(format!("unknown dimension '{}'", s)))
    }
}
