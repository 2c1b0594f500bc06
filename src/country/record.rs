//! Country records

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::Dimension;
use crate::error::{CultureMapError, Result};

/// A country and its score on every Hofstede dimension.
///
/// Every dimension field is required when deserializing; a record that lacks
/// one is rejected instead of defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    /// Unique display name
    pub title: String,
    pub pdi: f64,
    pub idv: f64,
    pub mas: f64,
    pub uai: f64,
    pub lto: f64,
    pub ind: f64,
    pub ivr: f64,
}

impl CountryRecord {
    /// Build a record from scores given in canonical dimension order.
    pub fn new(title: impl Into<String>, scores: [f64; Dimension::COUNT]) -> Self {
        let [pdi, idv, mas, uai, lto, ind, ivr] = scores;
        Self {
            title: title.into(),
            pdi,
            idv,
            mas,
            uai,
            lto,
            ind,
            ivr,
        }
    }

    /// Score on a single dimension
    pub fn score(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Pdi => self.pdi,
            Dimension::Idv => self.idv,
            Dimension::Mas => self.mas,
            Dimension::Uai => self.uai,
            Dimension::Lto => self.lto,
            Dimension::Ind => self.ind,
            Dimension::Ivr => self.ivr,
        }
    }

    /// Raw scores in canonical dimension order
    pub fn scores(&self) -> [f64; Dimension::COUNT] {
        [
            self.pdi, self.idv, self.mas, self.uai, self.lto, self.ind, self.ivr,
        ]
    }

    /// Scores with negative values floored at zero, as fed to distance metrics.
    pub fn clamped_scores(&self) -> [f64; Dimension::COUNT] {
        self.scores().map(|x| x.max(0.0))
    }

    /// Reject records carrying a NaN or infinite score.
    pub fn validate(&self) -> Result<()> {
        for dimension in Dimension::ALL {
            let value = self.score(dimension);
            if !value.is_finite() {
                return Err(CultureMapError::InvalidInput(format!(
                    "country '{}' has non-finite {} score: {}",
                    self.title, dimension, value
                )));
            }
        }
        Ok(())
    }
}

/// Parse a JSON array of country records.
///
/// A record missing a dimension field, or carrying a non-numeric one, is a
/// malformed-input error.
pub fn parse_countries(json: &str) -> Result<Vec<CountryRecord>> {
    let countries: Vec<CountryRecord> = serde_json::from_str(json).map_err(|e| {
        if e.is_data() {
            CultureMapError::InvalidInput(format!("malformed country record: {}", e))
        } else {
            CultureMapError::from(e)
        }
    })?;

    for country in &countries {
        country.validate()?;
    }

    tracing::debug!(n_countries = countries.len(), "Parsed country records");
    Ok(countries)
}

/// Read and parse a JSON file of country records.
pub fn load_countries(path: impl AsRef<Path>) -> Result<Vec<CountryRecord>> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    parse_countries(&contents)
}
