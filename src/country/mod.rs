//! Country records and the Hofstede dimension set.
//!
//! A [`CountryRecord`] is a fixed-shape struct with one field per canonical
//! dimension; [`Dimension`] names those fields so callers can iterate over
//! them in canonical order.

mod dimension;
mod record;

pub use dimension::Dimension;
pub use record::{load_countries, parse_countries, CountryRecord};
