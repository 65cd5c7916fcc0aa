//! The city catalog: every city the game knows about.
//!
//! Built once from raw records and never mutated afterwards. Two indexes sit
//! beside the ordered record list:
//!
//! - normalized name -> record (first occurrence wins for duplicate names)
//! - first letter -> distinct records starting with it, in catalog order

use rustc_hash::FxHashMap;
use serde_json::{Map, Value};
use tracing::debug;

use super::city::{first_letter, normalize_name, CityRecord, Coords};
use crate::error::DataFormatError;

/// Read-only, ordered collection of cities.
#[derive(Clone, Debug)]
pub struct CityCatalog {
    records: Vec<CityRecord>,
    by_name: FxHashMap<String, usize>,
    by_letter: FxHashMap<char, Vec<usize>>,
}

impl CityCatalog {
    /// Build a catalog from already-typed records.
    ///
    /// Fails if there are no records or a name is blank.
    pub fn new(records: Vec<CityRecord>) -> Result<Self, DataFormatError> {
        if records.is_empty() {
            return Err(DataFormatError::EmptyCatalog);
        }

        let mut by_name = FxHashMap::default();
        let mut by_letter: FxHashMap<char, Vec<usize>> = FxHashMap::default();

        for (index, record) in records.iter().enumerate() {
            let key = record.key();
            let Some(letter) = first_letter(&key) else {
                return Err(DataFormatError::EmptyName { index });
            };

            if by_name.contains_key(&key) {
                debug!(index, name = %record.name, "duplicate city name, keeping first");
                continue;
            }
            by_name.insert(key, index);
            by_letter.entry(letter).or_default().push(index);
        }

        Ok(Self {
            records,
            by_name,
            by_letter,
        })
    }

    /// Build a catalog from raw mapping-like records.
    ///
    /// Each record needs `name`, `population`, `subject`, `district` and
    /// `coords.lat` / `coords.lon`. Numbers may also arrive as numeric strings.
    pub fn from_values(values: Vec<Value>) -> Result<Self, DataFormatError> {
        let records = values
            .iter()
            .enumerate()
            .map(|(index, value)| parse_record(index, value))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(records)
    }

    /// Parse a JSON document holding a sequence of city records.
    pub fn from_json_str(json: &str) -> Result<Self, DataFormatError> {
        match serde_json::from_str::<Value>(json)? {
            Value::Array(values) => Self::from_values(values),
            _ => Err(DataFormatError::NotASequence),
        }
    }

    /// All records in catalog order.
    #[must_use]
    pub fn records(&self) -> &[CityRecord] {
        &self.records
    }

    /// Number of records (duplicates included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a catalog built through `new`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a city by name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&CityRecord> {
        self.by_name
            .get(&normalize_name(name))
            .map(|&index| &self.records[index])
    }

    /// Whether a city with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(&normalize_name(name))
    }

    /// Distinct cities starting with `letter` (case-insensitive), in catalog order.
    pub fn starting_with(&self, letter: char) -> impl Iterator<Item = &CityRecord> + '_ {
        let letter = super::city::fold_char(letter);
        self.by_letter
            .get(&letter)
            .into_iter()
            .flatten()
            .map(|&index| &self.records[index])
    }
}

fn parse_record(index: usize, value: &Value) -> Result<CityRecord, DataFormatError> {
    let Value::Object(fields) = value else {
        return Err(DataFormatError::NotARecord { index });
    };

    let name = string_field(index, fields, "name")?;
    if name.trim().is_empty() {
        return Err(DataFormatError::EmptyName { index });
    }

    let population = population_field(index, required(index, fields, "population")?)?;
    let subject = string_field(index, fields, "subject")?;
    let district = string_field(index, fields, "district")?;

    let Value::Object(coords) = required(index, fields, "coords")? else {
        return Err(DataFormatError::InvalidField {
            index,
            field: "coords",
            reason: "expected an object with `lat` and `lon`".to_string(),
        });
    };
    let lat = float_field(index, "coords.lat", coords.get("lat"))?;
    let lon = float_field(index, "coords.lon", coords.get("lon"))?;

    Ok(CityRecord {
        name: name.trim().to_string(),
        population,
        subject,
        district,
        coords: Coords { lat, lon },
        used: false,
    })
}

fn required<'a>(
    index: usize,
    fields: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value, DataFormatError> {
    match fields.get(field) {
        None | Some(Value::Null) => Err(DataFormatError::MissingField { index, field }),
        Some(value) => Ok(value),
    }
}

fn string_field(
    index: usize,
    fields: &Map<String, Value>,
    field: &'static str,
) -> Result<String, DataFormatError> {
    match required(index, fields, field)? {
        Value::String(s) => Ok(s.clone()),
        other => Err(DataFormatError::InvalidField {
            index,
            field,
            reason: format!("expected a string, found {other}"),
        }),
    }
}

fn population_field(index: usize, value: &Value) -> Result<u64, DataFormatError> {
    let invalid = |reason: String| DataFormatError::InvalidField {
        index,
        field: "population",
        reason,
    };

    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                Ok(v)
            } else if let Some(f) = n
                .as_f64()
                .filter(|f| *f >= 0.0 && *f < u64::MAX as f64 && f.fract() == 0.0)
            {
                Ok(f as u64)
            } else {
                Err(invalid(format!("{n} is not a non-negative integer")))
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|e| invalid(format!("{s:?}: {e}"))),
        other => Err(invalid(format!("expected an integer, found {other}"))),
    }
}

fn float_field(
    index: usize,
    field: &'static str,
    value: Option<&Value>,
) -> Result<f64, DataFormatError> {
    let invalid = |reason: String| DataFormatError::InvalidField {
        index,
        field,
        reason,
    };

    match value {
        None | Some(Value::Null) => Err(DataFormatError::MissingField { index, field }),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| invalid(format!("{n} is not representable as f64"))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| invalid(format!("{s:?}: {e}"))),
        Some(other) => Err(invalid(format!("expected a number, found {other}"))),
    }
}
