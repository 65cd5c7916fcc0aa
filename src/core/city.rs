//! City records and name normalization.
//!
//! All rule checks compare *normalized* names: trimmed and lower-cased.
//! Display keeps the catalog's original spelling.

/// Normalize a city name for comparison.
///
/// ```
/// use city_chain::core::normalize_name;
///
/// assert_eq!(normalize_name("  Boston "), "boston");
/// assert_eq!(normalize_name("Нижний Новгород"), "нижний новгород");
/// ```
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Lower-cased first character of a name, ignoring surrounding whitespace.
#[must_use]
pub fn first_letter(name: &str) -> Option<char> {
    name.trim().chars().next().map(fold_char)
}

/// Lower-cased last character of a name, ignoring surrounding whitespace.
///
/// This is the letter the next city in the chain must start with.
#[must_use]
pub fn last_letter(name: &str) -> Option<char> {
    name.trim().chars().next_back().map(fold_char)
}

/// Lower-case a single character.
///
/// Characters whose lowercase form expands to several code points keep their
/// first one, which is enough for letter matching.
#[must_use]
pub fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Geographic position of a city.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coords {
    pub lat: f64,
    pub lon: f64,
}

/// One city from the catalog.
///
/// Immutable once the catalog is built. `used` is a display hint only; the
/// authoritative record of played cities is `GameState`.
#[derive(Clone, Debug, PartialEq)]
pub struct CityRecord {
    /// Name as spelled in the catalog (trimmed).
    pub name: String,
    pub population: u64,
    /// Administrative subject (region).
    pub subject: String,
    pub district: String,
    pub coords: Coords,
    pub used: bool,
}

impl CityRecord {
    /// Create a record with zeroed statistics. Handy for small catalogs.
    pub fn named(name: impl Into<String>) -> Self {
        let name: String = name.into();
        Self {
            name: name.trim().to_string(),
            population: 0,
            subject: String::new(),
            district: String::new(),
            coords: Coords { lat: 0.0, lon: 0.0 },
            used: false,
        }
    }

    /// Normalized name used for lookups.
    #[must_use]
    pub fn key(&self) -> String {
        normalize_name(&self.name)
    }

    /// Lower-cased first letter of the name.
    #[must_use]
    pub fn first_letter(&self) -> Option<char> {
        first_letter(&self.name)
    }

    /// Lower-cased last letter of the name.
    #[must_use]
    pub fn last_letter(&self) -> Option<char> {
        last_letter(&self.name)
    }
}

impl std::fmt::Display for CityRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.subject.is_empty() {
            write!(f, " ({}", self.subject)?;
            if self.population > 0 {
                write!(f, ", pop. {}", self.population)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}
