use std::cmp::Ordering;
use std::collections::HashMap;
use std::str::FromStr;

use larder_shared::{Error, MeasurementUnit, Result};
use strum::VariantArray;

/// Key under which ingredient lines are merged.
///
/// Ordered by normalized name first, then by the unit's canonical spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AggregationKey {
    pub name: String,
    pub unit: MeasurementUnit,
}

impl Ord for AggregationKey {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.name.as_str(), self.unit.as_ref()).cmp(&(other.name.as_str(), other.unit.as_ref()))
    }
}

impl PartialOrd for AggregationKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Unit strings accepted during normalization.
#[derive(Debug, Clone)]
pub struct UnitVocabulary {
    units: HashMap<String, MeasurementUnit>,
}

impl Default for UnitVocabulary {
    fn default() -> Self {
        Self {
            units: MeasurementUnit::VARIANTS
                .iter()
                .map(|unit| (unit.as_ref().to_owned(), *unit))
                .collect(),
        }
    }
}

impl UnitVocabulary {
    /// Build the vocabulary from the unit strings a recipe store recognizes.
    ///
    /// Strings with no matching [`MeasurementUnit`] are dropped: a line using
    /// them cannot be aggregated and will fail with `InvalidUnit`.
    pub fn new<I, T>(recognized: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut units = HashMap::new();
        for raw in recognized {
            let raw = raw.as_ref().trim();
            match MeasurementUnit::from_str(raw) {
                Ok(unit) => {
                    units.insert(raw.to_owned(), unit);
                }
                Err(_) => tracing::warn!(unit = raw, "ignoring unsupported measurement unit"),
            }
        }

        Self { units }
    }

    pub fn resolve(&self, unit: &str) -> Option<MeasurementUnit> {
        self.units.get(unit.trim()).copied()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Canonical form of an ingredient name: trimmed, lowercased, inner
/// whitespace runs collapsed to a single space.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn normalize(name: &str, unit: &str, vocabulary: &UnitVocabulary) -> Result<AggregationKey> {
    let name = normalize_name(name);
    if name.is_empty() {
        return Err(Error::InvalidName);
    }

    let Some(unit) = vocabulary.resolve(unit) else {
        return Err(Error::InvalidUnit(unit.trim().to_owned()));
    };

    Ok(AggregationKey { name, unit })
}
