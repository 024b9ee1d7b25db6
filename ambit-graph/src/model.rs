use std::cmp::Ordering;
use std::fmt;

/// Node attributes for the place graphs the traversal engine is
/// exercised against. Identity in visited sets and predecessor maps is
/// the graph's `NodeIndex`, not this struct.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub country: String,
    pub year: Option<u16>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Place {
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        year: Option<u16>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            year,
            latitude,
            longitude,
        }
    }

    /// Neighbor comparator: northernmost first. Changing the neighbor
    /// order changes visit order but never the set of visited nodes.
    pub fn by_latitude_desc(a: &Place, b: &Place) -> Ordering {
        b.latitude
            .partial_cmp(&a.latitude)
            .unwrap_or(Ordering::Equal)
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.country)
    }
}
