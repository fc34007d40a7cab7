//! In-situ field measurements to be matched against swaths.

/// Column name used for the identifier when a field point carries no
/// table attributes of its own.
pub const DEFAULT_ID_COLUMN: &str = "ID";

/// One geolocated field measurement paired with a candidate granule.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPoint {
    /// Unique identifier of the field measurement
    pub id: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Granule the point is matched against
    pub granule: String,
    /// Every known column of the field row, in table order. These are
    /// copied verbatim to the front of the output record.
    pub attributes: Vec<(String, String)>,
}

impl FieldPoint {
    /// Create a point whose only known attribute is its identifier.
    pub fn new(
        id: impl Into<String>,
        latitude: f64,
        longitude: f64,
        granule: impl Into<String>,
    ) -> Self {
        let id = id.into();
        Self {
            attributes: vec![(DEFAULT_ID_COLUMN.to_string(), id.clone())],
            id,
            latitude,
            longitude,
            granule: granule.into(),
        }
    }

    /// Replace the known attributes with a full field-table row.
    pub fn with_attributes(mut self, attributes: Vec<(String, String)>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Look up a known attribute by column name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}
