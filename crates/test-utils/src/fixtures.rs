//! Common test fixtures for matchup tests.

/// Granule identifiers, one per supported satellite code.
pub mod granules {
    /// MODIS Aqua, 2019 day 123
    pub const AQUA: &str = "A2019123174500";

    /// MODIS Terra, 2019 day 123
    pub const TERRA: &str = "T2019123150000";

    /// SeaWiFS, 2003 day 200
    pub const SEAWIFS: &str = "S2003200163000";

    /// VIIRS, 2020 day 366 (leap year)
    pub const VIIRS: &str = "V2020366181200";
}

/// Field sample identifiers.
pub mod samples {
    pub const FIRST: &str = "s001";
    pub const SECOND: &str = "s002";
}

/// Pixel spacing and matchup geometry commonly used in tests.
pub mod geometry {
    /// Nominal L2 pixel size at nadir
    pub const PIXEL_SPACING_KM: f64 = 1.2;

    /// Offset that keeps a point inside the default threshold
    pub const NEAR_OFFSET_KM: f64 = 0.5;

    /// Offset beyond the default threshold
    pub const FAR_OFFSET_KM: f64 = 1.5;
}

/// Contents of a small field table, in the layout of the upstream CSV.
pub const FIELD_TABLE_CSV: &str = "\
,ID,Latitude_uw,Longitude_uw,cruise,depth
0,s001,43.5,-69.6,GNATS,1.0
1,s002,44.1,-68.2,GNATS,2.5
2,s003,10.0,10.0,AMT,0.5
";
