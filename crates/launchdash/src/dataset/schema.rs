//! Column layout of the launch records file.
//!
//! Only the columns listed in [`REQUIRED_COLUMNS`] are read; any other
//! columns (flight number, full booster version, ...) are ignored.

/// Launch site label.
pub const LAUNCH_SITE: &str = "Launch Site";

/// Payload mass in kilograms.
pub const PAYLOAD_MASS: &str = "Payload Mass (kg)";

/// Mission outcome class, `1` for success and `0` for failure.
pub const CLASS: &str = "class";

/// Booster version category label.
pub const BOOSTER_CATEGORY: &str = "Booster Version Category";

/// Columns that must be present in the header row.
pub const REQUIRED_COLUMNS: [&str; 4] = [LAUNCH_SITE, PAYLOAD_MASS, CLASS, BOOSTER_CATEGORY];

/// Return the required columns that are absent from `headers`.
#[must_use]
pub fn missing_columns<'a, I>(headers: I) -> Vec<&'static str>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: Vec<&str> = headers.into_iter().map(str::trim).collect();
    REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !present.contains(column))
        .collect()
}
