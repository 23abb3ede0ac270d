//! Unit normalization.

/// Offset between Kelvin and degrees Celsius.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Unit string assigned after Kelvin-to-Celsius conversion.
pub const CELSIUS: &str = "degC";

/// Whether a CF unit string denotes Kelvin.
pub fn is_kelvin(units: &str) -> bool {
    matches!(
        units.trim().to_ascii_lowercase().as_str(),
        "k" | "kelvin" | "kelvins" | "degk" | "deg_k" | "degrees_k" | "degree_kelvin"
    )
}

/// Convert Kelvin values to Celsius in place. `NaN` stays `NaN`.
pub fn kelvin_to_celsius(values: &mut [f64]) {
    for v in values {
        *v -= KELVIN_OFFSET;
    }
}
