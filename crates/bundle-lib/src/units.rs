//! Quantity string conversion
//!
//! Converts the cluster's quantity notation into canonical numbers:
//! CPU in cores, memory in mebibytes (MiB). Magnitudes are non-negative
//! integers; the converted value keeps its fractional part.

use crate::error::{QuantityError, QuantityKind};

/// Millicore suffix for CPU quantities
const MILLI_SUFFIX: &str = "m";

const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Memory suffixes as `(suffix, numerator, denominator)`: MiB = n * num / den.
///
/// Binary suffixes come first; none of the entries is a prefix of another so
/// the order only matters for readability.
const MEMORY_UNITS: &[(&str, f64, f64)] = &[
    ("Ki", 1.0, 1024.0),
    ("Mi", 1.0, 1.0),
    ("Gi", 1024.0, 1.0),
    ("K", 1_000.0, MIB),
    ("M", 1_000_000.0, MIB),
    ("G", 1_000_000_000.0, GIB),
];

/// Split a quantity into its magnitude and unit suffix.
fn split_quantity(value: &str) -> (&str, &str) {
    let at = value
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(value.len());
    value.split_at(at)
}

fn parse_magnitude(magnitude: &str, value: &str, kind: QuantityKind) -> Result<u64, QuantityError> {
    magnitude
        .parse::<u64>()
        .map_err(|_| QuantityError::InvalidNumber {
            kind,
            value: value.to_string(),
        })
}

/// Convert a CPU quantity into cores.
///
/// `"500m"` is 0.5 cores, `"2"` is 2 cores. Any other suffix is rejected.
pub fn convert_cpu(value: &str) -> Result<f64, QuantityError> {
    let kind = QuantityKind::Cpu;
    if value.is_empty() {
        return Err(QuantityError::Empty { kind });
    }

    let (magnitude, suffix) = split_quantity(value);
    let n = parse_magnitude(magnitude, value, kind)?;

    match suffix {
        "" => Ok(n as f64),
        MILLI_SUFFIX => Ok(n as f64 / 1000.0),
        _ => Err(QuantityError::UnsupportedUnit {
            kind,
            value: value.to_string(),
        }),
    }
}

/// Convert a memory quantity into MiB.
///
/// Accepts the binary (`Ki`, `Mi`, `Gi`) and decimal (`K`, `M`, `G`)
/// suffixes. A bare number or any other suffix is rejected.
pub fn convert_memory(value: &str) -> Result<f64, QuantityError> {
    let kind = QuantityKind::Memory;
    if value.is_empty() {
        return Err(QuantityError::Empty { kind });
    }

    let (magnitude, suffix) = split_quantity(value);
    let (_, numerator, denominator) = MEMORY_UNITS
        .iter()
        .find(|(unit, _, _)| *unit == suffix)
        .ok_or_else(|| QuantityError::UnsupportedUnit {
            kind,
            value: value.to_string(),
        })?;

    let n = parse_magnitude(magnitude, value, kind)?;
    Ok(n as f64 * numerator / denominator)
}
