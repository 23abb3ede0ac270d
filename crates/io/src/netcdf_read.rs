//! Low-level NetCDF extraction helpers.

use std::collections::BTreeSet;

use netcdf::AttributeValue;

/// String attribute of `var`, if present and textual.
pub(crate) fn attr_string(var: &netcdf::Variable<'_>, name: &str) -> Option<String> {
    match var.attribute_value(name)?.ok()? {
        AttributeValue::Str(s) => Some(s),
        AttributeValue::Strs(v) => v.into_iter().next(),
        _ => None,
    }
}

/// Numeric attribute of `var` as `f64`, if present. Arrays yield their first
/// element.
pub(crate) fn attr_f64(var: &netcdf::Variable<'_>, name: &str) -> Option<f64> {
    match var.attribute_value(name)?.ok()? {
        AttributeValue::Double(x) => Some(x),
        AttributeValue::Float(x) => Some(f64::from(x)),
        AttributeValue::Int(x) => Some(f64::from(x)),
        AttributeValue::Short(x) => Some(f64::from(x)),
        AttributeValue::Schar(x) => Some(f64::from(x)),
        AttributeValue::Uchar(x) => Some(f64::from(x)),
        AttributeValue::Ushort(x) => Some(f64::from(x)),
        AttributeValue::Uint(x) => Some(f64::from(x)),
        AttributeValue::Longlong(x) => Some(x as f64),
        AttributeValue::Ulonglong(x) => Some(x as f64),
        AttributeValue::Doubles(v) => v.first().copied(),
        AttributeValue::Floats(v) => v.first().copied().map(f64::from),
        AttributeValue::Ints(v) => v.first().copied().map(f64::from),
        AttributeValue::Shorts(v) => v.first().copied().map(f64::from),
        _ => None,
    }
}

/// Names of the data variables in `file`, sorted.
///
/// Excluded:
/// - 0-dimensional variables
/// - coordinate variables (1-D, named after their own dimension)
/// - variables named in another variable's `bounds` or `coordinates`
/// - `*_bnds` / `*_bounds`
pub(crate) fn data_variables(file: &netcdf::File) -> Vec<String> {
    let mut auxiliary = BTreeSet::new();
    for var in file.variables() {
        for attr in ["bounds", "coordinates"] {
            if let Some(names) = attr_string(&var, attr) {
                auxiliary.extend(names.split_whitespace().map(str::to_string));
            }
        }
    }

    let mut names: Vec<String> = file
        .variables()
        .filter(|var| {
            let name = var.name();
            let dims = var.dimensions();
            if dims.is_empty() {
                return false;
            }
            if dims.len() == 1 && dims[0].name() == name {
                return false;
            }
            !(auxiliary.contains(&name) || name.ends_with("_bnds") || name.ends_with("_bounds"))
        })
        .map(|var| var.name())
        .collect();
    names.sort();
    names
}

/// First name in `candidates` that exists as a variable in `file`.
pub(crate) fn first_present<'a, I>(file: &netcdf::File, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a String>,
{
    candidates
        .into_iter()
        .find(|name| file.variable(name).is_some())
        .cloned()
}
