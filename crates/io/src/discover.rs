//! Locating downloaded files by experiment and variable.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

/// Find the file for `(experiment, variable)` in `folder`.
///
/// A candidate's file name contains `experiment` followed later by
/// `variable` (or the reverse) and ends in `.nc` or `.zip`. When several
/// match, the most recently modified wins. Returns `None` if `folder` does
/// not exist or nothing matches.
pub fn discover(folder: &Path, experiment: &str, variable: &str) -> Option<PathBuf> {
    let entries = fs::read_dir(folder).ok()?;

    let mut best: Option<(SystemTime, PathBuf)> = None;
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !matches_name(name, experiment, variable) {
            continue;
        }
        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        if best.as_ref().is_none_or(|(t, _)| modified > *t) {
            best = Some((modified, path));
        }
    }

    if let Some((_, path)) = &best {
        debug!(experiment, variable, path = %path.display(), "discovered file");
    }
    best.map(|(_, path)| path)
}

fn matches_name(name: &str, experiment: &str, variable: &str) -> bool {
    let has_ext = name.ends_with(".nc") || name.ends_with(".zip");
    has_ext && (in_order(name, experiment, variable) || in_order(name, variable, experiment))
}

/// `first` occurs in `name`, and `second` occurs after it.
fn in_order(name: &str, first: &str, second: &str) -> bool {
    name.find(first)
        .is_some_and(|i| name[i + first.len()..].contains(second))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_matching() {
        let exp = "ssp5_8_5";
        let var = "near_surface_air_temperature";
        assert!(matches_name(
            "ssp5_8_5_near_surface_air_temperature_2015-2049_ipsl_cm6a_lr.nc",
            exp,
            var
        ));
        assert!(matches_name("near_surface_air_temperature-ssp5_8_5.zip", exp, var));
        assert!(!matches_name("ssp5_8_5_near_surface_air_temperature.nc.part", exp, var));
        assert!(!matches_name("ssp1_2_6_near_surface_air_temperature.nc", exp, var));
        assert!(!matches_name("ssp5_8_5_near_surface_wind_speed.nc", exp, var));
    }

    #[test]
    fn missing_folder() {
        assert!(discover(Path::new("/tmp/clima_no_such_dir"), "historical", "tas").is_none());
    }
}
