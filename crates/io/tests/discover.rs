//! Integration tests for file discovery.

use std::fs;
use std::time::{Duration, SystemTime};

use clima_io::discover;
use tempfile::tempdir;

fn touch(path: &std::path::Path, age_secs: u64) {
    fs::write(path, b"x").unwrap();
    let file = fs::File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::now() - Duration::from_secs(age_secs))
        .unwrap();
}

#[test]
fn newest_match_wins() {
    let dir = tempdir().unwrap();
    let old = dir
        .path()
        .join("ssp1_2_6_near_surface_air_temperature_2015-2049_ipsl_cm6a_lr.nc");
    let new = dir.path().join("near_surface_air_temperature_ssp1_2_6.zip");
    touch(&old, 3600);
    touch(&new, 10);
    touch(&dir.path().join("ssp5_8_5_near_surface_air_temperature.nc"), 0);

    let found = discover(dir.path(), "ssp1_2_6", "near_surface_air_temperature");
    assert_eq!(found, Some(new));
}

#[test]
fn no_match() {
    let dir = tempdir().unwrap();
    touch(&dir.path().join("historical_near_surface_wind_speed.nc"), 0);

    assert!(discover(dir.path(), "historical", "near_surface_air_temperature").is_none());
}
