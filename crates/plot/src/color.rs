//! Stable per-series colors.

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const GRAY: Rgb = Rgb(128, 128, 128);
pub const GREEN: Rgb = Rgb(0, 128, 0);
pub const ORANGE: Rgb = Rgb(255, 165, 0);

/// Colors for experiments without a fixed assignment.
const PALETTE: [Rgb; 8] = [
    Rgb(31, 119, 180),
    Rgb(214, 39, 40),
    Rgb(148, 103, 189),
    Rgb(140, 86, 75),
    Rgb(227, 119, 194),
    Rgb(188, 189, 34),
    Rgb(23, 190, 207),
    Rgb(44, 160, 44),
];

/// Color for a series label. `historical` is gray, `ssp1_2_6` green and
/// `ssp5_8_5` orange; any other label maps to the same palette entry on
/// every run.
pub fn series_color(label: &str) -> Rgb {
    match label {
        "historical" => GRAY,
        "ssp1_2_6" => GREEN,
        "ssp5_8_5" => ORANGE,
        other => PALETTE[fnv1a(other) as usize % PALETTE.len()],
    }
}

/// FNV-1a, so palette picks do not depend on the std hasher's seed.
fn fnv1a(s: &str) -> u64 {
    s.bytes().fold(0xcbf2_9ce4_8422_2325, |h, b| {
        (h ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_assignments() {
        assert_eq!(series_color("historical"), GRAY);
        assert_eq!(series_color("ssp1_2_6"), GREEN);
        assert_eq!(series_color("ssp5_8_5"), ORANGE);
    }

    #[test]
    fn other_labels_are_stable() {
        assert_eq!(series_color("ssp2_4_5"), series_color("ssp2_4_5"));
        assert!(PALETTE.contains(&series_color("ssp3_7_0")));
    }
}
