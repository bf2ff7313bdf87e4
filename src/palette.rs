//! Named color palettes for plot styling.
//!
//! Color values follow the seaborn palette definitions the plots were
//! originally styled with, so figures keep the same look when regenerated.

use crate::error::{PlotError, PlotResult};

/// An RGB color triple.
pub type Rgb = (u8, u8, u8);

/// Dark gray used for the median markers on clock bands (0.2 grayscale).
pub const MEDIAN_GRAY: Rgb = (51, 51, 51);

/// Mid gray used for the night shading on clock faces (0.42 grayscale).
pub const NIGHT_GRAY: Rgb = (107, 107, 107);

const DEEP: [Rgb; 10] = [
    (76, 114, 176),
    (221, 132, 82),
    (85, 168, 104),
    (196, 78, 82),
    (129, 114, 179),
    (147, 120, 96),
    (218, 139, 195),
    (140, 140, 140),
    (204, 185, 116),
    (100, 181, 205),
];

const MUTED: [Rgb; 10] = [
    (72, 120, 208),
    (238, 133, 74),
    (106, 204, 100),
    (214, 95, 95),
    (149, 108, 180),
    (140, 97, 60),
    (220, 126, 192),
    (121, 121, 121),
    (213, 187, 103),
    (130, 198, 226),
];

const PASTEL: [Rgb; 10] = [
    (161, 201, 244),
    (255, 180, 130),
    (141, 229, 161),
    (255, 159, 155),
    (208, 187, 255),
    (222, 187, 155),
    (250, 176, 228),
    (207, 207, 207),
    (255, 254, 163),
    (185, 242, 240),
];

const COLORBLIND: [Rgb; 10] = [
    (1, 115, 178),
    (222, 143, 5),
    (2, 158, 115),
    (213, 94, 0),
    (204, 120, 188),
    (202, 145, 97),
    (251, 175, 228),
    (148, 148, 148),
    (236, 225, 51),
    (86, 180, 233),
];

const SET2: [Rgb; 8] = [
    (102, 194, 165),
    (252, 141, 98),
    (141, 160, 203),
    (231, 138, 195),
    (166, 216, 84),
    (255, 217, 47),
    (229, 196, 148),
    (179, 179, 179),
];

/// Resolve a palette by name. Unknown names are usage errors.
pub fn resolve(name: &str) -> PlotResult<Vec<Rgb>> {
    match name {
        "deep" => Ok(DEEP.to_vec()),
        "muted" => Ok(MUTED.to_vec()),
        "pastel" => Ok(PASTEL.to_vec()),
        "colorblind" => Ok(COLORBLIND.to_vec()),
        "Set2" | "set2" => Ok(SET2.to_vec()),
        _ => Err(PlotError::Usage(format!(
            "Unknown palette: {}. Valid palettes are 'deep', 'muted', 'pastel', 'colorblind', 'Set2'",
            name
        ))),
    }
}
