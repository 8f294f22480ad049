//! Deterministic categorical colors
//!
//! A box's color is a pure function of its track id (or, lacking a numeric
//! id, of its class label's length), so the same track keeps the same
//! color across every frame of a run without any shared color registry.
//! The 20-entry table is the tab20 categorical palette.

use image::Rgb;

/// The tab20 categorical palette
pub const PALETTE: [Rgb<u8>; 20] = [
    Rgb([0x1f, 0x77, 0xb4]),
    Rgb([0xae, 0xc7, 0xe8]),
    Rgb([0xff, 0x7f, 0x0e]),
    Rgb([0xff, 0xbb, 0x78]),
    Rgb([0x2c, 0xa0, 0x2c]),
    Rgb([0x98, 0xdf, 0x8a]),
    Rgb([0xd6, 0x27, 0x28]),
    Rgb([0xff, 0x98, 0x96]),
    Rgb([0x94, 0x67, 0xbd]),
    Rgb([0xc5, 0xb0, 0xd5]),
    Rgb([0x8c, 0x56, 0x4b]),
    Rgb([0xc4, 0x9c, 0x94]),
    Rgb([0xe3, 0x77, 0xc2]),
    Rgb([0xf7, 0xb6, 0xd2]),
    Rgb([0x7f, 0x7f, 0x7f]),
    Rgb([0xc7, 0xc7, 0xc7]),
    Rgb([0xbc, 0xbd, 0x22]),
    Rgb([0xdb, 0xdb, 0x8d]),
    Rgb([0x17, 0xbe, 0xcf]),
    Rgb([0x9e, 0xda, 0xe5]),
];

/// Palette index for an identifier: numeric track ids spread with a
/// multiplicative hash, non-numeric ids fall back to the class label's
/// length
pub fn color_index(track_id: Option<&str>, class_label: &str) -> usize {
    let hash = track_id
        .and_then(|id| id.parse::<i64>().ok())
        .map(|id| (id * 37).rem_euclid(256) as usize)
        .unwrap_or_else(|| class_label.len() * 50 % 256);
    hash * PALETTE.len() / 256
}

/// Deterministic color for a box
pub fn color_for(track_id: Option<&str>, class_label: &str) -> Rgb<u8> {
    PALETTE[color_index(track_id, class_label)]
}

/// Five-anchor viridis ramp used to color scatter points by height
pub fn viridis(t: f32) -> Rgb<u8> {
    const ANCHORS: [[f32; 3]; 5] = [
        [68.0, 1.0, 84.0],
        [59.0, 82.0, 139.0],
        [33.0, 145.0, 140.0],
        [94.0, 201.0, 98.0],
        [253.0, 231.0, 37.0],
    ];
    let t = t.clamp(0.0, 1.0) * (ANCHORS.len() - 1) as f32;
    let i = (t as usize).min(ANCHORS.len() - 2);
    let f = t - i as f32;
    let lerp = |a: f32, b: f32| (a + (b - a) * f).round() as u8;
    Rgb([
        lerp(ANCHORS[i][0], ANCHORS[i + 1][0]),
        lerp(ANCHORS[i][1], ANCHORS[i + 1][1]),
        lerp(ANCHORS[i][2], ANCHORS[i + 1][2]),
    ])
}
