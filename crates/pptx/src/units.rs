//! OOXML length and size units.

/// EMUs per centimetre.
pub const EMU_PER_CM: f64 = 360_000.0;

/// EMUs per typographic point.
pub const EMU_PER_PT: f64 = 12_700.0;

/// Convert centimetres to EMUs.
pub fn cm(value: f64) -> i64 {
    (value * EMU_PER_CM).round() as i64
}

/// Convert points to EMUs (line widths).
pub fn pt(value: f64) -> i64 {
    (value * EMU_PER_PT).round() as i64
}

/// Convert points to the hundredths-of-a-point used by `sz` attributes.
pub fn font_size(points: f64) -> u32 {
    (points * 100.0).round() as u32
}

/// Convert points to the hundredths-of-a-point used by `spcPts`.
pub fn spacing(points: f64) -> u32 {
    font_size(points)
}
