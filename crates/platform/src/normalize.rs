//! Pure conversions from raw platform readings to snapshot fields.
//!
//! Hardware vendors disagree on both the unit and the sign of the
//! instantaneous current reading, so the conversions here are heuristics,
//! not protocol guarantees:
//!
//! - A reading whose magnitude exceeds [`MICROAMP_THRESHOLD`] is assumed to
//!   be in microamps and divided by 1000 (truncating toward zero). Anything
//!   at or below it is assumed to already be milliamps. The threshold is
//!   empirical; it misclassifies a genuine microamp reading of 100 mA or
//!   less, and a milliamp reading above 100 A.
//! - The sign is discarded. Whether the battery is charging is reported
//!   separately by the supply status.

pub use charge_protocol::LEVEL_UNAVAILABLE;

/// Raw current magnitudes above this are treated as microamps.
pub const MICROAMP_THRESHOLD: i64 = 100_000;

/// Converts a level/scale pair to a whole percentage.
///
/// Returns `floor(level * 100 / scale)` when `level >= 0` and `scale > 0`,
/// and [`LEVEL_UNAVAILABLE`] otherwise. A level above its scale is reported
/// as 100.
pub fn charge_percentage(level: i64, scale: i64) -> i32 {
    if level < 0 || scale <= 0 {
        return LEVEL_UNAVAILABLE;
    }
    let percent = i128::from(level) * 100 / i128::from(scale);
    percent.min(100) as i32
}

/// Converts a raw current reading to a non-negative milliamp magnitude.
pub fn normalize_current(raw: i64) -> i32 {
    let milliamps = if raw.unsigned_abs() > MICROAMP_THRESHOLD as u64 {
        raw / 1000
    } else {
        raw
    };
    i32::try_from(milliamps.unsigned_abs()).unwrap_or(i32::MAX)
}
