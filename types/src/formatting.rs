//! Text formatting helpers for HUD labels.
//!
//! Support European-style number formatting (`,` as decimal separator) the
//! same way across every label a host builds from progress values.

/// Swap `.` and `,` in a formatted number.
fn europeanize(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '.' => ',',
            ',' => '.',
            c => c,
        })
        .collect()
}

#[inline]
fn maybe_eu(s: String, european: bool) -> String {
    if european { europeanize(&s) } else { s }
}

/// Format a progress fraction as a whole percentage.
///
/// Values are clamped to `[0, 1]`; NaN reads as `0%`.
///
/// # Examples
/// ```
/// use hudkit_types::formatting::format_percent;
/// assert_eq!(format_percent(0.0), "0%");
/// assert_eq!(format_percent(0.426), "43%");
/// assert_eq!(format_percent(1.7), "100%");
/// ```
pub fn format_percent(progress: f32) -> String {
    let p = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
    format!("{:.0}%", p * 100.0)
}

/// Format a transferred amount against a total, e.g. `"3.2 / 10.0 MB"`.
///
/// # Examples
/// ```
/// use hudkit_types::formatting::format_amount;
/// assert_eq!(format_amount(3_200_000, 10_000_000, false), "3.2 / 10.0 MB");
/// assert_eq!(format_amount(512, 2048, false), "0.5 / 2.0 KB");
/// assert_eq!(format_amount(12, 40, true), "12 / 40 B");
/// ```
pub fn format_amount(done: u64, total: u64, european: bool) -> String {
    let s = if total >= 1_000_000 {
        format!(
            "{:.1} / {:.1} MB",
            done as f64 / 1_000_000.0,
            total as f64 / 1_000_000.0
        )
    } else if total >= 1_000 {
        format!("{:.1} / {:.1} KB", done as f64 / 1_000.0, total as f64 / 1_000.0)
    } else {
        format!("{} / {} B", done, total)
    };
    maybe_eu(s, european)
}
