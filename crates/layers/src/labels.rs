const ABBREVIATIONS: [(f64, &str); 4] = [(1e12, "t"), (1e9, "b"), (1e6, "m"), (1e3, "k")];

/// Formats a count in the short `0a` style used on cluster labels:
/// `999`, `1k`, `12k`, `2m`.
///
/// The value is scaled by the largest fitting abbreviation and rounded to a
/// whole number. A rounded `1000` is promoted to the next abbreviation so
/// `999_600` reads `1m`, not `1000k`.
pub fn compact_count(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();

    let Some(mut idx) = ABBREVIATIONS.iter().position(|(scale, _)| abs >= *scale) else {
        return format!("{sign}{}", abs.round());
    };

    let mut scaled = (abs / ABBREVIATIONS[idx].0).round();
    if scaled >= 1000.0 && idx > 0 {
        idx -= 1;
        scaled = (scaled / 1000.0).round();
    }
    format!("{sign}{scaled}{}", ABBREVIATIONS[idx].1)
}
