use chrono::{DateTime, TimeZone};

use crate::api::LiveDataSnapshot;

/// Text rendering of a snapshot: a timestamp header then one line per measurement.
///
/// ```text
/// Live usage at 22:13:
/// - IMPORT: 450W
/// - EXPORT: 0W
/// ```
pub fn text_lines<Tz: TimeZone>(snapshot: &LiveDataSnapshot, tz: &Tz) -> Vec<String>
where
    Tz::Offset: std::fmt::Display,
{
    let time = DateTime::from_timestamp(snapshot.utc, 0)
        .map(|utc| utc.with_timezone(tz).format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string());

    let mut lines = Vec::with_capacity(snapshot.power.len() + 1);
    lines.push(format!("Live usage at {}:", time));
    lines.extend(
        snapshot
            .power
            .iter()
            .map(|p| format!("- {}: {}W", p.kind, p.watts)),
    );
    lines
}
