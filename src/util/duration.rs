//! Parsing for human-entered sanction durations like `30m`, `7d`, `1w`.

use std::time::Duration;

/// Parses a duration of the form `<number><unit>` where unit is one of
/// s/m/h/d/w. Returns `None` for anything else.
pub fn parse_duration(input: &str) -> Option<Duration> {
    let input = input.trim();
    if input.len() < 2 {
        return None;
    }

    let (value, unit) = input.split_at(input.len() - 1);
    let value: u64 = value.parse().ok()?;

    let secs = match unit {
        "s" => value,
        "m" => value * 60,
        "h" => value * 3_600,
        "d" => value * 86_400,
        "w" => value * 604_800,
        _ => return None,
    };

    Some(Duration::from_secs(secs))
}

/// Formats a duration back into the largest whole unit, for embeds.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 604_800 && secs % 604_800 == 0 {
        format!("{}w", secs / 604_800)
    } else if secs >= 86_400 && secs % 86_400 == 0 {
        format!("{}d", secs / 86_400)
    } else if secs >= 3_600 && secs % 3_600 == 0 {
        format!("{}h", secs / 3_600)
    } else if secs >= 60 && secs % 60 == 0 {
        format!("{}m", secs / 60)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_each_unit() {
        assert_eq!(parse_duration("45s"), Some(Duration::from_secs(45)));
        assert_eq!(parse_duration("30m"), Some(Duration::from_secs(1_800)));
        assert_eq!(parse_duration("2h"), Some(Duration::from_secs(7_200)));
        assert_eq!(parse_duration("7d"), Some(Duration::from_secs(604_800)));
        assert_eq!(parse_duration("1w"), Some(Duration::from_secs(604_800)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("7"), None);
        assert_eq!(parse_duration("d7"), None);
        assert_eq!(parse_duration("7y"), None);
        assert_eq!(parse_duration("-7d"), None);
    }

    #[test]
    fn formats_round_trip() {
        assert_eq!(format_duration(Duration::from_secs(604_800)), "1w");
        assert_eq!(format_duration(Duration::from_secs(7_200)), "2h");
        assert_eq!(format_duration(Duration::from_secs(90)), "90s");
    }
}
