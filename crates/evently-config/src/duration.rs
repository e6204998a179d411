/// Parses a duration in seconds. Accepts a bare number (`900`) or a number
/// with an `s`, `m`, `h` or `d` suffix (`15m`, `168h`).
pub fn parse_duration_secs(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let (digits, multiplier) = match raw.chars().last()? {
        's' => (&raw[..raw.len() - 1], 1),
        'm' => (&raw[..raw.len() - 1], 60),
        'h' => (&raw[..raw.len() - 1], 3_600),
        'd' => (&raw[..raw.len() - 1], 86_400),
        _ => (raw, 1),
    };

    digits
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|n| *n >= 0)
        .and_then(|n| n.checked_mul(multiplier))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_seconds() {
        assert_eq!(parse_duration_secs("900"), Some(900));
    }

    #[test]
    fn test_suffixes() {
        assert_eq!(parse_duration_secs("30s"), Some(30));
        assert_eq!(parse_duration_secs("15m"), Some(900));
        assert_eq!(parse_duration_secs("168h"), Some(604_800));
        assert_eq!(parse_duration_secs("7d"), Some(604_800));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse_duration_secs(""), None);
        assert_eq!(parse_duration_secs("m"), None);
        assert_eq!(parse_duration_secs("ten"), None);
        assert_eq!(parse_duration_secs("-5m"), None);
    }
}
