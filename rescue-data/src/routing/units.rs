//! Unit normalisation for provider payloads.
//!
//! Services report metres and seconds; routes carry kilometres rounded to one
//! decimal and whole minutes.

/// Metres to kilometres, rounded to one decimal place.
pub(super) fn metres_to_km(metres: f64) -> f64 {
    (metres / 100.0).round() / 10.0
}

/// Seconds to whole minutes.
pub(super) fn seconds_to_minutes(seconds: f64) -> f64 {
    (seconds / 60.0).round()
}

const METRES_PER_MILE: f64 = 1609.344;
const METRES_PER_FOOT: f64 = 0.3048;

/// Parse a human-readable distance such as `"12.3 km"`, `"850 m"` or
/// `"1,204 mi"` into kilometres rounded to one decimal.
pub(super) fn parse_distance_text(text: &str) -> Option<f64> {
    let mut tokens = text.split_whitespace();
    let amount = parse_number(tokens.next()?)?;
    let metres = match tokens.next()? {
        "km" => amount * 1000.0,
        "m" => amount,
        "mi" => amount * METRES_PER_MILE,
        "ft" => amount * METRES_PER_FOOT,
        _ => return None,
    };
    Some(metres_to_km(metres))
}

/// Parse a human-readable duration such as `"1 hour 5 mins"` into whole
/// minutes.
pub(super) fn parse_duration_text(text: &str) -> Option<f64> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.is_empty() || tokens.len() % 2 != 0 {
        return None;
    }

    let mut seconds = 0.0;
    for pair in tokens.chunks_exact(2) {
        let [amount, unit] = pair else {
            return None;
        };
        let amount = parse_number(amount)?;
        let scale = match unit.trim_end_matches('s') {
            "day" => 86_400.0,
            "hour" | "hr" | "h" => 3_600.0,
            "min" | "minute" => 60.0,
            "sec" | "second" => 1.0,
            _ => return None,
        };
        seconds += amount * scale;
    }
    Some(seconds_to_minutes(seconds))
}

fn parse_number(token: &str) -> Option<f64> {
    token
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(12_345.0, 12.3)]
    #[case(850.0, 0.9)]
    #[case(0.0, 0.0)]
    #[case(8_149.9, 8.1)]
    fn metres_round_to_one_decimal(#[case] metres: f64, #[case] km: f64) {
        assert_eq!(metres_to_km(metres), km);
    }

    #[rstest]
    #[case(1_500.0, 25.0)]
    #[case(89.0, 1.0)]
    #[case(29.0, 0.0)]
    fn seconds_round_to_whole_minutes(#[case] seconds: f64, #[case] minutes: f64) {
        assert_eq!(seconds_to_minutes(seconds), minutes);
    }

    #[rstest]
    #[case("12.3 km", Some(12.3))]
    #[case("850 m", Some(0.9))]
    #[case("1,204 km", Some(1204.0))]
    #[case("1.0 mi", Some(1.6))]
    #[case("far", None)]
    #[case("12 parsecs", None)]
    #[case("", None)]
    fn distance_text(#[case] text: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_distance_text(text), expected);
    }

    #[rstest]
    #[case("25 mins", Some(25.0))]
    #[case("1 min", Some(1.0))]
    #[case("1 hour 5 mins", Some(65.0))]
    #[case("2 hours", Some(120.0))]
    #[case("1 day 2 hours", Some(1560.0))]
    #[case("45 secs", Some(1.0))]
    #[case("soon", None)]
    #[case("5 fortnights", None)]
    fn duration_text(#[case] text: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_duration_text(text), expected);
    }
}
