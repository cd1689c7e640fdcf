/// Criteria sent to the notification endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct EligibilityCriteria {
    pub internship_name: String,
    /// `NaN` when the threshold text has no numeric prefix.
    pub min_cgpa: f64,
    pub required_skills: Vec<String>,
}

/// Parses the longest leading decimal number, ignoring leading whitespace.
///
/// `"7.5"` and `" 7.5 "` give 7.5, `"8abc"` gives 8, `"abc"` gives `NaN`.
pub fn parse_threshold(raw: &str) -> f64 {
    numeric_prefix(raw.trim_start())
        .parse::<f64>()
        .unwrap_or(f64::NAN)
}

/// Splits on commas and trims each entry. Order and empty entries are kept.
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .map(ToOwned::to_owned)
        .collect()
}

fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    if text[end..].starts_with("Infinity") {
        return &text[..end + "Infinity".len()];
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    &text[..end]
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
