//! Locale-aware number formatting for table cells.
//!
//! Values are rounded half away from zero on their shortest decimal
//! representation, so `12.345` becomes `12,35` rather than following the
//! binary expansion of the float.

/// Placeholder shown for absent values.
pub const MISSING: &str = "—";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Locale {
    #[default]
    PtBr,
    EnUs,
}

impl Locale {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "pt-br" | "pt" => Some(Locale::PtBr),
            "en-us" | "en" => Some(Locale::EnUs),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Locale::PtBr => "pt-BR",
            Locale::EnUs => "en-US",
        }
    }

    /// (decimal separator, grouping separator)
    fn separators(self) -> (char, char) {
        match self {
            Locale::PtBr => (',', '.'),
            Locale::EnUs => ('.', ','),
        }
    }
}

/// Format with at most two fraction digits, e.g. `1.234,5`.
pub fn format_number(value: f64, locale: Locale) -> String {
    format_decimal(value, 0, 2, locale)
}

/// Format with exactly two fraction digits and a trailing `%`, e.g. `-1,20%`.
pub fn format_percent(value: f64, locale: Locale) -> String {
    let mut text = format_decimal(value, 2, 2, locale);
    text.push('%');
    text
}

fn format_decimal(value: f64, min_fraction: usize, max_fraction: usize, locale: Locale) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let (decimal_sep, group_sep) = locale.separators();
    let shortest = format!("{}", value.abs());
    let (int_part, frac_part) = shortest
        .split_once('.')
        .unwrap_or((shortest.as_str(), ""));

    let mut int_len = int_part.len();
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(max_fraction))
        .map(|b| b - b'0')
        .collect();

    let round_up = frac_part
        .as_bytes()
        .get(max_fraction)
        .map(|digit| *digit >= b'5')
        .unwrap_or(false);

    if round_up {
        let mut idx = digits.len();
        loop {
            if idx == 0 {
                digits.insert(0, 1);
                int_len += 1;
                break;
            }
            idx -= 1;
            if digits[idx] == 9 {
                digits[idx] = 0;
            } else {
                digits[idx] += 1;
                break;
            }
        }
    }

    let (int_digits, frac_digits) = digits.split_at(int_len);
    let mut fraction = frac_digits.to_vec();
    while fraction.len() > min_fraction && fraction.last() == Some(&0) {
        fraction.pop();
    }
    while fraction.len() < min_fraction {
        fraction.push(0);
    }

    let mut out = String::with_capacity(shortest.len() + 4);
    if value < 0.0 {
        out.push('-');
    }
    push_grouped(&mut out, int_digits, group_sep);
    if !fraction.is_empty() {
        out.push(decimal_sep);
        out.extend(fraction.iter().map(|d| char::from(b'0' + d)));
    }
    out
}

fn push_grouped(out: &mut String, digits: &[u8], group_sep: char) {
    let len = digits.len();
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(group_sep);
        }
        out.push(char::from(b'0' + digit));
    }
}
