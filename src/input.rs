//! Checks shared by the add form and `tally add`.

pub const MSG_REQUIRED: &str = "Description and Amount are required.";
pub const MSG_BAD_AMOUNT: &str = "Amount must be a valid number.";

/// Check raw add-form text. Returns the parsed amount, or the message to show the user.
///
/// Emptiness is checked on the text as typed; the amount is trimmed before parsing.
/// Infinite amounts are accepted. NaN is rejected since it cannot be stored.
pub fn validate_entry(description: &str, amount_text: &str) -> std::result::Result<f64, &'static str> {
    if description.is_empty() || amount_text.is_empty() {
        return Err(MSG_REQUIRED);
    }
    let digits = strip_digit_separators(amount_text.trim()).ok_or(MSG_BAD_AMOUNT)?;
    match digits.parse::<f64>() {
        Ok(v) if !v.is_nan() => Ok(v),
        _ => Err(MSG_BAD_AMOUNT),
    }
}

/// Drop `_` used as a digit group separator (`1_000.50`). An underscore
/// anywhere else makes the number invalid.
fn strip_digit_separators(text: &str) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    for (i, &c) in chars.iter().enumerate() {
        if c != '_' {
            out.push(c);
            continue;
        }
        let before = i.checked_sub(1).and_then(|j| chars.get(j));
        let after = chars.get(i + 1);
        match (before, after) {
            (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit() => {}
            _ => return None,
        }
    }
    Some(out)
}
