//! Input mutation boundary.
//!
//! Turns user edits (checkbox toggles, raw text from quantity and factor
//! inputs) into state changes. Text that does not parse becomes 0 instead
//! of being rejected; nothing is clamped, so zero and negative quantities
//! reach the engine unchanged.

use tracing::{debug, warn};

use crate::error::{EstimatorError, Result};

use super::models::{EstimateState, GlobalField, LineItem};

impl EstimateState {
    /// Flip the `checked` flag of an item. Returns the new flag.
    pub fn toggle_checked(&mut self, category: &str, key: &str) -> Result<bool> {
        let item = self.item_mut(category, key)?;
        item.checked = !item.checked;

        debug!(category, key, checked = item.checked, "Toggled line");
        Ok(item.checked)
    }

    /// Parse `raw` as an integer quantity (0 when unparsable) and store it.
    /// Returns the stored quantity.
    pub fn set_quantity(&mut self, category: &str, key: &str, raw: &str) -> Result<i64> {
        let item = self.item_mut(category, key)?;
        let quantity = parse_quantity(raw);
        item.quantity = quantity;

        debug!(category, key, quantity, "Quantity changed");
        Ok(quantity)
    }

    /// Parse `raw` as a float (0 when unparsable) and store it in `field`.
    /// Returns the stored value.
    pub fn set_global_factor(&mut self, field: GlobalField, raw: &str) -> f64 {
        let value = parse_factor(raw);
        self.factors.set(field, value);

        debug!(%field, value, "Global factor changed");
        value
    }

    /// [`EstimateState::set_global_factor`] addressed by the field's UI name,
    /// e.g. `"annualRevenue"`.
    pub fn set_global_factor_named(&mut self, field: &str, raw: &str) -> Result<f64> {
        let field: GlobalField = field.parse()?;
        Ok(self.set_global_factor(field, raw))
    }

    fn item_mut(&mut self, category: &str, key: &str) -> Result<&mut LineItem> {
        self.category_mut(category)
            .ok_or_else(|| EstimatorError::UnknownCategory(category.to_string()))?
            .get_mut(key)
            .ok_or_else(|| EstimatorError::UnknownItem {
                category: category.to_string(),
                key: key.to_string(),
            })
    }
}

/// Quantity from user text; 0 when no integer prefix is present.
pub fn parse_quantity(raw: &str) -> i64 {
    match parse_int_prefix(raw) {
        Some(value) => value,
        None => {
            warn!(raw, "Unparsable quantity, using 0");
            0
        }
    }
}

/// Factor value from user text; 0 when no numeric prefix is present.
pub fn parse_factor(raw: &str) -> f64 {
    match parse_float_prefix(raw) {
        Some(value) if !value.is_nan() => value,
        _ => {
            warn!(raw, "Unparsable factor, using 0");
            0.0
        }
    }
}

/// Leading integer of `raw`: optional whitespace, optional sign, decimal
/// digits. Trailing text is ignored ("12abc" is 12, "3.7" is 3).
/// Values beyond the i64 range saturate.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = split_sign(s);

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let mut value: i64 = 0;
    for digit in rest[..digits_len].bytes() {
        let d = i64::from(digit - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(d)
        } else {
            value.saturating_mul(10).saturating_add(d)
        };
    }
    Some(value)
}

/// Leading decimal literal of `raw`: optional whitespace, optional sign,
/// digits with an optional fraction and exponent, or `Infinity`.
/// Trailing text is ignored ("1.5e3x" is 1500).
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let (negative, rest) = split_sign(s);

    if rest.starts_with("Infinity") {
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let bytes = rest.as_bytes();
    let int_len = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    let mut end = int_len;
    let mut mantissa_digits = int_len;

    if bytes.get(end) == Some(&b'.') {
        let frac_len = bytes[end + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if int_len > 0 || frac_len > 0 {
            end += 1 + frac_len;
            mantissa_digits += frac_len;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = bytes[exp_end.min(bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    let value: f64 = rest[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest)
    } else {
        (false, s)
    }
}
