pub const CURRENCY_SYMBOL: &str = "₹";

fn format_with_commas(value: u64) -> String {
    let s = value.to_string().chars().rev().collect::<Vec<char>>();
    let mut out = Vec::new();
    for (i, ch) in s.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    out.into_iter().rev().collect()
}

/// `₹1,234.50`, with a leading `-` for negatives.
pub fn format_amount(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    format!(
        "{}{}{}.{:02}",
        sign,
        CURRENCY_SYMBOL,
        format_with_commas(cents / 100),
        cents % 100
    )
}

/// Whole-unit amount for summary cards, e.g. `₹12,400`.
pub fn format_whole(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let whole = amount.abs().round() as u64;
    format!("{}{}{}", sign, CURRENCY_SYMBOL, format_with_commas(whole))
}

/// Up to two upper-cased initials from the first words of `name`.
pub fn user_initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_get_separators_and_cents() {
        assert_eq!(format_amount(1234.5), "₹1,234.50");
        assert_eq!(format_amount(0.0), "₹0.00");
        assert_eq!(format_amount(-500.0), "-₹500.00");
        assert_eq!(format_amount(1_000_000.006), "₹1,000,000.01");
    }

    #[test]
    fn whole_amounts_round() {
        assert_eq!(format_whole(12_399.6), "₹12,400");
        assert_eq!(format_whole(-3.2), "-₹3");
    }

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(user_initials("asha rao kumar"), "AR");
        assert_eq!(user_initials("  Mia "), "M");
        assert_eq!(user_initials(""), "");
    }
}
