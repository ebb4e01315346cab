//! Pure list and formatting helpers shared by the views.

use std::collections::HashSet;
use std::hash::Hash;

use crate::i18n::LocaleCode;

/// Keep the first item for every key, preserving order.
#[must_use]
pub fn dedup_by_key<T, K, F>(items: &[T], key: F) -> Vec<T>
where
    T: Clone,
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| seen.insert(key(*item)))
        .cloned()
        .collect()
}

/// Split a comma-separated field into trimmed, non-blank entries.
#[must_use]
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Price in rupiah with locale digit grouping, e.g. `Rp.1,500,000`.
#[must_use]
pub fn format_price(amount: u64, locale: LocaleCode) -> String {
    let digits = amount.to_string();
    let separator = locale.group_separator();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    format!("Rp.{grouped}")
}

/// Avatar fallback: the first character of a title.
#[must_use]
pub fn initial(title: &str) -> String {
    title
        .trim()
        .chars()
        .next()
        .map(|first| first.to_uppercase().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_first_occurrence() {
        let items = vec![("Beach", 1), ("City", 2), ("Beach", 3), ("City", 4)];
        let unique = dedup_by_key(&items, |item| item.0);
        assert_eq!(unique, vec![("Beach", 1), ("City", 2)]);
        assert_eq!(dedup_by_key(&unique, |item| item.0), unique);
    }

    #[test]
    fn list_fields_are_trimmed() {
        assert_eq!(
            split_list(" 2 hours,, 1 location ,"),
            vec!["2 hours", "1 location"]
        );
        assert!(split_list("  ").is_empty());
    }

    #[test]
    fn prices_group_thousands_per_locale() {
        assert_eq!(format_price(0, LocaleCode::En), "Rp.0");
        assert_eq!(format_price(950, LocaleCode::En), "Rp.950");
        assert_eq!(format_price(1_500_000, LocaleCode::En), "Rp.1,500,000");
        assert_eq!(format_price(25_000, LocaleCode::Id), "Rp.25.000");
    }

    #[test]
    fn initial_handles_blank_titles() {
        assert_eq!(initial("gold package"), "G");
        assert_eq!(initial(""), "");
    }
}
