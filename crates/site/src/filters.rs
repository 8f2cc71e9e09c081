//! Custom Askama template filters.

use std::fmt::Display;

/// Capitalize the first letter of each space-separated word.
///
/// Hyphens are not word breaks, so `"shiba-inu"` becomes `"Shiba-inu"`.
///
/// Usage in templates: `{{ dog.breed|display_case }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn display_case(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(to_display_case(&value.to_string()))
}

fn to_display_case(value: &str) -> String {
    value
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}
