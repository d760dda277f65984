//! Shared helpers for Diesel repository implementations.
//!
//! - Row conversion collection with string errors
//! - Checked casts between domain integers and PostgreSQL `INT4`
//! - `ILIKE` pattern escaping for literal substring search

/// Collect converted rows, mapping the first conversion failure.
pub fn collect_rows<T, E>(
    results: impl Iterator<Item = Result<T, String>>,
    map_err: impl FnOnce(String) -> E,
) -> Result<Vec<T>, E> {
    results.collect::<Result<Vec<_>, _>>().map_err(map_err)
}

/// Read a non-negative `INT4` column into a domain `u32`.
pub fn column_to_u32(value: i32, column: &str) -> Result<u32, String> {
    u32::try_from(value).map_err(|_| format!("{column} must be non-negative, got {value}"))
}

/// Write a domain `u32` into an `INT4` column.
pub fn u32_to_column(value: u32, column: &str) -> Result<i32, String> {
    i32::try_from(value).map_err(|_| format!("{column} exceeds INT4 range: {value}"))
}

/// Build an `ILIKE` pattern matching `term` anywhere, literally.
///
/// `%`, `_` and the escape character itself are escaped with `\`, the
/// PostgreSQL default escape.
///
/// # Examples
/// ```ignore
/// assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
/// ```
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
