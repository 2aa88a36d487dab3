/// Header form used for matching: invisible characters, case, spaces, `_` and `-` ignored.
pub(crate) fn normalize_header(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !matches!(ch, '\u{feff}' | '\u{200b}' | '_' | '-') && !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Yes/no cell value. `None` for anything unrecognised; blank cells are handled by the caller.
pub(crate) fn parse_answer(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Some(true),
        "no" | "n" | "false" | "0" => Some(false),
        _ => None,
    }
}
