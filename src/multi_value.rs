/// Splits a form multi-value field (one entry per line, commas also accepted).
pub fn split_multi_value(s: &str) -> Vec<String> {
    s.split(['\n', ','])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits on newlines only, for values such as PEM blocks.
pub fn split_lines(s: &str) -> Vec<String> {
    s.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_multi_value<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Blank or non-numeric input means "not set".
pub fn parse_optional_u64(s: &str) -> Option<u64> {
    s.trim().parse().ok()
}

pub fn parse_optional_i64(s: &str) -> Option<i64> {
    s.trim().parse().ok()
}
