use tracing::warn;

/// Pulls the professional summary out of a model reply.
///
/// 1. The line right after the first line that mentions "summary" (any case)
///    and contains a colon.
/// 2. Otherwise the first non-empty line that does not start with `#` or "Here".
/// 3. Otherwise an empty string.
pub fn parse_summary(text: &str) -> String {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();

    let marker = lines
        .iter()
        .position(|l| l.to_lowercase().contains("summary") && l.contains(':'));
    if let Some(next) = marker.and_then(|i| lines.get(i + 1)) {
        return next.to_string();
    }

    warn!("No summary marker line in model reply; using first content line");
    lines
        .iter()
        .find(|l| !l.is_empty() && !l.starts_with('#') && !l.starts_with("Here"))
        .map(|l| l.to_string())
        .unwrap_or_default()
}
