use tracing::warn;

const SALUTATION_MARKERS: &[&str] = &["Hiring Manager", "Recruiter", "Recruitment"];
const SIGN_OFFS: &[&str] = &["Sincerely", "Best", "Regards", "Thank you"];

fn is_salutation(line: &str) -> bool {
    line.starts_with("Dear") || SALUTATION_MARKERS.iter().any(|m| line.contains(m))
}

/// Explanatory text a model tends to put ahead of the letter itself.
fn is_preamble(line: &str) -> bool {
    let lower = line.to_lowercase();
    line.starts_with("Here")
        || line.starts_with('#')
        || lower.contains("cover letter")
        || lower.contains("draft")
}

fn is_sign_off(line: &str) -> bool {
    SIGN_OFFS.iter().any(|s| line.starts_with(s))
}

/// Extracts the cover-letter body from a model reply.
///
/// The body starts at the salutation (or, failing that, the first line that is
/// not preamble) and stops before the first sign-off line. Without a sign-off
/// it runs to the end of the text. Lines are returned as written, blank ones
/// included; the populator drops blanks when it lays the body out.
pub fn parse_cover_letter(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();

    let start = lines
        .iter()
        .position(|l| is_salutation(l.trim()))
        .or_else(|| {
            warn!("No salutation in cover letter reply; skipping preamble lines instead");
            lines.iter().position(|l| {
                let l = l.trim();
                !l.is_empty() && !is_preamble(l)
            })
        });
    let Some(start) = start else {
        return String::new();
    };

    let end = lines[start..]
        .iter()
        .position(|l| is_sign_off(l.trim()))
        .map(|offset| start + offset)
        .unwrap_or(lines.len());

    lines[start..end].join("\n")
}
