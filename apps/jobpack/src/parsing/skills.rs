use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::models::SkillSet;

/// `1) Python`
static MAIN_SKILL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\)\s+(.+)$").expect("main skill pattern is valid"));

/// `(iv) Data structures`. Numerals up to `xxxix`; the numeral group may
/// match empty, so `()` is rejected in `classify_line`.
static SUB_SKILL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\((x{0,3}(?:ix|iv|v?i{0,3}))\)\s+(.+)$").expect("sub skill pattern is valid")
});

/// A single classified line of a skills reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillLine {
    Main(String),
    Sub(String),
}

/// Classifies one trimmed line. Anything that is not a numbered or
/// roman-numeral item (titles, commentary, blank lines) yields `None`.
pub fn classify_line(line: &str) -> Option<SkillLine> {
    if let Some(caps) = MAIN_SKILL.captures(line) {
        return Some(SkillLine::Main(caps[1].trim().to_string()));
    }
    SUB_SKILL
        .captures(line)
        .filter(|caps| !caps[1].is_empty())
        .map(|caps| SkillLine::Sub(caps[2].trim().to_string()))
}

/// Splits a skills reply into main skills and sub-skills, in line order.
///
/// A leading title line ("Here are the skills:", "# Skills") never matches
/// either item pattern, so it is dropped along with any other commentary.
pub fn parse_skills(text: &str) -> SkillSet {
    let mut main_skills = Vec::new();
    let mut sub_skills = Vec::new();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match classify_line(line) {
            Some(SkillLine::Main(label)) => main_skills.push(label),
            Some(SkillLine::Sub(label)) => sub_skills.push(label),
            None => {}
        }
    }

    let skills = SkillSet::new(main_skills, sub_skills);
    if skills.is_empty() {
        warn!("No numbered skills found in model reply");
    }
    skills
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skills_splits_main_and_sub_items() {
        let text = "1) Python\n(i) Data structures\n(ii) Algorithms\n2) Communication\n(iii) Writing";
        let skills = parse_skills(text);

        assert_eq!(skills.main_skills, vec!["Python", "Communication"]);
        assert_eq!(
            skills.sub_skills,
            vec!["Data structures", "Algorithms", "Writing"]
        );
    }

    #[test]
    fn test_parse_skills_drops_title_and_commentary() {
        let text = "Here are the key skills for this role:\n\n  1) Rust  \n  (i) Ownership\nLet me know if you need more.";
        let skills = parse_skills(text);

        assert_eq!(skills.main_skills, vec!["Rust"]);
        assert_eq!(skills.sub_skills, vec!["Ownership"]);
    }

    #[test]
    fn test_classify_line_rejects_uppercase_roman_and_missing_space() {
        assert_eq!(classify_line("(IV) Testing"), None);
        assert_eq!(classify_line("3)Rust"), None);
        assert_eq!(classify_line("(mix) Blend"), None);
        assert_eq!(classify_line("(civil) Engineering"), None);
        assert_eq!(classify_line("() Empty"), None);
        assert_eq!(
            classify_line("(xiv) Profiling"),
            Some(SkillLine::Sub("Profiling".to_string()))
        );
        assert_eq!(classify_line("(x) Tooling"), Some(SkillLine::Sub("Tooling".to_string())));
        assert_eq!(
            classify_line("12) Leadership"),
            Some(SkillLine::Main("Leadership".to_string()))
        );
    }

    #[test]
    fn test_parse_skills_of_unstructured_text_is_empty() {
        let skills = parse_skills("I could not find any skills in that description.");
        assert!(skills.main_skills.is_empty());
        assert!(skills.sub_skills.is_empty());
    }
}
