use serde::{Deserialize, Serialize};

/// Number of sub-skill slots owned by each main skill.
pub const SUB_SKILLS_PER_MAIN: usize = 5;

/// Skills extracted from a model reply.
///
/// Sub-skills are flat and grouped positionally: main skill `i` owns slots
/// `[5i, 5i + 5)`. Slots past the end of `sub_skills` read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSet {
    pub main_skills: Vec<String>,
    pub sub_skills: Vec<String>,
}

impl SkillSet {
    pub fn new(main_skills: Vec<String>, sub_skills: Vec<String>) -> Self {
        Self {
            main_skills,
            sub_skills,
        }
    }

    /// The five sub-skill slots of main skill `index`; missing slots are `""`.
    pub fn sub_skill_slots(&self, index: usize) -> [&str; SUB_SKILLS_PER_MAIN] {
        let start = index * SUB_SKILLS_PER_MAIN;
        std::array::from_fn(|offset| {
            self.sub_skills
                .get(start + offset)
                .map(String::as_str)
                .unwrap_or("")
        })
    }

    /// Table rows needed to lay the main skills out two per row.
    pub fn rows_needed(&self) -> usize {
        self.main_skills.len().div_ceil(2)
    }

    pub fn is_empty(&self) -> bool {
        self.main_skills.is_empty()
    }
}
