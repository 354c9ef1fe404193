pub mod skills;

pub use skills::SkillSet;
