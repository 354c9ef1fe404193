use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::pipeline::{Inputs, OutputSpec, RunOptions, Stage};

/// Command line arguments. Anything not given here falls back to `Config`
/// (environment) and then to the conventional asset file names.
#[derive(Parser, Debug)]
#[command(
    name = "jobpack",
    version,
    about = "Assemble a CV and cover letter from document templates and a job description."
)]
pub struct Cli {
    /// Directory holding the input documents (overrides JOBPACK_ASSETS_DIR)
    #[arg(long)]
    pub assets_dir: Option<PathBuf>,

    /// Skills prompt document
    #[arg(long)]
    pub skills_prompt: Option<PathBuf>,

    /// Job description document
    #[arg(long)]
    pub job_description: Option<PathBuf>,

    /// CV template with a skills table and a "Professional Summary" heading
    #[arg(long)]
    pub cv_template: Option<PathBuf>,

    /// Cover letter template with a "Thank you for your consideration" line
    #[arg(long)]
    pub cover_letter_template: Option<PathBuf>,

    /// Personal summary prompt document (built-in prompt if absent)
    #[arg(long)]
    pub summary_prompt: Option<PathBuf>,

    /// Long-form cover letter prompt document (built-in prompt if absent)
    #[arg(long)]
    pub cover_letter_prompt: Option<PathBuf>,

    /// Directory the run's output folder is created in
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Output folder name; defaults to output_<timestamp>
    #[arg(long)]
    pub output_name: Option<String>,

    /// Stages to run, comma separated; all stages when omitted
    #[arg(long, value_enum, value_delimiter = ',')]
    pub stages: Vec<Stage>,

    /// Maximum output tokens per model call (overrides JOBPACK_MAX_TOKENS)
    #[arg(long)]
    pub max_tokens: Option<u32>,
}

impl Cli {
    pub fn inputs(&self, config: &Config) -> Inputs {
        let assets_dir = self
            .assets_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.assets_dir));
        let defaults = Inputs::from_assets_dir(&assets_dir);

        Inputs {
            skills_prompt: self.skills_prompt.clone().unwrap_or(defaults.skills_prompt),
            job_description: self
                .job_description
                .clone()
                .unwrap_or(defaults.job_description),
            cv_template: self.cv_template.clone().unwrap_or(defaults.cv_template),
            cover_letter_template: self
                .cover_letter_template
                .clone()
                .unwrap_or(defaults.cover_letter_template),
            summary_prompt: self.summary_prompt.clone().or(defaults.summary_prompt),
            cover_letter_prompt: self
                .cover_letter_prompt
                .clone()
                .or(defaults.cover_letter_prompt),
        }
    }

    pub fn output(&self) -> OutputSpec {
        OutputSpec {
            parent: self.output_dir.clone(),
            name: self.output_name.clone(),
        }
    }

    pub fn options(&self, config: &Config) -> RunOptions {
        RunOptions {
            stages: if self.stages.is_empty() {
                Stage::ALL.to_vec()
            } else {
                self.stages.clone()
            },
            max_tokens: self.max_tokens.unwrap_or(config.max_tokens),
        }
    }
}
