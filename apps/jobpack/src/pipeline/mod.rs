//! Application pipeline: runs the selected stages against one job description.
//!
//! Flow per stage: merge prompt + JD → extract text → generate → save raw
//! reply → parse → populate template.
//!
//! Stages run in a fixed order (skills → summary → cover letter). The summary
//! is written into the skills-filled CV when that stage produced one.

pub mod output;

use std::path::{Path, PathBuf};

use chrono::Local;
use clap::ValueEnum;
use tracing::{info, warn};

use crate::document::extract::extract_text;
use crate::document::merge::merge_files;
use crate::document::Document;
use crate::errors::PipelineError;
use crate::llm_client::prompts::{with_job_description, COVER_LETTER_PROMPT, SUMMARY_PROMPT};
use crate::llm_client::TextGenerator;
use crate::parsing::{parse_cover_letter, parse_skills, parse_summary};
use crate::populate::{populate_cover_letter, populate_skills_table, populate_summary};
use output::{save_response_document, OutputFolder};

// ────────────────────────────────────────────────────────────────────────────
// Inputs and options
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Stage {
    Skills,
    Summary,
    CoverLetter,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Skills, Stage::Summary, Stage::CoverLetter];
}

/// Input documents. The two prompt documents are optional; built-in prompts
/// stand in for them.
#[derive(Debug, Clone)]
pub struct Inputs {
    pub skills_prompt: PathBuf,
    pub job_description: PathBuf,
    pub cv_template: PathBuf,
    pub cover_letter_template: PathBuf,
    pub summary_prompt: Option<PathBuf>,
    pub cover_letter_prompt: Option<PathBuf>,
}

impl Inputs {
    /// Conventional file names inside an assets directory. Optional prompts
    /// are picked up only if present.
    pub fn from_assets_dir(dir: &Path) -> Self {
        let optional = |name: &str| Some(dir.join(name)).filter(|p| p.exists());
        Self {
            skills_prompt: dir.join("skills-prompt.docx"),
            job_description: dir.join("job-description.docx"),
            cv_template: dir.join("cv-template.docx"),
            cover_letter_template: dir.join("cover-letter-template.docx"),
            summary_prompt: optional("personal-summary-prompt.docx"),
            cover_letter_prompt: optional("cover-letter-prompt.docx"),
        }
    }

    /// Checks that every file the selected stages read exists.
    pub fn verify(&self, stages: &[Stage]) -> Result<(), PipelineError> {
        let mut required: Vec<(&'static str, &Path)> =
            vec![("Job description", &self.job_description)];
        if stages.contains(&Stage::Skills) {
            required.push(("Skills prompt", &self.skills_prompt));
        }
        if stages.contains(&Stage::Skills) || stages.contains(&Stage::Summary) {
            required.push(("CV template", &self.cv_template));
        }
        if stages.contains(&Stage::CoverLetter) {
            required.push(("Cover letter template", &self.cover_letter_template));
        }
        if let Some(p) = &self.summary_prompt {
            required.push(("Personal summary prompt", p));
        }
        if let Some(p) = &self.cover_letter_prompt {
            required.push(("Cover letter prompt", p));
        }

        for (kind, path) in required {
            if !path.exists() {
                return Err(PipelineError::MissingInput {
                    kind,
                    path: path.to_path_buf(),
                });
            }
        }
        Ok(())
    }
}

/// Where the run's output folder goes.
#[derive(Debug, Clone)]
pub struct OutputSpec {
    pub parent: PathBuf,
    /// Folder name; `None` means `output_<timestamp>`.
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub stages: Vec<Stage>,
    pub max_tokens: u32,
}

// ────────────────────────────────────────────────────────────────────────────
// Report
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Artifact {
    pub stage: Stage,
    pub label: &'static str,
    pub path: PathBuf,
}

/// What a run produced. `skipped` lists stages whose template lacked its anchor.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub folder: PathBuf,
    pub artifacts: Vec<Artifact>,
    pub skipped: Vec<Stage>,
}

impl RunReport {
    pub fn artifact(&self, label: &str) -> Option<&Path> {
        self.artifacts
            .iter()
            .find(|a| a.label == label)
            .map(|a| a.path.as_path())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the selected stages. Missing inputs fail before the output folder is
/// created; a generation failure aborts the run and leaves earlier files in place.
pub async fn run_pipeline(
    inputs: &Inputs,
    output: &OutputSpec,
    generator: &dyn TextGenerator,
    options: &RunOptions,
) -> Result<RunReport, PipelineError> {
    inputs.verify(&options.stages)?;
    let folder = OutputFolder::create(&output.parent, output.name.as_deref(), Local::now())?;

    let mut run = Run {
        inputs,
        folder: &folder,
        generator,
        max_tokens: options.max_tokens,
        report: RunReport {
            folder: folder.path().to_path_buf(),
            artifacts: Vec::new(),
            skipped: Vec::new(),
        },
    };

    let mut cv_base = inputs.cv_template.clone();
    for stage in Stage::ALL
        .into_iter()
        .filter(|s| options.stages.contains(s))
    {
        info!("Running stage {stage:?}");
        match stage {
            Stage::Skills => {
                if let Some(cv) = run.skills().await? {
                    cv_base = cv;
                }
            }
            Stage::Summary => run.summary(&cv_base).await?,
            Stage::CoverLetter => run.cover_letter().await?,
        }
    }

    Ok(run.report)
}

struct Run<'a> {
    inputs: &'a Inputs,
    folder: &'a OutputFolder,
    generator: &'a dyn TextGenerator,
    max_tokens: u32,
    report: RunReport,
}

impl Run<'_> {
    async fn skills(&mut self) -> Result<Option<PathBuf>, PipelineError> {
        let merged_path = self.folder.artifact("skills_prompt_w_job");
        let merged = merge_files(
            &self.inputs.skills_prompt,
            &self.inputs.job_description,
            &merged_path,
        )?;
        self.record(Stage::Skills, "merged_prompt", merged_path);

        let reply = self
            .ask(Stage::Skills, &extract_text(&merged), "claude_response")
            .await?;
        let skills = parse_skills(&reply);
        info!(
            "Parsed {} main skills and {} sub-skills",
            skills.main_skills.len(),
            skills.sub_skills.len()
        );

        let written = populate_skills_table(
            &self.inputs.cv_template,
            &self.folder.artifact("cv_with_skills"),
            &skills,
        )?;
        Ok(self.finish(Stage::Skills, "cv_with_skills", written))
    }

    async fn summary(&mut self, cv: &Path) -> Result<(), PipelineError> {
        let inputs = self.inputs;
        let prompt = self.prompt_text(
            inputs.summary_prompt.as_deref(),
            SUMMARY_PROMPT,
            Stage::Summary,
            "summary_prompt_w_job",
        )?;
        let reply = self.ask(Stage::Summary, &prompt, "summary_response").await?;
        let summary = parse_summary(&reply);
        if summary.is_empty() {
            warn!("Model reply contained no usable summary line");
        }

        let written = populate_summary(cv, &self.folder.artifact("cv_with_summary"), &summary)?;
        self.finish(Stage::Summary, "cv_with_summary", written);
        Ok(())
    }

    async fn cover_letter(&mut self) -> Result<(), PipelineError> {
        let inputs = self.inputs;
        let prompt = self.prompt_text(
            inputs.cover_letter_prompt.as_deref(),
            COVER_LETTER_PROMPT,
            Stage::CoverLetter,
            "cover_letter_prompt_w_job",
        )?;
        let reply = self
            .ask(Stage::CoverLetter, &prompt, "cover_letter_response")
            .await?;
        let body = parse_cover_letter(&reply);
        info!("Parsed cover letter body of {} lines", body.lines().count());

        let written = populate_cover_letter(
            &inputs.cover_letter_template,
            &self.folder.artifact("cover_letter"),
            &body,
        )?;
        self.finish(Stage::CoverLetter, "cover_letter", written);
        Ok(())
    }

    /// Prompt text for a stage: the prompt document merged with the JD when
    /// one was supplied, otherwise the built-in prompt plus the JD text.
    fn prompt_text(
        &mut self,
        prompt_doc: Option<&Path>,
        builtin: &str,
        stage: Stage,
        merged_stem: &str,
    ) -> Result<String, PipelineError> {
        match prompt_doc {
            Some(prompt_doc) => {
                let merged_path = self.folder.artifact(merged_stem);
                let merged = merge_files(prompt_doc, &self.inputs.job_description, &merged_path)?;
                self.record(stage, "merged_prompt", merged_path);
                Ok(extract_text(&merged))
            }
            None => {
                let job_description = Document::load(&self.inputs.job_description)?;
                Ok(with_job_description(builtin, &extract_text(&job_description)))
            }
        }
    }

    /// Sends `prompt` to the model and saves the raw reply as `<stem>-<ts>.docx`.
    async fn ask(
        &mut self,
        stage: Stage,
        prompt: &str,
        response_stem: &str,
    ) -> Result<String, PipelineError> {
        info!("Sending {} characters to the model", prompt.len());
        let reply = self.generator.generate(prompt, self.max_tokens).await?;
        info!("Received {} characters from the model", reply.len());

        let response_path = self.folder.artifact(response_stem);
        save_response_document(&reply, &response_path)?;
        self.record(stage, "response", response_path);
        Ok(reply)
    }

    fn record(&mut self, stage: Stage, label: &'static str, path: PathBuf) {
        self.report.artifacts.push(Artifact { stage, label, path });
    }

    fn finish(
        &mut self,
        stage: Stage,
        label: &'static str,
        written: Option<PathBuf>,
    ) -> Option<PathBuf> {
        match &written {
            Some(path) => self.record(stage, label, path.clone()),
            None => self.report.skipped.push(stage),
        }
        written
    }
}
