// Built-in prompts used when the optional prompt documents are not supplied.
// Each is followed by the job description under a "Job Description" heading line,
// the same layout the document merger produces.

/// Heading written at the top of every saved model reply.
pub const RESPONSE_HEADING: &str = "Claude Response";

/// Professional summary prompt.
pub const SUMMARY_PROMPT: &str = "\
    Using the job description below, write a professional summary for my CV. \
    Keep it to a single paragraph of three to four sentences, written in the first person \
    without using the word \"I\". \
    Start your reply with the line \"Professional Summary:\" and put the paragraph on the next line. \
    Do not add any other commentary.";

/// Cover letter prompt.
pub const COVER_LETTER_PROMPT: &str = "\
    Using the job description below, write a cover letter for this role. \
    Open with \"Dear Hiring Manager,\" and close with \"Sincerely,\". \
    Keep it under four paragraphs, concrete and specific to the role. \
    Do not add any commentary before or after the letter.";

/// Appends the job description to a built-in prompt.
pub fn with_job_description(prompt: &str, job_description: &str) -> String {
    format!(
        "{prompt}\n{}\n{job_description}",
        crate::document::merge::JOB_DESCRIPTION_HEADING
    )
}
