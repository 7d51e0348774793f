//! Prompt composition for the generation endpoints.
//!
//! Prompts are built from whatever session or profile data is available;
//! absent fields are simply omitted rather than guessed at.

use serde_json::Value;

/// System instruction for profile-description suggestions.
pub const PROFILE_DESCRIPTION_SYSTEM: &str = "You are a career coach helping a job seeker \
    write the short professional summary at the top of their profile. Write in first \
    person, 2-4 sentences, concrete and free of buzzwords. Return only the summary text.";

/// System instruction for cover letter drafts.
pub const COVER_LETTER_SYSTEM: &str = "You are a career coach drafting a tailored cover \
    letter. Address the specific role and company, ground every claim in the candidate's \
    stated experience, and keep it under 300 words. Return only the letter body.";

/// Build the profile-description prompt from a session's data bag.
///
/// Uses the personal-info step and, when the candidate has already gone
/// further, the professional-info step.
pub fn profile_description_prompt(data: &Value) -> String {
    let mut lines = vec!["Write a professional summary for this candidate.".to_string()];

    if let Some(personal) = data.get("personal_info") {
        if let Some(name) = personal.get("full_name").and_then(Value::as_str) {
            lines.push(format!("Name: {name}"));
        }
        if let Some(location) = personal.get("location").and_then(Value::as_str) {
            lines.push(format!("Location: {location}"));
        }
    }

    if let Some(professional) = data.get("professional_info") {
        if let Some(position) = professional.get("desired_position").and_then(Value::as_str) {
            lines.push(format!("Desired position: {position}"));
        }
        if let Some(years) = professional.get("years_experience").and_then(Value::as_i64) {
            lines.push(format!("Years of experience: {years}"));
        }
        if let Some(skills) = professional.get("skills").and_then(Value::as_array) {
            let skills: Vec<&str> = skills.iter().filter_map(Value::as_str).collect();
            if !skills.is_empty() {
                lines.push(format!("Skills: {}", skills.join(", ")));
            }
        }
    }

    lines.join("\n")
}

/// Inputs for a cover letter draft, taken from a finalized profile.
#[derive(Debug, Clone)]
pub struct CoverLetterInputs<'a> {
    pub full_name: &'a str,
    pub desired_position: &'a str,
    pub years_experience: i32,
    pub skills: &'a [String],
    pub description: &'a str,
    pub job_title: &'a str,
    pub job_company: Option<&'a str>,
    pub job_description: &'a str,
}

/// Build the cover letter prompt from a finalized profile and the stored
/// job posting.
pub fn cover_letter_prompt(inputs: &CoverLetterInputs<'_>) -> String {
    let mut lines = vec![
        "Draft a cover letter for this application.".to_string(),
        String::new(),
        "Candidate:".to_string(),
        format!("Name: {}", inputs.full_name),
        format!("Target role: {}", inputs.desired_position),
        format!("Years of experience: {}", inputs.years_experience),
    ];
    if !inputs.skills.is_empty() {
        lines.push(format!("Skills: {}", inputs.skills.join(", ")));
    }
    lines.push(format!("Summary: {}", inputs.description));
    lines.push(String::new());
    lines.push("Job posting:".to_string());
    match inputs.job_company {
        Some(company) => lines.push(format!("Role: {} at {}", inputs.job_title, company)),
        None => lines.push(format!("Role: {}", inputs.job_title)),
    }
    lines.push(format!("Description: {}", inputs.job_description));

    lines.join("\n")
}
