// Instruction templates for the three evaluation actions, and the assembler
// that joins a template with the user's job description.

/// HR review: strengths and weaknesses of the candidate against the role.
pub const HR_REVIEW_PROMPT: &str = "You are an experienced HR With Tech Experience in the field of Data Science, Full stack Web development, Big Data Engineering, DEVOPS, and Data Analyst roles. Your task is to review the provided resume against the following Job Description.
Please share your professional evaluation on whether the candidate's profile aligns with the specified job requirements. Highlight the strengths and weaknesses of the applicant in relation to the specified job role.
";

/// Career-coach advice on missing skills, grouped by topic.
pub const SKILL_IMPROVEMENT_PROMPT: &str = "Based on the provided resume and the Job Description, act as a career coach. Identify the key skills and keywords that are missing or weak in the resume compared to the job requirements. Provide a specific, actionable list of technical skills, tools, and projects the candidate should focus on to significantly improve their profile for this kind of role. Structure your advice clearly by topic (e.g., Programming, Cloud, Tools).
";

/// ATS scan: percentage match first, then missing keywords.
pub const ATS_MATCH_PROMPT: &str = "You are a skilled ATS (Applicant Tracking System) scanner with a deep understanding of Data Science, Full stack Web development, Big Data Engineering, DEVOPS, Data Analyst and deep ATS functionality. Your task is to evaluate the resume against the following Job Description.
Give me the percentage match between the resume and the job description. First the output should come as percentage (e.g., 78%) and then a list of keywords missing in the resume compared to the job description.";

const JOB_DESCRIPTION_SEPARATOR: &str = "\n\nJob Description:\n";

/// Joins an instruction template and the job description into one prompt.
/// The job description is passed through untouched, whatever its length.
pub fn assemble(template: &str, job_description: &str) -> String {
    let mut prompt =
        String::with_capacity(template.len() + JOB_DESCRIPTION_SEPARATOR.len() + job_description.len());
    prompt.push_str(template);
    prompt.push_str(JOB_DESCRIPTION_SEPARATOR);
    prompt.push_str(job_description);
    prompt
}
