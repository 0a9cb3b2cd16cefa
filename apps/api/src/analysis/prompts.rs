// All LLM prompt constants for the analysis module.
// Templates carry {placeholder} slots filled by prompt_builder; never send
// a template without substituting every slot.

/// Career recommendation prompt. Replace: {education_level}, {institution},
/// {cgpa}, {percentage}, {riasec_scores}, {dominant_axes}, {interests},
/// {preferred_locations}, {work_preference}, {expected_salary}, {age},
/// {career_goal}
pub const CAREER_PROMPT_TEMPLATE: &str = r#"You are an expert career counselor. Analyze the following student profile and recommend suitable career paths.

STUDENT PROFILE:
- Education level: {education_level}
- Institution: {institution}
- CGPA: {cgpa}
- Percentage: {percentage}
- RIASEC personality scores: {riasec_scores}
- Dominant personality axes: {dominant_axes}
- Interest domains: {interests}
- Preferred locations: {preferred_locations}
- Work preference: {work_preference}
- Expected salary: {expected_salary}
- Age: {age}
- Career goal: {career_goal}

Respond with valid JSON only. Do NOT use markdown code fences. Do NOT include any text outside the JSON object. Use this EXACT schema (no extra fields):
{
  "recommendations": [
    {
      "title": "Data Analyst",
      "description": "Why this career fits the profile",
      "match_confidence": 0.85,
      "salary_range": "INR 4-8 LPA",
      "growth_outlook": "High"
    }
  ],
  "skills_gap": ["SQL", "Statistics"],
  "industry_insight": "One paragraph on current hiring trends relevant to this student",
  "action_plan": ["Step 1", "Step 2", "Step 3"]
}

Rules:
1. Recommend 3 to 5 careers, ordered by match_confidence descending
2. match_confidence must be a number between 0 and 1
3. Ground every recommendation in the profile fields above; fields marked "Not specified" must not be invented
4. Keep descriptions to two sentences each"#;

/// RIASEC assessment analysis prompt. Replace: {responses}
pub const RIASEC_PROMPT_TEMPLATE: &str = r#"You are a career psychologist scoring a RIASEC personality assessment. The student answered the following free-text questions:

{responses}

Score each of the six RIASEC axes from 0 to 100 based on the responses.

Respond with valid JSON only. Do NOT use markdown code fences. Use this EXACT schema (no extra fields):
{
  "scores": {
    "realistic": 40,
    "investigative": 75,
    "artistic": 30,
    "social": 55,
    "enterprising": 60,
    "conventional": 45
  },
  "summary": "Two to three sentences interpreting the personality profile",
  "suggested_careers": ["Career 1", "Career 2", "Career 3"]
}"#;

/// Learning path prompt. Replace: {career_goal}, {education_level}, {interests}
pub const LEARNING_PATH_PROMPT_TEMPLATE: &str = r#"You are a career counselor designing a concrete learning path for a student.

Career goal: {career_goal}
Current education level: {education_level}
Interest domains: {interests}

Write a step-by-step learning path (6-12 months) the student can follow: skills to acquire in order, free or low-cost resources for each, and one milestone project per phase. Respond in plain text, no markdown headings."#;

/// Chat prompt. Replace: {message}
pub const CHAT_PROMPT_TEMPLATE: &str = r#"You are a friendly career-counseling assistant for students. Answer the following question helpfully and concretely in at most two paragraphs. If the question is not about careers, education, or skills, gently steer back to career guidance.

Student question: {message}"#;
