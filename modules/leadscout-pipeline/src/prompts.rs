//! Prompt text for every generation call the pipeline makes.

use leadscout_common::{FitVerdict, SummaryKind};

pub const PROFILE_SUMMARY_SYSTEM: &str = r#"You analyze scraped LinkedIn profile JSON and write a detailed summary of the person.

Use the data in the JSON. Ignore picture and image URLs, company size, and any experience that ended more than two years ago. Cover the current role and the last two years of experience, including role descriptions at the current company, which must be highlighted when present.

If education shows the person is still an undergraduate or graduated within the last twelve months, say so in a separate sentence.

Cover career trajectory, skills, education, current responsibilities and anything that sets the person apart. Write plain paragraphs. Do not use tables."#;

pub const ORGANIZATION_SUMMARY_SYSTEM: &str = r#"You analyze scraped company JSON and write a detailed summary of the company.

Keep the slogan and description as close to the source wording as possible. Include name, industry, employee count, headquarters, founding year, website and anything else you know about the company.

Call out explicitly when the company looks like an IT consulting or implementation agency, a very large or well known enterprise, a voice AI company, or a well funded startup.

Write plain paragraphs. If no company data is present, answer exactly: No company data found"#;

const FIT_EVALUATION_TEMPLATE: &str = r#"You are a sales analyst judging whether a lead fits our ideal customer persona.

We build an open-source, drag and drop workflow builder for voice AI agents, and also sell a managed offering where we build, integrate and run the agent for a setup fee plus per-minute usage.

Lead's PROFILE SUMMARY:
{profile_summary}

Lead's COMPANY SUMMARY:
{company_summary}

Guidelines:
- Companies building a voice AI platform are competitors and a "Low" fit. Teams building agents on top of a platform are good prospects.
- Agencies, system integrators, contact center and CX consultancies, and builders on hosted voice platforms are strong fits.
- Startups in fintech, lending, insurance, collections, home services, logistics, travel and hospitality are strong fits, as are call centers.
- HR, marketing, personal branding, coaching, students and content creators are a "Low" fit.
- Sales or customer success people at companies that could use voice agents are "Other- Paid SAAS".
- Founders are "High" or "Medium" only when their company could use us.
- Current employees of large platform vendors or direct voice AI competitors are "Low"; their consulting partners are "Medium".
- Look closely at the last two experiences for voice AI building work.
- Only answer "High" or "Low" when confident. When in doubt answer "Medium".

Respond in JSON only:
{"icp_fit_strength": "High" | "Medium" | "Low" | "Other- Paid SAAS", "reason": "one or two sentences"}"#;

pub const VALIDATION_SYSTEM: &str =
    "You are a JSON-only response bot. Always respond with valid JSON only, no other text.";

const VALIDATION_TEMPLATE: &str = r#"You MUST respond with ONLY a raw JSON object. No prose, no markdown, no code fences.

You are a skeptical reviewer checking an ideal-customer-persona classification. Re-derive the classification from scratch using the rules below, then judge whether the first evaluation was right. Be especially careful when it says "High" or "Low".

Lead's PROFILE SUMMARY:
{profile_summary}

Lead's COMPANY SUMMARY:
{company_summary}

FIRST EVALUATION:
- ICP Fit Strength: {icp_fit_strength}
- Reason: {icp_reason}

Hard rules, any of which means the answer should have been "Low":
1. Works at a competing voice platform or a large platform vendor.
2. Works in HR, recruiting, personal branding, content creation, or is a student.
3. Junior non-technical role at a company with more than 1000 employees.
4. No commercial or technical background.

High fit: agencies building voice agents, companies automating calls, builders on hosted voice platforms, CX transformation shops, consulting partners of the major platforms.
Other- Paid SAAS: sales or customer success roles at companies that could use voice agents.

validation_judgement must be exactly one of "Correct", "Incorrect", "Unsure".
validation_reason is one or two short sentences citing evidence.

{"validation_judgement": "Correct", "validation_reason": "..."}"#;

pub fn summary_system_prompt(kind: SummaryKind) -> &'static str {
    match kind {
        SummaryKind::Profile => PROFILE_SUMMARY_SYSTEM,
        SummaryKind::Organization => ORGANIZATION_SUMMARY_SYSTEM,
    }
}

pub fn summary_user_prompt(kind: SummaryKind, raw: &serde_json::Value) -> String {
    let body = serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string());
    match kind {
        SummaryKind::Profile => format!("Profile JSON:\n{body}"),
        SummaryKind::Organization => format!("Company JSON:\n{body}"),
    }
}

pub fn fit_evaluation_prompt(profile_summary: &str, company_summary: &str) -> String {
    fill(
        FIT_EVALUATION_TEMPLATE,
        &[
            ("profile_summary", profile_summary),
            ("company_summary", company_summary),
        ],
    )
}

pub fn validation_prompt(profile_summary: &str, company_summary: &str, verdict: &FitVerdict) -> String {
    fill(
        VALIDATION_TEMPLATE,
        &[
            ("profile_summary", profile_summary),
            ("company_summary", company_summary),
            ("icp_fit_strength", verdict.strength.as_str()),
            ("icp_reason", verdict.reason.as_str()),
        ],
    )
}

/// Substitute `{name}` placeholders in a single left-to-right pass. Inserted
/// values are never rescanned, and braces that don't name a placeholder are
/// copied through unchanged.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let hit = values.iter().find(|(name, _)| {
            tail.strip_prefix(*name)
                .is_some_and(|after| after.starts_with('}'))
        });
        match hit {
            Some(&(name, value)) => {
                out.push_str(value);
                rest = &tail[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}
