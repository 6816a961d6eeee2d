//! Ordered source-field candidates for provider payloads.
//!
//! Providers disagree on field names and nesting (`website` vs `websiteUrl`
//! vs `basic_info.website`). Each logical attribute lists its candidates in
//! priority order as JSON pointers. Resolution runs once, where the payload is
//! ingested, so nothing downstream re-guesses.

use serde_json::Value;

pub const PROFILE_FULL_NAME: &[&str] = &["/fullName", "/full_name", "/name"];
pub const PROFILE_HEADLINE: &[&str] = &["/headline", "/jobTitle", "/occupation"];
pub const PROFILE_COMPANY_REF: &[&str] = &[
    "/companyLinkedin",
    "/companyLinkedinUrl",
    "/currentCompany/linkedinUrl",
];
pub const PROFILE_COMPANY_NAME: &[&str] = &["/companyName", "/currentCompany/name"];
pub const PROFILE_EMAIL: &[&str] = &["/email", "/emailAddress"];

pub const ORG_NAME: &[&str] = &["/name", "/companyName", "/basic_info/name"];
pub const ORG_WEBSITE: &[&str] = &["/website", "/websiteUrl", "/basic_info/website"];
pub const ORG_EMPLOYEE_COUNT: &[&str] = &[
    "/employeeCount",
    "/employeesCount",
    "/staffCount",
    "/basic_info/employee_count",
    "/stats/employee_count",
];
pub const ORG_INDUSTRY: &[&str] = &["/industry", "/industries", "/basic_info/industries"];

/// First candidate that resolves to a usable scalar, rendered as a string.
pub fn resolve(value: &Value, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|pointer| value.pointer(pointer))
        .find_map(render)
}

fn render(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(render).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flat_field_wins_over_nested() {
        let v = json!({"website": "https://a.io", "basic_info": {"website": "https://b.io"}});
        assert_eq!(resolve(&v, ORG_WEBSITE).as_deref(), Some("https://a.io"));
    }

    #[test]
    fn alternate_flat_field_used_when_first_missing() {
        let v = json!({"websiteUrl": "https://alt.io"});
        assert_eq!(resolve(&v, ORG_WEBSITE).as_deref(), Some("https://alt.io"));
    }

    #[test]
    fn nested_field_resolves() {
        let v = json!({"basic_info": {"name": "Acme", "industries": ["Software", "AI"]}});
        assert_eq!(resolve(&v, ORG_NAME).as_deref(), Some("Acme"));
        assert_eq!(resolve(&v, ORG_INDUSTRY).as_deref(), Some("Software, AI"));
    }

    #[test]
    fn profile_company_falls_back_to_nested_current_company() {
        let v = json!({"currentCompany": {"name": "Acme", "linkedinUrl": "https://www.linkedin.com/company/acme"}});
        assert_eq!(resolve(&v, PROFILE_COMPANY_NAME).as_deref(), Some("Acme"));
        assert_eq!(
            resolve(&v, PROFILE_COMPANY_REF).as_deref(),
            Some("https://www.linkedin.com/company/acme")
        );
    }

    #[test]
    fn blank_strings_fall_through() {
        let v = json!({"website": "  ", "websiteUrl": "https://real.io"});
        assert_eq!(resolve(&v, ORG_WEBSITE).as_deref(), Some("https://real.io"));
    }

    #[test]
    fn numbers_render_as_strings() {
        let v = json!({"staffCount": 420});
        assert_eq!(resolve(&v, ORG_EMPLOYEE_COUNT).as_deref(), Some("420"));
    }

    #[test]
    fn absent_everywhere_is_none() {
        assert_eq!(resolve(&json!({"other": 1}), ORG_NAME), None);
        assert_eq!(resolve(&json!("not an object"), ORG_NAME), None);
    }
}
