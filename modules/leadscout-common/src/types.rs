use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fields;

/// Placeholder used when a narrative summary call fails.
pub const SUMMARY_FAILED: &str = "Summary generation failed";

// --- Identity ---

/// One person to enrich, from a post's reactor list or a submitted profile URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub urn: String,
    pub name: String,
    pub profile_url: String,
}

impl Identity {
    pub fn new(
        urn: impl Into<String>,
        name: impl Into<String>,
        profile_url: impl Into<String>,
    ) -> Self {
        Self {
            urn: urn.into(),
            name: name.into(),
            profile_url: profile_url.into(),
        }
    }
}

/// A post reactor as reported by the reaction provider. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reactor {
    pub urn: Option<String>,
    pub name: Option<String>,
    pub profile_url: Option<String>,
}

// --- Enriched profile ---

/// Profile attributes resolved from a profile-provider payload.
/// `raw` carries the full payload through to summarization untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedProfile {
    pub full_name: Option<String>,
    pub headline: Option<String>,
    pub company_ref: Option<String>,
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub raw: Value,
}

impl EnrichedProfile {
    /// Resolve a provider payload. `None` when the payload carries no data.
    pub fn from_raw(raw: Value) -> Option<Self> {
        if is_empty_payload(&raw) {
            return None;
        }
        Some(Self {
            full_name: fields::resolve(&raw, fields::PROFILE_FULL_NAME),
            headline: fields::resolve(&raw, fields::PROFILE_HEADLINE),
            company_ref: fields::resolve(&raw, fields::PROFILE_COMPANY_REF),
            company_name: fields::resolve(&raw, fields::PROFILE_COMPANY_NAME),
            email: fields::resolve(&raw, fields::PROFILE_EMAIL),
            raw,
        })
    }
}

// --- Organization record ---

/// Which link of the fallback chain produced an organization record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationSource {
    Primary,
    Backup,
    /// Neither provider answered; only the profile's own company name is known.
    ProfileOnly,
}

impl fmt::Display for OrganizationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Backup => write!(f, "backup"),
            Self::ProfileOnly => write!(f, "profile_only"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrganizationRecord {
    pub name: Option<String>,
    pub website: Option<String>,
    pub employee_count: Option<String>,
    pub industry: Option<String>,
    pub source: OrganizationSource,
    /// Attributes for which no candidate field was present.
    pub unresolved: Vec<&'static str>,
    pub raw: Value,
}

impl OrganizationRecord {
    /// Resolve a provider payload. `None` when the payload carries no data.
    pub fn from_raw(raw: Value, source: OrganizationSource) -> Option<Self> {
        if is_empty_payload(&raw) {
            return None;
        }
        let name = fields::resolve(&raw, fields::ORG_NAME);
        let website = fields::resolve(&raw, fields::ORG_WEBSITE);
        let employee_count = fields::resolve(&raw, fields::ORG_EMPLOYEE_COUNT);
        let industry = fields::resolve(&raw, fields::ORG_INDUSTRY);

        let unresolved = [
            ("name", name.is_none()),
            ("website", website.is_none()),
            ("employee_count", employee_count.is_none()),
            ("industry", industry.is_none()),
        ]
        .into_iter()
        .filter_map(|(attr, missing)| missing.then_some(attr))
        .collect();

        Some(Self {
            name,
            website,
            employee_count,
            industry,
            source,
            unresolved,
            raw,
        })
    }

    /// Minimal stand-in carrying only the company name from the profile.
    pub fn from_profile(profile: &EnrichedProfile) -> Self {
        let name = profile
            .company_name
            .clone()
            .unwrap_or_else(|| "Unknown".to_string());
        Self {
            raw: serde_json::json!({ "name": name }),
            name: Some(name),
            website: None,
            employee_count: None,
            industry: None,
            source: OrganizationSource::ProfileOnly,
            unresolved: vec!["website", "employee_count", "industry"],
        }
    }
}

fn is_empty_payload(raw: &Value) -> bool {
    match raw {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

// --- Summaries ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKind {
    Profile,
    Organization,
}

impl fmt::Display for SummaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Profile => write!(f, "profile"),
            Self::Organization => write!(f, "organization"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summaries {
    pub profile: String,
    pub organization: String,
}

// --- Fit verdict ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum FitStrength {
    High,
    Medium,
    Low,
    #[serde(rename = "Other- Paid SAAS")]
    OtherPaidSaas,
    Unknown,
}

impl FitStrength {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::OtherPaidSaas => "Other- Paid SAAS",
            Self::Unknown => "Unknown",
        }
    }

    /// Lenient label match; anything unrecognised is `Unknown`.
    pub fn parse(label: &str) -> Self {
        let normalized: String = label
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            "otherpaidsaas" => Self::OtherPaidSaas,
            _ => Self::Unknown,
        }
    }
}

impl From<String> for FitStrength {
    fn from(label: String) -> Self {
        Self::parse(&label)
    }
}

impl fmt::Display for FitStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitVerdict {
    #[serde(rename = "icp_fit_strength")]
    pub strength: FitStrength,
    #[serde(default)]
    pub reason: String,
}

impl FitVerdict {
    pub fn unknown(reason: impl Into<String>) -> Self {
        Self {
            strength: FitStrength::Unknown,
            reason: reason.into(),
        }
    }
}

// --- Validation verdict ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum ValidationJudgement {
    Correct,
    Incorrect,
    Unsure,
}

impl ValidationJudgement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Correct => "Correct",
            Self::Incorrect => "Incorrect",
            Self::Unsure => "Unsure",
        }
    }

    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "correct" => Self::Correct,
            "incorrect" => Self::Incorrect,
            _ => Self::Unsure,
        }
    }
}

impl From<String> for ValidationJudgement {
    fn from(label: String) -> Self {
        Self::parse(&label)
    }
}

impl fmt::Display for ValidationJudgement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationVerdict {
    #[serde(rename = "validation_judgement")]
    pub judgement: ValidationJudgement,
    #[serde(rename = "validation_reason")]
    pub reason: String,
}

impl ValidationVerdict {
    pub fn unsure(reason: impl Into<String>) -> Self {
        Self {
            judgement: ValidationJudgement::Unsure,
            reason: reason.into(),
        }
    }
}

// --- Results ---

/// Final enrichment result for one identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub urn: String,
    pub name: String,
    pub company_name: String,
    pub company_website: String,
    pub email: String,
    pub title: String,
    pub profile_url: String,
    #[serde(flatten)]
    pub fit: FitVerdict,
    #[serde(flatten)]
    pub validation: ValidationVerdict,
    pub profile_summary: String,
    pub company_summary: String,
}

/// An identity that did not produce a lead, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skip {
    pub urn: String,
    pub name: String,
    pub reason: String,
    pub profile_url: String,
}

impl Skip {
    pub fn for_identity(identity: &Identity, reason: impl Into<String>) -> Self {
        Self {
            urn: identity.urn.clone(),
            name: identity.name.clone(),
            reason: reason.into(),
            profile_url: identity.profile_url.clone(),
        }
    }
}

/// Exactly one of these is recorded per processed identity.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Lead(Box<Lead>),
    Skip(Skip),
}

impl Outcome {
    pub fn is_lead(&self) -> bool {
        matches!(self, Self::Lead(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_profile_payload_is_none() {
        assert!(EnrichedProfile::from_raw(json!({})).is_none());
        assert!(EnrichedProfile::from_raw(Value::Null).is_none());
    }

    #[test]
    fn profile_resolves_known_fields() {
        let profile = EnrichedProfile::from_raw(json!({
            "fullName": "Ada Lovelace",
            "headline": "Founder at Engines",
            "companyLinkedin": "https://www.linkedin.com/company/engines",
            "companyName": "Engines Ltd",
            "skills": ["math"]
        }))
        .unwrap();
        assert_eq!(profile.full_name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(profile.company_name.as_deref(), Some("Engines Ltd"));
        assert_eq!(profile.email, None);
        assert_eq!(profile.raw["skills"][0], "math");
    }

    #[test]
    fn backup_shape_resolves_nested_fields() {
        let org = OrganizationRecord::from_raw(
            json!({"basic_info": {"name": "Acme", "website": "https://acme.io"}}),
            OrganizationSource::Backup,
        )
        .unwrap();
        assert_eq!(org.name.as_deref(), Some("Acme"));
        assert_eq!(org.website.as_deref(), Some("https://acme.io"));
        assert_eq!(org.unresolved, vec!["employee_count", "industry"]);
    }

    #[test]
    fn profile_only_record_keeps_profile_company_name() {
        let profile = EnrichedProfile::from_raw(json!({"companyName": "Engines Ltd"})).unwrap();
        let org = OrganizationRecord::from_profile(&profile);
        assert_eq!(org.name.as_deref(), Some("Engines Ltd"));
        assert_eq!(org.source, OrganizationSource::ProfileOnly);
    }

    #[test]
    fn fit_strength_parses_leniently() {
        assert_eq!(FitStrength::parse("high"), FitStrength::High);
        assert_eq!(FitStrength::parse(" Medium "), FitStrength::Medium);
        assert_eq!(FitStrength::parse("Other - Paid SaaS"), FitStrength::OtherPaidSaas);
        assert_eq!(FitStrength::parse("Excellent"), FitStrength::Unknown);
    }

    #[test]
    fn fit_verdict_deserializes_from_model_json() {
        let verdict: FitVerdict =
            serde_json::from_str(r#"{"icp_fit_strength": "Low", "reason": "Works at a competitor"}"#)
                .unwrap();
        assert_eq!(verdict.strength, FitStrength::Low);
        assert_eq!(verdict.reason, "Works at a competitor");
    }

    #[test]
    fn lead_serializes_flat_verdict_fields() {
        let lead = Lead {
            urn: "u1".into(),
            name: "Ada".into(),
            company_name: "Engines".into(),
            company_website: String::new(),
            email: String::new(),
            title: "Founder".into(),
            profile_url: "https://www.linkedin.com/in/ada".into(),
            fit: FitVerdict {
                strength: FitStrength::OtherPaidSaas,
                reason: "Sells SaaS".into(),
            },
            validation: ValidationVerdict::unsure("n/a"),
            profile_summary: "p".into(),
            company_summary: "c".into(),
        };
        let v = serde_json::to_value(&lead).unwrap();
        assert_eq!(v["icp_fit_strength"], "Other- Paid SAAS");
        assert_eq!(v["reason"], "Sells SaaS");
        assert_eq!(v["validation_judgement"], "Unsure");
        assert_eq!(v["validation_reason"], "n/a");
    }
}
