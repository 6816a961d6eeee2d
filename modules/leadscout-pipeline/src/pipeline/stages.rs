use std::sync::Arc;

use anyhow::{ensure, Result};
use tokio::time::Instant;
use tracing::{info, warn};
use typed_builder::TypedBuilder;

use ai_client::truncate_to_char_boundary;

use leadscout_common::{
    EnrichedProfile, FitVerdict, Identity, Lead, OrganizationRecord, Outcome, Skip, Summaries,
    SummaryKind, ValidationVerdict, SUMMARY_FAILED,
};

use crate::enrichment::OrganizationChain;
use crate::extraction::extract_verdict;
use crate::pipeline::boundary::{generate_or, Lookup};
use crate::traits::{FitEvaluator, FitValidator, ProfileLookup, SummaryGenerator};

pub const PROFILE_UNAVAILABLE: &str = "Could not fetch profile data";
pub const EVALUATION_FAILED: &str = "Evaluation failed";
pub const VALIDATION_UNPARSEABLE: &str = "Failed to parse validation response";

/// The fixed per-identity stage chain:
/// profile → organization (fallback chain) → summaries → fit evaluation →
/// validation → lead.
///
/// Only the profile stage can end the chain early. Every later stage degrades
/// to a sentinel value on failure.
#[derive(TypedBuilder)]
pub struct LeadPipeline {
    profiles: Arc<dyn ProfileLookup>,
    organizations: OrganizationChain,
    summarizer: Arc<dyn SummaryGenerator>,
    evaluator: Arc<dyn FitEvaluator>,
    validator: Arc<dyn FitValidator>,
}

impl LeadPipeline {
    /// Run one identity through every stage. `Err` only for inputs the chain
    /// cannot start on; collaborator failures never surface here.
    pub async fn process(&self, identity: &Identity) -> Result<Outcome> {
        ensure!(
            !identity.profile_url.trim().is_empty(),
            "identity {} has no profile URL",
            identity.urn
        );
        let started = Instant::now();

        let Some(profile) = self.lookup_profile(identity).await else {
            return Ok(Outcome::Skip(Skip::for_identity(identity, PROFILE_UNAVAILABLE)));
        };

        let organization = match profile.company_ref.as_deref() {
            Some(reference) => self.organizations.resolve(reference).await,
            None => {
                info!(urn = %identity.urn, "Profile has no organization reference");
                None
            }
        }
        .unwrap_or_else(|| OrganizationRecord::from_profile(&profile));

        let summaries = self.summarize(identity, &profile, &organization).await;
        let fit = self.evaluate(identity, &summaries).await;
        let validation = self.validate(identity, &summaries, &fit).await;

        let lead = assemble(identity, &profile, &organization, summaries, fit, validation);
        info!(
            urn = %lead.urn,
            strength = %lead.fit.strength,
            judgement = %lead.validation.judgement,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Lead assembled"
        );
        Ok(Outcome::Lead(Box::new(lead)))
    }

    async fn lookup_profile(&self, identity: &Identity) -> Option<EnrichedProfile> {
        let lookup = Lookup::from_result(self.profiles.profile(&identity.profile_url).await)
            .and_then(EnrichedProfile::from_raw);
        match lookup {
            Lookup::Found(profile) => Some(profile),
            Lookup::Empty => {
                warn!(urn = %identity.urn, url = %identity.profile_url, "Profile lookup returned nothing");
                None
            }
            Lookup::Failed(error) => {
                warn!(urn = %identity.urn, url = %identity.profile_url, error = %error, "Profile lookup failed");
                None
            }
        }
    }

    async fn summarize(
        &self,
        identity: &Identity,
        profile: &EnrichedProfile,
        organization: &OrganizationRecord,
    ) -> Summaries {
        let placeholder = |_: &str| SUMMARY_FAILED.to_string();
        let ((profile_summary, profile_err), (org_summary, org_err)) = tokio::join!(
            generate_or(
                self.summarizer.summarize(SummaryKind::Profile, &profile.raw),
                placeholder
            ),
            generate_or(
                self.summarizer.summarize(SummaryKind::Organization, &organization.raw),
                placeholder
            ),
        );

        for (kind, err) in [
            (SummaryKind::Profile, profile_err),
            (SummaryKind::Organization, org_err),
        ] {
            if let Some(error) = err {
                warn!(urn = %identity.urn, %kind, error = %error, "Summary generation failed");
            }
        }

        Summaries {
            profile: profile_summary,
            organization: org_summary,
        }
    }

    async fn evaluate(&self, identity: &Identity, summaries: &Summaries) -> FitVerdict {
        let (verdict, err) = generate_or(
            self.evaluator
                .evaluate(&summaries.profile, &summaries.organization),
            |_| FitVerdict::unknown(EVALUATION_FAILED),
        )
        .await;
        if let Some(error) = err {
            warn!(urn = %identity.urn, error = %error, "Fit evaluation failed");
        }
        verdict
    }

    async fn validate(
        &self,
        identity: &Identity,
        summaries: &Summaries,
        fit: &FitVerdict,
    ) -> ValidationVerdict {
        match self
            .validator
            .validate(&summaries.profile, &summaries.organization, fit)
            .await
        {
            Ok(text) => extract_verdict(&text).unwrap_or_else(|| {
                warn!(
                    urn = %identity.urn,
                    preview = truncate_to_char_boundary(&text, 200),
                    "Validation response not parseable"
                );
                ValidationVerdict::unsure(VALIDATION_UNPARSEABLE)
            }),
            Err(e) => {
                warn!(urn = %identity.urn, error = %e, "Validation call failed");
                ValidationVerdict::unsure(format!("Validation error: {e}"))
            }
        }
    }
}

fn assemble(
    identity: &Identity,
    profile: &EnrichedProfile,
    organization: &OrganizationRecord,
    summaries: Summaries,
    fit: FitVerdict,
    validation: ValidationVerdict,
) -> Lead {
    let company_name = profile
        .company_name
        .clone()
        .or_else(|| organization.name.clone())
        .unwrap_or_else(|| "Unknown".to_string());

    Lead {
        urn: identity.urn.clone(),
        name: profile
            .full_name
            .clone()
            .unwrap_or_else(|| identity.name.clone()),
        company_name,
        company_website: organization.website.clone().unwrap_or_default(),
        email: profile.email.clone().unwrap_or_default(),
        title: profile.headline.clone().unwrap_or_default(),
        profile_url: identity.profile_url.clone(),
        fit,
        validation,
        profile_summary: summaries.profile,
        company_summary: summaries.organization,
    }
}
