use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use leadscout_common::{OrganizationRecord, OrganizationSource};

use crate::pipeline::boundary::Lookup;
use crate::traits::OrganizationLookup;

/// Primary organization provider with a single backup.
///
/// Never fails: provider errors, timeouts and empty payloads all fall through
/// to the next link, and an exhausted chain returns `None`.
pub struct OrganizationChain {
    primary: Arc<dyn OrganizationLookup>,
    backup: Arc<dyn OrganizationLookup>,
    provider_timeout: Option<Duration>,
}

impl OrganizationChain {
    pub fn new(primary: Arc<dyn OrganizationLookup>, backup: Arc<dyn OrganizationLookup>) -> Self {
        Self {
            primary,
            backup,
            provider_timeout: None,
        }
    }

    /// Bound each provider call individually.
    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = Some(timeout);
        self
    }

    pub async fn resolve(&self, reference: &str) -> Option<OrganizationRecord> {
        let links = [
            (&self.primary, OrganizationSource::Primary),
            (&self.backup, OrganizationSource::Backup),
        ];

        for (provider, source) in links {
            let lookup = Lookup::capture(provider.organization(reference), self.provider_timeout)
                .await
                .and_then(|raw| OrganizationRecord::from_raw(raw, source));

            match lookup {
                Lookup::Found(record) => {
                    if !record.unresolved.is_empty() {
                        warn!(
                            provider = provider.provider(),
                            reference,
                            unresolved = ?record.unresolved,
                            "Organization attributes missing from every candidate field"
                        );
                    }
                    info!(provider = provider.provider(), %source, reference, "Organization resolved");
                    return Some(record);
                }
                Lookup::Empty => {
                    warn!(provider = provider.provider(), reference, "Organization provider returned nothing");
                }
                Lookup::Failed(error) => {
                    warn!(provider = provider.provider(), reference, error = %error, "Organization provider failed");
                }
            }
        }

        warn!(reference, "Organization fallback chain exhausted");
        None
    }
}
