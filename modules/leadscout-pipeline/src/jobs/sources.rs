//! Turning submitted input into identities: post references, manual profile
//! URLs and reactor records.

use leadscout_common::{Identity, Reactor, Skip};

const RESERVED_HANDLES: &[&str] = &["in", "company", "school", "www.linkedin.com", "linkedin.com"];
const MIN_HANDLE_LEN: usize = 3;

/// One entry of a job's work list.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkItem {
    Ready(Identity),
    /// Rejected before processing; recorded as-is when its turn comes.
    Rejected(Skip),
}

impl WorkItem {
    /// Display name for progress messages.
    pub fn label(&self) -> &str {
        match self {
            Self::Ready(identity) => &identity.name,
            Self::Rejected(skip) => &skip.name,
        }
    }
}

/// Post id from a full post URL (last all-digit path segment), or the trimmed
/// input when there is none.
pub fn extract_post_id(post_ref: &str) -> String {
    let trimmed = post_ref.trim();
    if !trimmed.contains("linkedin.com") && !trimmed.contains('/') {
        return trimmed.to_string();
    }
    trimmed
        .split('/')
        .filter(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
        .last()
        .unwrap_or(trimmed)
        .to_string()
}

/// Strip the query string and trailing slashes, and force `https://`.
pub fn normalize_profile_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_query = trimmed.split('?').next().unwrap_or(trimmed);
    let url = without_query.trim_end_matches('/');
    if let Some(rest) = url.strip_prefix("http://") {
        format!("https://{rest}")
    } else if url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Identity for an already-normalized manual profile URL. The handle after
/// `/in/` becomes both urn and name.
pub fn identity_from_profile_url(url: &str) -> WorkItem {
    let parts: Vec<&str> = url.trim_end_matches('/').split('/').collect();
    let n = parts.len();
    if n < 5 || parts[n - 2] != "in" || parts[n - 1].is_empty() {
        return WorkItem::Rejected(Skip {
            urn: "unknown".to_string(),
            name: "Unknown".to_string(),
            reason: "Invalid URL format (no profile ID)".to_string(),
            profile_url: url.to_string(),
        });
    }

    let handle = parts[n - 1];
    let rejection = if RESERVED_HANDLES.contains(&handle) {
        Some("Invalid URL (reserved word as profile ID)")
    } else if handle.chars().count() < MIN_HANDLE_LEN {
        Some("Invalid URL (profile ID too short)")
    } else {
        None
    };

    match rejection {
        Some(reason) => WorkItem::Rejected(Skip {
            urn: handle.to_string(),
            name: handle.to_string(),
            reason: reason.to_string(),
            profile_url: url.to_string(),
        }),
        None => WorkItem::Ready(Identity::new(handle, handle, url)),
    }
}

pub fn identity_from_reactor(reactor: Reactor) -> WorkItem {
    let urn = reactor.urn.unwrap_or_else(|| "unknown".to_string());
    let name = reactor.name.unwrap_or_else(|| "Unknown".to_string());
    match reactor.profile_url.filter(|url| !url.trim().is_empty()) {
        Some(profile_url) => WorkItem::Ready(Identity::new(urn, name, profile_url)),
        None => WorkItem::Rejected(Skip {
            urn,
            name,
            reason: "Reactor has no profile URL".to_string(),
            profile_url: String::new(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejection(item: WorkItem) -> Skip {
        match item {
            WorkItem::Rejected(skip) => skip,
            WorkItem::Ready(identity) => panic!("expected rejection, got {identity:?}"),
        }
    }

    #[test]
    fn post_id_from_url_and_bare_id() {
        assert_eq!(
            extract_post_id("https://www.linkedin.com/feed/update/urn:li:activity:1/7312345678901234567/"),
            "7312345678901234567"
        );
        assert_eq!(extract_post_id("  7312345678901234567 "), "7312345678901234567");
        assert_eq!(
            extract_post_id("https://www.linkedin.com/posts/ada_voice-activity"),
            "https://www.linkedin.com/posts/ada_voice-activity"
        );
    }

    #[test]
    fn profile_urls_are_normalized() {
        assert_eq!(
            normalize_profile_url(" linkedin.com/in/ada-lovelace/?utm_source=share "),
            "https://linkedin.com/in/ada-lovelace"
        );
        assert_eq!(
            normalize_profile_url("http://www.linkedin.com/in/ada"),
            "https://www.linkedin.com/in/ada"
        );
        assert_eq!(
            normalize_profile_url("https://www.linkedin.com/in/ada//"),
            "https://www.linkedin.com/in/ada"
        );
    }

    #[test]
    fn valid_profile_url_uses_handle_as_identity() {
        let item = identity_from_profile_url("https://www.linkedin.com/in/ada-lovelace");
        assert_eq!(
            item,
            WorkItem::Ready(Identity::new(
                "ada-lovelace",
                "ada-lovelace",
                "https://www.linkedin.com/in/ada-lovelace"
            ))
        );
    }

    #[test]
    fn malformed_profile_urls_are_rejected_with_reason() {
        let no_handle = rejection(identity_from_profile_url("https://www.linkedin.com/company/acme"));
        assert_eq!(no_handle.reason, "Invalid URL format (no profile ID)");
        assert_eq!(no_handle.urn, "unknown");
        assert_eq!(no_handle.name, "Unknown");

        let reserved = rejection(identity_from_profile_url("https://www.linkedin.com/in/company"));
        assert_eq!(reserved.reason, "Invalid URL (reserved word as profile ID)");
        assert_eq!(reserved.urn, "company");

        let short = rejection(identity_from_profile_url("https://www.linkedin.com/in/ab"));
        assert_eq!(short.reason, "Invalid URL (profile ID too short)");

        let too_few_parts = rejection(identity_from_profile_url("https://in/ada"));
        assert_eq!(too_few_parts.reason, "Invalid URL format (no profile ID)");
    }

    #[test]
    fn reactor_without_url_is_rejected() {
        let skip = rejection(identity_from_reactor(Reactor {
            urn: Some("urn:li:person:1".into()),
            name: None,
            profile_url: Some("  ".into()),
        }));
        assert_eq!(skip.reason, "Reactor has no profile URL");
        assert_eq!(skip.name, "Unknown");
        assert_eq!(skip.urn, "urn:li:person:1");
    }
}
