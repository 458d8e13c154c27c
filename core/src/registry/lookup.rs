use crate::error::{CoreError, CoreResult};
use crate::fetch::RemoteFetcher;
use crate::registry::model::parse_sellers_document;
use crate::report::{LogEntry, Verdict};
use idna::domain_to_ascii;
use url::Url;

/// Result of one registry check. `name`/`domain` are empty unless `verdict`
/// is `Passed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryOutcome {
    pub name: String,
    pub domain: String,
    pub verdict: Verdict,
    pub diagnostics: Vec<LogEntry>,
}

impl RegistryOutcome {
    fn failed(diagnostics: Vec<LogEntry>) -> Self {
        Self {
            name: String::new(),
            domain: String::new(),
            verdict: Verdict::Failed,
            diagnostics,
        }
    }
}

/// Well-known registry location: `https://{domain}/sellers.json`.
///
/// The host is IDNA-normalized; anything that would change the path (slashes,
/// ports, userinfo) is rejected before any request is made.
pub fn registry_url(domain: &str) -> CoreResult<Url> {
    let host = domain_to_ascii(domain.trim())
        .map_err(|_| CoreError::InvalidInput(format!("invalid registry host: {}", domain)))?;
    if host.is_empty() {
        return Err(CoreError::InvalidInput("empty registry host".to_string()));
    }
    let url = Url::parse(&format!("https://{}/sellers.json", host))
        .map_err(|e| CoreError::InvalidInput(format!("invalid registry host {}: {}", domain, e)))?;
    if url.path() != "/sellers.json"
        || url.query().is_some()
        || !url.username().is_empty()
        || url.port().is_some()
    {
        return Err(CoreError::InvalidInput(format!(
            "invalid registry host: {}",
            domain
        )));
    }
    Ok(url)
}

pub struct RegistryLookup<'a, F: RemoteFetcher + ?Sized> {
    fetcher: &'a F,
}

impl<'a, F: RemoteFetcher + ?Sized> RegistryLookup<'a, F> {
    pub fn new(fetcher: &'a F) -> Self {
        Self { fetcher }
    }

    /// Checks `seller_id` against the registry hosted under `domain`.
    pub fn lookup(&self, domain: &str, seller_id: &str) -> RegistryOutcome {
        let mut diagnostics = vec![LogEntry::success(format!(
            "Validating sellers.json for ASI={}, SID={}...",
            domain, seller_id
        ))];

        let fetched = registry_url(domain).and_then(|u| self.fetcher.fetch_text(u.as_str()));
        let body = match fetched {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(%domain, error = %e, "sellers.json fetch failed");
                diagnostics.push(LogEntry::error(format!(
                    "Error: Could not fetch sellers.json for ASI {}: {}",
                    domain, e
                )));
                return RegistryOutcome::failed(diagnostics);
            }
        };

        let records = match parse_sellers_document(&body) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(%domain, error = %e, "sellers.json is not usable JSON");
                diagnostics.push(LogEntry::error(format!(
                    "Failed to parse JSON from sellers.json for ASI {}: {}",
                    domain, e
                )));
                return RegistryOutcome::failed(diagnostics);
            }
        };

        match records.into_iter().find(|r| r.has_seller_id(seller_id)) {
            Some(record) => {
                diagnostics.push(LogEntry::success(format!(
                    "Passed: SID {} found in sellers.json for ASI {}.",
                    seller_id, domain
                )));
                RegistryOutcome {
                    name: record.name,
                    domain: record.domain,
                    verdict: Verdict::Passed,
                    diagnostics,
                }
            }
            None => {
                diagnostics.push(LogEntry::error(format!(
                    "Failed: SID {} not found in sellers.json for ASI {}.",
                    seller_id, domain
                )));
                RegistryOutcome::failed(diagnostics)
            }
        }
    }
}
