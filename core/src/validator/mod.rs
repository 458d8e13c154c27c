//! Chain validation engine.
//!
//! A run is a fixed sequence of stages: parse the chain description, drop
//! incomplete nodes, fetch the disclosure file once, check every node, check
//! the optional reseller, aggregate. Only the parse stage can reject a run;
//! every remote failure is absorbed into a per-node `Failed` verdict plus a
//! diagnostic entry.

use crate::chain::{parse_supply_chain, ResellerIdentity, SupplyChain, SupplyChainNode};
use crate::config::ValidatorConfig;
use crate::disclosure::{matches, normalize, DisclosureLine};
use crate::fetch::RemoteFetcher;
use crate::registry::RegistryLookup;
use crate::report::{LogEntry, RunStatus, ValidationReport, ValidationRow, Verdict};
use crate::run_id::run_id_ulid;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationRequest {
    /// Raw chain description (JSON text), decoded by the run itself.
    pub schain: String,
    pub ads_txt_url: String,
    #[serde(default)]
    pub reseller: Option<ResellerIdentity>,
}

/// Both checks for one party, with that party's log entries in attempt order.
#[derive(Debug, Clone)]
pub struct NodeOutcome {
    pub row: ValidationRow,
    pub diagnostics: Vec<LogEntry>,
}

pub struct ChainValidator<F: RemoteFetcher> {
    fetcher: F,
    config: ValidatorConfig,
}

impl<F: RemoteFetcher> ChainValidator<F> {
    pub fn new(fetcher: F, config: ValidatorConfig) -> Self {
        Self { fetcher, config }
    }

    /// Full run from a raw request, including the parse stage.
    pub fn validate_request(&self, req: &ValidationRequest) -> ValidationReport {
        let run_id = run_id_ulid();
        let raw_nodes = match parse_supply_chain(&req.schain) {
            Ok(n) => n,
            Err(e) => {
                tracing::info!(%run_id, error = %e, "chain description rejected");
                return ValidationReport::rejected(
                    run_id,
                    LogEntry::error(format!("Invalid sChain format: {}", e)),
                );
            }
        };
        let chain = SupplyChain::from_nodes(raw_nodes);
        self.run(run_id, &chain, &req.ads_txt_url, req.reseller.as_ref())
    }

    /// Run over an already-decoded chain.
    pub fn validate(
        &self,
        chain: &SupplyChain,
        disclosure_url: &str,
        reseller: Option<&ResellerIdentity>,
    ) -> ValidationReport {
        self.run(run_id_ulid(), chain, disclosure_url, reseller)
    }

    fn run(
        &self,
        run_id: String,
        chain: &SupplyChain,
        disclosure_url: &str,
        reseller: Option<&ResellerIdentity>,
    ) -> ValidationReport {
        tracing::info!(%run_id, nodes = chain.len(), "validation run started");
        let mut logs = Vec::new();

        let lines = self.fetch_disclosure(disclosure_url, &mut logs);

        let mut table = Vec::with_capacity(chain.len());
        for outcome in self.check_nodes(chain.nodes(), &lines) {
            logs.extend(outcome.diagnostics);
            table.push(outcome.row);
        }

        if let Some(r) = reseller {
            let outcome = self.check_party(&r.domain, &r.seller_id, &lines);
            logs.extend(outcome.diagnostics);
        }

        let fully_passed = table
            .iter()
            .filter(|r| {
                r.disclosure_verdict == Verdict::Passed && r.registry_verdict == Verdict::Passed
            })
            .count();
        tracing::info!(%run_id, rows = table.len(), fully_passed, "validation run finished");

        ValidationReport {
            run_id,
            status: RunStatus::Passed,
            logs,
            table,
        }
    }

    /// A failed fetch leaves an empty line set: every disclosure check fails,
    /// registry checks are unaffected.
    fn fetch_disclosure(&self, url: &str, logs: &mut Vec<LogEntry>) -> Vec<DisclosureLine> {
        match self.fetcher.fetch_text(url) {
            Ok(body) => {
                let lines = normalize(&body);
                tracing::debug!(%url, lines = lines.len(), "disclosure file normalized");
                logs.push(LogEntry::success(format!(
                    "app-ads.txt fetched and normalized from {}.",
                    url
                )));
                lines
            }
            Err(e) => {
                tracing::warn!(%url, error = %e, "disclosure fetch failed");
                logs.push(LogEntry::error(format!(
                    "Error: Could not fetch or normalize app-ads.txt from {}. {}",
                    url, e
                )));
                Vec::new()
            }
        }
    }

    /// Outcomes come back in chain order whatever the completion order was.
    fn check_nodes(&self, nodes: &[SupplyChainNode], lines: &[DisclosureLine]) -> Vec<NodeOutcome> {
        let check = |n: &SupplyChainNode| self.check_party(&n.domain, &n.seller_id, lines);

        let workers = self.config.max_concurrency.min(nodes.len());
        if workers <= 1 {
            return nodes.iter().map(check).collect();
        }
        match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
            Ok(pool) => pool.install(|| nodes.par_iter().map(check).collect()),
            Err(e) => {
                tracing::warn!(error = %e, "worker pool unavailable, checking nodes sequentially");
                nodes.iter().map(check).collect()
            }
        }
    }

    /// Disclosure check followed by registry check for one party.
    pub fn check_party(
        &self,
        domain: &str,
        seller_id: &str,
        lines: &[DisclosureLine],
    ) -> NodeOutcome {
        tracing::debug!(%domain, %seller_id, "checking party");
        let mut diagnostics = vec![LogEntry::success(format!(
            "Validating ads.txt for ASI={}, SID={}...",
            domain, seller_id
        ))];
        let disclosure_verdict = Verdict::from_passed(matches(domain, seller_id, lines));
        diagnostics.push(match disclosure_verdict {
            Verdict::Passed => LogEntry::success(format!(
                "Passed: SID {} found in app-ads.txt for ASI {}.",
                seller_id, domain
            )),
            Verdict::Failed => LogEntry::error(format!(
                "Failed: SID {} not found under ASI {} in app-ads.txt.",
                seller_id, domain
            )),
        });

        let registry = RegistryLookup::new(&self.fetcher).lookup(domain, seller_id);
        diagnostics.extend(registry.diagnostics);

        NodeOutcome {
            row: ValidationRow {
                domain: domain.to_string(),
                seller_id: seller_id.to_string(),
                registry_name: registry.name,
                registry_domain: registry.domain,
                disclosure_verdict,
                registry_verdict: registry.verdict,
            },
            diagnostics,
        }
    }
}
