use clap::{Parser, ValueEnum};
use schain_core::chain::ResellerIdentity;
use schain_core::config::ValidatorConfig;
use schain_core::export::render_validation_csv;
use schain_core::fetch::HttpFetcher;
use schain_core::report::{RunStatus, Severity, ValidationReport};
use schain_core::validator::{ChainValidator, ValidationRequest};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "schain_validator",
    version,
    about = "Check a supply chain against app-ads.txt and each seller's sellers.json"
)]
struct Cli {
    /// Chain description file (JSON), or `-` for stdin
    #[arg(long)]
    schain: String,
    #[arg(long)]
    ads_txt_url: String,
    #[arg(long, alias = "pubmatic-id")]
    reseller_id: Option<String>,
    /// Defaults to the configured reseller domain
    #[arg(long)]
    reseller_domain: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(report) if report.status == RunStatus::Passed => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(e) => {
            eprintln!("schain_validator: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ValidationReport> {
    let config = ValidatorConfig::load(cli.config.as_deref())?;
    let schain = read_schain(&cli.schain)?;

    let reseller_domain = cli
        .reseller_domain
        .clone()
        .unwrap_or_else(|| config.reseller_domain.clone());
    let request = ValidationRequest {
        schain,
        ads_txt_url: cli.ads_txt_url.trim().to_string(),
        reseller: cli
            .reseller_id
            .as_deref()
            .and_then(|id| ResellerIdentity::from_fields(&reseller_domain, id)),
    };

    let fetcher = HttpFetcher::from_config(&config)?;
    let report = ChainValidator::new(fetcher, config).validate_request(&request);
    print_report(&report, cli.format)?;
    Ok(report)
}

fn read_schain(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read_to_string(source)
        .map_err(|e| anyhow::anyhow!("cannot read chain file {}: {}", source, e))
}

fn print_report(report: &ValidationReport, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => print!("{}", render_validation_csv(&report.table)?),
        OutputFormat::Text => {
            for l in &report.logs {
                let tag = match l.severity {
                    Severity::Success => "ok ",
                    Severity::Error => "ERR",
                };
                println!("{} {}", tag, l.message);
            }
            println!();
            println!("run {} status={:?}", report.run_id, report.status);
            for r in &report.table {
                println!(
                    "{}\t{}\t{}\t{}\tads.txt={}\tsellers.json={}",
                    r.domain,
                    r.seller_id,
                    r.registry_name,
                    r.registry_domain,
                    r.disclosure_verdict.as_str(),
                    r.registry_verdict.as_str()
                );
            }
        }
    }
    Ok(())
}
