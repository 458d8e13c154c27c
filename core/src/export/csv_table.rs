use crate::error::CoreResult;
use crate::report::ValidationRow;

pub const CSV_HEADER: [&str; 6] = [
    "ASI (Domain)",
    "SID",
    "Seller Name",
    "Seller Domain",
    "Ads.txt Status",
    "Sellers.json Status",
];

/// Renders rows in the order given, `\n` line endings.
pub fn render_validation_csv(rows: &[ValidationRow]) -> CoreResult<String> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(vec![]);
    wtr.write_record(CSV_HEADER)?;
    for r in rows {
        wtr.write_record([
            r.domain.as_str(),
            r.seller_id.as_str(),
            r.registry_name.as_str(),
            r.registry_domain.as_str(),
            r.disclosure_verdict.as_str(),
            r.registry_verdict.as_str(),
        ])?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
