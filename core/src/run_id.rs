use ulid::Ulid;

pub fn run_id_ulid() -> String {
    format!("r_{}", Ulid::new())
}

/// True for identifiers produced by [`run_id_ulid`].
pub fn is_run_id(s: &str) -> bool {
    s.strip_prefix("r_")
        .map(|rest| Ulid::from_string(rest).is_ok())
        .unwrap_or(false)
}
