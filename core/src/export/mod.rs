pub mod csv_table;

pub use csv_table::{render_validation_csv, CSV_HEADER};
