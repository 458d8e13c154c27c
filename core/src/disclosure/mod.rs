//! Publisher disclosure file (`app-ads.txt`) handling.

pub mod matcher;
pub mod normalize;

pub use matcher::matches;
pub use normalize::{normalize, DisclosureLine};
