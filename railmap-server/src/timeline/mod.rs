//! Year-based filtering of rail and station features.
//!
//! The N05 survey records when each line section or station entered and left
//! service in `N05_005b` and `N05_005e`. A feature is active for a year when
//! that year falls inside those bounds; placeholders such as `999` or `9999`
//! leave a bound open.

mod filter;
mod lines;
mod year;

pub use filter::{filter_by_year, is_active};
pub use lines::{CrossFilter, LineMembership, active_line_names};
pub use year::{is_sentinel, parse_year_field};

/// Property holding the first year in service.
pub const START_YEAR_KEY: &str = "N05_005b";

/// Property holding the last year in service.
pub const END_YEAR_KEY: &str = "N05_005e";

/// Property holding the line name, shared by rail sections and stations.
pub const LINE_NAME_KEY: &str = "N05_002";

/// Year value meaning "no filter requested".
pub const NO_FILTER: i32 = 0;
