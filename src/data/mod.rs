//! Data module - CSV loading, cleaning, filtering and writing

mod cleaner;
mod filter;
mod loader;
mod writer;

pub use cleaner::{extract_leading_int, is_missing, parse_date_added, CleanerError, DataCleaner};
pub use filter::TypeFilter;
pub use loader::{DataLoader, LoaderError};
pub use writer::{DataWriter, WriterError};

/// Placeholder written into non-essential columns that are missing.
pub const UNKNOWN: &str = "Unknown";

pub const TYPE: &str = "type";
pub const DIRECTOR: &str = "director";
pub const CAST: &str = "cast";
pub const COUNTRY: &str = "country";
pub const DATE_ADDED: &str = "date_added";
pub const RELEASE_YEAR: &str = "release_year";
pub const RATING: &str = "rating";
pub const DURATION: &str = "duration";
pub const LISTED_IN: &str = "listed_in";
pub const YEAR_ADDED: &str = "year_added";

pub const MOVIE: &str = "Movie";
pub const TV_SHOW: &str = "TV Show";

/// Columns every source file must carry.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    TYPE,
    DIRECTOR,
    CAST,
    COUNTRY,
    DATE_ADDED,
    RELEASE_YEAR,
    RATING,
    DURATION,
    LISTED_IN,
];

/// Columns filled with [`UNKNOWN`] instead of dropping the row.
pub const SENTINEL_COLUMNS: [&str; 4] = [DIRECTOR, CAST, COUNTRY, DATE_ADDED];

/// Rows missing any of these are removed.
pub const ESSENTIAL_COLUMNS: [&str; 2] = [RATING, DURATION];
