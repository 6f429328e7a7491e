//! The two independent ways of enumerating an artist's mixes.

mod category;
mod dates;
mod explorer;
mod overrides;
pub mod pagination;

pub use category::{parse_mix_stubs, CategoryStrategy, MixOutcome, MixStub};
pub use dates::{date_from_title, parenthesized_date};
pub use explorer::{parse_results, result_count, ExplorerStrategy, PAGE_SIZE};
pub use overrides::{PaginationOverride, PaginationOverrides};

use crate::error::DiggerError;
use crate::models::Mix;

/// Caps for one discovery run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryLimits {
    /// Category listing pages to walk.
    pub max_pages: usize,
    /// Explorer results to collect.
    pub max_items: usize,
    /// Set when the caller chose `max_items`; lifts the large-catalog cap.
    pub explicit_item_cap: bool,
}

pub trait DiscoveryStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Enumerate the artist's mixes in source order. An `Err` means the
    /// strategy produced nothing usable.
    fn discover(&self, artist: &str, limits: &DiscoveryLimits) -> Result<Vec<Mix>, DiggerError>;
}
