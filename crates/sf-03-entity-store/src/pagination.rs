//! Pagination calculator.

use std::num::NonZeroU32;

/// Number of pages needed to show `total_count` records.
///
/// Always at least 1, so an empty list still renders one page.
#[must_use]
pub fn page_count(total_count: u64, page_size: NonZeroU32) -> u64 {
    if total_count == 0 {
        return 1;
    }
    total_count.div_ceil(u64::from(page_size.get()))
}
