//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{RouteOutcome, RoutingStats};

/// Prints per-outcome routing counts to the log.
///
/// Outcomes with a zero count are omitted.
pub fn print_route_statistics(stats: &RoutingStats) {
    let total = stats.total();
    if total == 0 {
        info!("No URLs routed");
        return;
    }

    info!(
        "Routed {} URL{} ({} routable, {} not routable)",
        total,
        if total == 1 { "" } else { "s" },
        stats.total_routable(),
        stats.total_not_routable()
    );
    for outcome in RouteOutcome::iter() {
        let count = stats.get_count(outcome);
        if count > 0 {
            info!("   {}: {}", outcome.as_str(), count);
        }
    }
}
