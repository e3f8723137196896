//! Dashboard statistics.

use crate::error::ChurchResult;
use crate::event::count_upcoming;
use crate::finance::all_amounts;
use crate::member::model::Member;
use crate::resource::Resource;
use ecclesia_db::DbPool;
use rust_decimal::Decimal;
use serde::Serialize;

/// Headline numbers shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_members: usize,
    pub active_members: usize,
    pub total_revenue: Decimal,
    pub upcoming_events: i64,
}

impl DashboardStats {
    /// Fold the three reads into the statistics.
    pub fn compute(members: &[Member], amounts: &[Decimal], upcoming_events: i64) -> Self {
        Self {
            total_members: members.len(),
            active_members: members.iter().filter(|m| m.is_active()).count(),
            total_revenue: amounts.iter().copied().sum(),
            upcoming_events,
        }
    }
}

/// Issue the member, amount and upcoming-event reads concurrently.
pub async fn fetch_stats(pool: &DbPool) -> ChurchResult<DashboardStats> {
    let (members, amounts, upcoming) = tokio::try_join!(
        Member::list(pool, Member::select()),
        all_amounts(pool),
        count_upcoming(pool),
    )?;

    Ok(DashboardStats::compute(&members, &amounts, upcoming))
}

/// Statistics for display. A failed read is logged and every figure stays
/// zero.
pub async fn load_stats(pool: &DbPool) -> DashboardStats {
    match fetch_stats(pool).await {
        Ok(stats) => {
            tracing::debug!(
                members = stats.total_members,
                upcoming = stats.upcoming_events,
                "dashboard stats loaded"
            );
            stats
        }
        Err(e) => {
            tracing::error!(error = %e, "error fetching dashboard stats");
            DashboardStats::default()
        }
    }
}
