//! Aggregate business metrics over the record store.
//!
//! Simple reductions for the dashboard overview: quote counts, revenue,
//! margins, and project progress. All figures keep full precision; the
//! display layer decides how many decimal places to show.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Project, ProjectStatus, Quote, QuoteStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessMetrics {
    pub total_quotes: usize,
    pub accepted_quotes: usize,
    /// Accepted quotes as a percentage of all quotes; zero when there are
    /// no quotes.
    pub conversion_rate_percent: Decimal,
    /// Sum of every quote's total, regardless of status.
    pub total_revenue: Decimal,
    /// Sum of quoted material costs, where recorded.
    pub total_material_cost: Decimal,
    /// Mean of recorded profit margins across all quotes; zero when there
    /// are no quotes.
    pub avg_profit_margin_percent: Decimal,
    pub open_projects: usize,
    pub completed_projects: usize,
}

impl BusinessMetrics {
    /// Computes metrics from in-memory record slices.
    ///
    /// Missing per-quote figures (material cost, margin) count as zero
    /// rather than excluding the quote, matching how the original
    /// dashboard summed partially filled rows.
    pub fn from_records(quotes: &[Quote], projects: &[Project]) -> Self {
        let total_quotes = quotes.len();
        let accepted_quotes = quotes
            .iter()
            .filter(|q| q.status == QuoteStatus::Accepted)
            .count();

        let total_revenue = quotes.iter().map(|q| q.total_quote).sum();
        let total_material_cost = quotes
            .iter()
            .filter_map(|q| q.material_cost)
            .sum();

        let margin_sum: Decimal = quotes
            .iter()
            .filter_map(|q| q.profit_margin_percent)
            .sum();

        let quote_count = Decimal::from(total_quotes as u64);
        let (conversion_rate_percent, avg_profit_margin_percent) = if total_quotes > 0 {
            (
                Decimal::from(accepted_quotes as u64) / quote_count * Decimal::ONE_HUNDRED,
                margin_sum / quote_count,
            )
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        };

        let completed_projects = projects
            .iter()
            .filter(|p| p.status == ProjectStatus::Completed)
            .count();
        let open_projects = projects.len() - completed_projects;

        Self {
            total_quotes,
            accepted_quotes,
            conversion_rate_percent,
            total_revenue,
            total_material_cost,
            avg_profit_margin_percent,
            open_projects,
            completed_projects,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn quote(id: &str, status: QuoteStatus, total: Decimal) -> Quote {
        Quote {
            id: id.to_string(),
            lead_id: None,
            customer_name: "Test Customer".to_string(),
            valid_until: None,
            status,
            roof_area_sf: None,
            roof_area_squares: None,
            material_type: None,
            material_grade: None,
            labor_rate_per_sq: None,
            material_cost: None,
            labor_cost: None,
            disposal_cost: None,
            total_quote: total,
            profit_margin_percent: None,
            deposit_required: None,
            notes: None,
        }
    }

    fn project(id: &str, status: ProjectStatus) -> Project {
        Project {
            id: id.to_string(),
            lead_id: None,
            customer_name: "Test Customer".to_string(),
            project_address: None,
            status,
            date_sold: None,
            sale_amount: dec!(20000),
            deposit_amount: None,
            deposit_date: None,
            scheduled_start: None,
            scheduled_complete: None,
            project_manager: None,
            notes: None,
        }
    }

    #[test]
    fn empty_store_yields_all_zero_metrics() {
        let metrics = BusinessMetrics::from_records(&[], &[]);

        assert_eq!(metrics.total_quotes, 0);
        assert_eq!(metrics.conversion_rate_percent, Decimal::ZERO);
        assert_eq!(metrics.total_revenue, Decimal::ZERO);
        assert_eq!(metrics.avg_profit_margin_percent, Decimal::ZERO);
        assert_eq!(metrics.open_projects, 0);
    }

    #[test]
    fn revenue_sums_every_quote_regardless_of_status() {
        let quotes = vec![
            quote("QUOTE_0001", QuoteStatus::Accepted, dec!(22000)),
            quote("QUOTE_0002", QuoteStatus::Pending, dec!(18000)),
            quote("QUOTE_0003", QuoteStatus::Declined, dec!(30000)),
        ];

        let metrics = BusinessMetrics::from_records(&quotes, &[]);

        assert_eq!(metrics.total_revenue, dec!(70000));
    }

    #[test]
    fn conversion_rate_is_accepted_over_total() {
        let quotes = vec![
            quote("QUOTE_0001", QuoteStatus::Accepted, dec!(22000)),
            quote("QUOTE_0002", QuoteStatus::Pending, dec!(18000)),
            quote("QUOTE_0003", QuoteStatus::Declined, dec!(30000)),
            quote("QUOTE_0004", QuoteStatus::Accepted, dec!(25000)),
        ];

        let metrics = BusinessMetrics::from_records(&quotes, &[]);

        assert_eq!(metrics.accepted_quotes, 2);
        assert_eq!(metrics.conversion_rate_percent, dec!(50));
    }

    #[test]
    fn margin_average_spreads_over_all_quotes() {
        let mut q1 = quote("QUOTE_0001", QuoteStatus::Accepted, dec!(22000));
        q1.profit_margin_percent = Some(dec!(30));
        let mut q2 = quote("QUOTE_0002", QuoteStatus::Pending, dec!(18000));
        q2.profit_margin_percent = Some(dec!(20));
        // Third quote has no recorded margin; counts as zero in the mean.
        let q3 = quote("QUOTE_0003", QuoteStatus::Pending, dec!(15000));

        let metrics = BusinessMetrics::from_records(&[q1, q2, q3], &[]);

        assert_eq!(
            metrics.avg_profit_margin_percent.round_dp(2),
            dec!(16.67)
        );
    }

    #[test]
    fn material_cost_sums_recorded_values() {
        let mut q1 = quote("QUOTE_0001", QuoteStatus::Accepted, dec!(22000));
        q1.material_cost = Some(dec!(8000));
        let mut q2 = quote("QUOTE_0002", QuoteStatus::Pending, dec!(18000));
        q2.material_cost = Some(dec!(6500));

        let metrics = BusinessMetrics::from_records(&[q1, q2], &[]);

        assert_eq!(metrics.total_material_cost, dec!(14500));
    }

    #[test]
    fn projects_split_into_open_and_completed() {
        let projects = vec![
            project("PROJ_0001", ProjectStatus::Scheduled),
            project("PROJ_0002", ProjectStatus::InProgress),
            project("PROJ_0003", ProjectStatus::Completed),
        ];

        let metrics = BusinessMetrics::from_records(&[], &projects);

        assert_eq!(metrics.open_projects, 2);
        assert_eq!(metrics.completed_projects, 1);
    }
}
