pub mod analysis;
pub mod budgets;
pub mod categories;
pub mod expenses;
pub mod health;
pub mod income;
pub mod loan;
pub mod project_records;
pub mod projects;

use compute::aggregate::RecordFilter;
use sea_orm::{ColumnTrait, Condition};

use crate::helpers::errors::{compute_error, ApiError};
use crate::schemas::DateRangeQuery;

/// The request's record filter, rejected with `INVALID_INPUT` when the
/// window is reversed.
pub(crate) fn record_filter(query: &DateRangeQuery) -> Result<RecordFilter, ApiError> {
    let filter = query.filter();
    filter.validate().map_err(compute_error)?;
    Ok(filter)
}

/// `filter` as a query condition on any table with a date column and an
/// `is_planned` flag. Both date bounds are inclusive.
pub(crate) fn period_condition<C: ColumnTrait>(
    filter: &RecordFilter,
    date: C,
    is_planned: C,
) -> Condition {
    Condition::all()
        .add_option(filter.start_date.map(|d| date.gte(d)))
        .add_option(filter.end_date.map(|d| date.lte(d)))
        .add_option(filter.is_planned.map(|planned| is_planned.eq(planned)))
}
