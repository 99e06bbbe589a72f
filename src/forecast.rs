//! Projects spending over the next week by fitting a straight line through a
//! view's amounts against the number of days since its first transaction.

use crate::ledger::Transaction;

/// The number of days projected past the last date of a view.
pub const FORECAST_DAYS: i64 = 7;

/// The projected amount for one day after the view's last date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastPoint {
    /// Days after the view's last date, starting at 1.
    pub day: i64,
    /// The value of the fitted line on that day, may be negative.
    pub amount: f64,
}

/// A least-squares trend line and its projection.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    /// The change in amount per day.
    pub slope: f64,
    /// The fitted amount on the view's first date.
    pub intercept: f64,
    /// One point per day for the next [FORECAST_DAYS] days.
    pub points: Vec<ForecastPoint>,
}

/// Why a forecast could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ForecastUnavailable {
    /// The view has no transactions.
    #[error("there are no transactions to fit a trend to")]
    EmptyView,

    /// Every transaction in the view is on the same day, so no trend exists.
    #[error("at least two different dates are needed to fit a trend")]
    SingleDate,

    /// The fitted line is not a finite number.
    #[error("the trend line could not be computed")]
    NumericalFailure,
}

/// Fit an ordinary least-squares line of amount on day offset over `view`
/// and evaluate it for each of the [FORECAST_DAYS] days after the latest date.
///
/// # Errors
/// Returns [ForecastUnavailable] if the view has fewer than two distinct
/// dates or the fit is not finite.
pub fn forecast(view: &[Transaction]) -> Result<Forecast, ForecastUnavailable> {
    let first_date = view
        .iter()
        .map(|transaction| transaction.date)
        .min()
        .ok_or(ForecastUnavailable::EmptyView)?;

    let samples: Vec<(f64, f64)> = view
        .iter()
        .map(|transaction| {
            let offset = (transaction.date - first_date).whole_days();
            (offset as f64, transaction.amount)
        })
        .collect();

    let max_offset = samples
        .iter()
        .map(|(offset, _)| *offset)
        .fold(0.0, f64::max);

    if max_offset == 0.0 {
        return Err(ForecastUnavailable::SingleDate);
    }

    let (slope, intercept) = fit_line(&samples).ok_or(ForecastUnavailable::NumericalFailure)?;

    let points = (1..=FORECAST_DAYS)
        .map(|day| ForecastPoint {
            day,
            amount: intercept + slope * (max_offset + day as f64),
        })
        .collect();

    Ok(Forecast {
        slope,
        intercept,
        points,
    })
}

/// Returns `(slope, intercept)` of the least-squares line through `samples`,
/// or `None` if the line is undefined.
fn fit_line(samples: &[(f64, f64)]) -> Option<(f64, f64)> {
    let count = samples.len() as f64;
    let mean_x = samples.iter().map(|(x, _)| x).sum::<f64>() / count;
    let mean_y = samples.iter().map(|(_, y)| y).sum::<f64>() / count;

    let (sum_xy, sum_xx) = samples
        .iter()
        .fold((0.0, 0.0), |(sum_xy, sum_xx), (x, y)| {
            let dx = x - mean_x;
            (sum_xy + dx * (y - mean_y), sum_xx + dx * dx)
        });

    if sum_xx == 0.0 {
        return None;
    }

    let slope = sum_xy / sum_xx;
    let intercept = mean_y - slope * mean_x;

    if slope.is_finite() && intercept.is_finite() {
        Some((slope, intercept))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use time::{Date, macros::date};

    use crate::ledger::Transaction;

    use super::{ForecastPoint, ForecastUnavailable, forecast};

    fn transaction(amount: f64, date: Date) -> Transaction {
        Transaction {
            amount,
            category: "Outros".to_owned(),
            date,
            description: String::new(),
        }
    }

    #[test]
    fn continues_a_perfect_linear_trend() {
        let view = vec![
            transaction(10.0, date!(2025 - 01 - 01)),
            transaction(20.0, date!(2025 - 01 - 02)),
            transaction(30.0, date!(2025 - 01 - 03)),
        ];

        let forecast = forecast(&view).unwrap();

        let want: Vec<ForecastPoint> = [40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0]
            .into_iter()
            .zip(1..)
            .map(|(amount, day)| ForecastPoint { day, amount })
            .collect();
        assert_eq!(forecast.points, want);
        assert_eq!(forecast.slope, 10.0);
        assert_eq!(forecast.intercept, 10.0);
    }

    #[test]
    fn view_order_does_not_matter() {
        let view = vec![
            transaction(30.0, date!(2025 - 01 - 03)),
            transaction(10.0, date!(2025 - 01 - 01)),
            transaction(20.0, date!(2025 - 01 - 02)),
        ];

        let forecast = forecast(&view).unwrap();

        assert_eq!(forecast.points[0].amount, 40.0);
        assert_eq!(forecast.points[6].amount, 100.0);
    }

    #[test]
    fn empty_view_is_unavailable() {
        assert_eq!(forecast(&[]), Err(ForecastUnavailable::EmptyView));
    }

    #[test]
    fn single_date_is_unavailable() {
        let view = vec![
            transaction(10.0, date!(2025 - 01 - 01)),
            transaction(25.0, date!(2025 - 01 - 01)),
        ];

        assert_eq!(forecast(&view), Err(ForecastUnavailable::SingleDate));
    }

    #[test]
    fn predictions_are_not_clamped() {
        let view = vec![
            transaction(20.0, date!(2025 - 01 - 01)),
            transaction(10.0, date!(2025 - 01 - 02)),
        ];

        let forecast = forecast(&view).unwrap();

        assert_eq!(forecast.points.len(), 7);
        assert_eq!(forecast.points[0].amount, 0.0);
        assert_eq!(forecast.points[6].amount, -60.0);
    }

    #[test]
    fn fits_through_gaps_between_dates() {
        let view = vec![
            transaction(5.0, date!(2025 - 01 - 01)),
            transaction(5.0, date!(2025 - 01 - 11)),
        ];

        let forecast = forecast(&view).unwrap();

        assert_eq!(forecast.slope, 0.0);
        assert!(forecast.points.iter().all(|point| point.amount == 5.0));
    }
}
