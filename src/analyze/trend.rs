use crate::error::Result;
use crate::types::series::{mean, MetricSeries};

/// Points in each of the recent and prior windows.
pub const TREND_WINDOW: usize = 6;

/// Growth of the last six points over the six before them.
///
/// Returns `0.0` with fewer than twelve points. A zero prior average yields
/// `1.0` when the recent average is positive and `0.0` otherwise.
pub fn trend(name: &str, series: &MetricSeries) -> Result<f64> {
    let cleaned = series.clean();
    cleaned.validate_keys(name)?;

    let values = cleaned.values();
    let len = values.len();
    if len < TREND_WINDOW * 2 {
        return Ok(0.0);
    }

    let prior = mean(&values[len - TREND_WINDOW * 2..len - TREND_WINDOW]);
    let recent = mean(&values[len - TREND_WINDOW..]);

    if prior == 0.0 {
        return Ok(if recent > 0.0 { 1.0 } else { 0.0 });
    }
    Ok((recent - prior) / prior)
}
