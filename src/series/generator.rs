//! Deterministic series generation
//!
//! Samples a `ValidRange` at a fixed step, starting at `min` and stopping
//! before `max`. Each value is derived from clock fields only:
//!
//! ```text
//! value = 180 * hour + minute
//! ```
//!
//! so the output is a pure function of the range and the step.

use chrono::{Duration, NaiveDateTime, Timelike};

use super::error::{SeriesError, SeriesResult};
use super::types::{TimeSeriesPoint, ValidRange};

/// Value assigned to a sample taken at `time`
pub fn sample_value(time: NaiveDateTime) -> f64 {
    (180 * time.hour() + time.minute()) as f64
}

/// Iterator over the samples of a range
#[derive(Debug, Clone)]
pub struct SeriesGenerator {
    current: NaiveDateTime,
    end: NaiveDateTime,
    step: Duration,
}

impl SeriesGenerator {
    /// Create a generator over `range` with a step in minutes
    pub fn new(range: ValidRange, step_minutes: i64) -> SeriesResult<Self> {
        if step_minutes <= 0 {
            return Err(SeriesError::InvalidStep(step_minutes));
        }

        Ok(Self {
            current: range.min,
            end: range.max,
            step: Duration::minutes(step_minutes),
        })
    }

    /// Number of samples the full run produces: ceil(span / step)
    pub fn expected_len(range: &ValidRange, step_minutes: i64) -> usize {
        if step_minutes <= 0 {
            return 0;
        }
        let span = range.duration().num_minutes();
        ((span + step_minutes - 1) / step_minutes) as usize
    }
}

impl Iterator for SeriesGenerator {
    type Item = TimeSeriesPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.end {
            return None;
        }

        let point = TimeSeriesPoint::new(self.current, sample_value(self.current));
        self.current += self.step;
        Some(point)
    }
}

/// Generate the full series for a range
pub fn generate_points(range: ValidRange, step_minutes: i64) -> SeriesResult<Vec<TimeSeriesPoint>> {
    let generator = SeriesGenerator::new(range, step_minutes)?;
    let mut points = Vec::with_capacity(SeriesGenerator::expected_len(&range, step_minutes));
    points.extend(generator);
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::types::{midnight, DEFAULT_STEP_MINUTES};

    #[test]
    fn test_default_scenario() {
        let points = generate_points(ValidRange::default(), DEFAULT_STEP_MINUTES).unwrap();

        assert_eq!(points.len(), 27 * 24 * 60 / 5);
        assert_eq!(points.len(), 7776);

        assert_eq!(points[0].time, midnight(2010, 5, 1));
        assert_eq!(points[0].value, 0.0);

        assert_eq!(points[1].time, midnight(2010, 5, 1) + Duration::minutes(5));
        assert_eq!(points[1].value, 5.0);

        let last = points.last().unwrap();
        assert_eq!(last.time, midnight(2010, 5, 28) - Duration::minutes(5));
        assert_eq!(last.value, (180 * 23 + 55) as f64);
    }

    #[test]
    fn test_values_follow_clock_fields() {
        let points = generate_points(ValidRange::default(), DEFAULT_STEP_MINUTES).unwrap();

        // 01:00 on the first day is the 12th sample
        assert_eq!(points[12].time, midnight(2010, 5, 1) + Duration::hours(1));
        assert_eq!(points[12].value, 180.0);

        // Values restart every day
        let next_day = &points[24 * 12];
        assert_eq!(next_day.time, midnight(2010, 5, 2));
        assert_eq!(next_day.value, 0.0);
    }

    #[test]
    fn test_series_is_time_ascending() {
        let points = generate_points(ValidRange::default(), DEFAULT_STEP_MINUTES).unwrap();
        assert!(points.windows(2).all(|w| w[0].time < w[1].time));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let first = generate_points(ValidRange::default(), DEFAULT_STEP_MINUTES).unwrap();
        let second = generate_points(ValidRange::default(), DEFAULT_STEP_MINUTES).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_length_rounds_up_for_partial_step() {
        let min = midnight(2010, 5, 1);
        let range = ValidRange::new(min, min + Duration::minutes(12)).unwrap();

        let points = generate_points(range, 5).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(SeriesGenerator::expected_len(&range, 5), 3);
        assert_eq!(points[2].time, min + Duration::minutes(10));
    }

    #[test]
    fn test_rejects_non_positive_step() {
        let range = ValidRange::default();
        assert_eq!(
            generate_points(range, 0).unwrap_err(),
            SeriesError::InvalidStep(0)
        );
        assert!(SeriesGenerator::new(range, -5).is_err());
    }
}
