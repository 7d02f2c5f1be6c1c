//! Height-indexed step-function schedules.

use crate::error::{ParamsError, ParamsResult};

/// Sentinel threshold for a catch-all final breakpoint.
pub const HEIGHT_NEVER: u32 = u32::MAX;

/// An ordered sequence of `(threshold_height, value)` breakpoints, queried by
/// "first breakpoint at or above the height".
///
/// One abstraction serves subsidies, collateral tiers, founder-reward shares
/// and required-confirmation counts; by convention the final breakpoint uses
/// [`HEIGHT_NEVER`] so every height resolves.
#[derive(Debug, Clone)]
pub struct HeightSchedule<T> {
    entries: Vec<(u32, T)>,
}

impl<T: Copy> HeightSchedule<T> {
    /// Build a schedule from ascending breakpoints.
    ///
    /// Fails with a configuration error if the sequence is empty or not
    /// strictly ascending.
    pub fn new(entries: Vec<(u32, T)>) -> ParamsResult<HeightSchedule<T>> {
        if entries.is_empty() {
            return Err(ParamsError::config("schedule", "breakpoint list is empty"));
        }
        if !entries.windows(2).all(|pair| pair[0].0 < pair[1].0) {
            return Err(ParamsError::config(
                "schedule",
                "breakpoint thresholds must be strictly ascending",
            ));
        }
        Ok(HeightSchedule { entries })
    }

    /// Value of the earliest breakpoint whose threshold is `>= height`.
    /// Heights beyond the last breakpoint resolve to the final value.
    pub fn value_at(&self, height: u32) -> T {
        let idx = self.entries.partition_point(|(threshold, _)| *threshold < height);
        match self.entries.get(idx) {
            Some((_, value)) => *value,
            None => self.entries[self.entries.len() - 1].1,
        }
    }

    pub fn entries(&self) -> &[(u32, T)] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn collateral_tiers() -> HeightSchedule<i64> {
        HeightSchedule::new(vec![
            (88_720, 110_000),
            (132_720, 150_000),
            (176_720, 190_000),
            (HEIGHT_NEVER, 350_000),
        ])
        .unwrap()
    }

    #[test]
    fn earliest_qualifying_breakpoint_wins() {
        let tiers = collateral_tiers();
        assert_eq!(tiers.value_at(0), 110_000);
        assert_eq!(tiers.value_at(88_720), 110_000);
        assert_eq!(tiers.value_at(88_721), 150_000);
        assert_eq!(tiers.value_at(132_720), 150_000);
        assert_eq!(tiers.value_at(200_000), 350_000);
        assert_eq!(tiers.value_at(HEIGHT_NEVER), 350_000);
    }

    #[test]
    fn empty_schedule_is_rejected() {
        let err = HeightSchedule::<i64>::new(vec![]).unwrap_err();
        assert!(matches!(err, ParamsError::Config { field: "schedule", .. }));
    }

    #[test]
    fn unsorted_schedule_is_rejected() {
        let err = HeightSchedule::new(vec![(100, 1), (50, 2)]).unwrap_err();
        assert!(matches!(err, ParamsError::Config { field: "schedule", .. }));
    }

    #[test]
    fn duplicate_thresholds_are_rejected() {
        let err = HeightSchedule::new(vec![(100, 1), (100, 2)]).unwrap_err();
        assert!(matches!(err, ParamsError::Config { .. }));
    }

    proptest! {
        #[test]
        fn lookup_matches_linear_scan(height in 0u32..=1_000_000) {
            let tiers = collateral_tiers();
            let expected = tiers
                .entries()
                .iter()
                .find(|(threshold, _)| *threshold >= height)
                .map(|(_, value)| *value)
                .unwrap_or(350_000);
            prop_assert_eq!(tiers.value_at(height), expected);
        }
    }
}
