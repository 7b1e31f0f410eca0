// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.


//! Time-based termination for exchange sweeps.
//!
//! `TimeLimitMonitor` stops a sweep once a wall-clock budget is spent. The
//! engine consults monitors once per visited element, and each element costs a
//! full scan of its partners, which dwarfs reading the clock. The default
//! therefore checks the clock on every element. A mask over the visited
//! element counter can thin the checks out for very cheap objectives: the
//! clock is read only when `elements_visited & mask == 0`. The start time is
//! reset on `on_start`, so each run is measured independently.

use crate::{
    monitor::exchange_monitor::{ExchangeMonitor, SearchCommand},
    stats::ExchangeStatistics,
    store::GroupStore,
};
use anticlust_model::index::ElementIndex;
use std::time::{Duration, Instant};

/// A wall-clock monitor that terminates a sweep after a fixed duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor {
    start_time: Instant,
    time_limit: Duration,
    clock_check_mask: u64,
}

impl TimeLimitMonitor {
    /// Checks the clock on every element.
    const DEFAULT_ELEMENT_CLOCK_CHECK_MASK: u64 = 0;

    /// Creates a new `TimeLimitMonitor` with the specified time limit.
    pub fn new(time_limit: Duration) -> Self {
        Self {
            start_time: Instant::now(),
            time_limit,
            clock_check_mask: Self::DEFAULT_ELEMENT_CLOCK_CHECK_MASK,
        }
    }

    /// Creates a new `TimeLimitMonitor` with a custom clock check mask.
    /// Lower mask values check more often; higher values check less often.
    pub fn with_mask(time_limit: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            time_limit,
            clock_check_mask,
        }
    }

    /// Returns the configured budget.
    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

impl ExchangeMonitor for TimeLimitMonitor {
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_start(&mut self, _store: &GroupStore, _objective: f64) {
        self.start_time = Instant::now();
    }

    fn on_end(&mut self, _store: &GroupStore, _objective: f64, _statistics: &ExchangeStatistics) {}

    fn on_element(&mut self, _element: ElementIndex, _statistics: &ExchangeStatistics) {}

    fn on_commit(
        &mut self,
        _element: ElementIndex,
        _partner: ElementIndex,
        _objective: f64,
        _statistics: &ExchangeStatistics,
    ) {
    }

    fn search_command(&mut self, statistics: &ExchangeStatistics) -> SearchCommand {
        if (statistics.elements_visited & self.clock_check_mask) == 0 {
            let elapsed = self.start_time.elapsed();
            if elapsed >= self.time_limit {
                return SearchCommand::Terminate("time limit exceeded".to_string());
            }
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_budget_terminates_on_first_check() {
        let mut monitor = TimeLimitMonitor::new(Duration::ZERO);
        let command = monitor.search_command(&ExchangeStatistics::default());
        assert_eq!(command, SearchCommand::Terminate("time limit exceeded".to_string()));
    }

    #[test]
    fn test_generous_budget_continues() {
        let mut monitor = TimeLimitMonitor::new(Duration::from_secs(3600));
        let command = monitor.search_command(&ExchangeStatistics::default());
        assert_eq!(command, SearchCommand::Continue);
    }

    #[test]
    fn test_default_checks_every_element() {
        let mut monitor = TimeLimitMonitor::new(Duration::ZERO);
        let mut stats = ExchangeStatistics::default();

        for visited in [1, 2, 3, 7, 255] {
            stats.elements_visited = visited;
            assert!(
                matches!(monitor.search_command(&stats), SearchCommand::Terminate(_)),
                "clock not checked after {visited} elements"
            );
        }
    }

    #[test]
    fn test_mask_skips_clock_between_checks() {
        let mut monitor = TimeLimitMonitor::with_mask(Duration::ZERO, 0b11);
        let mut stats = ExchangeStatistics::default();

        stats.elements_visited = 1;
        assert_eq!(monitor.search_command(&stats), SearchCommand::Continue);
        stats.elements_visited = 3;
        assert_eq!(monitor.search_command(&stats), SearchCommand::Continue);
        stats.elements_visited = 4;
        assert!(matches!(monitor.search_command(&stats), SearchCommand::Terminate(_)));
    }
}
