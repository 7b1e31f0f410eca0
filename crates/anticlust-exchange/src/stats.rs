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


//! Statistics reporting for exchange sweeps.
//!
//! `ExchangeStatistics` counts what the sweep did: how many elements it visited,
//! how many candidate exchanges it probed, how many of those beat the best
//! candidate seen so far for their element, and how many exchanges it finally
//! committed. Counters saturate instead of overflowing so they are safe to
//! bump from the innermost loop. Monitors receive the statistics on every hook
//! and the outcome carries the final snapshot.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExchangeStatistics {
    /// Number of elements the sweep has visited.
    pub elements_visited: u64,

    /// Number of candidate exchanges probed.
    pub probes: u64,

    /// Number of probes that became the best candidate for their element.
    pub improving_probes: u64,

    /// Number of exchanges committed.
    pub committed_swaps: u64,

    /// Total time taken by the sweep.
    pub time_total: Duration,
}

impl Default for ExchangeStatistics {
    fn default() -> Self {
        Self {
            elements_visited: 0,
            probes: 0,
            improving_probes: 0,
            committed_swaps: 0,
            time_total: Duration::ZERO,
        }
    }
}

impl ExchangeStatistics {
    /// Called when the sweep moves on to a new element.
    #[inline]
    pub fn on_element(&mut self) {
        self.elements_visited = self.elements_visited.saturating_add(1);
    }

    /// Called for every probed exchange.
    #[inline]
    pub fn on_probe(&mut self) {
        self.probes = self.probes.saturating_add(1);
    }

    /// Called when a probe becomes the best candidate for the current element.
    #[inline]
    pub fn on_improving_probe(&mut self) {
        self.improving_probes = self.improving_probes.saturating_add(1);
    }

    /// Called when an exchange is committed.
    #[inline]
    pub fn on_commit(&mut self) {
        self.committed_swaps = self.committed_swaps.saturating_add(1);
    }

    /// Sets the total time taken by the sweep.
    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// Number of visited elements for which no exchange was committed.
    ///
    /// Such an element may still have changed group earlier or later as the
    /// partner of another element's exchange.
    #[inline]
    pub fn elements_without_commit(&self) -> u64 {
        self.elements_visited.saturating_sub(self.committed_swaps)
    }
}

impl std::fmt::Display for ExchangeStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Anticlust-Exchange Statistics:")?;
        writeln!(f, "   Elements Visited:    {}", self.elements_visited)?;
        writeln!(f, "   Probes:              {}", self.probes)?;
        writeln!(f, "   Improving Probes:    {}", self.improving_probes)?;
        writeln!(f, "   Committed Swaps:     {}", self.committed_swaps)?;
        writeln!(f, "   Without Commit:      {}", self.elements_without_commit())?;
        writeln!(f, "   Total Time:          {:?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let stats = ExchangeStatistics::default();
        assert_eq!(stats.elements_visited, 0);
        assert_eq!(stats.probes, 0);
        assert_eq!(stats.improving_probes, 0);
        assert_eq!(stats.committed_swaps, 0);
        assert_eq!(stats.time_total, Duration::ZERO);
    }

    #[test]
    fn test_counters_accumulate() {
        let mut stats = ExchangeStatistics::default();
        for _ in 0..3 {
            stats.on_element();
        }
        stats.on_probe();
        stats.on_probe();
        stats.on_improving_probe();
        stats.on_commit();

        assert_eq!(stats.elements_visited, 3);
        assert_eq!(stats.probes, 2);
        assert_eq!(stats.improving_probes, 1);
        assert_eq!(stats.committed_swaps, 1);
        assert_eq!(stats.elements_without_commit(), 2);
    }

    #[test]
    fn test_counters_saturate() {
        let mut stats = ExchangeStatistics {
            probes: u64::MAX,
            ..Default::default()
        };
        stats.on_probe();
        assert_eq!(stats.probes, u64::MAX);
    }

    #[test]
    fn test_display_lists_counters() {
        let mut stats = ExchangeStatistics::default();
        stats.on_element();
        stats.on_commit();
        let text = format!("{}", stats);

        assert!(text.starts_with("Anticlust-Exchange Statistics:"));
        assert!(text.contains("Elements Visited:    1"));
        assert!(text.contains("Committed Swaps:     1"));
        assert!(text.contains("Without Commit:      0"));
    }
}
