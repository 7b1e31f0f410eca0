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


//! Structured logging of exchange sweeps through `tracing`.
//!
//! Start and end of a run are reported at `info`, committed exchanges at
//! `debug`, and visited elements at `trace`. Probes are not logged; there
//! are `O(n^2)` of them per sweep.

use crate::{
    monitor::exchange_monitor::ExchangeMonitor, stats::ExchangeStatistics, store::GroupStore,
};
use anticlust_model::index::ElementIndex;
use tracing::{debug, info, trace};

/// A monitor that emits `tracing` events for a sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogExchangeMonitor;

impl LogExchangeMonitor {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl ExchangeMonitor for LogExchangeMonitor {
    fn name(&self) -> &str {
        "LogExchangeMonitor"
    }

    fn on_start(&mut self, store: &GroupStore, objective: f64) {
        info!(
            n = store.num_elements(),
            k = store.num_groups(),
            objective,
            "exchange sweep started"
        );
    }

    fn on_end(&mut self, _store: &GroupStore, objective: f64, statistics: &ExchangeStatistics) {
        info!(
            objective,
            elements = statistics.elements_visited,
            probes = statistics.probes,
            swaps = statistics.committed_swaps,
            elapsed = ?statistics.time_total,
            "exchange sweep finished"
        );
    }

    fn on_element(&mut self, element: ElementIndex, _statistics: &ExchangeStatistics) {
        trace!(element = element.get(), "scanning partners");
    }

    fn on_commit(
        &mut self,
        element: ElementIndex,
        partner: ElementIndex,
        objective: f64,
        statistics: &ExchangeStatistics,
    ) {
        debug!(
            element = element.get(),
            partner = partner.get(),
            objective,
            swaps = statistics.committed_swaps,
            "exchange committed"
        );
    }
}
