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


//! Fan-out of one set of hooks to several monitors.
//!
//! Monitors are called in insertion order. For `search_command`, the first
//! monitor asking to terminate wins and later monitors are not consulted.

use crate::{
    error::{ExchangeError, try_vec},
    monitor::exchange_monitor::{ExchangeMonitor, SearchCommand},
    stats::ExchangeStatistics,
    store::GroupStore,
};
use anticlust_model::index::ElementIndex;

#[derive(Default)]
pub struct CompositeExchangeMonitor<'a> {
    monitors: Vec<Box<dyn ExchangeMonitor + 'a>>,
}

impl std::fmt::Debug for CompositeExchangeMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeExchangeMonitor")
            .field("monitors", &self.monitors)
            .finish()
    }
}

impl<'a> CompositeExchangeMonitor<'a> {
    #[inline]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    #[inline]
    pub fn try_with_capacity(capacity: usize) -> Result<Self, ExchangeError> {
        Ok(Self {
            monitors: try_vec(capacity, "monitor list")?,
        })
    }

    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: ExchangeMonitor + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    #[inline]
    pub fn add_boxed_monitor(&mut self, monitor: Box<dyn ExchangeMonitor + 'a>) {
        self.monitors.push(monitor);
    }

    #[inline]
    pub fn add_boxed_monitors<I>(&mut self, monitors: I)
    where
        I: IntoIterator<Item = Box<dyn ExchangeMonitor + 'a>>,
    {
        self.monitors.extend(monitors);
    }

    #[inline]
    pub fn monitors(&self) -> &[Box<dyn ExchangeMonitor + 'a>] {
        &self.monitors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl ExchangeMonitor for CompositeExchangeMonitor<'_> {
    fn name(&self) -> &str {
        "CompositeExchangeMonitor"
    }

    fn on_start(&mut self, store: &GroupStore, objective: f64) {
        for m in &mut self.monitors {
            m.on_start(store, objective);
        }
    }

    fn on_end(&mut self, store: &GroupStore, objective: f64, statistics: &ExchangeStatistics) {
        for m in &mut self.monitors {
            m.on_end(store, objective, statistics);
        }
    }

    fn on_element(&mut self, element: ElementIndex, statistics: &ExchangeStatistics) {
        for m in &mut self.monitors {
            m.on_element(element, statistics);
        }
    }

    fn on_probe(
        &mut self,
        element: ElementIndex,
        partner: ElementIndex,
        value: f64,
        statistics: &ExchangeStatistics,
    ) {
        for m in &mut self.monitors {
            m.on_probe(element, partner, value, statistics);
        }
    }

    fn on_improvement(
        &mut self,
        element: ElementIndex,
        partner: ElementIndex,
        value: f64,
        statistics: &ExchangeStatistics,
    ) {
        for m in &mut self.monitors {
            m.on_improvement(element, partner, value, statistics);
        }
    }

    fn on_commit(
        &mut self,
        element: ElementIndex,
        partner: ElementIndex,
        objective: f64,
        statistics: &ExchangeStatistics,
    ) {
        for m in &mut self.monitors {
            m.on_commit(element, partner, objective, statistics);
        }
    }

    fn search_command(&mut self, statistics: &ExchangeStatistics) -> SearchCommand {
        for m in &mut self.monitors {
            match m.search_command(statistics) {
                SearchCommand::Continue => continue,
                SearchCommand::Terminate(msg) => return SearchCommand::Terminate(msg),
            }
        }
        SearchCommand::Continue
    }
}
