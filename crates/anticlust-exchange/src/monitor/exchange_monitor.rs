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


//! Monitoring interface for exchange sweeps.
//!
//! This module defines callbacks for observing a sweep: its start and end, each
//! visited element, each probed exchange, each new best candidate, and each
//! committed exchange. Implementations can stream logs, collect traces for
//! tests, or stop the sweep early by returning `SearchCommand::Terminate`
//! from `search_command`, which the engine consults once per visited element.
//! The per-probe hooks sit in the innermost loop and default to doing nothing.

use crate::{stats::ExchangeStatistics, store::GroupStore};
use anticlust_model::index::ElementIndex;

/// Instruction a monitor returns to the engine.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// A monitor for the exchange method.
pub trait ExchangeMonitor {
    /// Returns the name of the monitor.
    fn name(&self) -> &str;

    /// Called before the first element is visited.
    fn on_start(&mut self, store: &GroupStore, objective: f64);

    /// Called after the sweep has stopped, with the final assignment.
    fn on_end(&mut self, store: &GroupStore, objective: f64, statistics: &ExchangeStatistics);

    /// Called when the sweep starts scanning partners for `element`.
    fn on_element(&mut self, element: ElementIndex, statistics: &ExchangeStatistics);

    /// Called after every probed exchange of `element` and `partner`.
    #[inline]
    fn on_probe(
        &mut self,
        _element: ElementIndex,
        _partner: ElementIndex,
        _value: f64,
        _statistics: &ExchangeStatistics,
    ) {
    }

    /// Called when a probe becomes the best candidate for `element`.
    #[inline]
    fn on_improvement(
        &mut self,
        _element: ElementIndex,
        _partner: ElementIndex,
        _value: f64,
        _statistics: &ExchangeStatistics,
    ) {
    }

    /// Called after `element` and `partner` have been exchanged for good.
    fn on_commit(
        &mut self,
        element: ElementIndex,
        partner: ElementIndex,
        objective: f64,
        statistics: &ExchangeStatistics,
    );

    /// Determines whether the sweep continues with the next element.
    fn search_command(&mut self, _statistics: &ExchangeStatistics) -> SearchCommand {
        SearchCommand::Continue
    }
}

impl<M> ExchangeMonitor for &mut M
where
    M: ExchangeMonitor + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn on_start(&mut self, store: &GroupStore, objective: f64) {
        (**self).on_start(store, objective);
    }

    #[inline]
    fn on_end(&mut self, store: &GroupStore, objective: f64, statistics: &ExchangeStatistics) {
        (**self).on_end(store, objective, statistics);
    }

    #[inline]
    fn on_element(&mut self, element: ElementIndex, statistics: &ExchangeStatistics) {
        (**self).on_element(element, statistics);
    }

    #[inline]
    fn on_probe(
        &mut self,
        element: ElementIndex,
        partner: ElementIndex,
        value: f64,
        statistics: &ExchangeStatistics,
    ) {
        (**self).on_probe(element, partner, value, statistics);
    }

    #[inline]
    fn on_improvement(
        &mut self,
        element: ElementIndex,
        partner: ElementIndex,
        value: f64,
        statistics: &ExchangeStatistics,
    ) {
        (**self).on_improvement(element, partner, value, statistics);
    }

    #[inline]
    fn on_commit(
        &mut self,
        element: ElementIndex,
        partner: ElementIndex,
        objective: f64,
        statistics: &ExchangeStatistics,
    ) {
        (**self).on_commit(element, partner, objective, statistics);
    }

    #[inline]
    fn search_command(&mut self, statistics: &ExchangeStatistics) -> SearchCommand {
        (**self).search_command(statistics)
    }
}

impl std::fmt::Debug for dyn ExchangeMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ExchangeMonitor {{ name: {} }}", self.name())
    }
}

impl std::fmt::Display for dyn ExchangeMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ExchangeMonitor: {}", self.name())
    }
}
