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


//! Sweep outcome and termination reporting.
//!
//! `ExchangeOutcome` carries everything a caller may want after a sweep: the
//! final assignment, the objective before and after, the run statistics, and
//! why the sweep stopped. A sweep either visits every element or is cut short
//! by a monitor; in the latter case the partition still reflects every
//! exchange committed before the stop.

use crate::stats::ExchangeStatistics;
use anticlust_model::partition::Partition;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExchangeTerminationReason {
    /// Every element has been visited once.
    SweepCompleted,

    /// A monitor stopped the sweep early.
    /// The string contains the monitor's reason.
    Aborted(String),
}

impl std::fmt::Display for ExchangeTerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExchangeTerminationReason::SweepCompleted => write!(f, "Sweep Completed"),
            ExchangeTerminationReason::Aborted(msg) => write!(f, "Aborted: {}", msg),
        }
    }
}

/// Result of the exchange engine after termination.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeOutcome {
    termination_reason: ExchangeTerminationReason,
    partition: Partition,
    initial_objective: f64,
    final_objective: f64,
    statistics: ExchangeStatistics,
}

impl ExchangeOutcome {
    /// Creates the outcome of a sweep that visited every element.
    #[inline]
    pub fn completed(
        partition: Partition,
        initial_objective: f64,
        final_objective: f64,
        statistics: ExchangeStatistics,
    ) -> Self {
        Self {
            termination_reason: ExchangeTerminationReason::SweepCompleted,
            partition,
            initial_objective,
            final_objective,
            statistics,
        }
    }

    /// Creates the outcome of a sweep a monitor stopped early.
    #[inline]
    pub fn aborted<R>(
        partition: Partition,
        initial_objective: f64,
        final_objective: f64,
        reason: R,
        statistics: ExchangeStatistics,
    ) -> Self
    where
        R: Into<String>,
    {
        Self {
            termination_reason: ExchangeTerminationReason::Aborted(reason.into()),
            partition,
            initial_objective,
            final_objective,
            statistics,
        }
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> &ExchangeTerminationReason {
        &self.termination_reason
    }

    /// Returns the final assignment.
    #[inline]
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Consumes the outcome and returns the final assignment.
    #[inline]
    pub fn into_partition(self) -> Partition {
        self.partition
    }

    /// Returns the objective of the initial assignment.
    #[inline]
    pub fn initial_objective(&self) -> f64 {
        self.initial_objective
    }

    /// Returns the objective of the final assignment.
    #[inline]
    pub fn final_objective(&self) -> f64 {
        self.final_objective
    }

    /// Returns the statistics.
    #[inline]
    pub fn statistics(&self) -> &ExchangeStatistics {
        &self.statistics
    }
}

impl std::fmt::Display for ExchangeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Exchange Outcome: {}", self.termination_reason)?;
        writeln!(f, "   Initial Objective: {}", self.initial_objective)?;
        writeln!(f, "   Final Objective:   {}", self.final_objective)?;
        write!(f, "{}", self.statistics)
    }
}
