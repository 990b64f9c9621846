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

use std::time::Duration;

/// Statistics collected during the execution of the subset sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverStatistics {
    /// Total extension candidates examined (including the Start seeds).
    pub transitions_examined: u64,
    /// Candidates dropped because the checkpoint never opens in time or
    /// the departure falls past the event end.
    pub prunings_window: u64,
    /// Candidates dropped because Finish would no longer be reachable.
    pub prunings_finish: u64,
    /// State cells written (first writes and strict improvements).
    pub states_recorded: u64,
    /// Terminal states that could actually close the tour at Finish.
    pub terminal_candidates: u64,
    /// Total time spent in the solver.
    pub time_total: Duration,
}

impl SolverStatistics {
    #[inline]
    pub fn on_transition_examined(&mut self) {
        self.transitions_examined = self.transitions_examined.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_window(&mut self) {
        self.prunings_window = self.prunings_window.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_finish(&mut self) {
        self.prunings_finish = self.prunings_finish.saturating_add(1);
    }

    #[inline]
    pub fn on_state_recorded(&mut self) {
        self.states_recorded = self.states_recorded.saturating_add(1);
    }

    #[inline]
    pub fn on_terminal_candidate(&mut self) {
        self.terminal_candidates = self.terminal_candidates.saturating_add(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Cairn-DP Solver Statistics:")?;
        writeln!(f, "  Transitions examined: {}", self.transitions_examined)?;
        writeln!(f, "  Prunings (window):    {}", self.prunings_window)?;
        writeln!(f, "  Prunings (finish):    {}", self.prunings_finish)?;
        writeln!(f, "  States recorded:      {}", self.states_recorded)?;
        writeln!(f, "  Terminal candidates:  {}", self.terminal_candidates)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_increment() {
        let mut stats = SolverStatistics::default();
        stats.on_transition_examined();
        stats.on_transition_examined();
        stats.on_pruning_window();
        stats.on_pruning_finish();
        stats.on_state_recorded();
        stats.on_terminal_candidate();

        assert_eq!(stats.transitions_examined, 2);
        assert_eq!(stats.prunings_window, 1);
        assert_eq!(stats.prunings_finish, 1);
        assert_eq!(stats.states_recorded, 1);
        assert_eq!(stats.terminal_candidates, 1);
    }

    #[test]
    fn test_display_lists_every_counter() {
        let mut stats = SolverStatistics::default();
        stats.on_state_recorded();
        stats.set_total_time(Duration::from_millis(5));

        let displayed = format!("{}", stats);
        assert!(displayed.contains("Transitions examined: 0"));
        assert!(displayed.contains("States recorded:"));
        assert!(displayed.contains("Total time:"));
    }
}
