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

use crate::index::CheckpointIndex;

/// The final tour chosen by the solver.
///
/// A solution is the ordered list of intermediate checkpoints between the
/// fixed Start and Finish nodes, plus the minute the walker arrives at
/// Finish inside an open Finish slot. An instance with no feasible tour
/// yields the [`RouteSolution::empty`] form: no checkpoints and a finish
/// time of zero.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteSolution {
    /// Checkpoints in visit order, Start to last.
    route: Vec<CheckpointIndex>,

    /// Arrival minute at Finish, zero when the route is empty.
    finish_time: f32,
}

impl RouteSolution {
    /// Constructs a new `RouteSolution`.
    ///
    /// # Panics
    ///
    /// Panics if `finish_time` is not finite.
    pub fn new(route: Vec<CheckpointIndex>, finish_time: f32) -> Self {
        assert!(
            finish_time.is_finite(),
            "called `RouteSolution::new` with a non-finite finish time: {}",
            finish_time
        );

        Self { route, finish_time }
    }

    /// Constructs the solution of an infeasible instance: no checkpoints,
    /// finish time zero.
    #[inline]
    pub fn empty() -> Self {
        Self {
            route: Vec::new(),
            finish_time: 0.0,
        }
    }

    /// Returns the number of checkpoints visited.
    #[inline]
    pub fn count(&self) -> usize {
        self.route.len()
    }

    /// Checks whether the solution visits no checkpoint.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.route.is_empty()
    }

    /// Returns the checkpoints in visit order.
    #[inline]
    pub fn route(&self) -> &[CheckpointIndex] {
        &self.route
    }

    /// Returns the arrival minute at Finish, or zero for the empty
    /// solution.
    #[inline]
    pub fn finish_time(&self) -> f32 {
        self.finish_time
    }

    /// Encodes the solution into the flat integer layout the host expects.
    ///
    /// Layout: three header integers `[count, route_length,
    /// round(finish_time * 100)]` followed by `route_length` checkpoint
    /// indices. The finish time travels as centi-minutes so two fractional
    /// digits survive without floating-point transport.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use cairn_model::index::CheckpointIndex;
    /// # use cairn_model::solution::RouteSolution;
    ///
    /// let solution = RouteSolution::new(
    ///     vec![CheckpointIndex::new(2), CheckpointIndex::new(0)],
    ///     617.5,
    /// );
    /// assert_eq!(solution.encode(), vec![2, 2, 61750, 2, 0]);
    /// ```
    pub fn encode(&self) -> Vec<i32> {
        let mut out = Vec::with_capacity(3 + self.route.len());
        out.push(self.count() as i32);
        out.push(self.route.len() as i32);
        out.push((self.finish_time * 100.0).round() as i32);
        out.extend(self.route.iter().map(|cp| cp.get() as i32));
        out
    }
}

impl std::fmt::Display for RouteSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Route Summary")?;
        writeln!(f, "   Checkpoints visited: {}", self.count())?;
        writeln!(f, "   Finish time:         {:.2}", self.finish_time)?;

        if self.route.is_empty() {
            writeln!(f, "   (No feasible route)")?;
            return Ok(());
        }

        let order = self
            .route
            .iter()
            .map(|cp| cp.get().to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        writeln!(f, "   Order: Start -> {} -> Finish", order)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cp(i: usize) -> CheckpointIndex {
        CheckpointIndex::new(i)
    }

    #[test]
    fn test_new_and_accessors() {
        let solution = RouteSolution::new(vec![cp(3), cp(1), cp(4)], 702.0);
        assert_eq!(solution.count(), 3);
        assert!(!solution.is_empty());
        assert_eq!(solution.route(), &[cp(3), cp(1), cp(4)]);
        assert_eq!(solution.finish_time(), 702.0);
    }

    #[test]
    fn test_empty_solution() {
        let solution = RouteSolution::empty();
        assert_eq!(solution.count(), 0);
        assert!(solution.is_empty());
        assert_eq!(solution.route(), &[]);
        assert_eq!(solution.finish_time(), 0.0);
        assert_eq!(solution.encode(), vec![0, 0, 0]);
    }

    #[test]
    #[should_panic(expected = "called `RouteSolution::new` with a non-finite finish time")]
    fn test_new_panics_on_non_finite_finish() {
        let _ = RouteSolution::new(vec![cp(0)], f32::INFINITY);
    }

    #[test]
    fn test_encode_layout() {
        let solution = RouteSolution::new(vec![cp(5), cp(0), cp(2)], 617.0);
        assert_eq!(solution.encode(), vec![3, 3, 61700, 5, 0, 2]);
    }

    #[test]
    fn test_encode_rounds_centi_minutes() {
        // 640.3 minutes carries as 64030 centi-minutes even though
        // 640.3f32 * 100.0 lands just below the integer.
        let solution = RouteSolution::new(vec![cp(1)], 640.3);
        assert_eq!(solution.encode()[2], 64030);
    }

    #[test]
    fn test_display_formatting() {
        let solution = RouteSolution::new(vec![cp(2), cp(7)], 645.0);
        let displayed = format!("{}", solution);
        assert!(displayed.contains("Checkpoints visited: 2"));
        assert!(displayed.contains("645.00"));
        assert!(displayed.contains("Order: Start -> 2 -> 7 -> Finish"));

        let empty = format!("{}", RouteSolution::empty());
        assert!(empty.contains("(No feasible route)"));
    }
}
