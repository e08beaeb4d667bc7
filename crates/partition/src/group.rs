use std::ops::Range;

use crate::CellAssignment;

/// A maximal block of sorted assignments sharing one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub cell: u32,
    pub range: Range<usize>,
}

impl Run {
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Sort `assignments` by cell and split them into runs, keeping only runs of
/// at least `min_points` entries. Order inside a run is unspecified.
///
/// The returned ranges index into the sorted `assignments`.
pub fn group_runs(assignments: &mut [CellAssignment], min_points: usize) -> Vec<Run> {
    assignments.sort_unstable_by_key(|a| a.cell);

    let min_points = min_points.max(1);
    let mut runs = Vec::new();
    let mut first = 0;
    while first < assignments.len() {
        let cell = assignments[first].cell;
        let last = first
            + assignments[first..]
                .iter()
                .take_while(|a| a.cell == cell)
                .count();
        if last - first >= min_points {
            runs.push(Run {
                cell,
                range: first..last,
            });
        }
        first = last;
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assignments(cells: &[u32]) -> Vec<CellAssignment> {
        cells
            .iter()
            .enumerate()
            .map(|(point, &cell)| CellAssignment { cell, point })
            .collect()
    }

    #[test]
    fn empty_input_has_no_runs() {
        assert!(group_runs(&mut [], 1).is_empty());
    }

    #[test]
    fn groups_by_ascending_cell() {
        let mut a = assignments(&[7, 2, 7, 0, 2, 7]);
        let runs = group_runs(&mut a, 1);
        let cells: Vec<u32> = runs.iter().map(|r| r.cell).collect();
        let lens: Vec<usize> = runs.iter().map(Run::len).collect();
        assert_eq!(cells, vec![0, 2, 7]);
        assert_eq!(lens, vec![1, 2, 3]);
        for run in &runs {
            assert!(a[run.range.clone()].iter().all(|x| x.cell == run.cell));
        }
    }

    #[test]
    fn short_runs_are_dropped() {
        let mut a = assignments(&[1, 3, 3, 5, 5, 5]);
        let runs = group_runs(&mut a, 2);
        let cells: Vec<u32> = runs.iter().map(|r| r.cell).collect();
        assert_eq!(cells, vec![3, 5]);
    }

    #[test]
    fn zero_minimum_behaves_like_one() {
        let mut a = assignments(&[4, 4, 9]);
        assert_eq!(group_runs(&mut a, 0), group_runs(&mut a.clone(), 1));
        assert_eq!(group_runs(&mut a, 0).len(), 2);
    }

    #[test]
    fn minimum_above_every_run_keeps_nothing() {
        let mut a = assignments(&[0, 0, 1, 1]);
        assert!(group_runs(&mut a, 3).is_empty());
    }

    proptest! {
        #[test]
        fn runs_are_maximal_disjoint_and_sorted(
            cells in prop::collection::vec(0u32..20, 0..300),
            min_points in 1usize..5,
        ) {
            let mut a = assignments(&cells);
            let runs = group_runs(&mut a, min_points);

            for w in runs.windows(2) {
                prop_assert!(w[0].cell < w[1].cell);
                prop_assert!(w[0].range.end <= w[1].range.start);
            }
            for run in &runs {
                prop_assert!(run.len() >= min_points);
                let expected = cells.iter().filter(|&&c| c == run.cell).count();
                prop_assert_eq!(run.len(), expected);
            }
            let kept: usize = runs.iter().map(Run::len).sum();
            let expected: usize = (0u32..20)
                .map(|c| cells.iter().filter(|&&x| x == c).count())
                .filter(|&n| n >= min_points)
                .sum();
            prop_assert_eq!(kept, expected);
        }
    }
}
