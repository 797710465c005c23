//! Greedy aggregation over the strength graph.

use crate::error::AmgError;
use crate::matrix::CsrMatrix;
use num_traits::Float;

const UNASSIGNED: usize = usize::MAX;

/// Partition the rows of the strength graph `c` into disjoint aggregates.
///
/// Three sequential passes: (1) every node whose strong neighborhood is
/// untouched becomes a root and absorbs its neighbors, (2) leftover nodes
/// attach to an adjacent pass-1 aggregate, (3) whatever remains seeds new
/// aggregates. Postcondition: every row carries an id in
/// `[0, num_aggregates)` with all ids present.
pub fn standard_aggregation<T: Float>(c: &CsrMatrix<T>) -> Result<Vec<usize>, AmgError> {
    let n = c.nrows();
    let mut aggregates = vec![UNASSIGNED; n];
    let mut next_id = 0usize;

    // pass 1: roots with fully unassigned neighborhoods
    for i in 0..n {
        if aggregates[i] != UNASSIGNED {
            continue;
        }
        let (neighbors, _) = c.row(i);
        if neighbors.iter().any(|&j| j != i && aggregates[j] != UNASSIGNED) {
            continue;
        }
        aggregates[i] = next_id;
        for &j in neighbors {
            aggregates[j] = next_id;
        }
        next_id += 1;
    }

    // pass 2: attach leftovers to a neighboring pass-1 aggregate
    let roots = aggregates.clone();
    for i in 0..n {
        if aggregates[i] != UNASSIGNED {
            continue;
        }
        let (neighbors, _) = c.row(i);
        if let Some(&j) = neighbors.iter().find(|&&j| j != i && roots[j] != UNASSIGNED) {
            aggregates[i] = roots[j];
        }
    }

    // pass 3: mop up anything still isolated
    for i in 0..n {
        if aggregates[i] != UNASSIGNED {
            continue;
        }
        aggregates[i] = next_id;
        let (neighbors, _) = c.row(i);
        for &j in neighbors {
            if aggregates[j] == UNASSIGNED {
                aggregates[j] = next_id;
            }
        }
        next_id += 1;
    }

    if next_id == 0 {
        return Err(AmgError::DegenerateAggregation(
            "aggregation produced zero aggregates".into(),
        ));
    }
    if aggregates.iter().any(|&id| id == UNASSIGNED) {
        return Err(AmgError::DegenerateAggregation(
            "aggregation left unassigned rows".into(),
        ));
    }
    Ok(aggregates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_graph(n: usize) -> CsrMatrix<f64> {
        let mut row_ptr = vec![0usize];
        let mut col_idx = Vec::new();
        let mut values = Vec::new();
        for i in 0..n {
            if i > 0 {
                col_idx.push(i - 1);
                values.push(-1.0);
            }
            col_idx.push(i);
            values.push(2.0);
            if i + 1 < n {
                col_idx.push(i + 1);
                values.push(-1.0);
            }
            row_ptr.push(col_idx.len());
        }
        CsrMatrix::from_csr(n, n, row_ptr, col_idx, values).unwrap()
    }

    fn assert_valid(aggregates: &[usize]) {
        let num = aggregates.iter().max().unwrap() + 1;
        for id in 0..num {
            assert!(aggregates.contains(&id), "aggregate id {id} never appears");
        }
    }

    #[test]
    fn path_is_fully_aggregated() {
        let agg = standard_aggregation(&path_graph(10)).unwrap();
        assert_eq!(agg.len(), 10);
        assert_valid(&agg);
        let num = agg.iter().max().unwrap() + 1;
        assert!(num < 10, "a connected path must coarsen");
    }

    #[test]
    fn diagonal_graph_gives_singletons() {
        let c = CsrMatrix::<f64>::identity(4);
        let agg = standard_aggregation(&c).unwrap();
        assert_eq!(agg, vec![0, 1, 2, 3]);
    }

    #[test]
    fn two_components_stay_separate() {
        // two disconnected edges: {0,1} and {2,3}
        let c = CsrMatrix::from_csr(
            4,
            4,
            vec![0, 2, 4, 6, 8],
            vec![0, 1, 0, 1, 2, 3, 2, 3],
            vec![1.0; 8],
        )
        .unwrap();
        let agg = standard_aggregation(&c).unwrap();
        assert_eq!(agg[0], agg[1]);
        assert_eq!(agg[2], agg[3]);
        assert_ne!(agg[0], agg[2]);
    }
}
