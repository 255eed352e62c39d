//! Rank-based pairwise comparisons
//!
//! - Dwass-Steel-Critchlow-Fligner (DSCF): pairwise rankings referred to the
//!   studentized range with infinite degrees of freedom
//! - Dunn: joint ranking with a normal approximation and optional
//!   multiplicity adjustment
//!
//! Both are tie-corrected and return a symmetric matrix of p-values whose
//! diagonal is 1.

use statrs::distribution::{ContinuousCDF, Normal};
use tracing::debug;

use super::prepare_groups;
use super::studentized_range::ptukey;
use crate::{StatsError, StatsResult};

/// Rank-based pairwise procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatrixMethod {
    /// Dwass-Steel-Critchlow-Fligner all-pairs test
    #[default]
    Dscf,
    /// Dunn's test on Kruskal-Wallis ranks
    Dunn,
}

impl MatrixMethod {
    pub fn title(&self) -> &'static str {
        match self {
            MatrixMethod::Dscf => "Dwass-Steel-Critchlow-Fligner",
            MatrixMethod::Dunn => "Dunn",
        }
    }
}

/// Multiplicity adjustment for Dunn's test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PAdjust {
    None,
    #[default]
    Bonferroni,
    Holm,
}

/// Options for the pairwise p-value matrix
#[derive(Debug, Clone, Default)]
pub struct MatrixOptions {
    /// Procedure (default: DSCF)
    pub method: MatrixMethod,
    /// Adjustment applied to Dunn p-values (default: Bonferroni; DSCF ignores it)
    pub p_adjust: PAdjust,
}

/// Symmetric matrix of pairwise p-values
#[derive(Debug, Clone)]
pub struct PairwiseMatrix {
    pub method: MatrixMethod,
    /// Row and column labels
    pub labels: Vec<String>,
    /// `p_values[i][j]` compares treatment `i` with treatment `j`
    pub p_values: Vec<Vec<f64>>,
}

impl PairwiseMatrix {
    pub fn size(&self) -> usize {
        self.labels.len()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.p_values[i][j]
    }
}

/// Average ranks (1-based), ties share the mean of their positions
pub fn rank_average(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // Positions start..end hold ranks start+1..=end
        let rank = (start + end + 1) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        start = end;
    }
    ranks
}

/// Sum of t^3 - t over groups of tied values
pub fn tie_sum(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
        .chunk_by(|a, b| a == b)
        .map(|run| {
            let t = run.len() as f64;
            t * t * t - t
        })
        .sum()
}

/// Pairwise p-value matrix for all treatments
///
/// # Arguments
/// * `groups` - Responses per treatment (NaN values are ignored)
/// * `labels` - Treatment labels, one per group
/// * `options` - Procedure and adjustment
pub fn pairwise_matrix(
    groups: &[Vec<f64>],
    labels: &[String],
    options: &MatrixOptions,
) -> StatsResult<PairwiseMatrix> {
    let groups = prepare_groups(groups, labels)?;
    let k = groups.len();

    let mut p_values = vec![vec![1.0; k]; k];
    let upper = match options.method {
        MatrixMethod::Dscf => dscf_upper(&groups),
        MatrixMethod::Dunn => adjust(&dunn_upper(&groups)?, options.p_adjust),
    };
    for ((i, j), p) in upper {
        p_values[i][j] = p;
        p_values[j][i] = p;
    }

    debug!(
        method = options.method.title(),
        treatments = k,
        "pairwise p-value matrix complete"
    );

    Ok(PairwiseMatrix {
        method: options.method,
        labels: labels.to_vec(),
        p_values,
    })
}

fn dscf_upper(groups: &[Vec<f64>]) -> Vec<((usize, usize), f64)> {
    let k = groups.len();
    let mut out = Vec::with_capacity(k * (k - 1) / 2);
    for i in 0..k {
        for j in (i + 1)..k {
            let stat = dscf_statistic(&groups[i], &groups[j]);
            let p = if stat.is_nan() {
                f64::NAN
            } else {
                1.0 - ptukey(stat.abs(), k, f64::INFINITY)
            };
            out.push(((i, j), p));
        }
    }
    out
}

/// Standardized Mann-Whitney statistic of one pair, scaled to the range
fn dscf_statistic(gi: &[f64], gj: &[f64]) -> f64 {
    let ni = gi.len() as f64;
    let nj = gj.len() as f64;
    let pooled: Vec<f64> = gi.iter().chain(gj).copied().collect();
    let ranks = rank_average(&pooled);
    let ri: f64 = ranks[..gi.len()].iter().sum();
    let rj: f64 = ranks[gi.len()..].iter().sum();

    let u_j = ni * nj + nj * (nj + 1.0) / 2.0 - rj;
    let u_i = ni * nj + ni * (ni + 1.0) / 2.0 - ri;
    let u_min = u_i.min(u_j);

    let s = ni + nj;
    let var = (ni * nj / (s * (s - 1.0))) * ((s * s * s - s) / 12.0 - tie_sum(&pooled) / 12.0);
    if var <= 0.0 {
        return f64::NAN;
    }
    2.0_f64.sqrt() * (u_min - ni * nj / 2.0) / var.sqrt()
}

fn dunn_upper(groups: &[Vec<f64>]) -> StatsResult<Vec<((usize, usize), f64)>> {
    let pooled: Vec<f64> = groups.iter().flatten().copied().collect();
    let n = pooled.len() as f64;
    let ranks = rank_average(&pooled);

    let mut mean_ranks = Vec::with_capacity(groups.len());
    let mut offset = 0;
    for g in groups {
        let sum: f64 = ranks[offset..offset + g.len()].iter().sum();
        mean_ranks.push(sum / g.len() as f64);
        offset += g.len();
    }

    let ties = tie_sum(&pooled) / (12.0 * (n - 1.0));
    let base = n * (n + 1.0) / 12.0 - ties;
    let normal = Normal::new(0.0, 1.0).map_err(|e| StatsError::InvalidInput(e.to_string()))?;

    let k = groups.len();
    let mut out = Vec::with_capacity(k * (k - 1) / 2);
    for i in 0..k {
        for j in (i + 1)..k {
            let se = (base * (1.0 / groups[i].len() as f64 + 1.0 / groups[j].len() as f64)).sqrt();
            let z = (mean_ranks[i] - mean_ranks[j]).abs() / se;
            let p = if z.is_nan() { f64::NAN } else { 2.0 * normal.sf(z) };
            out.push(((i, j), p));
        }
    }
    Ok(out)
}

fn adjust(raw: &[((usize, usize), f64)], method: PAdjust) -> Vec<((usize, usize), f64)> {
    let m = raw.len() as f64;
    match method {
        PAdjust::None => raw.to_vec(),
        PAdjust::Bonferroni => raw
            .iter()
            .map(|&(pair, p)| (pair, (p * m).min(1.0)))
            .collect(),
        PAdjust::Holm => {
            let mut order: Vec<usize> = (0..raw.len()).collect();
            order.sort_by(|&a, &b| raw[a].1.total_cmp(&raw[b].1));

            let mut out = raw.to_vec();
            let mut running: f64 = 0.0;
            for (rank, &idx) in order.iter().enumerate() {
                let p = raw[idx].1;
                if p.is_nan() {
                    continue;
                }
                running = running.max(((m - rank as f64) * p).min(1.0));
                out[idx].1 = running;
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(k: usize) -> Vec<String> {
        (0..k).map(|i| i.to_string()).collect()
    }

    fn sample() -> Vec<Vec<f64>> {
        vec![vec![10.0, 12.0], vec![20.0, 22.0], vec![30.0, 28.0]]
    }

    fn assert_symmetric(m: &PairwiseMatrix) {
        for i in 0..m.size() {
            assert_eq!(m.get(i, i), 1.0);
            for j in 0..m.size() {
                let (a, b) = (m.get(i, j), m.get(j, i));
                assert!(a == b || (a.is_nan() && b.is_nan()));
            }
        }
    }

    #[test]
    fn test_rank_average_with_ties() {
        let ranks = rank_average(&[3.0, 1.0, 3.0, 2.0]);
        assert_eq!(ranks, vec![3.5, 1.0, 3.5, 2.0]);
        assert_eq!(tie_sum(&[3.0, 1.0, 3.0, 2.0]), 6.0);
        assert_eq!(tie_sum(&[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn test_dscf_matrix() {
        let m = pairwise_matrix(&sample(), &labels(3), &MatrixOptions::default()).unwrap();
        assert_eq!(m.labels, vec!["0", "1", "2"]);
        assert_symmetric(&m);
        // Every pair is perfectly separated: u_min = 0, var = 5/3
        for (i, j) in [(0, 1), (0, 2), (1, 2)] {
            assert!((m.get(i, j) - 0.268023).abs() < 1e-5);
        }
    }

    #[test]
    fn test_dunn_adjustments() {
        let raw = pairwise_matrix(
            &sample(),
            &labels(3),
            &MatrixOptions {
                method: MatrixMethod::Dunn,
                p_adjust: PAdjust::None,
            },
        )
        .unwrap();
        assert_symmetric(&raw);
        assert!((raw.get(0, 1) - 0.285049).abs() < 1e-5);
        assert!((raw.get(0, 2) - 0.032509).abs() < 1e-5);

        let bonf = pairwise_matrix(
            &sample(),
            &labels(3),
            &MatrixOptions {
                method: MatrixMethod::Dunn,
                p_adjust: PAdjust::Bonferroni,
            },
        )
        .unwrap();
        assert!((bonf.get(0, 2) - 0.097528).abs() < 1e-5);
        assert!((bonf.get(1, 2) - 0.855148).abs() < 1e-5);

        let holm = pairwise_matrix(
            &sample(),
            &labels(3),
            &MatrixOptions {
                method: MatrixMethod::Dunn,
                p_adjust: PAdjust::Holm,
            },
        )
        .unwrap();
        assert!((holm.get(0, 2) - 0.097528).abs() < 1e-5);
        assert!((holm.get(0, 1) - 0.570099).abs() < 1e-5);
        assert_symmetric(&holm);
    }

    #[test]
    fn test_matrix_with_ties() {
        let groups = vec![vec![1.0, 2.0, 2.0], vec![2.0, 3.0, 3.0], vec![5.0, 5.0, 6.0]];
        for method in [MatrixMethod::Dscf, MatrixMethod::Dunn] {
            let m = pairwise_matrix(
                &groups,
                &labels(3),
                &MatrixOptions {
                    method,
                    ..Default::default()
                },
            )
            .unwrap();
            assert_symmetric(&m);
            for i in 0..3 {
                for j in 0..3 {
                    let p = m.get(i, j);
                    assert!((0.0..=1.0).contains(&p));
                }
            }
        }
    }

    #[test]
    fn test_matrix_all_tied() {
        let groups = vec![vec![4.0, 4.0], vec![4.0, 4.0]];
        let m = pairwise_matrix(&groups, &labels(2), &MatrixOptions::default()).unwrap();
        assert!(m.get(0, 1).is_nan());
        assert_eq!(m.get(0, 0), 1.0);
    }

    #[test]
    fn test_matrix_needs_two_groups() {
        assert!(pairwise_matrix(&[vec![1.0, 2.0]], &labels(1), &MatrixOptions::default()).is_err());
    }
}
