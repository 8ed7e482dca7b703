use crate::error::{AnalysisError, AnalysisResult};
use crate::statistics::StatisticsEngine;

/// Pivot menší ako táto hranica znamená singulárnu maticu
const SINGULARITY_EPS: f64 = 1e-10;

/// Gaussova eliminácia s čiastočným pivotovaním.
/// Rieši A·x = b, singulárna matica je COMPUTATION_ERROR.
pub(crate) fn solve_linear_system(
    mut a: Vec<Vec<f64>>,
    mut b: Vec<f64>,
) -> AnalysisResult<Vec<f64>> {
    let n = a.len();
    if n == 0 || b.len() != n || a.iter().any(|row| row.len() != n) {
        return Err(AnalysisError::Validation(
            "Sústava rovníc má nekonzistentné rozmery".to_string(),
        ));
    }

    for col in 0..n {
        // Výber pivotu s najväčšou absolútnou hodnotou
        let mut pivot_row = col;
        for row in (col + 1)..n {
            if a[row][col].abs() > a[pivot_row][col].abs() {
                pivot_row = row;
            }
        }
        if a[pivot_row][col].abs() < SINGULARITY_EPS {
            return Err(AnalysisError::Computation(
                "Singulárna matica normálnych rovníc - riešenie neexistuje".to_string(),
            ));
        }
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in (col + 1)..n {
            let factor = a[row][col] / a[col][col];
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    // Spätná substitúcia
    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let mut sum = b[row];
        for k in (row + 1)..n {
            sum -= a[row][k] * x[k];
        }
        x[row] = sum / a[row][row];
    }

    Ok(x)
}

/// Zostaví a vyrieši normálne rovnice (XᵗX)β = Xᵗy.
/// `design` je po riadkoch (vzorka × parameter).
pub(crate) fn solve_normal_equations(
    design: &[Vec<f64>],
    target: &[f64],
) -> AnalysisResult<Vec<f64>> {
    let rows = design.len();
    let params = design.first().map(|r| r.len()).unwrap_or(0);
    let mut xtx = vec![vec![0.0; params]; params];
    let mut xty = vec![0.0; params];

    for i in 0..rows {
        for p in 0..params {
            xty[p] += design[i][p] * target[i];
            for q in p..params {
                xtx[p][q] += design[i][p] * design[i][q];
            }
        }
    }
    // Symetrické doplnenie dolného trojuholníka
    for p in 0..params {
        for q in 0..p {
            xtx[p][q] = xtx[q][p];
        }
    }

    solve_linear_system(xtx, xty)
}

/// Štandardizované stĺpce spolu s pôvodnými priemermi a odchýlkami
#[derive(Debug)]
pub(crate) struct Standardized {
    pub columns: Vec<Vec<f64>>,
    pub means: Vec<f64>,
    pub stds: Vec<f64>,
}

/// Z-score štandardizácia po stĺpcoch. Stĺpec s nulovou varianciou
/// nemožno štandardizovať - explicitná chyba.
pub(crate) fn standardize_columns(columns: &[&[f64]]) -> AnalysisResult<Standardized> {
    let mut out = Standardized {
        columns: Vec::with_capacity(columns.len()),
        means: Vec::with_capacity(columns.len()),
        stds: Vec::with_capacity(columns.len()),
    };

    for col in columns {
        let mean = StatisticsEngine::mean(col);
        let std = StatisticsEngine::std_dev(col);
        if std == 0.0 {
            return Err(AnalysisError::InsufficientData(
                "Prediktor s nulovou varianciou nemožno štandardizovať".to_string(),
            ));
        }
        out.columns.push(col.iter().map(|v| (v - mean) / std).collect());
        out.means.push(mean);
        out.stds.push(std);
    }

    Ok(out)
}
