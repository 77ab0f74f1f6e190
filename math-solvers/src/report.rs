//! Text report of a solve: factors, intermediate vectors, solution and status
//!
//! [`run`] is the whole pipeline behind the `crout-solve` binary: parse a
//! [`SystemConfig`], pick the representation, solve, and render.

use crate::config::{Arithmetic, LinearSystem, Structure, SystemConfig};
use crate::direct::{
    GeneralFactorization, SymmetricFactorization, TridiagonalFactorization, factor_general,
    factor_symmetric, factor_tridiagonal,
};
use crate::error::{Result, SolveStatus, SolverError};
use crate::traits::CroutField;
use math_crout_interval::{BigFloat, Interval};
use ndarray::{Array1, Array2};
use std::fmt::Write as FmtWrite;

/// Minimum column width of matrix rows
const MIN_COLUMN_WIDTH: usize = 15;

/// Result of one solve, whichever family produced it
#[derive(Debug, Clone)]
pub enum Solution<T: CroutField> {
    /// From [`factor_general`]
    General(GeneralFactorization<T>),
    /// From [`factor_symmetric`]
    Symmetric(SymmetricFactorization<T>),
    /// From [`factor_tridiagonal`]
    Tridiagonal(TridiagonalFactorization<T>),
}

impl<T: CroutField> Solution<T> {
    /// Final solution vector
    pub fn x(&self) -> &Array1<T> {
        match self {
            Solution::General(f) => &f.x,
            Solution::Symmetric(f) => &f.x,
            Solution::Tridiagonal(f) => &f.x,
        }
    }

    /// Completion status
    pub fn status(&self) -> SolveStatus {
        match self {
            Solution::General(f) => f.status,
            Solution::Symmetric(f) => f.status,
            Solution::Tridiagonal(f) => f.status,
        }
    }
}

/// Run the solver family matching `structure` on a parsed system
pub fn solve_system<T: CroutField>(
    structure: Structure,
    system: &LinearSystem<T>,
    ctx: &T::Context,
) -> Result<Solution<T>> {
    match (structure, system) {
        (Structure::General, LinearSystem::Dense { a, b }) => {
            factor_general(a, b, ctx).map(Solution::General)
        }
        (Structure::Symmetric, LinearSystem::Dense { a, b }) => {
            factor_symmetric(a, b, ctx).map(Solution::Symmetric)
        }
        (Structure::Tridiagonal, LinearSystem::Banded { sub, diag, sup, b }) => {
            factor_tridiagonal(sub, diag, sup, b, ctx).map(Solution::Tridiagonal)
        }
        (structure, _) => Err(SolverError::Parse(format!(
            "system layout does not match structure {structure:?}"
        ))),
    }
}

/// Render factors, `y`, `x` and the status
pub fn render_solution<T: CroutField>(solution: &Solution<T>, ctx: &T::Context) -> String {
    let mut out = String::new();
    match solution {
        Solution::General(f) => {
            render_matrix(&mut out, "Matrix L", &f.l, ctx);
            render_matrix(&mut out, "Matrix U", &f.u, ctx);
            render_vector(&mut out, "Vector y (from L·y = b)", "y", &f.y, ctx);
        }
        Solution::Symmetric(f) => {
            render_matrix(&mut out, "Matrix L", &f.l, ctx);
            render_vector(&mut out, "Diagonal D", "D", &f.d, ctx);
            render_matrix(&mut out, "Matrix U = D·Lᵀ", &f.upper(ctx), ctx);
            render_vector(&mut out, "Vector y (from L·y = b)", "y", &f.y, ctx);
            render_vector(&mut out, "Vector z (from D·z = y)", "z", &f.z, ctx);
        }
        Solution::Tridiagonal(f) => {
            render_vector(&mut out, "Multipliers L", "l", &f.l, ctx);
            render_vector(&mut out, "Pivots D", "d", &f.d, ctx);
            render_vector(&mut out, "Super-diagonal U", "u", &f.u, ctx);
            render_vector(&mut out, "Vector y (from L·y = b)", "y", &f.y, ctx);
        }
    }
    render_vector(&mut out, "Solution x", "x", solution.x(), ctx);
    let status = solution.status();
    let _ = writeln!(out, "\nStatus: {} ({status})", status.code());
    out
}

fn render_matrix<T: CroutField>(out: &mut String, title: &str, m: &Array2<T>, ctx: &T::Context) {
    if !out.is_empty() {
        out.push('\n');
    }
    let cells: Vec<String> = m.iter().map(|v| v.render(ctx)).collect();
    let width = cells
        .iter()
        .map(|c| c.chars().count() + 1)
        .max()
        .unwrap_or(0)
        .max(MIN_COLUMN_WIDTH);

    let _ = writeln!(out, "{title}:");
    for row in cells.chunks(m.ncols().max(1)) {
        let line: String = row.iter().map(|c| format!("{c:<width$}")).collect();
        let _ = writeln!(out, "{}", line.trim_end());
    }
}

fn render_vector<T: CroutField>(
    out: &mut String,
    title: &str,
    name: &str,
    v: &Array1<T>,
    ctx: &T::Context,
) {
    if !out.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(out, "{title}:");
    for (i, value) in v.iter().enumerate() {
        let _ = writeln!(out, "{name}[{i}] = {}", value.render(ctx));
    }
}

/// Rendered solve together with its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Factors, intermediate vectors and solution as text
    pub text: String,
    /// Completion status of the solve
    pub status: SolveStatus,
}

fn solve_and_render<T: CroutField>(config: &SystemConfig, ctx: &T::Context) -> Result<Report> {
    let system = config.system::<T>(ctx)?;
    let solution = solve_system(config.structure, &system, ctx)?;
    Ok(Report {
        text: render_solution(&solution, ctx),
        status: solution.status(),
    })
}

/// Parse, solve and render the system described by `config`
pub fn run(config: &SystemConfig) -> Result<Report> {
    log::debug!(
        "solving {:?} system in {:?} arithmetic",
        config.structure,
        config.arithmetic
    );
    if let Some(ctx) = &config.context {
        ctx.validated()?;
    }
    match config.arithmetic {
        Arithmetic::Double => solve_and_render::<f64>(config, &()),
        Arithmetic::Big => solve_and_render::<BigFloat>(config, &config.context_for::<BigFloat>()),
        Arithmetic::IntervalDouble => {
            solve_and_render::<Interval<f64>>(config, &config.context_for::<f64>())
        }
        Arithmetic::IntervalBig => {
            solve_and_render::<Interval<BigFloat>>(config, &config.context_for::<BigFloat>())
        }
    }
}
