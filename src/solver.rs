//! Unbalanced transport solvers.
//!
//! The alignment pipeline only needs *some* function from
//! `(a, b, C, reg, reg_m)` to a non-negative plan; [`TransportSolver`] is that
//! seam. Closures implement it, which is how tests substitute fixed plans.
//!
//! [`UnbalancedSinkhorn`] is the default: entropic unbalanced OT with
//! KL-penalized marginals, solved by scaling iterations in log space.
//!
//! # Formulation
//!
//! \[
//! \min_{P\ge 0}\; \langle C, P \rangle
//! + \varepsilon\,\mathrm{KL}(P\,\|\,R)
//! + \rho\,\mathrm{KL}(P\mathbf{1}\,\|\,a)
//! + \rho\,\mathrm{KL}(P^\top\mathbf{1}\,\|\,b)
//! \]
//!
//! with reference measure \(R = a b^\top\) ([`Reference::Product`]) or
//! \(R = \mathbf{1}\) ([`Reference::Uniform`]). With kernel
//! \(K = R \odot \exp(-C/\varepsilon)\) the scaling updates are
//! \[
//! u \leftarrow \left(\frac{a}{K v}\right)^{\alpha},\quad
//! v \leftarrow \left(\frac{b}{K^\top u}\right)^{\alpha},\quad
//! \alpha = \frac{\rho}{\rho + \varepsilon},
//! \]
//! and the plan is \(P = \mathrm{diag}(u)\,K\,\mathrm{diag}(v)\).
//!
//! With the product reference, `C ≥ 0` and probability vectors `a`, `b`, the
//! optimal plan carries at most unit mass.

use crate::{logsumexp_by, Error, Result};
use ndarray::{Array1, Array2, Axis};
use tracing::{debug, warn};

/// Something that turns marginals and a cost into an unbalanced transport plan.
///
/// Implementations must return a non-negative matrix shaped like `cost`.
pub trait TransportSolver {
    /// Solve for the plan between `a` (rows) and `b` (columns).
    ///
    /// * `reg` - entropic regularization ε (smaller = sharper plan)
    /// * `reg_m` - marginal relaxation ρ (smaller = more mass may be destroyed)
    fn solve(
        &self,
        a: &Array1<f64>,
        b: &Array1<f64>,
        cost: &Array2<f64>,
        reg: f64,
        reg_m: f64,
    ) -> Result<Array2<f64>>;
}

impl<F> TransportSolver for F
where
    F: Fn(&Array1<f64>, &Array1<f64>, &Array2<f64>, f64, f64) -> Result<Array2<f64>>,
{
    fn solve(
        &self,
        a: &Array1<f64>,
        b: &Array1<f64>,
        cost: &Array2<f64>,
        reg: f64,
        reg_m: f64,
    ) -> Result<Array2<f64>> {
        self(a, b, cost, reg, reg_m)
    }
}

/// Reference measure of the entropic term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reference {
    /// `KL(P ‖ a bᵀ)`: the plan is pulled towards the independent coupling.
    #[default]
    Product,
    /// `KL(P ‖ 1)`: plain negative entropy. Plans may carry more than unit mass.
    Uniform,
}

/// Iteration controls for [`UnbalancedSinkhorn`].
#[derive(Debug, Clone)]
pub struct SinkhornConfig {
    /// Maximum number of scaling iterations.
    pub max_iter: usize,
    /// Convergence tolerance on the change of `log u`, `log v` between iterations.
    pub tol: f64,
    /// Check convergence every this many iterations.
    pub check_every: usize,
    /// Reference measure of the entropic term.
    pub reference: Reference,
}

impl Default for SinkhornConfig {
    fn default() -> Self {
        Self {
            max_iter: 5_000,
            tol: 1e-6,
            check_every: 10,
            reference: Reference::Product,
        }
    }
}

/// Plan plus diagnostics from [`UnbalancedSinkhorn::solve_detailed`].
#[derive(Debug, Clone)]
pub struct UnbalancedSolution {
    /// Transport plan `P` (m × n).
    pub plan: Array2<f64>,
    /// Primal objective of the formulation in the module docs.
    pub objective: f64,
    /// Iterations run before the tolerance was met.
    pub iterations: usize,
}

/// Log-domain unbalanced Sinkhorn scaling.
#[derive(Debug, Clone, Default)]
pub struct UnbalancedSinkhorn {
    config: SinkhornConfig,
}

impl UnbalancedSinkhorn {
    pub fn new(config: SinkhornConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SinkhornConfig {
        &self.config
    }

    /// Solve and return the plan together with its objective and iteration count.
    ///
    /// Masses are **not** normalized: total mass is part of the problem.
    pub fn solve_detailed(
        &self,
        a: &Array1<f64>,
        b: &Array1<f64>,
        cost: &Array2<f64>,
        reg: f64,
        rho: f64,
    ) -> Result<UnbalancedSolution> {
        let m = a.len();
        let n = b.len();
        if cost.nrows() != m || cost.ncols() != n {
            return Err(Error::CostShapeMismatch(m, n, cost.nrows(), cost.ncols()));
        }
        if reg <= 0.0 || !reg.is_finite() {
            return Err(Error::InvalidRegularization(reg));
        }
        if rho <= 0.0 || !rho.is_finite() {
            return Err(Error::InvalidMassPenalty(rho));
        }
        if a.iter().any(|&x| x < 0.0) || b.iter().any(|&x| x < 0.0) {
            return Err(Error::Domain("unbalanced OT requires nonnegative masses"));
        }
        if a.sum() <= 0.0 || b.sum() <= 0.0 {
            return Err(Error::Domain("unbalanced OT requires positive total mass"));
        }

        let alpha = rho / (rho + reg);

        // Zero mass is hard support exclusion (log = -∞).
        let log_a = a.mapv(|x| if x <= 0.0 { f64::NEG_INFINITY } else { x.ln() });
        let log_b = b.mapv(|x| if x <= 0.0 { f64::NEG_INFINITY } else { x.ln() });

        // log K_ij = log R_ij - C_ij / ε
        let reference = self.config.reference;
        let log_k = Array2::from_shape_fn((m, n), |(i, j)| {
            let log_r = match reference {
                Reference::Product => log_a[i] + log_b[j],
                Reference::Uniform => 0.0,
            };
            log_r - cost[[i, j]] / reg
        });

        let mut log_u: Array1<f64> = Array1::zeros(m);
        let mut log_v: Array1<f64> = Array1::zeros(n);

        let check_every = self.config.check_every.max(1);
        let max_iter = self.config.max_iter;

        for iter in 0..max_iter {
            // log u = α (log a - log(Kv))
            let mut log_u_new = Array1::zeros(m);
            for i in 0..m {
                if log_a[i] == f64::NEG_INFINITY {
                    log_u_new[i] = f64::NEG_INFINITY;
                    continue;
                }
                let lkv = logsumexp_by(n, |j| log_k[[i, j]] + log_v[j]);
                log_u_new[i] = if lkv == f64::NEG_INFINITY {
                    f64::NEG_INFINITY
                } else {
                    alpha * (log_a[i] - lkv)
                };
            }

            // log v = α (log b - log(Kᵀu))
            let mut log_v_new = Array1::zeros(n);
            for j in 0..n {
                if log_b[j] == f64::NEG_INFINITY {
                    log_v_new[j] = f64::NEG_INFINITY;
                    continue;
                }
                let lktu = logsumexp_by(m, |i| log_k[[i, j]] + log_u_new[i]);
                log_v_new[j] = if lktu == f64::NEG_INFINITY {
                    f64::NEG_INFINITY
                } else {
                    alpha * (log_b[j] - lktu)
                };
            }

            let check = (iter + 1) % check_every == 0 || iter + 1 == max_iter;
            let drift = if check {
                let du = max_drift(&log_u_new, &log_u);
                let dv = max_drift(&log_v_new, &log_v);
                Some(match (du, dv) {
                    (Some(du), Some(dv)) => du.max(dv),
                    _ => {
                        warn!(iteration = iter + 1, "unbalanced sinkhorn scalings became non-finite");
                        return Err(Error::NumericalInstability(iter + 1));
                    }
                })
            } else {
                None
            };

            log_u = log_u_new;
            log_v = log_v_new;

            if let Some(drift) = drift {
                if drift < self.config.tol {
                    let plan = assemble_plan(&log_u, &log_v, &log_k);
                    let objective = primal_objective(&plan, a, b, cost, reg, rho, reference);
                    debug!(
                        iterations = iter + 1,
                        residual = drift,
                        mass = plan.sum(),
                        objective,
                        "unbalanced sinkhorn converged"
                    );
                    return Ok(UnbalancedSolution {
                        plan,
                        objective,
                        iterations: iter + 1,
                    });
                }
            }
        }

        warn!(max_iter, reg, rho, "unbalanced sinkhorn did not converge");
        Err(Error::SinkhornNotConverged(max_iter))
    }
}

impl TransportSolver for UnbalancedSinkhorn {
    fn solve(
        &self,
        a: &Array1<f64>,
        b: &Array1<f64>,
        cost: &Array2<f64>,
        reg: f64,
        reg_m: f64,
    ) -> Result<Array2<f64>> {
        self.solve_detailed(a, b, cost, reg, reg_m).map(|s| s.plan)
    }
}

/// Largest change between two iterates of a log scaling.
///
/// Excluded entries (-∞) are skipped; `None` if anything went NaN or +∞.
fn max_drift(new: &Array1<f64>, old: &Array1<f64>) -> Option<f64> {
    let mut max_diff = 0.0f64;
    for (&x, &y) in new.iter().zip(old.iter()) {
        if x.is_nan() || x == f64::INFINITY {
            return None;
        }
        if x == f64::NEG_INFINITY || y == f64::NEG_INFINITY {
            continue;
        }
        max_diff = max_diff.max((x - y).abs());
    }
    Some(max_diff)
}

/// P_ij = u_i K_ij v_j  ⇒  log P_ij = log u_i + log K_ij + log v_j
fn assemble_plan(log_u: &Array1<f64>, log_v: &Array1<f64>, log_k: &Array2<f64>) -> Array2<f64> {
    let (m, n) = log_k.dim();
    let mut plan = Array2::zeros((m, n));
    for i in 0..m {
        if log_u[i] == f64::NEG_INFINITY {
            continue;
        }
        for j in 0..n {
            if log_v[j] == f64::NEG_INFINITY || log_k[[i, j]] == f64::NEG_INFINITY {
                continue;
            }
            plan[[i, j]] = (log_u[i] + log_k[[i, j]] + log_v[j]).exp();
        }
    }
    plan
}

/// Generalized (unnormalized) KL: Σ p log(p/q) - p + q, with p=0 contributing +q.
fn kl_mass(p: &Array1<f64>, q: &Array1<f64>) -> f64 {
    let mut s = 0.0;
    for (&pi, &qi) in p.iter().zip(q.iter()) {
        // Tiny mass counts as zero to avoid spurious +∞ from float noise.
        if pi <= 1e-300 {
            s += qi;
            continue;
        }
        if qi <= 0.0 {
            return f64::INFINITY;
        }
        s += pi * (pi / qi).ln() - pi + qi;
    }
    s
}

/// <C,P> + ε KL(P ‖ R) + ρ KL(P1 ‖ a) + ρ KL(Pᵀ1 ‖ b)
fn primal_objective(
    plan: &Array2<f64>,
    a: &Array1<f64>,
    b: &Array1<f64>,
    cost: &Array2<f64>,
    reg: f64,
    rho: f64,
    reference: Reference,
) -> f64 {
    let transport_cost: f64 = cost.iter().zip(plan.iter()).map(|(&c, &p)| c * p).sum();

    let mut kl_plan = 0.0;
    for ((i, j), &pij) in plan.indexed_iter() {
        let rij = match reference {
            Reference::Product => a[i] * b[j],
            Reference::Uniform => 1.0,
        };
        if pij <= 1e-300 {
            kl_plan += rij;
            continue;
        }
        kl_plan += pij * (pij / rij).ln() - pij + rij;
    }

    let row = plan.sum_axis(Axis(1));
    let col = plan.sum_axis(Axis(0));

    transport_cost + reg * kl_plan + rho * (kl_mass(&row, a) + kl_mass(&col, b))
}
