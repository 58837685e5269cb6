//! Tolerance defaults and the planner configuration.
//!
//! Policy
//! - Two epsilons, never mixed: `TIGHT_EPS` for exact containment and
//!   slope/vertical decisions, `COINCIDE_EPS` for deciding that two
//!   boundaries or nodes from different cells are the same place.
//! - Defaults are fixed constants; `PlanCfg` only exists so tests and the
//!   CLI can run controlled variations without touching call sites.

/// Exact containment threshold (kernel slope tests, strict clipping, locator).
pub const TIGHT_EPS: f64 = 1e-4;
/// Cross-cell coincidence threshold (ray clipping, boundary matching, node merge).
pub const COINCIDE_EPS: f64 = 1e-3;
/// Horizontal tilt of the vertical probes, matching the `(x, y)` sweep order.
pub const PROBE_SHEAR: f64 = 1e-6;
/// Far end of a cast ray; maps are expected to live well inside `±RAY_REACH`.
pub const RAY_REACH: f64 = 1e6;

/// Planner configuration (tolerances).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanCfg {
    pub eps_tight: f64,
    pub eps_coincide: f64,
    pub probe_shear: f64,
    pub ray_reach: f64,
}

impl Default for PlanCfg {
    fn default() -> Self {
        Self {
            eps_tight: TIGHT_EPS,
            eps_coincide: COINCIDE_EPS,
            probe_shear: PROBE_SHEAR,
            ray_reach: RAY_REACH,
        }
    }
}

impl PlanCfg {
    /// Same config with a different coincidence threshold.
    #[inline]
    pub fn with_coincide(self, eps_coincide: f64) -> Self {
        Self {
            eps_coincide,
            ..self
        }
    }
}
