pub mod convergence;
pub mod spectral;

pub use convergence::{Convergence, DefaultMonitor, Monitor, SolveStats};
pub use spectral::{estimate_rho_dinv_a, ritz_spectral_radius};
