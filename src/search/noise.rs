use crate::rng;
use rand_distr::{Distribution, Gamma};

/// Mix Dirichlet(alpha) noise into `priors`: `(1 - eps) * p + eps * noise`.
/// Leaves the priors untouched when alpha or eps disable it.
pub fn add_dirichlet_noise(priors: &mut [f32], alpha: f32, eps: f32) {
    if priors.is_empty() || alpha <= 0.0 || eps <= 0.0 { return; }
    let gamma = match Gamma::new(alpha as f64, 1.0) {
        Ok(g) => g,
        Err(_) => return,
    };
    let mut noise: Vec<f32> = rng::with_rng(|r| (0..priors.len()).map(|_| gamma.sample(r) as f32).collect());
    let sum: f32 = noise.iter().sum();
    if sum <= 0.0 { return; }
    for n in &mut noise { *n /= sum; }
    for (p, n) in priors.iter_mut().zip(noise) {
        *p = (1.0 - eps) * *p + eps * n;
    }
}
