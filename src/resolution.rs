//! Detector resolution model: correlated Gaussian smearing of the measured
//! track momenta

use crate::{
    event::TwoTrackBatch,
    momentum::MomentumBatch,
    numeric::Float,
    random::RandomGenerator,
};

use eyre::ensure;
use nalgebra::{Matrix3, Vector3};
use prefix_num_ops::real::*;

/// Covariance matrix of the momentum measurement error (MeV²)
pub type Covariance = Matrix3<Float>;

/// Momentum measurement error model
///
/// Every measured 3-momentum receives an independent zero-mean multivariate
/// normal error with a fixed covariance matrix.
///
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    /// Covariance of the measurement error
    covariance: Covariance,

    /// Linear map from standard normal draws to measurement errors, such that
    /// `transform * transform^T == covariance`
    transform: Covariance,
}
//
impl Resolution {
    /// Set up the error model, checking that `covariance` is a valid
    /// covariance matrix (symmetric and positive semi-definite)
    pub fn new(covariance: Covariance) -> eyre::Result<Self> {
        ensure!(
            covariance.iter().all(|x| x.is_finite()),
            "Covariance matrix must be finite, got {covariance}"
        );
        let scale = covariance.amax();
        let tolerance = 16. * Float::EPSILON * scale;
        ensure!(
            (covariance - covariance.transpose()).amax() <= tolerance,
            "Covariance matrix must be symmetric, got {covariance}"
        );

        // Factor the covariance through its eigendecomposition rather than a
        // Cholesky decomposition, which would reject singular matrices
        let eigen = covariance.symmetric_eigen();
        ensure!(
            eigen.eigenvalues.min() >= -tolerance,
            "Covariance matrix must be positive semi-definite, got eigenvalues {}",
            eigen.eigenvalues.transpose()
        );
        let std_devs = eigen.eigenvalues.map(|var| sqrt(var.max(0.)));
        let transform = eigen.eigenvectors * Covariance::from_diagonal(&std_devs);

        Ok(Self {
            covariance,
            transform,
        })
    }

    /// Uncorrelated errors with the given standard deviation on each axis
    pub fn uncorrelated(std_devs: [Float; 3]) -> eyre::Result<Self> {
        let variances = std_devs.map(|sigma| sigma * sigma);
        Self::new(Covariance::from_diagonal(&Vector3::from(variances)))
    }

    /// Covariance of the measurement error
    pub fn covariance(&self) -> &Covariance {
        &self.covariance
    }

    /// Draw `count` independent measurement errors
    pub fn sample_noise(&self, count: usize, rng: &mut RandomGenerator) -> MomentumBatch {
        let normal = MomentumBatch::from_fn(count, |_, _| rng.standard_normal());
        normal * self.transform.transpose()
    }

    /// Smear the track momenta of a batch of events
    ///
    /// The first N error draws go to the π⁺ tracks, the next N to the π⁻ ones.
    ///
    pub fn smear(&self, events: TwoTrackBatch, rng: &mut RandomGenerator) -> TwoTrackBatch {
        let num_events = events.len();
        let noise = self.sample_noise(2 * num_events, rng);
        let (mut pi_plus, mut pi_minus) = events.into_tracks();
        pi_plus += noise.rows(0, num_events);
        pi_minus += noise.rows(num_events, num_events);
        TwoTrackBatch::new(pi_plus, pi_minus)
    }
}

/// Smear two batches of track momenta with measurement errors of covariance
/// `covariance`
pub fn sample(
    pi_plus: MomentumBatch,
    pi_minus: MomentumBatch,
    covariance: &Covariance,
    rng: &mut RandomGenerator,
) -> eyre::Result<(MomentumBatch, MomentumBatch)> {
    ensure!(
        pi_plus.nrows() == pi_minus.nrows(),
        "Track batches differ in size ({} vs {})",
        pi_plus.nrows(),
        pi_minus.nrows()
    );
    let resolution = Resolution::new(*covariance)?;
    let events = TwoTrackBatch::new(pi_plus, pi_minus);
    Ok(resolution.smear(events, rng).into_tracks())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn transform_reproduces_covariance() {
        let covariance = Covariance::new(4., 1., 0.5, 1., 3., -0.2, 0.5, -0.2, 5.);
        let resolution = Resolution::new(covariance).unwrap();
        let product = resolution.transform * resolution.transform.transpose();
        assert_relative_eq!(product, covariance, epsilon = 1e-10, max_relative = 1e-10);
    }

    #[test]
    fn singular_covariance_is_accepted() {
        let resolution = Resolution::uncorrelated([1., 0., 2.]).unwrap();
        let noise = resolution.sample_noise(100, &mut RandomGenerator::new());
        assert!(noise.column(1).iter().all(|&x| x.abs() < 1e-6));
        assert!(noise.column(0).iter().any(|&x| x != 0.));
    }

    #[test]
    fn invalid_covariances() {
        let asymmetric = Covariance::new(1., 0.5, 0., 0., 1., 0., 0., 0., 1.);
        assert!(Resolution::new(asymmetric).is_err());
        let indefinite = Covariance::new(1., 2., 0., 2., 1., 0., 0., 0., 1.);
        assert!(Resolution::new(indefinite).is_err());
        let mut infinite = Covariance::identity();
        infinite[(2, 2)] = Float::INFINITY;
        assert!(Resolution::new(infinite).is_err());
    }

    #[test]
    fn smearing_statistics() {
        const N: usize = 50_000;
        let covariance = Covariance::new(3., 0.5, 0., 0.5, 3., 1., 0., 1., 5.);
        let resolution = Resolution::new(covariance).unwrap();
        let raw = TwoTrackBatch::new(MomentumBatch::zeros(N), MomentumBatch::zeros(N));
        let smeared = resolution.smear(raw, &mut RandomGenerator::seeded(2024));
        for residuals in [&smeared.pi_plus, &smeared.pi_minus] {
            let mean = residuals.row_mean();
            assert_abs_diff_eq!(mean.norm(), 0., epsilon = 0.08);
            let centered = MomentumBatch::from_fn(N, |row, col| residuals[(row, col)] - mean[col]);
            let sample_cov = centered.transpose() * &centered / (N - 1) as Float;
            assert_abs_diff_eq!(sample_cov, covariance, epsilon = 0.15);
        }
    }

    #[test]
    fn mismatched_batches() {
        let mut rng = RandomGenerator::new();
        let covariance = Covariance::identity();
        let result = sample(MomentumBatch::zeros(2), MomentumBatch::zeros(1), &covariance, &mut rng);
        assert!(result.is_err());
    }
}
