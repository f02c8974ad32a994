//! This module defines the storage of generated events
//!
//! Events are stored by batch, one momentum matrix per decay product, so that
//! kinematic computations can be carried out on whole columns at once.

use crate::{
    kinematics,
    momentum::{FourMomentumBatch, MomentumBatch, ScalarBatch},
    numeric::Float,
};

/// Batch of K⁰s → π⁺π⁻ events
///
/// Row `i` of both matrices holds the 3-momenta of the two pions of event `i`.
///
#[derive(Clone, Debug, PartialEq)]
pub struct TwoTrackBatch {
    /// π⁺ 3-momenta
    pub pi_plus: MomentumBatch,

    /// π⁻ 3-momenta
    pub pi_minus: MomentumBatch,
}
//
impl TwoTrackBatch {
    /// Build a batch from the momenta of both tracks
    pub fn new(pi_plus: MomentumBatch, pi_minus: MomentumBatch) -> Self {
        assert_eq!(
            pi_plus.nrows(),
            pi_minus.nrows(),
            "Both tracks should have the same number of events"
        );
        Self { pi_plus, pi_minus }
    }

    /// Number of events in the batch
    pub fn len(&self) -> usize {
        self.pi_plus.nrows()
    }

    /// Truth that the batch holds no event
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Split the batch back into its two tracks
    pub fn into_tracks(self) -> (MomentumBatch, MomentumBatch) {
        (self.pi_plus, self.pi_minus)
    }

    /// Total 3-momentum of each event
    pub fn total_momenta(&self) -> MomentumBatch {
        &self.pi_plus + &self.pi_minus
    }

    /// Total 4-momentum of each event, assuming both tracks have mass `mass`
    pub fn total_four_momenta(&self, mass: Float) -> FourMomentumBatch {
        kinematics::lift(&self.pi_plus, mass) + kinematics::lift(&self.pi_minus, mass)
    }

    /// Invariant mass of the track pair of each event
    pub fn invariant_masses(&self, mass: Float) -> ScalarBatch {
        kinematics::invariant_mass_batch(&self.total_four_momenta(mass))
    }

    /// Concatenate batches, preserving event order
    pub fn concat(batches: impl IntoIterator<Item = Self>) -> Self {
        let batches = batches.into_iter().collect::<Vec<_>>();
        let num_events = batches.iter().map(Self::len).sum();
        let mut pi_plus = MomentumBatch::zeros(num_events);
        let mut pi_minus = MomentumBatch::zeros(num_events);
        let mut offset = 0;
        for batch in batches {
            let len = batch.len();
            pi_plus.rows_mut(offset, len).copy_from(&batch.pi_plus);
            pi_minus.rows_mut(offset, len).copy_from(&batch.pi_minus);
            offset += len;
        }
        Self { pi_plus, pi_minus }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(rows: &[[Float; 3]]) -> TwoTrackBatch {
        let pi_plus = MomentumBatch::from_fn(rows.len(), |row, coord| rows[row][coord]);
        TwoTrackBatch::new(pi_plus.clone(), -pi_plus)
    }

    #[test]
    fn concat_preserves_order() {
        let first = batch(&[[1., 2., 3.]]);
        let second = batch(&[[4., 5., 6.], [7., 8., 9.]]);
        let merged = TwoTrackBatch::concat([first, second.clone()]);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.pi_plus[(0, 2)], 3.);
        assert_eq!(merged.pi_plus.rows(1, 2), second.pi_plus);
        assert_eq!(merged.pi_minus[(2, 0)], -7.);
        assert!(TwoTrackBatch::concat(Vec::new()).is_empty());
    }

    #[test]
    fn total_momenta_of_back_to_back_tracks() {
        let events = batch(&[[1., 2., 3.], [-4., 0., 2.5]]);
        assert_eq!(events.total_momenta(), MomentumBatch::zeros(2));
    }

    #[test]
    #[should_panic]
    fn mismatched_tracks() {
        TwoTrackBatch::new(MomentumBatch::zeros(2), MomentumBatch::zeros(3));
    }
}
