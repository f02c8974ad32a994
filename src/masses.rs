//! Rest masses of the particles involved in the simulated decay

use crate::numeric::Float;

use eyre::{bail, Error};

use std::str::FromStr;

/// Particles known to the generator
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Particle {
    /// Short-lived neutral kaon, the decaying parent
    KShort,

    /// Charged pion, either decay product
    ChargedPion,
}
//
impl FromStr for Particle {
    type Err = Error;

    /// Parse the usual particle names ("K0_S", "pi+", "pi-")
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "K0_S" => Ok(Self::KShort),
            "pi+" | "pi-" => Ok(Self::ChargedPion),
            _ => bail!("Unknown particle {name:?}"),
        }
    }
}

/// Rest masses of the simulated particles (MeV/c²)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MassTable {
    /// K⁰s mass
    pub k_short: Float,

    /// π± mass
    pub charged_pion: Float,
}
//
impl MassTable {
    /// Particle Data Group values
    pub const fn pdg() -> Self {
        Self {
            k_short: 497.611,
            charged_pion: 139.57018,
        }
    }

    /// Look up the rest mass of a particle
    pub fn mass(&self, particle: Particle) -> Float {
        match particle {
            Particle::KShort => self.k_short,
            Particle::ChargedPion => self.charged_pion,
        }
    }
}
//
impl Default for MassTable {
    fn default() -> Self {
        Self::pdg()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name() {
        let masses = MassTable::pdg();
        let k_short = "K0_S".parse::<Particle>().unwrap();
        assert_eq!(masses.mass(k_short), 497.611);
        for pion in ["pi+", "pi-"] {
            let pion = pion.parse::<Particle>().unwrap();
            assert_eq!(masses.mass(pion), 139.57018);
        }
        assert!("D0".parse::<Particle>().is_err());
    }
}
