//! Mechanism for loading and sharing the run configuration

use crate::{
    momentum::Momentum3,
    numeric::Float,
    random::DEFAULT_SEED,
    resolution::Covariance,
};

use eyre::{ensure, format_err, Result, WrapErr};
use nalgebra::Vector3;

use std::{fs, path::Path, str::FromStr};

/// Run configuration of the generator binary
#[derive(Clone, Debug, PartialEq)]
pub struct Configuration {
    /// Number of events to be generated
    pub num_events: usize,

    /// Seed of the random number generator
    pub seed: u64,

    /// Covariance of the momentum measurement error (MeV²)
    pub covariance: Covariance,

    /// K⁰s momentum in the lab frame (MeV), or None for the rest frame
    pub lab_momentum: Option<Momentum3>,

    /// Number of bins of the π⁺π⁻ mass histogram
    pub num_bins: usize,
}
//
impl Configuration {
    /// Load the configuration from a file and check it
    pub fn load(file_name: impl AsRef<Path>) -> Result<Self> {
        let file_name = file_name.as_ref();
        let config_str = fs::read_to_string(file_name)
            .wrap_err_with(|| format!("Failed to read {}", file_name.display()))?;
        Self::parse(&config_str)
    }

    /// Parse and check the contents of a configuration file
    pub fn parse(config_str: &str) -> Result<Self> {
        // We will iterate over the configuration items. These should be the
        // first non-whitespace chunk of text on each line, the rest of the
        // line being free-form commentary. We will ignore blank lines.
        let mut config_iter = config_str
            .lines()
            .filter_map(|line| line.split_whitespace().next());

        // This closure fetches the next configuration item, tagging it with
        // the name of the configuration field which it is supposed to fill to
        // ease error reporting, and handling unexpected end-of-file too.
        let mut next_item = |name: &'static str| -> Result<ConfigItem> {
            config_iter
                .next()
                .map(|data| ConfigItem::new(name, data))
                .ok_or_else(|| format_err!("Missing configuration of {}", name))
        };

        // Decode the configuration items into concrete values
        let num_events = next_item("num_events")?.parse::<usize>()?;
        let seed = next_item("seed")?.parse::<u64>()?;
        const COV_NAMES: [&str; 9] = [
            "cov_xx", "cov_xy", "cov_xz", "cov_yx", "cov_yy", "cov_yz", "cov_zx", "cov_zy",
            "cov_zz",
        ];
        let mut cov_entries = [0.; 9];
        for (entry, name) in cov_entries.iter_mut().zip(COV_NAMES) {
            *entry = next_item(name)?.parse::<Float>()?;
        }
        let lab_frame = next_item("lab_frame")?.parse_bool()?;
        let lab_momentum = Momentum3::new(
            next_item("p_x")?.parse::<Float>()?,
            next_item("p_y")?.parse::<Float>()?,
            next_item("p_z")?.parse::<Float>()?,
        );
        let num_bins = next_item("num_bins")?.parse::<usize>()?;

        let config = Configuration {
            num_events,
            seed,
            covariance: Covariance::from_row_slice(&cov_entries),
            lab_momentum: lab_frame.then_some(lab_momentum),
            num_bins,
        };

        // A sensible run must generate at least one event
        ensure!(config.num_events > 0, "Please generate at least one event");

        // The mass histogram must have somewhere to put its entries
        ensure!(config.num_bins > 0, "Please use at least one histogram bin");

        // If nothing bad occured, we can now return the configuration
        Ok(config)
    }

    /// Display the configuration
    pub fn print(&self) {
        println!("NEVENTS : {}", self.num_events);
        println!("SEED    : {}", self.seed);
        for row in self.covariance.row_iter() {
            println!("COV     : {} {} {}", row[0], row[1], row[2]);
        }
        match &self.lab_momentum {
            Some(p) => println!("PLAB    : {} {} {}", p[0], p[1], p[2]),
            None => println!("PLAB    : (rest frame)"),
        }
        println!("NBIN    : {}", self.num_bins);
    }
}
//
impl Default for Configuration {
    /// Settings of the π⁺π⁻ mass resolution diagnostic
    fn default() -> Self {
        Self {
            num_events: 10_000,
            seed: DEFAULT_SEED,
            covariance: Covariance::from_diagonal(&Vector3::new(3., 3., 5.)),
            lab_momentum: None,
            num_bins: 100,
        }
    }
}

/// A value from the configuration file, tagged with the struct field which it
/// is supposed to map for error reporting purposes.
struct ConfigItem<'data> {
    name: &'static str,
    data: &'data str,
}
//
impl<'data> ConfigItem<'data> {
    /// Build a config item from a struct field tag and raw iterator data
    fn new(name: &'static str, data: &'data str) -> Self {
        Self { name, data }
    }

    /// Parse this data using Rust's standard parsing logic
    fn parse<T: FromStr>(self) -> Result<T>
    where
        <T as FromStr>::Err: ::std::error::Error + Send + Sync + 'static,
    {
        self.data
            .parse::<T>()
            .wrap_err(format!("Could not parse configuration of {}", self.name))
    }

    /// Parse this data using special logic which also handles Fortran's bool
    /// syntax
    fn parse_bool(self) -> Result<bool> {
        match self.data.to_lowercase().as_str() {
            // Handle FORTRAN booleans as a special case
            ".true." => Ok(true),
            ".false." => Ok(false),
            // Delegate other booleans to the standard Rust parser
            _ => self.parse::<bool>(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = "
        20000     num_events
        42        seed

        3.        cov_xx
        0.5       cov_xy
        0.        cov_xz
        0.5       cov_yx
        3.        cov_yy
        0.        cov_yz
        0.        cov_zx
        0.        cov_zy
        5.        cov_zz

        .TRUE.    lab_frame
        100.      p_x
        -20.5     p_y
        1e3       p_z
        50        num_bins
    ";

    #[test]
    fn parse_full_config() {
        let config = Configuration::parse(CONFIG).unwrap();
        assert_eq!(config.num_events, 20_000);
        assert_eq!(config.seed, 42);
        assert_eq!(config.covariance[(0, 1)], 0.5);
        assert_eq!(config.covariance[(2, 2)], 5.);
        assert_eq!(config.lab_momentum, Some(Momentum3::new(100., -20.5, 1000.)));
        assert_eq!(config.num_bins, 50);
    }

    #[test]
    fn rest_frame_config() {
        let config = Configuration::parse(&CONFIG.replace(".TRUE.", "false")).unwrap();
        assert_eq!(config.lab_momentum, None);
    }

    #[test]
    fn missing_item() {
        let truncated = CONFIG.lines().take(8).collect::<Vec<_>>().join("\n");
        let error = Configuration::parse(&truncated).unwrap_err();
        assert!(error.to_string().contains("cov_yy"), "{error}");
    }

    #[test]
    fn invalid_values() {
        let error = Configuration::parse(&CONFIG.replace("42 ", "-1 ")).unwrap_err();
        assert!(error.to_string().contains("seed"), "{error}");
        assert!(Configuration::parse(&CONFIG.replace("20000", "0")).is_err());
        assert!(Configuration::parse(&CONFIG.replace(".TRUE.", "maybe")).is_err());
    }

    #[test]
    fn default_config() {
        let config = Configuration::default();
        assert_eq!(config.num_events, 10_000);
        assert_eq!(config.covariance, Covariance::new(3., 0., 0., 0., 3., 0., 0., 0., 5.));
        assert_eq!(config.lab_momentum, None);
    }
}
