use std::{
    fs, io,
    path::{Path, PathBuf},
};

use maw_core::{InvalidTuning, Tuning};
use thiserror::Error;

/// Failure to load a tuning file.
#[derive(Debug, Error)]
pub(crate) enum TuningError {
    /// The file could not be read.
    #[error("failed to read tuning file {path}")]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file is not valid tuning TOML.
    #[error("failed to parse tuning file {path}")]
    Parse {
        /// File that was requested.
        path: PathBuf,
        /// Underlying TOML failure.
        #[source]
        source: toml::de::Error,
    },
    /// The file parses but holds a value the simulation cannot run with.
    #[error("invalid tuning file {path}")]
    Invalid {
        /// File that was requested.
        path: PathBuf,
        /// Offending value.
        #[source]
        source: InvalidTuning,
    },
}

/// Reads a partial tuning file; values it omits keep their defaults.
pub(crate) fn load(path: &Path) -> Result<Tuning, TuningError> {
    let contents = fs::read_to_string(path).map_err(|source| TuningError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let tuning = parse(&contents).map_err(|source| TuningError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tuning.validate().map_err(|source| TuningError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(tuning)
}

fn parse(contents: &str) -> Result<Tuning, toml::de::Error> {
    toml::from_str(contents)
}
