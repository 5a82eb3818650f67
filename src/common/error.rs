//! Error types for gridnav
//!
//! Only caller misuse is an error. An unsolvable query is an ordinary
//! outcome and is reported as `Ok(None)` by the planners.

use thiserror::Error;

use crate::common::types::GridPos;

/// Main error type for the planning engine
#[derive(Error, Debug)]
pub enum GridNavError {
    /// Grid with zero rows or columns
    #[error("Invalid grid dimensions: {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    /// Start or goal outside the grid
    #[error("Position {pos} is outside the {rows}x{cols} grid")]
    OutOfBounds { pos: GridPos, rows: usize, cols: usize },

    /// Start or goal placed on an obstacle cell
    #[error("Position {0} is an obstacle")]
    BlockedEndpoint(GridPos),

    /// Navmesh built from an obstacle layout that has since changed
    #[error("Navmesh is stale: grid obstacles changed since it was built")]
    StaleNavMesh,

    /// Malformed ASCII map
    #[error("Map parse error at line {line}: {msg}")]
    MapParse { line: usize, msg: String },

    /// Unrecognized algorithm identifier
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Unrecognized representation identifier
    #[error("Unknown representation: {0}")]
    UnknownRepresentation(String),

    /// Invalid or unparsable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for GridNavError {
    fn from(e: toml::de::Error) -> Self {
        GridNavError::Config(e.to_string())
    }
}

/// Result type alias for planning operations
pub type GridNavResult<T> = Result<T, GridNavError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GridNavError::OutOfBounds {
            pos: GridPos::new(12, 3),
            rows: 10,
            cols: 10,
        };
        assert_eq!(
            format!("{}", err),
            "Position (12, 3) is outside the 10x10 grid"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GridNavError = io_err.into();
        assert!(matches!(err, GridNavError::Io(_)));
    }

    #[test]
    fn test_error_from_toml() {
        let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: GridNavError = toml_err.into();
        assert!(matches!(err, GridNavError::Config(_)));
    }
}
