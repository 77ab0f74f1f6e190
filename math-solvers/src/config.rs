//! JSON description of a linear system to solve
//!
//! ```json
//! {
//!   "structure": "tridiagonal",
//!   "arithmetic": "interval-double",
//!   "sub": ["1"], "diag": ["2", "2"], "sup": ["1"],
//!   "rhs": ["3", "3"]
//! }
//! ```
//!
//! Values are strings so that big decimals and `[lo;hi]` intervals survive
//! the trip through JSON unchanged.

use crate::error::{Result, SolverError};
use crate::traits::CroutField;
use clap::ValueEnum;
use math_crout_interval::{ArithmeticContext, Bound, RoundingMode};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Matrix structure, selecting the solver family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Structure {
    /// Any square matrix, `A = L·U`
    #[default]
    General,
    /// Symmetric matrix, `A = L·D·Lᵀ`
    Symmetric,
    /// Three bands, Thomas algorithm
    Tridiagonal,
}

/// Numeric representation used for the solve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Arithmetic {
    /// Hardware `f64`
    #[default]
    Double,
    /// Arbitrary-precision decimal
    Big,
    /// Intervals with `f64` endpoints
    IntervalDouble,
    /// Intervals with arbitrary-precision endpoints
    IntervalBig,
}

/// Rounding mode as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeChoice {
    /// Endpoints rounded to nearest
    Single,
    /// Endpoints rounded outward
    Dual,
}

impl From<ModeChoice> for RoundingMode {
    fn from(choice: ModeChoice) -> Self {
        match choice {
            ModeChoice::Single => RoundingMode::SingleInterval,
            ModeChoice::Dual => RoundingMode::DualInterval,
        }
    }
}

/// Complete system description loaded from JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Solver family
    #[serde(default)]
    pub structure: Structure,
    /// Numeric representation
    #[serde(default)]
    pub arithmetic: Arithmetic,
    /// Overrides for precision, output digits and rounding mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ArithmeticContext>,
    /// Matrix rows (general and symmetric)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matrix: Vec<Vec<String>>,
    /// Sub-diagonal, length `n-1` (tridiagonal)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub: Vec<String>,
    /// Main diagonal, length `n` (tridiagonal)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diag: Vec<String>,
    /// Super-diagonal, length `n-1` (tridiagonal)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sup: Vec<String>,
    /// Right-hand side
    pub rhs: Vec<String>,
}

/// A parsed system ready for one of the solver families
#[derive(Debug, Clone)]
pub enum LinearSystem<T: CroutField> {
    /// Square matrix and right-hand side
    Dense {
        /// Coefficient matrix
        a: Array2<T>,
        /// Right-hand side
        b: Array1<T>,
    },
    /// Three bands and right-hand side
    Banded {
        /// Sub-diagonal
        sub: Array1<T>,
        /// Main diagonal
        diag: Array1<T>,
        /// Super-diagonal
        sup: Array1<T>,
        /// Right-hand side
        b: Array1<T>,
    },
}

impl SystemConfig {
    /// Load configuration from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::result::Result<Self, String> {
        let contents =
            fs::read_to_string(path).map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_json(&contents)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> std::result::Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse JSON: {}", e))
    }

    /// Save configuration to JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> std::result::Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, json).map_err(|e| format!("Failed to write config file: {}", e))?;

        Ok(())
    }

    /// The configured context, or the defaults for endpoint backend `B`
    pub fn context_for<B: Bound>(&self) -> ArithmeticContext {
        self.context
            .clone()
            .unwrap_or_else(ArithmeticContext::initialize::<B>)
    }

    /// Parse every value into representation `T`
    pub fn system<T: CroutField>(&self, ctx: &T::Context) -> Result<LinearSystem<T>> {
        let b = parse_vector(&self.rhs, ctx)?;
        match self.structure {
            Structure::General | Structure::Symmetric => {
                let n = self.matrix.len();
                let mut a = Array2::from_elem((n, n), T::zero(ctx));
                for (i, row) in self.matrix.iter().enumerate() {
                    if row.len() != n {
                        return Err(SolverError::DimensionMismatch {
                            what: "matrix row",
                            expected: n,
                            got: row.len(),
                        });
                    }
                    for (j, text) in row.iter().enumerate() {
                        a[[i, j]] = T::parse_value(text, ctx)?;
                    }
                }
                Ok(LinearSystem::Dense { a, b })
            }
            Structure::Tridiagonal => Ok(LinearSystem::Banded {
                sub: parse_vector(&self.sub, ctx)?,
                diag: parse_vector(&self.diag, ctx)?,
                sup: parse_vector(&self.sup, ctx)?,
                b,
            }),
        }
    }
}

fn parse_vector<T: CroutField>(values: &[String], ctx: &T::Context) -> Result<Array1<T>> {
    values
        .iter()
        .map(|text| T::parse_value(text, ctx))
        .collect::<Result<Vec<T>>>()
        .map(Array1::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use math_crout_interval::{BigFloat, Interval};

    const TRIDIAGONAL: &str = r#"{
        "structure": "tridiagonal",
        "arithmetic": "interval-double",
        "sub": ["1"], "diag": ["2", "2"], "sup": ["1"],
        "rhs": ["3", "[2.5;3.5]"]
    }"#;

    #[test]
    fn test_from_json_defaults() {
        let config = SystemConfig::from_json(r#"{"matrix": [["1", "2"], ["3", "4"]], "rhs": ["1", "1"]}"#)
            .unwrap();
        assert_eq!(config.structure, Structure::General);
        assert_eq!(config.arithmetic, Arithmetic::Double);
        assert!(config.context.is_none());
        assert_eq!(config.context_for::<BigFloat>().precision, 40);
    }

    #[test]
    fn test_dense_system_parsing() {
        let config = SystemConfig {
            matrix: vec![
                vec!["4".to_string(), "1e0".to_string()],
                vec!["1".to_string(), "3".to_string()],
            ],
            rhs: vec!["1".to_string(), "2".to_string()],
            ..Default::default()
        };
        match config.system::<f64>(&()).unwrap() {
            LinearSystem::Dense { a, b } => {
                assert_relative_eq!(a[[0, 1]], 1.0);
                assert_relative_eq!(b[1], 2.0);
            }
            LinearSystem::Banded { .. } => panic!("expected a dense system"),
        }
    }

    #[test]
    fn test_ragged_matrix_rejected() {
        let config = SystemConfig {
            matrix: vec![vec!["1".to_string(), "2".to_string()], vec!["3".to_string()]],
            rhs: vec!["1".to_string(), "1".to_string()],
            ..Default::default()
        };
        let err = config.system::<f64>(&()).unwrap_err();
        assert!(err.is_dimension_error());
    }

    #[test]
    fn test_interval_bands() {
        let config = SystemConfig::from_json(TRIDIAGONAL).unwrap();
        assert_eq!(config.structure, Structure::Tridiagonal);
        assert_eq!(config.arithmetic, Arithmetic::IntervalDouble);

        let ctx = config.context_for::<f64>();
        match config.system::<Interval<f64>>(&ctx).unwrap() {
            LinearSystem::Banded { diag, b, .. } => {
                assert_eq!(diag.len(), 2);
                assert_eq!(*b[1].lo(), 2.5);
                assert_eq!(*b[1].hi(), 3.5);
            }
            LinearSystem::Dense { .. } => panic!("expected a banded system"),
        }
    }

    #[test]
    fn test_bad_value_is_parse_error() {
        let config = SystemConfig {
            matrix: vec![vec!["one".to_string()]],
            rhs: vec!["1".to_string()],
            ..Default::default()
        };
        assert!(config.system::<f64>(&()).unwrap_err().is_parse_error());
    }

    #[test]
    fn test_file_round_trip() {
        let config = SystemConfig::from_json(TRIDIAGONAL).unwrap();
        let path = std::env::temp_dir().join("crout_config_round_trip.json");
        config.to_file(&path).unwrap();
        let loaded = SystemConfig::from_file(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, config);
    }
}
