use crate::float_types::Real;
use thiserror::Error;

/// Failure of a boolean operation on two solids.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BooleanError {
    /// One of the operands carries a NaN or infinite coordinate.
    #[error("boolean operand `{0}` has non-finite vertices")]
    NonFiniteOperand(&'static str),
    /// The BSP pass produced non-finite geometry.
    #[error("boolean result has non-finite vertices")]
    NonFiniteResult,
}

/// Rejected scene parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("inset radius must be positive (diameter {0})")]
    NonPositiveInsetRadius(Real),
    #[error("edge height must not be negative ({0})")]
    NegativeEdgeHeight(Real),
    #[error("base thickness must be positive ({0})")]
    NonPositiveBaseThickness(Real),
    #[error("magnet depth {depth} exceeds base thickness {base}")]
    MagnetTooDeep { depth: Real, base: Real },
    #[error("support {0} must be positive")]
    NonPositiveSupportDimension(&'static str),
    #[error("gap {0} is too wide for staggered rows to touch")]
    StaggerGapTooLarge(Real),
    #[error("no slots requested")]
    NoSlotsRequested,
    #[error("could not parse configuration: {0}")]
    Parse(String),
}

/// Top level error for tray generation.
#[derive(Debug, Error)]
pub enum TrayError {
    #[error(transparent)]
    Boolean(#[from] BooleanError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TrayError>;
