use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NumericsError {
    #[error("Vector length mismatch: left operand has {left} elements, right has {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Invalid argument for {0}: {1}")]
    InvalidArgument(String, String),

    #[error("Scalar division by zero: divisor {0} is below the epsilon threshold")]
    DivisionByZero(f64),
}
