/// Errors reported by [`BigNum`](crate::BigNum) operations and the lookup tables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BigNumError {
    #[error("digit buffer allocation of {requested} bytes failed")]
    Allocation { requested: usize },
    #[error("digit buffer too small: need {need}, got {got}")]
    Capacity { need: usize, got: usize },
    #[error("division by zero")]
    DivideByZero,
    #[error("divisor {0} is out of the lookup table range")]
    UnsupportedDivisor(u32),
    #[error("base {0} is not supported")]
    UnsupportedBase(u32),
    #[error("power table must hold at least one entry")]
    EmptyTable,
    #[error("bit {bit} is set but the power table only has {available} entries")]
    TableTooSmall { bit: usize, available: usize },
    #[error("empty digit literal")]
    EmptyLiteral,
    #[error("invalid digit {ch:?} at index {index}")]
    InvalidDigit { ch: char, index: usize },
}

pub type Result<T> = std::result::Result<T, BigNumError>;
