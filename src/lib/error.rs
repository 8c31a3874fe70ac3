use std::fmt::Display;

/// Errors raised by the fire behavior models.
///
/// Every variant carries the message shown to the user; `Display` prints it verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum FireBehaviorError {
    /// a required argument is missing, not finite or of the wrong shape
    InvalidInput(String),
    /// a numeric argument lies outside its valid range
    OutOfRange(String),
    /// a well-formed argument would make the computation undefined
    DomainError(String),
    /// the fuel model identifier has no entry in the fuel model table
    UnknownFuelModel(String),
}

impl FireBehaviorError {
    pub fn message(&self) -> &str {
        match self {
            FireBehaviorError::InvalidInput(msg)
            | FireBehaviorError::OutOfRange(msg)
            | FireBehaviorError::DomainError(msg)
            | FireBehaviorError::UnknownFuelModel(msg) => msg,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FireBehaviorError::InvalidInput(_) => "InvalidInput",
            FireBehaviorError::OutOfRange(_) => "OutOfRange",
            FireBehaviorError::DomainError(_) => "DomainError",
            FireBehaviorError::UnknownFuelModel(_) => "UnknownFuelModel",
        }
    }
}

impl Display for FireBehaviorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for FireBehaviorError {}
