use std::fmt::Display;

use firebehavior::FireBehaviorError;
use itertools::Itertools;

#[derive(Debug)]
pub struct CLIError {
    msg: String,
}

impl From<String> for CLIError {
    fn from(msg: String) -> Self {
        CLIError { msg }
    }
}

impl From<CLIError> for String {
    fn from(value: CLIError) -> String {
        value.msg
    }
}

impl From<&str> for CLIError {
    fn from(msg: &str) -> Self {
        CLIError { msg: msg.into() }
    }
}

impl From<FireBehaviorError> for CLIError {
    fn from(err: FireBehaviorError) -> Self {
        CLIError {
            msg: format!("{}: {}", err.kind(), err),
        }
    }
}

impl Display for CLIError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.msg)
    }
}

impl std::error::Error for CLIError {}

/// Merge the errors of independent operations into a single one
pub fn extract_errors(prefix: &str, results: Vec<Result<(), CLIError>>) -> Result<(), CLIError> {
    let errors: Vec<String> = results
        .into_iter()
        .filter_map(Result::err)
        .map(String::from)
        .collect();

    if errors.is_empty() {
        return Ok(());
    }
    Err(format!("{prefix}: {}", errors.iter().join("; ")).into())
}
