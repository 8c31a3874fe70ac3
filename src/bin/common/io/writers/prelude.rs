use crate::common::{config::models::ScenarioOutput, helpers::CLIError};

/// Trait implemented by concrete output sinks (JSON, CSV) that persist scenario results.
pub trait OutputSink: Send {
    fn write(&mut self, outputs: &[ScenarioOutput]) -> Result<(), CLIError>;
}
