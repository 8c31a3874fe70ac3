use std::{
    fs::{create_dir_all, File},
    io::BufWriter,
    path::PathBuf,
};

use log::debug;
use rayon::prelude::*;

use crate::common::{
    config::models::ScenarioOutput,
    helpers::{extract_errors, CLIError},
};

use super::prelude::OutputSink;

/// One pretty-printed JSON document per scenario, `{path}/{name}.json`
pub struct JsonWriter {
    path: PathBuf,
}

impl JsonWriter {
    pub fn new(path: &str) -> Self {
        Self {
            path: PathBuf::from(path),
        }
    }

    fn write_scenario(&self, output: &ScenarioOutput) -> Result<(), CLIError> {
        let file = self.path.join(format!("{}.json", output.name()));
        debug!("[JSON] Writing scenario {} to {:?}", output.name(), file);

        let handle = File::create(&file)
            .map_err(|err| format!("Cannot create file {}: error {err}", file.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(handle), output)
            .map_err(|err| format!("Cannot write file {}: error {err}", file.display()))?;

        debug!("[JSON] Done writing scenario {}", output.name());
        Ok(())
    }
}

impl OutputSink for JsonWriter {
    fn write(&mut self, outputs: &[ScenarioOutput]) -> Result<(), CLIError> {
        create_dir_all(&self.path).map_err(|err| {
            format!("Cannot create folder {}: error {err}", self.path.display())
        })?;

        let results: Vec<Result<(), CLIError>> = outputs
            .par_iter()
            .map(|output| self.write_scenario(output))
            .collect();

        extract_errors("JSON Errors", results)
    }
}
