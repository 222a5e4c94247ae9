//! Restore command handler

use super::utils::{load_adapters, load_object};
use crate::cli::RestoreArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use model_adapter_core::Model;
use serde_json::Value;
use tracing::info;

/// Handle the restore command
pub fn handle_restore(args: RestoreArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::new("restore");

    if matches!(args.path.as_deref(), Some(path) if path.trim().is_empty()) {
        return Err(Error::invalid_args("--path must name a source path"));
    }

    let adapters = load_adapters(&args.adapters)?;
    let fields = load_object(&args.model)?;
    let copy = config.adapter.copy && !args.no_copy;

    let model = Model::hydrate(adapters, fields, copy);
    info!(fields = model.fields().len(), copy, "Restoring model");

    match args.path {
        Some(path) => {
            let value = model.restore_at(&path)?;
            if value.is_none() {
                output.warning(&format!("nothing restored at '{}'", path))?;
            }
            output.data(&value.unwrap_or(Value::Null))
        }
        None => output.data(&model.restore()?),
    }
}
