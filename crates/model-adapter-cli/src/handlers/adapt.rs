//! Adapt command handler

use super::utils::{load_adapters, load_document};
use crate::cli::AdaptArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use model_adapter_core::{CollectingSink, Diagnostic, LiveModel, Model, SharedSink};
use std::sync::Arc;
use tracing::{debug, info};

/// Handle the adapt command
pub fn handle_adapt(args: AdaptArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::new("adapt");

    let adapters = load_adapters(&args.adapters)?;
    let source = args.source.as_deref().map(load_document).transpose()?;

    let sink = CollectingSink::new();
    let shared: SharedSink = Arc::new(sink.clone());

    if args.live {
        let defaults = args.defaults.as_deref().map(load_document).transpose()?;

        let mut builder = LiveModel::builder().adapters(adapters).diagnostics(shared);
        if let Some(source) = source {
            builder = builder.source(source);
        }
        if let Some(defaults) = defaults {
            builder = builder.defaults(defaults);
        }
        let model = builder.build();

        info!(bound = model.register().len(), "Built live model");
        output.data(&model.to_value()?)?;
    } else {
        let copy = config.adapter.copy && !args.no_copy;
        let model = Model::builder(adapters)
            .copy(copy)
            .diagnostics(shared)
            .build(source.as_ref())?;

        info!(fields = model.fields().len(), copy, "Adapted model");
        output.data(&model)?;
    }

    report_diagnostics(&sink.take(), args.show_diagnostics, output)
}

/// Print collected diagnostics, or a one-line hint when they were not requested
fn report_diagnostics(
    diagnostics: &[Diagnostic],
    show: bool,
    output: &mut OutputWriter,
) -> Result<()> {
    for diagnostic in diagnostics {
        debug!(key = diagnostic.key(), path = diagnostic.path(), "{}", diagnostic);
    }

    if show {
        output.diagnostics(diagnostics)
    } else if !diagnostics.is_empty() {
        output.warning(&format!(
            "{} validation diagnostic(s) reported; rerun with --show-diagnostics to list them",
            diagnostics.len()
        ))
    } else {
        Ok(())
    }
}
