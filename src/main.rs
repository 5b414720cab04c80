// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use applyview::replay::{self, ApplyRecord};
use applyview::{Diagnostic, Streams, cli, config, new_apply, ui};
use log::debug;
use std::sync::Arc;

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Resolve configuration from flags and environment
    let config = match config::build_render_config(&args, |name| std::env::var(name).ok()) {
        Ok(c) => c,
        Err(e) => {
            ui::print_error(&format!("Configuration error: {}", e));
            std::process::exit(1);
        }
    };

    let view = Arc::new(config.build_view(Streams::stdio()));
    let (apply, count) = new_apply(config.kind, config.options, view);

    // Load the recorded run
    let record: ApplyRecord = match replay::load_record(&config.input) {
        Ok(r) => r,
        Err(e) => {
            apply.diagnostics(&[Diagnostic::error("Unable to load apply record", Some(e))]);
            apply.help_prompt();
            std::process::exit(1);
        }
    };

    // Deliver lifecycle events through the view's hooks
    let hooks = apply.hooks();
    let summary = replay::replay(&record.events, &hooks, config.parallelism);
    debug!("Replayed {} events, {} failed resources, counts {:?}", summary.events, summary.failed.len(), count.counts());

    apply.diagnostics(&record.diagnostics);

    // A failed run reports its errors instead of a summary
    let failures: Vec<Diagnostic> = summary.failed.iter().map(|f| f.to_diagnostic()).collect();
    if !failures.is_empty() || record.diagnostics.iter().any(Diagnostic::is_error) {
        apply.diagnostics(&failures);
        std::process::exit(1);
    }

    apply.resource_count();
    if !config.options.destroy {
        apply.outputs(&record.outputs);
    }
}
