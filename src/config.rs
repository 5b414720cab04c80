/// Configuration resolution module
///
/// This module handles:
/// - Building a RenderConfig from CLI arguments and the environment
/// - Resolving the view kind and the apply options
/// - Constructing the base view the apply view writes through
use crate::cli::CliArgs;
use crate::streams::Streams;
use crate::types::{ApplyOptions, ViewKind};
use crate::view::View;
use log::debug;
use std::path::PathBuf;

/// Set (to any non-empty value) when running under automation
pub const IN_AUTOMATION_ENV: &str = "TF_IN_AUTOMATION";
/// Set (to any non-empty value) to disable colours
pub const NO_COLOR_ENV: &str = "NO_COLOR";

/// Fully resolved, immutable rendering configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub input: PathBuf,
    pub kind: ViewKind,
    pub options: ApplyOptions,
    /// `Some(false)` forces colours off; `None` leaves it to terminal detection
    pub color: Option<bool>,
    pub console_width: Option<usize>,
    pub parallelism: usize,
    pub program: String,
}

/// Build a RenderConfig from CLI arguments, reading environment variables
/// through `env`.
pub fn build_render_config<F>(args: &CliArgs, env: F) -> Result<RenderConfig, String>
where
    F: Fn(&str) -> Option<String>,
{
    args.validate()?;

    let kind: ViewKind = args.view.parse()?;
    let env_set = |name: &str| env(name).is_some_and(|v| !v.is_empty());

    let in_automation = args.automation || env_set(IN_AUTOMATION_ENV);
    let color = if args.no_color || env_set(NO_COLOR_ENV) || kind == ViewKind::Json { Some(false) } else { None };

    debug!("Resolved view {} (destroy={}, in_automation={}, color={:?})", kind, args.destroy, in_automation, color);

    Ok(RenderConfig {
        input: args.input.clone(),
        kind,
        options: ApplyOptions { destroy: args.destroy, in_automation },
        color,
        console_width: args.console_width,
        parallelism: args.parallelism,
        program: args.program.clone(),
    })
}

impl RenderConfig {
    /// Wrap `streams` in a base view configured for this run
    pub fn build_view(&self, streams: Streams) -> View {
        let mut view = View::new(streams).with_program(self.program.clone());
        if let Some(color) = self.color {
            view = view.with_color(color);
        }
        if let Some(width) = self.console_width {
            view = view.with_width(width);
        }
        view
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
