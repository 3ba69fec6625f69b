use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::Serialize;
use toolbar_logging::progress_info;
use toolbar_progress_core::{ProgressSettings, WidgetCall};
use toolbar_progress_engine::EngineHandle;

use crate::trace::Trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct Line {
    at_ms: u64,
    #[serde(flatten)]
    call: WidgetCall,
}

struct Printer<'a, W> {
    out: &'a mut W,
    format: OutputFormat,
    started: Instant,
    count: usize,
}

impl<W: Write> Printer<'_, W> {
    fn print(&mut self, call: WidgetCall) -> Result<()> {
        let at_ms = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);
        match self.format {
            OutputFormat::Text => {
                let text = match call {
                    WidgetCall::Start => "start".to_string(),
                    WidgetCall::SetProgress { progress } => format!("set_progress {progress:.3}"),
                    WidgetCall::Finish { animate } => format!("finish animate={animate}"),
                };
                writeln!(self.out, "{at_ms:>6}ms {text}")?;
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut *self.out, &Line { at_ms, call })?;
                writeln!(self.out)?;
            }
        }
        self.count += 1;
        Ok(())
    }

    /// Prints widget calls until `deadline`.
    fn drain_until(&mut self, engine: &EngineHandle, deadline: Instant) -> Result<()> {
        while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
            match engine.recv_timeout(remaining) {
                Some(call) => self.print(call)?,
                None => break,
            }
        }
        Ok(())
    }
}

/// Plays `trace` through a fresh engine and returns the number of widget calls printed.
pub fn replay<W: Write>(
    trace: &Trace,
    settings: ProgressSettings,
    out: &mut W,
    format: OutputFormat,
) -> Result<usize> {
    let engine = EngineHandle::spawn(settings).context("failed to start engine")?;
    let mut printer = Printer {
        out,
        format,
        started: Instant::now(),
        count: 0,
    };

    for (index, step) in trace.steps.iter().enumerate() {
        let deadline = Instant::now() + Duration::from_millis(step.after_ms);
        printer.drain_until(&engine, deadline)?;
        progress_info!("step {}: {:?}", index, step.command);
        engine
            .send(step.command.clone())
            .with_context(|| format!("step {index}"))?;
    }

    let deadline = Instant::now() + Duration::from_millis(trace.settle_ms);
    printer.drain_until(&engine, deadline)?;
    engine.shutdown();
    Ok(printer.count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(trace: &str, format: OutputFormat) -> (usize, String) {
        toolbar_logging::initialize_for_tests();
        let trace = Trace::from_ron_str(trace).unwrap();
        let mut out = Vec::new();
        let count = replay(&trace, ProgressSettings::default(), &mut out, format).unwrap();
        (count, String::from_utf8(out).unwrap())
    }

    const NAVIGATION: &str = r#"(
        settle_ms: 200,
        steps: [
            (command: Browser(OpenTab(id: 1, url: Some("https://example.com/"), select: true))),
            (command: Browser(StartNavigation(tab: 1, url: Some("https://example.com/a")))),
            (after_ms: 5, command: Browser(ReportProgress(tab: 1, progress: 0.5))),
            (after_ms: 5, command: Browser(StopLoading(tab: 1))),
        ],
    )"#;

    #[test]
    fn text_output_lists_widget_calls() {
        let (count, text) = run(NAVIGATION, OutputFormat::Text);
        let calls: Vec<&str> = text
            .lines()
            .map(|line| line.split_once("ms ").unwrap().1)
            .collect();
        assert_eq!(count, 5);
        assert_eq!(
            calls,
            vec![
                "start",
                "set_progress 0.050",
                "set_progress 0.500",
                "set_progress 1.000",
                "finish animate=true",
            ]
        );
    }

    #[test]
    fn json_output_is_one_object_per_line() {
        let (count, text) = run(NAVIGATION, OutputFormat::Json);
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), count);
        assert_eq!(lines[0]["call"], "start");
        assert_eq!(lines[4]["call"], "finish");
        assert_eq!(lines[4]["animate"], true);
        assert!(lines[4]["at_ms"].is_u64());
    }
}
