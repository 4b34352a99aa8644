use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};
use rep_coach_core::models::{FeedbackTone, FrameOverlay, SessionSnapshot};
use serde::Serialize;
use std::io::Write;

use crate::config::{OutputConfig, OutputFormat};

/// A JSON output line
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputRecord<'a> {
    Overlay(&'a FrameOverlay),
    Summary(&'a SessionSnapshot),
}

/// Writes overlays and the final summary in the configured format
pub struct OverlayPrinter<W: Write> {
    writer: W,
    format: OutputFormat,
    show_feedback: bool,
}

impl<W: Write> OverlayPrinter<W> {
    pub fn new(writer: W, config: &OutputConfig) -> Self {
        Self {
            writer,
            format: config.format,
            show_feedback: config.show_feedback,
        }
    }

    pub fn overlay(&mut self, overlay: &FrameOverlay) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.json_line(&OutputRecord::Overlay(overlay)),
            OutputFormat::Text => {
                let line = format_overlay_line(overlay, self.show_feedback);
                writeln!(self.writer, "{}", line).context("Failed to write overlay")
            }
        }
    }

    pub fn summary(&mut self, snapshot: &SessionSnapshot) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.json_line(&OutputRecord::Summary(snapshot)),
            OutputFormat::Text => {
                writeln!(self.writer, "{}", format_summary(snapshot))
                    .context("Failed to write summary")
            }
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn json_line(&mut self, record: &OutputRecord<'_>) -> Result<()> {
        let line = serde_json::to_string(record).context("Failed to serialize output")?;
        writeln!(self.writer, "{}", line).context("Failed to write output")
    }
}

fn toned(text: &str, tone: FeedbackTone) -> ColoredString {
    match tone {
        FeedbackTone::Positive => text.green(),
        FeedbackTone::Caution => text.yellow(),
        FeedbackTone::Critical => text.red(),
    }
}

/// The overlay's annotation lines folded onto one terminal line
pub fn format_overlay_line(overlay: &FrameOverlay, show_feedback: bool) -> String {
    let mut fields: Vec<String> = overlay.to_string().lines().map(str::to_string).collect();
    if let Some(score) = fields.get_mut(2) {
        *score = toned(score, overlay.tone()).to_string();
    }

    let mut line = format!("{:>8}ms  {}", overlay.timestamp_ms, fields.join("  "));
    if show_feedback {
        if let Some(feedback) = &overlay.feedback {
            line.push_str(&format!("  {}", toned(feedback, overlay.tone())));
        }
    }
    if overlay.rep_completed {
        line.push_str(&format!("  {}", format!("Rep {}!", overlay.rep_count).as_str().bold()));
    }
    line
}

pub fn format_summary(snapshot: &SessionSnapshot) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!("{}\n", "Session Summary".bold()));
    out.push_str("────────────────────────────────\n");
    out.push_str(&format!("Exercise:      {}\n", snapshot.exercise_name));
    out.push_str(&format!("Sets:          {}\n", snapshot.set_count));
    out.push_str(&format!("Reps (set):    {}\n", snapshot.rep_count));
    out.push_str(&format!("Reps (total):  {}\n", snapshot.total_rep_count));
    out.push_str(&format!("Avg rep time:  {:.2}s\n", snapshot.average_rep_duration));
    out.push_str(&format!(
        "Form score:    {}\n",
        toned(
            &format!("{}%", snapshot.form_score),
            FeedbackTone::from_score(snapshot.form_score)
        )
    ));
    out.push_str(&format!("Frames:        {}", snapshot.frames_processed));
    out
}
