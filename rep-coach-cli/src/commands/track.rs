use anyhow::{Context, Result};
use clap::Args;
use rep_coach_core::models::SessionSnapshot;
use rep_coach_core::WorkoutSession;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::config::{Config, OutputFormat};
use crate::input::{parse_bytes, InputError, TrackerInput};
use crate::output::OverlayPrinter;

/// Frames buffered between the reader and the tracking loop
const CHANNEL_CAPACITY: usize = 64;

#[derive(Args)]
pub struct TrackCommand {
    /// Exercise to track (see `rep-coach exercises`)
    #[arg(short, long, default_value = "pushup")]
    exercise: String,

    /// JSON-lines pose stream; reads stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

impl TrackCommand {
    pub async fn execute(self, config: Config) -> Result<()> {
        let mut output = config.output.clone();
        if let Some(format) = self.format {
            output.format = format;
        }

        let session = WorkoutSession::new(&self.exercise, &config.tracker)
            .with_context(|| format!("Cannot start tracking '{}'", self.exercise))?;

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let reader = match &self.input {
            Some(path) => {
                let file = tokio::fs::File::open(path)
                    .await
                    .with_context(|| format!("Failed to open {}", path.display()))?;
                tokio::spawn(read_inputs(BufReader::new(file), tx))
            }
            None => tokio::spawn(read_inputs(BufReader::new(tokio::io::stdin()), tx)),
        };

        let mut printer = OverlayPrinter::new(std::io::stdout(), &output);
        let snapshot = run_session(session, rx, &mut printer).await?;

        let lines = reader.await.context("Input reader stopped unexpectedly")??;
        tracing::debug!(lines, "input exhausted");

        printer.summary(&snapshot)?;
        Ok(())
    }
}

/// Parse the pose stream line by line and forward it to the tracking loop
///
/// Malformed or undecodable lines are logged and skipped; only a failing reader ends
/// the stream early. Returns the number of lines read.
pub async fn read_inputs<R>(mut reader: R, tx: mpsc::Sender<TrackerInput>) -> Result<usize, InputError>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let mut count = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        count += 1;
        match parse_bytes(count, &buf) {
            Ok(Some(input)) => {
                if tx.send(input).await.is_err() {
                    tracing::debug!("tracking loop closed, stopping reader");
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("{}", e),
        }
    }

    Ok(count)
}

/// Sole owner of the session: applies inputs in arrival order until the channel closes
pub async fn run_session<W: Write>(
    mut session: WorkoutSession,
    mut rx: mpsc::Receiver<TrackerInput>,
    printer: &mut OverlayPrinter<W>,
) -> Result<SessionSnapshot> {
    while let Some(input) = rx.recv().await {
        match input {
            TrackerInput::Frame(frame) => {
                let overlay = session.process_frame(&frame);
                printer.overlay(&overlay)?;
            }
            TrackerInput::Command { command } => {
                if let Err(e) = session.apply(command) {
                    tracing::warn!("Command rejected: {}", e);
                }
            }
        }
    }

    Ok(session.snapshot())
}
