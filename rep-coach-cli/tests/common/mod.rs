// Pose stream fixtures for CLI tests
#![allow(dead_code)]

use serde_json::{json, Value};
use std::path::{Path, PathBuf};

const LANDMARKS: usize = 33;

fn point(x: f32, y: f32) -> Value {
    json!({ "x": x, "y": y, "confidence": 0.9 })
}

/// A push-up frame with arms either bent (about 45 degrees) or straight
pub fn pushup_frame(timestamp_ms: u64, bent: bool) -> String {
    let mut keypoints = vec![point(0.5, 0.5); LANDMARKS];

    for (shoulder, elbow, wrist, x) in [(11, 13, 15, 0.4f32), (12, 14, 16, 0.6f32)] {
        keypoints[shoulder] = point(x, 0.5);
        keypoints[elbow] = point(x, 0.65);
        keypoints[wrist] = if bent {
            point(x + 0.1, 0.55)
        } else {
            point(x, 0.8)
        };
    }
    keypoints[23] = point(0.75, 0.55);
    keypoints[24] = point(0.95, 0.55);

    json!({ "type": "frame", "timestamp_ms": timestamp_ms, "keypoints": keypoints }).to_string()
}

pub fn command(command: Value) -> String {
    json!({ "type": "command", "command": command }).to_string()
}

/// Write lines to `name` inside `dir`
pub fn write_stream(dir: &Path, name: &str, lines: &[String]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, lines.join("\n")).unwrap();
    path
}
