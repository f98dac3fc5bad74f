//! Audio visualizer: bar heights streamed from a `cava` child process.
//!
//! `cava` is started with a throwaway config asking for raw ASCII output,
//! one line of `;`-separated heights per frame. A reader thread parses the
//! lines and forwards them to the UI thread over a bounded channel; frames
//! the UI is too slow to take are dropped.

use std::io::{self, BufRead, BufReader, Write};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, TryRecvError, TrySendError};
use std::thread;

use tempfile::NamedTempFile;

/// Binary spawned by default.
pub const CAVA: &str = "cava";

/// Highest bar value `cava` emits with this config.
const MAX_RANGE: u8 = 8;

const CAVA_CONFIG: &str = "\
[general]
bars = 80

[output]
method = raw
raw_target = /dev/stdout
data_format = ascii
ascii_max_range = 8

[raw]
bit_format = 8bit
";

const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

#[derive(Debug, thiserror::Error)]
pub enum VisualizerError {
    #[error("failed to write visualizer config: {0}")]
    Config(#[source] io::Error),

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{0} has no stdout")]
    NoStdout(String),
}

/// A running visualizer. Kills the child and removes its config on drop.
pub struct Visualizer {
    child: Child,
    rx: Receiver<Vec<u8>>,
    // Held so the file outlives the child; deleted on drop.
    _config: NamedTempFile,
}

impl Visualizer {
    /// Start `program -p <config>` and begin reading its output.
    pub fn spawn(program: &str) -> Result<Self, VisualizerError> {
        let mut config = NamedTempFile::new().map_err(VisualizerError::Config)?;
        config
            .write_all(CAVA_CONFIG.as_bytes())
            .and_then(|()| config.flush())
            .map_err(VisualizerError::Config)?;

        let mut child = Command::new(program)
            .arg("-p")
            .arg(config.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| VisualizerError::Spawn {
                program: program.to_string(),
                source,
            })?;

        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(VisualizerError::NoStdout(program.to_string()));
        };

        let (tx, rx) = mpsc::sync_channel(1);
        let spawned = thread::Builder::new()
            .name("visualizer".into())
            .spawn(move || {
                for line in BufReader::new(stdout).lines() {
                    let Ok(line) = line else { break };
                    let bars = parse_bars(&line);
                    if bars.is_empty() {
                        continue;
                    }
                    match tx.try_send(bars) {
                        Ok(()) | Err(TrySendError::Full(_)) => {}
                        Err(TrySendError::Disconnected(_)) => break,
                    }
                }
                tracing::debug!("visualizer output ended");
            });
        if let Err(source) = spawned {
            let _ = child.kill();
            let _ = child.wait();
            return Err(VisualizerError::Spawn {
                program: program.to_string(),
                source,
            });
        }

        tracing::info!(program, "visualizer started");
        Ok(Self {
            child,
            rx,
            _config: config,
        })
    }

    /// The newest frame since the last call, if any.
    pub fn latest(&self) -> Option<Vec<u8>> {
        let mut latest = None;
        loop {
            match self.rx.try_recv() {
                Ok(bars) => latest = Some(bars),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return latest,
            }
        }
    }
}

impl Drop for Visualizer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Parse one raw output line: `3;0;7;12;` → `[3, 0, 7, 8]`.
///
/// Non-numeric fields are skipped and values are clamped to the range.
pub fn parse_bars(line: &str) -> Vec<u8> {
    line.trim()
        .split(';')
        .filter_map(|field| field.trim().parse::<u32>().ok())
        .map(|v| u8::try_from(v.min(u32::from(MAX_RANGE))).unwrap_or(MAX_RANGE))
        .collect()
}

/// One block glyph per bar.
pub fn render_bars(bars: &[u8]) -> String {
    bars.iter()
        .map(|&v| BLOCKS[usize::from(v).min(BLOCKS.len() - 1)])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::{Duration, Instant};

    #[test]
    fn parses_semicolon_separated_heights() {
        assert_eq!(parse_bars("3;0;7;8;\n"), vec![3, 0, 7, 8]);
    }

    #[test]
    fn skips_junk_and_clamps() {
        assert_eq!(parse_bars("1;x;;42;-1"), vec![1, 8]);
        assert!(parse_bars("").is_empty());
    }

    #[test]
    fn renders_blocks() {
        assert_eq!(render_bars(&[0, 3, 7, 8]), "▁▄██");
        assert_eq!(render_bars(&[]), "");
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let err = Visualizer::spawn("definitely-not-a-real-visualizer-binary").err();
        assert!(matches!(err, Some(VisualizerError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn streams_frames_then_cleans_up_on_drop() {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use std::path::PathBuf;

        let dir = tempfile::TempDir::new().unwrap();
        let script = dir.path().join("fake-cava");
        let config_record = dir.path().join("config-path");
        let pid_record = dir.path().join("pid");
        fs::write(
            &script,
            format!(
                "#!/bin/sh\necho \"$2\" > '{}'\necho $$ > '{}'\necho '1;2;3;'\nexec sleep 30\n",
                config_record.display(),
                pid_record.display(),
            ),
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let visualizer = Visualizer::spawn(script.to_str().unwrap()).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut frame = None;
        while frame.is_none() && Instant::now() < deadline {
            frame = visualizer.latest();
            thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(frame, Some(vec![1, 2, 3]));

        // The frame is echoed after both records are written.
        let config_path = PathBuf::from(fs::read_to_string(&config_record).unwrap().trim());
        let pid = fs::read_to_string(&pid_record).unwrap().trim().to_string();
        assert!(config_path.exists());
        assert!(fs::read_to_string(&config_path).unwrap().contains("method = raw"));

        drop(visualizer);

        assert!(!config_path.exists());
        let alive = Command::new("kill")
            .args(["-0", &pid])
            .stderr(Stdio::null())
            .status()
            .unwrap();
        assert!(!alive.success(), "visualizer child {pid} still running");
    }
}
