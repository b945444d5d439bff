//! Process runner
//!
//! Launches one external command inside a project's runtime context and
//! streams its output back to the caller. Two reader tasks (stdout, stderr)
//! feed a bounded channel; the calling task drains it, polling the child in
//! between, and forwards every chunk to the progress callback in observation
//! order.
//!
//! The runner never returns an error. Every failure (non-zero exit, launch
//! failure, broken pipe) ends up as `false` plus exactly one call to the
//! error callback.

use crate::context::RuntimeContext;
use crate::error::{Error, Result};
use std::fmt;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

/// How long one wait for output may block before the child is polled again
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

const CHANNEL_CAPACITY: usize = 64;
const READ_BUFFER_SIZE: usize = 8 * 1024;

/// Stream a chunk was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

impl fmt::Display for OutputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("stdout"),
            Self::Stderr => f.write_str("stderr"),
        }
    }
}

/// Text read from one stream in one read
///
/// Chunk boundaries follow whatever the pipe delivered and are not aligned
/// to lines. `text` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputChunk {
    pub stream: OutputStream,
    pub text: String,
}

type ChunkCallback<'a> = Box<dyn FnMut(&OutputChunk) + 'a>;
type TextCallback<'a> = Box<dyn FnMut(&str) + 'a>;

/// Optional callbacks for a single run
///
/// - `on_progress`: every chunk, both streams, in observation order
/// - `on_complete`: once, with the accumulated output, when the exit code is zero
/// - `on_error`: once, with the accumulated output or a failure description
#[derive(Default)]
pub struct Callbacks<'a> {
    on_progress: Option<ChunkCallback<'a>>,
    on_complete: Option<TextCallback<'a>>,
    on_error: Option<TextCallback<'a>>,
}

impl<'a> Callbacks<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_progress(mut self, f: impl FnMut(&OutputChunk) + 'a) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }

    pub fn on_complete(mut self, f: impl FnMut(&str) + 'a) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn on_error(mut self, f: impl FnMut(&str) + 'a) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    fn progress(&mut self, chunk: &OutputChunk) {
        if let Some(f) = self.on_progress.as_mut() {
            f(chunk);
        }
    }

    fn complete(&mut self, output: &str) {
        if let Some(f) = self.on_complete.as_mut() {
            f(output);
        }
    }

    fn error(&mut self, message: &str) {
        if let Some(f) = self.on_error.as_mut() {
            f(message);
        }
    }
}

/// Runs external commands inside a project's runtime context
#[derive(Debug, Clone, Copy)]
pub struct ProcessRunner<'c> {
    context: &'c RuntimeContext,
}

impl<'c> ProcessRunner<'c> {
    pub fn new(context: &'c RuntimeContext) -> Self {
        Self { context }
    }

    /// Run `command` to completion
    ///
    /// Returns `true` iff the child exited with status zero after all of its
    /// output was drained.
    pub async fn run<S: AsRef<str>>(&self, command: &[S], mut callbacks: Callbacks<'_>) -> bool {
        let mut guard = ChildGuard::default();

        let success = match self.execute(command, &mut callbacks, &mut guard).await {
            Ok(success) => success,
            Err(e) => {
                let message = format!("Exception running command: {}", e);
                error!("{}", message);
                callbacks.error(&message);
                false
            }
        };

        guard.terminate();
        success
    }

    async fn execute<S: AsRef<str>>(
        &self,
        command: &[S],
        callbacks: &mut Callbacks<'_>,
        guard: &mut ChildGuard,
    ) -> Result<bool> {
        let argv: Vec<&str> = command.iter().map(|s| s.as_ref()).collect();
        let (program, args) = argv.split_first().ok_or(Error::EmptyCommand)?;
        debug!("Running command: {}", argv.join(" "));

        let mut cmd = Command::new(program);
        cmd.args(args)
            .current_dir(self.context.project_root())
            .env_clear()
            .envs(self.context.command_env())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let child = guard.adopt(cmd.spawn().map_err(|e| Error::spawn(*program, e))?);

        let (tx, mut rx) = mpsc::channel(CHANNEL_CAPACITY);
        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(pump(stdout, OutputStream::Stdout, tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(pump(stderr, OutputStream::Stderr, tx.clone()));
        }
        drop(tx);

        let mut output = String::new();
        if let Err(e) = read_output(child, &mut rx, callbacks, &mut output).await {
            error!("Error during output reading: {}", e);
            if let Err(kill_err) = child.start_kill() {
                warn!("Failed to kill child process: {}", kill_err);
            }
            return Err(e);
        }

        let status = child.wait().await?;
        debug!("Process completed with return code: {}", describe_status(&status));

        if status.success() {
            callbacks.complete(&output);
            Ok(true)
        } else {
            error!("Process failed with return code {}", describe_status(&status));
            callbacks.error(&output);
            Ok(false)
        }
    }
}

/// Event sent by a reader task
enum StreamEvent {
    Chunk(OutputChunk),
    Failed {
        stream: OutputStream,
        error: std::io::Error,
    },
}

/// Poll the child while forwarding output, then drain what is left
async fn read_output(
    child: &mut Child,
    rx: &mut mpsc::Receiver<StreamEvent>,
    callbacks: &mut Callbacks<'_>,
    output: &mut String,
) -> Result<()> {
    let mut streams_open = true;

    while child.try_wait()?.is_none() {
        match tokio::time::timeout(POLL_INTERVAL, rx.recv()).await {
            // No output yet
            Err(_) => continue,
            Ok(Some(StreamEvent::Chunk(chunk))) => forward(&chunk, callbacks, output),
            Ok(Some(StreamEvent::Failed { stream, error })) => {
                error!("Error reading output from {}: {}", stream, error);
                break;
            }
            Ok(None) => {
                streams_open = false;
                break;
            }
        }
    }

    // Output written between the last poll and exit
    if streams_open {
        while let Some(event) = rx.recv().await {
            match event {
                StreamEvent::Chunk(chunk) => forward(&chunk, callbacks, output),
                StreamEvent::Failed { stream, error } => {
                    return Err(Error::OutputRead {
                        stream: stream.to_string(),
                        source: error,
                    });
                }
            }
        }
    }

    Ok(())
}

fn forward(chunk: &OutputChunk, callbacks: &mut Callbacks<'_>, output: &mut String) {
    if chunk.text.is_empty() {
        return;
    }
    callbacks.progress(chunk);
    output.push_str(&chunk.text);
}

/// Read one stream until EOF, sending decoded chunks to the runner
async fn pump<R>(mut reader: R, stream: OutputStream, tx: mpsc::Sender<StreamEvent>)
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; READ_BUFFER_SIZE];
    let mut decoder = Utf8Decoder::default();

    loop {
        let text = match reader.read(&mut buf).await {
            Ok(0) => {
                let rest = decoder.finish();
                if !rest.is_empty() {
                    let _ = tx.send(StreamEvent::Chunk(OutputChunk { stream, text: rest })).await;
                }
                break;
            }
            Ok(n) => decoder.decode(&buf[..n]),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(error) => {
                let _ = tx.send(StreamEvent::Failed { stream, error }).await;
                break;
            }
        };

        if text.is_empty() {
            continue;
        }
        if tx
            .send(StreamEvent::Chunk(OutputChunk { stream, text }))
            .await
            .is_err()
        {
            // Runner stopped listening
            break;
        }
    }
}

/// Incremental UTF-8 decoder
///
/// A multi-byte character split across two reads is held back until the
/// rest of it arrives. Invalid bytes become U+FFFD.
#[derive(Debug, Default)]
struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    fn decode(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);
        let mut out = String::new();

        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(valid) => {
                    out.push_str(valid);
                    self.pending.clear();
                    break;
                }
                Err(e) => {
                    let valid_up_to = e.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&self.pending[..valid_up_to]));
                    match e.error_len() {
                        // Incomplete sequence at the end; wait for more bytes
                        None => {
                            self.pending.drain(..valid_up_to);
                            break;
                        }
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid_up_to + len);
                        }
                    }
                }
            }
        }

        out
    }

    fn finish(&mut self) -> String {
        let rest = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        rest
    }
}

/// Owns the child for the duration of a run and kills it if still running
#[derive(Debug, Default)]
struct ChildGuard {
    child: Option<Child>,
}

impl ChildGuard {
    fn adopt(&mut self, child: Child) -> &mut Child {
        self.child.insert(child)
    }

    /// Best-effort termination; failures are logged, never returned
    fn terminate(&mut self) {
        let Some(child) = self.child.as_mut() else {
            return;
        };

        match child.try_wait() {
            Ok(Some(_)) => {}
            Ok(None) => {
                if let Err(e) = child.start_kill() {
                    warn!("Failed to terminate child process: {}", e);
                }
            }
            Err(e) => warn!("Failed to query child process state: {}", e),
        }
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        self.terminate();
    }
}

fn describe_status(status: &ExitStatus) -> String {
    match status.code() {
        Some(code) => code.to_string(),
        None => status.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoder_passes_ascii_through() {
        let mut decoder = Utf8Decoder::default();
        assert_eq!(decoder.decode(b"Resolved 3 packages"), "Resolved 3 packages");
        assert_eq!(decoder.finish(), "");
    }

    #[test]
    fn test_decoder_holds_back_split_character() {
        let bytes = "ok ✅".as_bytes();
        let (head, tail) = bytes.split_at(bytes.len() - 1);

        let mut decoder = Utf8Decoder::default();
        assert_eq!(decoder.decode(head), "ok ");
        assert_eq!(decoder.decode(tail), "✅");
        assert_eq!(decoder.finish(), "");
    }

    #[test]
    fn test_decoder_replaces_invalid_bytes() {
        let mut decoder = Utf8Decoder::default();
        assert_eq!(decoder.decode(b"a\xffb"), "a\u{FFFD}b");
    }

    #[test]
    fn test_decoder_flushes_truncated_tail() {
        let mut decoder = Utf8Decoder::default();
        assert_eq!(decoder.decode(&[b'x', 0xE2, 0x9C]), "x");
        assert_eq!(decoder.finish(), "\u{FFFD}");
    }

    #[test]
    fn test_stream_display() {
        assert_eq!(OutputStream::Stdout.to_string(), "stdout");
        assert_eq!(OutputStream::Stderr.to_string(), "stderr");
    }

    #[test]
    fn test_forward_skips_empty_chunks() {
        let mut seen = Vec::new();
        let mut output = String::new();
        {
            let mut callbacks = Callbacks::new().on_progress(|c| seen.push(c.text.clone()));
            let empty = OutputChunk {
                stream: OutputStream::Stdout,
                text: String::new(),
            };
            let full = OutputChunk {
                stream: OutputStream::Stderr,
                text: "warn".to_string(),
            };
            forward(&empty, &mut callbacks, &mut output);
            forward(&full, &mut callbacks, &mut output);
        }
        assert_eq!(seen, vec!["warn"]);
        assert_eq!(output, "warn");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_guard_kills_running_child() {
        use std::os::unix::process::ExitStatusExt;

        let mut guard = ChildGuard::default();
        guard.adopt(Command::new("sleep").arg("30").spawn().unwrap());
        guard.terminate();

        let status = guard.child.as_mut().unwrap().wait().await.unwrap();
        assert!(!status.success());
        assert_eq!(status.signal(), Some(9));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_guard_ignores_exited_child() {
        let mut guard = ChildGuard::default();
        let child = guard.adopt(Command::new("true").spawn().unwrap());
        assert!(child.wait().await.unwrap().success());

        // Must not panic or kill anything
        guard.terminate();
        drop(guard);
    }
}
