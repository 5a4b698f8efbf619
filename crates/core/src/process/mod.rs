// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process Supervisor (`spec.md` §4.4): spawns a resolved argv, pumps its
//! stdout/stderr through a bounded queue, decodes sentinel-framed structured
//! events, and feeds prompt answers back on stdin.

pub mod allowlist;

use std::collections::HashMap;
use std::process::Stdio;

use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::event::{Event, EventSink, OutputStream, EVENT_SENTINEL};

const QUEUE_CAPACITY: usize = 1000;
const POLL_INTERVAL: std::time::Duration = std::time::Duration::from_millis(100);

/// A line read from one of the child's output streams.
enum QueueItem {
    Line { stream: OutputStream, line: String },
    Closed { stream: OutputStream },
}

/// Synchronous callback that supplies an answer string when a `prompt`
/// event is observed (`spec.md` §4.12 `stdinProvider`).
pub trait StdinProvider: Send + Sync {
    fn provide(&self, prompt: &Event) -> Option<String>;
}

/// Run `argv` to completion, streaming output/events through `sink`.
/// Returns `true` iff the process exited with code 0.
pub async fn run(
    argv: &[String],
    env: &HashMap<String, String>,
    sink: &dyn EventSink,
    stdin_provider: Option<&dyn StdinProvider>,
    cancel: CancellationToken,
) -> bool {
    let Some(executable) = argv.first() else {
        sink.on_event(&Event::Error {
            kind: "Exception".to_owned(),
            message: "empty argv".to_owned(),
        });
        return false;
    };

    if let Err(rejection) = allowlist::check_executable(executable) {
        sink.on_output(&rejection, OutputStream::Stderr);
        return false;
    }

    let mut command = Command::new(executable);
    command.args(&argv[1..]);
    command.env("TERM", "dumb");
    for (key, value) in env {
        command.env(key, value);
    }
    command.stdin(Stdio::piped());
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());
    command.process_group(0);

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            sink.on_event(&Event::Error {
                kind: "FileNotFoundError".to_owned(),
                message: format!("{executable}: not found"),
            });
            return false;
        }
        Err(e) => {
            sink.on_event(&Event::Error { kind: "Exception".to_owned(), message: e.to_string() });
            return false;
        }
    };

    let pid = child.id();
    let (Some(stdout), Some(stderr), Some(mut stdin)) =
        (child.stdout.take(), child.stderr.take(), child.stdin.take())
    else {
        sink.on_event(&Event::Error {
            kind: "Exception".to_owned(),
            message: "child process was not spawned with piped stdio".to_owned(),
        });
        let _ = child.kill().await;
        return false;
    };

    let (tx, mut rx) = mpsc::channel(QUEUE_CAPACITY);
    tokio::spawn(pump_reader(stdout, OutputStream::Stdout, tx.clone()));
    tokio::spawn(pump_reader(stderr, OutputStream::Stderr, tx.clone()));
    drop(tx);

    let mut closed_streams = 0;
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                if let Some(pid) = pid {
                    kill_process_tree(pid);
                }
                sink.on_event(&Event::End { success: false, exit_code: Some(130) });
                let _ = child.kill().await;
                return false;
            }
            item = tokio::time::timeout(POLL_INTERVAL, rx.recv()) => {
                match item {
                    Ok(Some(QueueItem::Line { stream, line })) => {
                        handle_line(&line, stream, sink, stdin_provider, &mut stdin).await;
                    }
                    Ok(Some(QueueItem::Closed { .. })) => {
                        closed_streams += 1;
                        if closed_streams >= 2 {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(_elapsed) => {}
                }
            }
        }
    }

    while let Ok(item) = rx.try_recv() {
        if let QueueItem::Line { stream, line } = item {
            handle_line(&line, stream, sink, stdin_provider, &mut stdin).await;
        }
    }

    match child.wait().await {
        Ok(status) => {
            let code = status.code().unwrap_or(-1);
            let success = status.success();
            sink.on_event(&Event::End { success, exit_code: Some(code) });
            success
        }
        Err(e) => {
            sink.on_event(&Event::Error { kind: "Exception".to_owned(), message: e.to_string() });
            false
        }
    }
}

async fn handle_line(
    line: &str,
    stream: OutputStream,
    sink: &dyn EventSink,
    stdin_provider: Option<&dyn StdinProvider>,
    stdin: &mut tokio::process::ChildStdin,
) {
    if let Some(rest) = line.strip_prefix(EVENT_SENTINEL) {
        if let Ok(payload) = serde_json::from_str::<serde_json::Value>(rest) {
            if let Some(event) = Event::from_json(payload) {
                sink.on_event(&event);
                if event.is_prompt() {
                    if let Some(provider) = stdin_provider {
                        if let Some(answer) = provider.provide(&event) {
                            let _ = stdin.write_all(answer.as_bytes()).await;
                            let _ = stdin.write_all(b"\n").await;
                        }
                    }
                }
                return;
            }
        }
    }
    sink.on_output(line, stream);
}

async fn pump_reader(
    reader: impl tokio::io::AsyncRead + Unpin + Send + 'static,
    stream: OutputStream,
    tx: mpsc::Sender<QueueItem>,
) {
    let mut lines = BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if tx.send(QueueItem::Line { stream, line }).await.is_err() {
                    return;
                }
            }
            _ => {
                let _ = tx.send(QueueItem::Closed { stream }).await;
                return;
            }
        }
    }
}

/// Kill the child's entire process group. Requires the child to have been
/// spawned with `process_group(0)` (its own group, so killing the group
/// never reaches the supervisor itself).
fn kill_process_tree(pid: u32) {
    if let Ok(pid) = i32::try_from(pid) {
        let _ = signal::killpg(Pid::from_raw(pid), Signal::SIGKILL);
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
