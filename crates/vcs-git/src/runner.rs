//! Process execution
//!
//! [`CommandRunner`] is the seam between building an invocation and running
//! it. [`SystemRunner`] spawns real processes; tests substitute a runner that
//! records invocations and replays scripted output.

use std::borrow::Cow;
use std::io::{self, Read};
use std::process::{Command, Output, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::command::Invocation;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Captured result of a finished process.
///
/// Streams are kept as the raw bytes the process wrote.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    /// Exit code, `-1` when the process was terminated without one
    pub exit_code: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Output standing in for a process that could not be started.
    pub fn spawn_failure(error: &io::Error) -> Self {
        Self {
            exit_code: -1,
            stdout: Vec::new(),
            stderr: error.to_string().into_bytes(),
        }
    }

    /// Stdout decoded as UTF-8, invalid sequences replaced.
    pub fn stdout_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }
}

impl From<Output> for ProcessOutput {
    fn from(output: Output) -> Self {
        Self {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }
}

/// Runs an [`Invocation`] to completion.
pub trait CommandRunner: Send + Sync {
    /// Run the invocation and capture its output.
    ///
    /// A non-zero exit is not an error at this level. `Err` means the process
    /// could not be run at all, or (kind [`io::ErrorKind::TimedOut`]) that it
    /// outlived the invocation's timeout and was killed.
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput>;
}

/// Spawns the invocation as a child process and waits for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        let mut cmd = Command::new(invocation.program());
        cmd.args(invocation.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = invocation.current_dir() {
            cmd.current_dir(dir);
        }

        match invocation.timeout() {
            None => cmd.output().map(ProcessOutput::from),
            Some(timeout) => run_with_timeout(cmd, timeout),
        }
    }
}

fn run_with_timeout(mut cmd: Command, timeout: Duration) -> io::Result<ProcessOutput> {
    let mut child = cmd.spawn()?;

    // Drain both pipes concurrently so a chatty child cannot fill one and stall.
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let deadline = Instant::now() + timeout;
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            if let Err(e) = child.kill() {
                tracing::warn!(error = %e, "Failed to kill timed out process");
            }
            child.wait()?;
            // The drain threads are not joined. They finish once every holder
            // of the pipes exits, which may be a grandchild outliving `child`.
            return Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("process did not exit within {:?}", timeout),
            ));
        }
        thread::sleep(POLL_INTERVAL);
    };

    Ok(ProcessOutput {
        exit_code: status.code().unwrap_or(-1),
        stdout: collect(stdout)?,
        stderr: collect(stderr)?,
    })
}

fn drain<R>(pipe: Option<R>) -> JoinHandle<io::Result<Vec<u8>>>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf)?;
        }
        Ok(buf)
    })
}

fn collect(reader: JoinHandle<io::Result<Vec<u8>>>) -> io::Result<Vec<u8>> {
    reader
        .join()
        .map_err(|_| io::Error::other("output reader thread panicked"))?
}
