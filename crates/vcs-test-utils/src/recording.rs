//! In-memory stand-ins for the process runner and the log sink.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use vcs_git::{CommandRunner, Configuration, Invocation, LogSink, ProcessOutput, RepositoryHandle};

/// Records every invocation and replays queued results in order.
///
/// Once the queue is empty every run succeeds with empty output.
#[derive(Default)]
pub struct RecordingRunner {
    invocations: Mutex<Vec<Invocation>>,
    responses: Mutex<VecDeque<io::Result<ProcessOutput>>>,
}

impl RecordingRunner {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a successful run printing `stdout`.
    pub fn push_stdout(&self, stdout: &str) {
        self.push_output(ProcessOutput {
            exit_code: 0,
            stdout: stdout.as_bytes().to_vec(),
            stderr: Vec::new(),
        });
    }

    /// Queue a failed run with the given exit code and streams.
    pub fn push_failure(&self, exit_code: i32, stdout: &str, stderr: &str) {
        self.push_output(ProcessOutput {
            exit_code,
            stdout: stdout.as_bytes().to_vec(),
            stderr: stderr.as_bytes().to_vec(),
        });
    }

    pub fn push_output(&self, output: ProcessOutput) {
        self.push_result(Ok(output));
    }

    pub fn push_result(&self, result: io::Result<ProcessOutput>) {
        self.responses.lock().unwrap().push_back(result);
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }

    /// The recorded argument vectors, lossily converted to strings.
    pub fn argvs(&self) -> Vec<Vec<String>> {
        self.invocations()
            .iter()
            .map(Invocation::argv_lossy)
            .collect()
    }

    /// The single recorded argument vector.
    ///
    /// # Panics
    /// Panics unless exactly one invocation was recorded.
    pub fn only_argv(&self) -> Vec<String> {
        let argvs = self.argvs();
        assert_eq!(argvs.len(), 1, "expected one invocation, got {argvs:?}");
        argvs.into_iter().next().unwrap()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        self.invocations.lock().unwrap().push(invocation.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ProcessOutput::default()))
    }
}

/// Keeps every logged message.
#[derive(Default)]
pub struct MemorySink {
    messages: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl LogSink for MemorySink {
    fn debug(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// A handle at `path` wired to a fresh recording runner and memory sink.
///
/// `configure` adjusts the configuration before it is shared.
pub fn recorded_handle(
    path: &str,
    configure: impl FnOnce(&mut Configuration),
) -> (RepositoryHandle, Arc<RecordingRunner>, Arc<MemorySink>) {
    let runner = RecordingRunner::new();
    let sink = MemorySink::new();

    let mut config = Configuration::default().with_logger(sink.clone());
    configure(&mut config);

    let handle = RepositoryHandle::with_config(path, Arc::new(config)).with_runner(runner.clone());
    (handle, runner, sink)
}
