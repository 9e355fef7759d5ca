use std::io;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use netdiag_common::system::{CommandOutput, CommandRunner};

type Responder = dyn Fn(&str, &[String]) -> io::Result<CommandOutput> + Send + Sync;

/// Records every invocation and answers from a closure. Optionally holds each call for
/// a while and tracks how many calls overlapped.
pub struct RecordingRunner {
    respond: Box<Responder>,
    hold: Duration,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl RecordingRunner {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&str, &[String]) -> io::Result<CommandOutput> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            hold: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Every program exits with `code` and prints `stdout`.
    pub fn answering(code: i32, stdout: &'static str) -> Self {
        Self::new(move |_, _| Ok(exit(code, stdout)))
    }

    pub fn holding(mut self, hold: Duration) -> Self {
        self.hold = hold;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        self.calls.lock().unwrap().push(line);

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.hold.is_zero() {
            thread::sleep(self.hold);
        }
        let result = (self.respond)(program, args);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

pub fn exit(code: i32, stdout: &str) -> CommandOutput {
    CommandOutput {
        exit_code: Some(code),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}
