use std::io;
use std::sync::Mutex;

use netdiag_common::system::{CommandOutput, CommandRunner};

/// Answers every command with the same scripted response and records the calls.
pub struct ScriptedRunner {
    response: Box<dyn Fn(&str, &[String]) -> io::Result<CommandOutput> + Send + Sync>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new<F>(response: F) -> Self
    where
        F: Fn(&str, &[String]) -> io::Result<CommandOutput> + Send + Sync + 'static,
    {
        Self {
            response: Box::new(response),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn exiting(code: i32, stdout: &str) -> Self {
        let stdout = stdout.to_string();
        Self::new(move |_, _| Ok(output(code, &stdout)))
    }

    pub fn failing_to_launch() -> Self {
        Self::new(|program, _| {
            Err(io::Error::new(io::ErrorKind::NotFound, format!("{program}: not found")))
        })
    }

    /// Every invocation so far, rendered as `program arg arg ...`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        self.calls.lock().unwrap().push(line);
        (self.response)(program, args)
    }
}

pub fn output(code: i32, stdout: &str) -> CommandOutput {
    CommandOutput {
        exit_code: Some(code),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}
