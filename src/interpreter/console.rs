use std::{cell::RefCell, collections::VecDeque, io::BufRead, rc::Rc};

use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Console that captures output lines and serves queued input lines.
///
/// Clones share the same buffers, so a host can keep one handle and give
/// the other to a `Context`.
#[derive(Debug, Clone, Default)]
pub struct BufferConsole {
    output: Rc<RefCell<Vec<String>>>,
    input:  Rc<RefCell<VecDeque<String>>>,
}

impl BufferConsole {
    /// An empty console with no pending input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A console that will answer `read()` with `lines`, in order.
    #[must_use]
    pub fn with_input<S: AsRef<str>>(lines: &[S]) -> Self {
        let console = Self::new();
        for line in lines {
            console.push_input(line.as_ref());
        }
        console
    }

    /// Queues one more input line.
    pub fn push_input(&self, line: &str) {
        self.input.borrow_mut().push_back(line.to_string());
    }

    /// Every line written so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.output.borrow().clone()
    }

    /// Everything written so far, one line per `print`.
    #[must_use]
    pub fn output(&self) -> String {
        self.output
            .borrow()
            .iter()
            .fold(String::new(), |mut acc, line| {
                acc.push_str(line);
                acc.push('\n');
                acc
            })
    }

    /// Forgets captured output.
    pub fn clear(&self) {
        self.output.borrow_mut().clear();
    }

    fn println(&self, msg: &str) {
        self.output.borrow_mut().push(msg.to_string());
    }

    fn read_line(&self) -> String {
        self.input.borrow_mut().pop_front().unwrap_or_default()
    }
}

/// Where `print` writes and `read` reads.
///
/// Uses enum dispatch; there are only two destinations.
#[derive(Debug, Clone, Default)]
pub enum Console {
    /// Process stdout and stdin.
    #[default]
    Stdout,
    /// In-memory buffers, for tests and embedding hosts.
    Buffer(BufferConsole),
}

impl Console {
    /// Writes `msg` followed by a line terminator.
    pub fn println(&self, msg: &str) {
        match self {
            Self::Stdout => println!("{msg}"),
            Self::Buffer(buffer) => buffer.println(msg),
        }
    }

    /// Reads one line without its terminator; an empty string when no
    /// input is left.
    ///
    /// # Errors
    /// `Io` if stdin cannot be read.
    pub fn read_line(&self, line: usize) -> EvalResult<String> {
        match self {
            Self::Stdout => {
                let mut buffer = String::new();
                std::io::stdin().lock()
                                .read_line(&mut buffer)
                                .map_err(|e| RuntimeError::Io { details: e.to_string(),
                                                                line })?;
                Ok(buffer.trim_end_matches(['\n', '\r']).to_string())
            },
            Self::Buffer(buffer) => Ok(buffer.read_line()),
        }
    }
}
