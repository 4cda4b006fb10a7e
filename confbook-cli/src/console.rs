use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

/// Where the operator transcript goes. Cloned into every confirmation task.
#[derive(Clone, Debug)]
pub enum Output {
    Stdout,
    Buffer(Arc<Mutex<String>>),
}

impl Output {
    pub fn stdout() -> Self {
        Output::Stdout
    }

    pub fn buffer() -> Self {
        Output::Buffer(Arc::new(Mutex::new(String::new())))
    }

    /// Write `text` in one piece so concurrent banners never interleave
    pub fn print(&self, text: &str) {
        match self {
            Output::Stdout => {
                write_through(&mut io::stdout().lock(), text);
            }
            Output::Buffer(buf) => {
                let mut buf = buf.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                buf.push_str(text);
            }
        }
    }

    pub fn println(&self, line: &str) {
        self.print(&format!("{}\n", line));
    }

    /// Everything written so far. Always empty for stdout.
    pub fn contents(&self) -> String {
        match self {
            Output::Stdout => String::new(),
            Output::Buffer(buf) => buf
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clone(),
        }
    }
}

/// Write and flush, logging instead of failing when the terminal is gone
fn write_through(out: &mut impl Write, text: &str) -> bool {
    match out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to write console output: {}", e);
            false
        }
    }
}

/// Whitespace-separated tokens, which may share a line or span several.
pub struct TokenReader<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: AsyncBufRead + Unpin> TokenReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// `None` once the input is exhausted. Bytes that are not UTF-8 become U+FFFD.
    pub async fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }

            let mut line = Vec::new();
            if self.reader.read_until(b'\n', &mut line).await? == 0 {
                return Ok(None);
            }
            self.pending.extend(
                line.split(|b| b.is_ascii_whitespace())
                    .filter(|token| !token.is_empty())
                    .map(|token| String::from_utf8_lossy(token).into_owned()),
            );
        }
    }
}

pub struct Console<R> {
    tokens: TokenReader<R>,
    output: Output,
}

impl<R: AsyncBufRead + Unpin> Console<R> {
    pub fn new(reader: R, output: Output) -> Self {
        Self {
            tokens: TokenReader::new(reader),
            output,
        }
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    /// Print the prompt and wait for the next token
    pub async fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.output.print(prompt);
        self.tokens.next_token().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_tokens_span_lines() {
        let input = "John Doe\n\n   john@x.com\t10\nyes\n";
        let mut reader = TokenReader::new(input.as_bytes());

        let mut tokens = Vec::new();
        while let Some(token) = reader.next_token().await.unwrap() {
            tokens.push(token);
        }

        assert_eq!(tokens, vec!["John", "Doe", "john@x.com", "10", "yes"]);
    }

    #[tokio::test]
    async fn test_last_line_without_newline() {
        let mut reader = TokenReader::new("no".as_bytes());
        assert_eq!(reader.next_token().await.unwrap().as_deref(), Some("no"));
        assert_eq!(reader.next_token().await.unwrap(), None);
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn test_write_failure_is_reported_not_panicked() {
        assert!(!write_through(&mut ClosedPipe, "Enter your first name: "));

        let mut sink = Vec::new();
        assert!(write_through(&mut sink, "ok"));
        assert_eq!(sink, b"ok");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_replaced_not_fatal() {
        let input: &[u8] = b"Jos\xe9 Doe\nnext\n";
        let mut reader = TokenReader::new(input);

        assert_eq!(reader.next_token().await.unwrap().as_deref(), Some("Jos\u{FFFD}"));
        assert_eq!(reader.next_token().await.unwrap().as_deref(), Some("Doe"));
        assert_eq!(reader.next_token().await.unwrap().as_deref(), Some("next"));
        assert_eq!(reader.next_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_ask_prints_prompt() {
        let output = Output::buffer();
        let mut console = Console::new("Alice\n".as_bytes(), output.clone());

        let answer = console.ask("Enter your first name: ").await.unwrap();
        assert_eq!(answer.as_deref(), Some("Alice"));
        assert_eq!(output.contents(), "Enter your first name: ");

        assert_eq!(console.ask("Enter your last name: ").await.unwrap(), None);
    }
}
