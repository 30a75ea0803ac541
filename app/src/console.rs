//! Line-oriented operator console.
//!
//! Generic over any async reader/writer so the whole menu can be driven from
//! an in-memory script in tests.

use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Prompts and messages on a writer, answers from a reader.
#[derive(Debug)]
pub struct Console<R, W> {
    reader: R,
    writer: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Wrap a reader and a writer
    pub const fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Give back the writer (used by tests to inspect output)
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Write a full line.
    ///
    /// # Errors
    ///
    /// Returns the writer's I/O error.
    pub async fn say(&mut self, line: impl AsRef<str>) -> io::Result<()> {
        self.writer.write_all(line.as_ref().as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }

    /// Write `prompt` without a newline and read one trimmed line.
    ///
    /// Returns `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns the reader's or writer's I/O error.
    pub async fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.writer.write_all(prompt.as_bytes()).await?;
        self.writer.flush().await?;

        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompt until the operator enters a non-negative integer.
    ///
    /// Returns `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns the reader's or writer's I/O error.
    pub async fn prompt_number(&mut self, prompt: &str) -> io::Result<Option<u32>> {
        loop {
            let Some(answer) = self.prompt(prompt).await? else {
                return Ok(None);
            };
            match answer.parse::<u32>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => self.say("Invalid input. Please enter a number.").await?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::BufReader;

    fn console(input: &'static str) -> Console<BufReader<&'static [u8]>, Vec<u8>> {
        Console::new(BufReader::new(input.as_bytes()), Vec::new())
    }

    #[tokio::test]
    async fn prompt_trims_and_detects_end_of_input() {
        let mut console = console("  42 \n");
        assert_eq!(console.prompt("> ").await.ok().flatten(), Some("42".to_string()));
        assert_eq!(console.prompt("> ").await.ok().flatten(), None);
    }

    #[tokio::test]
    async fn prompt_number_retries_until_numeric() {
        let mut console = console("abc\n-3\n0\n");
        let value = console.prompt_number("Enter total tickets: ").await;
        assert_eq!(value.ok().flatten(), Some(0));

        let output = String::from_utf8(console.into_writer()).unwrap_or_default();
        assert_eq!(output.matches("Enter total tickets: ").count(), 3);
        assert_eq!(output.matches("Invalid input").count(), 2);
    }
}
