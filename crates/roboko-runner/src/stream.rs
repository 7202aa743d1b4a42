//! Chunked stdio framing.
//!
//! The upstream channel writes protocol lines and separates delivery
//! chunks with a blank line. Commands go back one per line as
//! `>{side} {choice}`.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

use roboko_types::{ChoiceLine, Side};

/// Reads blank-line-delimited chunks from a line stream.
#[derive(Debug)]
pub struct ChunkReader<R> {
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin> ChunkReader<R> {
    /// Wrap a buffered reader.
    pub fn new(reader: R) -> Self {
        Self { lines: reader.lines() }
    }

    /// Next non-empty chunk, or `None` at end of input. A trailing chunk
    /// with no terminating blank line is still returned.
    pub async fn next_chunk(&mut self) -> std::io::Result<Option<String>> {
        let mut chunk = String::new();
        while let Some(line) = self.lines.next_line().await? {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                if chunk.is_empty() {
                    continue;
                }
                return Ok(Some(chunk));
            }
            if !chunk.is_empty() {
                chunk.push('\n');
            }
            chunk.push_str(line);
        }
        Ok((!chunk.is_empty()).then_some(chunk))
    }
}

/// Write one command line and flush it.
pub async fn write_choice<W: AsyncWrite + Unpin>(
    writer: &mut W,
    side: Side,
    choice: &ChoiceLine,
) -> std::io::Result<()> {
    let line = format!(">{side} {choice}\n");
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await
}
