//! Manual text-entry fallback
//!
//! Used when the execution environment has no speech recognition
//! capability: the gateway degrades to prompting for a typed reply instead
//! of silently hanging.

use async_trait::async_trait;
use carvoice_core::{ManualEntry, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Reads replies from standard input
#[derive(Debug, Default)]
pub struct StdinEntry;

impl StdinEntry {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ManualEntry for StdinEntry {
    async fn read_reply(&self, prompt: &str) -> Result<String> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(prompt.as_bytes()).await?;
        stdout.write_all(b" ").await?;
        stdout.flush().await?;

        let mut line = String::new();
        let mut reader = BufReader::new(tokio::io::stdin());
        reader.read_line(&mut line).await?;
        Ok(line.trim().to_string())
    }
}
