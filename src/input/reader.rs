use anyhow::{Context, Result, bail};
use std::io::{self, Read};

/// Largest input accepted from arguments or stdin.
pub const MAX_INPUT_SIZE: usize = 64 * 1024;

pub struct InputReader;

impl InputReader {
    /// Joins the words given on the command line, or reads stdin when there are none.
    pub fn read(words: &[String]) -> Result<String> {
        if words.is_empty() {
            Self::read_stdin()
        } else {
            let text = words.join(" ");
            check_size(text.len())?;
            Ok(text)
        }
    }

    #[allow(clippy::significant_drop_tightening)]
    fn read_stdin() -> Result<String> {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 8192];
        let mut stdin = io::stdin().lock();

        loop {
            let bytes_read = stdin
                .read(&mut chunk)
                .context("Failed to read from stdin")?;

            if bytes_read == 0 {
                break;
            }

            buffer.extend_from_slice(&chunk[..bytes_read]);
            check_size(buffer.len())?;
        }

        String::from_utf8(buffer).context("Input is not valid UTF-8")
    }
}

fn check_size(size: usize) -> Result<()> {
    if size > MAX_INPUT_SIZE {
        bail!(
            "Input size ({:.1} KB) exceeds maximum allowed size ({} KB).",
            size as f64 / 1024.0,
            MAX_INPUT_SIZE / 1024
        );
    }
    Ok(())
}

/// Prepares user text for a lookup.
///
/// Each control character (newlines and tabs included) becomes a space and
/// the ends are trimmed. Everything else is passed through untouched.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}
