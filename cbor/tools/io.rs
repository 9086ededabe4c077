/*!
Reading input from a file or stdin, and writing output to a file or stdout
*/

use anyhow::Context;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::str::FromStr;

/// Input source, '-' selects stdin
#[derive(Debug, Clone)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    pub fn read_all(&self) -> anyhow::Result<Vec<u8>> {
        match self {
            Input::Stdin => {
                let mut buffer = Vec::new();
                io::stdin()
                    .read_to_end(&mut buffer)
                    .context("Failed to read stdin")?;
                Ok(buffer)
            }
            Input::File(path) => Ok(compact_cbor::read_file(path)?),
        }
    }

    pub fn read_to_string(&self) -> anyhow::Result<String> {
        String::from_utf8(self.read_all()?).context("Input is not valid UTF-8")
    }
}

impl FromStr for Input {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(Input::Stdin)
        } else {
            Ok(Input::File(PathBuf::from(s)))
        }
    }
}

/// Output destination, '-' or empty selects stdout
#[derive(Debug, Clone)]
pub enum Output {
    Stdout,
    File(PathBuf),
}

impl Output {
    pub fn write_all(&self, data: &[u8]) -> anyhow::Result<()> {
        match self {
            Output::Stdout => io::stdout()
                .write_all(data)
                .context("Failed to write stdout"),
            Output::File(path) => std::fs::write(path, data)
                .with_context(|| format!("Failed to write {}", path.display())),
        }
    }

    pub fn write_str(&self, data: &str) -> anyhow::Result<()> {
        self.write_all(data.as_bytes())
    }
}

impl FromStr for Output {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s == "-" {
            Ok(Output::Stdout)
        } else {
            Ok(Output::File(PathBuf::from(s)))
        }
    }
}
