/*!
Inspect command - decode CBOR data and display it
*/

use super::io::{Input, Output};
use base64::prelude::*;
use clap::Parser;
use compact_cbor::{Decoder, Key, Value, decode::DEFAULT_MAX_RECURSION};
use tracing::debug;

/// Inspect and display CBOR data
#[derive(Parser, Debug)]
#[command(about = "Decode and display CBOR data", long_about = None)]
pub struct Command {
    /// Output format
    #[arg(
        long,
        default_value = "python",
        value_name = "FORMAT",
        help = "Output format: python (literal expression), json (lossy), hex"
    )]
    format: OutputFormat,

    /// Maximum nesting depth of arrays, maps and tags
    #[arg(long, default_value_t = DEFAULT_MAX_RECURSION)]
    max_depth: usize,

    /// Output file (default: stdout)
    #[arg(short = 'o', long)]
    output: Option<Output>,

    /// Input CBOR file (use '-' for stdin)
    input: Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    /// Python literal expression
    #[value(alias = "py")]
    Python,
    /// JSON format (lossy - byte strings become base64url text)
    Json,
    /// Hexadecimal dump of each item
    Hex,
}

impl Command {
    pub fn exec(self) -> anyhow::Result<()> {
        let data = self.input.read_all()?;
        let decoder = Decoder::new().with_max_recursion(self.max_depth);

        let mut lines = Vec::new();
        let mut items = decoder.decode_seq(&data);
        let mut start = 0;
        while let Some(value) = items.next() {
            let value = value.map_err(|e| anyhow::anyhow!("Item at offset {start}: {e}"))?;
            debug!(
                "{} item at offset {start}, {} bytes",
                value.type_name(),
                items.offset() - start
            );
            lines.push(match self.format {
                OutputFormat::Python => value.to_string(),
                OutputFormat::Json => value_to_json(&value).to_string(),
                OutputFormat::Hex => hex::encode(&data[start..items.offset()]),
            });
            start = items.offset();
        }
        debug!("Decoded {} items from {} bytes", lines.len(), data.len());

        let mut output_text = lines.join("\n");
        output_text.push('\n');
        self.output
            .unwrap_or(Output::Stdout)
            .write_str(&output_text)
    }
}

fn bytes_to_json(b: &[u8]) -> serde_json::Value {
    serde_json::Value::String(BASE64_URL_SAFE_NO_PAD.encode(b))
}

/// Convert a value to JSON (lossy)
fn value_to_json(value: &Value) -> serde_json::Value {
    use serde_json::Value as J;

    match value {
        Value::Integer(i) => J::from(*i),
        // JSON doesn't support NaN/Infinity
        Value::Float(f) => serde_json::Number::from_f64(*f).map_or(J::Null, J::Number),
        Value::Text(t) => J::String(String::from_utf8_lossy(t).into_owned()),
        Value::Bytes(b) => bytes_to_json(b),
        Value::Array(items) => J::Array(items.iter().map(value_to_json).collect()),
        Value::Map(entries) => J::Object(
            entries
                .iter()
                .map(|(k, v)| {
                    let k = match k {
                        Key::Text(t) => String::from_utf8_lossy(t).into_owned(),
                        Key::Bytes(b) => BASE64_URL_SAFE_NO_PAD.encode(b),
                    };
                    (k, value_to_json(v))
                })
                .collect(),
        ),
        Value::Null => J::Null,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn json_conversion() {
        let value: Value = [
            (Key::text("n"), Value::Integer(-3)),
            (Key::text("f"), Value::Float(1.5)),
            (Key::text("nan"), Value::Float(f64::NAN)),
            (Key::text("b"), Value::bytes([0xdeu8, 0xad])),
            (
                Key::text("a"),
                Value::from(vec![Value::Null, Value::from("x")]),
            ),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            value_to_json(&value),
            serde_json::json!({
                "n": -3,
                "f": 1.5,
                "nan": null,
                "b": "3q0",
                "a": [null, "x"],
            })
        );
    }
}
