/*!
Compose command - convert JSON to CBOR
*/

use crate::io::{Input, Output};
use clap::Parser;
use compact_cbor::{Key, Value};
use tracing::debug;

/// Convert JSON to CBOR binary
#[derive(Parser, Debug)]
#[command(
    about = "Convert JSON to CBOR binary",
    long_about = "Parse JSON text and convert it to CBOR binary.\n\n\
                  Objects become text-keyed maps. Booleans and integers beyond\n\
                  the 64-bit signed range have no CBOR equivalent here and are rejected."
)]
pub struct Command {
    /// Output file (default: stdout)
    #[arg(short = 'o', long)]
    output: Option<Output>,

    /// Input file (use '-' for stdin)
    input: Input,
}

impl Command {
    pub fn exec(self) -> anyhow::Result<()> {
        let input_text = self.input.read_to_string()?;
        let json_value: serde_json::Value = serde_json::from_str(&input_text)?;
        let value = json_to_value(json_value)?;

        let cbor_bytes = compact_cbor::emit(&value);
        debug!("Encoded {} bytes", cbor_bytes.len());

        self.output.unwrap_or(Output::Stdout).write_all(&cbor_bytes)
    }
}

/// Convert a JSON value to a CBOR value
fn json_to_value(value: serde_json::Value) -> anyhow::Result<Value> {
    use serde_json::Value as J;

    Ok(match value {
        J::Null => Value::Null,
        J::Bool(b) => anyhow::bail!("Boolean value {b} cannot be represented"),
        J::Number(n) => {
            if let Some(i) = n.as_i64() {
                if !Value::INTEGER_RANGE.contains(&i) {
                    anyhow::bail!("Integer {i} needs a 64-bit argument, which cannot be decoded")
                }
                Value::Integer(i)
            } else if n.is_f64() {
                Value::Float(n.as_f64().unwrap_or(f64::NAN))
            } else {
                anyhow::bail!("Integer {n} is out of range")
            }
        }
        J::String(s) => Value::from(s),
        J::Array(arr) => arr
            .into_iter()
            .map(json_to_value)
            .collect::<anyhow::Result<Vec<_>>>()?
            .into(),
        J::Object(obj) => obj
            .into_iter()
            .map(|(k, v)| Ok((Key::from(k), json_to_value(v)?)))
            .collect::<anyhow::Result<Value>>()?,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn json_to_cbor() {
        let json = serde_json::json!({"name": "Alice", "age": 30, "scores": [1.5, null]});
        let value = json_to_value(json).unwrap();
        assert_eq!(
            hex::encode(compact_cbor::emit(&value)),
            concat!(
                "a3",
                "63616765181e",
                "646e616d6565416c696365",
                "6673636f72657382fb3ff8000000000000f6",
            )
        );
    }

    #[test]
    fn rejects_unrepresentable() {
        assert!(json_to_value(serde_json::json!([true])).is_err());
        assert!(json_to_value(serde_json::json!(u64::MAX)).is_err());
        assert!(json_to_value(serde_json::json!([4294967296i64])).is_err());
        assert!(json_to_value(serde_json::json!({"n": -4294967297i64})).is_err());
    }

    #[test]
    fn integer_limits() {
        for i in [4294967295i64, -4294967296] {
            let value = json_to_value(serde_json::json!([i])).unwrap();
            let decoded = compact_cbor::decode(&compact_cbor::emit(&value)).unwrap();
            assert_eq!(decoded, value);
        }
    }
}
