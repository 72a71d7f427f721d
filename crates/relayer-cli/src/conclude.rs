//! Custom-made solution to output a JSON return message and ensure a return code
//! from a CLI command. The main use-case for this module is to provide a consistent output for
//! queries and relay commands.
//!
//! - Exit from a command with an error:
//!
//! ```ignore
//! Output::error(format!("{}", e)).exit();
//! ```
//!
//! - Exit from a command with success and a result:
//!
//! ```ignore
//! Output::success(pending).exit();
//! ```

use std::fmt;

use serde::Serialize;
use tracing::error;

use crate::prelude::app_reader;

/// Functional-style method to exit a program.
///
/// ## Note: See `Output::exit()` for the preferred method of exiting a relayer command.
pub fn exit_with(out: Output) -> ! {
    // Handle the output message
    if json() {
        println!("{}", out.to_json());
    } else {
        println!("{}\n{:#}", out.status, out.result);
    }

    // The return code
    if out.status == Status::Error {
        std::process::exit(1);
    } else {
        std::process::exit(0);
    }
}

/// Returns true if the application global json flag `--json` is enabled.
/// Returns false otherwise.
pub fn json() -> bool {
    app_reader().json_output()
}

/// Exits the program. Useful when a type produces an error which can no longer be propagated, and
/// the program must exit instead.
///
/// ```ignore
/// let relayer = runtime
///     .block_on(Relayer::from_config(&config, channel))
///     .unwrap_or_else(exit_with_unrecoverable_error);
/// ```
pub fn exit_with_unrecoverable_error<T, E: fmt::Display>(err: E) -> T {
    Output::error(format!("{err}")).exit()
}

/// A CLI output with support for JSON serialization. The only mandatory field is the `status`,
/// which typically signals a success (UNIX process return code `0`) or an error (code `1`). An
/// optional `result` can be added to an output.
#[derive(Serialize, Debug)]
pub struct Output {
    /// The return status
    pub status: Status,

    /// The result of a command, such as the output from a query.
    pub result: serde_json::Value,
}

impl Output {
    /// Constructs a new `Output` with the provided `status` and an empty `result`.
    pub fn new(status: Status) -> Self {
        Output {
            status,
            result: serde_json::Value::Null,
        }
    }

    /// Constructor that returns a new `Output` having a `Success` status and empty `result`.
    pub fn with_success() -> Self {
        Output::new(Status::Success)
    }

    /// Constructor that returns a new `Output` having an `Error` status and empty `result`.
    pub fn with_error() -> Self {
        Output::new(Status::Error)
    }

    /// Builder-style method for attaching a result to an output object.
    pub fn with_result(mut self, result: impl Serialize + fmt::Debug) -> Self {
        self.result = Self::serialize_result(result);
        self
    }

    /// Quick-access constructor for an output signalling a success `status` and tagged with the
    /// input `result`.
    pub fn success(result: impl Serialize + fmt::Debug) -> Self {
        Output::with_success().with_result(result)
    }

    /// Quick-access constructor for an output signalling a error `status` and tagged with the
    /// input `result`.
    pub fn error(result: impl Serialize + fmt::Debug) -> Self {
        Output::with_error().with_result(result)
    }

    /// Helper to serialize a result into a `serde_json::Value`.
    fn serialize_result(res: impl Serialize + fmt::Debug) -> serde_json::Value {
        let last_resort = format!("{res:?}");

        match serde_json::to_value(res) {
            Ok(json_val) => json_val,
            Err(e) => {
                // Signal the serialization error
                error!(
                    "Output constructor failed with non-recoverable error {} for input {}",
                    e, last_resort
                );
                // Package the result with the infallible `Debug` instead of `JSON`
                serde_json::Value::String(last_resort)
            }
        }
    }

    /// The output as a single line of JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|e| format!(r#"{{"status":"error","result":"{e}"}}"#))
    }

    /// Exits from the process with the current output. Convenience wrapper over `exit_with`.
    pub fn exit(self) -> ! {
        exit_with(self)
    }
}

/// Represents the exit status of any CLI command
#[derive(Serialize, Debug, PartialEq, Eq)]
pub enum Status {
    /// The command succeeded
    #[serde(rename(serialize = "success"))]
    Success,

    /// The command failed
    #[serde(rename(serialize = "error"))]
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Success => write!(f, "Success"),
            Status::Error => write!(f, "Error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn output_serializes_status_and_result() {
        let out = Output::success(json!({"sequence": 6}));
        assert_eq!(out.to_json(), r#"{"status":"success","result":{"sequence":6}}"#);

        let out = Output::error("boom".to_string());
        assert_eq!(out.to_json(), r#"{"status":"error","result":"boom"}"#);
    }
}
