use std::fs;
use std::io::{self, Read};

use serde_json::Value;

/// Read input from file path or stdin.
/// - `None` or `Some("-")` reads from stdin
/// - `Some(path)` reads from file
pub fn read_input(file: Option<&str>) -> Result<String, String> {
    match file {
        None | Some("-") => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| format!("Error reading from stdin: {e}"))?;
            Ok(buffer)
        }
        Some(path) => fs::read_to_string(path).map_err(|e| format!("Error reading file: {e}")),
    }
}

/// Helper to get display path for error messages
pub fn display_path(file: Option<&str>) -> &str {
    match file {
        None | Some("-") => "<stdin>",
        Some(path) => path,
    }
}

/// Read and parse a JSON document from a file path, or stdin for `-`.
pub fn read_json(file: &str) -> Result<Value, String> {
    let file_opt = Some(file);
    let contents = read_input(file_opt)?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("Error parsing JSON in {}: {e}", display_path(file_opt)))
}
