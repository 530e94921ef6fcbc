//! Result of a successful nmcli invocation

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::NmcliResult;
use crate::parser::{Record, VALUE_FIELD};

/// Structured form of stdout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParsedOutput {
    /// One record per terse line
    Table(Vec<Record>),
    /// Multiline output grouped by entity identifier
    Entities(BTreeMap<String, Record>),
}

impl ParsedOutput {
    pub fn len(&self) -> usize {
        match self {
            ParsedOutput::Table(rows) => rows.len(),
            ParsedOutput::Entities(entities) => entities.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Exit code, raw streams and parsed data of a call that exited with 0
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    return_code: i32,
    stdout: String,
    stderr: String,
    data: ParsedOutput,
}

impl CommandResult {
    pub(crate) fn new(return_code: i32, stdout: String, stderr: String, data: ParsedOutput) -> Self {
        Self {
            return_code,
            stdout,
            stderr,
            data,
        }
    }

    pub fn return_code(&self) -> i32 {
        self.return_code
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    pub fn data(&self) -> &ParsedOutput {
        &self.data
    }

    /// Tabular rows; empty for multiline results
    pub fn records(&self) -> &[Record] {
        match &self.data {
            ParsedOutput::Table(rows) => rows,
            ParsedOutput::Entities(_) => &[],
        }
    }

    /// Entity by identifier, for multiline results
    pub fn entity(&self, id: &str) -> Option<&Record> {
        match &self.data {
            ParsedOutput::Entities(entities) => entities.get(id),
            ParsedOutput::Table(_) => None,
        }
    }

    /// First line of a single-value result such as `networking connectivity`
    pub fn value(&self) -> Option<&str> {
        self.records()
            .first()
            .and_then(|row| row.get(VALUE_FIELD))
            .map(String::as_str)
    }

    pub fn to_json(&self) -> NmcliResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_table_accessors() {
        let result = CommandResult::new(
            0,
            "full\n".to_string(),
            String::new(),
            ParsedOutput::Table(vec![row(&[(VALUE_FIELD, "full")])]),
        );

        assert_eq!(result.return_code(), 0);
        assert_eq!(result.value(), Some("full"));
        assert_eq!(result.records().len(), 1);
        assert!(result.entity("full").is_none());
    }

    #[test]
    fn test_entity_accessors() {
        let mut entities = BTreeMap::new();
        entities.insert("eth0".to_string(), row(&[("GENERAL.DEVICE", "eth0")]));
        let result = CommandResult::new(0, String::new(), String::new(), ParsedOutput::Entities(entities));

        assert!(result.records().is_empty());
        assert!(result.value().is_none());
        assert_eq!(result.entity("eth0").unwrap()["GENERAL.DEVICE"], "eth0");
        assert_eq!(result.data().len(), 1);
    }

    #[test]
    fn test_to_json_shape() {
        let result = CommandResult::new(
            0,
            "eth0:ethernet\n".to_string(),
            String::new(),
            ParsedOutput::Table(vec![row(&[("DEVICE", "eth0"), ("TYPE", "ethernet")])]),
        );

        let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(json["return_code"], 0);
        assert_eq!(json["stdout"], "eth0:ethernet\n");
        assert_eq!(json["data"][0]["DEVICE"], "eth0");
    }
}
