//! Synthetic patient record
//!
//! An append-only key/value record built field by field in dependency
//! order. Insertion order is preserved because the persisted form writes
//! one column per field in exactly the order fields were computed.

use rustc_hash::FxHashMap;

use crate::error::{Result, SynthesisError};

/// A single field value on a patient record
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Integer-valued field; boolean attributes are stored as 0/1
    Int(i64),
    /// Continuous field
    Float(f64),
    /// Categorical field
    Text(String),
}

impl FieldValue {
    /// Render the value the way the persisted form expects it
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Int(v) => v.to_string(),
            Self::Float(v) => v.to_string(),
            Self::Text(v) => v.clone(),
        }
    }
}

/// One synthetic individual under construction
#[derive(Debug, Clone, Default)]
pub struct Patient {
    fields: Vec<(&'static str, FieldValue)>,
    index: FxHashMap<&'static str, usize>,
}

impl Patient {
    /// An empty record, created at the start of one generation iteration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, appending it on first assignment.
    ///
    /// Re-assigning an existing field updates it in place and keeps its
    /// original column position; this only happens within the node that
    /// first wrote the field (for example the cardiovascular allocation
    /// clearing then setting its four flags).
    pub fn set(&mut self, name: &'static str, value: FieldValue) {
        if let Some(&i) = self.index.get(name) {
            self.fields[i].1 = value;
        } else {
            self.index.insert(name, self.fields.len());
            self.fields.push((name, value));
        }
    }

    /// Set a 0/1 flag field
    pub fn set_flag(&mut self, name: &'static str, value: u8) {
        self.set(name, FieldValue::Int(i64::from(value)));
    }

    /// Whether a field has been assigned yet
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// A field value, failing fast when the field was never assigned
    pub fn get(&self, name: &str) -> Result<&FieldValue> {
        self.index
            .get(name)
            .map(|&i| &self.fields[i].1)
            .ok_or_else(|| {
                SynthesisError::configuration(format!(
                    "field '{name}' read before it was assigned"
                ))
            })
    }

    /// A 0/1 flag field as a boolean-like integer
    pub fn flag(&self, name: &str) -> Result<u8> {
        match self.get(name)? {
            FieldValue::Int(v) if *v == 0 || *v == 1 => Ok(*v as u8),
            other => Err(SynthesisError::configuration(format!(
                "field '{name}' is not a 0/1 flag: {other:?}"
            ))),
        }
    }

    /// Whether a flag field is set
    pub fn is_present(&self, name: &str) -> Result<bool> {
        Ok(self.flag(name)? == 1)
    }

    /// An integer field
    pub fn int(&self, name: &str) -> Result<i64> {
        match self.get(name)? {
            FieldValue::Int(v) => Ok(*v),
            other => Err(SynthesisError::configuration(format!(
                "field '{name}' is not an integer: {other:?}"
            ))),
        }
    }

    /// A continuous field; integer fields widen
    pub fn float(&self, name: &str) -> Result<f64> {
        match self.get(name)? {
            FieldValue::Float(v) => Ok(*v),
            FieldValue::Int(v) => Ok(*v as f64),
            other => Err(SynthesisError::configuration(format!(
                "field '{name}' is not numeric: {other:?}"
            ))),
        }
    }

    /// Fields in the order they were computed
    #[must_use]
    pub fn fields(&self) -> &[(&'static str, FieldValue)] {
        &self.fields
    }

    /// Number of assigned fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record is still empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_keep_insertion_order() {
        let mut p = Patient::new();
        p.set_flag("a", 1);
        p.set("b", FieldValue::Float(1.5));
        p.set_flag("c", 0);
        let names: Vec<&str> = p.fields().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn reassignment_keeps_column_position() {
        let mut p = Patient::new();
        p.set_flag("tia", 0);
        p.set_flag("stroke", 0);
        p.set_flag("tia", 1);
        let names: Vec<&str> = p.fields().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["tia", "stroke"]);
        assert_eq!(p.flag("tia").unwrap(), 1);
    }

    #[test]
    fn reading_an_unassigned_field_fails() {
        let p = Patient::new();
        assert!(p.flag("frailty").is_err());
    }
}
