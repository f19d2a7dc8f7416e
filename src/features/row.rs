use serde_json::Value;
use std::fmt;

/// Floats up to this magnitude hold whole numbers exactly (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A single cell of a flat record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    /// Integers beyond `i64::MAX`.
    UInt(u64),
    Number(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::UInt(u) => write!(f, "{}", u),
            FieldValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => Ok(()),
        }
    }
}

impl From<&Value> for FieldValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    FieldValue::UInt(u)
                } else {
                    FieldValue::Number(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => FieldValue::Text(s.clone()),
            // Nested payloads are kept verbatim as JSON text.
            other => FieldValue::Text(other.to_string()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<usize> for FieldValue {
    fn from(value: usize) -> Self {
        FieldValue::Int(value as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// An ordered, flat record of named fields. Only present fields are stored, so a
/// missing column stays distinguishable from an explicit null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing the value in place when the name is already present.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// How many siblings of each competing decision category a node had.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlternativeCounts {
    pub bindings: usize,
    pub group_bindings: usize,
    pub dataflows: usize,
    pub refactorings: usize,
}

impl AlternativeCounts {
    pub fn total(&self) -> usize {
        self.bindings + self.group_bindings + self.dataflows + self.refactorings
    }
}

/// Kind-specific parameter columns of a feature row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowParams {
    /// Root decisions carry no parameters.
    Root,
    /// Bind parameters with the internal `tag` removed.
    Bind(Vec<(String, FieldValue)>),
    /// Dataflow parameters with the flag sequence reduced to a count.
    Dataflow(Vec<(String, FieldValue)>),
    /// Refactorings are described by their decision tag alone.
    Refactoring { refactoring_type: String },
}

pub const REFACTORING_TYPE_FIELD: &str = "pRefactoringType";

/// Columns every row starts with, in output order.
pub const BASE_COLUMNS: [&str; 9] = [
    "example",
    "sid",
    "tag",
    "old_score",
    "is_terminal",
    "alt_bindings",
    "alt_group_bindings",
    "alt_dataflows",
    "alt_refactorings",
];
pub const LABEL_COLUMN: &str = "label";

/// Whether a parameter field would clash with a column the row sets itself.
pub fn is_reserved_column(name: &str) -> bool {
    name == LABEL_COLUMN || BASE_COLUMNS.contains(&name)
}

impl RowParams {
    fn write_into(&self, record: &mut Record) {
        match self {
            RowParams::Root => {}
            RowParams::Bind(fields) | RowParams::Dataflow(fields) => {
                for (name, value) in fields {
                    record.insert(name.clone(), value.clone());
                }
            }
            RowParams::Refactoring { refactoring_type } => {
                record.insert(REFACTORING_TYPE_FIELD, refactoring_type.as_str());
            }
        }
    }
}

/// One training row describing a visited node and its alternatives.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub example: String,
    pub sid: String,
    pub tag: String,
    pub old_score: f64,
    pub is_terminal: bool,
    pub alternatives: AlternativeCounts,
    pub params: RowParams,
    /// Outcome label of the walk the row came from, attached by the sampler.
    pub label: Option<f64>,
}

impl FeatureRow {
    pub fn with_label(mut self, label: f64) -> Self {
        self.label = Some(label);
        self
    }

    /// Flattens the row into the wide record used at the persistence boundary.
    ///
    /// Column names match the schema existing models were trained on.
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("example", self.example.as_str());
        record.insert("sid", self.sid.as_str());
        record.insert("tag", self.tag.as_str());
        record.insert("old_score", self.old_score);
        record.insert("is_terminal", self.is_terminal);
        record.insert("alt_bindings", self.alternatives.bindings);
        record.insert("alt_group_bindings", self.alternatives.group_bindings);
        record.insert("alt_dataflows", self.alternatives.dataflows);
        record.insert("alt_refactorings", self.alternatives.refactorings);
        self.params.write_into(&mut record);
        if let Some(label) = self.label {
            record.insert(LABEL_COLUMN, label);
        }
        record
    }
}
