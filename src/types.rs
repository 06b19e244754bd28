//! Core data model types.
//!
//! A survey export is held as an in-memory [`DataSet`]: an ordered [`Schema`] (a list of typed
//! [`Field`]s) plus row-major [`Value`] storage. The transformer consumes a `DataSet` by value,
//! reshapes it column by column, and hands a new one to the load stage.

use std::fmt;

/// Logical data type for a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }

    /// Create a new [`DataType::Utf8`] field.
    pub fn utf8(name: impl Into<String>) -> Self {
        Self::new(name, DataType::Utf8)
    }
}

/// A list of fields describing the shape of a [`DataSet`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Build an all-[`DataType::Utf8`] schema from column names.
    pub fn utf8<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(Field::utf8).collect())
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// `true` if the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A single typed value in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Wrap a string as [`Value::Utf8`].
    pub fn text(s: impl Into<String>) -> Self {
        Self::Utf8(s.into())
    }

    /// `Some(s)` becomes [`Value::Utf8`], `None` becomes [`Value::Null`].
    pub fn from_option(s: Option<String>) -> Self {
        s.map_or(Self::Null, Self::Utf8)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the string payload of a [`Value::Utf8`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Utf8(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Render any non-null value as text. `Null` stays `None`.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Int64(v) => Some(v.to_string()),
            Self::Float64(v) => Some(v.to_string()),
            Self::Bool(v) => Some(v.to_string()),
            Self::Utf8(s) => Some(s.clone()),
        }
    }

    /// Short type label used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Int64(_) => "int64",
            Self::Float64(_) => "float64",
            Self::Bool(_) => "bool",
            Self::Utf8(_) => "utf8",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Some(s) => f.write_str(&s),
            None => f.write_str("null"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Utf8(s.to_owned())
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// A dataset with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the dataset.
    pub fn column_count(&self) -> usize {
        self.schema.len()
    }

    /// `true` when there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Borrow a single cell by row index and column name.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.schema.index_of(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// Iterate the values of one column, top to bottom.
    pub fn column(&self, column: &str) -> Option<impl Iterator<Item = &Value>> {
        let idx = self.schema.index_of(column)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Keep only rows that match `predicate`, in place.
    pub fn retain_rows<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&[Value]) -> bool,
    {
        self.rows.retain(|row| predicate(row.as_slice()));
    }

    /// Rename columns through `rename`; columns it returns `None` for keep their name.
    pub fn rename_columns<F>(&mut self, mut rename: F)
    where
        F: FnMut(&str) -> Option<String>,
    {
        for field in &mut self.schema.fields {
            if let Some(new_name) = rename(&field.name) {
                field.name = new_name;
            }
        }
    }

    /// Append a column filled with `fill`. Returns its index.
    pub fn add_column(&mut self, field: Field, fill: Value) -> usize {
        self.schema.fields.push(field);
        for row in &mut self.rows {
            row.push(fill.clone());
        }
        self.schema.fields.len() - 1
    }

    /// Remove a column by name. Returns `false` if it does not exist.
    pub fn drop_column(&mut self, column: &str) -> bool {
        let Some(idx) = self.schema.index_of(column) else {
            return false;
        };
        self.schema.fields.remove(idx);
        for row in &mut self.rows {
            row.remove(idx);
        }
        true
    }

    /// Project onto `columns` in the given order.
    ///
    /// Returns the name of the first missing column as the error.
    pub fn select_columns<'a>(&self, columns: &[&'a str]) -> Result<Self, &'a str> {
        let mut idxs = Vec::with_capacity(columns.len());
        let mut fields = Vec::with_capacity(columns.len());
        for &name in columns {
            let idx = self.schema.index_of(name).ok_or(name)?;
            idxs.push(idx);
            fields.push(self.schema.fields[idx].clone());
        }

        let rows = self
            .rows
            .iter()
            .map(|row| idxs.iter().map(|&i| row[i].clone()).collect())
            .collect();
        Ok(Self::new(Schema::new(fields), rows))
    }
}
