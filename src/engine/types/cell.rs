use std::borrow::Cow;

/// A raw text field is a null marker when nothing is left after trimming.
#[inline]
pub fn is_null_marker(text: &str) -> bool {
    text.trim().is_empty()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int32(i32),
    Float64(f64),
    Utf8(String),
    /// Raw span of a utf8 column that was not valid UTF-8.
    Bytes(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Value(Value),
}

impl Cell {
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Cell::Value(Value::Int32(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Value(Value::Float64(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Value(Value::Utf8(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Cell::Value(Value::Utf8(s)) => Some(s.as_bytes()),
            Cell::Value(Value::Bytes(b)) => Some(b),
            _ => None,
        }
    }

    /// Text rendering used at the CSV boundary. Null becomes empty text and
    /// undecodable bytes are rendered lossily.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Cell::Null => Cow::Borrowed(""),
            Cell::Value(Value::Int32(v)) => Cow::Owned(itoa::Buffer::new().format(*v).to_owned()),
            Cell::Value(Value::Float64(v)) => Cow::Owned(ryu::Buffer::new().format(*v).to_owned()),
            Cell::Value(Value::Utf8(s)) => Cow::Borrowed(s),
            Cell::Value(Value::Bytes(b)) => String::from_utf8_lossy(b),
        }
    }
}

impl From<i32> for Cell {
    fn from(v: i32) -> Self {
        Cell::Value(Value::Int32(v))
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Value(Value::Float64(v))
    }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self {
        Cell::Value(Value::Utf8(v.to_string()))
    }
}

impl From<String> for Cell {
    fn from(v: String) -> Self {
        Cell::Value(Value::Utf8(v))
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self {
        v.map_or(Cell::Null, Into::into)
    }
}
