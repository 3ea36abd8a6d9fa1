//! Paths into row values.

use std::fmt;

use serde_json::Value;

/// One step of a [`DataPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object key.
    Key(String),
    /// Array index.
    Index(usize),
}

/// An ordered sequence of keys and indices addressing a value inside a row.
///
/// Parsed from the usual accessor notation:
///
/// ```
/// use datagrid::util::{DataPath, Segment};
///
/// let path = DataPath::parse("office.address[0].city");
/// assert_eq!(
///     path.segments(),
///     &[
///         Segment::Key("office".into()),
///         Segment::Key("address".into()),
///         Segment::Index(0),
///         Segment::Key("city".into()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DataPath {
    segments: Vec<Segment>,
}

impl DataPath {
    /// Creates a path from explicit segments.
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Parses `a.b[0]["c.d"]` style notation.
    ///
    /// Parsing never fails: an unterminated bracket is kept as a literal key.
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut key = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '.' => {
                    if !key.is_empty() {
                        segments.push(Segment::Key(std::mem::take(&mut key)));
                    }
                }
                '[' => {
                    if !key.is_empty() {
                        segments.push(Segment::Key(std::mem::take(&mut key)));
                    }
                    let mut inner = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == ']' {
                            closed = true;
                            break;
                        }
                        inner.push(c);
                    }
                    if !closed {
                        key.push('[');
                        key.push_str(&inner);
                        continue;
                    }
                    segments.push(bracket_segment(&inner));
                }
                _ => key.push(c),
            }
        }
        if !key.is_empty() {
            segments.push(Segment::Key(key));
        }

        Self { segments }
    }

    /// Returns the path segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns `true` if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

fn bracket_segment(inner: &str) -> Segment {
    let trimmed = inner.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| trimmed.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')));
    match unquoted {
        Some(key) => Segment::Key(key.to_string()),
        None => match trimmed.parse::<usize>() {
            Ok(index) => Segment::Index(index),
            Err(_) => Segment::Key(trimmed.to_string()),
        },
    }
}

impl From<&str> for DataPath {
    fn from(source: &str) -> Self {
        Self::parse(source)
    }
}

impl From<String> for DataPath {
    fn from(source: String) -> Self {
        Self::parse(&source)
    }
}

impl fmt::Display for DataPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(key) if key.contains(['.', '[', ']']) => write!(f, "[\"{key}\"]")?,
                Segment::Key(key) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Looks up `path` inside `value`.
///
/// Returns `None` as soon as a segment is missing. A numeric key addresses an
/// array element and an index addresses an object key of the same spelling.
pub fn get_value<'v>(value: &'v Value, path: &DataPath) -> Option<&'v Value> {
    path.segments
        .iter()
        .try_fold(value, |current, segment| match (segment, current) {
            (Segment::Key(key), Value::Object(map)) => map.get(key),
            (Segment::Key(key), Value::Array(items)) => {
                key.parse::<usize>().ok().and_then(|i| items.get(i))
            }
            (Segment::Index(index), Value::Array(items)) => items.get(*index),
            (Segment::Index(index), Value::Object(map)) => map.get(&index.to_string()),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_dotted_and_bracketed() {
        let path = DataPath::parse("a.b[2][\"c.d\"]");
        assert_eq!(
            path.segments(),
            &[
                Segment::Key("a".into()),
                Segment::Key("b".into()),
                Segment::Index(2),
                Segment::Key("c.d".into()),
            ]
        );
    }

    #[test]
    fn test_unterminated_bracket_is_literal() {
        let path = DataPath::parse("a[1");
        assert_eq!(path.segments(), &[Segment::Key("a[1".into())]);
    }

    #[test]
    fn test_display_round_trips_notation() {
        assert_eq!(DataPath::parse("a.b[2]").to_string(), "a.b[2]");
        assert_eq!(DataPath::parse("[\"x.y\"].z").to_string(), "[\"x.y\"].z");
    }

    #[test]
    fn test_get_value() {
        let row = json!({
            "name": "Tiger Nixon",
            "office": { "city": "Edinburgh", "phones": ["5421", "5422"] },
        });
        assert_eq!(
            get_value(&row, &"office.city".into()),
            Some(&json!("Edinburgh"))
        );
        assert_eq!(
            get_value(&row, &"office.phones[1]".into()),
            Some(&json!("5422"))
        );
        assert_eq!(get_value(&row, &"office.phones.0".into()), Some(&json!("5421")));
        assert_eq!(get_value(&row, &"office.zip".into()), None);
        assert_eq!(get_value(&row, &"name.first".into()), None);
    }

    #[test]
    fn test_empty_path_returns_root() {
        let row = json!(["a"]);
        assert_eq!(get_value(&row, &DataPath::default()), Some(&row));
    }
}
