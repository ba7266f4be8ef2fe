//! Query-string construction.
//!
//! Parameters keep insertion order. Null values are dropped, lists expand to
//! repeated `key=value` pairs, and values (not keys) are percent-encoded.

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Null,
    Scalar(String),
    List(Vec<String>),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Scalar(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Scalar(value)
    }
}

macro_rules! scalar_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for QueryValue {
                fn from(value: $ty) -> Self {
                    QueryValue::Scalar(value.to_string())
                }
            }
        )*
    };
}

scalar_from!(bool, i32, i64, u32, u64, usize, f64);

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(QueryValue::Null, Into::into)
    }
}

impl<T: ToString> From<Vec<T>> for QueryValue {
    fn from(values: Vec<T>) -> Self {
        QueryValue::List(values.iter().map(ToString::to_string).collect())
    }
}

/// Ordered query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, QueryValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`QueryParams::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets `key`. Re-inserting an existing key replaces its value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<String> = Vec::new();
        for (key, value) in &self.entries {
            match value {
                QueryValue::Null => {}
                QueryValue::Scalar(v) => pairs.push(pair(key, v)),
                QueryValue::List(values) => pairs.extend(values.iter().map(|v| pair(key, v))),
            }
        }
        pairs.join("&")
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// Characters `urlencoding` escapes that stay literal in a URI component.
const UNRESERVED_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%2A", "*"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
];

/// Percent-encodes a URI component, leaving `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
/// untouched.
fn encode_component(value: &str) -> String {
    // A literal `%` is always emitted as `%25`, so each escape below can only
    // have come from its mark.
    UNRESERVED_MARKS
        .iter()
        .fold(urlencoding::encode(value).into_owned(), |encoded, (escape, mark)| {
            encoded.replace(escape, mark)
        })
}

fn pair(key: &str, value: &str) -> String {
    format!("{key}={}", encode_component(value))
}

/// Appends the query string to `url`. No `?` is added when nothing remains.
pub fn format_url(url: &str, params: &QueryParams) -> String {
    let query = params.to_query_string();
    if query.is_empty() {
        url.to_string()
    } else {
        format!("{url}?{query}")
    }
}
