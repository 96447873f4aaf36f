use super::Value;

use indexmap::IndexMap;

/// Builds a [`ValueRecord`] from `name: value` pairs.
///
/// ```
/// let record = strata_core::record! { title: "hello", views: 3 };
/// assert_eq!(record.len(), 2);
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::stmt::ValueRecord::new()
    };
    (
        $( $name:ident : $value:expr ),+ $(,)?
    ) => {{
        let mut record = $crate::stmt::ValueRecord::new();
        $( record.insert(stringify!($name), $crate::stmt::Value::from($value)); )+
        record
    }};
}

/// An ordered set of named values: a stored record, an input object, or a
/// nested relation input.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValueRecord {
    fields: IndexMap<String, Value>,
}

impl ValueRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Walks nested records along `path`.
    pub fn get_path(&self, path: &[String]) -> Option<&Value> {
        let [first, rest @ ..] = path else {
            return None;
        };

        let mut value = self.get(first)?;
        for step in rest {
            value = value.as_record()?.get(step)?;
        }
        Some(value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.shift_remove(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Copies every field of `other` over this record.
    pub fn merge(&mut self, other: ValueRecord) {
        self.fields.extend(other.fields);
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ValueRecord {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}

impl IntoIterator for ValueRecord {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValueRecord {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
