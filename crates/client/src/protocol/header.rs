//! Case-preserving HTTP header collection.
//!
//! Header names keep the casing they were written or received with, while every
//! lookup compares names ASCII case-insensitively. Keeping that rule inside one
//! type means call sites never lowercase names themselves.

use std::fmt;

/// An ordered collection of header fields.
///
/// [`insert`](Headers::insert) replaces a field whose name is already present
/// (ignoring case) in place, so the last occurrence wins. [`append`](Headers::append)
/// keeps every occurrence; lookups then see the first one.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Headers {
    fields: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { fields: Vec::with_capacity(capacity) }
    }

    /// Inserts a field, replacing any existing field with the same name.
    ///
    /// Returns the replaced value if there was one.
    pub fn insert<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(index) => {
                let (_, old_value) = std::mem::replace(&mut self.fields[index], (name, value));
                Some(old_value)
            }
            None => {
                self.fields.push((name, value));
                None
            }
        }
    }

    /// Adds a field after the existing ones without replacing any of them.
    pub fn append<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        self.fields.push((name.into(), value.into()));
    }

    /// Returns the value of the first field whose name matches `name` ignoring case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|index| self.fields[index].1.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.position(name).map(|index| self.fields.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates fields in insertion order with their original casing.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|(field, _)| field.eq_ignore_ascii_case(name))
    }
}

impl fmt::Debug for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        headers.extend(iter);
        headers
    }
}

impl<N: Into<String>, V: Into<String>> Extend<(N, V)> for Headers {
    fn extend<I: IntoIterator<Item = (N, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        let mut headers = Headers::new();
        headers.insert("Content-Type", "text/plain");

        assert_eq!(headers.get("content-type"), Some("text/plain"));
        assert_eq!(headers.get("CONTENT-TYPE"), Some("text/plain"));
        assert!(headers.contains("Content-type"));
        assert_eq!(headers.get("content-length"), None);
    }

    #[test]
    fn last_occurrence_wins_and_keeps_its_casing() {
        let mut headers = Headers::new();
        headers.insert("X-Trace", "1");
        headers.insert("Accept", "*/*");
        assert_eq!(headers.insert("x-trace", "2"), Some("1".to_string()));

        assert_eq!(headers.len(), 2);
        let fields: Vec<_> = headers.iter().collect();
        assert_eq!(fields, vec![("x-trace", "2"), ("Accept", "*/*")]);
    }

    #[test]
    fn append_keeps_duplicates() {
        let mut headers = Headers::new();
        headers.append("Accept", "text/html");
        headers.append("accept", "application/json");

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("ACCEPT"), Some("text/html"));
        let fields: Vec<_> = headers.iter().collect();
        assert_eq!(fields, vec![("Accept", "text/html"), ("accept", "application/json")]);
    }

    #[test]
    fn collect_and_remove() {
        let mut headers: Headers = [("Host", "example.com"), ("Connection", "keep-alive")].into_iter().collect();

        assert_eq!(headers.remove("connection"), Some("keep-alive".to_string()));
        assert_eq!(headers.len(), 1);
        assert!(!headers.is_empty());
        assert_eq!(format!("{headers:?}"), r#"{"Host": "example.com"}"#);
    }
}
