use std::mem;

/// An ordered set of request parameters with unique names.
///
/// `ParamSet` is the in-flight form of a request body or query string while
/// it is being authenticated: endpoint code fills it, the signer appends the
/// timestamp and signature entries, and the transport renders it with
/// [`to_form_urlencoded`](ParamSet::to_form_urlencoded). Names are unique;
/// inserting an existing name replaces the value in place and keeps the
/// original position, so iteration order is insertion order throughout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamSet {
    entries: Vec<(String, String)>,
}

impl ParamSet {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter.
    ///
    /// If a parameter with the same name exists, its value is replaced in
    /// place and the old value returned; otherwise the pair is appended.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => Some(mem::replace(v, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Get a parameter value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Remove a parameter by name, returning its value if present.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(idx).1)
    }

    /// Check whether a parameter with the given name exists.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Number of parameters in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Parse a set from a query or form-urlencoded string.
    ///
    /// A leading `?` is tolerated. Percent escapes and `+` are decoded.
    /// Duplicate names keep the last value, matching
    /// [`insert`](ParamSet::insert) semantics.
    ///
    /// ```
    /// use callsign_core::ParamSet;
    ///
    /// let params = ParamSet::from_query("to=447700900000&text=Hello%20World");
    /// assert_eq!(params.get("text"), Some("Hello World"));
    /// ```
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = Self::new();
        for (name, value) in form_urlencoded::parse(query.as_bytes()) {
            params.insert(name.into_owned(), value.into_owned());
        }
        params
    }

    /// Render the set as an `application/x-www-form-urlencoded` body.
    pub fn to_form_urlencoded(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in self.iter() {
            serializer.append_pair(name, value);
        }
        serializer.finish()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for ParamSet {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}
