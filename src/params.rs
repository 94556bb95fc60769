/// Path parameter values keyed by parameter name.
///
/// Values are raw path segments; nothing is percent-decoded or encoded.
#[derive(Debug, Clone, Default)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, replacing any previous value.
    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl PartialEq for Params {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(name, value)| other.get(name) == Some(value))
    }
}

impl Eq for Params {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Params::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Params {
    fn from(value: [(K, V); N]) -> Self {
        value.into_iter().collect()
    }
}

impl From<()> for Params {
    fn from(_: ()) -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn should_replace_existing_value() {
        let mut params = Params::from([("id", "1")]);
        params.insert("id", "2");
        params.insert("cat", "3");
        assert_eq!(params.get("id"), Some("2"));
        assert_eq!(params.get("cat"), Some("3"));
        assert_eq!(params.get("dog"), None);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn should_compare_regardless_of_order() {
        let params: Params = vec![
            ("id".to_string(), "1".to_string()),
            ("cat".to_string(), "2".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(params, Params::from([("cat", "2"), ("id", "1")]));
        assert_ne!(params, Params::from([("id", "1")]));
        assert!(Params::from(()).is_empty());
    }
}
