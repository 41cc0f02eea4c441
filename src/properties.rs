use serde::{Deserialize, Serialize};

/// Prefix TeamCity uses for properties whose values are never echoed back.
pub const SECURE_PREFIX: &str = "secure:";

const REDACTED: &str = "******";

/// A single name/value entry of a property bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn is_secure(&self) -> bool {
        self.name.starts_with(SECURE_PREFIX)
    }
}

/// Ordered, string-keyed property bag shared by every project feature kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PropertiesJson", into = "PropertiesJson")]
pub struct Properties {
    entries: Vec<Property>,
}

/// REST wire shape: `{"count": N, "property": [...]}`.
#[derive(Serialize, Deserialize)]
struct PropertiesJson {
    #[serde(default, skip_deserializing)]
    count: usize,
    #[serde(default)]
    property: Vec<Property>,
}

impl From<PropertiesJson> for Properties {
    fn from(value: PropertiesJson) -> Self {
        value.property.into_iter().collect()
    }
}

impl From<Properties> for PropertiesJson {
    fn from(value: Properties) -> Self {
        Self {
            count: value.entries.len(),
            property: value.entries,
        }
    }
}

impl Properties {
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = Property>,
    {
        entries.into_iter().collect()
    }

    /// Returns the first value stored under `name`, or `None` when the key is absent.
    /// A present key with an empty value yields `Some("")`.
    pub fn get_ok(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.value.as_str())
    }

    /// Sets `name`, keeping its original position when it already exists.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(existing) => existing.value = value,
            None => self.entries.push(Property { name, value }),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Copy with every `secure:` value masked; empty secure values stay empty.
    pub fn redacted(&self) -> Self {
        let mut redacted = self.clone();
        for entry in redacted.entries.iter_mut() {
            if entry.is_secure() && !entry.value.is_empty() {
                entry.value = REDACTED.to_string();
            }
        }
        redacted
    }
}

// Entries are kept as given, duplicates included; only `insert` replaces.
impl FromIterator<Property> for Properties {
    fn from_iter<T: IntoIterator<Item = Property>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Properties
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        iter.into_iter()
            .map(|(name, value)| Property::new(name, value))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Properties {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
