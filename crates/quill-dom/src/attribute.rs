use core::fmt;

/// Remove one layer of matching surrounding quotes (`"…"` or `'…'`).
///
/// Strings shorter than two characters, or whose first and last characters
/// are not the same quote, are returned unchanged.
#[must_use]
pub fn dequote(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// A single tag attribute.
///
/// The value is stored exactly as written in the source, surrounding quotes
/// included, so that serialization reproduces the input. A valueless
/// attribute (`<input disabled>`) has `value == None`, which is distinct from
/// an empty value (`<input value="">` stores `Some("\"\"")`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// The attribute name as written.
    pub name: String,
    /// The raw value, quotes included, if the attribute has one.
    pub value: Option<String>,
}

impl Attribute {
    /// A valueless attribute.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// An attribute with a raw value.
    #[must_use]
    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// Whether the attribute carries a value.
    #[must_use]
    pub const fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Replace (or clear, with `None`) the raw value.
    pub fn set_value(&mut self, value: Option<String>) {
        self.value = value;
    }

    /// The value with one layer of matching quotes removed, or `None` if the
    /// attribute is valueless.
    #[must_use]
    pub fn unquoted_value(&self) -> Option<&str> {
        self.value.as_deref().map(dequote)
    }

    /// Serialized length in characters: `name` or `name=value`.
    #[must_use]
    pub fn length(&self) -> usize {
        let name = self.name.chars().count();
        self.value
            .as_ref()
            .map_or(name, |value| name + 1 + value.chars().count())
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={value}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// An ordered attribute list.
///
/// Duplicate names are allowed and kept in source order. Name lookups are
/// ASCII case-insensitive and return the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeList {
    attributes: Vec<Attribute>,
}

impl AttributeList {
    /// An empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            attributes: Vec::new(),
        }
    }

    /// Append an attribute at the end of the list.
    pub fn push(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    /// Number of attributes, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the list has no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Iterate in source order.
    pub fn iter(&self) -> core::slice::Iter<'_, Attribute> {
        self.attributes.iter()
    }

    /// Iterate mutably in source order.
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, Attribute> {
        self.attributes.iter_mut()
    }

    /// The first attribute with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
    }

    /// Whether any attribute has the given name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Whether an attribute with the given name carries a value.
    #[must_use]
    pub fn has_value(&self, name: &str) -> bool {
        self.value(name).is_some()
    }

    /// The de-quoted value of the first *valued* attribute with the given
    /// name, or `None` if there is no such attribute.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .filter(|attr| attr.name.eq_ignore_ascii_case(name))
            .find_map(Attribute::unquoted_value)
    }
}

impl FromIterator<Attribute> for AttributeList {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        Self {
            attributes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a AttributeList {
    type Item = &'a Attribute;
    type IntoIter = core::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}

impl<'a> IntoIterator for &'a mut AttributeList {
    type Item = &'a mut Attribute;
    type IntoIter = core::slice::IterMut<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valueless_attribute() {
        let mut attr = Attribute::new("Att");
        assert!(!attr.has_value());
        assert_eq!(attr.length(), 3);
        assert_eq!(attr.to_string(), "Att");
        assert_eq!(attr.unquoted_value(), None);

        attr.set_value(Some("1".to_string()));
        assert!(attr.has_value());
        assert_eq!(attr.length(), 5);
        assert_eq!(attr.to_string(), "Att=1");
        assert_eq!(attr.unquoted_value(), Some("1"));

        attr.set_value(None);
        assert!(!attr.has_value());
        assert_eq!(attr.to_string(), "Att");
    }

    #[test]
    fn test_quoted_values_keep_quotes_when_serialized() {
        let single = Attribute::with_value("Att", "'1'");
        assert_eq!(single.length(), 7);
        assert_eq!(single.to_string(), "Att='1'");
        assert_eq!(single.unquoted_value(), Some("1"));

        let double = Attribute::with_value("Att", "\"1\"");
        assert_eq!(double.to_string(), "Att=\"1\"");
        assert_eq!(double.unquoted_value(), Some("1"));
    }

    #[test]
    fn test_dequote_edge_cases() {
        assert_eq!(dequote("\""), "\"");
        assert_eq!(dequote("\"\""), "");
        assert_eq!(dequote("'mixed\""), "'mixed\"");
        assert_eq!(dequote("plain"), "plain");
        assert_eq!(dequote("''x''"), "'x'");
    }

    #[test]
    fn test_lookup_is_case_insensitive_first_match() {
        let list: AttributeList = [
            Attribute::new("HREF"),
            Attribute::with_value("href", "'first'"),
            Attribute::with_value("Href", "second"),
        ]
        .into_iter()
        .collect();

        assert_eq!(list.len(), 3);
        assert!(list.contains("href"));
        assert!(list.has_value("HREF"));
        assert_eq!(list.value("href"), Some("first"));
        assert_eq!(list.get("href").map(|a| a.name.as_str()), Some("HREF"));
        assert_eq!(list.value("missing"), None);
    }

    #[test]
    fn test_empty_value_is_not_missing() {
        let list: AttributeList = [Attribute::with_value("alt", "\"\"")].into_iter().collect();
        assert_eq!(list.value("alt"), Some(""));
        assert!(list.has_value("alt"));
    }
}
