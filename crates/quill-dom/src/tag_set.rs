/// A fixed set of tag names with ASCII case-insensitive membership.
///
/// The sets this toolkit uses are small (a dozen or so names), so a linear
/// scan beats hashing a lowercased copy of every lookup.
///
/// ```
/// use quill_dom::TagSet;
///
/// const HEADINGS: TagSet = TagSet::new(&["H1", "H2"]);
/// assert!(HEADINGS.contains("h2"));
/// assert!(!HEADINGS.contains("h3"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TagSet {
    names: &'static [&'static str],
}

impl TagSet {
    /// A set over the given names.
    #[must_use]
    pub const fn new(names: &'static [&'static str]) -> Self {
        Self { names }
    }

    /// Whether `name` is in the set, ignoring ASCII case.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n.eq_ignore_ascii_case(name))
    }

    /// The names as declared.
    #[must_use]
    pub const fn names(&self) -> &'static [&'static str] {
        self.names
    }
}

/// Blocks whose content keeps its original layout: no trimming, no
/// wrapping, no indentation.
pub const PREFORMATTED: TagSet = TagSet::new(&["PRE", "SCRIPT", "STYLE"]);
