//! Camel-case word segmentation

/// Word segments of a `PascalCase` or `camelCase` identifier
///
/// Segments borrow from the input and cover all of it, so joining them gives
/// the input back. A new segment starts at an uppercase letter that follows
/// a lowercase letter or digit, and at the last capital of an acronym that is
/// followed by a lowercase letter. Digits stay with the preceding segment.
///
/// ```
/// # use entity_scaffold::helpers::CamelCaseParts;
/// let parts = CamelCaseParts::new("HTTPLevel2FormType");
/// assert_eq!(parts.as_slice(), ["HTTP", "Level2", "Form", "Type"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CamelCaseParts<'a> {
    source: &'a str,
    parts: Vec<&'a str>,
}

impl<'a> CamelCaseParts<'a> {
    /// Segment `source`
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        let chars: Vec<(usize, char)> = source.char_indices().collect();
        let mut parts = Vec::new();
        let mut start = 0;

        for (pos, &(offset, ch)) in chars.iter().enumerate().skip(1) {
            if !ch.is_uppercase() {
                continue;
            }
            let prev = chars[pos - 1].1;
            let next = chars.get(pos + 1).map(|&(_, c)| c);
            let after_word = prev.is_lowercase() || prev.is_ascii_digit();
            let ends_acronym = prev.is_uppercase() && next.is_some_and(char::is_lowercase);

            if after_word || ends_acronym {
                parts.push(&source[start..offset]);
                start = offset;
            }
        }
        if start < source.len() {
            parts.push(&source[start..]);
        }

        Self { source, parts }
    }

    /// Segments in order
    #[must_use]
    pub const fn as_slice(&self) -> &[&'a str] {
        self.parts.as_slice()
    }

    /// Number of segments
    #[must_use]
    pub const fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the source had no characters
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// How many trailing segments equal the aligned trailing segments of `other`
    ///
    /// Counting walks backward and stops at the first mismatch or when either
    /// side runs out of segments.
    #[must_use]
    pub fn shared_tail_len(&self, other: &CamelCaseParts<'_>) -> usize {
        self.parts
            .iter()
            .rev()
            .zip(other.parts.iter().rev())
            .take_while(|(own, theirs)| own == theirs)
            .count()
    }

    /// The source text without its last `count` segments
    #[must_use]
    pub fn without_last(&self, count: usize) -> &'a str {
        let keep = self.parts.len().saturating_sub(count);
        let end: usize = self.parts[..keep].iter().map(|part| part.len()).sum();
        &self.source[..end]
    }
}
