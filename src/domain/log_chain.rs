/// One immutable audit line. The text already carries its timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    text: String,
}

impl LogEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Append-only sequence of log entries, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogChain {
    entries: Vec<LogEntry>,
}

impl LogChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, text: impl Into<String>) {
        self.entries.push(LogEntry::new(text));
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// The final `min(n, len)` entries, still oldest first.
    pub fn last_n(&self, n: usize) -> &[LogEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }
}

impl FromIterator<String> for LogChain {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().map(LogEntry::new).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_of(texts: &[&str]) -> LogChain {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn append_preserves_insertion_order() {
        let mut chain = LogChain::new();
        chain.append("first");
        chain.append("second");
        chain.append("third");

        let texts: Vec<&str> = chain.iter().map(LogEntry::text).collect();
        assert_eq!(texts, ["first", "second", "third"]);
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn last_n_returns_tail_in_insertion_order() {
        let chain = chain_of(&["a", "b", "c", "d", "e", "f", "g"]);

        let tail: Vec<&str> = chain.last_n(5).iter().map(LogEntry::text).collect();
        assert_eq!(tail, ["c", "d", "e", "f", "g"]);
    }

    #[test]
    fn last_n_larger_than_chain_returns_everything() {
        let chain = chain_of(&["a", "b"]);
        assert_eq!(chain.last_n(5), chain.entries());
        assert!(chain.last_n(0).is_empty());
    }

    #[test]
    fn empty_chain() {
        let chain = LogChain::new();
        assert!(chain.is_empty());
        assert!(chain.last_n(3).is_empty());
    }
}
