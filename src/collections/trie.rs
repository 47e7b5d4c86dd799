//! Prefix tree over a 128-symbol ASCII alphabet, used for title autocomplete.
//!
//! Words are folded to ASCII lowercase on the way in. Characters outside the alphabet
//! (anything non-ASCII) are dropped from the path, so "Café" is stored as "caf" and two
//! titles that differ only in such characters end up on the same path.

/// Number of child slots per node
pub const ALPHABET_SIZE: usize = 128;

#[derive(Debug)]
struct TrieNode {
    children: Box<[Option<Box<TrieNode>>; ALPHABET_SIZE]>,
    is_end: bool,
}

impl TrieNode {
    fn new() -> Self {
        Self {
            children: Box::new(std::array::from_fn(|_| None)),
            is_end: false,
        }
    }
}

/// Fold a character into a child slot, or `None` when it is outside the alphabet
fn slot(c: char) -> Option<usize> {
    let folded = c.to_ascii_lowercase();
    folded.is_ascii().then_some(folded as usize)
}

#[derive(Debug)]
pub struct Trie {
    root: TrieNode,
    words: usize,
}

impl Trie {
    pub fn new() -> Self {
        Self {
            root: TrieNode::new(),
            words: 0,
        }
    }

    /// Insert a word. Inserting a word that is already present changes nothing.
    pub fn insert(&mut self, word: &str) {
        let mut node = &mut self.root;
        for index in word.chars().filter_map(slot) {
            node = node.children[index].get_or_insert_with(|| Box::new(TrieNode::new()));
        }
        if !node.is_end {
            node.is_end = true;
            self.words += 1;
        }
    }

    /// Check whether `word` (after folding) was inserted
    pub fn contains(&self, word: &str) -> bool {
        self.find_node(word).is_some_and(|node| node.is_end)
    }

    /// Every inserted word that starts with `prefix`.
    ///
    /// Each result is `prefix` exactly as given followed by the stored (lowercase) rest of the
    /// word. Results come out in alphabet-index order, which is lexicographic over ASCII. An
    /// empty prefix returns every word; an unknown prefix returns nothing.
    pub fn get_auto_complete(&self, prefix: &str) -> Vec<String> {
        let mut results = Vec::new();
        if let Some(start) = self.find_node(prefix) {
            let mut buffer = prefix.to_string();
            collect(start, &mut buffer, &mut results);
        }
        results
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    fn find_node(&self, prefix: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for index in prefix.chars().filter_map(slot) {
            node = node.children[index].as_deref()?;
        }
        Some(node)
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

fn collect(node: &TrieNode, buffer: &mut String, results: &mut Vec<String>) {
    if node.is_end {
        results.push(buffer.clone());
    }
    for (index, child) in node.children.iter().enumerate() {
        if let Some(child) = child {
            // index < 128, always a valid ASCII char
            buffer.push(char::from(index as u8));
            collect(child, buffer, results);
            buffer.pop();
        }
    }
}
