use eyre::{Result, eyre};

/// A single completion event as reported by the shell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionRequest {
    pub words: Vec<String>,
    pub cword: usize,
}

impl CompletionRequest {
    pub fn new(words: Vec<String>, cword: usize) -> Self {
        Self { words, cword }
    }

    /// The partial word under the cursor; empty when the index is past the end
    pub fn current(&self) -> &str {
        self.words.get(self.cword).map(String::as_str).unwrap_or("")
    }

    /// The word immediately before the cursor
    pub fn previous(&self) -> &str {
        self.cword
            .checked_sub(1)
            .and_then(|i| self.words.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Words already on the line, the command name included; the word being completed is not
    pub fn typed_words(&self) -> impl Iterator<Item = &str> {
        self.words
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != self.cword)
            .map(|(_, w)| w.as_str())
    }

    /// Parse a session line: `<cword>\t<word0>\t<word1>...`
    pub fn from_line(line: &str) -> Result<Self> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let mut fields = line.split('\t');
        let cword = fields
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| eyre!("empty completion request"))?;
        let cword = cword
            .trim()
            .parse::<usize>()
            .map_err(|e| eyre!("invalid word index '{}': {}", cword, e))?;
        let words = fields.map(String::from).collect();
        Ok(Self { words, cword })
    }
}
