//! Lexical classification of the client's self-reported vocabulary.
//!
//! `<client> bash-completion` prints a single line of space-separated tokens
//! mixing global flags and subcommand names. Tokens starting with `-` are
//! flags, everything else is an option (subcommand).

use regex::Regex;
use serde::Serialize;

/// Placeholders the client emits for its own help/interactive switches
pub const DEFAULT_STRIP: &[&str] = &["-h", "-i"];

/// A classified vocabulary token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Flag(String),
    Option(String),
}

impl Token {
    pub fn classify(raw: &str) -> Self {
        if raw.starts_with('-') {
            Token::Flag(raw.to_string())
        } else {
            Token::Option(raw.to_string())
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Token::Flag(s) | Token::Option(s) => s,
        }
    }
}

/// Split a raw vocabulary line into classified tokens, dropping placeholders
pub fn tokenize<S: AsRef<str>>(line: &str, strip: &[S]) -> Vec<Token> {
    line.split_whitespace()
        .filter(|raw| !strip.iter().any(|s| s.as_ref() == *raw))
        .map(Token::classify)
        .collect()
}

/// Options and flags partitioned from one raw line
#[derive(Debug, Clone, Serialize)]
pub struct Vocabulary {
    pub options: Vec<String>,
    pub flags: Vec<String>,
    #[serde(skip)]
    matcher: Option<Regex>,
}

impl Vocabulary {
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        let mut options = Vec::new();
        let mut flags = Vec::new();
        for token in tokens {
            match token {
                Token::Flag(s) => flags.push(s),
                Token::Option(s) => options.push(s),
            }
        }
        let matcher = option_alternation(&options);
        Self { options, flags, matcher }
    }

    pub fn parse<S: AsRef<str>>(line: &str, strip: &[S]) -> Self {
        Self::from_tokens(tokenize(line, strip))
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty() && self.flags.is_empty()
    }

    /// Whether `word` is exactly one of the known options
    pub fn is_option(&self, word: &str) -> bool {
        self.matcher.as_ref().is_some_and(|re| re.is_match(word))
    }
}

fn option_alternation(options: &[String]) -> Option<Regex> {
    if options.is_empty() {
        return None;
    }
    let alternation = options.iter().map(|o| regex::escape(o)).collect::<Vec<_>>().join("|");
    match Regex::new(&format!("^(?:{alternation})$")) {
        Ok(re) => Some(re),
        Err(e) => {
            log::warn!("Failed to build option matcher: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_example_line_partitions_in_order() {
        let vocab = Vocabulary::parse("magnum cluster-create --name -h cluster-delete -i", DEFAULT_STRIP);

        assert_eq!(vocab.options, vec!["magnum", "cluster-create", "cluster-delete"]);
        assert_eq!(vocab.flags, vec!["--name"]);
    }

    #[test]
    fn test_partition_is_disjoint_and_complete() {
        let line = "--debug --os-cloud bay-list cluster-list -h --version cluster-show -i help";
        let vocab = Vocabulary::parse(line, DEFAULT_STRIP);

        let options: HashSet<_> = vocab.options.iter().cloned().collect();
        let flags: HashSet<_> = vocab.flags.iter().cloned().collect();
        assert!(options.is_disjoint(&flags));

        let union: HashSet<_> = options.union(&flags).cloned().collect();
        let expected: HashSet<String> = line
            .split_whitespace()
            .filter(|t| *t != "-h" && *t != "-i")
            .map(String::from)
            .collect();
        assert_eq!(union, expected);
    }

    #[test]
    fn test_strip_only_matches_whole_tokens() {
        let tokens = tokenize("-h --help -i --insecure", DEFAULT_STRIP);
        let texts: Vec<_> = tokens.iter().map(Token::text).collect();
        assert_eq!(texts, vec!["--help", "--insecure"]);
    }

    #[test]
    fn test_custom_strip_list() {
        let vocab = Vocabulary::parse("-h -v cluster-list", &["-v"]);
        assert_eq!(vocab.flags, vec!["-h"]);
        assert_eq!(vocab.options, vec!["cluster-list"]);
    }

    #[test]
    fn test_is_option_is_exact_match() {
        let vocab = Vocabulary::parse("cluster-list cluster-show --name", DEFAULT_STRIP);

        assert!(vocab.is_option("cluster-list"));
        assert!(!vocab.is_option("cluster"));
        assert!(!vocab.is_option("cluster-list-all"));
        assert!(!vocab.is_option("--name"));
    }

    #[test]
    fn test_is_option_escapes_metacharacters() {
        let vocab = Vocabulary::parse("a.b c+", DEFAULT_STRIP);

        assert!(vocab.is_option("a.b"));
        assert!(!vocab.is_option("axb"));
        assert!(vocab.is_option("c+"));
        assert!(!vocab.is_option("cc"));
    }

    #[test]
    fn test_empty_line() {
        let vocab = Vocabulary::parse("   ", DEFAULT_STRIP);
        assert!(vocab.is_empty());
        assert!(!vocab.is_option(""));
    }
}
