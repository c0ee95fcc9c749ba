use serde::Serialize;

/// Named inline formatting attribute carried by a [`Span`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Mark {
    #[serde(rename = "strong")]
    Strong,
    #[serde(rename = "em")]
    Em,
    #[serde(rename = "code")]
    Code,
    #[serde(rename = "strike-through")]
    StrikeThrough,
    #[serde(rename = "link")]
    Link,
}

impl Mark {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mark::Strong => "strong",
            Mark::Em => "em",
            Mark::Code => "code",
            Mark::StrikeThrough => "strike-through",
            Mark::Link => "link",
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inline run of text with its formatting marks.
///
/// `marks` holds no duplicates and is ordered innermost-applied first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "span")]
pub struct Span {
    pub key: String,
    pub text: String,
    pub marks: Vec<Mark>,
}

impl Span {
    pub fn new(key: String, text: impl Into<String>) -> Self {
        Self {
            key,
            text: text.into(),
            marks: Vec::new(),
        }
    }

    /// Empty stand-in for inline content the engine does not recognize.
    pub fn placeholder(key: String) -> Self {
        Self::new(key, String::new())
    }

    /// Appends `mark` unless the span already carries it.
    pub fn with_mark(mut self, mark: Mark) -> Self {
        if !self.marks.contains(&mark) {
            self.marks.push(mark);
        }
        self
    }

    pub fn has_mark(&self, mark: Mark) -> bool {
        self.marks.contains(&mark)
    }
}
