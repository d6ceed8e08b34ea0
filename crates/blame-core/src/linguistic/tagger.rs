/// Tagging primitives shared by the linguistic rewriters.
///
/// A [`Tagger`] turns a piece of text into [`Token`]s that remember their byte
/// span in the input, so rewriters can splice replacements into the original
/// text without re-rendering it.

/// Coarse part of speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pos {
    Noun,
    ProperNoun,
    Pronoun,
    Verb,
    Auxiliary,
    Adjective,
    Adverb,
    Determiner,
    Preposition,
    Conjunction,
    /// Possessive `'s`.
    Particle,
    Number,
    Punctuation,
}

/// Named-entity category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Person,
    Organization,
    Place,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// Byte offset of the first character in the tagged text.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
    /// Zero-based index of the sentence this token belongs to.
    pub sentence: usize,
    pub pos: Pos,
    /// Set on verbs and auxiliaries in past tense or past participle form.
    pub past: bool,
    pub entity: Option<EntityKind>,
}

impl Token {
    pub fn is_noun(&self) -> bool {
        matches!(self.pos, Pos::Noun | Pos::ProperNoun | Pos::Pronoun)
    }

    pub fn is_verb(&self) -> bool {
        matches!(self.pos, Pos::Verb | Pos::Auxiliary)
    }

    pub fn is_word(&self) -> bool {
        !matches!(self.pos, Pos::Punctuation)
    }

    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }
}

/// Part-of-speech and entity tagger.
///
/// Implementations must return tokens in text order with non-overlapping,
/// increasing spans.
pub trait Tagger {
    fn tag(&self, text: &str) -> Vec<Token>;
}

/// A run of consecutive tokens sharing one entity kind, e.g. "Joe Biden".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mention {
    pub kind: EntityKind,
    /// Index of the first token in the run.
    pub first: usize,
    /// Index one past the last token in the run.
    pub last: usize,
    pub start: usize,
    pub end: usize,
}

impl Mention {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// Group entity-tagged tokens into mentions.
pub fn mentions(tokens: &[Token]) -> Vec<Mention> {
    let mut out: Vec<Mention> = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        let Some(kind) = token.entity else {
            continue;
        };
        match out.last_mut() {
            Some(prev) if prev.kind == kind && prev.last == i => {
                prev.last = i + 1;
                prev.end = token.end;
            }
            _ => out.push(Mention {
                kind,
                first: i,
                last: i + 1,
                start: token.start,
                end: token.end,
            }),
        }
    }
    out
}

/// A pending text replacement over a byte range. Empty ranges are insertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

/// Apply non-overlapping edits to `text`.
///
/// Edits are applied back to front so earlier offsets stay valid.
pub fn apply_edits(text: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by(|a, b| b.start.cmp(&a.start).then(b.end.cmp(&a.end)));
    let mut out = text.to_string();
    for edit in edits {
        out.replace_range(edit.start..edit.end, &edit.replacement);
    }
    out
}
