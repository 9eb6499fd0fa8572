//! Part-of-speech tagging and noun-phrase chunking
//!
//! The keyword extractor only needs two linguistic capabilities: a tag per
//! token and a list of noun-phrase spans. Both sit behind traits so callers
//! can plug in any tagger; `LexiconTagger` and `NounPhraseChunker` are the
//! built-in rule-based implementations for English job descriptions.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Coarse universal part-of-speech tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosTag {
    Noun,
    ProperNoun,
    Pronoun,
    Verb,
    Auxiliary,
    Adjective,
    Adverb,
    Determiner,
    Adposition,
    Conjunction,
    Numeral,
    Particle,
    Punctuation,
    Other,
}

impl PosTag {
    /// Common or proper noun
    pub fn is_noun(&self) -> bool {
        matches!(self, PosTag::Noun | PosTag::ProperNoun)
    }

    /// Tags that may sit inside a noun phrase ahead of its head
    fn is_modifier(&self) -> bool {
        matches!(self, PosTag::Adjective | PosTag::Numeral) || self.is_noun()
    }
}

/// A whitespace-delimited token with edge punctuation removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// Punctuation such as `,` `.` `)` followed this token in the source
    pub closes_clause: bool,
}

pub trait Tagger: Send + Sync {
    /// Returns exactly one tag per token
    fn tag(&self, tokens: &[Token<'_>]) -> Vec<PosTag>;
}

pub trait Chunker: Send + Sync {
    /// Maximal noun-phrase spans in source order
    fn noun_chunks(&self, text: &str) -> Vec<String>;
}

const CLAUSE_BREAKS: &[char] = &[
    ',', ';', ':', '.', '!', '?', '(', ')', '[', ']', '{', '}', '|', '•', '"', '“', '”',
];

fn is_edge_char(c: char) -> bool {
    !(c.is_alphanumeric() || c == '+' || c == '#')
}

/// Split on whitespace and peel punctuation off both ends of every token.
/// `+` and `#` are kept so that `C++` and `C#` survive.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens: Vec<Token<'_>> = Vec::new();

    for raw in text.split_whitespace() {
        let core = raw.trim_matches(is_edge_char);
        let leading = &raw[..raw.len() - raw.trim_start_matches(is_edge_char).len()];
        let trailing = &raw[raw.trim_end_matches(is_edge_char).len()..];

        if leading.contains(CLAUSE_BREAKS) || (core.is_empty() && raw.contains(CLAUSE_BREAKS)) {
            if let Some(previous) = tokens.last_mut() {
                previous.closes_clause = true;
            }
        }

        if core.is_empty() {
            continue;
        }

        tokens.push(Token {
            text: core,
            closes_clause: trailing.contains(CLAUSE_BREAKS),
        });
    }

    tokens
}

/// Rule-based English tagger: closed-class lexicons, a small vocabulary of
/// job-posting verbs and adjectives, suffix heuristics and capitalization.
/// Anything left unclassified is a noun.
#[derive(Debug, Clone, Default)]
pub struct LexiconTagger;

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "any", "some", "all",
    "no", "our", "your", "their", "its", "my", "his", "her", "another", "either", "neither",
    "such", "both", "whose",
];

const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "who", "whom", "what",
    "which", "yourself", "ourselves", "themselves", "itself", "anyone", "someone", "everyone",
    "anything", "something", "everything", "nothing", "yours", "ours", "theirs",
];

const ADPOSITIONS: &[&str] = &[
    "in", "on", "at", "of", "for", "with", "to", "from", "by", "about", "into", "across",
    "within", "without", "through", "over", "under", "between", "among", "during", "including",
    "like", "via", "per", "than", "as", "upon", "toward", "towards", "around", "after", "before",
    "above", "below", "along", "beyond", "throughout", "onto", "out", "off", "against", "&",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "yet", "while", "whereas", "because", "although", "though", "if",
    "unless", "whether", "so", "plus", "and/or",
];

const AUXILIARIES: &[&str] = &[
    "is", "are", "was", "were", "be", "been", "being", "am", "have", "has", "had", "do", "does",
    "did", "will", "would", "shall", "should", "can", "could", "may", "might", "must",
];

const PARTICLES: &[&str] = &["not", "n't", "'s"];

const ADVERBS: &[&str] = &[
    "very", "also", "well", "often", "always", "never", "just", "only", "already", "too", "more",
    "most", "less", "least", "ideally", "preferably", "highly", "strongly", "currently", "here",
    "there", "where", "when", "how", "why", "then", "now", "again", "etc",
];

const VERBS: &[&str] = &[
    "collaborate", "ensure", "develop", "implement", "maintain", "deliver", "seek",
    "require", "requires", "communicate", "optimize", "optimise", "analyze", "analyse",
    "contribute", "participate", "understand", "troubleshoot", "integrate", "automate",
    "identify", "provide", "provides", "create", "improve", "write", "join", "enable", "define",
    "apply", "operate", "assist", "coordinate", "translate", "prioritize", "prioritise", "utilize",
    "utilise", "leverage", "drive", "thrive", "grow", "learn", "solve", "make", "take", "bring",
    "get", "know", "want", "love", "enjoy", "offer", "offers", "include", "includes", "looking",
    "seeking", "working", "using", "building", "developing", "making",
];

/// Words that are nouns unless the context marks them as verbs
const NOUN_OR_VERB: &[&str] = &[
    "work", "design", "lead", "support", "test", "review", "plan", "report", "document", "help",
    "use", "need", "build", "scale", "own", "ship", "code", "mentor", "partner", "manage",
    "architect", "model", "process", "program", "research", "run", "deploy", "monitor", "debug",
];

const ADJECTIVES: &[&str] = &[
    "strong", "excellent", "good", "great", "senior", "junior", "new", "large", "small", "high",
    "low", "fast", "solid", "proven", "deep", "best", "better", "key", "hands-on", "fluent",
    "cross-functional", "remote", "full", "full-time", "part-time", "several", "various",
    "multiple", "other", "similar", "related", "relevant", "modern", "complex", "familiar",
    "proficient", "skilled", "detail-oriented", "motivated", "passionate", "eager", "able",
    "dynamic", "strategic", "competitive", "minimum", "preferred", "required", "bonus", "nice",
    "hybrid", "growing", "fast-paced", "efficient", "independent", "different", "significant",
    "important", "recent", "consistent", "current",
];

/// -ing forms that are read as nouns (fields and activities)
const NOUN_ING: &[&str] = &[
    "learning", "engineering", "testing", "marketing", "computing", "processing", "programming",
    "modeling", "modelling", "networking", "training", "accounting", "banking", "manufacturing",
    "scheduling", "planning", "pricing", "hosting", "logging", "monitoring", "tracking",
    "reporting", "caching", "scripting", "debugging", "onboarding", "recruiting", "consulting",
    "budgeting", "forecasting", "meeting", "setting", "writing", "thing", "something", "string",
    "spring", "ring", "king", "ceiling", "clothing", "housing", "funding", "wording",
];

/// -ly words that are not adverbs
const NON_ADVERB_LY: &[&str] = &[
    "supply", "family", "assembly", "reply", "apply", "rely", "italy", "july", "anomaly",
    "monopoly", "ally", "fly", "butterfly", "poly",
];

const NOUN_ED: &[&str] = &["speed", "seed", "feed", "breed", "shed", "red", "bed", "need"];

const NOUN_ADJ_SUFFIX: &[&str] = &[
    "proposal", "approval", "portal", "terminal", "journal", "signal", "capital", "hospital",
    "arrival", "referral", "rental", "material", "interval", "tutorial", "principal", "animal",
    "manual", "total", "goal", "deal", "professional", "individual", "potential", "executive",
    "representative", "objective", "initiative", "alternative", "narrative", "incentive",
    "perspective", "archive", "directive", "variable", "deliverable", "table", "cable",
    "timetable", "vegetable", "bible",
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "able", "ible", "ive", "al", "less",
];

impl LexiconTagger {
    pub fn new() -> Self {
        Self
    }

    /// `after_verb_and` marks a word following "<verb> and|or", which shares
    /// the verb reading ("design and build").
    fn classify(
        &self,
        word: &str,
        clause_start: bool,
        previous: Option<(&str, PosTag)>,
        after_verb_and: bool,
    ) -> PosTag {
        let lower = word.to_lowercase();
        let lower = lower.as_str();

        if !word.chars().any(char::is_alphanumeric) {
            return PosTag::Punctuation;
        }
        if word.chars().all(|c| c.is_ascii_digit() || matches!(c, '+' | '%' | ',' | '.' | '-' | '$')) {
            return PosTag::Numeral;
        }

        if DETERMINERS.contains(&lower) {
            return PosTag::Determiner;
        }
        if PRONOUNS.contains(&lower) {
            return PosTag::Pronoun;
        }
        if AUXILIARIES.contains(&lower) {
            return PosTag::Auxiliary;
        }
        if PARTICLES.contains(&lower) {
            return PosTag::Particle;
        }
        if CONJUNCTIONS.contains(&lower) {
            return PosTag::Conjunction;
        }
        if ADPOSITIONS.contains(&lower) {
            return PosTag::Adposition;
        }
        if ADVERBS.contains(&lower) {
            return PosTag::Adverb;
        }

        if NOUN_OR_VERB.contains(&lower) {
            let verbal_context = clause_start
                || after_verb_and
                || matches!(
                    previous,
                    Some((_, PosTag::Pronoun | PosTag::Auxiliary | PosTag::Particle | PosTag::Adverb))
                )
                || matches!(previous, Some((prev, _)) if prev.eq_ignore_ascii_case("to"));
            return if verbal_context { PosTag::Verb } else { PosTag::Noun };
        }
        if VERBS.contains(&lower) {
            return PosTag::Verb;
        }
        if ADJECTIVES.contains(&lower) {
            return PosTag::Adjective;
        }

        if let Some(tag) = Self::classify_by_case(word, clause_start) {
            return tag;
        }

        Self::classify_by_suffix(lower)
    }

    fn classify_by_case(word: &str, clause_start: bool) -> Option<PosTag> {
        let mut chars = word.chars();
        let first = chars.next()?;
        let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();

        let acronym = letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase());
        let inner_capital = chars.any(|c| c.is_uppercase());
        let capitalized = first.is_uppercase();

        if acronym || inner_capital || (capitalized && !clause_start) {
            Some(PosTag::ProperNoun)
        } else {
            None
        }
    }

    fn classify_by_suffix(lower: &str) -> PosTag {
        let long = lower.chars().count() > 4;

        if lower.chars().any(|c| c.is_ascii_digit() || c == '+' || c == '#') {
            return PosTag::Noun;
        }
        if NOUN_ADJ_SUFFIX.contains(&lower) || NOUN_ING.contains(&lower) {
            return PosTag::Noun;
        }
        if long && lower.ends_with("ly") && !NON_ADVERB_LY.contains(&lower) {
            return PosTag::Adverb;
        }
        if long && (lower.ends_with("ing") || lower.ends_with("ize")) {
            return PosTag::Verb;
        }
        if long && lower.ends_with("ed") && !NOUN_ED.contains(&lower) {
            return PosTag::Verb;
        }
        if long && ADJECTIVE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix)) {
            return PosTag::Adjective;
        }

        PosTag::Noun
    }
}

impl Tagger for LexiconTagger {
    fn tag(&self, tokens: &[Token<'_>]) -> Vec<PosTag> {
        let mut tags: Vec<PosTag> = Vec::with_capacity(tokens.len());

        for (i, token) in tokens.iter().enumerate() {
            let clause_start = i == 0 || tokens[i - 1].closes_clause;
            let previous = if clause_start {
                None
            } else {
                Some((tokens[i - 1].text, tags[i - 1]))
            };
            let after_verb_and = !clause_start
                && i >= 2
                && tags[i - 1] == PosTag::Conjunction
                && tags[i - 2] == PosTag::Verb
                && !tokens[i - 2].closes_clause;
            tags.push(self.classify(token.text, clause_start, previous, after_verb_and));
        }

        // Participles directly in front of a noun act as adjectives
        // ("distributed systems", "required skills")
        for i in 0..tokens.len() {
            let participle = tags[i] == PosTag::Verb && tokens[i].text.to_lowercase().ends_with("ed");
            let before_noun = !tokens[i].closes_clause
                && tags.get(i + 1).map_or(false, |next| next.is_noun() || *next == PosTag::Adjective);
            let after_auxiliary = i > 0 && matches!(tags[i - 1], PosTag::Auxiliary | PosTag::Pronoun);

            if participle && before_noun && !after_auxiliary {
                tags[i] = PosTag::Adjective;
            }
        }

        tags
    }
}

/// Groups tagged tokens into maximal noun phrases. Determiners are left
/// out of the span; a lone pronoun is its own phrase.
pub struct NounPhraseChunker<T: Tagger> {
    tagger: T,
}

impl<T: Tagger> NounPhraseChunker<T> {
    pub fn new(tagger: T) -> Self {
        Self { tagger }
    }

    fn chunk_sentence(&self, sentence: &str, chunks: &mut Vec<String>) {
        let tokens = tokenize(sentence);
        let tags = self.tagger.tag(&tokens);

        let mut span: Vec<(&str, PosTag)> = Vec::new();
        for (token, tag) in tokens.iter().zip(tags.iter().copied()) {
            if tag == PosTag::Pronoun {
                Self::flush(&mut span, chunks);
                chunks.push(token.text.to_string());
            } else if tag.is_modifier() {
                span.push((token.text, tag));
            } else {
                Self::flush(&mut span, chunks);
            }

            if token.closes_clause {
                Self::flush(&mut span, chunks);
            }
        }
        Self::flush(&mut span, chunks);
    }

    /// Emit the span up to its last noun; a span without a noun head is dropped
    fn flush(span: &mut Vec<(&str, PosTag)>, chunks: &mut Vec<String>) {
        if let Some(head) = span.iter().rposition(|(_, tag)| tag.is_noun()) {
            let phrase = span[..=head]
                .iter()
                .map(|(text, _)| *text)
                .collect::<Vec<_>>()
                .join(" ");
            chunks.push(phrase);
        }
        span.clear();
    }
}

impl<T: Tagger> Chunker for NounPhraseChunker<T> {
    fn noun_chunks(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        for sentence in text.unicode_sentences() {
            self.chunk_sentence(sentence, &mut chunks);
        }
        chunks
    }
}

impl Default for NounPhraseChunker<LexiconTagger> {
    fn default() -> Self {
        Self::new(LexiconTagger::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags_for(text: &str) -> Vec<(String, PosTag)> {
        let tokens = tokenize(text);
        let tags = LexiconTagger::new().tag(&tokens);
        tokens
            .iter()
            .map(|t| t.text.to_string())
            .zip(tags)
            .collect()
    }

    fn tag_of(tagged: &[(String, PosTag)], word: &str) -> PosTag {
        tagged
            .iter()
            .find(|(text, _)| text == word)
            .map(|(_, tag)| *tag)
            .unwrap_or_else(|| panic!("token {} not found", word))
    }

    #[test]
    fn test_tokenize_strips_edge_punctuation() {
        let tokens = tokenize("Skills: (Python), C++, C#, Node.js.");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["Skills", "Python", "C++", "C#", "Node.js"]);
        assert!(tokens.iter().all(|t| t.closes_clause));
    }

    #[test]
    fn test_tokenize_standalone_punctuation_closes_previous() {
        let tokens = tokenize("Rust - Go • Kubernetes");
        assert_eq!(tokens.len(), 3);
        assert!(!tokens[0].closes_clause);
        assert!(tokens[1].closes_clause);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ,, ... ").is_empty());
    }

    #[test]
    fn test_tagger_returns_one_tag_per_token() {
        let tokens = tokenize("We are hiring a senior engineer with Rust and Kafka experience.");
        assert_eq!(LexiconTagger::new().tag(&tokens).len(), tokens.len());
    }

    #[test]
    fn test_tagger_closed_classes_and_nouns() {
        let tagged = tags_for("We need an engineer with experience in Python and Kubernetes");
        assert_eq!(tag_of(&tagged, "We"), PosTag::Pronoun);
        assert_eq!(tag_of(&tagged, "an"), PosTag::Determiner);
        assert_eq!(tag_of(&tagged, "with"), PosTag::Adposition);
        assert_eq!(tag_of(&tagged, "and"), PosTag::Conjunction);
        assert_eq!(tag_of(&tagged, "engineer"), PosTag::Noun);
        assert_eq!(tag_of(&tagged, "experience"), PosTag::Noun);
        assert_eq!(tag_of(&tagged, "Python"), PosTag::ProperNoun);
        assert_eq!(tag_of(&tagged, "Kubernetes"), PosTag::ProperNoun);
    }

    #[test]
    fn test_tagger_context_for_ambiguous_words() {
        let tagged = tags_for("You will design APIs and own the system design");
        let design_tags: Vec<PosTag> = tagged
            .iter()
            .filter(|(text, _)| text == "design")
            .map(|(_, tag)| *tag)
            .collect();
        assert_eq!(design_tags, vec![PosTag::Verb, PosTag::Noun]);
        assert_eq!(tag_of(&tagged, "APIs"), PosTag::ProperNoun);
    }

    #[test]
    fn test_tagger_coordinated_verbs() {
        let tagged = tags_for("Design and build scalable REST APIs");
        assert_eq!(tag_of(&tagged, "Design"), PosTag::Verb);
        assert_eq!(tag_of(&tagged, "build"), PosTag::Verb);
        assert_eq!(tag_of(&tagged, "REST"), PosTag::ProperNoun);

        // A conjunction after a noun keeps the noun reading
        let tagged = tags_for("Experience with Rust and design");
        assert_eq!(tag_of(&tagged, "design"), PosTag::Noun);
    }

    #[test]
    fn test_chunker_skips_coordinated_verbs() {
        let chunks = NounPhraseChunker::default().noun_chunks("Design and build scalable REST APIs");
        assert_eq!(chunks, vec!["scalable REST APIs"]);
    }

    #[test]
    fn test_tagger_suffix_rules() {
        let tagged = tags_for("candidates quickly building scalable pipelines using distributed systems");
        assert_eq!(tag_of(&tagged, "quickly"), PosTag::Adverb);
        assert_eq!(tag_of(&tagged, "building"), PosTag::Verb);
        assert_eq!(tag_of(&tagged, "scalable"), PosTag::Adjective);
        assert_eq!(tag_of(&tagged, "distributed"), PosTag::Adjective);
        assert_eq!(tag_of(&tagged, "systems"), PosTag::Noun);
        assert_eq!(tag_of(&tagged, "pipelines"), PosTag::Noun);
    }

    #[test]
    fn test_tagger_numerals_and_acronyms() {
        let tagged = tags_for("5+ years of AWS and SQL");
        assert_eq!(tag_of(&tagged, "5+"), PosTag::Numeral);
        assert_eq!(tag_of(&tagged, "AWS"), PosTag::ProperNoun);
        assert_eq!(tag_of(&tagged, "SQL"), PosTag::ProperNoun);
    }

    #[test]
    fn test_chunker_maximal_spans() {
        let chunker = NounPhraseChunker::default();
        let chunks = chunker.noun_chunks(
            "We are looking for a senior software engineer with strong Python skills. \
             Experience with distributed systems is required.",
        );
        assert_eq!(
            chunks,
            vec![
                "We",
                "senior software engineer",
                "strong Python skills",
                "Experience",
                "distributed systems",
            ]
        );
    }

    #[test]
    fn test_chunker_breaks_on_commas() {
        let chunker = NounPhraseChunker::default();
        let chunks = chunker.noun_chunks("Tools: Docker, Kubernetes, Terraform");
        assert_eq!(chunks, vec!["Tools", "Docker", "Kubernetes", "Terraform"]);
    }

    #[test]
    fn test_chunker_drops_spans_without_head() {
        struct AdjectivesOnly;
        impl Tagger for AdjectivesOnly {
            fn tag(&self, tokens: &[Token<'_>]) -> Vec<PosTag> {
                vec![PosTag::Adjective; tokens.len()]
            }
        }

        let chunker = NounPhraseChunker::new(AdjectivesOnly);
        assert!(chunker.noun_chunks("fast reliable scalable").is_empty());
    }

    #[test]
    fn test_chunker_empty_text() {
        assert!(NounPhraseChunker::default().noun_chunks("").is_empty());
    }
}
