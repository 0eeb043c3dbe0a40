//! Line-oriented parser for uploaded question documents.
//!
//! # Format
//! ```text
//! Question 1
//! In a right-angled triangle, the hypotenuse is 5 units and one side
//! is 3 units. What is the length of the other side?
//! Source: School Exam
//! School: St. Paul's College
//! Topic: Geometry
//! Type: MC
//! (a) 4 units
//! (b) 6 units
//! Correct Answer: a
//! Marking Scheme: Use Pythagoras' theorem.
//! $b = 4$ units
//! ```
//!
//! Every line is first tagged (question marker, marking scheme marker,
//! metadata field, option, plain text) and the tag then drives a small
//! state machine owning the draft being built. Parsing never fails:
//! lines that fit nowhere are dropped and missing fields stay empty.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::metadata::{answer_index, answer_label};
use crate::types::{CorrectAnswer, LabeledOption, QuestionDraft, QuestionType};

const QUESTION_PATTERN: &str = r"^Question\s+(\S+)";
const OPTION_PATTERN: &str = r"^\(([a-zA-Z])\)\s*(.*)";
const MARKING_SCHEME_LABEL: &str = "Marking Scheme:";

/// Parse trimmed document lines into question drafts, in document order.
pub fn parse<S: AsRef<str>>(lines: &[S]) -> Vec<QuestionDraft> {
    let mut parser = Parser::new();
    let mut cursor = 0;

    while cursor < lines.len() {
        cursor += parser.process_line(lines, cursor);
    }

    let drafts = parser.finalize();
    debug!(count = drafts.len(), "parsed question drafts");
    drafts
}

/// Split extracted text into trimmed lines and parse them.
pub fn parse_text(text: &str) -> Vec<QuestionDraft> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    parse(&lines)
}

/// Human-readable rendition of a draft for review screens.
pub fn display_text(draft: &QuestionDraft) -> String {
    let options = draft
        .preview
        .formatted_options
        .iter()
        .map(|opt| format!("({}) {}", opt.label, opt.text))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Question {}\n\n{}\n\n{}\n\nCorrect Answer: {}",
        draft.question_number, draft.content, options, draft.preview.correct_answer_label
    )
}

/// Labeled single-line metadata fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    Source,
    Topic,
    Type,
    Year,
    School,
    Textbook,
    CorrectAnswer,
}

impl MetadataField {
    pub const ALL: [MetadataField; 7] = [
        Self::Source,
        Self::Topic,
        Self::Type,
        Self::Year,
        Self::School,
        Self::Textbook,
        Self::CorrectAnswer,
    ];

    /// Line prefix introducing the field, colon included.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Source => "Source:",
            Self::Topic => "Topic:",
            Self::Type => "Type:",
            Self::Year => "Year:",
            Self::School => "School:",
            Self::Textbook => "Textbook:",
            Self::CorrectAnswer => "Correct Answer:",
        }
    }
}

/// Classification of a single line, before any state is consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LineType<'a> {
    Question(&'a str),
    MarkingScheme(&'a str),
    Metadata(MetadataField, &'a str),
    Option,
    Text(&'a str),
}

fn question_regex() -> &'static Regex {
    static QUESTION_REGEX: OnceLock<Regex> = OnceLock::new();
    QUESTION_REGEX.get_or_init(|| Regex::new(QUESTION_PATTERN).unwrap())
}

fn option_regex() -> &'static Regex {
    static OPTION_REGEX: OnceLock<Regex> = OnceLock::new();
    OPTION_REGEX.get_or_init(|| Regex::new(OPTION_PATTERN).unwrap())
}

fn parse_line(line: &str) -> LineType<'_> {
    let trimmed = line.trim();

    if let Some(caps) = question_regex().captures(trimmed) {
        if let Some(number) = caps.get(1) {
            return LineType::Question(number.as_str());
        }
    }

    if let Some(rest) = trimmed.strip_prefix(MARKING_SCHEME_LABEL) {
        return LineType::MarkingScheme(rest.trim());
    }

    for field in MetadataField::ALL {
        if let Some(rest) = trimmed.strip_prefix(field.label()) {
            return LineType::Metadata(field, rest.trim());
        }
    }

    if option_regex().is_match(trimmed) {
        LineType::Option
    } else {
        LineType::Text(trimmed)
    }
}

fn parse_option(line: &str) -> Option<LabeledOption> {
    let caps = option_regex().captures(line)?;
    Some(LabeledOption {
        label: caps.get(1)?.as_str().trim().to_string(),
        text: caps.get(2).map_or("", |m| m.as_str()).trim().to_string(),
    })
}

/// Options read by one look-ahead scan.
#[derive(Debug, Default, PartialEq, Eq)]
struct OptionBlock {
    options: Vec<LabeledOption>,
    consumed: usize,
}

/// Read a contiguous option block starting at `start`.
///
/// Blank lines inside or after the block are consumed; the scan stops at
/// the first non-blank line that is not an option.
fn scan_options<S: AsRef<str>>(lines: &[S], start: usize) -> OptionBlock {
    let mut block = OptionBlock::default();

    for line in &lines[start..] {
        let trimmed = line.as_ref().trim();
        if trimmed.is_empty() {
            block.consumed += 1;
            continue;
        }
        match parse_option(trimmed) {
            Some(option) => {
                block.options.push(option);
                block.consumed += 1;
            }
            None => break,
        }
    }

    block
}

/// Join buffered lines, dropping blank ones.
///
/// Blank lines act as separators only, so paragraph breaks inside a block
/// are not kept.
fn flush_lines(lines: &[String]) -> String {
    lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Before the first question marker.
    Idle,
    CollectingContent,
    CollectingMarkingScheme,
    /// A metadata line closed the active block; plain text is dropped.
    AfterMetadata,
}

struct DraftBuilder {
    draft: QuestionDraft,
    buffer: Vec<String>,
}

impl DraftBuilder {
    fn new(question_number: &str) -> Self {
        Self {
            draft: QuestionDraft::new(question_number),
            buffer: Vec::new(),
        }
    }

    fn set_metadata(&mut self, field: MetadataField, value: &str) {
        let draft = &mut self.draft;
        match field {
            MetadataField::Source => draft.source = value.to_string(),
            MetadataField::Topic => draft.topic = value.to_string(),
            MetadataField::Type => {
                draft.question_type = value.to_string();
                if !draft.is_multiple_choice() && !draft.options.is_empty() {
                    debug!(
                        question = %draft.question_number,
                        "dropping options after non-MC type"
                    );
                    draft.options.clear();
                    draft.preview.formatted_options.clear();
                }
            }
            MetadataField::Year => draft.year = value.to_string(),
            MetadataField::School => draft.school = value.to_string(),
            MetadataField::Textbook => draft.textbook = value.to_string(),
            MetadataField::CorrectAnswer => {
                if draft.is_multiple_choice() {
                    draft.correct_answer = answer_index(value)
                        .map(CorrectAnswer::Index)
                        .unwrap_or_default();
                    draft.preview.correct_answer_label = answer_label(value);
                } else {
                    draft.correct_answer = CorrectAnswer::Text(value.to_string());
                    draft.preview.correct_answer_label = value.to_string();
                }
            }
        }
    }

    fn set_options(&mut self, options: Vec<LabeledOption>) {
        if options.is_empty() {
            return;
        }
        let draft = &mut self.draft;
        if draft
            .question_type
            .eq_ignore_ascii_case(QuestionType::Conventional.as_str())
        {
            debug!(
                question = %draft.question_number,
                "ignoring option block on conventional question"
            );
            return;
        }

        draft.question_type = QuestionType::MultipleChoice.as_str().to_string();
        draft.options = options.iter().map(|opt| opt.text.clone()).collect();
        draft.preview.formatted_options = options;
    }
}

struct Parser {
    state: State,
    current: Option<DraftBuilder>,
    drafts: Vec<QuestionDraft>,
}

impl Parser {
    fn new() -> Self {
        Self {
            state: State::Idle,
            current: None,
            drafts: Vec::new(),
        }
    }

    /// Handle the line at `cursor`, returning how many lines were consumed.
    fn process_line<S: AsRef<str>>(&mut self, lines: &[S], cursor: usize) -> usize {
        let line = lines[cursor].as_ref();
        trace!(line = cursor, state = ?self.state, text = line, "processing line");

        match parse_line(line) {
            LineType::Question(number) => self.handle_question(number),
            LineType::MarkingScheme(rest) => self.handle_marking_scheme(rest),
            LineType::Metadata(field, value) => self.handle_metadata(field, value),
            LineType::Option => return self.handle_options(lines, cursor),
            LineType::Text(text) => self.handle_text(text),
        }
        1
    }

    fn handle_question(&mut self, number: &str) {
        self.finish_current();
        debug!(question = number, "found question marker");
        self.current = Some(DraftBuilder::new(number));
        self.state = State::CollectingContent;
    }

    fn handle_marking_scheme(&mut self, rest: &str) {
        if self.current.is_none() {
            return;
        }
        self.flush_buffer();
        self.state = State::CollectingMarkingScheme;
        if let Some(ref mut builder) = self.current {
            builder.buffer.push(rest.to_string());
        }
    }

    fn handle_metadata(&mut self, field: MetadataField, value: &str) {
        if self.current.is_none() {
            return;
        }
        self.flush_buffer();
        self.state = State::AfterMetadata;
        if let Some(ref mut builder) = self.current {
            builder.set_metadata(field, value);
        }
    }

    fn handle_options<S: AsRef<str>>(&mut self, lines: &[S], cursor: usize) -> usize {
        let Some(ref mut builder) = self.current else {
            return 1;
        };

        let block = scan_options(lines, cursor);
        debug!(
            question = %builder.draft.question_number,
            options = block.options.len(),
            "collected option block"
        );
        builder.set_options(block.options);
        block.consumed.max(1)
    }

    fn handle_text(&mut self, text: &str) {
        match self.state {
            State::CollectingContent | State::CollectingMarkingScheme => {
                if let Some(ref mut builder) = self.current {
                    builder.buffer.push(text.to_string());
                }
            }
            State::Idle | State::AfterMetadata => {}
        }
    }

    fn flush_buffer(&mut self) {
        let Some(ref mut builder) = self.current else {
            return;
        };
        let lines = std::mem::take(&mut builder.buffer);

        match self.state {
            State::CollectingContent => builder.draft.content = flush_lines(&lines),
            State::CollectingMarkingScheme => builder.draft.marking_scheme = flush_lines(&lines),
            State::Idle | State::AfterMetadata => {}
        }
    }

    fn finish_current(&mut self) {
        self.flush_buffer();
        if let Some(builder) = self.current.take() {
            self.drafts.push(builder.draft);
        }
        self.state = State::Idle;
    }

    fn finalize(mut self) -> Vec<QuestionDraft> {
        self.finish_current();
        self.drafts
    }
}
