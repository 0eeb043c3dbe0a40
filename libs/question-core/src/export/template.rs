//! Upload template: instructions plus worked examples in the exact format
//! the parser reads back.

use tracing::debug;

use super::{Document, Paragraph, ParagraphStyle};
use crate::error::Result;
use crate::metadata::{option_letter, source_type, DetailField, SourceType};
use crate::parser::MetadataField;
use crate::types::{Module, QuestionType, Source};

pub const TEMPLATE_FILENAME: &str = "math_question_template.docx";

struct Example {
    content: &'static str,
    source: Source,
    year: &'static str,
    school: &'static str,
    textbook: &'static str,
    topic: &'static str,
    question_type: QuestionType,
    options: &'static [&'static str],
    answer: &'static str,
    marking_scheme: &'static str,
}

impl Example {
    fn detail(&self, field: DetailField) -> &'static str {
        match field {
            DetailField::Year => self.year,
            DetailField::School => self.school,
            DetailField::Textbook => self.textbook,
        }
    }
}

const EXAMPLES: [Example; 4] = [
    Example {
        content: "Solve the quadratic equation: $x^2 + 5x + 6 = 0$\nShow your working and find the values of x.",
        source: Source::Hkdse,
        year: "2019",
        school: "",
        textbook: "",
        topic: "Quadratic Equations",
        question_type: QuestionType::Conventional,
        options: &[],
        answer: "x = -2, x = -3",
        marking_scheme: "1. Factorize $x^2 + 5x + 6 = 0$\n2. $(x+2)(x+3) = 0$\n3. $x = -2$ or $x = -3$",
    },
    Example {
        content: "What is the derivative of $f(x) = 3x^2 + 2x - 1$?",
        source: Source::Hkcee,
        year: "2008",
        school: "",
        textbook: "",
        topic: "Calculus",
        question_type: QuestionType::Conventional,
        options: &[],
        answer: "6x + 2",
        marking_scheme: "1. Differentiate $f(x)$ term by term\n2. $f'(x) = 6x + 2$",
    },
    Example {
        content: "In a right-angled triangle, if the hypotenuse is 5 units and one side is 3 units, what is the length of the other side?",
        source: Source::SchoolExam,
        year: "2021",
        school: "St. Paul's College",
        textbook: "",
        topic: "Geometry",
        question_type: QuestionType::MultipleChoice,
        options: &["4 units", "6 units", "8 units", "10 units"],
        answer: "a",
        marking_scheme: "1. Use Pythagoras' theorem: $c^2 = a^2 + b^2$\n2. $5^2 = 3^2 + b^2$\n3. $b = 4$ units",
    },
    Example {
        content: "Find the exact value of $\\sin 30^\\circ + \\cos 60^\\circ$.",
        source: Source::Textbook,
        year: "2018",
        school: "",
        textbook: "New Century Mathematics 4A",
        topic: "Trigonometry",
        question_type: QuestionType::Conventional,
        options: &[],
        answer: "1",
        marking_scheme: "1. $\\sin 30^\\circ = \\frac{1}{2}$ and $\\cos 60^\\circ = \\frac{1}{2}$\n2. Sum is 1",
    },
];

/// Build the template document, optionally tailored to one module.
pub fn build_template(module: Option<Module>) -> Document {
    let mut doc = Document::new();

    let title = match module {
        Some(m) => format!("{} Question Template", m.title()),
        None => "Math Question Bank Template".to_string(),
    };
    doc.push(Paragraph::styled(title, ParagraphStyle::Heading1).spacing(200));

    if let Some(m) = module {
        doc.push(Paragraph::new(format!("Suggested topics: {}", m.topics().join(", "))).spacing(200));
    }

    doc.push(Paragraph::styled("Instructions:", ParagraphStyle::Heading2));
    let instructions = instructions(module);
    let last = instructions.len();
    doc.extend(instructions.into_iter().enumerate().map(|(i, text)| {
        Paragraph::new(format!("{}. {}", i + 1, text)).spacing(if i + 1 == last { 200 } else { 100 })
    }));

    doc.push(Paragraph::styled("Example Questions:", ParagraphStyle::Heading2).spacing(200));
    for (i, example) in EXAMPLES.iter().enumerate() {
        let topic = module
            .map(|m| m.topics()[i % m.topics().len()])
            .unwrap_or(example.topic);
        push_example(&mut doc, i + 1, example, topic);
    }

    debug!(module = ?module, paragraphs = doc.paragraphs().len(), "built upload template");
    doc
}

/// Render the template as `.docx` bytes.
pub fn render_template(module: Option<Module>) -> Result<Vec<u8>> {
    build_template(module).to_docx()
}

fn instructions(module: Option<Module>) -> Vec<String> {
    let sources = Source::ALL
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let topic_examples = match module {
        Some(m) => m.topics().iter().take(2).copied().collect::<Vec<_>>().join(", "),
        None => "Quadratic Equations, Trigonometry".to_string(),
    };

    vec![
        "Each question should start with 'Question X' where X is the question number".to_string(),
        "Write the question content after the question number".to_string(),
        format!("Specify Source ({sources}) after the question content"),
        format!(
            "Add source details: {}",
            [SourceType::Exam, SourceType::School, SourceType::Textbook]
                .iter()
                .map(detail_instruction)
                .collect::<Vec<_>>()
                .join("; ")
        ),
        format!("Specify Topic (e.g., {topic_examples}, etc.) after the Source"),
        "Specify Type (Conventional or MC) after the Topic".to_string(),
        "For multiple choice questions, add options with (a), (b), (c), etc.".to_string(),
        "End with Correct Answer: [option letter or answer]".to_string(),
        "Add a Marking Scheme section after the correct answer for each question.".to_string(),
    ]
}

fn detail_instruction(kind: &SourceType) -> String {
    let fields = kind
        .detail_fields()
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(" and ");
    let sources = Source::ALL
        .iter()
        .filter(|s| source_type(s.as_str()) == Some(*kind))
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join("/");
    format!("{sources} questions take {fields}")
}

fn labeled(field: MetadataField, value: &str) -> Paragraph {
    Paragraph::new(format!("{} {}", field.label(), value))
}

fn push_example(doc: &mut Document, number: usize, example: &Example, topic: &str) {
    doc.push(Paragraph::styled(format!("Question {number}"), ParagraphStyle::Heading3));
    doc.push(Paragraph::new(example.content).spacing(200));
    doc.push(labeled(MetadataField::Source, example.source.as_str()));

    if let Some(kind) = source_type(example.source.as_str()) {
        for field in kind.detail_fields() {
            let meta = match field {
                DetailField::Year => MetadataField::Year,
                DetailField::School => MetadataField::School,
                DetailField::Textbook => MetadataField::Textbook,
            };
            doc.push(labeled(meta, example.detail(*field)));
        }
    }

    doc.push(labeled(MetadataField::Topic, topic));
    doc.push(labeled(MetadataField::Type, example.question_type.as_str()));

    let option_count = example.options.len();
    for (i, option) in example.options.iter().enumerate() {
        let spacing = if i + 1 == option_count { 200 } else { 100 };
        doc.push(Paragraph::new(format!("({}) {}", option_letter(i), option)).spacing(spacing));
    }

    doc.push(labeled(MetadataField::CorrectAnswer, example.answer));
    doc.push(
        Paragraph::new(format!("Marking Scheme: {}", example.marking_scheme))
            .spacing(if number == EXAMPLES.len() { 400 } else { 200 }),
    );
}
