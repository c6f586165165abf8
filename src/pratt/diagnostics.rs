//! Source documents and their diagnostics
//!
//! A [`SourceDocument`] is the unit of parsing: the filename, the full text and the ordered
//! list of [`Message`]s produced while parsing it. Messages are appended and never
//! reordered, deduplicated or removed, so tooling can rely on them matching the order in
//! which the parser encountered problems.
//!
//! The engine never decides whether a document is acceptable. A document with error
//! messages still comes with its (partial) tree; hosts check [`SourceDocument::has_errors`]
//! and reject or accept as they see fit.

use crate::pratt::ast::range::SourceRange;
use crate::pratt::ast::AstNode;
use crate::pratt::error::ParseError;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Message severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSeverity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for MessageSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageSeverity::Error => write!(f, "error"),
            MessageSeverity::Warning => write!(f, "warning"),
            MessageSeverity::Info => write!(f, "info"),
        }
    }
}

/// A diagnostic anchored to a source range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub severity: MessageSeverity,
    pub text: String,
    pub range: SourceRange,
    pub code: Option<String>,
}

impl Message {
    pub fn new(severity: MessageSeverity, text: impl Into<String>, range: SourceRange) -> Self {
        Self {
            severity,
            text: text.into(),
            range,
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == MessageSeverity::Error
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(
                f,
                "{}[{}]: {} at {}",
                self.severity, code, self.text, self.range.start
            ),
            None => write!(f, "{}: {} at {}", self.severity, self.text, self.range.start),
        }
    }
}

/// A source text being parsed, together with the messages produced for it
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub filename: String,
    source: Arc<str>,
    messages: Vec<Message>,
}

impl SourceDocument {
    pub fn new(filename: impl Into<String>, source: impl Into<Arc<str>>) -> Self {
        Self {
            filename: filename.into(),
            source: source.into(),
            messages: Vec::new(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub(crate) fn shared_source(&self) -> Arc<str> {
        Arc::clone(&self.source)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Append a message anchored at `node`'s range.
    pub fn add_message(&mut self, severity: MessageSeverity, text: impl Into<String>, node: &AstNode) {
        self.messages
            .push(Message::new(severity, text, node.range().clone()));
    }

    /// Append a message at an explicit range.
    pub fn add_message_at(
        &mut self,
        severity: MessageSeverity,
        text: impl Into<String>,
        range: SourceRange,
        code: Option<&str>,
    ) {
        let mut message = Message::new(severity, text, range);
        message.code = code.map(str::to_string);
        self.messages.push(message);
    }

    /// Record a recoverable parse error as an error-severity message.
    pub fn record(&mut self, error: &ParseError) {
        let range = error.range().cloned().unwrap_or_default();
        self.messages.push(
            Message::new(MessageSeverity::Error, error.to_string(), range).with_code(error.code()),
        );
    }

    pub fn errors(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.is_error())
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Render every message with its location and surrounding source lines.
    pub fn render_messages(&self, context_lines: usize) -> String {
        let mut output = String::new();
        for message in &self.messages {
            output.push_str(&format!(
                "{}:{}:{}: {}\n",
                self.filename,
                message.range.start.line + 1,
                message.range.start.column + 1,
                message
            ));
            output.push_str(&format_source_context(
                &self.source,
                &message.range,
                context_lines,
            ));
        }
        output
    }
}

/// Format source context around a range
///
/// Shows `context_lines` lines before the range start, the line itself with a >> marker,
/// and `context_lines` lines after. Lines are numbered from 1.
pub fn format_source_context(source: &str, range: &SourceRange, context_lines: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let error_line = range.start.line;

    let start_line = error_line.saturating_sub(context_lines);
    let end_line = (error_line + context_lines + 1).min(lines.len());

    let mut context = String::new();

    for (line_num, line) in lines.iter().enumerate().take(end_line).skip(start_line) {
        let marker = if line_num == error_line { ">>" } else { "  " };
        context.push_str(&format!("{} {:3} | {}\n", marker, line_num + 1, line));
    }

    context
}
