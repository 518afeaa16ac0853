//! Turns an analysis into what gets printed

use ember_parsing::parser::Verdict;
use ember_parsing::{Analysis, AnalysisError};
use ember_tokens::spanned::Diagnostic;
use ember_tokens::{Comment, CommentKind, Spanned, Token};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use std::io::Write;

/// The outcome of analyzing one source string
#[derive(Debug)]
pub struct Report<'s> {
    src: &'s str,
    outcome: Result<Analysis<'s>, AnalysisError>,
}

impl<'s> Report<'s> {
    pub fn new(src: &'s str, outcome: Result<Analysis<'s>, AnalysisError>) -> Self {
        Self { src, outcome }
    }

    /// Only true when the source scanned and the grammar accepted it
    pub fn is_success(&self) -> bool {
        self.outcome
            .as_ref()
            .is_ok_and(|analysis| analysis.verdict.is_success())
    }

    fn response(&self) -> Response<'_> {
        match &self.outcome {
            Ok(analysis) => Response::Analyzed {
                success: true,
                tokens: analysis.tokens.iter().map(TokenRecord::from).collect(),
                comments: analysis.comments.iter().map(CommentRecord::from).collect(),
                parse: ParseRecord::from(&analysis.verdict),
            },
            Err(error) => Response::Failed {
                success: false,
                error: error.to_string(),
            },
        }
    }

    pub fn write_json<W: Write>(&self, mut writer: W) -> eyre::Result<()> {
        serde_json::to_writer_pretty(&mut writer, &self.response())?;
        writeln!(writer)?;
        Ok(())
    }

    pub fn write_pretty<W: Write>(&self, mut writer: W) -> eyre::Result<()> {
        let analysis = match &self.outcome {
            Ok(analysis) => analysis,
            Err(AnalysisError::Lex(error)) => {
                let diagnostic = Diagnostic::new(self.src, error.span(), error)?;
                write!(writer, "{}", "scan failed: ".if_supports_color(Stream::Stdout, |s| s.red()))?;
                write!(writer, "{diagnostic}")?;
                return Ok(());
            }
            Err(error) => {
                writeln!(writer, "{}{error}", "scan failed: ".if_supports_color(Stream::Stdout, |s| s.red()))?;
                return Ok(());
            }
        };

        writeln!(writer, "{}", "tokens".if_supports_color(Stream::Stdout, |s| s.bold()))?;
        writeln!(writer, "{:>5}  {:>4}  {:<10}  {:<12}  span", "index", "code", "type", "value")?;
        for (index, token) in analysis.tokens.iter().enumerate() {
            writeln!(
                writer,
                "{index:>5}  {:>4}  {:<10}  {:<12}  {:?}",
                token.class_code(),
                token.category().as_str(),
                token.value(),
                token.span()
            )?;
        }

        if !analysis.comments.is_empty() {
            writeln!(writer, "{}", "comments".if_supports_color(Stream::Stdout, |s| s.bold()))?;
            for comment in &analysis.comments {
                writeln!(
                    writer,
                    "  {:<20}  {:?}  {:?}",
                    comment_type(comment.kind()),
                    comment.span(),
                    comment.text()
                )?;
            }
        }

        match &analysis.verdict {
            Verdict::Accepted => {
                writeln!(writer, "{}", "accepted".if_supports_color(Stream::Stdout, |s| s.green()))?;
            }
            Verdict::Rejected(error) => {
                writeln!(
                    writer,
                    "{} at token {}",
                    "rejected".if_supports_color(Stream::Stdout, |s| s.red()),
                    error.position
                )?;
                match error.location {
                    Some(span) => write!(writer, "{}", Diagnostic::new(self.src, span, &error.kind)?)?,
                    None => writeln!(writer, "{}", error.kind)?,
                }
                if !error.non_terminal_stack.is_empty() {
                    writeln!(writer, "  while parsing {}", error.trail())?;
                }
            }
        }
        Ok(())
    }
}

fn comment_type(kind: CommentKind) -> &'static str {
    match kind {
        CommentKind::Block => "multi_line_comment",
        CommentKind::Line => "single_line_comment",
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Response<'a> {
    Analyzed {
        success: bool,
        tokens: Vec<TokenRecord<'a>>,
        comments: Vec<CommentRecord<'a>>,
        parse: ParseRecord,
    },
    Failed {
        success: bool,
        error: String,
    },
}

#[derive(Debug, Serialize)]
struct TokenRecord<'a> {
    value: &'a str,
    code: u8,
    #[serde(rename = "type")]
    category: &'static str,
    start: usize,
    end: usize,
}

impl<'a> From<&Token<'a>> for TokenRecord<'a> {
    fn from(token: &Token<'a>) -> Self {
        let span = token.span();
        Self {
            value: token.value(),
            code: token.class_code(),
            category: token.category().as_str(),
            start: span.start(),
            end: span.end(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CommentRecord<'a> {
    value: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    start: usize,
    end: usize,
}

impl<'a> From<&Comment<'a>> for CommentRecord<'a> {
    fn from(comment: &Comment<'a>) -> Self {
        let span = comment.span();
        Self {
            value: comment.text(),
            kind: comment_type(comment.kind()),
            start: span.start(),
            end: span.end(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ParseRecord {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pos: Option<usize>,
}

impl From<&Verdict> for ParseRecord {
    fn from(verdict: &Verdict) -> Self {
        Self {
            success: verdict.is_success(),
            error: verdict.error().map(|error| error.to_string()),
            pos: verdict.position(),
        }
    }
}
