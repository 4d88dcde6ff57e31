use serde::Serialize;

use crate::model::{Block, Field, FieldGroup, LabelPlacement, Value, Width};
use crate::wrap::wrap;

/// Gap between two pairs sharing a row.
const PAIR_SEPARATOR: &str = "   ";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    Bold,
    Normal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub emphasis: Emphasis,
}

impl TextRun {
    pub fn bold(text: impl Into<String>) -> Self {
        TextRun { text: text.into(), emphasis: Emphasis::Bold }
    }

    pub fn normal(text: impl Into<String>) -> Self {
        TextRun { text: text.into(), emphasis: Emphasis::Normal }
    }
}

/// One output line before it has a position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedLine {
    pub runs: Vec<TextRun>,
}

impl RenderedLine {
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

pub struct FieldFormatter {
    narrow: usize,
    wide: usize,
}

impl FieldFormatter {
    pub fn new(narrow: usize, wide: usize) -> Self {
        FieldFormatter { narrow, wide }
    }

    pub fn budget(&self, width: Width) -> usize {
        match width {
            Width::Narrow => self.narrow,
            Width::Wide => self.wide,
        }
    }

    pub fn format_row(&self, group: &FieldGroup) -> Vec<RenderedLine> {
        match group {
            FieldGroup::Row(fields) => vec![format_pairs(fields)],
            FieldGroup::Block(block) => self.format_block(block),
        }
    }

    fn format_block(&self, block: &Block) -> Vec<RenderedLine> {
        let wrapped = wrap(&block.text, self.budget(block.width));
        let label = TextRun::bold(label_text(&block.label));

        match block.placement {
            LabelPlacement::Inline => wrapped
                .into_iter()
                .enumerate()
                .map(|(i, line)| {
                    let mut runs = Vec::with_capacity(2);
                    if i == 0 {
                        runs.push(label.clone());
                    }
                    runs.push(TextRun::normal(line));
                    RenderedLine { runs }
                })
                .collect(),
            LabelPlacement::Heading => std::iter::once(RenderedLine { runs: vec![label] })
                .chain(wrapped.into_iter().map(|line| RenderedLine {
                    runs: vec![TextRun::normal(line)],
                }))
                .collect(),
        }
    }
}

fn label_text(label: &str) -> String {
    format!("{label}: ")
}

fn format_pairs(fields: &[Field]) -> RenderedLine {
    let mut runs = Vec::with_capacity(fields.len() * 2);
    for (i, field) in fields.iter().enumerate() {
        let label = label_text(&field.label);
        if i == 0 {
            runs.push(TextRun::bold(label));
        } else {
            runs.push(TextRun::bold(format!("{PAIR_SEPARATOR}{label}")));
        }
        runs.push(TextRun::normal(single_line(&format_value(&field.value))));
    }
    RenderedLine { runs }
}

/// Row values share one baseline: newlines and runs of whitespace become one space.
fn single_line(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn format_value(value: &Value) -> String {
    match value {
        Value::Text(s) => s.clone(),
        Value::Number(n) => format_decimal(*n),
        Value::Integer(n) => n.to_string(),
        Value::Boolean(true) => "yes".to_string(),
        Value::Boolean(false) => "no".to_string(),
        Value::Date(d) => d.format("%Y-%m-%d").to_string(),
        Value::Missing => String::new(),
    }
}

/// Two fraction digits, ties rounded away from zero.
///
/// Rounds on the shortest decimal representation of `n` rather than on its
/// binary value, so `2.675` prints as `2.68`.
pub fn format_decimal(n: f64) -> String {
    if !n.is_finite() {
        return n.to_string();
    }

    let repr = n.abs().to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
    let frac: Vec<u8> = frac_part.bytes().chain(std::iter::repeat(b'0')).take(3).collect();

    let mut digits: Vec<u8> = int_part.bytes().chain(frac[..2].iter().copied()).collect();
    if frac[2] >= b'5' {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, b'1');
                break;
            }
            i -= 1;
            if digits[i] == b'9' {
                digits[i] = b'0';
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let split = digits.len() - 2;
    let is_zero = digits.iter().all(|&d| d == b'0');
    let mut out = String::with_capacity(digits.len() + 2);
    if n.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(std::str::from_utf8(&digits[..split]).unwrap_or("0"));
    out.push('.');
    out.push_str(std::str::from_utf8(&digits[split..]).unwrap_or("00"));
    out
}
