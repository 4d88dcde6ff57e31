use chrono::{NaiveDate, NaiveDateTime};

use crate::error::Error;

/// Most label/value pairs that fit on one baseline.
pub const MAX_ROW_FIELDS: usize = 4;

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64), // printed with two decimals
    Integer(i64),
    Boolean(bool),
    Date(NaiveDate),
    Missing,
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Missing)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub label: String,
    pub value: Value,
}

impl Field {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Field {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Character budget class for wrapped blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Width {
    Narrow,
    Wide,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelPlacement {
    /// Label is the bold prefix of the first wrapped line.
    Inline,
    /// Label sits alone on a line above the text.
    Heading,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub label: String,
    pub text: String,
    pub width: Width,
    pub placement: LabelPlacement,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FieldGroup {
    Row(Vec<Field>),
    Block(Block),
}

impl FieldGroup {
    /// A row of 1 to [`MAX_ROW_FIELDS`] pairs sharing one line.
    pub fn row(fields: Vec<Field>) -> Result<Self, Error> {
        if fields.is_empty() {
            return Err(Error::InvalidRow("a row needs at least one field".into()));
        }
        if fields.len() > MAX_ROW_FIELDS {
            return Err(Error::InvalidRow(format!(
                "{} fields in one row, at most {MAX_ROW_FIELDS} fit",
                fields.len()
            )));
        }
        Ok(FieldGroup::Row(fields))
    }

    pub fn single(label: impl Into<String>, value: impl Into<Value>) -> Self {
        FieldGroup::Row(vec![Field::new(label, value)])
    }

    pub fn block(label: impl Into<String>, text: Option<&str>, width: Width) -> Self {
        FieldGroup::Block(Block {
            label: label.into(),
            text: text.unwrap_or_default().to_string(),
            width,
            placement: LabelPlacement::Inline,
        })
    }

    /// A wide narrative block with its label on a line of its own.
    pub fn section(label: impl Into<String>, text: Option<&str>) -> Self {
        FieldGroup::Block(Block {
            label: label.into(),
            text: text.unwrap_or_default().to_string(),
            width: Width::Wide,
            placement: LabelPlacement::Heading,
        })
    }

    /// Label of the first pair, or of the block.
    pub fn leading_label(&self) -> &str {
        match self {
            FieldGroup::Row(fields) => fields.first().map_or("", |f| f.label.as_str()),
            FieldGroup::Block(block) => &block.label,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Attribution {
    pub name: String,
    pub job_title: String,
    pub timestamp: NaiveDateTime,
}

/// Everything one report render needs. Built once, never mutated by layout.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportModel {
    title: String,
    created: NaiveDate,
    fields: Vec<FieldGroup>,
    attributions: Vec<Attribution>,
}

impl ReportModel {
    pub fn builder() -> ReportModelBuilder {
        ReportModelBuilder::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn created(&self) -> NaiveDate {
        self.created
    }

    pub fn fields(&self) -> &[FieldGroup] {
        &self.fields
    }

    /// Oldest first.
    pub fn attributions(&self) -> &[Attribution] {
        &self.attributions
    }
}

#[derive(Default)]
pub struct ReportModelBuilder {
    title: Option<String>,
    created: Option<NaiveDate>,
    fields: Vec<FieldGroup>,
    attributions: Vec<Attribution>,
}

impl ReportModelBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn created(mut self, date: NaiveDate) -> Self {
        self.created = Some(date);
        self
    }

    pub fn group(mut self, group: FieldGroup) -> Self {
        self.fields.push(group);
        self
    }

    pub fn groups(mut self, groups: impl IntoIterator<Item = FieldGroup>) -> Self {
        self.fields.extend(groups);
        self
    }

    pub fn attribution(mut self, attribution: Attribution) -> Self {
        self.attributions.push(attribution);
        self
    }

    pub fn build(self) -> Result<ReportModel, Error> {
        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or(Error::MissingField("title"))?;
        let created = self.created.ok_or(Error::MissingField("created date"))?;
        Ok(ReportModel {
            title,
            created,
            fields: self.fields,
            attributions: self.attributions,
        })
    }
}
