use serde::Serialize;

use crate::cursor::PageCursor;
use crate::error::Error;
use crate::format::{Emphasis, FieldFormatter, RenderedLine, TextRun};
use crate::model::{Attribution, FieldGroup, ReportModel};

pub const ATTRIBUTION_LABEL: &str = "Updated by";

/// Geometry and typography of the single portrait template. Units are PDF points.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_left: i32,
    /// Baseline of the first flowing line on page 0 (below title and date).
    pub first_y: i32,
    /// Baseline of the first line on every later page.
    pub max_y: i32,
    /// Lowest baseline allowed before breaking.
    pub min_y: i32,
    pub line_height: i32,
    pub body_size: f32,
    pub title_size: f32,
    pub date_size: f32,
    pub title_origin: (i32, i32),
    pub date_origin: (i32, i32),
    pub narrow_chars: usize,
    pub wide_chars: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            page_width: 612.0,
            page_height: 792.0,
            margin_left: 70,
            first_y: 705,
            max_y: 750,
            min_y: 40,
            line_height: 20,
            body_size: 16.0,
            title_size: 26.0,
            date_size: 20.0,
            title_origin: (225, 750),
            date_origin: (245, 725),
            narrow_chars: 55,
            wide_chars: 65,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.line_height <= 0 {
            return Err(Error::InvalidConfig(format!(
                "line height must be positive, got {}",
                self.line_height
            )));
        }
        if self.min_y > self.max_y {
            return Err(Error::InvalidConfig(format!(
                "min_y {} is above max_y {}",
                self.min_y, self.max_y
            )));
        }
        if self.first_y < self.min_y || self.first_y > self.max_y {
            return Err(Error::InvalidConfig(format!(
                "first line y {} outside {}..={}",
                self.first_y, self.min_y, self.max_y
            )));
        }
        for (name, (_, y)) in [("title", self.title_origin), ("date", self.date_origin)] {
            if y < self.min_y || y > self.max_y {
                return Err(Error::InvalidConfig(format!(
                    "{name} y {y} outside {}..={}",
                    self.min_y, self.max_y
                )));
            }
        }
        if self.max_y as f32 > self.page_height || self.min_y < 0 {
            return Err(Error::InvalidConfig("text area does not fit on the page".into()));
        }
        if self.narrow_chars == 0 || self.wide_chars == 0 {
            return Err(Error::InvalidConfig("wrap budgets must be at least 1".into()));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawInstruction {
    pub page_index: usize,
    pub x: i32,
    pub y: i32,
    pub font_size: f32,
    pub runs: Vec<TextRun>,
}

impl DrawInstruction {
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn emphasis(&self) -> Emphasis {
        self.runs.first().map_or(Emphasis::Normal, |r| r.emphasis)
    }

    /// Bold leading run without its trailing ": ", if the line is labeled.
    pub fn label(&self) -> Option<&str> {
        let first = self.runs.first()?;
        if first.emphasis != Emphasis::Bold {
            return None;
        }
        Some(first.text.trim().trim_end_matches(':'))
    }
}

/// A complete, positioned report.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub page_count: usize,
    pub instructions: Vec<DrawInstruction>,
}

pub struct LayoutEngine {
    config: LayoutConfig,
    formatter: FieldFormatter,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::with_config(LayoutConfig::default())
    }
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: LayoutConfig) -> Self {
        let formatter = FieldFormatter::new(config.narrow_chars, config.wide_chars);
        LayoutEngine { config, formatter }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn render(&self, model: &ReportModel) -> Layout {
        let cfg = &self.config;
        let mut cursor = PageCursor::new(cfg.first_y, cfg.min_y, cfg.max_y, cfg.line_height);
        let mut instructions = Vec::new();

        // Title and date sit at fixed spots on page 0, outside the flow
        instructions.push(DrawInstruction {
            page_index: 0,
            x: cfg.title_origin.0,
            y: cfg.title_origin.1,
            font_size: cfg.title_size,
            runs: vec![TextRun::bold(model.title())],
        });
        instructions.push(DrawInstruction {
            page_index: 0,
            x: cfg.date_origin.0,
            y: cfg.date_origin.1,
            font_size: cfg.date_size,
            runs: vec![TextRun::bold(model.created().format("%Y-%m-%d").to_string())],
        });

        for group in model.fields() {
            let lines = self.formatter.format_row(group);
            self.place(&mut cursor, lines, &mut instructions);
        }

        for attribution in model.attributions() {
            let lines = self.formatter.format_row(&attribution_row(attribution));
            self.place(&mut cursor, lines, &mut instructions);
        }

        let layout = Layout {
            page_count: cursor.page_index() + 1,
            instructions,
        };
        log::info!(
            "laid out {:?}: {} lines on {} page(s)",
            model.title(),
            layout.instructions.len(),
            layout.page_count
        );
        layout
    }

    fn place(
        &self,
        cursor: &mut PageCursor,
        lines: Vec<RenderedLine>,
        out: &mut Vec<DrawInstruction>,
    ) {
        let advance = cursor.advance(lines.len());
        for (line, pos) in lines.into_iter().zip(advance.positions) {
            out.push(DrawInstruction {
                page_index: pos.page_index,
                x: self.config.margin_left,
                y: pos.y,
                font_size: self.config.body_size,
                runs: line.runs,
            });
        }
    }
}

pub fn attribution_row(attribution: &Attribution) -> FieldGroup {
    let text = format!(
        "{}, {}, {}",
        attribution.name,
        attribution.job_title,
        attribution.timestamp.format("%Y-%m-%d %H:%M:%S")
    );
    FieldGroup::single(ATTRIBUTION_LABEL, text)
}
