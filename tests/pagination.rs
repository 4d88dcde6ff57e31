use chrono::NaiveDate;
use progress_note_pdf::{
    Attribution, DrawInstruction, Emphasis, Error, Field, FieldGroup, LayoutConfig, LayoutEngine,
    RenderSink, ReportModel, TextRun, Value, Width, emit, wrap,
};

#[derive(Debug, PartialEq)]
enum Event {
    Begin(usize),
    Draw { page: usize, y: i32, text: String },
    End(usize),
    Finalize,
}

/// Sink that records every call instead of producing a document.
#[derive(Default)]
struct RecordingSink {
    events: Vec<Event>,
    pages: usize,
    fail_on_page: Option<usize>,
}

impl RenderSink for &mut RecordingSink {
    type Page = usize;

    fn begin_page(&mut self) -> Result<usize, Error> {
        let page = self.pages;
        if self.fail_on_page == Some(page) {
            return Err(Error::Io(std::io::Error::other("disk full")));
        }
        self.pages += 1;
        self.events.push(Event::Begin(page));
        Ok(page)
    }

    fn draw_text(
        &mut self,
        page: &mut usize,
        _x: i32,
        y: i32,
        _font_size: f32,
        runs: &[TextRun],
    ) -> Result<(), Error> {
        let text = runs.iter().map(|r| r.text.as_str()).collect();
        self.events.push(Event::Draw { page: *page, y, text });
        Ok(())
    }

    fn end_page(&mut self, page: usize) -> Result<(), Error> {
        self.events.push(Event::End(page));
        Ok(())
    }

    fn finalize(self) -> Result<Vec<u8>, Error> {
        self.events.push(Event::Finalize);
        Ok(Vec::new())
    }
}

impl RecordingSink {
    fn begins(&self) -> usize {
        self.events.iter().filter(|e| matches!(e, Event::Begin(_))).count()
    }

    fn ends(&self) -> usize {
        self.events.iter().filter(|e| matches!(e, Event::End(_))).count()
    }
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn report(groups: Vec<FieldGroup>) -> ReportModel {
    ReportModel::builder()
        .title("Progress Note")
        .created(date())
        .groups(groups)
        .build()
        .unwrap()
}

fn long_narrative(words: usize) -> String {
    (0..words)
        .map(|i| format!("word{i:04}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn flow(instructions: &[DrawInstruction]) -> &[DrawInstruction] {
    &instructions[2..]
}

#[test]
fn short_report_fits_one_page() {
    let model = report(vec![
        FieldGroup::single("Patient Name", "Ada Lovelace"),
        FieldGroup::single("Shoe Size", "9"),
        FieldGroup::single("Allergies", "penicillin"),
        FieldGroup::single("A1C", 6.8),
        FieldGroup::single("Pulse", 72i64),
    ]);
    let layout = LayoutEngine::default().render(&model);

    assert_eq!(layout.instructions.len(), 7);
    assert_eq!(layout.page_count, 1);
    assert!(layout.instructions.iter().all(|i| i.page_index == 0));
    assert_eq!(layout.instructions[0].text(), "Progress Note");
    assert_eq!(layout.instructions[1].text(), "2024-01-01");

    let mut sink = RecordingSink::default();
    emit(&layout, &mut sink).unwrap();
    assert_eq!(sink.begins(), 1);
    assert_eq!(sink.ends(), 1);
    assert_eq!(sink.events.first(), Some(&Event::Begin(0)));
    assert_eq!(sink.events[sink.events.len() - 2], Event::End(0));
    assert_eq!(sink.events.last(), Some(&Event::Finalize));
}

#[test]
fn long_narrative_breaks_without_losing_lines() {
    let cfg = LayoutConfig::default();
    let text = long_narrative(800);
    let model = report(vec![FieldGroup::block("Subjective", Some(text.as_str()), Width::Wide)]);
    let layout = LayoutEngine::default().render(&model);

    let expected = wrap(&text, cfg.wide_chars);
    assert!(expected.len() as i32 * cfg.line_height > cfg.max_y - cfg.min_y);

    let body: Vec<String> = flow(&layout.instructions)
        .iter()
        .map(|i| i.runs.last().unwrap().text.clone())
        .collect();
    assert_eq!(body, expected);

    let mut sink = RecordingSink::default();
    emit(&layout, &mut sink).unwrap();
    assert!(sink.begins() >= 2);
    assert_eq!(sink.begins(), layout.page_count);
    assert_eq!(sink.ends(), layout.page_count);

    let drawn = sink
        .events
        .iter()
        .filter(|e| matches!(e, Event::Draw { .. }))
        .count();
    assert_eq!(drawn, layout.instructions.len());
}

#[test]
fn draws_only_between_begin_and_end() {
    let text = long_narrative(1500);
    let model = report(vec![FieldGroup::section("Plan", Some(text.as_str()))]);
    let layout = LayoutEngine::default().render(&model);

    let mut sink = RecordingSink::default();
    emit(&layout, &mut sink).unwrap();

    let mut open: Option<usize> = None;
    for event in &sink.events {
        match event {
            Event::Begin(p) => {
                assert!(open.is_none());
                open = Some(*p);
            }
            Event::Draw { page, .. } => assert_eq!(open, Some(*page)),
            Event::End(p) => {
                assert_eq!(open, Some(*p));
                open = None;
            }
            Event::Finalize => assert!(open.is_none()),
        }
    }
}

#[test]
fn every_line_within_vertical_bounds() {
    let cfg = LayoutConfig::default();
    let mut groups = Vec::new();
    for i in 0..30 {
        groups.push(FieldGroup::single(format!("Field {i}"), i as i64));
        groups.push(FieldGroup::block("Notes", Some(long_narrative(40).as_str()), Width::Narrow));
    }
    let layout = LayoutEngine::default().render(&report(groups));
    assert!(layout.page_count > 2);
    for instr in &layout.instructions {
        assert!(cfg.min_y <= instr.y && instr.y <= cfg.max_y, "{instr:?}");
    }
}

#[test]
fn custom_config_keeps_header_in_bounds() {
    let cfg = LayoutConfig {
        max_y: 760,
        min_y: 100,
        ..LayoutConfig::default()
    };
    let engine = LayoutEngine::new(cfg.clone()).unwrap();
    let groups = (0..120)
        .map(|i| FieldGroup::single(format!("Line {i}"), i as i64))
        .collect();
    let layout = engine.render(&report(groups));
    assert!(layout.page_count > 1);
    for instr in &layout.instructions {
        assert!(cfg.min_y <= instr.y && instr.y <= cfg.max_y, "{instr:?}");
    }
}

#[test]
fn page_index_never_skips() {
    let groups = (0..200)
        .map(|i| FieldGroup::single(format!("Line {i}"), Value::Missing))
        .collect();
    let layout = LayoutEngine::default().render(&report(groups));
    let mut last = 0;
    for instr in &layout.instructions {
        assert!(instr.page_index == last || instr.page_index == last + 1);
        last = instr.page_index;
    }
    assert_eq!(last + 1, layout.page_count);
}

#[test]
fn labels_follow_model_order() {
    let groups: Vec<FieldGroup> = vec![
        FieldGroup::single("Patient Name", "Ada Lovelace"),
        FieldGroup::block("Address", Some(long_narrative(30).as_str()), Width::Narrow),
        FieldGroup::row(vec![Field::new("Weight(lbs)", 182.4), Field::new("BMI", 28.6)]).unwrap(),
        FieldGroup::single("Foot Screening", true),
        FieldGroup::section("Assessment", Some(long_narrative(60).as_str())),
    ];
    let expected: Vec<&str> = groups.iter().map(|g| g.leading_label()).collect();
    let model = report(groups.clone());
    let layout = LayoutEngine::default().render(&model);

    let labels: Vec<&str> = flow(&layout.instructions)
        .iter()
        .filter_map(|i| i.label())
        .collect();
    assert_eq!(labels, expected);
}

#[test]
fn missing_value_draws_label_only() {
    let layout = LayoutEngine::default().render(&report(vec![FieldGroup::single(
        "Allergies",
        Value::Missing,
    )]));
    let lines = flow(&layout.instructions);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text(), "Allergies: ");
    assert_eq!(lines[0].runs.last().unwrap(), &TextRun::normal(""));
    assert!(!lines[0].text().to_lowercase().contains("null"));
    assert!(!lines[0].text().to_lowercase().contains("none"));
}

#[test]
fn booleans_render_yes_and_no() {
    let layout = LayoutEngine::default().render(&report(vec![
        FieldGroup::single("Medical Insurance", true),
        FieldGroup::single("Smoking", false),
    ]));
    let lines = flow(&layout.instructions);
    assert!(lines[0].text().contains("yes"));
    assert_eq!(lines[0].text(), "Medical Insurance: yes");
    assert_eq!(lines[1].text(), "Smoking: no");
    assert_eq!(lines[1].emphasis(), Emphasis::Bold);
}

#[test]
fn attributions_come_last_oldest_first() {
    let at = |h| date().and_hms_opt(h, 0, 0).unwrap();
    let model = ReportModel::builder()
        .title("Progress Note")
        .created(date())
        .group(FieldGroup::section("Plan", Some("Follow up.")))
        .attribution(Attribution { name: "A One".into(), job_title: "RN".into(), timestamp: at(9) })
        .attribution(Attribution { name: "B Two".into(), job_title: "MD".into(), timestamp: at(11) })
        .build()
        .unwrap();
    let layout = LayoutEngine::default().render(&model);
    let texts: Vec<String> = layout.instructions.iter().rev().take(2).map(|i| i.text()).collect();
    assert_eq!(texts[1], "Updated by: A One, RN, 2024-01-01 09:00:00");
    assert_eq!(texts[0], "Updated by: B Two, MD, 2024-01-01 11:00:00");
}

#[test]
fn sink_errors_propagate() {
    let text = long_narrative(800);
    let layout = LayoutEngine::default()
        .render(&report(vec![FieldGroup::section("Plan", Some(text.as_str()))]));
    let mut sink = RecordingSink { fail_on_page: Some(1), ..RecordingSink::default() };
    let err = emit(&layout, &mut sink).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(!sink.events.contains(&Event::Finalize));
}

#[test]
fn empty_report_still_commits_one_page() {
    let layout = LayoutEngine::default().render(&report(vec![]));
    let mut sink = RecordingSink::default();
    emit(&layout, &mut sink).unwrap();
    assert_eq!(sink.begins(), 1);
    assert_eq!(sink.ends(), 1);
}
