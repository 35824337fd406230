//! Prediction tab: input form, Predict action and rendered outcome.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::{FieldKind, FieldSpec, FormInputs, PredictionOutcome, WidgetKind, FORM_FIELDS};
use crate::tui::styles::MedicalTheme;

/// Spinner frames shown while a prediction is running.
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// One widget of the form: a committed value plus optional edit buffer.
#[derive(Debug, Clone)]
pub struct FieldInput {
    pub spec: &'static FieldSpec,
    pub value: f64,
    /// Text being typed; `None` when not editing
    pub buffer: Option<String>,
}

impl FieldInput {
    fn new(spec: &'static FieldSpec) -> Self {
        Self {
            spec,
            value: spec.default,
            buffer: None,
        }
    }

    /// Text currently shown in the widget.
    #[must_use]
    pub fn display_text(&self) -> String {
        match &self.buffer {
            Some(text) => text.clone(),
            None => self.spec.format_value(self.value),
        }
    }

    /// Commit the edit buffer.
    ///
    /// Unparsable text reverts to the last value; out-of-range values are
    /// clamped. Returns a notice for the user when either happens.
    fn commit(&mut self) -> Option<String> {
        let text = self.buffer.take()?;
        if text.trim().is_empty() {
            return None;
        }

        match self.spec.parse(&text) {
            Some(v) => {
                self.value = v;
                let entered: Option<f64> = text.trim().parse().ok();
                match entered {
                    Some(e) if e != v => Some(format!(
                        "{}: value must be within {}; using {}",
                        self.spec.label,
                        self.spec.range_hint(),
                        self.spec.format_value(v)
                    )),
                    _ => None,
                }
            }
            None => Some(format!(
                "{}: '{}' is not a valid number",
                self.spec.label, text
            )),
        }
    }

    fn step(&mut self, direction: f64) {
        let mut next = self.value + direction * self.spec.step;
        if self.spec.kind == FieldKind::Decimal {
            next = (next * 1e6).round() / 1e6;
        }
        self.value = self.spec.normalize(next);
    }
}

/// Prediction form state
pub struct PredictionFormState {
    pub fields: Vec<FieldInput>,
    pub selected_field: usize,
    /// Widget-level message (clamped or rejected input)
    pub notice: Option<String>,
}

impl Default for PredictionFormState {
    fn default() -> Self {
        Self {
            fields: FORM_FIELDS.iter().map(FieldInput::new).collect(),
            selected_field: 0,
            notice: None,
        }
    }
}

impl PredictionFormState {
    /// Commit the focused field; the notice reflects only this commit.
    fn commit_selected(&mut self) {
        self.notice = self.fields[self.selected_field].commit();
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        self.commit_selected();
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        self.commit_selected();
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current field
    pub fn input_char(&mut self, c: char) {
        let field = &mut self.fields[self.selected_field];
        if field.spec.accepts_char(c) {
            field.buffer.get_or_insert_with(String::new).push(c);
            self.notice = None;
        }
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        let field = &mut self.fields[self.selected_field];
        let spec = field.spec;
        let value = field.value;
        field
            .buffer
            .get_or_insert_with(|| spec.format_value(value))
            .pop();
    }

    /// Clear the current field's edit buffer
    pub fn clear_field(&mut self) {
        self.fields[self.selected_field].buffer = Some(String::new());
    }

    /// Step the current value by one increment (`direction` is +1 or -1)
    pub fn step(&mut self, direction: f64) {
        self.commit_selected();
        self.fields[self.selected_field].step(direction);
    }

    /// Restore every field to its default
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Commit pending edits and capture the current widget values.
    pub fn inputs(&mut self) -> FormInputs {
        for field in self.fields.iter_mut() {
            if let Some(notice) = field.commit() {
                self.notice = Some(notice);
            }
        }

        let mut inputs = FormInputs::default();
        for field in &self.fields {
            inputs.set(field.spec.column, field.value);
        }
        inputs
    }
}

/// Everything the result panel needs.
pub struct ResultView<'a> {
    pub processing: bool,
    pub outcome: Option<&'a PredictionOutcome>,
    pub tick: usize,
}

/// Render the prediction tab
pub fn render_prediction(
    f: &mut Frame,
    area: Rect,
    state: &PredictionFormState,
    result: &ResultView<'_>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(9),    // Form
            Constraint::Length(5), // Result
            Constraint::Length(2), // Footer
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    render_form_fields(f, chunks[1], state);
    render_result(f, chunks[2], result);
    render_form_footer(f, chunks[3], state);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Predict Mental Risk", MedicalTheme::subtitle()),
    ]));
    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &PredictionFormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let mid = (state.fields.len() + 1) / 2;
    render_field_column(f, columns[0], &state.fields[..mid], 0, state.selected_field);
    render_field_column(f, columns[1], &state.fields[mid..], mid, state.selected_field);
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FieldInput],
    offset: usize,
    selected: usize,
) {
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        render_field(f, chunks[i], field, is_selected);
    }
}

fn render_field(f: &mut Frame, area: Rect, field: &FieldInput, is_selected: bool) {
    let (border_style, title_style) = if is_selected {
        (MedicalTheme::border_focused(), MedicalTheme::focused())
    } else {
        (MedicalTheme::border(), MedicalTheme::text_secondary())
    };

    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(format!(" {} ", field.spec.label), title_style),
            Span::styled(format!("({}) ", field.spec.range_hint()), MedicalTheme::text_muted()),
        ]))
        .borders(Borders::ALL)
        .border_style(border_style);

    let text = field.display_text();

    match (field.spec.widget, field.spec.min, field.spec.max) {
        (WidgetKind::Slider, Some(min), Some(max)) if max > min => {
            let ratio = ((field.value - min) / (max - min)).clamp(0.0, 1.0);
            let label = if is_selected { format!("{text}▌") } else { text };
            let gauge = Gauge::default()
                .block(block)
                .gauge_style(MedicalTheme::info())
                .ratio(ratio)
                .label(label);
            f.render_widget(gauge, area);
        }
        _ => {
            let value_style = if field.buffer.is_some() {
                MedicalTheme::focused()
            } else {
                MedicalTheme::text()
            };
            let content = Paragraph::new(Line::from(vec![
                Span::styled(" [-] ", MedicalTheme::key_desc()),
                Span::styled(text, value_style),
                if is_selected {
                    Span::styled("▌", MedicalTheme::focused())
                } else {
                    Span::raw("")
                },
                Span::styled(" [+]", MedicalTheme::key_desc()),
            ]))
            .block(block);
            f.render_widget(content, area);
        }
    }
}

fn render_result(f: &mut Frame, area: Rect, result: &ResultView<'_>) {
    let block = Block::default()
        .title(Span::styled(" Result ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let line = if result.processing {
        Line::from(vec![
            Span::styled(SPINNER[result.tick % SPINNER.len()], MedicalTheme::focused()),
            Span::styled(" Processing...", MedicalTheme::text_secondary()),
        ])
    } else {
        match result.outcome {
            Some(outcome) if outcome.is_success() => Line::from(Span::styled(
                outcome.message(),
                MedicalTheme::success().add_modifier(Modifier::BOLD),
            )),
            Some(outcome) => Line::from(vec![
                Span::styled("! ", MedicalTheme::danger()),
                Span::styled(outcome.message(), MedicalTheme::danger()),
            ]),
            None => Line::from(Span::styled(
                "Press [Enter] to predict",
                MedicalTheme::text_muted(),
            )),
        }
    };

    let content = Paragraph::new(line).block(block).wrap(Wrap { trim: true });
    f.render_widget(content, area);
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &PredictionFormState) {
    let content = if let Some(notice) = &state.notice {
        Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(notice.clone(), MedicalTheme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", MedicalTheme::key_hint()),
            Span::styled("Navigate ", MedicalTheme::key_desc()),
            Span::styled("[←→] ", MedicalTheme::key_hint()),
            Span::styled("Adjust ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Predict ", MedicalTheme::key_desc()),
            Span::styled("[R] ", MedicalTheme::key_hint()),
            Span::styled("Reset ", MedicalTheme::key_desc()),
            Span::styled("[F2] ", MedicalTheme::key_hint()),
            Span::styled("Explanations ", MedicalTheme::key_desc()),
            Span::styled("[Q] ", MedicalTheme::key_hint()),
            Span::styled("Quit", MedicalTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Column, Label, PredictionFailure, PreprocessingError};
    use crate::tui::ui::draw_to_rows;

    fn draw(state: &PredictionFormState, view: &ResultView<'_>) -> String {
        draw_to_rows(100, 24, |f| {
            let area = f.area();
            render_prediction(f, area, state, view);
        })
        .join("\n")
    }

    fn select(state: &mut PredictionFormState, column: Column) {
        while state.fields[state.selected_field].spec.column != column {
            state.next_field();
        }
    }

    #[test]
    fn test_defaults() {
        let mut state = PredictionFormState::default();
        assert_eq!(state.inputs(), FormInputs::default());
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_typing_replaces_value() {
        let mut state = PredictionFormState::default();
        state.input_char('4');
        state.input_char('2');
        state.next_field();

        let inputs = state.inputs();
        assert_eq!(inputs.age, 42);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let mut state = PredictionFormState::default();
        select(&mut state, Column::HeartRate);
        for c in "250".chars() {
            state.input_char(c);
        }

        let inputs = state.inputs();
        assert_eq!(inputs.heart_rate, 150);
        assert!(state.notice.as_deref().unwrap_or("").contains("Heart Rate"));
    }

    #[test]
    fn test_notice_clears_on_next_interaction() {
        let mut state = PredictionFormState::default();
        select(&mut state, Column::HeartRate);
        for c in "250".chars() {
            state.input_char(c);
        }
        state.next_field();
        assert!(state.notice.is_some());

        state.next_field();
        assert!(state.notice.is_none());

        state.notice = Some("stale".into());
        state.prev_field();
        assert!(state.notice.is_none());

        state.notice = Some("stale".into());
        state.step(1.0);
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_invalid_text_reverts() {
        let mut state = PredictionFormState::default();
        select(&mut state, Column::Bs);
        for c in "1.2.3".chars() {
            state.input_char(c);
        }

        let inputs = state.inputs();
        assert_eq!(inputs.bs, 0.0);
        assert!(state.notice.is_some());
    }

    #[test]
    fn test_rejected_characters_are_ignored() {
        let mut state = PredictionFormState::default();
        state.input_char('x');
        state.input_char('.');
        assert!(state.fields[0].buffer.is_none());
    }

    #[test]
    fn test_stepping_respects_bounds() {
        let mut state = PredictionFormState::default();
        select(&mut state, Column::BodyTemp);
        for _ in 0..20 {
            state.step(1.0);
        }
        assert_eq!(state.inputs().body_temp, 106);

        select(&mut state, Column::Bs);
        state.step(1.0);
        state.step(1.0);
        state.step(1.0);
        assert!((state.inputs().bs - 0.03).abs() < 1e-9);
        assert_eq!(state.fields[state.selected_field].display_text(), "0.03");
    }

    #[test]
    fn test_delete_char_edits_current_value() {
        let mut state = PredictionFormState::default();
        select(&mut state, Column::SystolicBp);
        state.delete_char();
        assert_eq!(state.fields[state.selected_field].display_text(), "12");
        assert_eq!(state.inputs().systolic_bp, 80);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut state = PredictionFormState::default();
        state.input_char('9');
        state.next_field();
        state.step(1.0);
        state.reset();
        assert_eq!(state.inputs(), FormInputs::default());
        assert_eq!(state.selected_field, 0);
    }

    #[test]
    fn test_edit_order_does_not_change_record() {
        let mut forward = PredictionFormState::default();
        select(&mut forward, Column::Age);
        forward.input_char('5');
        forward.input_char('0');
        select(&mut forward, Column::HeartRate);
        forward.step(1.0);

        let mut backward = PredictionFormState::default();
        select(&mut backward, Column::HeartRate);
        backward.step(1.0);
        select(&mut backward, Column::Age);
        backward.input_char('5');
        backward.input_char('0');

        assert_eq!(forward.inputs(), backward.inputs());
    }

    #[test]
    fn test_screen_before_first_prediction() {
        let state = PredictionFormState::default();
        let screen = draw(&state, &ResultView { processing: false, outcome: None, tick: 0 });

        assert!(screen.contains("Predict Mental Risk"));
        for field in &FORM_FIELDS {
            assert!(screen.contains(field.label), "missing {}", field.label);
        }
        assert!(screen.contains("Body Temperature (°F)"));
        assert!(screen.contains("Press [Enter] to predict"));
    }

    #[test]
    fn test_screen_while_processing() {
        let state = PredictionFormState::default();
        let screen = draw(&state, &ResultView { processing: true, outcome: None, tick: 0 });
        assert!(screen.contains("| Processing..."));
    }

    #[test]
    fn test_screen_shows_label() {
        let state = PredictionFormState::default();
        let outcome = PredictionOutcome::Success(Label::from("low risk"));
        let screen = draw(
            &state,
            &ResultView { processing: false, outcome: Some(&outcome), tick: 0 },
        );
        assert!(screen.contains("Prediction: low risk"));
        assert!(!screen.contains("Press [Enter] to predict"));
    }

    #[test]
    fn test_screen_shows_error_text() {
        let state = PredictionFormState::default();
        let outcome = PredictionOutcome::Failure(PredictionFailure::Preprocessing(
            PreprocessingError::Rejected("bad input".into()),
        ));
        let screen = draw(
            &state,
            &ResultView { processing: false, outcome: Some(&outcome), tick: 0 },
        );
        assert!(screen.contains("! Error in preprocessing: bad input"));
    }
}
