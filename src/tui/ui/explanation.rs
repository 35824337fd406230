//! Feature explanation tab: static definitions of the six inputs.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::FORM_FIELDS;
use crate::tui::styles::MedicalTheme;

/// Render the feature explanation panel
pub fn render_explanation(f: &mut Frame, area: Rect) {
    let mut lines = vec![Line::from(""), Line::from(Span::styled(
        "Feature Explanations:",
        MedicalTheme::title(),
    ))];
    lines.push(Line::from(""));

    for field in &FORM_FIELDS {
        lines.push(Line::from(vec![
            Span::styled("  - ", MedicalTheme::text_muted()),
            Span::styled(field.explanation_title, MedicalTheme::focused()),
            Span::styled(": ", MedicalTheme::text_secondary()),
            Span::styled(field.explanation, MedicalTheme::text()),
        ]));
    }

    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .title(Span::styled(" Feature Explanations ", MedicalTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(panel, area);
}
