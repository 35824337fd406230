//! UI module: View components for the TUI.

pub mod explanation;
pub mod prediction;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::tui::styles::MedicalTheme;

/// Tab titles in display order.
pub const TAB_TITLES: [&str; 2] = ["Prediction", "Feature Explanation"];

/// Render the application title with the tab bar.
pub fn render_tabs(f: &mut Frame, area: Rect, selected: usize) {
    let tabs = Tabs::new(TAB_TITLES.iter().map(|t| Line::from(*t)))
        .select(selected)
        .style(MedicalTheme::text_secondary())
        .highlight_style(MedicalTheme::tab_selected())
        .block(
            Block::default()
                .title(Span::styled(
                    " Mental Risk Prediction Using Machine Learning ",
                    MedicalTheme::title(),
                ))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        );

    f.render_widget(tabs, area);
}

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(vec![Span::styled(
        "DISCLAIMER: Predictions are indicative model output and do not replace professional medical evaluation.",
        MedicalTheme::text_muted(),
    )])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(MedicalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

/// Draw into an in-memory terminal and return the screen as text rows.
#[cfg(test)]
pub(crate) fn draw_to_rows<F>(width: u16, height: u16, render: F) -> Vec<String>
where
    F: FnOnce(&mut Frame),
{
    use ratatui::{backend::TestBackend, Terminal};

    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
    terminal.draw(render).expect("draw");
    terminal
        .backend()
        .buffer()
        .content()
        .chunks(usize::from(width))
        .map(|row| row.iter().map(|cell| cell.symbol()).collect())
        .collect()
}
