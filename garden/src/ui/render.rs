//! Render orchestration for the garden TUI

use garden_core::garden::GardenSummary;
use garden_core::Category;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::layout::{centered_rect_fixed, AppLayout, DialogLayout};
use crate::ui::widgets::{GardenWidget, InputWidget, JournalWidget};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Overlay types
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    About,
    Help,
    Planting {
        category: Category,
    },
    Reflecting {
        plant_id: String,
        /// Tag of the follow-up request this dialog waits for.
        request: u64,
        /// `None` until the follow-up arrives.
        question: Option<String>,
    },
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = AppLayout::calculate(area);

    render_title_bar(frame, app, layout.title_area);

    let garden_widget = GardenWidget::new(app.session.garden(), &app.theme)
        .selected(app.selected_index())
        .frame(app.animation_frame)
        .focused(!app.has_overlay());
    frame.render_widget(garden_widget, layout.garden_area);

    render_sidebar(frame, app, layout.sidebar_area);
    render_status_bar(frame, app, layout.status_bar);
    render_hotkey_bar(frame, app, layout.hotkey_bar);

    if let Some(overlay) = app.overlay() {
        render_overlay(frame, app, overlay, area);
    }
}

/// Render the title bar
fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" Yalom's Garden ", app.theme.title_style()),
        Span::styled(
            " MENTAL RESILIENCE ",
            Style::default()
                .fg(app.theme.terracotta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" questions: {} ", app.session.generator().name()),
            app.theme.system_style(),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn summary_lines<'a>(app: &'a App, summary: &GardenSummary) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::from(format!("Plants       {}", summary.plants)),
        Line::from(format!("Mature       {}", summary.mature)),
        Line::from(format!("Reflections  {}", summary.reflections)),
        Line::from(""),
    ];

    for (category, count) in &summary.by_category {
        let style = if *count > 0 {
            app.theme.category_style(*category)
        } else {
            app.theme.system_style()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<14}", category.name()), style),
            Span::raw(count.to_string()),
        ]));
    }

    lines.push(Line::from(""));
    let residents: Vec<&str> = app
        .session
        .garden()
        .wildlife()
        .into_iter()
        .map(|w| w.name())
        .collect();
    lines.push(Line::from(Span::styled(
        format!("Visiting: {}", residents.join(", ")),
        app.theme.wildlife_style(),
    )));

    if let Some(plant) = app.selected_plant() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(plant.category.name(), app.theme.category_style(plant.category)),
            Span::raw(format!(" · {}", plant.stage)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("\"{}\"", plant.first_answer()),
            app.theme.answer_style(),
        )));
        lines.push(Line::from(Span::styled(
            format!("{} reflections", plant.reflections.len()),
            app.theme.system_style(),
        )));
    }

    lines
}

/// Render the summary sidebar
fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let summary = app.session.garden().summary();
    let block = Block::default()
        .title(" Growth ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(false));

    let paragraph = Paragraph::new(summary_lines(app, &summary))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let message = app.status_message().unwrap_or_default();
    let line = Line::from(Span::styled(
        format!(" {message}"),
        Style::default().fg(app.theme.paper),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the hotkey bar
fn render_hotkey_bar(frame: &mut Frame, app: &App, area: Rect) {
    let keys: &[(&str, &str)] = if app.is_editing() {
        &[("Enter", "submit"), ("Esc", "cancel")]
    } else if app.has_overlay() {
        &[("Esc", "close")]
    } else {
        &[
            ("n", "plant"),
            ("Enter", "cultivate"),
            ("←/→", "select"),
            ("a", "about"),
            ("?", "help"),
            ("q", "quit"),
        ]
    };

    let mut spans = Vec::new();
    for (key, action) in keys {
        spans.push(Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(app.theme.mustard)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!("{action} "), app.theme.system_style()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render overlay
fn render_overlay(frame: &mut Frame, app: &App, overlay: &Overlay, area: Rect) {
    match overlay {
        Overlay::About => render_about_overlay(frame, app, area),
        Overlay::Help => render_help_overlay(frame, app, area),
        Overlay::Planting { category } => render_planting_overlay(frame, app, *category, area),
        Overlay::Reflecting {
            plant_id, question, ..
        } => render_reflecting_overlay(frame, app, plant_id, question.as_deref(), area),
    }
}

fn popup_block<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true))
}

/// Render the orientation dialog
fn render_about_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_fixed(60, 17, area);
    frame.render_widget(Clear, popup_area);

    let bullet = Style::default()
        .fg(app.theme.forest)
        .add_modifier(Modifier::BOLD);
    let text = vec![
        Line::from(Span::styled(
            "This garden is built on the principles of Existential Psychotherapy.",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(
            "Just as a jungle grows dense through diversity, your resilience grows \
             through different sources of meaning:",
        ),
        Line::from(""),
        Line::from(Span::styled("  • Altruism & Service", bullet)),
        Line::from(Span::styled("  • Human Connection", bullet)),
        Line::from(Span::styled("  • Existential Purpose", bullet)),
        Line::from(Span::styled("  • Hope & Future Vision", bullet)),
        Line::from(""),
        Line::from("Plant a seed by answering a prompt. Each reflection helps it grow."),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc to enter the garden",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(popup_block(app, " Jungle of the Mind "))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup_area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_fixed(50, 17, area);
    frame.render_widget(Clear, popup_area);

    let heading = Style::default().add_modifier(Modifier::UNDERLINED);
    let help_text = vec![
        Line::from(Span::styled("Garden:", heading)),
        Line::from("  n              Plant a seed"),
        Line::from("  Enter/Space    Cultivate the selected plant"),
        Line::from("  ←/→ or h/l     Select previous/next plant"),
        Line::from("  Tab            Select next plant"),
        Line::from("  a              About this garden"),
        Line::from("  q              Quit"),
        Line::from(""),
        Line::from(Span::styled("Dialogs:", heading)),
        Line::from("  Enter          Plant or nurture growth"),
        Line::from("  Esc            Close without saving"),
        Line::from("  ←/→ Home/End   Move the cursor"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or q to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(popup_block(app, " Help "))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup_area);
}

/// Render the planting dialog
fn render_planting_overlay(frame: &mut Frame, app: &App, category: Category, area: Rect) {
    let popup_area = centered_rect_fixed(64, 14, area);
    frame.render_widget(Clear, popup_area);

    let block = popup_block(app, " Sow Intention ");
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let layout = DialogLayout::calculate(inner);
    let prompt = category.prompt();
    let body = vec![
        Line::from(Span::styled(
            category.name().to_uppercase(),
            app.theme.category_style(category),
        )),
        Line::from(""),
        Line::from(Span::styled(prompt.question, app.theme.question_style())),
        Line::from(""),
        Line::from(Span::styled(prompt.description, app.theme.answer_style())),
    ];
    frame.render_widget(
        Paragraph::new(body)
            .alignment(ratatui::layout::Alignment::Center)
            .wrap(Wrap { trim: true }),
        layout.body_area,
    );

    let input = InputWidget::new(app.input_buffer(), &app.theme)
        .cursor_position(app.cursor_position())
        .placeholder("Root your thoughts here...");
    frame.render_widget(input, layout.input_area);
}

/// Render the reflecting dialog
fn render_reflecting_overlay(
    frame: &mut Frame,
    app: &App,
    plant_id: &str,
    question: Option<&str>,
    area: Rect,
) {
    let Some(plant) = app.session.plant(plant_id) else {
        return;
    };

    let popup_area = centered_rect_fixed(72, 22, area);
    frame.render_widget(Clear, popup_area);

    let block = popup_block(app, " Cultivate ");
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let layout = DialogLayout::calculate(inner);
    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(layout.body_area);

    frame.render_widget(JournalWidget::new(plant, &app.theme), body[0]);

    let question_line = match question {
        Some(q) => Line::from(Span::styled(q, app.theme.question_style())),
        None => {
            let spinner = SPINNER[(app.animation_frame / 2) as usize % SPINNER.len()];
            Line::from(Span::styled(
                format!("{spinner} Deepening roots..."),
                Style::default()
                    .fg(app.theme.terracotta)
                    .add_modifier(Modifier::BOLD),
            ))
        }
    };
    frame.render_widget(
        Paragraph::new(question_line)
            .alignment(ratatui::layout::Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::TOP).border_style(app.theme.border_style(false))),
        body[1],
    );

    let input = InputWidget::new(app.input_buffer(), &app.theme)
        .cursor_position(app.cursor_position())
        .enabled(question.is_some())
        .placeholder(if question.is_some() {
            "Reflect..."
        } else {
            "Waiting for the next question..."
        });
    frame.render_widget(input, layout.input_area);
}
