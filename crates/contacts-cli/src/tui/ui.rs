//! UI rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use contacts_core::Contact;

use super::app::{ActivePane, App};
use crate::client::list::{DELETE_PROMPT, DELETE_TITLE};
use crate::client::{FormField, FormMode, Notice, EMPTY_PLACEHOLDER};
use crate::output::truncate;

/// Collapsed messages show this many characters
const MESSAGE_PREVIEW: usize = 40;

/// Main UI rendering function
pub fn draw(frame: &mut Frame, app: &App) {
    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    let pane_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(outer_chunks[0]);

    draw_form_pane(frame, app, pane_chunks[0]);
    draw_list_pane(frame, app, pane_chunks[1]);
    draw_status_bar(frame, app, outer_chunks[1]);

    if app.list.pending_delete().is_some() {
        draw_delete_dialog(frame, app);
    }

    if app.show_help {
        draw_help_overlay(frame);
    }
}

fn pane_block(title: String, is_active: bool) -> Block<'static> {
    let border_style = if is_active {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Draw the create/edit form (left)
fn draw_form_pane(frame: &mut Frame, app: &App, area: Rect) {
    let is_active = app.active_pane == ActivePane::Form;
    let editing = matches!(app.form.mode(), FormMode::Edit(_));
    let title = if editing { " Edit Contact " } else { " Add New " };

    let mut lines = Vec::new();
    for field in FormField::ALL {
        let focused = is_active && app.field == field;
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let cursor = if focused { "_" } else { "" };

        lines.push(Line::from(Span::styled(format!("{}:", field.label()), label_style)));
        lines.push(Line::from(format!("  {}{}", app.form.buffer().get(field), cursor)));
        lines.push(Line::from(""));
    }

    let button = if app.form.is_in_flight() {
        "[ Processing... ]"
    } else if editing {
        "[ Update Contact ]"
    } else {
        "[ Save Contact ]"
    };
    lines.push(Line::from(Span::styled(
        button,
        Style::default().add_modifier(Modifier::BOLD),
    )));
    if editing {
        lines.push(Line::from(Span::styled(
            "Esc: Cancel Edit",
            Style::default().add_modifier(Modifier::DIM),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(pane_block(title.to_string(), is_active))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Draw the contact list (right)
fn draw_list_pane(frame: &mut Frame, app: &App, area: Rect) {
    let is_active = app.active_pane == ActivePane::List;
    let block = pane_block(format!(" My Contacts ({}) ", app.list.len()), is_active);

    if app.list.is_empty() {
        let text = if app.loaded {
            EMPTY_PLACEHOLDER
        } else {
            "Loading..."
        };
        let paragraph = Paragraph::new(text)
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let width = area.width.saturating_sub(6) as usize;
    let items: Vec<ListItem> = app
        .list
        .contacts()
        .iter()
        .map(|contact| contact_item(contact, app.list.is_expanded(contact.id), width))
        .collect();

    let highlight_style = if is_active {
        Style::default()
            .add_modifier(Modifier::BOLD)
            .add_modifier(Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    };

    let list = List::new(items).block(block).highlight_style(highlight_style);

    let mut state = ListState::default();
    state.select(Some(app.list.cursor()));

    frame.render_stateful_widget(list, area, &mut state);
}

fn contact_item(contact: &Contact, expanded: bool, width: usize) -> ListItem<'static> {
    let mut lines = vec![
        Line::from(Span::styled(
            contact.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("  ✉ {}", contact.email)),
        Line::from(format!("  ☎ {}", contact.phone)),
        Line::from(Span::styled(
            created_label(contact),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    if !contact.message.is_empty() {
        if expanded {
            lines.extend(wrap_text(&contact.message, width.max(10)).into_iter().map(|l| {
                Line::from(Span::styled(
                    format!("  {}", l),
                    Style::default().fg(Color::Cyan),
                ))
            }));
        } else {
            lines.push(Line::from(Span::styled(
                format!("  {}", truncate(&contact.message, MESSAGE_PREVIEW)),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::DIM),
            )));
        }
    }
    lines.push(Line::from(""));

    ListItem::new(lines)
}

fn created_label(contact: &Contact) -> String {
    format!("  Added {}", contact.created_at.format("%Y-%m-%d"))
}

/// Greedy word wrap
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (content, style) = match &app.notice {
        Some(Notice::Success(text)) => (text.clone(), Style::default().fg(Color::Green)),
        Some(Notice::Error(text)) => (text.clone(), Style::default().fg(Color::Red)),
        None => {
            let hints = match app.active_pane {
                ActivePane::Form => "↑/↓:field  Enter:save  Esc:cancel/list  Tab:list  Ctrl-C:quit",
                ActivePane::List => {
                    "j/k:move  Enter:message  a:add  e:edit  d:delete  Tab:form  ?:help  q:quit"
                }
            };
            (hints.to_string(), Style::default().add_modifier(Modifier::DIM))
        }
    };

    frame.render_widget(Paragraph::new(content).style(style), area);
}

/// Centered popup of the given size, clamped to the frame
fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(area.width.saturating_sub(4));
    let popup_height = height.min(area.height.saturating_sub(4));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    Rect::new(popup_x, popup_y, popup_width, popup_height)
}

fn draw_delete_dialog(frame: &mut Frame, app: &App) {
    let area = popup_area(frame.area(), 46, 8);
    frame.render_widget(Clear, area);

    let target = app
        .list
        .pending_delete()
        .and_then(|id| app.list.find(id))
        .map(|c| c.name.clone())
        .unwrap_or_default();

    let actions = if app.list.is_deleting() {
        Line::from(Span::styled(
            "Deleting...",
            Style::default().add_modifier(Modifier::DIM),
        ))
    } else {
        Line::from(vec![
            Span::styled("[y] Delete", Style::default().fg(Color::Red)),
            Span::raw("   "),
            Span::raw("[n] Cancel"),
        ])
    };

    let text = vec![
        Line::from(Span::styled(target, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(DELETE_PROMPT),
        Line::from(""),
        actions,
    ];

    let block = Block::default()
        .title(format!(" {} ", DELETE_TITLE))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_help_overlay(frame: &mut Frame) {
    let area = popup_area(frame.area(), 50, 18);
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from("  Tab         Switch between form and list"),
        Line::from("  Ctrl-C      Quit"),
        Line::from(""),
        Line::from("Form:"),
        Line::from("  ↑/↓         Previous/next field"),
        Line::from("  Enter       Save or update"),
        Line::from("  Esc         Cancel edit"),
        Line::from(""),
        Line::from("List:"),
        Line::from("  j/k, ↑/↓    Move up/down"),
        Line::from("  Enter       Show/hide message"),
        Line::from("  e / d       Edit / delete contact"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default().title(" Help ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(help_text).block(block), area);
}
