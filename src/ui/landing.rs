// ============================================================================
// Landing - Rendu de la page vitrine
// ============================================================================
// Une seule page défilante, découpée en sections. La barre de navigation
// "défile" jusqu'à une section : on calcule la ligne de début de chaque
// section et on s'en sert comme offset de scroll du Paragraph.
//
// CONCEPTS RATATUI :
// 1. Paragraph::scroll : décalage vertical du contenu
// 2. Layout imbriqués : page + panneau de formulaire côte à côte
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Screen};
use crate::models::landing::{self, Section, SECTION_COUNT};
use crate::models::{ConsultationType, ContactField};
use crate::ui::form::{confirmation_line, field_lines, shortcut, FieldView};

/// Page vitrine rendue en lignes, avec la ligne de début de chaque section
#[derive(Debug)]
pub struct PageLayout {
    pub lines: Vec<Line<'static>>,
    /// Indexé comme Section::ALL
    pub section_starts: [usize; SECTION_COUNT],
}

impl PageLayout {
    /// Offset de scroll pour afficher une section (plus un décalage manuel)
    ///
    /// Le résultat est borné pour ne pas défiler au-delà du contenu
    pub fn scroll_for(&self, section: Section, extra: u16) -> u16 {
        let start = self.section_starts[section.index()];
        let last_line = self.lines.len().saturating_sub(1);
        let offset = (start + extra as usize).min(last_line);
        u16::try_from(offset).unwrap_or(u16::MAX)
    }

    /// Décalage manuel au-delà duquel scroll_for ne bouge plus
    pub fn max_extra(&self, section: Section) -> u16 {
        let start = self.section_starts[section.index()];
        let last_line = self.lines.len().saturating_sub(1);
        u16::try_from(last_line.saturating_sub(start)).unwrap_or(u16::MAX)
    }
}

/// Zones de l'écran vitrine
struct LandingAreas {
    nav: Rect,
    page: Rect,
    form: Option<Rect>,
    footer: Rect,
}

fn landing_areas(screen: Rect, form_open: bool) -> LandingAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header : marque + navigation
            Constraint::Min(0),    // Page
            Constraint::Length(3), // Footer : raccourcis
        ])
        .split(screen);

    let (page, form) = if form_open {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
            .split(chunks[1]);
        (columns[0], Some(columns[1]))
    } else {
        (chunks[1], None)
    };

    LandingAreas {
        nav: chunks[0],
        page,
        form,
        footer: chunks[2],
    }
}

/// Largeur de texte d'une zone de page : 2 colonnes de bordure + 2 de marge
fn page_width(area: Rect) -> usize {
    area.width.saturating_sub(4).max(20) as usize
}

/// Défilement manuel maximal pour la section active, à cette taille d'écran
pub fn scroll_limit(screen: Rect, app: &App) -> u16 {
    let areas = landing_areas(screen, app.current_screen == Screen::ContactForm);
    build_page(page_width(areas.page)).max_extra(app.active_section)
}

/// Dessine la page vitrine (avec ou sans formulaire)
pub fn render_landing(frame: &mut Frame, app: &App) {
    let areas = landing_areas(frame.size(), app.current_screen == Screen::ContactForm);

    render_nav(frame, app, areas.nav);
    render_page(frame, app, areas.page);
    if let Some(form) = areas.form {
        render_contact_form(frame, app, form);
    }
    render_footer(frame, app, areas.footer);
}

// ============================================================================
// Header : marque + barre de navigation
// ============================================================================

fn render_nav(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(format!(" {} ", landing::BRAND))
        .title_alignment(Alignment::Left);

    let mut spans = Vec::new();
    for (i, section) in Section::ALL.iter().enumerate() {
        let style = if *section == app.active_section {
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!("{} {}", i + 1, section.title()), style));
        spans.push(Span::raw("   "));
    }
    spans.push(Span::styled(
        "[r] Записаться",
        Style::default().fg(Color::Black).bg(Color::Magenta).add_modifier(Modifier::BOLD),
    ));

    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Page : contenu des sections
// ============================================================================

fn render_page(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    let page = build_page(page_width(area));
    let scroll = page.scroll_for(app.active_section, app.scroll_offset);

    let paragraph = Paragraph::new(page.lines)
        .block(block)
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

/// Construit toute la page pour une largeur donnée
///
/// CONCEPT : texte pré-découpé
/// - On découpe nous-mêmes les paragraphes (wrap_text)
/// - Le nombre de lignes est donc connu, et les offsets de section exacts
pub fn build_page(width: usize) -> PageLayout {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut section_starts = [0usize; SECTION_COUNT];

    for section in Section::ALL {
        section_starts[section.index()] = lines.len();
        lines.push(section_title(section));
        lines.push(Line::from(""));
        section_body(section, width, &mut lines);
        lines.push(Line::from(""));
    }

    // Pied de page du site
    lines.push(Line::from(Span::styled(
        landing::BRAND,
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
    )));
    push_wrapped(&mut lines, landing::FOOTER_TAGLINE, width, muted());
    push_wrapped(&mut lines, landing::FOOTER_COPYRIGHT, width, muted());

    PageLayout { lines, section_starts }
}

fn section_title(section: Section) -> Line<'static> {
    let title = match section {
        Section::Home => landing::HERO_TITLE,
        Section::Formats => "Формат консультаций",
        Section::Reviews => "Отзывы клиентов",
        Section::Booking => "Запись на консультацию",
        other => other.title(),
    };

    Line::from(Span::styled(
        format!("━━ {} ━━", title),
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
    ))
}

fn section_body(section: Section, width: usize, lines: &mut Vec<Line<'static>>) {
    match section {
        Section::Home => {
            push_wrapped(lines, landing::HERO_TEXT, width, Style::default());
            lines.push(Line::from(""));
            let stats: Vec<Span<'static>> = landing::STATS
                .iter()
                .flat_map(|stat| {
                    [
                        Span::styled(stat.value, accent().add_modifier(Modifier::BOLD)),
                        Span::styled(format!(" {}    ", stat.label), muted()),
                    ]
                })
                .collect();
            lines.push(Line::from(stats));
        }
        Section::About => {
            push_wrapped(lines, landing::ABOUT_TEXT, width, Style::default());
            lines.push(Line::from(""));
            for credential in landing::CREDENTIALS {
                lines.push(Line::from(vec![
                    Span::styled(format!("• {}: ", credential.title), accent()),
                    Span::raw(credential.description),
                ]));
            }
        }
        Section::Services => {
            for service in landing::SERVICES {
                lines.push(Line::from(Span::styled(
                    format!("◆ {}", service.title),
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                push_wrapped(lines, service.description, width, muted());
            }
        }
        Section::Formats => {
            for consultation in landing::FORMATS {
                lines.push(Line::from(Span::styled(
                    consultation.title,
                    accent().add_modifier(Modifier::BOLD),
                )));
                push_wrapped(lines, consultation.description, width, muted());
                for highlight in consultation.highlights {
                    lines.push(Line::from(vec![
                        Span::styled("  ✓ ", accent()),
                        Span::raw(highlight),
                    ]));
                }
                lines.push(Line::from(""));
            }
        }
        Section::Pricing => {
            for plan in landing::PRICE_PLANS {
                let mut header = vec![
                    Span::styled(plan.title, Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw("  "),
                    Span::styled(plan.price, accent().add_modifier(Modifier::BOLD)),
                    Span::styled(format!(" / {}", plan.duration), muted()),
                ];
                if plan.featured {
                    header.push(Span::styled(
                        "  Популярное ",
                        Style::default().fg(Color::Black).bg(Color::Magenta),
                    ));
                }
                lines.push(Line::from(header));
                for feature in plan.features {
                    lines.push(Line::from(vec![Span::styled("  ✓ ", accent()), Span::raw(feature)]));
                }
                lines.push(Line::from(""));
            }
        }
        Section::Reviews => {
            for review in landing::TESTIMONIALS {
                lines.push(Line::from(Span::styled(
                    landing::stars(review.rating),
                    Style::default().fg(Color::Yellow),
                )));
                push_wrapped(
                    lines,
                    &format!("\"{}\"", review.text),
                    width,
                    Style::default().add_modifier(Modifier::ITALIC),
                );
                lines.push(Line::from(Span::styled(format!("— {}", review.name), accent())));
                lines.push(Line::from(""));
            }
        }
        Section::Booking => {
            push_wrapped(lines, landing::BOOKING_INTRO, width, muted());
            lines.push(Line::from(vec![
                Span::raw("Нажмите "),
                Span::styled("[r]", accent().add_modifier(Modifier::BOLD)),
                Span::raw(", чтобы заполнить заявку"),
            ]));
            for kind in [ConsultationType::Online, ConsultationType::Offline] {
                lines.push(Line::from(vec![
                    Span::styled(format!("  • {}", kind.label()), Style::default()),
                    Span::styled(format!(" — {}", kind.details()), muted()),
                ]));
            }
        }
        Section::Contacts => {
            for contact in landing::CONTACTS {
                lines.push(Line::from(vec![
                    Span::styled(format!("{:<10}", contact.label), muted()),
                    Span::raw(contact.value),
                ]));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Часы работы",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for hours in landing::OPENING_HOURS {
                lines.push(Line::from(vec![
                    Span::styled(format!("{:<24}", hours.days), muted()),
                    Span::raw(hours.hours),
                ]));
            }
            push_wrapped(lines, landing::HOURS_NOTE, width, muted());
        }
    }
}

fn accent() -> Style {
    Style::default().fg(Color::Magenta)
}

fn muted() -> Style {
    Style::default().fg(Color::Gray)
}

fn push_wrapped(lines: &mut Vec<Line<'static>>, text: &str, width: usize, style: Style) {
    for chunk in wrap_text(text, width) {
        lines.push(Line::from(Span::styled(chunk, style)));
    }
}

/// Découpe un texte en lignes d'au plus `width` caractères, sur les espaces
///
/// CONCEPT RUST : chars().count() vs len()
/// - len() compte les octets : faux pour le cyrillique (2 octets par lettre)
/// - chars().count() compte les caractères affichés
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// ============================================================================
// Panneau : formulaire de demande
// ============================================================================

fn render_contact_form(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" Запись на консультацию ");

    let form = &app.contact_form;
    let fields: Vec<FieldView> = ContactField::ALL
        .iter()
        .map(|field| FieldView {
            label: field.label(),
            value: form.value(*field),
            placeholder: field.placeholder(),
            focused: form.focus == *field,
            is_choice: *field == ContactField::ConsultationType,
        })
        .collect();

    let paragraph = Paragraph::new(field_lines(&fields, true)).block(block);
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Footer : raccourcis
// ============================================================================

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    let line = if app.current_screen == Screen::ContactForm {
        let mut spans = shortcut("[Tab/↑↓]", "Поле", Color::Yellow);
        spans.extend(shortcut("[Enter]", "Отправить заявку", Color::Green));
        spans.extend(shortcut("[ESC]", "Закрыть", Color::Red));
        Line::from(spans)
    } else if app.is_awaiting_quit_confirmation() {
        confirmation_line("[q]", "чтобы выйти, или любую другую клавишу для отмены".to_string())
    } else {
        let mut spans = shortcut("[q]", "Выход", Color::Yellow);
        spans.extend(shortcut("[←→ / 1-8]", "Разделы", Color::Yellow));
        spans.extend(shortcut("[↑↓ / j k]", "Прокрутка", Color::Yellow));
        spans.extend(shortcut("[r]", "Записаться", Color::Green));
        spans.extend(shortcut("[f]", "Финансы", Color::Cyan));
        Line::from(spans)
    };

    let paragraph = Paragraph::new(line).block(block).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
