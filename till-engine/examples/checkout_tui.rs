//! Checkout TUI Demo - drive the interaction engine from a terminal
//!
//! Run: cargo run --example checkout_tui [wizard|rapid]

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{prelude::*, widgets::*};
use shared::models::{CatalogEntry, Customer, CustomerClass};
use std::io::{self, Stdout};
use std::time::Duration;
use till_engine::session::{
    CheckoutSession, FocusTarget, Key, Mode, Notification, SessionEffect, Severity, Step, Surface,
};
use till_engine::shortcuts::shortcuts_for;
use tracing_subscriber::EnvFilter;

struct App {
    session: CheckoutSession,
    /// Most recent notifications, newest last
    notifications: Vec<Notification>,
    /// Invoice IDs completed this run
    completed: Vec<String>,
}

impl App {
    fn new(surface: Surface) -> Self {
        Self {
            session: CheckoutSession::new(surface, sample_catalog(), sample_customers()),
            notifications: Vec::new(),
            completed: Vec::new(),
        }
    }
}

fn sample_catalog() -> Vec<CatalogEntry> {
    let entry = |id: &str, name: &str, sku: &str, wholesale: f64, retail: f64, stock: i32| {
        CatalogEntry {
            id: id.to_string(),
            name: name.to_string(),
            sku: sku.to_string(),
            barcode: Some(format!("84{sku}")),
            category: None,
            stock,
            reorder_level: 3,
            cost_price: wholesale * 0.7,
            wholesale_price: wholesale,
            retail_price: retail,
            is_active: true,
        }
    };
    vec![
        entry("p1", "Espresso Beans 1kg", "BEAN1", 9.0, 12.5, 24),
        entry("p2", "Filter Paper 100pk", "FILT1", 2.0, 3.0, 80),
        entry("p3", "Ceramic Mug", "MUG1", 5.0, 8.0, 12),
        entry("p4", "Cold Brew Bottle", "COLD1", 3.5, 5.5, 18),
        entry("p5", "Moka Pot 3-cup", "MOKA3", 14.0, 21.0, 6),
    ]
}

fn sample_customers() -> Vec<Customer> {
    let customer = |id: &str, name: &str, phone: &str, class: CustomerClass| Customer {
        id: id.to_string(),
        name: name.to_string(),
        phone: Some(phone.to_string()),
        class,
        credit_ok: true,
        is_active: true,
    };
    vec![
        customer("c1", "Alice Moreno", "600111222", CustomerClass::Retail),
        customer("c2", "Bar Central", "600333444", CustomerClass::Wholesale),
        customer("c3", "Hotel Miramar", "600555666", CustomerClass::Wholesale),
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let surface = match std::env::args().nth(1).as_deref() {
        Some("wizard") => Surface::Wizard,
        _ => Surface::Rapid,
    };

    // Engine logs go to a file; the terminal belongs to the TUI
    let log_file = std::fs::File::create("checkout_tui.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(surface);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err);
    }

    Ok(())
}

/// Map a crossterm key event onto the engine's input alphabet.
fn translate_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::F(n) => Some(Key::F(n)),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Esc => Some(Key::Esc),
        KeyCode::Char(c) => Some(Key::Char(c)),
        _ => None,
    }
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        // The engine requests focus moves between renders
        let _focus = app.session.take_pending_focus();

        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    continue;
                }
                let Some(engine_key) = translate_key(key.code) else {
                    continue;
                };
                for effect in app.session.handle_key(engine_key) {
                    match effect {
                        SessionEffect::Notify(n) => {
                            app.notifications.push(n);
                            if app.notifications.len() > 5 {
                                app.notifications.remove(0);
                            }
                        }
                        SessionEffect::ScrollIntoView(_) => {
                            // Lists here are short enough to render whole
                        }
                        SessionEffect::ExitRequested => return Ok(()),
                        SessionEffect::CheckoutCompleted(invoice) => {
                            app.notifications.push(Notification::info(format!(
                                "Invoice {} | {:.2} by {}",
                                &invoice.invoice_id[..8],
                                invoice.totals.total,
                                invoice.payment_method.label()
                            )));
                            app.completed.push(invoice.invoice_id);
                        }
                    }
                }
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Main content
            Constraint::Length(3), // Search input
            Constraint::Length(7), // Notifications
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    draw_left_pane(f, app, main_chunks[0]);
    draw_cart(f, app, main_chunks[1]);
    draw_search(f, app, chunks[2]);
    draw_notifications(f, app, chunks[3]);

    if app.session.help_open() {
        draw_help_overlay(f, app);
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let session = &app.session;
    let step_span = |step: Step, label: &'static str| {
        if session.current_step() == step {
            Span::styled(
                format!(" {label} "),
                Style::default().fg(Color::Black).bg(Color::Yellow),
            )
        } else {
            Span::styled(format!(" {label} "), Style::default().fg(Color::DarkGray))
        }
    };

    let mut spans = vec![Span::styled(
        match session.surface() {
            Surface::Wizard => " Wizard ",
            Surface::Rapid => " Rapid ",
        },
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    if session.surface() == Surface::Wizard {
        spans.push(step_span(Step::Customer, "Customer"));
    }
    spans.push(step_span(Step::Products, "Products"));
    spans.push(step_span(Step::Review, "Review"));
    spans.push(Span::raw(" | mode: "));
    spans.push(Span::styled(
        format!("{:?}", session.current_mode()),
        Style::default().fg(Color::Green),
    ));
    spans.push(Span::raw(format!(" | sales: {}", app.completed.len())));

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Till - press ? for shortcuts "),
    );
    f.render_widget(header, area);
}

fn draw_left_pane(f: &mut Frame, app: &App, area: Rect) {
    let session = &app.session;
    match session.current_step() {
        Step::Customer => {
            let items: Vec<ListItem> = session
                .filtered_customers()
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    let marker = if i == session.highlight() { ">" } else { " " };
                    let class = match c.class {
                        CustomerClass::Retail => "retail",
                        CustomerClass::Wholesale => "wholesale",
                    };
                    ListItem::new(format!("{marker} {} ({class})", c.name))
                })
                .collect();
            let list = List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Customers "),
            );
            f.render_widget(list, area);
        }
        Step::Products => {
            let items: Vec<ListItem> = session
                .filtered_entries()
                .iter()
                .enumerate()
                .map(|(i, e)| {
                    let marker = if i == session.highlight() { ">" } else { " " };
                    ListItem::new(format!(
                        "{marker} {:<22} {:>7.2}  stock {:>3}",
                        e.name, e.retail_price, e.stock
                    ))
                })
                .collect();
            let mut title = " Products ".to_string();
            if let Some(pending) = session.pending_scan() {
                let name = session
                    .catalog_entry(&pending.entry_id)
                    .map(|e| e.name.as_str())
                    .unwrap_or("?");
                title = format!(
                    " Staged: {} x{} [{}] ",
                    name,
                    pending.quantity,
                    pending.selection.mode.label()
                );
            }
            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title(title));
            f.render_widget(list, area);
        }
        Step::Review => {
            let totals = session.totals();
            let adj = session.adjustment();
            let text = vec![
                Line::from(format!("Subtotal   {:>9.2}", totals.subtotal)),
                Line::from(format!(
                    "Discount   {:>9.2}  ({} {})",
                    totals.discount_amount,
                    adj.discount_kind.label(),
                    adj.discount_value
                )),
                Line::from(format!(
                    "Tax        {:>9.2}  ({})",
                    totals.tax_amount,
                    if adj.tax_enabled { "on" } else { "off" }
                )),
                Line::from(""),
                Line::from(vec![
                    Span::raw("Total      "),
                    Span::styled(
                        format!("{:>9.2}", totals.total),
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(""),
                Line::from(format!("Payment: {}", session.payment_method().label())),
                Line::from(format!(
                    "Customer: {}",
                    session
                        .selected_customer()
                        .map(|c| c.name.clone())
                        .unwrap_or_else(|| "Walk-in".to_string())
                )),
            ];
            let review = Paragraph::new(text)
                .block(Block::default().borders(Borders::ALL).title(" Review "));
            f.render_widget(review, area);
        }
    }
}

fn draw_cart(f: &mut Frame, app: &App, area: Rect) {
    let session = &app.session;
    let in_cart_mode = session.current_mode() == Mode::Cart;
    let items: Vec<ListItem> = session
        .cart()
        .lines()
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let marker = if in_cart_mode && i == session.cart_cursor() {
                ">"
            } else {
                " "
            };
            ListItem::new(format!(
                "{marker} {:<20} x{:<3} @{:>7.2} = {:>8.2}",
                line.name,
                line.quantity,
                line.unit_price,
                line.line_total()
            ))
        })
        .collect();

    let totals = session.totals();
    let cart = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(if in_cart_mode {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            })
            .title(format!(
                " Cart ({} lines, {:.2}) ",
                session.cart().len(),
                totals.total
            )),
    );
    f.render_widget(cart, area);
}

fn draw_search(f: &mut Frame, app: &App, area: Rect) {
    let session = &app.session;
    let focused = session.focus() == FocusTarget::SearchField;
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let input = Paragraph::new(session.query())
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(" Scan / Search "));
    f.render_widget(input, area);

    if focused {
        f.set_cursor_position((area.x + session.query().len() as u16 + 1, area.y + 1));
    }
}

fn draw_notifications(f: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .notifications
        .iter()
        .rev()
        .map(|n| {
            let style = match n.severity {
                Severity::Info => Style::default().fg(Color::White),
                Severity::Warning => Style::default().fg(Color::Red),
            };
            Line::from(Span::styled(n.message.clone(), style))
        })
        .collect();
    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Messages "));
    f.render_widget(panel, area);
}

fn draw_help_overlay(f: &mut Frame, app: &App) {
    let session = &app.session;
    let shortcuts = shortcuts_for(
        session.surface(),
        session.current_step(),
        session.current_mode(),
    );
    let lines: Vec<Line> = shortcuts
        .iter()
        .map(|s| {
            Line::from(vec![
                Span::styled(
                    format!("{:<12}", s.key),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(s.action),
            ])
        })
        .collect();

    let height = (lines.len() as u16 + 2).min(f.area().height);
    let width = 50.min(f.area().width);
    let area = Rect::new(
        (f.area().width.saturating_sub(width)) / 2,
        (f.area().height.saturating_sub(height)) / 2,
        width,
        height,
    );
    f.render_widget(Clear, area);
    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Shortcuts "),
    );
    f.render_widget(help, area);
}
