use chrono::Duration;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::{
    claim::{ClaimPhase, WindowState},
    models::{BadgeTier, Trend},
    session::{farcaster_step_label, Connection, Session},
    tui::app::{App, StatusKind, View},
    utils::ShareLinks,
};

pub fn draw(frame: &mut Frame, app: &App, session: &Session) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(12),
            Constraint::Length(4),
        ])
        .split(frame.size());

    draw_header(frame, session, chunks[0]);
    match app.view {
        View::Dash => draw_dash(frame, session, chunks[1]),
        View::Ranks => draw_ranks(frame, session, chunks[1]),
    }
    draw_footer(frame, app, chunks[2]);

    if matches!(
        session.claim_phase(),
        ClaimPhase::Confirming | ClaimPhase::Submitting
    ) {
        draw_claim_modal(frame, session);
    }
    if let Some(label) = farcaster_step_label(session.farcaster_step()) {
        draw_farcaster_overlay(frame, session.farcaster_step(), label);
    }
    if app.show_share {
        draw_share_popup(frame, session);
    }
}

fn tier_color(tier: BadgeTier) -> Color {
    match tier {
        BadgeTier::Platinum => Color::Cyan,
        BadgeTier::Gold => Color::Yellow,
        BadgeTier::Silver => Color::Gray,
        BadgeTier::Bronze => Color::Rgb(205, 127, 50),
        BadgeTier::None => Color::DarkGray,
    }
}

/// `3d 04h 12m 09s`, clamped at zero.
pub fn countdown(remaining: Duration) -> String {
    let secs = remaining.num_seconds().max(0);
    format!(
        "{}d {:02}h {:02}m {:02}s",
        secs / 86_400,
        (secs % 86_400) / 3_600,
        (secs % 3_600) / 60,
        secs % 60
    )
}

fn window_line(session: &Session) -> Line<'static> {
    let now = session.now();
    let window = session.window();
    let (text, color) = match session.window_state() {
        WindowState::Pending if session.is_frozen() => (
            format!(
                "Snapshot frozen. Claim opens in {}",
                countdown(window.opens_at - now)
            ),
            Color::Yellow,
        ),
        WindowState::Pending => (
            format!("Claim opens in {}", countdown(window.opens_at - now)),
            Color::Yellow,
        ),
        WindowState::Open => (
            format!("Claim closes in {}", countdown(window.closes_at - now)),
            Color::Green,
        ),
        WindowState::Expired => ("Claim window closed".to_string(), Color::Red),
    };
    Line::from(Span::styled(text, Style::default().fg(color)))
}

fn draw_header(frame: &mut Frame, session: &Session, area: Rect) {
    let logo = if session.app_logo().is_some() { "◉ " } else { "🔵 " };
    let lines = vec![
        Line::from(Span::styled(
            format!("{}BASED IMPRESSION", logo),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        )),
        window_line(session),
    ];
    let app = &session.settings().app;
    let header = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} v{}", app.name, app.version)),
        );
    frame.render_widget(header, area);
}

fn check(flag: bool) -> Span<'static> {
    if flag {
        Span::styled("✓", Style::default().fg(Color::Green))
    } else {
        Span::styled("✗", Style::default().fg(Color::Red))
    }
}

fn connection_line(session: &Session, key: &'static str, connection: Connection, done: bool) -> Line<'static> {
    let state = if session.is_in_flight(connection) {
        Span::styled("…", Style::default().fg(Color::Yellow))
    } else {
        check(done)
    };
    Line::from(vec![
        Span::styled(format!("[{}] ", key), Style::default().fg(Color::Green)),
        Span::raw(format!("{:<20}", connection.as_str())),
        state,
    ])
}

fn draw_dash(frame: &mut Frame, session: &Session, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(7)])
        .split(columns[1]);

    let mut profile_lines = Vec::new();
    match session.profile() {
        Some(profile) => {
            let tier = session.tier();
            profile_lines.push(Line::from(vec![
                Span::styled(
                    profile.effective_name().to_string(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("  ({})", profile.identity)),
            ]));
            profile_lines.push(Line::from(vec![
                Span::raw(format!("Rank #{}  ", profile.rank)),
                Span::styled(
                    tier.as_str(),
                    Style::default().fg(tier_color(tier)).add_modifier(Modifier::BOLD),
                ),
            ]));
            profile_lines.push(Line::from(format!("Balance: {} ETH", profile.balance)));
            profile_lines.push(Line::from(format!(
                "Base app {}d · X {}d · {} contributions",
                profile.base_app_age_days, profile.twitter_age_days, profile.contribution_count
            )));
            profile_lines.push(Line::from(""));
            profile_lines.push(connection_line(session, "w", Connection::Wallet, profile.wallet_connected));
            profile_lines.push(connection_line(
                session,
                "i",
                Connection::IdentityResolution,
                profile.display_name.is_some(),
            ));
            profile_lines.push(connection_line(session, "s", Connection::TwitterSync, profile.twitter_connected));
            profile_lines.push(connection_line(
                session,
                "f",
                Connection::FarcasterLink,
                profile.farcaster_connected,
            ));
        }
        None => {
            profile_lines.push(Line::from("No profile connected."));
            profile_lines.push(Line::from(""));
            profile_lines.push(connection_line(session, "w", Connection::Wallet, false));
        }
    }
    let profile = Paragraph::new(profile_lines)
        .block(Block::default().borders(Borders::ALL).title(format!("Profile · {}", session.identity())));
    frame.render_widget(profile, columns[0]);

    let mut score_lines = Vec::new();
    match session.score() {
        Some(score) => {
            let weights = &session.settings().scoring.weights;
            score_lines.push(Line::from(vec![
                Span::raw("Score: "),
                Span::styled(
                    format!("{:.1}/{:.0}", score.total_score, weights.max_total()),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
            ]));
            score_lines.push(Line::from(format!("  Base app age   {:>5.1}", score.base_app_points)));
            score_lines.push(Line::from(format!("  X account age  {:>5.1}", score.twitter_age_points)));
            score_lines.push(Line::from(format!("  Contributions  {:>5.1}", score.contribution_points)));
            score_lines.push(Line::from(format!("  Farcaster      {:>5.1}", score.farcaster_bonus)));
            score_lines.push(Line::from(""));
            if let Some(greeting) = session.greeting() {
                score_lines.push(Line::from(Span::styled(
                    greeting.to_string(),
                    Style::default().fg(Color::Blue),
                )));
            }
            let badge = if session.is_generating_image() {
                "Generating badge design...".to_string()
            } else if let Some(image) = session.badge_image() {
                format!("Badge design ready ({} bytes) · [g] regenerate", image.len())
            } else if session.tier().has_badge() {
                "Badge design unavailable · [g] retry".to_string()
            } else {
                "No badge at this rank".to_string()
            };
            score_lines.push(Line::from(badge));
        }
        None => score_lines.push(Line::from("Press c to calculate your impression.")),
    }
    let score = Paragraph::new(score_lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Impression"));
    frame.render_widget(score, right[0]);

    let mut claim_lines = vec![Line::from(vec![
        Span::raw("Claim: "),
        Span::styled(
            session.claim_phase().as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ])];
    for record in session.claim_state().history.iter().take(3) {
        claim_lines.push(Line::from(format!(
            "  {} #{} · {}",
            record.tier,
            record.rank,
            record.timestamp.format("%Y-%m-%d %H:%M UTC")
        )));
    }
    let claim = Paragraph::new(claim_lines)
        .block(Block::default().borders(Borders::ALL).title("Badge NFT [Enter]"));
    frame.render_widget(claim, right[1]);
}

fn draw_ranks(frame: &mut Frame, session: &Session, area: Rect) {
    let leaderboard = session.leaderboard();
    let me = session.profile().map(|p| p.username.as_str());

    let items: Vec<ListItem> = leaderboard
        .entries()
        .iter()
        .map(|entry| {
            let (arrow, color) = match entry.last_change {
                Some(Trend::Up) => ("▲", Color::Green),
                Some(Trend::Down) => ("▼", Color::Red),
                None => (" ", Color::Reset),
            };
            let style = if Some(entry.username.as_str()) == me {
                Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!("#{:<4}", entry.rank)),
                Span::raw(format!("{:<20}", entry.username)),
                Span::raw(format!("{:>8.1} ", entry.score)),
                Span::styled(arrow, Style::default().fg(color)),
            ]))
            .style(style)
        })
        .collect();

    let title = if leaderboard.is_frozen() {
        "Leaderboard · FROZEN"
    } else {
        "Leaderboard · LIVE"
    };
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Green).add_modifier(Modifier::BOLD));
    let mut lines = vec![Line::from(vec![
        Span::raw("Keys: "),
        key("w/i/s/f"),
        Span::raw(" connect | "),
        key("c"),
        Span::raw(" score | "),
        key("Enter"),
        Span::raw(" claim | "),
        key("Tab"),
        Span::raw(" ranks | "),
        key("h"),
        Span::raw(" share | "),
        Span::styled("q", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::raw(" quit"),
    ])];

    if let Some(status) = &app.status {
        let color = match status.kind {
            StatusKind::Info => Color::Green,
            StatusKind::Error => Color::Red,
        };
        lines.push(Line::from(Span::styled(status.text.clone(), Style::default().fg(color))));
    }

    let footer = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn draw_claim_modal(frame: &mut Frame, session: &Session) {
    let area = centered_rect(50, 30, frame.size());
    let rank = session.profile().map(|p| p.rank).unwrap_or_default();

    let lines = if session.claim_phase() == ClaimPhase::Submitting {
        vec![Line::from("Submitting claim...")]
    } else {
        vec![
            Line::from(format!("Claim your {} badge for rank #{}?", session.tier(), rank)),
            Line::from(""),
            Line::from("This can only be done once."),
            Line::from(""),
            Line::from("[y] confirm   [n] cancel"),
        ]
    };

    let modal = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Confirm claim"));
    frame.render_widget(Clear, area);
    frame.render_widget(modal, area);
}

fn draw_farcaster_overlay(frame: &mut Frame, step: u32, label: &str) {
    let area = centered_rect(50, 20, frame.size());
    let overlay = Paragraph::new(vec![
        Line::from(format!("Step {}/3", step)),
        Line::from(label.to_string()),
    ])
    .style(Style::default().fg(Color::Magenta))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Linking Farcaster"));
    frame.render_widget(Clear, area);
    frame.render_widget(overlay, area);
}

fn draw_share_popup(frame: &mut Frame, session: &Session) {
    let area = centered_rect(80, 60, frame.size());
    let links = ShareLinks::new(session.settings().campaign.app_url.clone());

    let mut lines = Vec::new();
    if let Some(profile) = session.profile() {
        let tier = session.tier();
        lines.push(Line::from("X:"));
        lines.push(Line::from(links.twitter_badge(profile.rank, tier)));
        lines.push(Line::from(""));
        lines.push(Line::from("Warpcast:"));
        lines.push(Line::from(links.warpcast_badge(profile.rank, tier)));
        lines.push(Line::from(""));
    }
    lines.push(Line::from("App:"));
    lines.push(Line::from(links.warpcast_app()));

    let popup = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Share [h] close"));
    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
