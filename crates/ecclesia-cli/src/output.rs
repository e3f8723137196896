//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use ecclesia_core::badge::{Badge, BadgeTone, Categorical};
use ecclesia_core::cell::model::Cell;
use ecclesia_core::cell::{cell_name, leader_name, member_preview, members_of};
use ecclesia_core::dashboard::DashboardStats;
use ecclesia_core::event::model::Event;
use ecclesia_core::finance::model::Finance;
use ecclesia_core::finance::FinanceSummary;
use ecclesia_core::member::model::Member;
use ecclesia_core::member::{member_name, MemberLookup};
use unicode_width::UnicodeWidthStr;

const ID_WIDTH: usize = 8;
const DASH: &str = "-";

/// Print the dashboard figures.
pub fn print_dashboard(stats: &DashboardStats) {
    println!("{}", "Dashboard".cyan().bold());
    println!();
    println!("  {:<18} {}", "Total members".bold(), stats.total_members);
    println!("  {:<18} {}", "Active members".bold(), stats.active_members.to_string().green());
    println!("  {:<18} {}", "Total revenue".bold(), stats.total_revenue.to_string().yellow());
    println!("  {:<18} {}", "Upcoming events".bold(), stats.upcoming_events);
}

/// Print members as a table.
pub fn print_members_table(members: &[&Member], cells: &[Cell]) {
    if members.is_empty() {
        println!("{}", "No members found.".dimmed());
        return;
    }

    let name_w = flexible_width(ID_WIDTH + 12 + 24 + 16 + 18, 16, 36);
    println!(
        "{} {} {} {} {} {}",
        pad_right("ID", ID_WIDTH),
        pad_right("Name", name_w),
        pad_right("Status", 12),
        pad_right("Email", 24),
        pad_right("Phone", 16),
        "Cell"
    );
    println!("{}", "─".repeat((ID_WIDTH + name_w + 12 + 24 + 16 + 18).min(term_width())));

    for member in members {
        println!(
            "{} {} {} {} {} {}",
            short_id(&member.id).dimmed(),
            pad_right(&truncate_visual(&member.name, name_w), name_w),
            badge_cell(&member.status.badge(), 12),
            pad_right(&truncate_visual(or_dash(&member.email), 24), 24),
            pad_right(&truncate_visual(or_dash(&member.phone), 16), 16),
            cell_name(cells, member.cell_id.as_deref()).unwrap_or(DASH)
        );
    }
}

/// Print cells as cards: name, leader, schedule and a short list of active
/// members.
pub fn print_cells(cells: &[&Cell], members: &MemberLookup) {
    if cells.is_empty() {
        println!("{}", "No cells found.".dimmed());
        return;
    }

    for cell in cells {
        let of = members_of(cell, &members.active);

        println!("{} {}", cell.name.cyan().bold(), format!("({})", short_id(&cell.id)).dimmed());
        println!("  {}: {}", "Leader".bold(), leader_name(cell, &members.all));
        println!(
            "  {}: {}",
            "Meets".bold(),
            cell.schedule().unwrap_or_else(|| DASH.to_string())
        );
        if let Some(address) = &cell.meeting_address {
            println!("  {}: {}", "Address".bold(), address);
        }
        match member_preview(&of) {
            Some(preview) => println!("  {} ({}): {}", "Members".bold(), of.len(), preview),
            None => println!("  {}: {}", "Members".bold(), "none".dimmed()),
        }
        println!();
    }
}

/// Print finance entries with the count and total of what is shown.
pub fn print_finances_table(finances: &[&Finance], members: &[Member]) {
    if finances.is_empty() {
        println!("{}", "No finance entries found.".dimmed());
        return;
    }

    let desc_w = flexible_width(ID_WIDTH + 12 + 11 + 12 + 22, 12, 40);
    println!(
        "{} {} {} {} {} {}",
        pad_right("ID", ID_WIDTH),
        pad_right("Date", 10),
        pad_right("Type", 10),
        pad_left("Amount", 12),
        pad_right("Contributor", 22),
        "Description"
    );
    println!("{}", "─".repeat((ID_WIDTH + 10 + 10 + 12 + 22 + desc_w + 5).min(term_width())));

    for finance in finances {
        let contributor = member_name(members, finance.member_id.as_deref(), "Anonymous");
        println!(
            "{} {} {} {} {} {}",
            short_id(&finance.id).dimmed(),
            pad_right(&finance.date, 10),
            badge_cell(&finance.kind.badge(), 10),
            pad_left(&finance.amount.to_string(), 12).yellow(),
            pad_right(&truncate_visual(contributor, 22), 22),
            truncate_visual(or_dash(&finance.description), desc_w)
        );
    }

    let summary = FinanceSummary::of(finances);
    println!();
    println!(
        "{} entries, total {}",
        summary.count,
        summary.total.to_string().yellow().bold()
    );
}

/// Print events as a table.
pub fn print_events_table(events: &[&Event]) {
    if events.is_empty() {
        println!("{}", "No events found.".dimmed());
        return;
    }

    let name_w = flexible_width(ID_WIDTH + 17 + 12 + 20 + 10, 16, 36);
    println!(
        "{} {} {} {} {} {}",
        pad_right("ID", ID_WIDTH),
        pad_right("Name", name_w),
        pad_right("When", 16),
        pad_right("Status", 11),
        pad_right("Location", 20),
        "Attendance"
    );
    println!("{}", "─".repeat((ID_WIDTH + name_w + 16 + 11 + 20 + 15).min(term_width())));

    for event in events {
        let when = match &event.time {
            Some(time) => format!("{} {}", event.date, time),
            None => event.date.clone(),
        };
        println!(
            "{} {} {} {} {} {}",
            short_id(&event.id).dimmed(),
            pad_right(&truncate_visual(&event.name, name_w), name_w),
            pad_right(&when, 16),
            badge_cell(&event.status.badge(), 11),
            pad_right(&truncate_visual(or_dash(&event.location), 20), 20),
            event.attendance()
        );
    }
}

/// Badge label colored by tone, padded to `width`.
fn badge_cell(badge: &Badge, width: usize) -> ColoredString {
    let text = pad_right(&badge.label, width);
    match badge.tone {
        BadgeTone::Green => text.green(),
        BadgeTone::Gray => text.dimmed(),
        BadgeTone::Blue => text.blue(),
        BadgeTone::Orange => text.yellow(),
        BadgeTone::Red => text.red(),
        BadgeTone::Neutral => text.normal(),
    }
}

fn short_id(id: &str) -> String {
    pad_right(&id.chars().take(ID_WIDTH).collect::<String>(), ID_WIDTH)
}

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(DASH)
}

/// Width left for one flexible column after `fixed` columns, clamped.
fn flexible_width(fixed: usize, min: usize, max: usize) -> usize {
    term_width().saturating_sub(fixed).clamp(min, max)
}

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

fn pad_left(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", " ".repeat(width - visual), s)
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}
