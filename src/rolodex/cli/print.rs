use colored::Colorize;
use rolodex::api::{CmdMessage, MessageLevel};
use rolodex::model::Record;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ID_WIDTH: usize = 8;
const NAME_WIDTH: usize = 28;
const EMAIL_WIDTH: usize = 32;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_records(records: &[Record]) {
    if records.is_empty() {
        println!("No contacts found.");
        return;
    }

    for record in records {
        let id = record
            .id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_default();
        let email = record.get("email").unwrap_or("");
        let phone = record.get("phone").unwrap_or("");

        println!(
            "{}  {}  {}  {}",
            fit(&id, ID_WIDTH).yellow(),
            fit(&record.display_name(), NAME_WIDTH).bold(),
            fit(email, EMAIL_WIDTH),
            phone.dimmed()
        );
    }
}

pub(super) fn print_full_record(record: &Record) {
    let id = record
        .id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "(unsaved)".to_string());
    println!("{} {}", id.yellow(), record.display_name().bold());
    println!("--------------------------------");

    let label_width = record
        .fields
        .keys()
        .map(|k| k.width())
        .max()
        .unwrap_or(0);
    for (name, value) in &record.fields {
        let value = match value {
            Some(v) => v.normal(),
            None => "-".dimmed(),
        };
        println!("{}  {}", fit(name, label_width).dimmed(), value);
    }
}

/// Truncates or pads `text` to exactly `width` terminal columns.
fn fit(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width <= width {
        return format!("{}{}", text, " ".repeat(width - text_width));
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}
