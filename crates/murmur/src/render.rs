// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat bubble formatting shared by the REPL and `murmur history`.

use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use murmur_core::{Role, Turn};

/// Display name for the author of a message.
pub fn speaker(role: Role) -> &'static str {
    match role {
        Role::User => "You",
        Role::Assistant => "Assistant",
        Role::System => "System",
    }
}

/// `[HH:MM] Speaker: text`, with continuation lines indented under the text.
pub fn bubble(role: Role, text: &str, at: DateTime<Local>) -> String {
    let header = format!("[{}] {}: ", at.format("%H:%M"), speaker(role));
    let indent = " ".repeat(header.chars().count());
    let mut out = header;
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            out.push('\n');
            out.push_str(&indent);
        }
        out.push_str(line);
    }
    out
}

/// Prints a message bubble to stdout.
pub fn print_message(role: Role, text: &str, at: DateTime<Local>) {
    let line = bubble(role, text, at);
    let styled = match role {
        Role::User => line.blue(),
        Role::Assistant => line.normal(),
        Role::System => line.dimmed(),
    };
    println!("{styled}\n");
}

/// Prints a stored turn, converting its timestamp to local time.
pub fn print_turn(turn: &Turn) {
    print_message(turn.role, &turn.content, to_local(turn.created_at));
}

/// Prints an error bubble. Errors are shown as assistant messages.
pub fn print_error(text: &str) {
    println!("{}\n", bubble(Role::Assistant, text, Local::now()).red());
}

pub fn to_local(at: DateTime<Utc>) -> DateTime<Local> {
    at.with_timezone(&Local)
}
