use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::time::Duration;

use crate::format::DisplayBlock;

/// Terminal rendering of formatted blocks.
pub fn render_blocks(blocks: &[DisplayBlock]) -> String {
    blocks
        .iter()
        .map(|b| match b {
            DisplayBlock::Heading { text } => text.bold().underline().to_string(),
            DisplayBlock::Paragraph { lines, emphasized: true } => lines
                .iter()
                .map(|l| l.bold().to_string())
                .collect::<Vec<_>>()
                .join("\n"),
            DisplayBlock::Paragraph { lines, emphasized: false } => lines.join("\n"),
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn print_description(blocks: &[DisplayBlock]) {
    println!("\n{}\n", "=== PRODUCT DESCRIPTION ===".green().bold());
    if blocks.is_empty() {
        println!("(the model returned no content)");
    } else {
        println!("{}", render_blocks(blocks));
    }
    println!();
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "error:".red().bold(), message);
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Ask for a value on stdin until a non-blank answer is given.
///
/// The question goes to stderr so stdout carries only the description.
///
/// Returns an empty string on EOF so validation reports the missing field.
pub fn ask(prompt: &str) -> String {
    let stdin = io::stdin();
    ask_from(&mut stdin.lock(), prompt)
}

fn ask_from(input: &mut impl BufRead, prompt: &str) -> String {
    loop {
        eprint!("{} ", format!("{prompt}:").bold());
        let _ = io::stderr().flush();
        let mut s = String::new();
        match input.read_line(&mut s) {
            Ok(0) | Err(_) => return String::new(),
            Ok(_) => {
                let answer = s.trim();
                if !answer.is_empty() {
                    return answer.to_string();
                }
            }
        }
    }
}
