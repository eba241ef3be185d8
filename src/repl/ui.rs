//! REPL presentation helpers.

use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};

use crate::job::SourceMode;
use crate::session::Theme;
use crate::ui::Style;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_header(mode: SourceMode) {
    println!(
        "{} {} - Job Hunting Terminal",
        Style::header("jobshell"),
        Style::version(format!("v{VERSION}"))
    );
    println!(
        "{} {}",
        Style::label("source"),
        Style::value(mode.to_string())
    );
    println!(
        "{}",
        Style::secondary("Type 'help' for commands, 'exit' or Ctrl+C to quit.")
    );
    println!();
}

pub fn print_goodbye() {
    println!("{}", Style::success("Happy hunting! 👋"));
}

pub fn print_output(theme: Theme, text: &str) {
    if text.is_empty() {
        return;
    }
    println!("{}", Style::themed(theme, text));
}

pub fn print_success(message: &str) {
    println!("{}", Style::success(message));
}

pub fn print_info(message: &str) {
    println!("{}", Style::secondary(message));
}

pub fn print_error(message: &str) {
    eprintln!("{}", Style::error(message));
}

pub fn clear_screen() {
    print!("\x1b[2J\x1b[H");
}

const fn prompt_color(theme: Theme) -> Color {
    match theme {
        Theme::Green => Color::LightGreen,
        Theme::Blue => Color::LightBlue,
        Theme::Amber => Color::LightYellow,
        Theme::Red => Color::LightRed,
        Theme::Purple => Color::LightMagenta,
    }
}

/// Prompt styling tinted with the session theme.
pub fn render_config(theme: Theme) -> RenderConfig<'static> {
    let prompt_style = Styled::new("❯")
        .with_fg(prompt_color(theme))
        .with_attr(Attributes::BOLD);
    let mut render_config = RenderConfig::default()
        .with_prompt_prefix(prompt_style)
        .with_answered_prompt_prefix(prompt_style);

    render_config.option = StyleSheet::new().with_fg(Color::Grey);
    render_config.selected_option = Some(StyleSheet::new().with_fg(prompt_color(theme)));
    render_config
}
