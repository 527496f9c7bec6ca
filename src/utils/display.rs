use colored::*;

// Command output goes to stdout; status lines go to stderr so the JSON stays pipeable.

pub fn print_header(text: &str) {
    eprintln!("\n{}", text.bright_cyan().bold());
    eprintln!("{}", "=".repeat(text.len()).bright_cyan());
}

pub fn print_success(text: &str) {
    eprintln!("{}", text.green());
}

pub fn print_error(text: &str) {
    eprintln!("{}", text.red().bold());
}

pub fn print_info(text: &str) {
    eprintln!("{}", text.blue());
}

pub fn print_hint(text: &str) {
    eprintln!("{}", text.yellow());
}
