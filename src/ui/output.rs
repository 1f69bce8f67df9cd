use crate::error::{TabGrepError, UserFriendlyError};
use crate::extractor::RunSummary;
use crate::ui::progress::format_duration;
use console::{style, Emoji, Term};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static CLOCK: Emoji = Emoji("🕒 ", "");

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn success(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Success, message),
                OutputMode::Json => self.print_json_message("success", message),
                OutputMode::Plain => println!("SUCCESS: {}", message),
            }
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Json => self.print_json_message("warning", message),
                OutputMode::Plain => println!("WARNING: {}", message),
            }
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(2) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => println!("DEBUG: {}", message),
            }
        }
    }

    /// Timestamped phase marker, e.g. `10:42:07 Find matches`.
    pub fn phase(&self, message: &str) {
        if self.should_show_message(0) {
            self.print_phase(message);
        }
    }

    /// Percentage line for plain output, where no progress bar is drawn.
    pub fn progress(&self, percentage: u64) {
        if self.mode == OutputMode::Plain && self.should_show_message(0) {
            println!("Progress {} percent.", percentage);
        }
    }

    /// Whether `debug` output would be shown at all.
    pub fn debug_enabled(&self) -> bool {
        self.should_show_message(2)
    }

    /// Final marker; shown even in quiet mode.
    pub fn completed(&self) {
        self.print_phase("Completed");
    }

    pub fn print_title(&self, title: &str) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}", style(format!("======= {} ========", title)).bold().cyan());
                } else {
                    println!("======= {} ========", title);
                }
            }
            OutputMode::Plain => println!("======= {} ========", title),
            OutputMode::Json => {}
        }
    }

    pub fn print_separator(&self) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}", style("─".repeat(60)).dim());
                } else {
                    println!("{}", "-".repeat(60));
                }
            }
            OutputMode::Plain => {
                println!("{}", "-".repeat(60));
            }
            OutputMode::Json => {}
        }
    }

    pub fn print_user_friendly_error(&self, error: &TabGrepError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => {
                    eprintln!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    pub fn print_run_summary(&self, summary: &RunSummary) {
        match self.mode {
            OutputMode::Human => {
                if self.quiet {
                    return;
                }
                self.print_human_summary(summary);
            }
            OutputMode::Json => {
                let json_output = serde_json::to_string_pretty(summary)
                    .unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            OutputMode::Plain => {
                if self.quiet {
                    return;
                }
                self.print_plain_summary(summary);
            }
        }
    }

    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_phase(&self, message: &str) {
        let now = current_time();
        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}{} {}", CLOCK, style(now).dim(), message);
                } else {
                    println!("{} {}", now, message);
                }
            }
            OutputMode::Json => self.print_json_object(&serde_json::json!({
                "type": "phase",
                "time": now,
                "message": message
            })),
            OutputMode::Plain => println!("{} {}", now, message),
        }
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        #[allow(clippy::type_complexity)]
        let (emoji, color_fn): (&Emoji, Box<dyn Fn(&str) -> console::StyledObject<&str>>) =
            match msg_type {
                MessageType::Success => (&CHECKMARK, Box::new(|msg| style(msg).green().bold())),
                MessageType::Error => (&CROSS, Box::new(|msg| style(msg).red().bold())),
                MessageType::Warning => (&WARNING, Box::new(|msg| style(msg).yellow().bold())),
                MessageType::Info => (&INFO, Box::new(|msg| style(msg).cyan())),
            };

        if self.use_colors {
            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, color_fn(message)),
                _ => println!("{}{}", emoji, color_fn(message)),
            }
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
                MessageType::Warning => "!",
                MessageType::Info => "i",
            };

            match msg_type {
                MessageType::Error => eprintln!("{} {}", prefix, message),
                _ => println!("{} {}", prefix, message),
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        let object = serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Local::now().to_rfc3339()
        });
        if level == "error" {
            eprintln!(
                "{}",
                serde_json::to_string(&object).unwrap_or_else(|_| "{}".to_string())
            );
        } else {
            self.print_json_object(&object);
        }
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn print_human_summary(&self, summary: &RunSummary) {
        self.print_separator();

        let highlight = |value: String| {
            if self.use_colors {
                style(value).cyan().bold().to_string()
            } else {
                value
            }
        };

        println!("  Files scanned:  {}", highlight(summary.files_selected.to_string()));
        println!("  Bytes scanned:  {}", highlight(format_bytes(summary.bytes_scanned)));
        println!("  Rows written:   {}", highlight(summary.matches.to_string()));
        println!(
            "  Report:         {}",
            highlight(summary.output_path.display().to_string())
        );
        println!("  Time taken:     {}", highlight(format_duration(summary.duration)));

        self.print_separator();
    }

    fn print_plain_summary(&self, summary: &RunSummary) {
        println!("Files: {}", summary.files_selected);
        println!("Bytes scanned: {}", summary.bytes_scanned);
        println!("Rows: {}", summary.matches);
        println!("Report: {}", summary.output_path.display());
        println!("Duration: {:?}", summary.duration);
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}

/// Wall-clock time of day used in phase markers.
pub fn current_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_mode() {
        let formatter = OutputFormatter::new(OutputMode::Human, 2, true);
        assert_eq!(formatter.verbose_level, 0);
        assert!(formatter.quiet);
        assert!(!formatter.use_colors);
    }

    #[test]
    fn test_non_human_modes_never_use_colors() {
        assert!(!OutputFormatter::new(OutputMode::Plain, 0, false).use_colors);
        assert!(!OutputFormatter::new(OutputMode::Json, 0, false).use_colors);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1048576), "1.0 MB");
        assert_eq!(format_bytes(1073741824), "1.0 GB");
    }

    #[test]
    fn test_current_time_format() {
        let now = current_time();
        assert_eq!(now.len(), 8);
        assert_eq!(now.as_bytes()[2], b':');
        assert_eq!(now.as_bytes()[5], b':');
    }

    #[test]
    fn test_should_show_message() {
        let formatter = OutputFormatter::new(OutputMode::Human, 1, false);
        assert!(formatter.should_show_message(0));
        assert!(formatter.should_show_message(1));
        assert!(!formatter.should_show_message(2));

        let quiet_formatter = OutputFormatter::new(OutputMode::Human, 2, true);
        assert!(!quiet_formatter.should_show_message(0));
    }

    #[test]
    fn test_debug_enabled_needs_two_levels() {
        assert!(!OutputFormatter::new(OutputMode::Plain, 1, false).debug_enabled());
        assert!(OutputFormatter::new(OutputMode::Plain, 2, false).debug_enabled());
        assert!(!OutputFormatter::new(OutputMode::Plain, 0, true).debug_enabled());
    }
}
