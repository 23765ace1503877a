use crate::config::LOG_FILE_NAME;
use crate::converter::{ConversionReport, PlannedConversion};
use crate::error::{Elixir2TxtError, UserFriendlyError};
use crate::ui::progress::format_duration;
use console::{style, Emoji};

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
static ROCKET: Emoji = Emoji("🚀 ", "> ");

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => {
                console::Term::stdout().features().colors_supported() && !quiet
            }
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn success(&self, message: &str) {
        self.emit(MessageType::Success, message);
    }

    pub fn error(&self, message: &str) {
        self.emit(MessageType::Error, message);
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(0) {
            self.emit(MessageType::Warning, message);
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            self.emit(MessageType::Info, message);
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("{}{}", ROCKET, style(operation).bold());
                    } else {
                        println!("> {}", operation);
                    }
                }
                // Stdout carries only the final document in JSON mode
                OutputMode::Json => {}
                OutputMode::Plain => println!("STARTING: {}", operation),
            }
        }
    }

    pub fn print_user_friendly_error(&self, error: &Elixir2TxtError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    eprintln!();
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

    /// Final report of a run. Always names the output directory and the log,
    /// even in quiet mode.
    pub fn print_conversion_report(&self, report: &ConversionReport) {
        match self.mode {
            OutputMode::Human => self.print_human_report(report),
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            OutputMode::Plain => self.print_plain_report(report),
        }
    }

    pub fn print_plan(&self, plan: &[PlannedConversion]) {
        match self.mode {
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(plan).unwrap_or_else(|_| "[]".to_string());
                println!("{}", json_output);
            }
            _ => {
                for planned in plan {
                    println!(
                        "  {} -> {}",
                        planned.source_path.display(),
                        planned.output_name
                    );
                }
            }
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

    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn emit(&self, msg_type: MessageType, message: &str) {
        let line = match self.mode {
            OutputMode::Json => {
                self.print_json_message(msg_type.label(), message);
                return;
            }
            OutputMode::Plain => format!("{}: {}", msg_type.label().to_uppercase(), message),
            OutputMode::Human if self.use_colors => {
                let styled = match msg_type {
                    MessageType::Success => style(message).green().bold(),
                    MessageType::Error => style(message).red().bold(),
                    MessageType::Warning => style(message).yellow().bold(),
                    MessageType::Info => style(message).cyan(),
                };
                format!("{}{}", msg_type.emoji(), styled)
            }
            OutputMode::Human => format!("{} {}", msg_type.symbol(), message),
        };

        // Errors go to stderr in every text mode
        match msg_type {
            MessageType::Error => eprintln!("{}", line),
            _ => println!("{}", line),
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Local::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn print_human_report(&self, report: &ConversionReport) {
        if !self.quiet {
            println!();
            self.print_separator();

            if self.use_colors {
                println!("{} {}", style("Conversion completed!").green().bold(), CHECKMARK);
            } else {
                println!("✓ Conversion completed!");
            }

            println!();
            println!(
                "  Files converted: {}",
                self.highlight(report.converted.len().to_string())
            );
            println!(
                "  Bytes written:   {}",
                self.highlight(format_bytes(report.total_bytes_written()))
            );
            println!(
                "  Time taken:      {}",
                self.highlight(format_duration(report.duration))
            );

            if report.has_failures() {
                println!("  Errors:          {}", report.failed.len());
                for failure in &report.failed {
                    println!("    - {}: {}", failure.source_path.display(), failure.message);
                }
            }

            self.print_separator();
        }

        println!(
            "Elixir files have been converted to text format in: {}",
            report.output_directory.display()
        );
        println!(
            "Check {} in the output directory for details",
            LOG_FILE_NAME
        );
    }

    fn print_plain_report(&self, report: &ConversionReport) {
        println!("COMPLETED: Elixir conversion");
        println!("Files converted: {}", report.converted.len());
        println!("Bytes written: {}", report.total_bytes_written());
        println!("Duration: {:?}", report.duration);
        if report.has_failures() {
            println!("Errors: {}", report.failed.len());
        }
        println!("Output directory: {}", report.output_directory.display());
        println!("Log file: {}", report.log_path.display());
    }

    fn highlight(&self, value: String) -> String {
        if self.use_colors {
            style(value).cyan().bold().to_string()
        } else {
            value
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}

impl MessageType {
    fn label(self) -> &'static str {
        match self {
            MessageType::Success => "success",
            MessageType::Error => "error",
            MessageType::Warning => "warning",
            MessageType::Info => "info",
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            MessageType::Success => "✓",
            MessageType::Error => "✗",
            MessageType::Warning => "!",
            MessageType::Info => "i",
        }
    }

    fn emoji(self) -> &'static Emoji<'static, 'static> {
        match self {
            MessageType::Success => &CHECKMARK,
            MessageType::Error => &CROSS,
            MessageType::Warning => &WARNING,
            MessageType::Info => &INFO,
        }
    }
}

pub(crate) fn format_bytes(bytes: u64) -> String {
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
