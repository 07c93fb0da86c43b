use std::fs;
use std::io::{self, BufRead as _, Write as _};
use std::path::PathBuf;

/// Per-file installation outcome for summary reporting.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub status: FileStatus,
    pub message: Option<String>,
}

/// Outcome of installing a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Linked,
    Copied,
    Appended,
    UpToDate,
    Skipped,
}

/// Structured logger with per-file summary collection.
///
/// All messages are always written to a persistent log file at
/// `$XDG_CACHE_HOME/dotfiles/install.log` (default `~/.cache/dotfiles/install.log`)
/// with timestamps and ANSI codes stripped, regardless of the verbose flag.
pub struct Logger {
    verbose: bool,
    files: std::cell::RefCell<Vec<FileEntry>>,
    log_file: Option<PathBuf>,
}

/// Return the log file path under `$XDG_CACHE_HOME/dotfiles/` (or `~/.cache/dotfiles/`).
fn log_file_path() -> Option<PathBuf> {
    let cache_dir = std::env::var("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".cache")
        });
    let dir = cache_dir.join("dotfiles");
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join("install.log"))
}

/// Strip ANSI escape sequences from a string.
fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip until 'm' (end of SGR sequence)
            for inner in chars.by_ref() {
                if inner == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Whether a raw line read from stdin is the literal affirmative answer.
///
/// Only `y` proceeds; anything else (including empty input, `Y`, or `yes`)
/// declines. The line terminator is stripped but inner whitespace is not.
fn is_affirmative(input: &str) -> bool {
    input.trim_end_matches(['\r', '\n']) == "y"
}

impl Logger {
    #[must_use]
    pub fn new(verbose: bool) -> Self {
        let log_file = log_file_path();

        // Write header to log file
        if let Some(ref path) = log_file {
            let version = option_env!("DOTFILES_VERSION")
                .unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
            let header = format!(
                "==========================================\n\
                 Dotfiles installer {version} {}\n\
                 ==========================================\n",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            );
            // Truncate and write header (new run = fresh log)
            let _ = fs::write(path, header);
        }

        Self {
            verbose,
            files: std::cell::RefCell::new(Vec::new()),
            log_file,
        }
    }

    /// Append a line to the persistent log file.
    fn write_to_file(&self, level: &str, msg: &str) {
        if let Some(ref path) = self.log_file
            && let Ok(mut f) = fs::OpenOptions::new().append(true).open(path)
        {
            let ts = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
            let clean = strip_ansi(msg);
            let _ = writeln!(f, "{ts} {level} {clean}");
        }
    }

    /// Return the log file path, if available.
    #[cfg(test)]
    pub fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    pub fn error(&self, msg: &str) {
        eprintln!("\x1b[31mERROR\x1b[0m {msg}");
        self.write_to_file("ERR", msg);
    }

    pub fn warn(&self, msg: &str) {
        eprintln!("\x1b[33mWARN\x1b[0m  {msg}");
        self.write_to_file("WRN", msg);
    }

    pub fn stage(&self, msg: &str) {
        println!("\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m");
        self.write_to_file("STG", msg);
    }

    pub fn info(&self, msg: &str) {
        println!("  {msg}");
        self.write_to_file("INF", msg);
    }

    pub fn debug(&self, msg: &str) {
        if self.verbose {
            println!("  \x1b[2m{msg}\x1b[0m");
        }
        // Always log debug to file, even when not verbose on terminal
        self.write_to_file("DBG", msg);
    }

    /// Print `prompt` and block on one line of stdin. Returns `true` only for
    /// the literal answer `y`.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin or stdout cannot be used.
    pub fn confirm(&self, prompt: &str) -> io::Result<bool> {
        print!("{prompt}");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        Ok(is_affirmative(&input))
    }

    /// Record a per-file result for the summary.
    pub fn record_file(&self, name: &str, status: FileStatus, message: Option<&str>) {
        self.files.borrow_mut().push(FileEntry {
            name: name.to_string(),
            status,
            message: message.map(String::from),
        });
    }

    /// Print the summary of all recorded files.
    pub fn print_summary(&self) {
        let files = self.files.borrow();
        if files.is_empty() {
            return;
        }

        println!();
        self.stage("Summary");

        let mut changed = 0u32;
        let mut up_to_date = 0u32;
        let mut skipped = 0u32;

        for file in files.iter() {
            let (icon, color, label) = match file.status {
                FileStatus::Linked => {
                    changed += 1;
                    ("✓", "\x1b[32m", "linked")
                }
                FileStatus::Copied => {
                    changed += 1;
                    ("✓", "\x1b[32m", "copied")
                }
                FileStatus::Appended => {
                    changed += 1;
                    ("✓", "\x1b[32m", "appended")
                }
                FileStatus::UpToDate => {
                    up_to_date += 1;
                    ("·", "\x1b[2m", "up to date")
                }
                FileStatus::Skipped => {
                    skipped += 1;
                    ("○", "\x1b[33m", "skipped")
                }
            };

            let suffix = file.message.as_deref().unwrap_or(label);
            let line = format!("{icon} {} ({suffix})", file.name);
            println!("  {color}{line}\x1b[0m");
            self.write_to_file("INF", &line);
        }

        println!();
        let total = changed + up_to_date + skipped;
        let totals =
            format!("{total} files: {changed} changed, {up_to_date} up to date, {skipped} skipped");
        println!(
            "  {total} files: \x1b[32m{changed} changed\x1b[0m, {up_to_date} up to date, \x1b[33m{skipped} skipped\x1b[0m"
        );
        self.write_to_file("INF", &totals);

        if let Some(path) = &self.log_file {
            println!("  \x1b[2mlog: {}\x1b[0m", path.display());
            self.write_to_file("INF", &format!("log: {}", path.display()));
        }
    }
}
