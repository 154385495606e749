//! Request emission.
//!
//! Turns the request log into something runnable. The shipped emitter writes
//! one `curl` invocation per action, suitable for piping into a shell.

use shoptrace_generator::{ActionStats, RequestLog};
use shoptrace_types::Action;
use std::borrow::Cow;
use std::io::Write;

/// Default API base. Left unexpanded so the endpoint is chosen when the
/// script runs.
pub const DEFAULT_BASE_PATH: &str = "${API_ENDPOINT}/";

/// Sink for generated requests.
pub trait RequestEmitter {
    /// Emit a single action.
    fn emit(&mut self, action: &Action) -> Result<(), EmitError>;

    /// Flush anything buffered.
    fn finish(&mut self) -> Result<(), EmitError> {
        Ok(())
    }
}

/// Emit a whole log in order and tally what was emitted.
pub fn emit_all<E: RequestEmitter + ?Sized>(
    emitter: &mut E,
    log: &RequestLog,
) -> Result<ActionStats, EmitError> {
    let mut stats = ActionStats::new();
    for action in log {
        emitter.emit(action)?;
        stats.record(action);
    }
    emitter.finish()?;
    Ok(stats)
}

/// Writes each action as a `curl` command line.
pub struct CurlEmitter<W: Write> {
    out: W,
    base_path: String,
}

impl<W: Write> CurlEmitter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            base_path: DEFAULT_BASE_PATH.to_string(),
        }
    }

    /// Set the prefix prepended to every action path.
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RequestEmitter for CurlEmitter<W> {
    fn emit(&mut self, action: &Action) -> Result<(), EmitError> {
        writeln!(self.out, "{}", curl_command(&self.base_path, action))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), EmitError> {
        self.out.flush()?;
        Ok(())
    }
}

/// Render one action as a shell command.
///
/// The URL is double-quoted so variables in the base path expand.
pub fn curl_command(base_path: &str, action: &Action) -> String {
    let body = action
        .body()
        .map(|body| body.to_string())
        .unwrap_or_else(|| "{}".to_string());

    let args = [
        "curl",
        "--silent",
        "--output",
        "/dev/null",
        "-H",
        "cache-control: no-cache",
        "-H",
        "content-type: application/json",
        "-X",
        action.method().as_str(),
        "-d",
        body.as_str(),
    ];

    let quoted: Vec<Cow<'_, str>> = args.iter().map(|arg| shell_quote(arg)).collect();
    format!("{} \"{}{}\"", quoted.join(" "), base_path, action.path())
}

/// Quote an argument for a POSIX shell. Arguments made only of safe
/// characters are left bare.
fn shell_quote(arg: &str) -> Cow<'_, str> {
    let safe = !arg.is_empty() && arg.chars().all(is_shell_safe);
    if safe {
        return Cow::Borrowed(arg);
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('\'');
    for c in arg.chars() {
        match c {
            '\'' => quoted.push_str("'\\''"),
            '!' => quoted.push_str("'\\!'"),
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    Cow::Owned(quoted)
}

fn is_shell_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '=' | '/' | ',' | '.' | '+')
}

/// Errors while emitting requests.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// The output sink failed.
    #[error("Failed to write request: {0}")]
    Io(#[from] std::io::Error),
}
