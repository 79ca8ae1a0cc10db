use crate::error::{Error, Result};

/// The struct representation of a `Commit`
#[derive(Debug, Clone)]
pub struct Commit {
    /// The 40 char hash
    pub id: String,
    /// The hashes of the parent commits, in log order (empty for a root
    /// commit). A parent may lie outside the extracted window and thus have
    /// no record of its own.
    pub parents: Vec<String>,
    /// The commit subject, verbatim
    pub message: String,
}

/// A convienience type for multiple commits
pub type Commits = Vec<Commit>;

/// Parses the complete output of `git log` (one `id|parents|message` line
/// per commit) into commit records, preserving the input order.
///
/// Empty lines are skipped. Any non-empty line with fewer than two `|`
/// delimiters aborts the whole parse with [`Error::MalformedLine`]; nothing
/// is guessed about where its fields might have been.
pub fn parse_log(log: &str) -> Result<Commits> {
    log.lines()
        .filter(|line| !line.is_empty())
        .map(parse_line)
        .collect()
}

// Splits a line on its first two `|` only; the message field keeps any
// further delimiter characters verbatim.
fn parse_line(line: &str) -> Result<Commit> {
    let mut fields = line.splitn(3, '|');
    match (fields.next(), fields.next(), fields.next()) {
        (Some(id), Some(parents), Some(message)) => Ok(Commit {
            id: id.to_owned(),
            parents: parents.split_whitespace().map(str::to_owned).collect(),
            message: message.to_owned(),
        }),
        _ => Err(Error::MalformedLine(line.to_owned())),
    }
}
