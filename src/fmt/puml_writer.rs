use std::io;

use log::debug;

use crate::{
    error::Result, fmt::GraphWriter, git::Commit, graph::CommitGraph, sanitize::MessageSanitizer,
};

/// Wraps a `std::io::Write` object to write a [`CommitGraph`] as a PlantUML
/// document
///
/// # Example
///
/// ```no_run
/// # use std::fs::File;
/// # use guml::{Guml, fmt::PlantUmlWriter};
/// let guml = Guml::new().unwrap();
///
/// // Create a file to hold the document, which the PlantUmlWriter will wrap
/// // (note, .unwrap() is only used to keep the example short and concise)
/// let mut file = File::create("graph.puml").unwrap();
///
/// // Create the PlantUmlWriter
/// let mut writer = PlantUmlWriter::new(&mut file);
///
/// // Use the PlantUmlWriter to write the graph
/// guml.write_graph_with(&mut writer).unwrap();
/// ```
pub struct PlantUmlWriter<'a>(&'a mut dyn io::Write, MessageSanitizer);

impl<'a> PlantUmlWriter<'a> {
    /// Creates a new instance of the `PlantUmlWriter` struct using a
    /// `std::io::Write` object.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use std::io::BufWriter;
    /// # use guml::fmt::PlantUmlWriter;
    /// // Create a PlantUmlWriter to wrap stdout
    /// let out = std::io::stdout();
    /// let mut out_buf = BufWriter::new(out.lock());
    /// let mut writer = PlantUmlWriter::new(&mut out_buf);
    /// ```
    pub fn new<T: io::Write>(writer: &'a mut T) -> PlantUmlWriter<'a> {
        PlantUmlWriter(writer, MessageSanitizer::new())
    }

    /// Writes one node declaration and the edge declarations to its parents.
    ///
    /// The id goes out verbatim; the message goes through the sanitizer.
    /// Parents are referenced by id alone, whether or not the graph holds a
    /// node for them.
    fn write_commit(&mut self, commit: &Commit) -> Result<()> {
        writeln!(
            self.0,
            "\"{}\" : \"{}\"",
            commit.id,
            self.1.sanitize(&commit.message)
        )?;

        for parent in &commit.parents {
            writeln!(self.0, "\"{}\" --> \"{}\"", commit.id, parent)?;
        }

        Ok(())
    }
}

impl<'a> GraphWriter for PlantUmlWriter<'a> {
    fn write_graph(&mut self, graph: &CommitGraph) -> Result<()> {
        debug!("Writing PlantUML document for {} commits", graph.len());
        writeln!(self.0, "@startuml")?;

        for commit in &graph.commits {
            self.write_commit(commit)?;
        }

        write!(self.0, "@enduml")?;
        self.0.flush().map_err(Into::into)
    }
}
