mod puml_writer;

use std::{result::Result as StdResult, str::FromStr};

use strum::{Display, EnumString};

pub use self::puml_writer::PlantUmlWriter;
use crate::{error::Result, graph::CommitGraph};

/// The image formats the external renderer can be asked for, i.e. the value
/// of the `-t` flag on the PlantUML command line (Defaults to PNG)
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, EnumString, Display)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
    Eps,
    Txt,
}

impl<'de> serde::de::Deserialize<'de> for ImageFormat {
    fn deserialize<D>(deserializer: D) -> StdResult<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// A trait that allows serializing a parsed [`CommitGraph`] into an
/// arbitrary graph notation. The single required function `write_graph()`
/// receives the complete graph and is expected to emit one whole document
/// for it.
///
/// `guml` provides one implementor of this trait, `guml::fmt::PlantUmlWriter`,
/// for writing PlantUML
pub trait GraphWriter {
    /// Writes a complete graph document for the given `CommitGraph`
    fn write_graph(&mut self, graph: &CommitGraph) -> Result<()>;
}
