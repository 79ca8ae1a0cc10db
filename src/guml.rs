use std::{
    env,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
    process::Command,
};

use log::{debug, info};

use crate::{
    config::RawCfg,
    error::{Error, Result},
    fmt::{GraphWriter, ImageFormat, PlantUmlWriter},
    git::{self, Commits},
    graph::CommitGraph,
    DEFAULT_OUTFILE, GUML_CONFIG_FILE,
};

/// The base struct used to set options and interact with the library.
#[derive(Debug, Clone)]
pub struct Guml {
    /// The repository whose history is extracted (handed to `git -C`,
    /// defaults to the current directory)
    pub repository: PathBuf,
    /// The exclusive upper bound on commit time, handed to `git log
    /// --before` verbatim, so any date expression git accepts works
    /// (`"2023-12-31"`, `"2 weeks ago"`, ...). An empty string disables the
    /// cutoff.
    pub before_date: String,
    /// The PlantUML jar used to render the generated document
    pub renderer_jar: PathBuf,
    /// The file the graph document is written to (Defaults to `graph.puml`)
    pub outfile: PathBuf,
    /// The image format the renderer is asked for (Defaults to PNG)
    pub image_format: ImageFormat,
    /// The format of the commit output from `git log` (Defaults to:
    /// "%H|%P|%s"). An override must keep the `id|parents|message` field
    /// layout the parser expects.
    pub format: String,
}

impl Default for Guml {
    fn default() -> Self {
        debug!("Creating default guml with Guml::default()");
        Guml {
            repository: PathBuf::from("."),
            before_date: String::new(),
            renderer_jar: PathBuf::new(),
            outfile: PathBuf::from(DEFAULT_OUTFILE),
            image_format: ImageFormat::default(),
            format: "%H|%P|%s".to_string(),
        }
    }
}

impl Guml {
    /// Creates a `Guml` struct from the default `.guml.toml` configuration
    /// file in the current directory.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use guml::Guml;
    /// let guml = Guml::new().unwrap();
    /// ```
    pub fn new() -> Result<Self> {
        debug!("Creating guml with new()");
        debug!("Trying default config file");
        Guml::from_file(GUML_CONFIG_FILE)
    }

    /// Creates a `Guml` struct from a custom named TOML configuration file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use guml::Guml;
    /// let guml = Guml::from_file("/myproject/guml_conf.toml").unwrap();
    /// ```
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        debug!("Creating guml with \n\tfile: {:?}", file.as_ref());
        // Determine if the cfg_file was relative or not
        let cfg_file = if file.as_ref().is_relative() {
            debug!("file is relative");
            let cwd = match env::current_dir() {
                Ok(d) => d,
                Err(..) => return Err(Error::CurrentDir),
            };
            cwd.join(file.as_ref())
        } else {
            debug!("file is absolute");
            file.as_ref().to_path_buf()
        };

        Guml::default().try_config_file(&cfg_file)
    }

    /// Creates a `Guml` struct for a specific repository, without reading
    /// any configuration file. Everything else keeps its default.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use guml::Guml;
    /// let guml = Guml::with_repo("/myproject").before_date("2023-12-31");
    /// ```
    pub fn with_repo<P: AsRef<Path>>(repo: P) -> Self {
        debug!("Creating guml with \n\trepo: {:?}", repo.as_ref());
        Guml {
            repository: repo.as_ref().to_path_buf(),
            ..Guml::default()
        }
    }

    // Try and fill in the options from a config file
    fn try_config_file(mut self, cfg_file: &Path) -> Result<Self> {
        debug!("Trying to use config file: {:?}", cfg_file);
        let mut toml_f = File::open(cfg_file)?;
        let mut toml_s = String::with_capacity(100);

        toml_f.read_to_string(&mut toml_s)?;

        toml_s.shrink_to_fit();

        let raw: RawCfg = toml::from_str(&toml_s).map_err(|e| Error::ConfigParse {
            path: cfg_file.to_path_buf(),
            source: e,
        })?;

        self.repository = raw.guml.repository;
        self.before_date = raw.guml.before_date;
        self.renderer_jar = raw.guml.renderer_jar;
        if let Some(outfile) = raw.guml.outfile {
            self.outfile = PathBuf::from(outfile);
        }
        self.image_format = raw.guml.image_format;

        debug!("Returning guml:\n{:?}", self);
        Ok(self)
    }

    /// Sets the repository whose history is extracted
    ///
    /// **NOTE:** Anything set here will override anything in a configuration
    /// TOML file
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use guml::Guml;
    /// let guml = Guml::new().unwrap().repository("/myproject");
    /// ```
    pub fn repository<P: AsRef<Path>>(mut self, r: P) -> Guml {
        self.repository = r.as_ref().to_path_buf();
        self
    }

    /// Sets the cutoff date, i.e. the exclusive upper bound on commit time
    ///
    /// **NOTE:** Anything set here will override anything in a configuration
    /// TOML file
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use guml::Guml;
    /// let guml = Guml::new().unwrap().before_date("2023-12-31");
    /// ```
    pub fn before_date<S: Into<String>>(mut self, d: S) -> Guml {
        self.before_date = d.into();
        self
    }

    /// Sets the path of the PlantUML jar used for rendering
    ///
    /// **NOTE:** Anything set here will override anything in a configuration
    /// TOML file
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use guml::Guml;
    /// let guml = Guml::new().unwrap().renderer_jar("/opt/plantuml/plantuml.jar");
    /// ```
    pub fn renderer_jar<P: AsRef<Path>>(mut self, j: P) -> Guml {
        self.renderer_jar = j.as_ref().to_path_buf();
        self
    }

    /// Sets the file the graph document is written to (Defaults to
    /// `graph.puml`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use guml::Guml;
    /// let guml = Guml::new().unwrap().outfile("/myproject/history.puml");
    /// ```
    pub fn outfile<P: AsRef<Path>>(mut self, o: P) -> Guml {
        self.outfile = o.as_ref().to_path_buf();
        self
    }

    /// Sets the image format the renderer is asked for (Defaults to PNG)
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use guml::{fmt::ImageFormat, Guml};
    /// let guml = Guml::new().unwrap().image_format(ImageFormat::Svg);
    /// ```
    pub fn image_format(mut self, f: ImageFormat) -> Guml {
        self.image_format = f;
        self
    }

    /// Sets the format for `git log` output. The `id|parents|message`
    /// layout must survive an override; short hashes via `"%h|%p|%s"` are
    /// fine, dropping a field is not.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use guml::Guml;
    /// let guml = Guml::new().unwrap().format("%h|%p|%s");
    /// ```
    pub fn format<S: Into<String>>(mut self, f: S) -> Guml {
        self.format = f.into();
        self
    }

    /// Retrieves a `Vec<Commit>` of the commits before the cutoff date, in
    /// the order `git log` reports them (newest first).
    ///
    /// Finding none is not an error; the returned vector is simply empty.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use guml::Guml;
    /// let guml = Guml::new().unwrap();
    /// let commits = guml.get_commits();
    /// ```
    pub fn get_commits(&self) -> Result<Commits> {
        if !self.repository.exists() {
            return Err(Error::RepoNotFound(self.repository.clone()));
        }

        let mut cmd = Command::new("git");
        cmd.arg("-C")
            .arg(&self.repository)
            .arg("log")
            .arg(format!("--pretty=format:{}", self.format));
        if !self.before_date.is_empty() {
            cmd.arg(format!("--before={}", self.before_date));
        }

        debug!("Running {:?}", cmd);
        let output = cmd.output()?;
        if !output.status.success() {
            return Err(Error::GitLog(
                String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            ));
        }

        let commits = git::parse_log(&String::from_utf8_lossy(&output.stdout))?;
        debug!("Parsed {} commits", commits.len());
        Ok(commits)
    }

    /// Writes the graph document to the configured `outfile` using whatever
    /// options have been specified thus far.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use guml::Guml;
    /// let guml = Guml::new().unwrap();
    /// guml.write_graph().unwrap();
    /// ```
    pub fn write_graph(&self) -> Result<()> {
        debug!("Writing graph with preset options");
        self.write_graph_to(&self.outfile)
    }

    /// Writes the graph document to a specified file, creating it if it
    /// doesn't exist and replacing it if it does.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use guml::Guml;
    /// let guml = Guml::new().unwrap();
    ///
    /// guml.write_graph_to("/myproject/history.puml").unwrap();
    /// ```
    pub fn write_graph_to<P: AsRef<Path>>(&self, out: P) -> Result<()> {
        debug!("Writing graph to file: {:?}", out.as_ref());
        let mut file = File::create(out.as_ref())?;
        let mut writer = PlantUmlWriter::new(&mut file);
        self.write_graph_with(&mut writer)
    }

    /// Writes a graph with a specified `GraphWriter`
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use guml::{Guml, fmt::{GraphWriter, PlantUmlWriter}};
    /// # use std::io;
    /// let guml = Guml::new().unwrap();
    ///
    /// // Write the graph document to stdout
    /// let out = io::stdout();
    /// let mut out_buf = io::BufWriter::new(out.lock());
    /// let mut writer = PlantUmlWriter::new(&mut out_buf);
    ///
    /// guml.write_graph_with(&mut writer).unwrap();
    /// ```
    pub fn write_graph_with<W>(&self, writer: &mut W) -> Result<()>
    where
        W: GraphWriter,
    {
        debug!("Writing graph from writer");
        let graph = CommitGraph::from_commits(self.get_commits()?);

        writer.write_graph(&graph)
    }

    /// Renders the generated document with the configured PlantUML jar,
    /// leaving the image next to the document file.
    ///
    /// The jar path is checked before anything is launched; a missing jar
    /// fails with [`Error::RendererNotFound`] without side effects.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use guml::Guml;
    /// let guml = Guml::new().unwrap();
    /// guml.render_image().unwrap();
    /// ```
    pub fn render_image(&self) -> Result<()> {
        if !self.renderer_jar.exists() {
            return Err(Error::RendererNotFound(self.renderer_jar.clone()));
        }

        let mut cmd = Command::new("java");
        cmd.arg("-jar")
            .arg(&self.renderer_jar)
            .arg(format!("-t{}", self.image_format))
            .arg(&self.outfile);

        debug!("Running {:?}", cmd);
        let status = cmd.status()?;
        if !status.success() {
            return Err(Error::Renderer(status));
        }

        Ok(())
    }

    /// Runs the whole pipeline: extracts the history, writes the graph
    /// document to `outfile` and renders it.
    ///
    /// Finding no commits before the cutoff is not an error: the run stops
    /// there, reports it, and writes nothing.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use guml::Guml;
    /// let guml = Guml::new().unwrap();
    /// guml.run().unwrap();
    /// ```
    pub fn run(&self) -> Result<()> {
        info!(
            "Extracting commits of {} before {}",
            self.repository.display(),
            self.before_date
        );
        let commits = self.get_commits()?;
        if commits.is_empty() {
            info!("No commits found before {}", self.before_date);
            return Ok(());
        }

        let graph = CommitGraph::from_commits(commits);
        debug!(
            "Graph has {} nodes, {} edges, {} dangling parents",
            graph.len(),
            graph.edge_count(),
            graph.dangling_parents().len()
        );

        info!("Writing graph document to {}", self.outfile.display());
        let mut file = File::create(&self.outfile)?;
        let mut writer = PlantUmlWriter::new(&mut file);
        writer.write_graph(&graph)?;

        info!("Rendering with {}", self.renderer_jar.display());
        self.render_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let guml = Guml::default();

        assert_eq!(guml.repository, PathBuf::from("."));
        assert_eq!(guml.before_date, "");
        assert_eq!(guml.outfile, PathBuf::from("graph.puml"));
        assert_eq!(guml.image_format, ImageFormat::Png);
        assert_eq!(guml.format, "%H|%P|%s");
    }

    #[test]
    fn builder_methods_override_defaults() {
        let guml = Guml::with_repo("/some/repo")
            .before_date("2023-12-31")
            .renderer_jar("/opt/plantuml.jar")
            .outfile("out.puml")
            .image_format(ImageFormat::Svg)
            .format("%h|%p|%s");

        assert_eq!(guml.repository, PathBuf::from("/some/repo"));
        assert_eq!(guml.before_date, "2023-12-31");
        assert_eq!(guml.renderer_jar, PathBuf::from("/opt/plantuml.jar"));
        assert_eq!(guml.outfile, PathBuf::from("out.puml"));
        assert_eq!(guml.image_format, ImageFormat::Svg);
        assert_eq!(guml.format, "%h|%p|%s");
    }

    #[test]
    fn get_commits_requires_an_existing_repository() {
        let guml = Guml::with_repo("/definitely/not/a/repository");

        assert!(matches!(guml.get_commits(), Err(Error::RepoNotFound(_))));
    }

    #[test]
    fn render_image_requires_an_existing_jar() {
        // Fails on the existence check, nothing is launched
        let guml = Guml::with_repo(".").renderer_jar("/definitely/not/plantuml.jar");

        assert!(matches!(
            guml.render_image(),
            Err(Error::RendererNotFound(_))
        ));
    }
}
