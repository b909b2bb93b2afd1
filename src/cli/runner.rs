//! CLI runner - executes the merge

use crate::cli::commands::Cli;
use crate::config::BuilderConfig;
use crate::error::{Error, Result, ResultExt};
use crate::schema::SchemaBuilder;
use serde_json::Value;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI, writing the rendered schema to stdout
    pub fn run(&self) -> Result<()> {
        let rendered = self.render(read_stdin)?;
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{rendered}")?;
        Ok(())
    }

    /// Merge all inputs and render them; `stdin` supplies input when no files are given
    pub fn render(&self, stdin: impl FnOnce() -> Result<String>) -> Result<String> {
        let builder = self.build(stdin)?;
        builder.to_json(self.cli.pretty)
    }

    fn build(&self, stdin: impl FnOnce() -> Result<String>) -> Result<SchemaBuilder> {
        let mut builder = SchemaBuilder::with_config(self.config()?);

        for path in &self.cli.schemas {
            for schema in read_documents_from(path)? {
                builder
                    .add_schema(&schema)
                    .with_context(|| format!("Failed to merge schema from '{}'", path.display()))?;
            }
            debug!(path = %path.display(), "Merged schema file");
        }

        if self.cli.inputs.is_empty() {
            if self.cli.schemas.is_empty() {
                let documents = parse_documents(&stdin()?)?;
                builder.add_objects(&documents)?;
            }
        } else {
            for path in &self.cli.inputs {
                let documents = read_documents_from(path)?;
                builder
                    .add_objects(&documents)
                    .with_context(|| format!("Failed to merge objects from '{}'", path.display()))?;
                info!(path = %path.display(), count = documents.len(), "Merged input file");
            }
        }

        Ok(builder)
    }

    /// Config file settings with command-line overrides applied
    fn config(&self) -> Result<BuilderConfig> {
        let mut config = match &self.cli.config {
            Some(path) => BuilderConfig::from_file(path)?,
            None => BuilderConfig::default(),
        };
        if let Some(dialect) = self.cli.dialect {
            config.dialect = dialect;
        }
        if let Some(uri) = &self.cli.schema_uri {
            config = config
                .with_schema_uri(Some(uri.as_str()))
                .with_pinned_schema_uri(true);
        }
        Ok(config)
    }
}

fn read_stdin() -> Result<String> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    Ok(input)
}

fn read_documents_from(path: &Path) -> Result<Vec<Value>> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::Io(e)
        }
    })?;
    parse_documents(&content)
}

/// Parse one or more concatenated / newline-delimited JSON documents
fn parse_documents(content: &str) -> Result<Vec<Value>> {
    serde_json::Deserializer::from_str(content)
        .into_iter::<Value>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::from)
}
