use std::path::{Path, PathBuf};

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::language::Language;
use crate::reader::SchemaReader;
use crate::render::{TemplateData, render};

/// Result of one generation call.
///
/// The rendered text is kept even when the write failed, so callers can still
/// show it.
#[derive(Debug)]
pub struct Generated {
    pub table: String,
    pub path: PathBuf,
    pub content: String,
    pub written: Result<()>,
}

impl Generated {
    pub fn is_written(&self) -> bool {
        self.written.is_ok()
    }

    /// Turn a failed write into an error.
    pub fn ensure_written(self) -> Result<Generated> {
        let Generated {
            table,
            path,
            content,
            written,
        } = self;
        written?;
        Ok(Generated {
            table,
            path,
            content,
            written: Ok(()),
        })
    }
}

/// Generates structs for the tables behind one reader.
pub struct Generator<'a> {
    reader: &'a dyn SchemaReader,
    config: &'a GeneratorConfig,
}

impl<'a> Generator<'a> {
    /// # Example
    /// ```ignore
    /// let reader = connect("postgres", "postgres://localhost/app").await?;
    /// let config = GeneratorConfig::default();
    /// let generator = Generator::new(reader.as_ref(), &config);
    /// ```
    pub fn new(reader: &'a dyn SchemaReader, config: &'a GeneratorConfig) -> Self {
        Self { reader, config }
    }

    pub fn language(&self) -> Language {
        self.config.language
    }

    pub async fn template_data(&self, table: &str) -> Result<TemplateData> {
        let columns = self.reader.describe_table(table).await?;
        log::debug!("Table {} has {} columns", table, columns.len());
        Ok(TemplateData::new(table, &columns, self.config))
    }

    /// Rendered source for `table`, nothing is written.
    ///
    /// # Example
    /// ```ignore
    /// let source = generator.render("users").await?;
    /// println!("{source}");
    /// ```
    pub async fn render(&self, table: &str) -> Result<String> {
        render(&self.template_data(table).await?)
    }

    /// Render `table` and write it to `output`, replacing any existing file.
    ///
    /// Read and render failures are returned as errors; the write outcome is
    /// reported in [`Generated::written`].
    ///
    /// # Example
    /// ```ignore
    /// let generated = generator.generate("users", "model/users_model.go").await?;
    /// if let Err(e) = &generated.written {
    ///     eprintln!("preview only: {e}");
    /// }
    /// ```
    pub async fn generate(&self, table: &str, output: impl AsRef<Path>) -> Result<Generated> {
        let content = self.render(table).await?;
        let path = output.as_ref().to_path_buf();

        let written = write_output(&path, &content).await;
        match &written {
            Ok(()) => log::info!("Wrote struct for {} to {}", table, path.display()),
            Err(e) => log::warn!("{}", e),
        }

        Ok(Generated {
            table: table.to_string(),
            path,
            content,
            written,
        })
    }

    /// Generate every table into `dir`, one `<table>_model.<ext>` file each.
    pub async fn generate_all(&self, dir: impl AsRef<Path>) -> Result<Vec<Generated>> {
        let dir = dir.as_ref();
        let tables = self.reader.list_tables().await?;
        let mut generated = Vec::with_capacity(tables.len());

        for table in &tables {
            let path = dir.join(default_file_name(table, self.language()));
            generated.push(self.generate(table, path).await?);
        }
        Ok(generated)
    }
}

/// Read, render and write one table in a single call.
pub async fn generate(
    reader: &dyn SchemaReader,
    table: &str,
    output: impl AsRef<Path>,
    config: &GeneratorConfig,
) -> Result<Generated> {
    Generator::new(reader, config).generate(table, output).await
}

pub fn default_file_name(table: &str, language: Language) -> String {
    format!("{}_model.{}", table, language.extension())
}

/// Where the struct for `table` goes.
///
/// No output means `<table>_model.<ext>` in the working directory. An
/// existing directory, or a path ending in a separator, gets that file name
/// appended. Anything else is taken as the file path.
pub fn resolve_output_path(output: Option<&Path>, table: &str, language: Language) -> PathBuf {
    let file_name = default_file_name(table, language);
    match output {
        None => PathBuf::from(file_name),
        Some(path) if path.is_dir() || ends_with_separator(path) => path.join(file_name),
        Some(path) => path.to_path_buf(),
    }
}

fn ends_with_separator(path: &Path) -> bool {
    path.as_os_str()
        .to_string_lossy()
        .ends_with(std::path::is_separator)
}

/// Write `content` to `path`, creating missing parent directories.
pub async fn write_output(path: &Path, content: &str) -> Result<()> {
    let write_error = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
    }
    tokio::fs::write(path, content).await.map_err(write_error)
}
