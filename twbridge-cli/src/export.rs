use std::path::PathBuf;

use tracing::info;
use twbridge::{Document, Error, ExportProject, StringCatalog};

/// Where the string extractor leaves its cache inside a library.
pub const STRINGS_CACHE_PATH: &str = ".cache/i18n_strings.json";

#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Library the strings were extracted from.
    pub library: PathBuf,
    /// Project name; files go to `<projects_root>/<name>/`.
    pub name: String,
    /// Explicit extractor output, instead of the library's cache.
    pub strings: Option<PathBuf>,
    /// Base URI for linking usages in translator context.
    pub browse_uri: Option<String>,
    pub projects_root: PathBuf,
}

impl ExportOptions {
    pub fn strings_path(&self) -> PathBuf {
        self.strings
            .clone()
            .unwrap_or_else(|| self.library.join(STRINGS_CACHE_PATH))
    }

    pub fn project_dir(&self) -> PathBuf {
        self.projects_root.join(&self.name)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_input(
                "Provide a project name to export strings under with \"--as\".",
            ));
        }
        let strings_path = self.strings_path();
        if !strings_path.is_file() {
            return Err(Error::invalid_input(format!(
                "Expected library string extraction to generate file \"{}\", but no such file exists!",
                strings_path.display()
            )));
        }
        Ok(())
    }
}

/// Summary of an export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub read: usize,
    pub exported: usize,
    pub rejected: usize,
    pub files: Vec<PathBuf>,
}

/// Run the export command: publish a library's strings as a translation project.
pub fn run_export_command(options: &ExportOptions) -> Result<ExportSummary, Error> {
    options.validate()?;

    let strings_path = options.strings_path();
    let catalog = StringCatalog::read_from(&strings_path)?;
    println!("Read {} string(s).", catalog.len());

    let project = ExportProject::build(&catalog, options.browse_uri.as_deref());
    if !project.rejected.is_empty() {
        info!(
            rejected = project.rejected.len(),
            "some strings need manual attention and were not exported"
        );
    }

    let project_dir = options.project_dir();
    println!("Writing project data to \"{}\"...", project_dir.display());
    let files = project.write_to_dir(&project_dir)?;
    for file in &files {
        println!("  {}", file.display());
    }
    println!("Done.");

    Ok(ExportSummary {
        read: catalog.len(),
        exported: project.exported_count(),
        rejected: project.rejected.len(),
        files,
    })
}
