use std::{fs, path::PathBuf};

use twbridge::{
    Document, Error, MessageTable, import_translations, load_raw_strings,
    php::render_translation_class,
};

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Translated key → template JSON.
    pub source: PathBuf,
    /// PHP class name to generate.
    pub class: String,
    /// Locale code returned by the class.
    pub locale: String,
    /// Project the translations belong to.
    pub project: String,
    pub out: PathBuf,
    pub projects_root: PathBuf,
}

impl GenerateOptions {
    pub fn project_dir(&self) -> PathBuf {
        self.projects_root.join(&self.project)
    }
}

/// Run the generate command: turn translator output into a translation class.
///
/// Returns the number of translations written.
pub fn run_generate_command(options: &GenerateOptions) -> Result<usize, Error> {
    let translations = MessageTable::read_from(&options.source)?;
    let raw = load_raw_strings(options.project_dir())?;

    let imported = import_translations(&translations, &raw);
    let class = render_translation_class(&options.class, &options.locale, &imported)?;

    if let Some(parent) = options.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&options.out, class)?;

    println!(
        "Wrote {} of {} translation(s) to \"{}\".",
        imported.len(),
        translations.len(),
        options.out.display()
    );
    println!("Done.");
    Ok(imported.len())
}
