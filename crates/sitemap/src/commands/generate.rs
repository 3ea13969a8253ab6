//! `sitemap generate` command implementation.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use sitemap_config::{CliSettings, Config};
use sitemap_core::plan::Plan;
use sitemap_core::{BaseUrl, FsWriter, Generated, SitemapBuilder, UrlEntry, UrlResolver};

use crate::error::CliError;
use crate::input::{self, InputFormat};
use crate::output::Output;

/// Arguments for the generate command.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// URL list to read (`-` for stdin).
    #[arg(short, long)]
    input: PathBuf,

    /// Format of the URL list (default: by file extension, TSV otherwise).
    #[arg(long, value_enum)]
    format: Option<InputFormat>,

    /// Path to configuration file (default: auto-discover sitemap.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output subdirectory below the public directory (overrides config).
    #[arg(short, long, env = "SITEMAP_DIRECTORY")]
    directory: Option<String>,

    /// Maximum number of URLs per sitemap file (overrides config).
    #[arg(short, long, env = "SITEMAP_SIZE")]
    size: Option<usize>,

    /// Public directory the files are written under (overrides config).
    #[arg(long)]
    public_dir: Option<PathBuf>,

    /// Public base URL of the public directory (overrides config).
    #[arg(long, env = "SITEMAP_BASE_URL")]
    base_url: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl GenerateArgs {
    /// Execute the generate command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or input is invalid, or the
    /// top-level sitemap file cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            directory: self.directory,
            size: self.size,
            public_dir: self.public_dir,
            base_url: self.base_url,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(config_path = ?config.config_path, "Loaded configuration");

        let format = self
            .format
            .unwrap_or_else(|| InputFormat::from_path(&self.input));
        let entries: Vec<UrlEntry> = input::parse(&read_input(&self.input)?, format)?
            .into_iter()
            .map(|entry| UrlEntry::new(entry.url, entry.last_modified, &entry.group))
            .collect();

        let public_dir = &config.output_resolved.public_dir;
        output.info(&format!("Input: {} ({} URLs)", self.input.display(), entries.len()));
        output.info(&format!("Output: {}", public_dir.display()));

        let writer = FsWriter::new(public_dir).with_create_dirs(config.output_resolved.create_dirs);
        let resolver = resolver(&config, &entries)?;
        let mut builder = SitemapBuilder::new(config.builder_config(), Arc::new(writer), resolver);
        builder.extend(entries);

        match builder.generate()? {
            Generated::Sitemap { path, urls } => {
                output.success(&format!("Wrote {path} with {urls} URLs"));
            }
            Generated::Index {
                path,
                sitemaps,
                skipped,
            } => {
                output.success(&format!(
                    "Wrote sitemap index {path} referencing {} files",
                    sitemaps.len()
                ));
                if skipped > 0 {
                    output.warning(&format!(
                        "{skipped} sitemap files could not be written and were left out"
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Resolver for index `<loc>` entries.
///
/// A base URL is only required when the entries end up in a sitemap index;
/// a single sitemap never resolves file URLs.
fn resolver(config: &Config, entries: &[UrlEntry]) -> Result<Arc<dyn UrlResolver>, CliError> {
    let single = matches!(Plan::new(entries, config.sitemap.size), Plan::Single(_));
    if single && config.output_resolved.base_url.is_none() {
        return Ok(Arc::new(|path: &str| path.to_owned()));
    }
    Ok(Arc::new(BaseUrl::new(config.require_base_url()?)))
}

/// Read the URL list from a file, or stdin for `-`.
fn read_input(path: &Path) -> Result<String, CliError> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        return Ok(content);
    }
    Ok(std::fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(tmp: &TempDir, input: &str, size: Option<usize>, base_url: Option<&str>) -> GenerateArgs {
        let input_path = tmp.path().join("urls.tsv");
        fs::write(&input_path, input).unwrap();
        let config_path = tmp.path().join("sitemap.toml");
        fs::write(&config_path, "[output]\npublic_dir = \"public\"\n").unwrap();

        GenerateArgs {
            input: input_path,
            format: None,
            config: Some(config_path),
            directory: None,
            size,
            public_dir: None,
            base_url: base_url.map(str::to_owned),
            verbose: false,
        }
    }

    #[test]
    fn test_generate_single_sitemap_without_base_url() {
        let tmp = TempDir::new().unwrap();
        let args = args(
            &tmp,
            "https://example.com/page1\t2023-01-01\nhttps://example.com/page2\t2023-01-02\n",
            None,
            None,
        );

        args.execute().unwrap();

        let xml = fs::read_to_string(tmp.path().join("public/sitemap.xml")).unwrap();
        assert!(xml.contains("<loc>https://example.com/page1</loc>"));
        assert!(xml.contains("<loc>https://example.com/page2</loc>"));
        assert!(xml.contains("<lastmod>2023-01-02</lastmod>"));
    }

    #[test]
    fn test_generate_index() {
        let tmp = TempDir::new().unwrap();
        let input: String = (1..=20)
            .map(|i| format!("https://example.com/page{i}\t2023-01-01\tposts\n"))
            .collect();
        let args = args(&tmp, &input, Some(10), Some("https://example.com"));

        args.execute().unwrap();

        let public = tmp.path().join("public");
        assert!(public.join("sitemap_posts_1.xml").exists());
        assert!(public.join("sitemap_posts_2.xml").exists());
        let index = fs::read_to_string(public.join("sitemap.xml")).unwrap();
        assert!(index.contains("<loc>https://example.com/sitemap_posts_1.xml</loc>"));
        assert!(index.contains("<loc>https://example.com/sitemap_posts_2.xml</loc>"));
    }

    #[test]
    fn test_index_requires_base_url() {
        let tmp = TempDir::new().unwrap();
        let args = args(
            &tmp,
            "https://example.com/\t\tpages\nhttps://example.com/blog\t\tposts\n",
            None,
            None,
        );

        let err = args.execute().unwrap_err();

        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("output.base_url"));
        assert!(!tmp.path().join("public/sitemap.xml").exists());
    }
}
