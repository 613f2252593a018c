use crate::core::path::{discover_files, resolve_against, slash_path};
use crate::core::TranspackResult;
use crate::options::ResolvedOptions;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Name of the throwaway configuration file webpack consumes. Written to
/// the working directory and removed once the transform has finished.
pub const CONFIG_FILE_NAME: &str = "webpack.config.cli.temp.js";

/// Serialized stand-in for the rule test. Webpack wants a RegExp literal
/// there, which JSON cannot carry, so rendering patches this placeholder.
const RULE_TEST_PLACEHOLDER: &str = "__JS_RULE_TEST__";
const RULE_TEST_LITERAL: &str = r"/\.js$/";

/// Webpack configuration derived from the resolved options and the entry
/// directory listing.
#[derive(Debug, Serialize)]
pub struct WebpackConfig {
    mode: &'static str,
    output: OutputSection,
    module: ModuleSection,
    entry: EntrySection,
    #[serde(skip_serializing_if = "Option::is_none")]
    devtool: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct OutputSection {
    path: String,
    filename: &'static str,
}

#[derive(Debug, Serialize)]
struct ModuleSection {
    rules: Vec<Rule>,
}

#[derive(Debug, Serialize)]
struct Rule {
    test: &'static str,
    r#use: LoaderUse,
}

#[derive(Debug, Serialize)]
struct LoaderUse {
    loader: &'static str,
    options: LoaderOptions,
}

#[derive(Debug, Serialize)]
struct LoaderOptions {
    presets: Vec<&'static str>,
}

impl Rule {
    /// The one fixed transform rule: `.js` files through babel-loader with
    /// the environment-targeting preset.
    fn babel_js() -> Self {
        Self {
            test: RULE_TEST_PLACEHOLDER,
            r#use: LoaderUse {
                loader: "babel-loader",
                options: LoaderOptions {
                    presets: vec!["@babel/preset-env"],
                },
            },
        }
    }
}

/// Which input files become which output artifacts.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum EntrySection {
    /// One combined bundle: every input listed relative to the cwd.
    Bundle(Vec<String>),
    /// One artifact per input file, keyed by derived module name.
    Individual(BTreeMap<String, String>),
}

impl EntrySection {
    fn from_files(files: &[String], individual: bool, cwd: &Path) -> Self {
        if !individual {
            return EntrySection::Bundle(
                files.iter().map(|file| format!("./{}", file)).collect(),
            );
        }

        let mut entries = BTreeMap::new();
        for file in files {
            // Strip the top-level segment (the entry directory itself),
            // then everything from the first dot.
            let relative = file.splitn(2, '/').nth(1).unwrap_or(file);
            let name = relative.split('.').next().unwrap_or(relative);
            let absolute = slash_path(&resolve_against(cwd, file));
            entries.insert(name.to_string(), absolute);
        }
        EntrySection::Individual(entries)
    }
}

impl WebpackConfig {
    /// Derive the configuration from the resolved options. Walks the entry
    /// directory; a missing or unreadable directory fails here.
    pub fn synthesize(options: &ResolvedOptions, cwd: &Path) -> TranspackResult<Self> {
        let files = discover_files(cwd, &options.entry_directory)?;
        tracing::debug!(count = files.len(), "discovered entry files");

        Ok(Self {
            mode: "production",
            output: OutputSection {
                path: slash_path(&resolve_against(cwd, &options.output_directory)),
                filename: "[name].min.js",
            },
            module: ModuleSection {
                rules: vec![Rule::babel_js()],
            },
            entry: EntrySection::from_files(&files, options.individual, cwd),
            devtool: if options.map { Some("source-map") } else { None },
        })
    }

    /// Render the configuration as the CommonJS module webpack evaluates.
    pub fn render(&self) -> TranspackResult<String> {
        let body = serde_json::to_string_pretty(self)?;
        let body = body.replace(&format!("\"{}\"", RULE_TEST_PLACEHOLDER), RULE_TEST_LITERAL);
        Ok(format!("module.exports = {}\n", body))
    }

    /// Write the rendered configuration to `CONFIG_FILE_NAME` under `dir`
    /// and return its absolute path.
    pub async fn write(&self, dir: &Path) -> TranspackResult<PathBuf> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        tokio::fs::write(&config_path, self.render()?).await?;
        Ok(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn options(entry: &str, individual: bool, map: bool) -> ResolvedOptions {
        ResolvedOptions {
            entry_directory: entry.to_string(),
            output_directory: "./dist".to_string(),
            individual,
            map,
        }
    }

    fn fixture() -> TempDir {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("a.js"), "// a").unwrap();
        fs::write(src.join("b.min.js"), "// b").unwrap();
        fs::write(src.join("nested").join("c.js"), "// c").unwrap();
        temp
    }

    #[test]
    fn test_bundle_entry_prefixes_every_file() {
        let temp = fixture();
        let config = WebpackConfig::synthesize(&options("src", false, false), temp.path()).unwrap();

        match &config.entry {
            EntrySection::Bundle(files) => {
                assert_eq!(
                    files,
                    &vec![
                        "./src/a.js".to_string(),
                        "./src/b.min.js".to_string(),
                        "./src/nested/c.js".to_string(),
                    ]
                );
            }
            EntrySection::Individual(_) => panic!("expected a bundle entry"),
        }
    }

    #[test]
    fn test_individual_entry_maps_names_to_absolute_paths() {
        let temp = fixture();
        let config = WebpackConfig::synthesize(&options("src", true, false), temp.path()).unwrap();

        match &config.entry {
            EntrySection::Individual(entries) => {
                assert_eq!(entries.len(), 3);
                // Top segment stripped, everything from the first dot removed.
                assert!(entries.contains_key("a"));
                assert!(entries.contains_key("b"));
                assert!(entries.contains_key("nested/c"));

                let expected = slash_path(&temp.path().join("src").join("a.js"));
                assert_eq!(entries["a"], expected);
            }
            EntrySection::Bundle(_) => panic!("expected an individual entry"),
        }
    }

    #[test]
    fn test_devtool_only_present_with_map() {
        let temp = fixture();

        let without = WebpackConfig::synthesize(&options("src", false, false), temp.path()).unwrap();
        let value = serde_json::to_value(&without).unwrap();
        assert!(value.get("devtool").is_none());

        let with = WebpackConfig::synthesize(&options("src", false, true), temp.path()).unwrap();
        let value = serde_json::to_value(&with).unwrap();
        assert_eq!(value["devtool"], "source-map");
    }

    #[test]
    fn test_output_section() {
        let temp = fixture();
        let config = WebpackConfig::synthesize(&options("src", false, false), temp.path()).unwrap();
        let value = serde_json::to_value(&config).unwrap();

        assert_eq!(value["mode"], "production");
        assert_eq!(value["output"]["filename"], "[name].min.js");
        let expected = slash_path(&temp.path().join("dist"));
        assert_eq!(value["output"]["path"], expected.as_str());
    }

    #[test]
    fn test_render_patches_rule_test_into_regex() {
        let temp = fixture();
        let config = WebpackConfig::synthesize(&options("src", false, false), temp.path()).unwrap();
        let rendered = config.render().unwrap();

        assert!(rendered.starts_with("module.exports = {"));
        assert!(rendered.contains(r#""test": /\.js$/"#));
        assert!(!rendered.contains(RULE_TEST_PLACEHOLDER));
        assert!(rendered.contains("babel-loader"));
        assert!(rendered.contains("@babel/preset-env"));
    }

    #[test]
    fn test_missing_entry_directory_fails() {
        let temp = TempDir::new().unwrap();
        let result = WebpackConfig::synthesize(&options("missing", false, false), temp.path());
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_write_creates_the_temp_config() {
        let temp = fixture();
        let config = WebpackConfig::synthesize(&options("src", true, true), temp.path()).unwrap();

        let path = config.write(temp.path()).await.unwrap();
        assert_eq!(path, temp.path().join(CONFIG_FILE_NAME));

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("module.exports = "));
        assert!(written.contains("source-map"));
    }
}
