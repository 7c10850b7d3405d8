//! `tiercache load` command.

use std::io::Write;
use std::sync::Arc;

use crate::cache::{FileBasedCache, NoopCache};
use crate::cli::args::LoadArgs;
use crate::config::CacheConfig;
use crate::error::Result;

use super::dispatcher::{Command, CommandResult};
use super::source::JsonFileSource;

/// The load command implementation.
pub struct LoadCommand {
    config: CacheConfig,
    args: LoadArgs,
}

impl LoadCommand {
    pub fn new(config: &CacheConfig, args: LoadArgs) -> Self {
        Self {
            config: config.clone(),
            args,
        }
    }
}

impl Command for LoadCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        // A one-shot process has nothing to share in memory.
        let mut cache = FileBasedCache::new(
            Arc::new(NoopCache),
            self.args.name.as_str(),
            &self.config.root,
            JsonFileSource::new(self.args.from.clone()),
        )?
        .with_codec(self.config.codec())
        .with_ignore_corruption(self.config.ignore_corruption && !self.args.strict);

        let origin = cache.load()?;
        let items = cache.items().unwrap_or_default();

        if self.args.json {
            let json = serde_json::to_string_pretty(items).map_err(anyhow::Error::from)?;
            writeln!(out, "{}", json)?;
        } else {
            writeln!(
                out,
                "Loaded {} items for '{}' from {}",
                items.len(),
                cache.key(),
                origin
            )?;
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, CacheConfig) {
        let temp = TempDir::new().unwrap();
        let config = CacheConfig {
            root: temp.path().join("cache"),
            ..CacheConfig::default()
        };
        (temp, config)
    }

    fn args(name: &str, from: Option<std::path::PathBuf>) -> LoadArgs {
        LoadArgs {
            name: name.to_string(),
            from,
            strict: false,
            json: false,
        }
    }

    fn run(config: &CacheConfig, args: LoadArgs) -> Result<String> {
        let mut out = Vec::new();
        LoadCommand::new(config, args).execute(&mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn cold_then_file() {
        let (temp, config) = setup();
        let source = temp.path().join("widgets.json");
        fs::write(&source, r#"[{"id": 1}, {"id": 2}]"#).unwrap();

        let first = run(&config, args("widgets", Some(source.clone()))).unwrap();
        assert!(first.contains("Loaded 2 items for 'widgets' from source"));
        assert!(config.root.join("widgets").exists());

        let second = run(&config, args("widgets", None)).unwrap();
        assert!(second.contains("from file"));
    }

    #[test]
    fn cold_without_source_fails() {
        let (_temp, config) = setup();
        let err = run(&config, args("widgets", None)).unwrap_err();
        assert!(matches!(err, CacheError::Source { .. }));
    }

    #[test]
    fn strict_surfaces_corruption() {
        let (_temp, config) = setup();
        fs::create_dir_all(&config.root).unwrap();
        fs::write(config.root.join("widgets"), "- [broken").unwrap();

        let mut strict = args("widgets", None);
        strict.strict = true;

        let err = run(&config, strict).unwrap_err();
        assert!(err.is_corrupted());
    }

    #[test]
    fn json_output_lists_items() {
        let (temp, config) = setup();
        let source = temp.path().join("widgets.json");
        fs::write(&source, r#"[{"id": 7}]"#).unwrap();

        let mut json = args("widgets", Some(source));
        json.json = true;

        let out = run(&config, json).unwrap();
        let items: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
        assert_eq!(items[0]["id"], 7);
    }
}
