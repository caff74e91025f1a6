//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use facets_config::Config;
use facets_tree::{
    Bucket, FilterSession, Ingest, InputError, Language, Taxonomy, decode_filters, load_buckets,
};
use percent_encoding::percent_decode_str;
use tracing::debug;

use crate::cli::args::{OutputArgs, SelectionArgs, SourceArgs};

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = Config::load(&cwd).map_err(|e| {
            eprintln!("error: failed to load configuration: {e}");
            ExitCode::FAILURE
        })?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Builds the filter tree for a command.
    ///
    /// Loads both inputs, seeds the initial selection, and ingests the aggregation the way
    /// a search view would ingest a response.
    pub fn session(
        &self,
        sources: &SourceArgs,
        selection: &SelectionArgs,
    ) -> Result<FilterSession, ExitCode> {
        let configured = &self.config.sources;
        let taxonomy_path = self.source_path(
            "taxonomy",
            sources.taxonomy.as_deref(),
            configured.taxonomy.as_deref(),
        )?;
        let aggregation_path = self.source_path(
            "aggregation",
            sources.aggregation.as_deref(),
            configured.aggregation.as_deref(),
        )?;

        let taxonomy = Taxonomy::load(&taxonomy_path).map_err(report)?;
        let buckets: Vec<Bucket> = load_buckets(&aggregation_path).map_err(report)?;
        debug!(
            taxonomy = %taxonomy_path.display(),
            aggregation = %aggregation_path.display(),
            buckets = buckets.len(),
            "loaded inputs"
        );

        let filters = self.initial_filters(selection);
        let mut session =
            FilterSession::with_filters(Arc::new(taxonomy), self.config.build_options(), &filters);

        let ticket = session.begin_search();
        match session.complete_search(ticket, &buckets) {
            Ingest::Applied => Ok(session),
            Ingest::Superseded => {
                eprintln!("error: aggregation response was superseded");
                Err(ExitCode::FAILURE)
            }
        }
    }

    /// Returns the filters to start from: explicit flags first, then the configured default.
    pub fn initial_filters(&self, selection: &SelectionArgs) -> Vec<String> {
        if let Some(filters) = &selection.filters {
            return decode_filters(filters);
        }
        if let Some(query) = &selection.query {
            return query_filters(query, &self.config.filters.param);
        }
        self.config.filters.default.clone()
    }

    /// Returns the title language: the flag, then the config, then English.
    pub fn language(&self, output: &OutputArgs) -> Language {
        output
            .lang
            .or_else(|| self.config.language())
            .unwrap_or_default()
    }

    /// Returns true if listings should include document counts.
    pub fn show_counts(&self, output: &OutputArgs) -> bool {
        self.config.display.show_counts && !output.no_counts
    }

    /// Resolves an input path from its flag or the configuration.
    ///
    /// Flag paths are relative to the working directory; configured paths are already
    /// absolute.
    fn source_path(
        &self,
        name: &str,
        flag: Option<&Path>,
        configured: Option<&Path>,
    ) -> Result<PathBuf, ExitCode> {
        match flag {
            Some(path) => Ok(self.cwd.join(path)),
            None => configured.map(Path::to_path_buf).ok_or_else(|| {
                eprintln!("error: no {name} source given");
                eprintln!("Pass --{name} or set sources.{name} in .facets.toml.");
                ExitCode::FAILURE
            }),
        }
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Reads the filter parameter from a query string as a browser encodes it.
///
/// Pairs are split on the raw `&` and `=` before percent-decoding, so an encoded
/// `&` inside a filter path stays part of the path. `+` stands for a space.
fn query_filters(query: &str, name: &str) -> Vec<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .find_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (form_decode(key) == name).then(|| form_decode(value))
        })
        .map(|value| decode_filters(&value))
        .unwrap_or_default()
}

/// Decodes one `application/x-www-form-urlencoded` component.
fn form_decode(component: &str) -> String {
    percent_decode_str(&component.replace('+', " "))
        .decode_utf8_lossy()
        .into_owned()
}

/// Prints an input error and maps it to a failure exit code.
fn report(e: InputError) -> ExitCode {
    eprintln!("error: {e}");
    ExitCode::FAILURE
}
