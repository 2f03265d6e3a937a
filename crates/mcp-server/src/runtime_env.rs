use std::env;
use std::path::PathBuf;
use std::time::Duration;
use vault_indexer::{parse_duration, RefreshConfig};

pub const ROOT_ENV: &str = "VAULT_GRAPH_ROOT";
pub const REFRESH_INTERVAL_ENV: &str = "VAULT_GRAPH_REFRESH_INTERVAL";
pub const REBUILD_TIMEOUT_ENV: &str = "VAULT_GRAPH_REBUILD_TIMEOUT";
pub const FETCH_BATCH_ENV: &str = "VAULT_GRAPH_FETCH_BATCH";

/// Startup settings plus everything that had to fall back to a default
#[derive(Debug, Clone)]
pub struct BootstrapReport {
    pub root: PathBuf,
    pub refresh: RefreshConfig,
    pub warnings: Vec<String>,
}

pub fn bootstrap_from_env() -> BootstrapReport {
    bootstrap_from_lookup(|key| env::var(key).ok())
}

fn bootstrap_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> BootstrapReport {
    let mut warnings = Vec::new();
    let defaults = RefreshConfig::default();

    let root = match non_empty(lookup(ROOT_ENV)) {
        Some(raw) => PathBuf::from(raw),
        None => env::current_dir().unwrap_or_else(|err| {
            warnings.push(format!(
                "{ROOT_ENV} not set and the current directory is unavailable ({err}); using '.'"
            ));
            PathBuf::from(".")
        }),
    };
    if !root.is_dir() {
        warnings.push(format!(
            "{ROOT_ENV}={} is not a directory; rebuilds will fail until it exists",
            root.display()
        ));
    }

    let interval = duration_or_default(
        &lookup,
        REFRESH_INTERVAL_ENV,
        defaults.interval,
        &mut warnings,
    );
    let rebuild_timeout = duration_or_default(
        &lookup,
        REBUILD_TIMEOUT_ENV,
        defaults.rebuild_timeout,
        &mut warnings,
    );

    let fetch_batch_size = match non_empty(lookup(FETCH_BATCH_ENV)) {
        None => defaults.fetch_batch_size,
        Some(raw) => match raw.trim().parse::<usize>() {
            Ok(size) if size > 0 => size,
            _ => {
                warnings.push(format!(
                    "{FETCH_BATCH_ENV}='{raw}' is not a positive integer; using {}",
                    defaults.fetch_batch_size
                ));
                defaults.fetch_batch_size
            }
        },
    };

    BootstrapReport {
        root,
        refresh: RefreshConfig {
            interval,
            rebuild_timeout,
            fetch_batch_size,
        },
        warnings,
    }
}

fn duration_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Duration,
    warnings: &mut Vec<String>,
) -> Duration {
    let Some(raw) = non_empty(lookup(key)) else {
        return default;
    };
    match parse_duration(&raw) {
        Ok(value) if !value.is_zero() => value,
        Ok(_) => {
            warnings.push(format!("{key}='{raw}' must be greater than zero; using {default:?}"));
            default
        }
        Err(err) => {
            warnings.push(format!("{key}: {err}; using {default:?}"));
            default
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn report(vars: &[(&str, &str)]) -> BootstrapReport {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        bootstrap_from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let report = report(&[]);
        assert_eq!(report.refresh.interval, Duration::from_secs(300));
        assert_eq!(report.refresh.rebuild_timeout, Duration::from_secs(120));
        assert_eq!(report.refresh.fetch_batch_size, 20);
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    }

    #[test]
    fn reads_overrides() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().to_string_lossy().to_string();
        let report = report(&[
            (ROOT_ENV, root.as_str()),
            (REFRESH_INTERVAL_ENV, "30s"),
            (REBUILD_TIMEOUT_ENV, "1500ms"),
            (FETCH_BATCH_ENV, "8"),
        ]);

        assert_eq!(report.root, tmp.path());
        assert_eq!(report.refresh.interval, Duration::from_secs(30));
        assert_eq!(report.refresh.rebuild_timeout, Duration::from_millis(1500));
        assert_eq!(report.refresh.fetch_batch_size, 8);
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    }

    #[test]
    fn invalid_values_fall_back_with_warnings() {
        let report = report(&[
            (REFRESH_INTERVAL_ENV, "soon"),
            (REBUILD_TIMEOUT_ENV, "0s"),
            (FETCH_BATCH_ENV, "0"),
        ]);

        assert_eq!(report.refresh.interval, Duration::from_secs(300));
        assert_eq!(report.refresh.rebuild_timeout, Duration::from_secs(120));
        assert_eq!(report.refresh.fetch_batch_size, 20);
        assert_eq!(report.warnings.len(), 3, "{:?}", report.warnings);
    }

    #[test]
    fn oversized_interval_falls_back_with_warning() {
        let report = report(&[(REFRESH_INTERVAL_ENV, "9300000000000000000s")]);
        assert_eq!(report.refresh.interval, Duration::from_secs(300));
        assert_eq!(report.warnings.len(), 1, "{:?}", report.warnings);
        assert!(report.warnings[0].contains(REFRESH_INTERVAL_ENV));
    }

    #[test]
    fn missing_root_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope").to_string_lossy().to_string();
        let report = report(&[(ROOT_ENV, missing.as_str())]);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains(ROOT_ENV));
    }
}
