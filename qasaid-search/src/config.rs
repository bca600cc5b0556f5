//! Settings resolution for qasaid-search
//!
//! **Priority:** command line / environment (via clap) → TOML → defaults.
//! The database URL is not part of these settings; it is read from the
//! environment only (see `qasaid_common::config::database_url_from_env`).

use qasaid_common::config::{ProfileSection, SearchSection};
use qasaid_common::{Error, Result};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::backend::validate_function_name;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_FUNCTION: &str = "hybrid_search_v1_core";
pub const DEFAULT_MAX_LIMIT: u32 = 100;
pub const DEFAULT_MATCH_FIELD: &str = "source_fields";

/// Largest accepted `max_limit`
const MAX_LIMIT_CEILING: u32 = 10_000;

/// One mounted search page + endpoint
///
/// Profiles differ only in data: default result limit, HTML page, and
/// whether the title/poem breakdown is added to responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteProfile {
    pub name: String,
    /// Route prefix, `""` for the root
    pub mount: String,
    pub default_limit: u32,
    pub template_path: Option<PathBuf>,
    pub include_match_breakdown: bool,
}

impl RouteProfile {
    /// Profiles used when the config lists none
    pub fn builtin() -> Vec<RouteProfile> {
        vec![
            RouteProfile {
                name: "exact".to_string(),
                mount: String::new(),
                default_limit: 10,
                template_path: Some(PathBuf::from("01_exact_match.html")),
                include_match_breakdown: false,
            },
            RouteProfile {
                name: "live".to_string(),
                mount: "/live".to_string(),
                default_limit: 30,
                template_path: Some(PathBuf::from("02_live_search.html")),
                include_match_breakdown: true,
            },
        ]
    }

    fn from_section(section: &ProfileSection) -> Result<Self> {
        if section.name.trim().is_empty() {
            return Err(Error::Config("search profile name must not be empty".to_string()));
        }
        if section.default_limit == 0 {
            return Err(Error::Config(format!(
                "search profile '{}': default_limit must be at least 1",
                section.name
            )));
        }

        Ok(Self {
            name: section.name.clone(),
            mount: normalize_mount(&section.mount),
            default_limit: section.default_limit,
            template_path: section.template_path.clone(),
            include_match_breakdown: section.include_match_breakdown,
        })
    }

    /// Route of the search endpoint, e.g. `/live/api/search`
    pub fn search_route(&self) -> String {
        format!("{}/api/search", self.mount)
    }
}

/// `"live/"` -> `"/live"`, `"/"` -> `""`
fn normalize_mount(mount: &str) -> String {
    let trimmed = mount.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

/// Values supplied on the command line or through environment variables
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Resolved search service settings
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub host: String,
    pub port: u16,
    /// Stored function invoked as `function(query, limit)`
    pub function: String,
    pub max_limit: u32,
    pub match_field: String,
    pub profiles: Vec<RouteProfile>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            function: DEFAULT_FUNCTION.to_string(),
            max_limit: DEFAULT_MAX_LIMIT,
            match_field: DEFAULT_MATCH_FIELD.to_string(),
            profiles: RouteProfile::builtin(),
        }
    }
}

impl SearchSettings {
    pub fn resolve(cli: &CliConfig, file: &SearchSection) -> Result<Self> {
        let host = cli
            .host
            .clone()
            .or_else(|| file.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = cli.port.or(file.port).unwrap_or(DEFAULT_PORT);

        let function = file
            .function
            .clone()
            .unwrap_or_else(|| DEFAULT_FUNCTION.to_string());
        validate_function_name(&function).map_err(|e| Error::Config(e.to_string()))?;

        let max_limit = file.max_limit.unwrap_or(DEFAULT_MAX_LIMIT);
        if max_limit == 0 || max_limit > MAX_LIMIT_CEILING {
            return Err(Error::Config(format!(
                "search max_limit must be between 1 and {}, got {}",
                MAX_LIMIT_CEILING, max_limit
            )));
        }

        let match_field = file
            .match_field
            .clone()
            .unwrap_or_else(|| DEFAULT_MATCH_FIELD.to_string());

        let profiles = if file.profiles.is_empty() {
            RouteProfile::builtin()
        } else {
            file.profiles
                .iter()
                .map(RouteProfile::from_section)
                .collect::<Result<Vec<_>>>()?
        };

        let mut mounts = HashSet::new();
        for profile in &profiles {
            if !mounts.insert(profile.mount.as_str()) {
                return Err(Error::Config(format!(
                    "search profiles share the mount '{}'",
                    profile.mount
                )));
            }
        }

        Ok(Self {
            host,
            port,
            function,
            max_limit,
            match_field,
            profiles,
        })
    }

    /// Profile default when `requested` is absent, clamped to `1..=max_limit`
    pub fn effective_limit(&self, profile: &RouteProfile, requested: Option<i64>) -> i32 {
        let limit = requested
            .unwrap_or(i64::from(profile.default_limit))
            .clamp(1, i64::from(self.max_limit));
        // max_limit never exceeds MAX_LIMIT_CEILING, so this cannot truncate
        limit as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, mount: &str, default_limit: u32) -> ProfileSection {
        ProfileSection {
            name: name.to_string(),
            mount: mount.to_string(),
            default_limit,
            template_path: None,
            include_match_breakdown: false,
        }
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = SearchSettings::resolve(&CliConfig::default(), &SearchSection::default()).unwrap();
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.port, 5000);
        assert_eq!(settings.function, "hybrid_search_v1_core");
        assert_eq!(settings.max_limit, 100);
        assert_eq!(settings.match_field, "source_fields");
        assert_eq!(settings.profiles, RouteProfile::builtin());
    }

    #[test]
    fn test_cli_overrides_toml() {
        let cli = CliConfig {
            host: Some("0.0.0.0".to_string()),
            port: None,
        };
        let file = SearchSection {
            host: Some("10.0.0.1".to_string()),
            port: Some(8080),
            ..Default::default()
        };
        let settings = SearchSettings::resolve(&cli, &file).unwrap();
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.port, 8080);
    }

    #[test]
    fn test_profiles_from_toml_replace_builtin() {
        let file = SearchSection {
            profiles: vec![profile("poems", "poems/", 20)],
            ..Default::default()
        };
        let settings = SearchSettings::resolve(&CliConfig::default(), &file).unwrap();
        assert_eq!(settings.profiles.len(), 1);
        assert_eq!(settings.profiles[0].mount, "/poems");
        assert_eq!(settings.profiles[0].search_route(), "/poems/api/search");
    }

    #[test]
    fn test_duplicate_mounts_rejected() {
        let file = SearchSection {
            profiles: vec![profile("a", "/", 10), profile("b", "", 30)],
            ..Default::default()
        };
        let err = SearchSettings::resolve(&CliConfig::default(), &file).unwrap_err();
        assert!(err.to_string().contains("share the mount"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad_function = SearchSection {
            function: Some("search(); --".to_string()),
            ..Default::default()
        };
        assert!(SearchSettings::resolve(&CliConfig::default(), &bad_function).is_err());

        let zero_cap = SearchSection {
            max_limit: Some(0),
            ..Default::default()
        };
        assert!(SearchSettings::resolve(&CliConfig::default(), &zero_cap).is_err());

        let zero_default = SearchSection {
            profiles: vec![profile("a", "", 0)],
            ..Default::default()
        };
        assert!(SearchSettings::resolve(&CliConfig::default(), &zero_default).is_err());
    }

    #[test]
    fn test_effective_limit() {
        let settings = SearchSettings::default();
        let exact = &settings.profiles[0];
        let live = &settings.profiles[1];

        assert_eq!(settings.effective_limit(exact, None), 10);
        assert_eq!(settings.effective_limit(live, None), 30);
        assert_eq!(settings.effective_limit(exact, Some(25)), 25);
        assert_eq!(settings.effective_limit(exact, Some(5000)), 100);
        assert_eq!(settings.effective_limit(exact, Some(0)), 1);
        assert_eq!(settings.effective_limit(exact, Some(-3)), 1);
    }
}
