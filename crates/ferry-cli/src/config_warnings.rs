use ferry_config::FerryConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &FerryConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &FerryConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let sections = [
        ("target", config.target.is_configured(), "FERRY_TARGET", "FERRY_TARGET__ACCESS_TOKEN"),
        ("import", config.import.is_configured(), "FERRY_IMPORT", "FERRY_IMPORT__LOCALE_ID"),
        (
            "source",
            config.source.has_url() || config.source.has_file(),
            "FERRY_SOURCE",
            "FERRY_SOURCE__FILE",
        ),
    ];

    sections
        .into_iter()
        .filter(|(_, configured, prefix, _)| !configured && has_env_prefix(&env_keys, prefix))
        .map(|(section, _, prefix, example)| {
            format!(
                "{section} config appears default while {prefix}* env vars exist. Use double underscores (example: {example})."
            )
        })
        .collect()
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use ferry_config::FerryConfig;
    use pretty_assertions::assert_eq;

    use super::collect_unconfigured_warnings;

    #[test]
    fn warns_for_single_underscore_keys() {
        let config = FerryConfig::default();
        let warnings = collect_unconfigured_warnings(
            &config,
            vec![
                ("FERRY_TARGET_ACCESS_TOKEN".to_string(), "token".to_string()),
                ("FERRY_IMPORT_LOCALE_ID".to_string(), "loc1".to_string()),
                ("FERRY_SOURCE_FILE".to_string(), "a.json".to_string()),
            ],
        );

        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].starts_with("target config"));
    }

    #[test]
    fn does_not_warn_when_sections_are_configured() {
        let mut config = FerryConfig::default();
        config.target.access_token = "token".into();
        config.target.space_id = "s1".into();
        config.import.content_type_id = "product".into();
        config.import.locale_id = "loc1".into();
        config.source.file = "a.json".into();

        let warnings = collect_unconfigured_warnings(
            &config,
            vec![
                ("FERRY_TARGET__ACCESS_TOKEN".to_string(), "token".to_string()),
                ("FERRY_IMPORT__LOCALE_ID".to_string(), "loc1".to_string()),
                ("FERRY_SOURCE__FILE".to_string(), "a.json".to_string()),
            ],
        );

        assert!(warnings.is_empty());
    }

    #[test]
    fn unrelated_env_is_ignored() {
        let warnings = collect_unconfigured_warnings(
            &FerryConfig::default(),
            vec![("FERRY_LOG".to_string(), "debug".to_string())],
        );
        assert!(warnings.is_empty());
    }
}
