#[cfg(test)]
mod tests {
    use rota::libs::calendar::WeekStart;
    use rota::libs::config::{CalendarConfig, Config, CycleConfig, StatisticsConfig};
    use rota::libs::statistics::RangeKind;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        _temp_dir: TempDir,
        path: PathBuf,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let path = temp_dir.path().join("config.json");
            ConfigTestContext { _temp_dir: temp_dir, path }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_file_gives_defaults(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.path).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.cycle().default_length, 5);
        assert_eq!(config.cycle().default_shift_hours, 8.0);
        assert_eq!(config.calendar().week_starts_on, WeekStart::Monday);
        assert_eq!(config.calendar().upcoming_events, 3);
        assert_eq!(config.statistics().default_range, RangeKind::Month);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read(ctx: &mut ConfigTestContext) {
        let config = Config {
            cycle: Some(CycleConfig {
                default_length: 7,
                default_shift_hours: 12.0,
            }),
            calendar: Some(CalendarConfig {
                week_starts_on: WeekStart::Sunday,
                upcoming_events: 0,
            }),
            statistics: Some(StatisticsConfig {
                default_range: RangeKind::Year,
            }),
        };
        config.save_to(&ctx.path).unwrap();

        let loaded = Config::read_from(&ctx.path).unwrap();
        assert_eq!(loaded, config);

        let raw = fs::read_to_string(&ctx.path).unwrap();
        assert!(raw.contains("\"week_starts_on\": \"sunday\""));
        assert!(raw.contains("\"default_range\": \"year\""));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_unset_sections_are_omitted(ctx: &mut ConfigTestContext) {
        let config = Config {
            calendar: Some(CalendarConfig::default()),
            ..Default::default()
        };
        config.save_to(&ctx.path).unwrap();

        let raw = fs::read_to_string(&ctx.path).unwrap();
        assert!(!raw.contains("cycle"));
        assert!(!raw.contains("statistics"));
        assert!(raw.contains("calendar"));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_file(ctx: &mut ConfigTestContext) {
        fs::write(&ctx.path, r#"{ "statistics": { "default_range": "year" } }"#).unwrap();

        let config = Config::read_from(&ctx.path).unwrap();
        assert_eq!(config.statistics().default_range, RangeKind::Year);
        assert!(config.cycle.is_none());
        assert_eq!(config.cycle(), CycleConfig::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_malformed_file_is_an_error(ctx: &mut ConfigTestContext) {
        fs::write(&ctx.path, "{ not json").unwrap();

        assert!(Config::read_from(&ctx.path).is_err());
    }
}
