use super::*;

#[test]
fn defaults_match_a_local_blog() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.server.addr, "127.0.0.1:5000".parse::<SocketAddr>().unwrap());
    assert_eq!(settings.server.graceful_shutdown, Duration::from_secs(30));
    assert_eq!(settings.logging.level, LevelFilter::INFO);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
    assert!(settings.database.url.is_none());
    assert_eq!(settings.database.max_connections.get(), 5);
    assert_eq!(settings.site.title, "My Blog");
    assert_eq!(settings.site.timezone, Tz::UTC);
    assert!(settings.site.contact_email.is_none());
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(4000);
    raw.logging.level = Some("info".to_string());

    let overrides = ServeOverrides {
        server_port: Some(4321),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.server.addr.port(), 4321);
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = ServeOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn zero_port_is_rejected() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(0);

    let err = Settings::from_raw(raw).expect_err("port 0 is invalid");
    assert!(matches!(err, LoadError::Invalid { key: "server.port", .. }));
}

#[test]
fn zero_pool_size_is_rejected() {
    let mut raw = RawSettings::default();
    raw.database.max_connections = Some(0);

    let err = Settings::from_raw(raw).expect_err("empty pool is invalid");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "database.max_connections",
            ..
        }
    ));
}

#[test]
fn unknown_log_level_is_rejected() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("loud".to_string());

    let err = Settings::from_raw(raw).expect_err("bad level");
    assert!(matches!(err, LoadError::Invalid { key: "logging.level", .. }));
}

#[test]
fn site_timezone_accepts_iana_names() {
    let mut raw = RawSettings::default();
    raw.site.timezone = Some("Europe/Berlin".to_string());

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.site.timezone, chrono_tz::Europe::Berlin);
}

#[test]
fn unknown_site_timezone_is_rejected() {
    let mut raw = RawSettings::default();
    raw.site.timezone = Some("Mars/Olympus_Mons".to_string());

    let err = Settings::from_raw(raw).expect_err("bad zone");
    assert!(matches!(err, LoadError::Invalid { key: "site.timezone", .. }));
}

#[test]
fn blank_database_url_is_treated_as_missing() {
    let mut raw = RawSettings::default();
    raw.database.url = Some("   ".to_string());

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert!(settings.database.url.is_none());
}

#[test]
fn contact_email_must_look_like_an_address() {
    let mut raw = RawSettings::default();
    raw.site.contact_email = Some("nobody".to_string());
    let err = Settings::from_raw(raw.clone()).expect_err("bad email");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "site.contact_email",
            ..
        }
    ));

    raw.site.contact_email = Some(" me@example.com ".to_string());
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.site.contact_email.as_deref(), Some("me@example.com"));
}

#[test]
fn default_to_serve_command() {
    let args = CliArgs::parse_from(["plainblog"]);
    let command = args
        .command
        .unwrap_or(Command::Serve(Box::<ServeArgs>::default()));
    assert!(matches!(command, Command::Serve(_)));
}

#[test]
fn parse_serve_overrides() {
    let args = CliArgs::parse_from([
        "plainblog",
        "serve",
        "--server-port",
        "8080",
        "--site-timezone",
        "Asia/Tokyo",
        "--log-json",
        "true",
    ]);

    match args.command.expect("serve command") {
        Command::Serve(serve) => {
            assert_eq!(serve.overrides.server_port, Some(8080));
            assert_eq!(serve.overrides.site_timezone.as_deref(), Some("Asia/Tokyo"));
            assert_eq!(serve.overrides.log_json, Some(true));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_migrate_and_today() {
    let args = CliArgs::parse_from(["plainblog", "migrate", "--database-url", "postgres://db"]);
    match args.command.expect("migrate command") {
        Command::Migrate(migrate) => {
            assert_eq!(migrate.database.database_url.as_deref(), Some("postgres://db"));
        }
        other => panic!("unexpected command: {other:?}"),
    }

    let args = CliArgs::parse_from(["plainblog", "today"]);
    assert!(matches!(args.command, Some(Command::Today)));
}
