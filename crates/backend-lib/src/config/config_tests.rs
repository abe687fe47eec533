use super::*;
use figment::Jail;

#[test]
fn test_defaults_are_valid() {
    let settings = Settings::default();
    assert!(settings.validate().is_ok());
    assert_eq!(settings.bind_addr.to_string(), "127.0.0.1:3000");
    assert!(!settings.debug);
    assert!(!settings.auth.reveal_unknown_user);
    assert_eq!(settings.password_requirements.min_length, 1);
}

#[test]
fn test_settings_validation() {
    let settings = Settings::default();

    let mut invalid = settings.clone();
    invalid.log_level = "loud".to_string();
    assert!(invalid.validate().is_err());

    let mut invalid = settings.clone();
    invalid.password_requirements.min_length = 0;
    assert!(invalid.validate().is_err());

    let mut invalid = settings.clone();
    invalid.hashing.r = 0;
    assert!(invalid.validate().is_err());

    let mut invalid = settings.clone();
    invalid.auth.max_failed_attempts = 0;
    assert!(invalid.validate().is_err());

    let mut upper = settings;
    upper.log_level = "DEBUG".to_string();
    assert!(upper.validate().is_ok());
}

#[test]
fn test_load_without_file_uses_defaults() {
    Jail::expect_with(|_jail| {
        let settings = Settings::load().map_err(|e| e.to_string())?;
        assert_eq!(settings, Settings::default());
        Ok(())
    });
}

#[test]
fn test_load_settings() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "login.toml",
            r#"
            bind_addr = "0.0.0.0:8080"
            data_dir = "test_data"
            log_level = "debug"
            debug = true

            [password_requirements]
            min_length = 12
            require_digit = true

            [hashing]
            log_n = 10

            [auth]
            lockout_secs = 30
            "#,
        )?;

        // Environment variables take precedence over the file
        jail.set_env("LOGIN_LOG_LEVEL", "warn");
        jail.set_env("LOGIN_AUTH__REVEAL_UNKNOWN_USER", "true");

        let settings = Settings::load().map_err(|e| e.to_string())?;
        assert_eq!(settings.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(settings.data_dir, PathBuf::from("test_data"));
        assert_eq!(settings.log_level, "warn");
        assert!(settings.debug);
        assert_eq!(settings.password_requirements.min_length, 12);
        assert!(settings.password_requirements.require_digit);
        assert!(!settings.password_requirements.require_special);
        assert_eq!(settings.hashing.log_n, 10);
        assert_eq!(settings.hashing.r, 8);
        assert_eq!(settings.auth.lockout_secs, 30);
        assert_eq!(settings.auth.max_failed_attempts, 5);
        assert!(settings.auth.reveal_unknown_user);
        Ok(())
    });
}

#[test]
fn test_load_from_explicit_path() {
    Jail::expect_with(|jail| {
        jail.create_file("custom.toml", r#"log_level = "error""#)?;

        let settings = Settings::load_from("custom.toml").map_err(|e| e.to_string())?;
        assert_eq!(settings.log_level, "error");
        Ok(())
    });
}

#[test]
fn test_load_rejects_invalid_file() {
    Jail::expect_with(|jail| {
        jail.create_file("login.toml", r#"log_level = "chatty""#)?;

        assert!(Settings::load().is_err());
        Ok(())
    });
}
