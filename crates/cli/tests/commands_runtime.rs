use std::env;
use std::sync::{Mutex, OnceLock};

use rolodex_cli::commands::{config, doctor, migrate, seed};
use serde_json::Value;

#[test]
fn migrate_returns_success_with_valid_env() {
    with_env(&[("ROLODEX_DATABASE_URL", "sqlite::memory:")], || {
        let result = migrate::run();
        assert_eq!(result.exit_code, 0, "expected successful migrate run");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "migrate");
        assert_eq!(payload["status"], "ok");
    });
}

#[test]
fn migrate_reports_config_failure_for_invalid_database_url() {
    with_env(&[("ROLODEX_DATABASE_URL", "postgres://cluster/rolodex")], || {
        let result = migrate::run();
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "migrate");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn seed_returns_success_with_valid_env() {
    with_env(&[("ROLODEX_DATABASE_URL", "sqlite::memory:")], || {
        let result = seed::run();
        assert_eq!(result.exit_code, 0, "expected successful seed run");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "seed");
        assert_eq!(payload["status"], "ok");
    });
}

#[test]
fn seed_returns_deterministic_customer_summary() {
    with_env(&[("ROLODEX_DATABASE_URL", "sqlite::memory:")], || {
        let result = seed::run();
        assert_eq!(result.exit_code, 0, "expected deterministic seed success");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "seed");
        assert_eq!(payload["status"], "ok");

        let message = payload["message"].as_str().unwrap_or("");
        assert!(message.contains("demo customer fixtures loaded:"));
        assert!(message.contains("  - 1: John Doe"));
        assert!(message.contains("  - 2: Jane Doe"));
        assert!(message.contains("  - 3: Alex Smith"));
    });
}

#[test]
fn seed_is_idempotent_across_runs() {
    with_env(&[("ROLODEX_DATABASE_URL", "sqlite::memory:")], || {
        let first = seed::run();
        assert_eq!(first.exit_code, 0, "expected first seed invocation success");
        let first_payload = parse_payload(&first.output);
        assert_eq!(first_payload["command"], "seed");
        assert_eq!(first_payload["status"], "ok");

        let second = seed::run();
        assert_eq!(second.exit_code, 0, "expected second seed invocation success");
        let second_payload = parse_payload(&second.output);
        assert_eq!(second_payload["command"], "seed");
        assert_eq!(second_payload["status"], "ok");

        assert_eq!(first_payload["message"], second_payload["message"]);
    });
}

#[test]
fn doctor_json_reports_all_checks_passing() {
    with_env(&[("ROLODEX_DATABASE_URL", "sqlite::memory:")], || {
        let output = doctor::run(true);

        let payload: Value =
            serde_json::from_str(&output).expect("doctor output should be valid JSON");
        assert_eq!(payload["overall_status"], "pass");

        let checks = payload["checks"].as_array().expect("checks array");
        assert_eq!(checks.len(), 2);
        assert!(checks.iter().all(|check| check["status"] == "pass"));
    });
}

#[test]
fn doctor_skips_database_check_when_config_invalid() {
    with_env(&[("ROLODEX_SERVER_PORT", "not-a-port")], || {
        let output = doctor::run(true);

        let payload: Value =
            serde_json::from_str(&output).expect("doctor output should be valid JSON");
        assert_eq!(payload["overall_status"], "fail");
        assert_eq!(payload["checks"][0]["name"], "config_validation");
        assert_eq!(payload["checks"][0]["status"], "fail");
        assert_eq!(payload["checks"][1]["name"], "database_connectivity");
        assert_eq!(payload["checks"][1]["status"], "skipped");
    });
}

#[test]
fn doctor_human_output_marks_unreachable_database() {
    with_env(
        &[
            ("ROLODEX_DATABASE_URL", "sqlite:///nonexistent/rolodex/data.db"),
            ("ROLODEX_DATABASE_TIMEOUT_SECS", "1"),
        ],
        || {
            let output = doctor::run(false);

            assert!(output.contains("doctor: one or more readiness checks failed"));
            assert!(output.contains("- [ok] config_validation"));
            assert!(output.contains("- [fail] database_connectivity"));
        },
    );
}

#[test]
fn config_reports_source_attribution_for_env_overrides() {
    with_env(
        &[("ROLODEX_DATABASE_URL", "sqlite::memory:"), ("ROLODEX_SERVER_PORT", "9090")],
        || {
            let output = config::run();

            assert!(output.contains("effective config (source precedence: env > file > default):"));
            assert!(output
                .contains("- database.url = sqlite::memory: (source: env (ROLODEX_DATABASE_URL))"));
            assert!(output.contains("- server.port = 9090 (source: env (ROLODEX_SERVER_PORT))"));
            assert!(output.contains("- logging.level = info (source: default)"));
            assert!(output.contains("- logging.format = Compact (source: default)"));
        },
    );
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "ROLODEX_DATABASE_URL",
        "ROLODEX_DATABASE_MAX_CONNECTIONS",
        "ROLODEX_DATABASE_TIMEOUT_SECS",
        "ROLODEX_SERVER_BIND_ADDRESS",
        "ROLODEX_SERVER_PORT",
        "ROLODEX_LOGGING_LEVEL",
        "ROLODEX_LOGGING_FORMAT",
        "ROLODEX_LOG_LEVEL",
        "ROLODEX_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
