use env_populate::{FieldKind, ParseFailure, Populate, PopulateError};
use std::collections::HashMap;

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[derive(Debug, Default, PartialEq, Populate)]
struct Database {
    #[field(env = "DB_HOST")]
    host: String,
    #[field(env = "DB_PORT")]
    port: i32,
}

#[derive(Debug, Default, PartialEq, Populate)]
struct AppConfig {
    #[field(env = "APP_NAME")]
    name: String,
    database: Database,
    #[field(env = "APP_DEBUG")]
    debug: bool,
    #[field(env = "APP_RATIO")]
    ratio: f64,
    #[field(env = "APP_WORKERS")]
    workers: u32,
    untagged: String,
}

fn full_env() -> HashMap<String, String> {
    env(&[
        ("APP_NAME", "billing"),
        ("DB_HOST", "localhost"),
        ("DB_PORT", "5432"),
        ("APP_DEBUG", "false"),
        ("APP_RATIO", "0.25"),
        ("APP_WORKERS", "8"),
    ])
}

#[test]
fn test_populates_nested_struct() {
    let mut config = AppConfig {
        debug: true,
        ..Default::default()
    };
    config.populate_from(&full_env(), true).unwrap();

    assert_eq!(config.name, "billing");
    assert_eq!(config.database.host, "localhost");
    assert_eq!(config.database.port, 5432);
    assert!(!config.debug);
}

#[test]
fn test_unannotated_and_unsupported_fields_untouched() {
    let mut config = AppConfig {
        ratio: 1.5,
        workers: 2,
        untagged: "keep me".to_string(),
        ..Default::default()
    };
    config.populate_from(&full_env(), true).unwrap();

    assert_eq!(config.ratio, 1.5);
    assert_eq!(config.workers, 2);
    assert_eq!(config.untagged, "keep me");
}

#[test]
fn test_missing_with_enforcement_names_variable() {
    let mut vars = full_env();
    vars.remove("DB_HOST");

    let mut config = AppConfig::default();
    let err = config.populate_from(&vars, true).unwrap_err();

    assert!(err.is_missing());
    assert_eq!(err.var(), "DB_HOST");
    assert_eq!(err.context_path(), vec!["AppConfig.database", "Database.host"]);
}

#[test]
fn test_blank_with_enforcement_is_missing() {
    let mut vars = full_env();
    vars.insert("APP_NAME".to_string(), String::new());

    let mut config = AppConfig::default();
    let err = config.populate_from(&vars, true).unwrap_err();
    assert_eq!(
        err.root_cause(),
        &PopulateError::Missing {
            var: "APP_NAME".to_string()
        }
    );
}

#[test]
fn test_missing_string_without_enforcement_is_empty() {
    #[derive(Debug, Default, Populate)]
    struct Names {
        #[field(env = "NAMES_FIRST")]
        first: String,
    }

    let mut names = Names {
        first: "previous".to_string(),
    };
    names.populate_from(&env(&[]), false).unwrap();
    assert_eq!(names.first, "");
}

#[test]
fn test_missing_int_without_enforcement_is_parse_error() {
    let mut vars = full_env();
    vars.remove("DB_PORT");

    let mut config = AppConfig::default();
    let err = config.populate_from(&vars, false).unwrap_err();

    assert!(err.is_parse());
    assert_eq!(err.var(), "DB_PORT");
}

#[test]
fn test_missing_bool_without_enforcement_is_parse_error() {
    let mut vars = full_env();
    vars.remove("APP_DEBUG");

    let mut config = AppConfig::default();
    let err = config.populate_from(&vars, false).unwrap_err();
    match err.root_cause() {
        PopulateError::Parse {
            var,
            value,
            expected_type,
            source: ParseFailure::Bool(_),
        } => {
            assert_eq!(var, "APP_DEBUG");
            assert_eq!(value, "");
            assert_eq!(*expected_type, "bool");
        }
        other => panic!("expected bool Parse error, got {other:?}"),
    }
}

#[test]
fn test_malformed_int_is_parse_error() {
    for bad in ["abc", "12.5"] {
        let mut vars = full_env();
        vars.insert("DB_PORT".to_string(), bad.to_string());

        let mut config = AppConfig::default();
        let err = config.populate_from(&vars, true).unwrap_err();
        assert!(err.is_parse(), "{bad}");
        assert!(err.to_string().contains("to type 'i32'"));
    }
}

#[test]
fn test_malformed_bool_is_parse_error() {
    let mut vars = full_env();
    vars.insert("APP_DEBUG".to_string(), "notabool".to_string());

    let mut config = AppConfig::default();
    let err = config.populate_from(&vars, true).unwrap_err();
    assert!(err.is_parse());
    assert_eq!(err.var(), "APP_DEBUG");
}

#[test]
fn test_nested_failure_stops_trailing_fields() {
    let mut vars = full_env();
    vars.insert("DB_PORT".to_string(), "not-a-port".to_string());

    let mut config = AppConfig {
        debug: true,
        ..Default::default()
    };
    let err = config.populate_from(&vars, true).unwrap_err();

    // Earlier assignments are kept, later fields are never reached
    assert_eq!(config.name, "billing");
    assert_eq!(config.database.host, "localhost");
    assert_eq!(config.database.port, 0);
    assert!(config.debug);

    assert_eq!(
        err.to_string(),
        "in AppConfig.database: in Database.port: error parsing environment variable \
         'DB_PORT' to type 'i32': invalid digit found in string"
    );
}

#[test]
fn test_first_failure_wins() {
    let vars = env(&[]);
    let mut config = AppConfig::default();
    let err = config.populate_from(&vars, true).unwrap_err();
    assert_eq!(err.var(), "APP_NAME");
    assert_eq!(err.context_path(), vec!["AppConfig.name"]);
}

#[test]
fn test_annotation_on_nested_struct_is_ignored() {
    #[derive(Debug, Default, Populate)]
    struct Wrapper {
        #[field(env = "WRAPPER_DB")]
        database: Database,
    }

    let mut wrapper = Wrapper::default();
    wrapper
        .populate_from(&env(&[("DB_HOST", "db"), ("DB_PORT", "1")]), true)
        .unwrap();
    assert_eq!(wrapper.database.host, "db");
    assert_eq!(Wrapper::fields()[0].kind, FieldKind::Record);
}

#[test]
fn test_empty_annotation_is_skipped() {
    #[derive(Debug, Default, Populate)]
    struct Blank {
        #[field(env = "")]
        value: i32,
    }

    let mut blank = Blank { value: 9 };
    blank.populate_from(&env(&[]), true).unwrap();
    assert_eq!(blank.value, 9);
}

#[test]
fn test_raw_identifier_fields() {
    #[derive(Debug, Default, Populate)]
    struct Raw {
        #[field(env = "RAW_TYPE")]
        r#type: String,
    }

    let mut raw = Raw::default();
    let err = raw.populate_from(&env(&[]), true).unwrap_err();
    assert_eq!(err.context_path(), vec!["Raw.type"]);
    assert_eq!(Raw::fields()[0].name, "type");
}

#[test]
fn test_all_signed_widths() {
    #[derive(Debug, Default, Populate)]
    struct Widths {
        #[field(env = "W8")]
        a: i8,
        #[field(env = "W16")]
        b: i16,
        #[field(env = "W32")]
        c: i32,
        #[field(env = "W64")]
        d: i64,
        #[field(env = "W128")]
        e: i128,
        #[field(env = "WSIZE")]
        f: isize,
    }

    let vars = env(&[
        ("W8", "-8"),
        ("W16", "16"),
        ("W32", "-32"),
        ("W64", "64"),
        ("W128", "-128"),
        ("WSIZE", "+1"),
    ]);
    let mut widths = Widths::default();
    widths.populate_from(&vars, true).unwrap();
    assert_eq!(
        (widths.a, widths.b, widths.c, widths.d, widths.e, widths.f),
        (-8, 16, -32, 64, -128, 1)
    );
}

#[test]
fn test_three_levels_deep() {
    #[derive(Debug, Default, Populate)]
    struct Leaf {
        #[field(env = "DEEP_LEAF")]
        value: String,
    }

    #[derive(Debug, Default, Populate)]
    struct Middle {
        leaf: Leaf,
    }

    #[derive(Debug, Default, Populate)]
    struct Root {
        middle: Middle,
    }

    let mut root = Root::default();
    let err = root.populate_from(&env(&[]), true).unwrap_err();
    assert_eq!(
        err.context_path(),
        vec!["Root.middle", "Middle.leaf", "Leaf.value"]
    );

    root.populate_from(&env(&[("DEEP_LEAF", "found")]), true)
        .unwrap();
    assert_eq!(root.middle.leaf.value, "found");
}

#[test]
fn test_fields_table_in_declaration_order() {
    let fields = AppConfig::fields();
    let names: Vec<_> = fields.iter().map(|field| field.name).collect();
    assert_eq!(
        names,
        vec!["name", "database", "debug", "ratio", "workers", "untagged"]
    );

    let kinds: Vec<_> = fields.iter().map(|field| field.kind).collect();
    assert_eq!(
        kinds,
        vec![
            FieldKind::String,
            FieldKind::Record,
            FieldKind::Bool,
            FieldKind::Unsupported,
            FieldKind::Unsupported,
            FieldKind::String,
        ]
    );
    assert_eq!(fields[5].env, None);
    assert_eq!(fields[1].nested, Database::fields());
}
