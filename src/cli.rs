use env_populate::Populate;
use std::{env, process::ExitCode};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, Populate)]
struct ConfigCustom {
    #[field(env = "ENV")]
    env: String,
    text: Text,
}

#[derive(Debug, Default, Populate)]
struct Text {
    #[field(env = "TEXT_VALUE")]
    text_value: String,
    #[field(env = "BOOL_VALUE")]
    bool_value: bool,
    #[field(env = "INT_VALUE")]
    int_value: i64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // SAFETY: no other threads exist yet
    unsafe {
        env::set_var("ENV", "dev");
        env::set_var("TEXT_VALUE", "this is text");
        env::set_var("BOOL_VALUE", true.to_string());
        env::set_var("INT_VALUE", 50.to_string());
    }

    let mut config = ConfigCustom::default();
    if let Err(err) = config.populate(true) {
        tracing::error!(var = err.var(), "{err}");
        eprintln!("{}", err.render());
        return ExitCode::FAILURE;
    }

    println!("{config:#?}");
    ExitCode::SUCCESS
}
