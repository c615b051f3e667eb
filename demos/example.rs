use envbind::{Bindable, BoxError, Config, Fields};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct AppConfig {
    name: String,
    debug: bool,
    port: u16,
    data_dir: PathBuf,
    workers: Option<usize>,
}

impl Bindable for AppConfig {
    fn instantiate() -> Result<Self, BoxError> {
        Ok(Self {
            name: "demo".into(),
            debug: false,
            port: 8080,
            data_dir: PathBuf::from("./data"),
            workers: None,
        })
    }

    fn fields() -> Fields<Self> {
        Fields::<Self>::new()
            .keyed("name", "APP_NAME", |c| &mut c.name)
            .keyed("debug", "DEBUG", |c| &mut c.debug)
            .keyed("port", "PORT", |c| &mut c.port)
            .keyed("data_dir", "DATA_DIR", |c| &mut c.data_dir)
            .field("workers", |c| &mut c.workers)
    }
}

fn main() -> Result<(), envbind::BindError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let defaults = HashMap::from([
        ("APP_NAME".to_string(), "demo-from-map".to_string()),
        ("PORT".to_string(), "3000".to_string()),
    ]);

    // map defaults -> DEMO_* environment overrides
    let config: AppConfig = Config::builder()
        .with_map(defaults)
        .with_env_prefix("DEMO_")
        .build()?;

    println!("App: {} (debug={})", config.name, config.debug);
    println!("Listening on port {}", config.port);
    println!("Data dir: {}", config.data_dir.display());
    match config.workers {
        Some(n) => println!("Workers: {n}"),
        None => println!("Workers: auto"),
    }

    Ok(())
}
