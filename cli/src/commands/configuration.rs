use std::process::exit;

use timekeeper::config;

use crate::cli::{ConfigCommand, UpdateConfiguration};

fn list_and_exit() {
    println!(
        "Configuration file {}:\n",
        config::configuration_file().to_string_lossy()
    );

    match config::load_or_default() {
        Ok(config) => match config::application_config_to_string(&config) {
            Ok(toml_as_string) => println!("{toml_as_string}"),
            Err(e) => eprintln!("ERROR: Unable to render the configuration: {e}"),
        },
        Err(e) => {
            println!("Unable to read the configuration file: {e}");
        }
    }
    exit(0);
}

fn update(settings: &UpdateConfiguration) {
    let mut app_config = match config::load_or_default() {
        Ok(ac) => ac,
        Err(e) => {
            eprintln!(
                "ERROR: Unable to load or create configuration file {}, reason:{}",
                config::configuration_file().to_string_lossy(),
                e
            );
            exit(4);
        }
    };
    if let Some(timer_store) = &settings.timer_store {
        app_config.application_data.timer_store.clone_from(timer_store);
    }
    if let Some(tick_millis) = settings.tick_millis {
        app_config.display.tick_millis = tick_millis;
    }
    if let Err(e) = config::save(&app_config) {
        eprintln!("ERROR: Unable to save the application config: {e}");
        exit(4);
    }
    println!(
        "Configuration saved to {}",
        config::configuration_file().to_string_lossy()
    );
}

pub fn execute(cmd: ConfigCommand) {
    match cmd {
        ConfigCommand::List => list_and_exit(),
        ConfigCommand::Update(settings) => update(&settings),
        ConfigCommand::Remove => match config::remove() {
            Ok(()) => {
                println!(
                    "Configuration file {} removed",
                    config::configuration_file().to_string_lossy()
                );
            }
            Err(e) => {
                println!(
                    "ERROR:Unable to remove configuration file {} : {}",
                    config::configuration_file().to_string_lossy(),
                    e
                );
            }
        },
    }
}
