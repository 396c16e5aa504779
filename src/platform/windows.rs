// Windows base directories. Config and data share %APPDATA%.

use std::env;
use std::path::PathBuf;

fn roaming_appdata() -> PathBuf {
    PathBuf::from(
        env::var("APPDATA")
            .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming")),
    )
}

pub fn base_config_dir() -> PathBuf {
    roaming_appdata()
}

pub fn base_data_dir() -> PathBuf {
    roaming_appdata()
}
