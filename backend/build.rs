use std::{env, fs, path::{Path, PathBuf}};

const SETTINGS_FILENAME: &str = "settings.json";

fn main() {
    println!("cargo:rerun-if-changed={SETTINGS_FILENAME}");

    if !Path::new(SETTINGS_FILENAME).exists() {
        return;
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let target_dir = out_dir
        .ancestors()
        .nth(3)
        .unwrap();

    fs::copy(SETTINGS_FILENAME, target_dir.join(SETTINGS_FILENAME))
        .expect("Failed to copy settings.json");
}
