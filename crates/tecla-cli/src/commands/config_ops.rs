use std::fs;

pub fn settings_export() {
    print!("{}", tecla_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        tecla_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: gesture.long_press_ms={}, labels.placeholder={:?}, layout.design={}",
        s.gesture.long_press_ms, s.labels.placeholder, s.layout.design
    );
}
