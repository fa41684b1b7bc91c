#![no_main]

use libfuzzer_sys::fuzz_target;

use docgraph::config::{Config, Patterns, Validator};

fuzz_target!(|data: &[u8]| {
    let Ok(yaml) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(mut config) = serde_yaml::from_str::<Config>(yaml) else {
        return;
    };
    let _ = Validator::new().validate(&mut config);
    let _ = Patterns::compile(&config);
});
