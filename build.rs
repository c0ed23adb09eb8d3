fn main() {
    // Propagate the ESP-IDF build environment to dependent crates.
    // Host-target builds (tests) skip this — the espidf feature is off.
    if std::env::var("CARGO_FEATURE_ESPIDF").is_ok() {
        embuild::espidf::sysenv::output();
    }
}
