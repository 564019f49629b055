// build.rs

use std::env;

/// Highest level accepted by `UTILKIT_LOG_LEVEL` and the `log-level-*` features.
const MAX_LOG_LEVEL: u8 = 3;

fn main() {
    // --- 1. Determine the log level using a prioritized approach ---
    let level: u8;

    // Priority 1: Check for `log-level-*` feature flags set by Cargo.
    let mut active_levels = Vec::new();
    for (key, _) in env::vars() {
        if let Some(l) = key.strip_prefix("CARGO_FEATURE_LOG_LEVEL_")
            && let Ok(parsed) = l.parse::<u8>()
        {
            active_levels.push(parsed);
        }
    }
    active_levels.sort_unstable();

    if let Some(&lowest) = active_levels.first() {
        // A feature flag was found. This takes highest priority.
        if active_levels.len() > 1 {
            println!(
                "cargo::warning=Multiple log level features enabled ({:?}). Using the most restrictive one: {}.",
                active_levels, lowest
            );
        }
        level = lowest;
    } else if let Some(from_env) = env::var("UTILKIT_LOG_LEVEL")
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
    {
        // Priority 2: explicit level from the build environment.
        level = from_env.min(MAX_LOG_LEVEL);
    } else {
        // Priority 3: follow the build profile, debug messages only in debug builds.
        level = match env::var("PROFILE").as_deref() {
            Ok("release") => 2,
            _ => 3,
        };
    }

    // --- 2. Inform Cargo about rerun triggers ---
    println!("cargo::rerun-if-env-changed=UTILKIT_LOG_LEVEL");
    println!("cargo::rerun-if-changed=build.rs");

    // --- 3. Emit one cfg flag per enabled severity ---
    // Errors are always enabled and have no flag.
    let flags = [(1, "utilkit_log_warning"), (2, "utilkit_log_info"), (3, "utilkit_log_debug")];
    for (min_level, flag) in flags {
        println!("cargo::rustc-check-cfg=cfg({})", flag);
        if level >= min_level {
            println!("cargo::rustc-cfg={}", flag);
        }
    }

    println!("cargo::rustc-env=UTILKIT_LOG_LEVEL_EFFECTIVE={}", level);
}
