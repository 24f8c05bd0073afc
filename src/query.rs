use show_core::{EasingMode, EngineConfig};

/// Largest fleet a page URL may ask for.
pub const MAX_QUERY_COUNT: usize = 200_000;

/// Apply `?count= &seed= &speed= &flicker= &easing=` overrides to `base`.
///
/// Unknown keys are skipped silently. Bad values are skipped too and
/// reported in the returned list so the caller can log them.
pub fn apply_query(base: EngineConfig, query: &str) -> (EngineConfig, Vec<String>) {
    let mut cfg = base;
    let mut rejected = Vec::new();
    let query = query.strip_prefix('?').unwrap_or(query);

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let ok = match key {
            "count" => match value.parse::<usize>() {
                Ok(n) if (1..=MAX_QUERY_COUNT).contains(&n) => {
                    cfg.particle_count = n;
                    true
                }
                _ => false,
            },
            "seed" => match value.parse::<u64>() {
                Ok(s) => {
                    cfg.seed = Some(s);
                    true
                }
                Err(_) => false,
            },
            "speed" => match value.parse::<f32>() {
                Ok(v) if v.is_finite() && v >= 0.0 => {
                    cfg.global_speed_factor = v;
                    true
                }
                _ => false,
            },
            "flicker" => match parse_switch(value) {
                Some(on) => {
                    cfg.flicker_enabled = on;
                    true
                }
                None => false,
            },
            "easing" => match value {
                "frame" => {
                    cfg.easing = EasingMode::PerFrame;
                    true
                }
                "time" => {
                    cfg.easing = EasingMode::FrameRateIndependent;
                    true
                }
                _ => false,
            },
            _ => continue,
        };
        if !ok {
            rejected.push(format!("{key}={value}"));
        }
    }
    (cfg, rejected)
}

fn parse_switch(value: &str) -> Option<bool> {
    match value {
        "1" | "true" | "on" => Some(true),
        "0" | "false" | "off" => Some(false),
        _ => None,
    }
}
