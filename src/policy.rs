// SPDX-License-Identifier: MIT OR Apache-2.0

//! The emit/suppress decision.

use crate::config::{Config, GateMode};
use crate::severity::Severity;

/**
Decides whether a record of `severity` is emitted under `config`.

Disabled configurations emit nothing.  Otherwise the comparison depends on
[`Config::mode`]: under the default [`GateMode::ExactMatch`] a record is emitted only when its
severity *equals* the configured level, so a configuration of `INFO` emits neither `DEBUG`
nor `ERROR` records through this gate.

```
use callwise::{should_log, Config, Severity};

let config = Config::new(true, Severity::Info);
assert!(should_log(&config, Severity::Info));
assert!(!should_log(&config, Severity::Debug));
assert!(!should_log(&config, Severity::Error));
```
*/
pub fn should_log(config: &Config, severity: Severity) -> bool {
    if !config.is_enabled() {
        return false;
    }
    match config.mode() {
        GateMode::ExactMatch => severity == config.minimum_level(),
        GateMode::Threshold => severity >= config.minimum_level(),
    }
}

/// The severity for call-tracing records: DEBUG when it passes the gate, else INFO, else none.
pub(crate) fn tracing_severity(config: &Config) -> Option<Severity> {
    [Severity::Debug, Severity::Info]
        .into_iter()
        .find(|severity| should_log(config, *severity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_arch = "wasm32")]
    use wasm_bindgen_test::*;

    const ALL: [Severity; 3] = [Severity::Debug, Severity::Info, Severity::Error];

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn disabled_suppresses_everything() {
        for mode in [GateMode::ExactMatch, GateMode::Threshold] {
            for level in ALL {
                let config = Config::new(false, level).with_mode(mode);
                for severity in ALL {
                    assert!(!should_log(&config, severity));
                }
                assert_eq!(tracing_severity(&config), None);
            }
        }
    }

    // Exact match is the compatible default: INFO does not let ERROR through.
    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn exact_match_is_not_a_threshold() {
        for level in ALL {
            let config = Config::new(true, level);
            for severity in ALL {
                assert_eq!(should_log(&config, severity), severity == level);
            }
        }
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn threshold_mode_emits_at_or_above() {
        let config = Config::new(true, Severity::Info).with_mode(GateMode::Threshold);
        assert!(!should_log(&config, Severity::Debug));
        assert!(should_log(&config, Severity::Info));
        assert!(should_log(&config, Severity::Error));
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn tracing_severity_prefers_debug() {
        let exact = |level| tracing_severity(&Config::new(true, level));
        assert_eq!(exact(Severity::Debug), Some(Severity::Debug));
        assert_eq!(exact(Severity::Info), Some(Severity::Info));
        assert_eq!(exact(Severity::Error), None);

        let threshold =
            |level| tracing_severity(&Config::new(true, level).with_mode(GateMode::Threshold));
        assert_eq!(threshold(Severity::Debug), Some(Severity::Debug));
        assert_eq!(threshold(Severity::Info), Some(Severity::Info));
        assert_eq!(threshold(Severity::Error), None);
    }
}
