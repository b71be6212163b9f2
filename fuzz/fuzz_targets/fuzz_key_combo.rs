#![no_main]

use applock_core::KeyCombo;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Parsing arbitrary text should never panic
    if let Ok(combo) = text.parse::<KeyCombo>() {
        assert!(combo.ctrl || combo.alt);

        // Canonical form parses back to the same combo
        let canonical = combo.to_string();
        let reparsed: KeyCombo = canonical.parse().unwrap();
        assert_eq!(combo, reparsed);
        assert_eq!(canonical, reparsed.to_string());
    }
});
