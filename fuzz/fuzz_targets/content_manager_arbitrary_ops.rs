#![no_main]

use contentkit::ds::ContentKey;
use contentkit::store::ContentManager;
use contentkit::value::Value;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on ContentManager
//
// Tests random sequences of add, add_unique, using, remove and bulk removal,
// checking invariants after every step.
fuzz_target!(|data: &[u8]| {
    let mut store: ContentManager = ContentManager::new();
    let mut keys: Vec<ContentKey> = Vec::new();

    for chunk in data.chunks_exact(2) {
        let op = chunk[0] % 8;
        let arg = chunk[1];
        let value = match arg % 3 {
            0 => Value::from(i32::from(arg)),
            1 => Value::from(format!("s{}", arg % 16)),
            _ => Value::from(arg % 2 == 0),
        };

        match op {
            0 => {
                let key = store.add(value.clone(), None, None);
                assert_eq!(store.get(&key).map(|e| e.content), Some(value));
                keys.push(key);
            },
            1 => {
                let a = store.add_unique(value.clone(), None, None);
                let b = store.add_unique(value, None, None);
                assert_eq!(a, b);
                keys.push(a);
            },
            2 => {
                if let Some(key) = keys.get(arg as usize % keys.len().max(1)) {
                    store.using(key, arg % 2 == 0);
                }
            },
            3 => {
                if let Some(key) = keys.get(arg as usize % keys.len().max(1)).cloned() {
                    store.remove(std::slice::from_ref(&key));
                    assert!(!store.has_key(&key, None));
                }
            },
            4 => {
                store.remove_unusing();
            },
            5 => {
                store.remove_using();
            },
            6 => {
                store.remove_content(&value, None);
                assert!(!store.has_content(&value, None));
            },
            _ => {
                if let Some(key) = keys.get(arg as usize % keys.len().max(1)) {
                    let stored = store.get(key).is_some();
                    assert_eq!(store.update_meta(key, Some(value)), stored);
                }
            },
        }

        assert!(store.check_invariants().is_ok());
    }
});
