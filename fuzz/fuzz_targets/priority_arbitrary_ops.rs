#![no_main]

use contentkit::ds::ContentKey;
use contentkit::store::Priority;
use contentkit::value::Value;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on Priority
//
// Tests random sequences of add_content, push, remove and remove_content,
// checking ordering and invariants after every step.
fuzz_target!(|data: &[u8]| {
    let mut list: Priority = Priority::new();
    let mut keys: Vec<ContentKey> = Vec::new();

    for chunk in data.chunks_exact(3) {
        let op = chunk[0] % 4;
        let priority = i64::from(chunk[1] % 16) - 8;
        let value = Value::from(i32::from(chunk[2] % 32));

        match op {
            0 => keys.push(list.add_content(value, priority, None)),
            1 => keys.push(list.push(value)),
            2 => {
                if !keys.is_empty() {
                    let key = keys.swap_remove(chunk[2] as usize % keys.len());
                    list.remove(std::slice::from_ref(&key), Some(&[priority][..]));
                }
            },
            _ => {
                list.remove_content(&value, None);
                assert!(!list.has_content(&value));
            },
        }

        let order: Vec<i64> = list
            .keys()
            .iter()
            .filter_map(|key| list.priority_of(key))
            .collect();
        assert!(order.windows(2).all(|w| w[0] <= w[1]));
        assert!(list.check_invariants().is_ok());
    }
});
