#![no_main]

use contentkit::policy::ttl::{Ttl, TtlCache};
use contentkit::time::ManualClock;
use contentkit::value::Value;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on TtlCache with a simulated clock
//
// Tests random sequences of set, touch, increment, array helpers, clean and
// clock advances; a live entry must always be readable.
fuzz_target!(|data: &[u8]| {
    let clock = ManualClock::new(0);
    let cache = TtlCache::with_clock(clock.clone());

    for chunk in data.chunks_exact(3) {
        let op = chunk[0] % 7;
        let name = format!("n{}", chunk[1] % 8);
        let arg = u64::from(chunk[2]);

        match op {
            0 => cache.set(&name, Value::from(arg), Ttl::Seconds(arg % 20)),
            1 => cache.set(&name, Value::from(arg), Ttl::Forever),
            2 => {
                cache.touch(&name, Some(arg % 10));
            },
            3 => {
                cache.increment(&name, arg as f64);
            },
            4 => {
                cache.array_push(&name, Value::from(arg % 4));
                cache.array_without(&name, &Value::from((arg + 1) % 4));
            },
            5 => {
                cache.clean();
                assert!(cache.list().len() == cache.len());
            },
            _ => clock.advance(arg % 16),
        }

        if cache.has(&name) {
            assert!(cache.get(&name).is_some());
        }
    }
});
