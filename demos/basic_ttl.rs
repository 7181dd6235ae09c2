//! TtlCache walkthrough on a simulated clock.
//!
//! Run with: cargo run --example basic_ttl

use contentkit::builder::CacheBuilder;
use contentkit::policy::ttl::Ttl;
use contentkit::time::ManualClock;
use contentkit::value::Value;

fn main() {
    println!("=== TtlCache ===\n");

    let clock = ManualClock::new(0);
    let cache = CacheBuilder::new()
        .default_ttl(Ttl::TINY)
        .clean_interval(30)
        .build_with_clock(clock.clone());

    cache.set("session", Value::from("abc123"), Ttl::Seconds(30));
    cache.set("config", Value::from("v1"), Ttl::Forever);
    cache.increment("visits", 1.0);
    cache.increment("visits", 1.0);
    cache.array_push("recent", Value::from("/home"));
    cache.array_push("recent", Value::from("/about"));

    println!("   live names: {:?}", cache.list());
    println!("   visits: {:?}", cache.get("visits"));
    println!("   recent: {:?}", cache.get("recent"));

    clock.advance(20);
    cache.touch("session", Some(30));
    clock.advance(20);
    println!("   session after touch + 40s? {}", cache.has("session"));

    clock.advance(3600);
    println!("   swept {} expired entries", cache.clean());
    println!("   remaining: {:?}", cache.list());
}
