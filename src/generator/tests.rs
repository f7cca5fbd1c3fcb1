use super::*;

/// Random source backed by `rand::random()` that counts the bytes it hands out.
#[derive(Default)]
struct MockRandSource {
    bytes_served: usize,
}

impl RandSource for MockRandSource {
    fn fill_random(&mut self, dest: &mut [u8]) -> Result<(), RandError> {
        for e in dest.iter_mut() {
            *e = rand::random();
        }
        self.bytes_served += dest.len();
        Ok(())
    }
}

/// Random source that always fails.
struct FailingRandSource;

impl RandSource for FailingRandSource {
    fn fill_random(&mut self, _: &mut [u8]) -> Result<(), RandError> {
        Err(RandError::new("entropy pool closed", None))
    }
}

/// Random source that returns the same bytes on every call.
struct FixedRandSource([u8; 10]);

impl RandSource for FixedRandSource {
    fn fill_random(&mut self, dest: &mut [u8]) -> Result<(), RandError> {
        dest.copy_from_slice(&self.0[..dest.len()]);
        Ok(())
    }
}

/// Clock that advances by `step` milliseconds on each reading.
struct MockTimeSource {
    now: u64,
    step: u64,
}

impl TimeSource for MockTimeSource {
    fn unix_ts_ms(&mut self) -> u64 {
        let now = self.now;
        self.now += self.step;
        now
    }
}

/// Timestamp of 2112-09-03, ahead of any real clock.
const FUTURE_TS: [u8; 6] = [0x04, 0x18, 0x46, 0xe8, 0x1c, 0x98];

fn seed(tail: [u8; 10]) -> Uuid {
    let mut bytes = [0u8; 16];
    bytes[..6].copy_from_slice(&FUTURE_TS);
    bytes[6..].copy_from_slice(&tail);
    Uuid::from_bytes(bytes).unwrap()
}

fn future_ts() -> u64 {
    seed([0x70, 0, 0x80, 0, 0, 0, 0, 0, 0, 0]).unix_ts_ms()
}

/// Generates increasing UUIDs even with decreasing or constant timestamp
#[test]
fn generates_increasing_uuids_even_with_decreasing_or_constant_timestamp() {
    let ts = 0x0123_4567_89abu64;
    let mut g = V7Generator::new(MockRandSource::default());
    let mut prev = g.generate_core(ts).unwrap();
    assert_eq!(prev.as_bytes()[..6], ts.to_be_bytes()[2..]);
    for i in 0..100_000u64 {
        let curr = g.generate_core(ts - i.min(4_000)).unwrap();
        assert!(prev < curr);
        prev = curr;
    }
    assert_eq!(prev.as_bytes()[..6], ts.to_be_bytes()[2..]);
}

/// Samples fresh random bits only when the millisecond advances
#[test]
fn samples_fresh_random_bits_only_when_the_millisecond_advances() {
    let mut g = V7Generator::new(MockRandSource::default());
    g.generate_core(1_000).unwrap();
    assert_eq!(g.rand_source.bytes_served, 10);
    g.generate_core(1_000).unwrap();
    g.generate_core(999).unwrap();
    assert_eq!(g.rand_source.bytes_served, 10);
    g.generate_core(1_001).unwrap();
    assert_eq!(g.rand_source.bytes_served, 20);
}

/// Places random bytes around the version and variant bits
#[test]
fn places_random_bytes_around_the_version_and_variant_bits() {
    let rand = [0xff, 0x12, 0xff, 0x34, 0x56, 0x78, 0x9a, 0xbc, 0xde, 0xf0];
    let mut g = V7Generator::new(FixedRandSource(rand));
    let e = g.generate_core(0x0196_5347_e56d).unwrap();
    assert_eq!(
        e.get_bytes(),
        [
            0x01, 0x96, 0x53, 0x47, 0xe5, 0x6d, 0x7f, 0x12, 0xbf, 0x34, 0x56, 0x78, 0x9a, 0xbc,
            0xde, 0xf0
        ]
    );
}

/// Increments the last byte within the same millisecond
#[test]
fn increments_the_last_byte_within_the_same_millisecond() {
    let base = seed([0x70, 0x00, 0x80, 0, 0, 0, 0, 0, 0, 0x00]);
    let mut g = V7Generator::with_last(MockRandSource::default(), base);
    let e = g.generate().unwrap();

    let (expected, actual) = (base.as_bytes(), e.as_bytes());
    assert_eq!(actual[6] >> 4, 7);
    assert_eq!(actual[8] >> 6, 0b10);
    assert_eq!(actual[..15], expected[..15]);
    assert_eq!(actual[15], expected[15] + 1);
    assert_eq!(g.rand_source.bytes_served, 0);
}

/// Carries the increment across bytes and into rand_a
#[test]
fn carries_the_increment_across_bytes_and_into_rand_a() {
    let cases = [
        (
            [0x70, 0x00, 0x80, 0, 0, 0, 0, 0, 0x12, 0xff],
            [0x70, 0x00, 0x80, 0, 0, 0, 0, 0, 0x13, 0x00],
        ),
        (
            [0x70, 0x00, 0x80, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff],
            [0x70, 0x00, 0x81, 0, 0, 0, 0, 0, 0, 0],
        ),
        (
            [0x71, 0x23, 0xbf, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff],
            [0x71, 0x24, 0x80, 0, 0, 0, 0, 0, 0, 0],
        ),
        (
            [0x7e, 0xff, 0xbf, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff],
            [0x7f, 0x00, 0x80, 0, 0, 0, 0, 0, 0, 0],
        ),
    ];

    for (before, after) in cases {
        let mut g = V7Generator::with_last(MockRandSource::default(), seed(before));
        assert_eq!(g.generate_core(future_ts()), Ok(seed(after)));
    }
}

/// Fails with sequence overflow and stays saturated
#[test]
fn fails_with_sequence_overflow_and_stays_saturated() {
    let saturated = seed([0x7f, 0xff, 0xbf, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]);
    let mut g = V7Generator::with_last(MockRandSource::default(), saturated);
    assert_eq!(g.generate(), Err(GenerateError::SequenceOverflow));
    assert_eq!(g.last_generated(), saturated);
    assert_eq!(g.generate(), Err(GenerateError::SequenceOverflow));
    assert_eq!(g.last_generated(), saturated);

    // recovers once the clock passes the saturated millisecond
    let next = g.generate_core(future_ts() + 1).unwrap();
    assert!(next > saturated);
    assert_eq!(next.unix_ts_ms(), future_ts() + 1);
}

/// Reports randomness failure and leaves state unchanged
#[test]
fn reports_randomness_failure_and_leaves_state_unchanged() {
    let mut g = V7Generator::new(FailingRandSource);
    let err = g.generate_core(1_000).unwrap_err();
    assert!(matches!(err, GenerateError::RandomnessUnavailable(_)));
    assert_eq!(g.last_generated(), Uuid::MIN);

    // same-millisecond increments need no randomness
    let base = seed([0x70, 0x00, 0x80, 0, 0, 0, 0, 0, 0, 0x41]);
    let mut g = V7Generator::with_last(FailingRandSource, base);
    assert_eq!(g.generate_core(future_ts()).unwrap().as_bytes()[15], 0x42);
    assert!(g.generate_core(future_ts() + 1).is_err());
    assert_eq!(g.last_generated().as_bytes()[15], 0x42);
}

/// Uses only the lower 48 bits of the timestamp
#[test]
fn uses_only_the_lower_48_bits_of_the_timestamp() {
    let mut g = V7Generator::new(MockRandSource::default());
    let e = g.generate_core((1 << 48) | 0x0123_4567_89ab).unwrap();
    assert_eq!(e.unix_ts_ms(), 0x0123_4567_89ab);
}

/// Reads timestamps from the configured time source
#[test]
fn reads_timestamps_from_the_configured_time_source() {
    let clock = MockTimeSource {
        now: 0x0123_4567_89ab,
        step: 8,
    };
    let g = V7Generator::with_rand_and_time_sources(MockRandSource::default(), clock);
    let samples: Vec<Uuid> = g.take(4).collect::<Result<_, _>>().unwrap();
    for (i, e) in samples.iter().enumerate() {
        assert_eq!(e.unix_ts_ms(), 0x0123_4567_89ab + 8 * i as u64);
    }
    assert!(samples.windows(2).all(|w| w[0] < w[1]));
}

/// Generates up-to-date timestamp from the system clock
#[test]
fn generates_up_to_date_timestamp_from_the_system_clock() {
    let mut g = V7Generator::new(MockRandSource::default());
    for _ in 0..1_000 {
        let now = StdSystemTime.unix_ts_ms() as i64;
        let e = g.generate().unwrap();
        assert!((now - e.unix_ts_ms() as i64).abs() < 16);
    }
}

/// Reports the last generated value without consuming the generator
#[test]
fn reports_the_last_generated_value_without_consuming_the_generator() {
    let base = seed([0x70, 0x00, 0x80, 0, 0, 0, 0, 0, 0, 0x00]);
    let mut g = V7Generator::with_last(MockRandSource::default(), base);
    assert_eq!(g.last_generated(), base);

    let e = g.generate_core(future_ts()).unwrap();
    assert_eq!(g.last_generated(), e);

    let by_ref = &mut g;
    assert_eq!(by_ref.last_generated(), e);
    let f = by_ref.next().unwrap().unwrap();
    assert!(f > e);
    assert_eq!(g.last_generated(), f);
}

/// Continues a seeded state with a custom clock
#[test]
fn continues_a_seeded_state_with_a_custom_clock() {
    let base = seed([0x70, 0x00, 0x80, 0, 0, 0, 0, 0, 0, 0x00]);
    let clock = MockTimeSource {
        now: future_ts(),
        step: 0,
    };
    let mut g = V7Generator::with_sources_and_last(MockRandSource::default(), clock, base);
    assert_eq!(
        g.generate(),
        Ok(seed([0x70, 0x00, 0x80, 0, 0, 0, 0, 0, 0, 0x01]))
    );
    assert_eq!(g.rand_source.bytes_served, 0);

    let clock = MockTimeSource {
        now: future_ts() - 5,
        step: 0,
    };
    let saturated = seed([0x7f, 0xff, 0xbf, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe]);
    let mut g = V7Generator::with_sources_and_last(MockRandSource::default(), clock, saturated);
    let max_tail = g.generate().unwrap();
    assert_eq!(max_tail.rand_a(), Uuid::MAX_RAND_A);
    assert_eq!(max_tail.rand_b(), Uuid::MAX_RAND_B);
    assert_eq!(g.generate(), Err(GenerateError::SequenceOverflow));
    assert_eq!(g.last_generated(), max_tail);
}

/// Generates 70k strictly increasing values from a fixed seed within one millisecond
#[test]
fn generates_70k_strictly_increasing_values_from_a_fixed_seed_within_one_millisecond() {
    let base = seed([0x70, 0x00, 0x80, 0, 0, 0, 0, 0, 0xff, 0x00]);
    let mut g = V7Generator::with_last(MockRandSource::default(), base);
    let mut prev = base;
    for _ in 0..70_000 {
        let curr = g.generate().unwrap();
        assert!(prev < curr);
        assert_eq!(curr.unix_ts_ms(), future_ts());
        prev = curr;
    }
    assert_eq!(u128::from(prev) - u128::from(base), 70_000);
    assert_eq!(g.rand_source.bytes_served, 0);
}
