/// Constant for converting u64 numbers to f64s in [0,1).
/// It is the maximum value of mantissa plus one.
const F64_MANTISSA: f64 = (1u64 << f64::MANTISSA_DIGITS) as f64; // is 2^53

/// Xorshift generator, enough for picking directions.
pub struct Randf32 {
    state: u64,
}
impl Randf32 {
    pub fn new() -> Self {
        Self {
            state: 555555555,
        }
    }
    pub fn seed(seed: u64) -> Self {
        // A zero state would stay zero forever.
        Self {
            state: if seed == 0 { 555555555 } else { seed },
        }
    }
    /// Next value in [0,1).
    pub fn next(&mut self) -> f32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        ((self.state >> 11) as f64 / F64_MANTISSA) as f32
    }
}
impl Default for Randf32 {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn next_stays_in_unit_interval() {
    let mut rand = Randf32::seed(42);
    for _ in 0..1000 {
        let f = rand.next();
        assert!((0.0..1.0).contains(&f));
    }
}

#[test]
fn zero_seed_does_not_stick() {
    let mut rand = Randf32::seed(0);
    let a = rand.next();
    let b = rand.next();
    assert!(a != b);
}
