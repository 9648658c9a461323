use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn binary_text(len: usize, prob: f64) -> Vec<u8> {
    let zero = b'0';
    let one = b'1';
    let mut rng: StdRng = SeedableRng::from_seed([0; 32]);
    (0..len)
        .map(|_| if rng.gen_bool(prob) { zero } else { one })
        .collect()
}

#[allow(dead_code)] // not every bench consumes the full fan-out
pub fn binary_patterns(m: usize) -> Vec<Vec<u8>> {
    let mut patterns: Vec<Vec<u8>> = vec![Vec::new()];
    for _ in 0..m {
        patterns = patterns
            .into_iter()
            .flat_map(|p| {
                let mut zero = p.clone();
                zero.push(b'0');
                let mut one = p;
                one.push(b'1');
                vec![zero, one]
            })
            .collect();
    }
    patterns
}
