use afl::fuzz;
use cuit::{format, normalize, validate, CuitChecksum, CuitErrorKind, Validator};
use rand::{rngs::StdRng, Rng, SeedableRng};

#[cfg(not(feature = "manual_test"))]
fn main() {
    fuzz!(|data: &[u8]| {
        run_raw_fuzz(data);
    });
}

#[cfg(feature = "manual_test")]
fn main() {
    use std::io::{stdin, Read};

    let mut input = vec![];
    stdin().read_to_end(&mut input).unwrap();
    run_raw_fuzz(&input);
}

fn split_bytes_once(input: &[u8]) -> Option<(&[u8], &[u8])> {
    if let Some(i) = input.iter().position(|b| *b == b',') {
        Some((&input[0..i], &input[i + 1..]))
    } else {
        None
    }
}

fn run_raw_fuzz(bytes: &[u8]) -> Option<()> {
    let (input, rand_seed) = split_bytes_once(bytes)?;
    let input_str = std::str::from_utf8(input).ok()?;

    let mut rng_seed: u64 = 0;
    for i in 0..8 {
        if rand_seed.len() > i {
            rng_seed <<= 8;
            rng_seed += rand_seed[i] as u64;
        }
    }

    check_invariants(input_str);
    check_invariants(&with_random_separators(
        input_str,
        StdRng::seed_from_u64(rng_seed),
    ));
    Some(())
}

/// Sprinkles hyphens and spaces in the input, which must not change any outcome.
fn with_random_separators(input: &str, mut rng: StdRng) -> String {
    let mut output = String::new();
    for c in input.chars() {
        if rng.gen_bool(0.2) {
            output.push(if rng.gen_bool(0.5) { '-' } else { ' ' });
        }
        output.push(c);
    }
    output
}

fn check_invariants(input: &str) {
    let canonical = normalize(input);
    assert!(!canonical.contains(['-', ' ']));
    assert_eq!(normalize(&canonical), canonical);

    let result = validate(Some(input));
    if !canonical.is_empty() {
        assert_eq!(result, validate(Some(&canonical)));
    }
    assert_eq!(
        result.is_ok() && !canonical.is_empty(),
        CuitChecksum.is_valid_match(input)
    );

    let is_eleven_digits =
        canonical.len() == 11 && canonical.chars().all(|c| c.is_ascii_digit());
    if let Err(err) = result {
        assert_eq!(err.kind() == CuitErrorKind::ShapeError, !is_eleven_digits);
    }

    let formatted = format(input);
    if canonical.chars().count() == 11 {
        assert_eq!(normalize(&formatted), canonical);
    } else {
        assert_eq!(formatted, input);
    }
}
