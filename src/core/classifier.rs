//! Number predicates used to build a [`ClassificationResult`].
//!
//! Negative inputs: the digit sum is taken over `|n|`, and a negative number
//! is never an Armstrong number.

use crate::domain::model::{ClassificationResult, Property, ValidatedNumber};

/// Exact integer square root: the largest `r` with `r * r <= n`.
fn isqrt(n: u64) -> u64 {
    let mut root = (n as f64).sqrt() as u64;

    // The float estimate can be off by one either way for large n.
    while root.checked_mul(root).map_or(true, |square| square > n) {
        root -= 1;
    }
    while (root + 1)
        .checked_mul(root + 1)
        .is_some_and(|square| square <= n)
    {
        root += 1;
    }

    root
}

pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    let n = n as u64;
    (3..=isqrt(n)).step_by(2).all(|divisor| n % divisor != 0)
}

pub fn is_perfect(n: i64) -> bool {
    if n < 2 {
        return false;
    }

    let n = n as u64;
    let mut divisor_sum: u128 = 1;
    for i in 2..=isqrt(n) {
        if n % i == 0 {
            divisor_sum += i as u128;
            let pair = n / i;
            if pair != i {
                divisor_sum += pair as u128;
            }
        }
    }

    divisor_sum == n as u128
}

pub fn is_armstrong(n: i64) -> bool {
    if n < 0 {
        return false;
    }

    let digits = n.unsigned_abs().to_string();
    let power = digits.len() as u32;
    let target = n as u128;

    let mut sum: u128 = 0;
    for digit in digits.bytes() {
        sum += u128::from(digit - b'0').pow(power);
        if sum > target {
            return false;
        }
    }

    sum == target
}

pub fn digit_sum(n: i64) -> u64 {
    let mut remaining = n.unsigned_abs();
    let mut sum = 0;
    while remaining > 0 {
        sum += remaining % 10;
        remaining /= 10;
    }
    sum
}

/// Parity first, then `armstrong` when it applies.
pub fn properties(n: i64) -> Vec<Property> {
    let mut properties = vec![if n % 2 == 0 {
        Property::Even
    } else {
        Property::Odd
    }];
    if is_armstrong(n) {
        properties.push(Property::Armstrong);
    }
    properties
}

pub fn classify(number: ValidatedNumber, fun_fact: String) -> ClassificationResult {
    let n = number.get();
    ClassificationResult {
        number: n,
        is_prime: is_prime(n),
        is_perfect: is_perfect(n),
        properties: properties(n),
        digit_sum: digit_sum(n),
        fun_fact,
    }
}
