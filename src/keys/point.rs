//! secp256k1 field arithmetic used to recover y from a compressed point.
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Field prime p = 2^256 - 2^32 - 977.
const FIELD_PRIME: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe, 0xff, 0xff, 0xfc, 0x2f,
];

/// Curve constant b in y^2 = x^3 + b.
const CURVE_B: u32 = 7;

pub(crate) fn field_prime() -> BigUint {
    BigUint::from_bytes_be(&FIELD_PRIME)
}

/// Computes `base^exponent mod modulus` by square-and-multiply over the exponent bits.
pub(crate) fn pow_mod(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    if modulus.is_one() {
        return BigUint::zero();
    }
    let mut result = BigUint::one();
    let mut base = base % modulus;
    for i in 0..exponent.bits() {
        if exponent.bit(i) {
            result = &result * &base % modulus;
        }
        base = &base * &base % modulus;
    }
    result
}

/// Right-hand side of the curve equation, x^3 + 7 mod p.
pub(crate) fn curve_rhs(x: &BigUint, p: &BigUint) -> BigUint {
    (x * x % p * x + CURVE_B) % p
}

/// Candidate square root of `a` mod p, valid when a is a quadratic residue.
///
/// p = 3 mod 4 so a^((p+1)/4) squares back to a for residues.
pub(crate) fn sqrt_candidate(a: &BigUint, p: &BigUint) -> BigUint {
    let exponent = (p + 1u32) >> 2u32;
    pow_mod(a, &exponent, p)
}

/// Big-endian bytes left-padded to 32.
pub(crate) fn to_be_32(n: &BigUint) -> [u8; 32] {
    let bytes = n.to_bytes_be();
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn n(v: u32) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn pow_mod_small() {
        assert_eq!(pow_mod(&n(4), &n(13), &n(497)), n(445));
        assert_eq!(pow_mod(&n(3), &n(200), &n(50)), n(1));
        assert_eq!(pow_mod(&n(2), &n(10), &n(1000)), n(24));
        assert_eq!(pow_mod(&n(7), &n(0), &n(13)), n(1));
        assert_eq!(pow_mod(&n(7), &n(5), &n(1)), n(0));
    }

    #[test]
    fn pow_mod_matches_fermat() {
        let p = field_prime();
        let a = n(123_456_789);
        assert_eq!(pow_mod(&a, &(&p - 1u32), &p), n(1));
    }

    #[test]
    fn sqrt_of_residue() {
        let p = field_prime();
        let a = curve_rhs(&n(1), &p);
        assert_eq!(a, n(8));
        let y = sqrt_candidate(&a, &p);
        assert_eq!(&y * &y % &p, a);
        // 5^3 + 7 is not a residue
        let a = curve_rhs(&n(5), &p);
        let y = sqrt_candidate(&a, &p);
        assert!(&y * &y % &p != a);
    }

    #[test]
    fn padding() {
        let mut expected = [0u8; 32];
        expected[31] = 1;
        assert_eq!(to_be_32(&n(1)), expected);
        assert_eq!(to_be_32(&field_prime()), FIELD_PRIME);
    }
}
