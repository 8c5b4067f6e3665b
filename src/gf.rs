//! Arithmetic tables for GF(256) with the QR primitive polynomial x^8 + x^4 + x^3 + x^2 + 1.

use crate::error::QrError;

struct Tables {
    exp: [u8; 256],
    log: [u8; 256],
}

const fn build_tables() -> Tables {
    let mut exp = [0u8; 256];
    let mut log = [0u8; 256];
    let mut i = 0;
    while i < 8 {
        exp[i] = 1 << i;
        i += 1;
    }
    while i < 256 {
        exp[i] = exp[i - 4] ^ exp[i - 5] ^ exp[i - 6] ^ exp[i - 8];
        i += 1;
    }
    // exp[255] wraps back to 1, so only the first 255 entries define log.
    let mut i = 0;
    while i < 255 {
        log[exp[i] as usize] = i as u8;
        i += 1;
    }
    Tables { exp, log }
}

static TABLES: Tables = build_tables();

/// Returns alpha^n. Any exponent is accepted and reduced modulo 255 first.
pub fn gexp(n: i32) -> u8 {
    TABLES.exp[n.rem_euclid(255) as usize]
}

/// Returns the discrete logarithm of `n`, failing for zero.
pub fn glog(n: u8) -> Result<u8, QrError> {
    if n < 1 {
        return Err(QrError::Domain);
    }
    Ok(TABLES.log[usize::from(n)])
}

/// Product of two field elements.
pub fn multiply(x: u8, y: u8) -> u8 {
    if x == 0 || y == 0 {
        return 0;
    }
    gexp(i32::from(TABLES.log[usize::from(x)]) + i32::from(TABLES.log[usize::from(y)]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exp_recurrence() {
        assert_eq!(gexp(0), 1);
        assert_eq!(gexp(7), 128);
        assert_eq!(gexp(8), 29);
        assert_eq!(gexp(255), 1);
        assert_eq!(gexp(-1), gexp(254));
        assert_eq!(gexp(300), gexp(45));
    }

    #[test]
    fn test_log_inverts_exp() {
        for n in 1..=255u8 {
            let l = glog(n).unwrap();
            assert_eq!(gexp(i32::from(l)), n);
        }
        assert_eq!(glog(2).unwrap(), 1);
        assert_eq!(glog(29).unwrap(), 8);
    }

    #[test]
    fn test_log_of_zero() {
        assert!(matches!(glog(0), Err(QrError::Domain)));
    }

    #[test]
    fn test_multiply() {
        assert_eq!(multiply(0, 77), 0);
        assert_eq!(multiply(1, 77), 77);
        assert_eq!(multiply(2, 128), 29);
        for x in 1..=255u8 {
            assert_eq!(multiply(x, 3), multiply(3, x));
        }
    }
}
