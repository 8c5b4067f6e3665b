//! Polynomials over GF(256), highest degree coefficient first.

use crate::error::QrError;
use crate::gf::{gexp, glog};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynomial {
    coeffs: Vec<u8>,
}

impl Polynomial {
    /// Builds a polynomial from `coeffs`, dropping leading zeros and then
    /// multiplying by x^`shift`.
    pub fn new(coeffs: &[u8], shift: usize) -> Self {
        let start = coeffs.iter().position(|&c| c != 0).unwrap_or(coeffs.len());
        let mut result = Vec::with_capacity(coeffs.len() - start + shift);
        result.extend_from_slice(&coeffs[start..]);
        result.resize(result.len() + shift, 0);
        Self { coeffs: result }
    }

    /// The Reed-Solomon generator of the given degree: the product of (x - alpha^i)
    /// for i in 0..degree.
    pub fn generator(degree: usize) -> Result<Self, QrError> {
        let mut result = Polynomial::new(&[1], 0);
        for i in 0..degree {
            result = result.multiply(&Polynomial::new(&[1, gexp(i as i32)], 0))?;
        }
        Ok(result)
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn get(&self, index: usize) -> u8 {
        self.coeffs[index]
    }

    pub fn coefficients(&self) -> &[u8] {
        &self.coeffs
    }

    pub fn multiply(&self, other: &Polynomial) -> Result<Self, QrError> {
        if self.is_empty() || other.is_empty() {
            return Ok(Polynomial::new(&[], 0));
        }
        let mut num = vec![0u8; self.len() + other.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            if a == 0 {
                continue;
            }
            let loga = i32::from(glog(a)?);
            for (j, &b) in other.coeffs.iter().enumerate() {
                if b == 0 {
                    continue;
                }
                num[i + j] ^= gexp(loga + i32::from(glog(b)?));
            }
        }
        Ok(Polynomial::new(&num, 0))
    }

    /// Remainder of `self` divided by `divisor`.
    pub fn modulo(&self, divisor: &Polynomial) -> Result<Self, QrError> {
        let mut num: Vec<u8> = self.coeffs.clone();
        if divisor.is_empty() {
            return Err(QrError::Domain);
        }
        let divisor_lead = i32::from(glog(divisor.get(0))?);
        let mut start = num.iter().position(|&c| c != 0).unwrap_or(num.len());
        while num.len() - start >= divisor.len() {
            let ratio = i32::from(glog(num[start])?) - divisor_lead;
            for (i, &d) in divisor.coeffs.iter().enumerate() {
                if d != 0 {
                    num[start + i] ^= gexp(i32::from(glog(d)?) + ratio);
                }
            }
            while start < num.len() && num[start] == 0 {
                start += 1;
            }
        }
        Ok(Polynomial::new(&num[start..], 0))
    }
}
