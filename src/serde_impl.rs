//! Text encoding of scalar values.
//!
//! Scalars leave the crate as decimal strings: encapsulation masks, key
//! fingerprints and generated keywords are all printed this way so they can
//! travel inside serde-serialized records without precision loss.
//!
//! # Example
//!
//! ```rust
//! use edgematch::{serde_impl::decimal, Fr};
//!
//! let x = Fr::from(1234567u64);
//! let text = decimal::to_string(&x);
//! assert_eq!(text, "1234567");
//! assert_eq!(decimal::from_str::<Fr>(&text).unwrap(), x);
//! ```

pub mod decimal {
    use num_bigint::BigUint;

    use crate::{BackendError, FieldElement};

    /// Formats a scalar as its canonical decimal value.
    pub fn to_string<F: FieldElement>(value: &F) -> String {
        BigUint::from_bytes_be(value.to_repr().as_ref()).to_str_radix(10)
    }

    /// Parses a decimal string back into a scalar.
    ///
    /// Fails for non-digits, for values that do not fit the representation
    /// and for values not reduced modulo the field order.
    pub fn from_str<F: FieldElement>(text: &str) -> Result<F, BackendError> {
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BackendError::Serialization("expected a decimal integer"));
        }
        let value = BigUint::parse_bytes(text.as_bytes(), 10)
            .ok_or(BackendError::Serialization("expected a decimal integer"))?;
        let bytes = value.to_bytes_be();

        let mut repr = F::zero().to_repr();
        let dst = repr.as_mut();
        if bytes.len() > dst.len() {
            return Err(BackendError::Serialization("scalar too large"));
        }
        let offset = dst.len() - bytes.len();
        dst[offset..].copy_from_slice(&bytes);
        F::from_repr(&repr)
    }
}
