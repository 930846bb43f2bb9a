//! Public-point derivation on the NIST curves.
//!
//! Signing and key agreement stay with the caller's crypto provider; the key
//! model only needs `Q = d·G` to complete a key imported from a bare scalar.
//! The provider is passed explicitly at construction time, so embedded
//! targets can substitute a hardware-backed implementation.

use crate::{EcCurve, Error};

/// Derives public points from private scalars.
pub trait EcProvider {
    /// Computes `Q = d·G` on `curve`, returning the affine coordinates as
    /// fixed-width big-endian arrays of the curve's field size.
    ///
    /// The scalar must satisfy `0 < d < n`; anything else fails with
    /// [`Error::BadScalar`].
    fn derive_public_point(
        &self,
        curve: EcCurve,
        scalar: &[u8],
    ) -> Result<(Vec<u8>, Vec<u8>), Error>;
}

/// [`EcProvider`] backed by the pure-Rust NIST curve implementations.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCurves;

impl EcProvider for StandardCurves {
    fn derive_public_point(
        &self,
        curve: EcCurve,
        scalar: &[u8],
    ) -> Result<(Vec<u8>, Vec<u8>), Error> {
        match curve {
            EcCurve::P256 => p256_public_point(scalar),
            EcCurve::P384 => p384_public_point(scalar),
            EcCurve::P521 => p521_public_point(scalar),
        }
    }
}

fn p256_public_point(scalar: &[u8]) -> Result<(Vec<u8>, Vec<u8>), Error> {
    use p256::elliptic_curve::sec1::ToEncodedPoint;
    let secret_key = p256::SecretKey::from_slice(scalar).map_err(|_| Error::BadScalar)?;
    let encoded_point = secret_key.public_key().to_encoded_point(false);
    let x = encoded_point.x().ok_or(Error::BadScalar)?;
    let y = encoded_point.y().ok_or(Error::BadScalar)?;
    Ok((x.to_vec(), y.to_vec()))
}

fn p384_public_point(scalar: &[u8]) -> Result<(Vec<u8>, Vec<u8>), Error> {
    use p384::elliptic_curve::sec1::ToEncodedPoint;
    let secret_key = p384::SecretKey::from_slice(scalar).map_err(|_| Error::BadScalar)?;
    let encoded_point = secret_key.public_key().to_encoded_point(false);
    let x = encoded_point.x().ok_or(Error::BadScalar)?;
    let y = encoded_point.y().ok_or(Error::BadScalar)?;
    Ok((x.to_vec(), y.to_vec()))
}

fn p521_public_point(scalar: &[u8]) -> Result<(Vec<u8>, Vec<u8>), Error> {
    use p521::elliptic_curve::sec1::ToEncodedPoint;
    let secret_key = p521::SecretKey::from_slice(scalar).map_err(|_| Error::BadScalar)?;
    let encoded_point = secret_key.public_key().to_encoded_point(false);
    let x = encoded_point.x().ok_or(Error::BadScalar)?;
    let y = encoded_point.y().ok_or(Error::BadScalar)?;
    Ok((x.to_vec(), y.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_scalar_is_rejected() {
        for curve in [EcCurve::P256, EcCurve::P384, EcCurve::P521] {
            let zero = vec![0u8; curve.coordinate_length()];
            assert!(matches!(
                StandardCurves.derive_public_point(curve, &zero),
                Err(Error::BadScalar)
            ));
        }
    }

    #[test]
    fn coordinates_have_the_field_width() {
        for curve in [EcCurve::P256, EcCurve::P384, EcCurve::P521] {
            let mut scalar = vec![0u8; curve.coordinate_length()];
            if let Some(last) = scalar.last_mut() {
                *last = 2;
            }
            let (x, y) = StandardCurves.derive_public_point(curve, &scalar).unwrap();
            assert_eq!(x.len(), curve.coordinate_length());
            assert_eq!(y.len(), curve.coordinate_length());
        }
    }
}
