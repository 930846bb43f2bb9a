//! JWK-shaped key model for Matter identity keys.
//!
//! Symmetric and elliptic-curve keys are normalized through one record using
//! JWK field names, whatever format they arrived in: bare scalars, SEC1 or
//! PKCS#8 private keys, SPKI or raw SEC1 public points, or a raw
//! private/public pair. A key imported from a bare private scalar has its
//! public point derived before the factory returns, so every EC key leaves
//! construction usable for both signing and verification by an external
//! crypto provider.

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

pub mod der;
pub mod ec;
pub mod error;

pub use ec::{EcProvider, StandardCurves};
pub use error::Error;

use der::{BitString, EcPrivateKey, OctetString, PrivateKeyInfo, SubjectPublicKeyInfo};

// RFC 7517 - JSON Web Key (JWK)
// RFC 7518 - JSON Web Algorithms (JWA)
// RFC 5915 - Elliptic Curve Private Key Structure
// RFC 5208 - PKCS #8: Private-Key Information Syntax
// RFC 5480 - Elliptic Curve Cryptography Subject Public Key Information

const EC_UNCOMPRESSED_POINT_TAG: &[u8] = &[0x04];

/// A key in its normalized JWK projection.
///
/// Serializing produces a plain JWK attribute bag; unknown properties are
/// ignored on input and never emitted on output.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Hash, Eq)]
pub struct Key {
    #[serde(rename = "alg")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    #[serde(rename = "key_ops")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_operations: Option<Vec<String>>,
    #[serde(rename = "ext")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extractable: Option<bool>,
    #[serde(flatten)]
    pub params: Params,
}

/// Key-type specific JWK parameters, tagged by `kty`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Hash, Eq)]
#[serde(tag = "kty")]
pub enum Params {
    EC(EcParams),
    RSA(RsaParams),
    #[serde(rename = "oct")]
    Symmetric(SymmetricParams),
}

impl Drop for EcParams {
    fn drop(&mut self) {
        // Zeroize private key
        if let Some(ref mut d) = self.ecc_private_key {
            d.zeroize();
        }
    }
}

impl Drop for RsaParams {
    fn drop(&mut self) {
        // Zeroize private key fields
        if let Some(ref mut d) = self.private_exponent {
            d.zeroize();
        }
        if let Some(ref mut p) = self.first_prime_factor {
            p.zeroize();
        }
        if let Some(ref mut q) = self.second_prime_factor {
            q.zeroize();
        }
        if let Some(ref mut dp) = self.first_prime_factor_crt_exponent {
            dp.zeroize();
        }
        if let Some(ref mut dq) = self.second_prime_factor_crt_exponent {
            dq.zeroize();
        }
        if let Some(ref mut qi) = self.first_crt_coefficient {
            qi.zeroize();
        }
        if let Some(ref mut primes) = self.other_primes_info {
            for prime in primes {
                prime.zeroize();
            }
        }
    }
}

impl Drop for SymmetricParams {
    fn drop(&mut self) {
        // Zeroize symmetric key
        if let Some(ref mut k) = self.key_value {
            k.zeroize();
        }
    }
}

/// NIST curves supported for Matter identity keys.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Hash, Eq)]
pub enum EcCurve {
    #[serde(rename = "P-256")]
    P256,
    #[serde(rename = "P-384")]
    P384,
    #[serde(rename = "P-521")]
    P521,
}

impl EcCurve {
    /// Field size in bytes: the fixed width of each affine coordinate and of
    /// the private scalar.
    pub fn coordinate_length(&self) -> usize {
        match self {
            Self::P256 => 32,
            Self::P384 => 48,
            Self::P521 => 66,
        }
    }

    /// Infers the curve from the length of a scalar or coordinate.
    pub fn from_coordinate_length(len: usize) -> Result<Self, Error> {
        match len {
            32 => Ok(Self::P256),
            48 => Ok(Self::P384),
            66 => Ok(Self::P521),
            _ => Err(Error::UnknownCurve),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::P256 => "P-256",
            Self::P384 => "P-384",
            Self::P521 => "P-521",
        }
    }
}

impl std::fmt::Display for EcCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Hash, Eq, Default)]
pub struct EcParams {
    // Parameters for Elliptic Curve Public Keys
    #[serde(rename = "crv")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<EcCurve>,
    #[serde(rename = "x")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_coordinate: Option<Base64urlUInt>,
    #[serde(rename = "y")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_coordinate: Option<Base64urlUInt>,

    // Parameters for Elliptic Curve Private Keys
    #[serde(rename = "d")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecc_private_key: Option<Base64urlUInt>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Hash, Eq, Default)]
pub struct RsaParams {
    // Parameters for RSA Public Keys
    #[serde(rename = "n")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modulus: Option<Base64urlUInt>,
    #[serde(rename = "e")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exponent: Option<Base64urlUInt>,

    // Parameters for RSA Private Keys
    #[serde(rename = "d")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_exponent: Option<Base64urlUInt>,
    #[serde(rename = "p")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_prime_factor: Option<Base64urlUInt>,
    #[serde(rename = "q")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_prime_factor: Option<Base64urlUInt>,
    #[serde(rename = "dp")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_prime_factor_crt_exponent: Option<Base64urlUInt>,
    #[serde(rename = "dq")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_prime_factor_crt_exponent: Option<Base64urlUInt>,
    #[serde(rename = "qi")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_crt_coefficient: Option<Base64urlUInt>,
    #[serde(rename = "oth")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_primes_info: Option<Vec<Prime>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Hash, Eq, Default)]
pub struct SymmetricParams {
    // Parameters for Symmetric Keys
    #[serde(rename = "k")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_value: Option<Base64urlUInt>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Hash, Eq, Zeroize)]
pub struct Prime {
    #[serde(rename = "r")]
    pub prime_factor: Base64urlUInt,
    #[serde(rename = "d")]
    pub factor_crt_exponent: Base64urlUInt,
    #[serde(rename = "t")]
    pub factor_crt_coefficient: Base64urlUInt,
}

/// Binary view of a base64url-unpadded JWK string field.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Hash, Eq, Zeroize)]
#[serde(try_from = "String")]
#[serde(into = "Base64urlUIntString")]
pub struct Base64urlUInt(pub Vec<u8>);
type Base64urlUIntString = String;

impl TryFrom<String> for Base64urlUInt {
    type Error = base64::DecodeError;
    fn try_from(data: String) -> Result<Self, Self::Error> {
        Ok(Base64urlUInt(base64::decode_config(
            data,
            base64::URL_SAFE,
        )?))
    }
}

impl From<&Base64urlUInt> for String {
    fn from(data: &Base64urlUInt) -> String {
        base64::encode_config(&data.0, base64::URL_SAFE_NO_PAD)
    }
}

impl From<Base64urlUInt> for Base64urlUIntString {
    fn from(data: Base64urlUInt) -> Base64urlUIntString {
        String::from(&data)
    }
}

/// Raw public/private halves of an EC key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub public_key: Vec<u8>,
    pub private_key: Vec<u8>,
}

impl From<Params> for Key {
    fn from(params: Params) -> Self {
        Self {
            algorithm: None,
            key_operations: None,
            extractable: None,
            params,
        }
    }
}

impl Key {
    pub fn builder() -> KeyBuilder {
        KeyBuilder::default()
    }

    /// EC private key from a raw scalar; the public point is derived.
    pub fn ec_private(scalar: &[u8], provider: &impl EcProvider) -> Result<Self, Error> {
        Self::builder().private_bits(scalar.to_vec()).build(provider)
    }

    /// EC key from a raw scalar and its uncompressed public point.
    pub fn ec_pair(
        private: &[u8],
        public_point: &[u8],
        provider: &impl EcProvider,
    ) -> Result<Self, Error> {
        Self::builder()
            .pair(private.to_vec(), public_point.to_vec())
            .build(provider)
    }

    /// EC public key from an uncompressed SEC1 point.
    pub fn ec_public(point: &[u8]) -> Result<Self, Error> {
        Self::builder()
            .raw_point(point.to_vec())
            .build(&StandardCurves)
    }

    /// Symmetric key over raw bytes.
    pub fn symmetric(k: &[u8]) -> Self {
        Key::from(Params::Symmetric(SymmetricParams {
            key_value: Some(Base64urlUInt(k.to_vec())),
        }))
    }

    /// EC private key from a SEC1 (RFC 5915) DER structure.
    pub fn from_sec1_der(der: &[u8], provider: &impl EcProvider) -> Result<Self, Error> {
        Self::builder().sec1(der.to_vec()).build(provider)
    }

    /// EC private key from a PKCS#8 (RFC 5208) DER structure.
    pub fn from_pkcs8_der(der: &[u8], provider: &impl EcProvider) -> Result<Self, Error> {
        Self::builder().pkcs8(der.to_vec()).build(provider)
    }

    /// EC public key from an SPKI (RFC 5280) DER structure.
    pub fn from_spki_der(der: &[u8]) -> Result<Self, Error> {
        Self::builder().spki(der.to_vec()).build(&StandardCurves)
    }

    fn ec_params(&self) -> Option<&EcParams> {
        match &self.params {
            Params::EC(params) => Some(params),
            _ => None,
        }
    }

    pub fn curve(&self) -> Option<EcCurve> {
        self.ec_params().and_then(|params| params.curve)
    }

    /// Binary view of the `x` coordinate.
    pub fn x_bits(&self) -> Option<&[u8]> {
        self.ec_params()
            .and_then(|params| params.x_coordinate.as_ref())
            .map(|x| x.0.as_slice())
    }

    /// Binary view of the `y` coordinate.
    pub fn y_bits(&self) -> Option<&[u8]> {
        self.ec_params()
            .and_then(|params| params.y_coordinate.as_ref())
            .map(|y| y.0.as_slice())
    }

    /// Binary view of the private material: `d` for EC keys, `k` for
    /// symmetric keys.
    pub fn private_bits(&self) -> Option<&[u8]> {
        match &self.params {
            Params::EC(params) => params.ecc_private_key.as_ref().map(|d| d.0.as_slice()),
            Params::Symmetric(params) => params.key_value.as_ref().map(|k| k.0.as_slice()),
            Params::RSA(_) => None,
        }
    }

    /// Uncompressed SEC1 point `04 || X || Y`, when both coordinates are
    /// present.
    pub fn public_bits(&self) -> Option<Vec<u8>> {
        let params = self.ec_params()?;
        match (&params.x_coordinate, &params.y_coordinate) {
            (Some(x), Some(y)) => {
                Some([EC_UNCOMPRESSED_POINT_TAG, x.0.as_slice(), y.0.as_slice()].concat())
            }
            _ => None,
        }
    }

    /// As [`Key::public_bits`], but absence is an error.
    pub fn public_key(&self) -> Result<Vec<u8>, Error> {
        self.public_bits().ok_or(Error::MissingField("publicKey"))
    }

    /// As [`Key::private_bits`], but absence is an error.
    pub fn private_key(&self) -> Result<&[u8], Error> {
        self.private_bits().ok_or(Error::MissingField("privateKey"))
    }

    /// Both halves of an EC key, failing if either is absent.
    pub fn key_pair(&self) -> Result<KeyPair, Error> {
        Ok(KeyPair {
            public_key: self.public_key()?,
            private_key: self.private_key()?.to_vec(),
        })
    }

    /// Strip private key material
    pub fn to_public(&self) -> Self {
        let mut key = self.clone();
        key.params = key.params.to_public();
        key
    }

    /// Encodes the private key as a SEC1 (RFC 5915) DER structure, including
    /// the named curve and, when present, the public point.
    pub fn to_sec1_der(&self) -> Result<Vec<u8>, Error> {
        let params = self.ec_params().ok_or(Error::UnsupportedAlgorithm)?;
        let private_key = params
            .ecc_private_key
            .as_ref()
            .ok_or(Error::MissingField("privateKey"))?;
        let curve = params.curve.ok_or(Error::MissingField("crv"))?;
        let key = EcPrivateKey {
            private_key: OctetString(private_key.0.clone()),
            curve: Some(curve),
            public_key: self.public_bits().map(BitString),
        };
        simple_asn1::der_encode(&key)
    }

    /// Encodes the private key as a PKCS#8 (RFC 5208) DER structure.
    pub fn to_pkcs8_der(&self) -> Result<Vec<u8>, Error> {
        let params = self.ec_params().ok_or(Error::UnsupportedAlgorithm)?;
        let private_key = params
            .ecc_private_key
            .as_ref()
            .ok_or(Error::MissingField("privateKey"))?;
        let curve = params.curve.ok_or(Error::MissingField("crv"))?;
        let info = PrivateKeyInfo {
            curve,
            private_key: OctetString(private_key.0.clone()),
        };
        simple_asn1::der_encode(&info)
    }

    /// Encodes the public key as an SPKI (RFC 5280) DER structure.
    pub fn to_spki_der(&self) -> Result<Vec<u8>, Error> {
        let params = self.ec_params().ok_or(Error::UnsupportedAlgorithm)?;
        let curve = params.curve.ok_or(Error::MissingField("crv"))?;
        let info = SubjectPublicKeyInfo {
            curve,
            public_key: BitString(self.public_key()?),
        };
        simple_asn1::der_encode(&info)
    }
}

impl Params {
    /// Strip private key material
    pub fn to_public(&self) -> Self {
        match self {
            Self::EC(params) => Self::EC(params.to_public()),
            Self::RSA(params) => Self::RSA(params.to_public()),
            Self::Symmetric(params) => Self::Symmetric(params.to_public()),
        }
    }
}

impl EcParams {
    /// Strip private key material
    pub fn to_public(&self) -> Self {
        Self {
            curve: self.curve,
            x_coordinate: self.x_coordinate.clone(),
            y_coordinate: self.y_coordinate.clone(),
            ecc_private_key: None,
        }
    }
}

impl RsaParams {
    /// Strip private key material
    pub fn to_public(&self) -> Self {
        Self {
            modulus: self.modulus.clone(),
            exponent: self.exponent.clone(),
            private_exponent: None,
            first_prime_factor: None,
            second_prime_factor: None,
            first_prime_factor_crt_exponent: None,
            second_prime_factor_crt_exponent: None,
            first_crt_coefficient: None,
            other_primes_info: None,
        }
    }
}

impl SymmetricParams {
    /// Strip private key material
    pub fn to_public(&self) -> Self {
        Self { key_value: None }
    }
}

/// Assembles a [`Key`] from any mix of explicit fields and import formats.
///
/// Import formats are applied in a fixed order (SEC1, PKCS#8, SPKI, raw
/// public point, raw pair), each overwriting the fields it derives. After
/// imports, a missing curve is inferred from the scalar or `x` coordinate
/// length, and a missing public point is derived from the scalar through the
/// provided [`EcProvider`].
#[derive(Debug, Default)]
pub struct KeyBuilder {
    algorithm: Option<String>,
    key_operations: Option<Vec<String>>,
    extractable: Option<bool>,
    curve: Option<EcCurve>,
    private_bits: Option<Vec<u8>>,
    x_bits: Option<Vec<u8>>,
    y_bits: Option<Vec<u8>>,
    symmetric_bits: Option<Vec<u8>>,
    sec1: Option<Vec<u8>>,
    pkcs8: Option<Vec<u8>>,
    spki: Option<Vec<u8>>,
    raw_point: Option<Vec<u8>>,
    pair: Option<(Vec<u8>, Vec<u8>)>,
}

impl KeyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = Some(algorithm.into());
        self
    }

    pub fn key_operations(mut self, key_operations: Vec<String>) -> Self {
        self.key_operations = Some(key_operations);
        self
    }

    pub fn extractable(mut self, extractable: bool) -> Self {
        self.extractable = Some(extractable);
        self
    }

    pub fn curve(mut self, curve: EcCurve) -> Self {
        self.curve = Some(curve);
        self
    }

    /// Raw EC private scalar (the binary view of `d`).
    pub fn private_bits(mut self, d: Vec<u8>) -> Self {
        self.private_bits = Some(d);
        self
    }

    /// Raw `x` coordinate.
    pub fn x_bits(mut self, x: Vec<u8>) -> Self {
        self.x_bits = Some(x);
        self
    }

    /// Raw `y` coordinate.
    pub fn y_bits(mut self, y: Vec<u8>) -> Self {
        self.y_bits = Some(y);
        self
    }

    /// Raw symmetric key (the binary view of `k`). Takes precedence over any
    /// EC input.
    pub fn symmetric_bits(mut self, k: Vec<u8>) -> Self {
        self.symmetric_bits = Some(k);
        self
    }

    /// SEC1 (RFC 5915) private key DER.
    pub fn sec1(mut self, der: Vec<u8>) -> Self {
        self.sec1 = Some(der);
        self
    }

    /// PKCS#8 (RFC 5208) private key DER.
    pub fn pkcs8(mut self, der: Vec<u8>) -> Self {
        self.pkcs8 = Some(der);
        self
    }

    /// SPKI (RFC 5280) public key DER.
    pub fn spki(mut self, der: Vec<u8>) -> Self {
        self.spki = Some(der);
        self
    }

    /// Uncompressed SEC1 public point `04 || X || Y`.
    pub fn raw_point(mut self, point: Vec<u8>) -> Self {
        self.raw_point = Some(point);
        self
    }

    /// Raw private scalar and uncompressed public point.
    pub fn pair(mut self, private: Vec<u8>, public_point: Vec<u8>) -> Self {
        self.pair = Some((private, public_point));
        self
    }

    pub fn build(self, provider: &impl EcProvider) -> Result<Key, Error> {
        if let Some(k) = self.symmetric_bits {
            return Ok(Key {
                algorithm: self.algorithm,
                key_operations: self.key_operations,
                extractable: self.extractable,
                params: Params::Symmetric(SymmetricParams {
                    key_value: Some(Base64urlUInt(k)),
                }),
            });
        }

        let mut ec = EcParams {
            curve: self.curve,
            x_coordinate: self.x_bits.map(Base64urlUInt),
            y_coordinate: self.y_bits.map(Base64urlUInt),
            ecc_private_key: self.private_bits.map(Base64urlUInt),
        };

        if let Some(der) = self.sec1 {
            import_sec1(&mut ec, &der)?;
        }
        if let Some(der) = self.pkcs8 {
            import_pkcs8(&mut ec, &der)?;
        }
        if let Some(der) = self.spki {
            import_spki(&mut ec, &der)?;
        }
        if let Some(point) = self.raw_point {
            import_raw_point(&mut ec, &point)?;
        }
        if let Some((private, public_point)) = self.pair {
            ec.ecc_private_key = Some(Base64urlUInt(private));
            import_raw_point(&mut ec, &public_point)?;
        }

        if ec.curve.is_none() {
            if let Some(ref d) = ec.ecc_private_key {
                ec.curve = Some(EcCurve::from_coordinate_length(d.0.len())?);
            } else if let Some(ref x) = ec.x_coordinate {
                ec.curve = Some(EcCurve::from_coordinate_length(x.0.len())?);
            }
        }

        // Scalars and coordinates are fixed-width: shorter integer
        // representations are left-padded to the curve's field size.
        if let Some(curve) = ec.curve {
            let width = curve.coordinate_length();
            for field in [
                &mut ec.ecc_private_key,
                &mut ec.x_coordinate,
                &mut ec.y_coordinate,
            ] {
                if let Some(value) = field {
                    left_pad(value, width);
                }
            }
        }

        if ec.x_coordinate.is_none() || ec.y_coordinate.is_none() {
            if let Some(d) = ec.ecc_private_key.clone() {
                let curve = ec.curve.ok_or(Error::UnknownCurve)?;
                let (x, y) = provider.derive_public_point(curve, &d.0)?;
                ec.x_coordinate = Some(Base64urlUInt(x));
                ec.y_coordinate = Some(Base64urlUInt(y));
            }
        }

        Ok(Key {
            algorithm: self.algorithm,
            key_operations: self.key_operations,
            extractable: self.extractable,
            params: Params::EC(ec),
        })
    }
}

fn left_pad(value: &mut Base64urlUInt, width: usize) {
    if value.0.len() < width {
        let mut padded = vec![0u8; width - value.0.len()];
        padded.extend_from_slice(&value.0);
        value.0 = padded;
    }
}

fn import_sec1(params: &mut EcParams, der: &[u8]) -> Result<(), Error> {
    let key: EcPrivateKey = simple_asn1::der_decode(der)?;
    if let Some(curve) = key.curve {
        params.curve = Some(curve);
    }
    // The embedded public point is ignored; it is rederived from the scalar.
    params.ecc_private_key = Some(Base64urlUInt(key.private_key.0));
    Ok(())
}

fn import_pkcs8(params: &mut EcParams, der: &[u8]) -> Result<(), Error> {
    let info: PrivateKeyInfo = simple_asn1::der_decode(der)?;
    params.curve = Some(info.curve);
    params.ecc_private_key = Some(Base64urlUInt(info.private_key.0));
    Ok(())
}

fn import_spki(params: &mut EcParams, der: &[u8]) -> Result<(), Error> {
    let info: SubjectPublicKeyInfo = simple_asn1::der_decode(der)?;
    import_raw_point(params, &info.public_key.0)?;
    params.curve = Some(info.curve);
    Ok(())
}

fn import_raw_point(params: &mut EcParams, point: &[u8]) -> Result<(), Error> {
    match point.first() {
        Some(0x04) => {}
        Some(0x02) | Some(0x03) => return Err(Error::UnsupportedCompression),
        _ => return Err(Error::BadFormat),
    }
    if point.len() % 2 == 0 {
        return Err(Error::BadFormat);
    }
    let coordinates = &point[1..];
    let (x, y) = coordinates.split_at(coordinates.len() / 2);
    params.curve = Some(EcCurve::from_coordinate_length(x.len())?);
    params.x_coordinate = Some(Base64urlUInt(x.to_vec()));
    params.y_coordinate = Some(Base64urlUInt(y.to_vec()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const P256_GX: &str = "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296";
    const P256_GY: &str = "4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5";
    const P384_GX: &str = "aa87ca22be8b05378eb1c71ef320ad746e1d3b628ba79b9859f741e082542a385502f25dbf55296c3a545e3872760ab7";
    const P384_GY: &str = "3617de4a96262c6f5d9e98bf9292dc29f8f41dbd289a147ce9da3113b5f0b8c00a60b1ce1d7e819d7a431d7c90ea0e5f";
    const P521_GX: &str = "00c6858e06b70404e9cd9e3ecb662395b4429c648139053fb521f828af606b4d3dbaa14b5e77efe75928fe1dc127a2ffa8de3348b3c1856a429bf97e7e31c2e5bd66";
    const P521_GY: &str = "011839296a789a3bc0045c8a5fb42c7d1bd998f54449579b446817afbd17273e662c97ee72995ef42640c550b9013fad0761353c7086a272c24088be94769fd16650";

    const D_ONE: &str = "0000000000000000000000000000000000000000000000000000000000000001";

    // SEC1 structure for the P-256 scalar d = 1, with the [0] named curve
    const SEC1_P256: &str =
        "30310201010420000000000000000000000000000000000000000000000000000000000000\
         0001a00a06082a8648ce3d030107";
    // PKCS#8 wrapping of the same key
    const PKCS8_P256: &str =
        "3041020100301306072a8648ce3d020106082a8648ce3d0301070427302502010104200000\
         000000000000000000000000000000000000000000000000000000000001";
    // SPKI holding the P-256 generator point
    const SPKI_P256: &str = "3059301306072a8648ce3d020106082a8648ce3d03010703420004";

    fn unit_scalar(curve: EcCurve) -> Vec<u8> {
        let mut scalar = vec![0u8; curve.coordinate_length()];
        *scalar.last_mut().unwrap() = 1;
        scalar
    }

    fn generator(curve: EcCurve) -> (Vec<u8>, Vec<u8>) {
        let (x, y) = match curve {
            EcCurve::P256 => (P256_GX, P256_GY),
            EcCurve::P384 => (P384_GX, P384_GY),
            EcCurve::P521 => (P521_GX, P521_GY),
        };
        (hex::decode(x).unwrap(), hex::decode(y).unwrap())
    }

    fn spki_p256_der() -> Vec<u8> {
        hex::decode(format!("{SPKI_P256}{P256_GX}{P256_GY}")).unwrap()
    }

    #[test]
    fn private_scalar_derives_the_generator() {
        for curve in [EcCurve::P256, EcCurve::P384, EcCurve::P521] {
            let key = Key::ec_private(&unit_scalar(curve), &StandardCurves).unwrap();
            let (gx, gy) = generator(curve);
            assert_eq!(key.curve(), Some(curve));
            assert_eq!(key.x_bits().unwrap(), gx.as_slice());
            assert_eq!(key.y_bits().unwrap(), gy.as_slice());

            let pair = key.key_pair().unwrap();
            assert_eq!(pair.private_key, unit_scalar(curve));
            assert_eq!(pair.public_key[0], 0x04);
            assert_eq!(pair.public_key.len(), 1 + 2 * curve.coordinate_length());
        }
    }

    #[test]
    fn curve_inference_rejects_odd_lengths() {
        let key = Key::ec_private(&[1u8; 31], &StandardCurves);
        assert!(matches!(key, Err(Error::UnknownCurve)));
    }

    #[test]
    fn out_of_range_scalar_is_rejected() {
        let key = Key::ec_private(&[0xFF; 32], &StandardCurves);
        assert!(matches!(key, Err(Error::BadScalar)));
    }

    #[test]
    fn raw_point_import() {
        let (gx, gy) = generator(EcCurve::P256);
        let point = [&[0x04][..], &gx, &gy].concat();
        assert_eq!(point.len(), 65);

        let key = Key::ec_public(&point).unwrap();
        assert_eq!(key.curve(), Some(EcCurve::P256));
        assert_eq!(key.x_bits().unwrap(), gx.as_slice());
        assert_eq!(key.y_bits().unwrap(), gy.as_slice());
        assert_eq!(key.public_key().unwrap(), point);
        assert!(matches!(
            key.private_key(),
            Err(Error::MissingField("privateKey"))
        ));
    }

    #[test]
    fn raw_point_rejects_bad_leads_and_lengths() {
        assert!(matches!(
            Key::ec_public(&[0x02; 33]),
            Err(Error::UnsupportedCompression)
        ));
        assert!(matches!(
            Key::ec_public(&[0x03; 33]),
            Err(Error::UnsupportedCompression)
        ));
        assert!(matches!(Key::ec_public(&[0x05; 65]), Err(Error::BadFormat)));
        assert!(matches!(Key::ec_public(&[]), Err(Error::BadFormat)));
        // even length
        assert!(matches!(Key::ec_public(&[0x04; 64]), Err(Error::BadFormat)));
        // well-formed but no curve has 20-byte coordinates
        assert!(matches!(
            Key::ec_public(&[0x04; 41]),
            Err(Error::UnknownCurve)
        ));
    }

    #[test]
    fn sec1_import() {
        let der = hex::decode(SEC1_P256).unwrap();
        let key = Key::from_sec1_der(&der, &StandardCurves).unwrap();
        assert_eq!(key.curve(), Some(EcCurve::P256));
        assert_eq!(key.private_key().unwrap(), hex::decode(D_ONE).unwrap());
        let (gx, _) = generator(EcCurve::P256);
        assert_eq!(key.x_bits().unwrap(), gx.as_slice());
    }

    #[test]
    fn sec1_rejects_bad_version() {
        let mut der = hex::decode(SEC1_P256).unwrap();
        der[4] = 0x02; // INTEGER version value
        assert!(matches!(
            Key::from_sec1_der(&der, &StandardCurves),
            Err(Error::BadVersion)
        ));
    }

    #[test]
    fn sec1_rejects_unknown_curve_oid() {
        let mut der = hex::decode(SEC1_P256).unwrap();
        let last = der.len() - 1;
        der[last] = 0x0A; // 1.2.840.10045.3.1.10
        assert!(matches!(
            Key::from_sec1_der(&der, &StandardCurves),
            Err(Error::UnknownCurve)
        ));
    }

    #[test]
    fn pkcs8_import() {
        let der = hex::decode(PKCS8_P256).unwrap();
        let key = Key::from_pkcs8_der(&der, &StandardCurves).unwrap();
        assert_eq!(key.curve(), Some(EcCurve::P256));
        assert_eq!(key.private_key().unwrap(), hex::decode(D_ONE).unwrap());
        let (_, gy) = generator(EcCurve::P256);
        assert_eq!(key.y_bits().unwrap(), gy.as_slice());
    }

    #[test]
    fn pkcs8_rejects_foreign_algorithm() {
        // Same structure, but the AlgorithmIdentifier names rsaEncryption
        let der = hex::decode(format!(
            "3043020100301506092a864886f70d01010106082a8648ce3d0301070427302502010104\
             20{D_ONE}"
        ))
        .unwrap();
        assert!(matches!(
            Key::from_pkcs8_der(&der, &StandardCurves),
            Err(Error::UnsupportedAlgorithm)
        ));
    }

    #[test]
    fn spki_import_and_export() {
        let der = spki_p256_der();
        let key = Key::from_spki_der(&der).unwrap();
        let (gx, gy) = generator(EcCurve::P256);
        assert_eq!(key.curve(), Some(EcCurve::P256));
        assert_eq!(key.x_bits().unwrap(), gx.as_slice());
        assert_eq!(key.y_bits().unwrap(), gy.as_slice());
        assert!(key.private_bits().is_none());

        assert_eq!(key.to_spki_der().unwrap(), der);
    }

    #[test]
    fn sec1_and_pkcs8_exports_reimport_equal() {
        let key = Key::ec_private(&unit_scalar(EcCurve::P384), &StandardCurves).unwrap();

        let sec1 = key.to_sec1_der().unwrap();
        assert_eq!(Key::from_sec1_der(&sec1, &StandardCurves).unwrap(), key);

        let pkcs8 = key.to_pkcs8_der().unwrap();
        assert_eq!(Key::from_pkcs8_der(&pkcs8, &StandardCurves).unwrap(), key);
    }

    #[test]
    fn asserted_reads_on_empty_key() {
        let key = Key::builder().build(&StandardCurves).unwrap();
        assert!(matches!(
            key.public_key(),
            Err(Error::MissingField("publicKey"))
        ));
        assert!(matches!(
            key.private_key(),
            Err(Error::MissingField("privateKey"))
        ));
        assert!(matches!(key.key_pair(), Err(Error::MissingField(_))));
    }

    #[test]
    fn pair_import_keeps_both_halves() {
        let (gx, gy) = generator(EcCurve::P256);
        let point = [&[0x04][..], &gx, &gy].concat();
        let key = Key::ec_pair(&unit_scalar(EcCurve::P256), &point, &StandardCurves).unwrap();
        assert_eq!(key.curve(), Some(EcCurve::P256));
        let pair = key.key_pair().unwrap();
        assert_eq!(pair.public_key, point);
        assert_eq!(pair.private_key, unit_scalar(EcCurve::P256));
    }

    #[test]
    fn symmetric_key() {
        let key = Key::symmetric(b"0123456789abcdef");
        assert_eq!(key.private_key().unwrap(), b"0123456789abcdef");
        assert!(matches!(
            key.public_key(),
            Err(Error::MissingField("publicKey"))
        ));

        let json = serde_json::to_value(&key).unwrap();
        assert_eq!(json["kty"], "oct");
        assert_eq!(json["k"], "MDEyMzQ1Njc4OWFiY2RlZg");
    }

    #[test]
    fn to_public_strips_private_material() {
        let key = Key::ec_private(&unit_scalar(EcCurve::P256), &StandardCurves).unwrap();
        let public = key.to_public();
        assert!(public.private_bits().is_none());
        assert_eq!(public.x_bits(), key.x_bits());
        assert_eq!(public.curve(), key.curve());
    }

    #[test]
    fn jwk_json_round_trip() {
        // https://datatracker.ietf.org/doc/html/rfc7515#appendix-A.3.1
        let key: Key = serde_json::from_value(serde_json::json!({
            "kty": "EC",
            "crv": "P-256",
            "x": "f83OJ3D2xF1Bg8vub9tLe1gHMzV76e8Tus9uPHvRVEU",
            "y": "x_FEzRu9m36HLN_tue659LNpXW6pCyStikYjKIWI5a0",
            "d": "jpsQnnGQmL-YBIffH1136cspYG6-0iY7X1fCE9-E9LI",
            "kid": "example"
        }))
        .unwrap();
        assert_eq!(key.curve(), Some(EcCurve::P256));
        assert_eq!(key.x_bits().unwrap().len(), 32);
        assert_eq!(key.private_key().unwrap().len(), 32);

        // Unknown properties are dropped on output, known ones round-trip.
        let json = serde_json::to_value(&key).unwrap();
        assert!(json.get("kid").is_none());
        assert_eq!(json["crv"], "P-256");
        let back: Key = serde_json::from_value(json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn base64url_is_unpadded_out_tolerant_in() {
        let unpadded = Base64urlUInt::try_from("aGVsbG8".to_string()).unwrap();
        let padded = Base64urlUInt::try_from("aGVsbG8=".to_string()).unwrap();
        assert_eq!(unpadded.0, b"hello");
        assert_eq!(padded, unpadded);
        assert_eq!(String::from(&unpadded), "aGVsbG8");
    }

    #[test]
    fn explicit_curve_skips_inference() {
        let key = Key::builder()
            .curve(EcCurve::P384)
            .private_bits(unit_scalar(EcCurve::P384))
            .build(&StandardCurves)
            .unwrap();
        assert_eq!(key.curve(), Some(EcCurve::P384));
        let (gx, _) = generator(EcCurve::P384);
        assert_eq!(key.x_bits().unwrap(), gx.as_slice());
    }

    #[test]
    fn short_coordinates_are_left_padded() {
        let key = Key::builder()
            .curve(EcCurve::P256)
            .x_bits(vec![0xAB; 31])
            .y_bits(vec![0xCD; 31])
            .build(&StandardCurves)
            .unwrap();
        let x = key.x_bits().unwrap();
        assert_eq!(x.len(), 32);
        assert_eq!(x[0], 0x00);
        assert_eq!(x[1], 0xAB);
        assert_eq!(key.public_key().unwrap().len(), 65);

        // The JWK projection is field-width too: 32 bytes is 43 unpadded
        // base64url characters.
        let json = serde_json::to_value(&key).unwrap();
        assert_eq!(json["x"].as_str().unwrap().len(), 43);
    }

    #[test]
    fn short_scalar_is_left_padded_before_derivation() {
        let key = Key::builder()
            .curve(EcCurve::P256)
            .private_bits(vec![1])
            .build(&StandardCurves)
            .unwrap();
        assert_eq!(key.private_key().unwrap(), unit_scalar(EcCurve::P256));
        let (gx, _) = generator(EcCurve::P256);
        assert_eq!(key.x_bits().unwrap(), gx.as_slice());
    }
}
