//! DER (Distinguished Encoding Rules) structures for EC keys
//!
//! This module provides the DER key structures consumed and produced by the
//! key model, with their [ASN.1] (de)serialization using [simple_asn1]:
//! SEC1 private keys ([RFC 5915]), PKCS#8 private-key info ([RFC 5208])
//! restricted to the `ecPublicKey` algorithm ([RFC 5480]), and subject
//! public key info ([RFC 5280]).
//!
//! [ASN.1]: https://www.iso.org/standard/81420.html "ISO/IEC 8825-1:2021"
//! [simple_asn1]: https://crates.io/crates/simple_asn1
//! [RFC 5915]: https://datatracker.ietf.org/doc/html/rfc5915
//! [RFC 5208]: https://datatracker.ietf.org/doc/html/rfc5208
//! [RFC 5480]: https://datatracker.ietf.org/doc/html/rfc5480
//! [RFC 5280]: https://datatracker.ietf.org/doc/html/rfc5280

use num_bigint::BigInt;
use simple_asn1::{
    der_encode, ASN1Block, ASN1Class, BigUint, FromASN1, ToASN1, OID,
};

use crate::{EcCurve, Error};

/// An octetstring from [ASN.1][ITU X.690]
///
/// [ITU X.690]: https://www.itu.int/rec/T-REC-X.690-202102-I/en
#[derive(Debug, Clone)]
pub struct OctetString(pub Vec<u8>);

/// A bitstring from [ASN.1][ITU X.690]
///
/// Note: only byte-aligned bitstrings are supported.
///
/// [ITU X.690]: https://www.itu.int/rec/T-REC-X.690-202102-I/en
#[derive(Debug, Clone)]
pub struct BitString(pub Vec<u8>);

// id-ecPublicKey 1.2.840.10045.2.1
fn ec_public_key_oid() -> OID {
    OID::new(vec![
        BigUint::new(vec![1]),
        BigUint::new(vec![2]),
        BigUint::new(vec![840]),
        BigUint::new(vec![10045]),
        BigUint::new(vec![2]),
        BigUint::new(vec![1]),
    ])
}

/// The named-curve OID for `curve`: prime256v1, secp384r1 or secp521r1.
pub(crate) fn curve_oid(curve: EcCurve) -> OID {
    match curve {
        // 1.2.840.10045.3.1.7
        EcCurve::P256 => OID::new(vec![
            BigUint::new(vec![1]),
            BigUint::new(vec![2]),
            BigUint::new(vec![840]),
            BigUint::new(vec![10045]),
            BigUint::new(vec![3]),
            BigUint::new(vec![1]),
            BigUint::new(vec![7]),
        ]),
        // 1.3.132.0.34
        EcCurve::P384 => OID::new(vec![
            BigUint::new(vec![1]),
            BigUint::new(vec![3]),
            BigUint::new(vec![132]),
            BigUint::new(vec![0]),
            BigUint::new(vec![34]),
        ]),
        // 1.3.132.0.35
        EcCurve::P521 => OID::new(vec![
            BigUint::new(vec![1]),
            BigUint::new(vec![3]),
            BigUint::new(vec![132]),
            BigUint::new(vec![0]),
            BigUint::new(vec![35]),
        ]),
    }
}

pub(crate) fn curve_from_oid(oid: &OID) -> Result<EcCurve, Error> {
    for curve in [EcCurve::P256, EcCurve::P384, EcCurve::P521] {
        if *oid == curve_oid(curve) {
            return Ok(curve);
        }
    }
    Err(Error::UnknownCurve)
}

/// `AlgorithmIdentifier { id-ecPublicKey, namedCurve }`, shared by PKCS#8 and
/// SPKI.
fn algorithm_identifier(curve: EcCurve) -> ASN1Block {
    ASN1Block::Sequence(
        0,
        vec![
            ASN1Block::ObjectIdentifier(0, ec_public_key_oid()),
            ASN1Block::ObjectIdentifier(0, curve_oid(curve)),
        ],
    )
}

fn algorithm_curve(blocks: &[ASN1Block]) -> Result<EcCurve, Error> {
    let (algorithm, parameters) = match blocks {
        [ASN1Block::ObjectIdentifier(_, algorithm), ASN1Block::ObjectIdentifier(_, parameters)] => {
            (algorithm, parameters)
        }
        _ => return Err(Error::BadFormat),
    };
    if *algorithm != ec_public_key_oid() {
        return Err(Error::UnsupportedAlgorithm);
    }
    curve_from_oid(parameters)
}

/// Decodes a context-tagged member of a SEQUENCE, returning its single inner
/// block.
fn context_tagged(block: &ASN1Block, expected_tag: u8) -> Result<Option<ASN1Block>, Error> {
    match block {
        ASN1Block::Explicit(ASN1Class::ContextSpecific, _, tag, inner)
            if *tag == BigUint::new(vec![expected_tag as u32]) =>
        {
            Ok(Some(inner.as_ref().clone()))
        }
        ASN1Block::Unknown(ASN1Class::ContextSpecific, _, _, tag, contents)
            if *tag == BigUint::new(vec![expected_tag as u32]) =>
        {
            let mut inner = simple_asn1::from_der(contents)?;
            match inner.len() {
                1 => Ok(inner.pop()),
                _ => Err(Error::BadFormat),
            }
        }
        _ => Ok(None),
    }
}

/// EC private key structure, as specified in [RFC 5915].
///
/// The optional `[1]` public point is carried through decoding but the key
/// model does not trust it; the point is recomputed from the scalar.
///
/// [RFC 5915]: https://datatracker.ietf.org/doc/html/rfc5915#section-3 "RFC 5915 Elliptic Curve Private Key Structure - 3. Elliptic Curve Private Key Format"
#[derive(Debug, Clone)]
pub struct EcPrivateKey {
    pub private_key: OctetString,
    pub curve: Option<EcCurve>,
    pub public_key: Option<BitString>,
}

impl FromASN1 for EcPrivateKey {
    type Error = Error;
    fn from_asn1(v: &[ASN1Block]) -> Result<(Self, &[ASN1Block]), Self::Error> {
        let items = match v {
            [ASN1Block::Sequence(_, items)] => items,
            _ => return Err(Error::BadFormat),
        };
        let (version, private_key) = match items.as_slice() {
            [ASN1Block::Integer(_, version), ASN1Block::OctetString(_, private_key), ..] => {
                (version, private_key)
            }
            _ => return Err(Error::BadFormat),
        };
        if *version != BigInt::from(1) {
            return Err(Error::BadVersion);
        }

        let mut curve = None;
        let mut public_key = None;
        for block in &items[2..] {
            if let Some(inner) = context_tagged(block, 0)? {
                match inner {
                    ASN1Block::ObjectIdentifier(_, oid) => curve = Some(curve_from_oid(&oid)?),
                    _ => return Err(Error::BadFormat),
                }
            } else if let Some(inner) = context_tagged(block, 1)? {
                match inner {
                    ASN1Block::BitString(_, _, bits) => public_key = Some(BitString(bits)),
                    _ => return Err(Error::BadFormat),
                }
            } else {
                return Err(Error::BadFormat);
            }
        }

        Ok((
            Self {
                private_key: OctetString(private_key.clone()),
                curve,
                public_key,
            },
            &[],
        ))
    }
}

impl ToASN1 for EcPrivateKey {
    type Error = Error;
    fn to_asn1_class(&self, _class: ASN1Class) -> Result<Vec<ASN1Block>, Self::Error> {
        let mut items = vec![
            ASN1Block::Integer(0, BigInt::from(1)),
            ASN1Block::OctetString(0, self.private_key.0.clone()),
        ];
        if let Some(curve) = self.curve {
            items.push(ASN1Block::Explicit(
                ASN1Class::ContextSpecific,
                0,
                BigUint::new(vec![0]),
                Box::new(ASN1Block::ObjectIdentifier(0, curve_oid(curve))),
            ));
        }
        if let Some(ref public_key) = self.public_key {
            items.push(ASN1Block::Explicit(
                ASN1Class::ContextSpecific,
                0,
                BigUint::new(vec![1]),
                Box::new(ASN1Block::BitString(
                    0,
                    public_key.0.len() * 8,
                    public_key.0.clone(),
                )),
            ));
        }
        Ok(vec![ASN1Block::Sequence(0, items)])
    }
}

/// PKCS#8 private-key info restricted to EC keys, as specified in [RFC 5208].
///
/// The inner octet string wraps a SEC1 [`EcPrivateKey`] without curve
/// parameters; the curve is named by the outer `AlgorithmIdentifier`.
///
/// [RFC 5208]: https://datatracker.ietf.org/doc/html/rfc5208#section-5 "RFC 5208 PKCS #8 - 5. Private-Key Information Syntax"
#[derive(Debug, Clone)]
pub struct PrivateKeyInfo {
    pub curve: EcCurve,
    pub private_key: OctetString,
}

impl FromASN1 for PrivateKeyInfo {
    type Error = Error;
    fn from_asn1(v: &[ASN1Block]) -> Result<(Self, &[ASN1Block]), Self::Error> {
        let items = match v {
            [ASN1Block::Sequence(_, items)] => items,
            _ => return Err(Error::BadFormat),
        };
        let (version, algorithm, key_octets) = match items.as_slice() {
            [ASN1Block::Integer(_, version), ASN1Block::Sequence(_, algorithm), ASN1Block::OctetString(_, key_octets), ..] => {
                (version, algorithm, key_octets)
            }
            _ => return Err(Error::BadFormat),
        };
        if *version != BigInt::from(0) {
            return Err(Error::BadVersion);
        }
        let curve = algorithm_curve(algorithm)?;
        let inner: EcPrivateKey = simple_asn1::der_decode(key_octets)?;

        Ok((
            Self {
                curve,
                private_key: inner.private_key,
            },
            &[],
        ))
    }
}

impl ToASN1 for PrivateKeyInfo {
    type Error = Error;
    fn to_asn1_class(&self, _class: ASN1Class) -> Result<Vec<ASN1Block>, Self::Error> {
        let inner = EcPrivateKey {
            private_key: self.private_key.clone(),
            curve: None,
            public_key: None,
        };
        Ok(vec![ASN1Block::Sequence(
            0,
            vec![
                ASN1Block::Integer(0, BigInt::from(0)),
                algorithm_identifier(self.curve),
                ASN1Block::OctetString(0, der_encode(&inner)?),
            ],
        )])
    }
}

/// EC subject public key info, as specified in [RFC 5280].
///
/// [RFC 5280]: https://datatracker.ietf.org/doc/html/rfc5280#section-4.1.2.7 "RFC 5280 Internet X.509 PKI - 4.1.2.7. Subject Public Key Info"
#[derive(Debug, Clone)]
pub struct SubjectPublicKeyInfo {
    pub curve: EcCurve,
    pub public_key: BitString,
}

impl FromASN1 for SubjectPublicKeyInfo {
    type Error = Error;
    fn from_asn1(v: &[ASN1Block]) -> Result<(Self, &[ASN1Block]), Self::Error> {
        let items = match v {
            [ASN1Block::Sequence(_, items)] => items,
            _ => return Err(Error::BadFormat),
        };
        let (algorithm, bits) = match items.as_slice() {
            [ASN1Block::Sequence(_, algorithm), ASN1Block::BitString(_, _, bits)] => {
                (algorithm, bits)
            }
            _ => return Err(Error::BadFormat),
        };
        let curve = algorithm_curve(algorithm)?;

        Ok((
            Self {
                curve,
                public_key: BitString(bits.clone()),
            },
            &[],
        ))
    }
}

impl ToASN1 for SubjectPublicKeyInfo {
    type Error = Error;
    fn to_asn1_class(&self, _class: ASN1Class) -> Result<Vec<ASN1Block>, Self::Error> {
        Ok(vec![ASN1Block::Sequence(
            0,
            vec![
                algorithm_identifier(self.curve),
                ASN1Block::BitString(0, self.public_key.0.len() * 8, self.public_key.0.clone()),
            ],
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_identifier_requires_ec_public_key() {
        // rsaEncryption 1.2.840.113549.1.1.1
        let rsa = OID::new(
            [1u32, 2, 840, 113549, 1, 1, 1]
                .iter()
                .map(|&arc| BigUint::new(vec![arc]))
                .collect(),
        );
        let blocks = [
            ASN1Block::ObjectIdentifier(0, rsa),
            ASN1Block::ObjectIdentifier(0, curve_oid(EcCurve::P256)),
        ];
        assert!(matches!(
            algorithm_curve(&blocks),
            Err(Error::UnsupportedAlgorithm)
        ));
    }

    #[test]
    fn unknown_curve_oid() {
        // 1.3.132.0.10 (secp256k1) is not a supported curve
        let secp256k1 = OID::new(
            [1u32, 3, 132, 0, 10]
                .iter()
                .map(|&arc| BigUint::new(vec![arc]))
                .collect(),
        );
        assert!(matches!(
            curve_from_oid(&secp256k1),
            Err(Error::UnknownCurve)
        ));
    }

    #[test]
    fn sec1_rejects_wrong_version() {
        let blocks = vec![ASN1Block::Sequence(
            0,
            vec![
                ASN1Block::Integer(0, BigInt::from(2)),
                ASN1Block::OctetString(0, vec![1; 32]),
            ],
        )];
        assert!(matches!(
            EcPrivateKey::from_asn1(&blocks),
            Err(Error::BadVersion)
        ));
    }
}
