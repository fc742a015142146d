//! The X25519 function of RFC 7748 over the `curve25519` preset.

use crate::{
    Error, Result,
    curve::Curve,
    presets::{CurveName, preset},
};
use bignum::BigInt;
use zeroize::Zeroizing;

/// u-coordinate of the curve25519 base point, little endian.
pub const X25519_BASEPOINT_BYTES: [u8; 32] = {
    let mut bytes = [0u8; 32];
    bytes[0] = 9;
    bytes
};

/// Clamp a little-endian scalar per RFC 7748: clear the three low bits and
/// the top bit, set bit 254.
pub fn clamp_scalar(mut scalar: [u8; 32]) -> [u8; 32] {
    scalar[0] &= 248;
    scalar[31] &= 127;
    scalar[31] |= 64;
    scalar
}

/// `X25519(k, u)`: the little-endian u-coordinate of the clamped scalar `k`
/// times the point with u-coordinate `u`.
///
/// The top bit of `u` is ignored and non-canonical values are reduced. Points
/// on the twist are accepted. Fails with [`Error::PointAtInfinity`] when the
/// product is the identity, which happens for low-order inputs.
pub fn x25519(scalar_bytes: [u8; 32], point_bytes: [u8; 32]) -> Result<[u8; 32]> {
    let Curve::Mont(curve) = preset(CurveName::Curve25519)?.curve() else {
        return Err(Error::UnsupportedOperation);
    };

    let scalar = Zeroizing::new(clamp_scalar(scalar_bytes));
    let k = Zeroizing::new(BigInt::from_le_bytes(&*scalar));

    let mut u = point_bytes;
    u[31] &= 127;
    let u = BigInt::from_le_bytes(&u).rem_euclid(curve.p());

    let shared = curve.point_unchecked(&u)?.mul(&k);
    let mut out = [0u8; 32];
    out.copy_from_slice(&shared.get_x()?.to_le_bytes_padded(32)?);
    Ok(out)
}

/// `X25519(k, 9)`: the public key for the secret `k`.
pub fn x25519_base(scalar_bytes: [u8; 32]) -> Result<[u8; 32]> {
    x25519(scalar_bytes, X25519_BASEPOINT_BYTES)
}
