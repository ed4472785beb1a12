//! Random identifiers handed out by the wallet provider

use chrono::{DateTime, Utc};
use rand::Rng;

/// Six-digit one-time password (never starts with 0)
pub fn otp<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.gen_range(100_000..=999_999u32).to_string()
}

/// Operation token: `TR` + unix millis + up to four random digits
pub fn token<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> String {
    format!("TR{}{}", now.timestamp_millis(), rng.gen_range(0..10_000u32))
}

/// Ten-digit, zero-padded transaction reference
pub fn reference_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{:010}", rng.gen_range(0..10_000_000_000u64))
}

/// Wallet contract id: `LAN` + unix millis + up to three random digits
pub fn contract_id<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> String {
    format!("LAN{}{}", now.timestamp_millis(), rng.gen_range(0..1_000u32))
}

/// 24-digit account number
pub fn rib<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut rib = String::with_capacity(24);
    rib.push(char::from(b'0' + rng.gen_range(1..=9u8)));
    for _ in 1..24 {
        rib.push(char::from(b'0' + rng.gen_range(0..=9u8)));
    }
    rib
}
