// Base58Check addresses bound to a network profile
use crate::chainparams::{Base58Type, NetworkProfile};

/// Longest address a user may enter (pubkey and script addresses).
pub const MAX_ADDRESS_LENGTH: usize = 35;

/// Hash160 payload of pubkey and script addresses.
pub const ADDRESS_PAYLOAD_BYTES: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("Address prefix does not belong to the {0} network")]
    WrongNetwork(String),
    #[error("Invalid address encoding")]
    InvalidEncoding,
    #[error("Invalid address length")]
    InvalidLength,
    #[error("Invalid address checksum")]
    InvalidChecksum,
}

/// Payload sizes accepted for each kind. Secret keys may carry the
/// compressed-pubkey marker byte.
fn payload_len_ok(kind: Base58Type, len: usize) -> bool {
    match kind {
        Base58Type::PubkeyAddress | Base58Type::ScriptAddress => len == ADDRESS_PAYLOAD_BYTES,
        Base58Type::SecretKey => len == 32 || len == 33,
        Base58Type::ExtPublicKey | Base58Type::ExtSecretKey => len == 74,
    }
}

/// Encodes `payload` with the profile's prefix for `kind`.
pub fn encode_address(profile: &NetworkProfile, kind: Base58Type, payload: &[u8]) -> String {
    let prefix = profile.base58_prefix(kind);
    let mut data = Vec::with_capacity(prefix.len() + payload.len());
    data.extend_from_slice(prefix);
    data.extend_from_slice(payload);
    bs58::encode(data).with_check().into_string()
}

/// Decodes a Base58Check string and works out which kind it is.
///
/// Kinds are tried in `Base58Type::ALL` order, so when two prefixes are equal
/// the pubkey address wins.
pub fn decode_address(profile: &NetworkProfile, s: &str) -> Result<(Base58Type, Vec<u8>), AddressError> {
    let data = bs58::decode(s.trim())
        .with_check(None)
        .into_vec()
        .map_err(|e| match e {
            bs58::decode::Error::InvalidChecksum { .. } => AddressError::InvalidChecksum,
            bs58::decode::Error::NoChecksum => AddressError::InvalidLength,
            _ => AddressError::InvalidEncoding,
        })?;

    let mut prefix_matched = false;
    for kind in Base58Type::ALL {
        let prefix = profile.base58_prefix(kind);
        if let Some(payload) = data.strip_prefix(prefix) {
            prefix_matched = true;
            if payload_len_ok(kind, payload.len()) {
                return Ok((kind, payload.to_vec()));
            }
        }
    }

    // A prefix hit with a bad payload is only a length error when no kind
    // could have produced data of this size. Otherwise the address belongs to
    // another network whose version byte collides with one of ours.
    if prefix_matched && !has_known_shape(profile, data.len()) {
        Err(AddressError::InvalidLength)
    } else {
        Err(AddressError::WrongNetwork(profile.network_id().to_string()))
    }
}

fn has_known_shape(profile: &NetworkProfile, len: usize) -> bool {
    Base58Type::ALL.into_iter().any(|kind| {
        len.checked_sub(profile.base58_prefix(kind).len())
            .is_some_and(|n| payload_len_ok(kind, n))
    })
}

/// Checks a user-entered destination: a pubkey or script address of this
/// network, at most `MAX_ADDRESS_LENGTH` characters.
pub fn validate_address(profile: &NetworkProfile, s: &str) -> Result<Base58Type, AddressError> {
    let s = s.trim();
    if s.len() > MAX_ADDRESS_LENGTH {
        return Err(AddressError::InvalidLength);
    }
    match decode_address(profile, s)? {
        (kind @ (Base58Type::PubkeyAddress | Base58Type::ScriptAddress), _) => Ok(kind),
        _ => Err(AddressError::InvalidLength),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chainparams::{main_profile, test_profile};

    const PAYLOAD: [u8; 20] = [
        0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff,
        0x00, 0x01, 0x02, 0x03, 0x04,
    ];

    #[test]
    fn test_encode_decode_pubkey() {
        let main = main_profile().unwrap();
        let addr = encode_address(&main, Base58Type::PubkeyAddress, &PAYLOAD);
        assert!(addr.len() <= MAX_ADDRESS_LENGTH);
        // version byte 63 puts every main address in the 'S' range
        assert!(addr.starts_with('S'));
        let (kind, payload) = decode_address(&main, &addr).unwrap();
        assert_eq!(kind, Base58Type::PubkeyAddress);
        assert_eq!(payload, PAYLOAD);
    }

    #[test]
    fn test_main_script_reads_as_pubkey() {
        let main = main_profile().unwrap();
        let script = encode_address(&main, Base58Type::ScriptAddress, &PAYLOAD);
        let pubkey = encode_address(&main, Base58Type::PubkeyAddress, &PAYLOAD);
        assert_eq!(script, pubkey);
        assert_eq!(
            decode_address(&main, &script).unwrap().0,
            Base58Type::PubkeyAddress
        );
    }

    #[test]
    fn test_test_network_kinds_distinct() {
        let test = test_profile().unwrap();
        let script = encode_address(&test, Base58Type::ScriptAddress, &PAYLOAD);
        assert_eq!(
            decode_address(&test, &script).unwrap().0,
            Base58Type::ScriptAddress
        );
        assert_eq!(validate_address(&test, &script), Ok(Base58Type::ScriptAddress));
    }

    #[test]
    fn test_cross_network_rejected() {
        let main = main_profile().unwrap();
        let test = test_profile().unwrap();
        let addr = encode_address(&test, Base58Type::PubkeyAddress, &PAYLOAD);
        assert_eq!(
            decode_address(&main, &addr),
            Err(AddressError::WrongNetwork("main".to_string()))
        );
        let addr = encode_address(&main, Base58Type::PubkeyAddress, &PAYLOAD);
        assert!(matches!(
            decode_address(&test, &addr),
            Err(AddressError::WrongNetwork(_))
        ));
    }

    #[test]
    fn test_colliding_prefix_reports_wrong_network() {
        // test pubkey prefix 100 is the main secret key prefix
        let main = main_profile().unwrap();
        let test = test_profile().unwrap();
        assert_eq!(
            test.base58_prefix(Base58Type::PubkeyAddress),
            main.base58_prefix(Base58Type::SecretKey)
        );
        let addr = encode_address(&test, Base58Type::PubkeyAddress, &PAYLOAD);
        assert_eq!(
            validate_address(&main, &addr),
            Err(AddressError::WrongNetwork("main".to_string()))
        );

        // a truncated key under the same prefix is still a length error
        let short = encode_address(&main, Base58Type::SecretKey, &[7u8; 25]);
        assert_eq!(decode_address(&main, &short), Err(AddressError::InvalidLength));
    }

    #[test]
    fn test_checksum_and_alphabet() {
        let main = main_profile().unwrap();
        let mut addr = encode_address(&main, Base58Type::PubkeyAddress, &PAYLOAD);
        let last = addr.pop().unwrap();
        addr.push(if last == '1' { '2' } else { '1' });
        assert_eq!(decode_address(&main, &addr), Err(AddressError::InvalidChecksum));
        assert_eq!(decode_address(&main, "S0Il"), Err(AddressError::InvalidEncoding));
    }

    #[test]
    fn test_wrong_payload_length() {
        let main = main_profile().unwrap();
        let short = encode_address(&main, Base58Type::PubkeyAddress, &PAYLOAD[..19]);
        assert_eq!(decode_address(&main, &short), Err(AddressError::InvalidLength));
    }

    #[test]
    fn test_secret_key_is_not_a_destination() {
        let main = main_profile().unwrap();
        let wif = encode_address(&main, Base58Type::SecretKey, &[7u8; 33]);
        assert_eq!(decode_address(&main, &wif).unwrap().0, Base58Type::SecretKey);
        assert!(validate_address(&main, &wif).is_err());
    }
}
