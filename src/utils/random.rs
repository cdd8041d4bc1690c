use rand::{Rng, distr::Alphanumeric};

const BASE32_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Generates a random alphanumeric string of the specified length.
pub fn generate_random_string(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect::<String>()
}

/// Generates a random base32 string. 32 characters encode 160 bits, the
/// secret width used for password-reset codes.
pub fn generate_base32_string(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| BASE32_ALPHABET[rng.random_range(0..BASE32_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base32_strings_stay_in_alphabet() {
        let secret = generate_base32_string(32);
        assert_eq!(secret.len(), 32);
        assert!(secret.bytes().all(|b| BASE32_ALPHABET.contains(&b)));
    }

    #[test]
    fn random_strings_have_requested_length() {
        assert_eq!(generate_random_string(24).len(), 24);
    }
}
