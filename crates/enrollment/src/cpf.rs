//! Brazilian individual taxpayer number (CPF) checksum validation.

pub const CPF_LEN: usize = 11;

/// Returns `true` when `cpf` carries 11 digits (punctuation ignored) with valid check digits.
///
/// Sequences of a single repeated digit pass the checksum arithmetic but are never issued, so
/// they are rejected up front.
pub fn validate(cpf: &str) -> bool {
    let digits = digits_of(cpf);
    if digits.len() != CPF_LEN {
        return false;
    }
    if digits.iter().all(|&digit| digit == digits[0]) {
        return false;
    }

    let mut prefix = digits[..9].to_vec();
    let first = check_digit(&prefix);
    prefix.push(first);
    let second = check_digit(&prefix);

    digits[9] == first && digits[10] == second
}

/// The 11 bare digits of a valid CPF, or `None` when [`validate`] fails.
pub fn normalize(cpf: &str) -> Option<String> {
    if !validate(cpf) {
        return None;
    }
    Some(cpf.chars().filter(char::is_ascii_digit).collect())
}

/// Log-safe rendering that keeps only the last four digits.
pub fn mask(cpf: &str) -> String {
    let digits: Vec<char> = cpf.chars().filter(char::is_ascii_digit).collect();
    let visible = digits.len().saturating_sub(4);
    digits
        .iter()
        .enumerate()
        .map(|(idx, digit)| if idx < visible { '*' } else { *digit })
        .collect()
}

fn digits_of(cpf: &str) -> Vec<u32> {
    cpf.chars().filter_map(|c| c.to_digit(10)).collect()
}

// Weights run from len+1 down to 2.
fn check_digit(digits: &[u32]) -> u32 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .zip((2..=top).rev())
        .map(|(digit, weight)| digit * weight)
        .sum();

    match sum % 11 {
        remainder if remainder < 2 => 0,
        remainder => 11 - remainder,
    }
}
