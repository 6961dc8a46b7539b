//! Case number derivation (`NNN-X`).

use rand::Rng;

use crate::models::Patient;

const LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Numeric prefix of a case number: the text before the first `-`, read as
/// leading decimal digits after any leading whitespace and an optional `+`.
///
/// `"012-Q"` gives 12, `"7x-B"` gives 7, `"+5-A"` gives 5, `"-B"` and
/// `"abc"` give `None`.
pub fn case_number_prefix(case_number: &str) -> Option<u64> {
    let head = case_number.split('-').next()?.trim_start();
    let head = head.strip_prefix('+').unwrap_or(head);
    let digits_end = head
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(head.len());
    head[..digits_end].parse().ok()
}

/// Next case number after every prefix present in `patients`.
///
/// The numeric part is one more than the highest parsable prefix (1 when
/// there is none) and the letter is drawn uniformly from A-Z. Nothing checks
/// the result against existing case numbers.
pub fn next_case_number<R: Rng + ?Sized>(patients: &[Patient], rng: &mut R) -> String {
    let next = patients
        .iter()
        .filter_map(|p| case_number_prefix(&p.case_number))
        .max()
        .map_or(1, |max| max.saturating_add(1));
    let letter = LETTERS[rng.gen_range(0..LETTERS.len())] as char;
    format!("{:03}-{}", next, letter)
}
