//! Column-letter notation (A, B, ..., Z, AA, AB, ...).

use crate::error::{CatalogError, Result};

/// Convert a column position to spreadsheet column letters
///
/// `base` says whether `index` counts from 1 (the usual case) or from 0.
/// Any other base, or an index below the base, is rejected.
///
/// # Examples
///
/// ```
/// use sheetshop_catalog::column_letter;
///
/// assert_eq!(column_letter(1, 1).unwrap(), "A");
/// assert_eq!(column_letter(27, 1).unwrap(), "AA");
/// assert_eq!(column_letter(0, 0).unwrap(), "A");
/// ```
pub fn column_letter(index: u32, base: u32) -> Result<String> {
    if base > 1 || index < base {
        return Err(CatalogError::InvalidColumnIndex { index, base });
    }

    // Bijective base-26 over the 1-based position
    let mut n = u64::from(index - base) + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.push(char::from(b'A' + rem));
        n = (n - 1) / 26;
    }

    Ok(letters.into_iter().rev().collect())
}

/// Convert column letters back to a 1-based position (A=1, Z=26, AA=27)
///
/// Returns `None` for empty input or anything other than ASCII letters.
pub fn column_index(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    let mut result: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let value = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        result = result.checked_mul(26)?.checked_add(value)?;
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Subtractive two-letter conversion; only correct up to `ZZ`.
    fn legacy_letter(mut column: u32, start: u32) -> String {
        let mut letter = String::new();
        while column > 25 + start {
            letter.push(char::from_u32(65 + (column - start) / 26 - 1).unwrap());
            column -= ((column - start) / 26) * 26;
        }
        letter.push(char::from_u32(65 - start + column).unwrap());
        letter
    }

    #[test]
    fn test_single_letters() {
        assert_eq!(column_letter(1, 1).unwrap(), "A");
        assert_eq!(column_letter(2, 1).unwrap(), "B");
        assert_eq!(column_letter(26, 1).unwrap(), "Z");
    }

    #[test]
    fn test_double_letters() {
        assert_eq!(column_letter(27, 1).unwrap(), "AA");
        assert_eq!(column_letter(28, 1).unwrap(), "AB");
        assert_eq!(column_letter(52, 1).unwrap(), "AZ");
        assert_eq!(column_letter(53, 1).unwrap(), "BA");
        assert_eq!(column_letter(702, 1).unwrap(), "ZZ");
    }

    #[test]
    fn test_triple_letters() {
        assert_eq!(column_letter(703, 1).unwrap(), "AAA");
        assert_eq!(column_letter(18278, 1).unwrap(), "ZZZ");
    }

    #[test]
    fn test_zero_base() {
        assert_eq!(column_letter(0, 0).unwrap(), "A");
        assert_eq!(column_letter(25, 0).unwrap(), "Z");
        assert_eq!(column_letter(26, 0).unwrap(), "AA");
    }

    #[test]
    fn test_out_of_domain() {
        assert!(matches!(
            column_letter(0, 1),
            Err(CatalogError::InvalidColumnIndex { index: 0, base: 1 })
        ));
        assert!(column_letter(5, 2).is_err());
    }

    #[test]
    fn test_matches_legacy_loop_up_to_zz() {
        for start in [0u32, 1] {
            for index in start..=(701 + start) {
                assert_eq!(
                    column_letter(index, start).unwrap(),
                    legacy_letter(index, start),
                    "index {} base {}",
                    index,
                    start
                );
            }
        }
    }

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("A"), Some(1));
        assert_eq!(column_index("z"), Some(26));
        assert_eq!(column_index("AA"), Some(27));
        assert_eq!(column_index("BA"), Some(53));
        assert_eq!(column_index(""), None);
        assert_eq!(column_index("A1"), None);
    }

    #[test]
    fn test_index_inverts_letter() {
        for index in 1..=2000 {
            let letters = column_letter(index, 1).unwrap();
            assert_eq!(column_index(&letters), Some(index));
        }
    }
}
