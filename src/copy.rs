//! Bounds checking shared by every `copy_to`.

use crate::error::{FpError, Result};
use crate::fixed::Fp;

/// Copy `components` into `array` starting at `index`.
///
/// The three failure kinds stay distinct because callers branch on them:
/// a missing array, a start index outside the array, and a start index that
/// leaves too few elements.
pub(crate) fn copy_components(
    components: &[Fp],
    array: Option<&mut [Fp]>,
    index: isize,
) -> Result<()> {
    let array = array.ok_or(FpError::NullArgument)?;
    let len = array.len();
    let start = usize::try_from(index)
        .ok()
        .filter(|&start| start < len)
        .ok_or(FpError::IndexOutOfRange { index, len })?;
    let available = len - start;
    if available < components.len() {
        return Err(FpError::InsufficientSpace {
            index: start,
            required: components.len(),
            available,
        });
    }
    array[start..start + components.len()].copy_from_slice(components);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREE: [Fp; 3] = [Fp::ONE, Fp::TWO, Fp::HALF];

    #[test]
    fn copies_at_offset() {
        let mut array = [Fp::ZERO; 5];
        copy_components(&THREE, Some(&mut array), 2).unwrap();
        assert_eq!(array, [Fp::ZERO, Fp::ZERO, Fp::ONE, Fp::TWO, Fp::HALF]);
    }

    #[test]
    fn distinguishes_failure_kinds() {
        assert_eq!(copy_components(&THREE, None, 0), Err(FpError::NullArgument));

        let mut short = [Fp::ZERO; 2];
        assert_eq!(
            copy_components(&THREE, Some(&mut short), 0),
            Err(FpError::InsufficientSpace {
                index: 0,
                required: 3,
                available: 2
            })
        );

        let mut five = [Fp::ZERO; 5];
        assert_eq!(
            copy_components(&THREE, Some(&mut five), 4),
            Err(FpError::InsufficientSpace {
                index: 4,
                required: 3,
                available: 1
            })
        );
        assert_eq!(
            copy_components(&THREE, Some(&mut five), -1),
            Err(FpError::IndexOutOfRange { index: -1, len: 5 })
        );
        assert_eq!(
            copy_components(&THREE, Some(&mut five), 5),
            Err(FpError::IndexOutOfRange { index: 5, len: 5 })
        );
        // failed copies leave the destination untouched
        assert_eq!(five, [Fp::ZERO; 5]);
    }
}
