//! Shape arithmetic over symbolic sizes.

use sym_int::SymInt;

/// Row-major strides for `sizes`: the last dimension has stride 1 and each
/// earlier stride is the product of the sizes after it.
///
/// An empty shape has no strides.
pub fn contiguous_strides(sizes: &[SymInt]) -> Vec<SymInt> {
    let mut strides = vec![SymInt::from_int(1); sizes.len()];
    for dim in (0..sizes.len().saturating_sub(1)).rev() {
        strides[dim] = &strides[dim + 1] * &sizes[dim + 1];
    }
    strides
}

/// Number of elements: the product of `sizes`, 1 for a scalar shape.
pub fn numel(sizes: &[SymInt]) -> SymInt {
    sizes.iter().product()
}

/// Whether any size or stride is symbolic.
pub fn has_symbolic_sizes_strides(sizes: &[SymInt], strides: &[SymInt]) -> bool {
    sizes.iter().chain(strides).any(SymInt::is_symbolic)
}

#[cfg(test)]
mod tests;
