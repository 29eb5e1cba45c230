//! Enumeration of the joint assignments of a list of variables.
//! The first variable varies fastest, matching the table layout.

use docalc_core::types::collections::SmallVec8;

/// Call `f` on every index tuple of the domain `dims`, first index fastest.
/// An empty `dims` has exactly one (empty) assignment.
pub fn for_each_index(dims: &[usize], mut f: impl FnMut(&[usize])) {
    if dims.contains(&0) {
        return;
    }
    let mut current: SmallVec8<usize> = dims.iter().map(|_| 0).collect();
    loop {
        f(&current);
        let mut axis = 0;
        loop {
            if axis == dims.len() {
                return;
            }
            current[axis] += 1;
            if current[axis] < dims[axis] {
                break;
            }
            current[axis] = 0;
            axis += 1;
        }
    }
}

/// Strides of a first-fastest layout.
pub fn strides(dims: &[usize]) -> SmallVec8<usize> {
    let mut out = SmallVec8::with_capacity(dims.len());
    let mut acc = 1;
    for &d in dims {
        out.push(acc);
        acc *= d;
    }
    out
}

/// Offset of `index` given `strides`.
pub fn offset(index: &[usize], strides: &[usize]) -> usize {
    index.iter().zip(strides).map(|(i, s)| i * s).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_index_varies_fastest() {
        let mut seen = Vec::new();
        for_each_index(&[2, 3], |idx| seen.push(idx.to_vec()));
        assert_eq!(seen.len(), 6);
        assert_eq!(seen[0], vec![0, 0]);
        assert_eq!(seen[1], vec![1, 0]);
        assert_eq!(seen[2], vec![0, 1]);
        assert_eq!(seen[5], vec![1, 2]);
    }

    #[test]
    fn empty_domain_has_one_assignment() {
        let mut count = 0;
        for_each_index(&[], |_| count += 1);
        assert_eq!(count, 1);
    }

    #[test]
    fn offsets_follow_strides() {
        let s = strides(&[2, 3, 2]);
        assert_eq!(s.as_slice(), &[1, 2, 6]);
        assert_eq!(offset(&[1, 2, 1], &s), 1 + 4 + 6);
    }
}
