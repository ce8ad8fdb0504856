#![allow(clippy::unwrap_used, reason = "tests panic on failure")]

use super::*;
use crate::ShapeEnv;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn concrete(sizes: &[i64]) -> Vec<SymInt> {
    sizes.iter().copied().map(SymInt::from_int).collect()
}

fn ints(values: &[SymInt]) -> Vec<Option<i64>> {
    values.iter().map(SymInt::maybe_as_int).collect()
}

#[test]
fn concrete_strides_and_numel() {
    let sizes = concrete(&[2, 3, 4]);
    assert_eq!(ints(&contiguous_strides(&sizes)), vec![Some(12), Some(4), Some(1)]);
    assert_eq!(numel(&sizes), 24);
    assert!(!has_symbolic_sizes_strides(&sizes, &contiguous_strides(&sizes)));
}

#[test]
fn empty_shape() {
    assert!(contiguous_strides(&[]).is_empty());
    assert_eq!(numel(&[]), 1);
}

#[test]
fn symbolic_strides() {
    let env = ShapeEnv::new();
    let sizes = env.create_shapes_for_args(&[&[5, 1, 7]]).unwrap().remove(0);
    let strides = contiguous_strides(&sizes);
    let rendered: Vec<String> = strides.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["((1 * s0[2]) * 1)", "(1 * s0[2])", "1"]);
    assert_eq!(numel(&sizes).to_string(), "(((1 * s0[0]) * 1) * s0[2])");
    assert!(has_symbolic_sizes_strides(&sizes, &strides));
    assert!(has_symbolic_sizes_strides(&concrete(&[3]), &strides[1..]));
    assert_eq!(numel(&sizes).guard_int().unwrap(), 35);
}

proptest! {
    #[test]
    fn numel_matches_product(sizes in prop::collection::vec(0_i64..64, 0..6)) {
        let expected: i64 = sizes.iter().product();
        prop_assert_eq!(numel(&concrete(&sizes)).maybe_as_int(), Some(expected));
    }

    #[test]
    fn first_stride_times_size_is_numel(sizes in prop::collection::vec(1_i64..32, 1..6)) {
        let symints = concrete(&sizes);
        let strides = contiguous_strides(&symints);
        prop_assert_eq!(
            (&strides[0] * &symints[0]).maybe_as_int(),
            numel(&symints).maybe_as_int()
        );
    }
}
