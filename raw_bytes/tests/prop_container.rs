//! Property-based tests for raw_bytes::Container.

use proptest::prelude::*;

use raw_bytes::{Container, ContainerError};

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck_derive::Pod, bytemuck_derive::Zeroable)]
struct P {
    a: u32,
    b: u32,
}

//
// -----------------------------------------------------------------------------
// Push / Read
// -----------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_push_read(values: Vec<(u32, u32)>) {
        let mut c = Container::<P>::new();

        for (a, b) in &values {
            c.push(P { a: *a, b: *b });
        }

        prop_assert_eq!(c.len(), values.len());

        for (i, (a, b)) in values.iter().enumerate() {
            let v = c.get(i).unwrap();
            prop_assert_eq!(v.a, *a);
            prop_assert_eq!(v.b, *b);
        }

        prop_assert_eq!(c.get(values.len()), Err(ContainerError::OutOfBounds(values.len())));
    }
}

proptest! {
    #[test]
    fn prop_random_write(values: Vec<u32>, index in 0usize..1000, new_val: u32) {
        let mut c = Container::from_slice(&values);

        if !values.is_empty() {
            let i = index % values.len();
            c.write(i, new_val).unwrap();
            prop_assert_eq!(c[i], new_val);

            for (j, &expected) in values.iter().enumerate() {
                if j != i {
                    prop_assert_eq!(c[j], expected);
                }
            }
        }
    }
}

//
// -----------------------------------------------------------------------------
// Growth and Shrinking
// -----------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_pop_reverses_push(values in prop::collection::vec(any::<u16>(), 0..300)) {
        let mut c = Container::new();
        for &v in &values {
            c.push(v);
            prop_assert!(c.capacity() >= c.len());
        }

        let mut popped = Vec::new();
        while let Some(v) = c.pop() {
            popped.push(v);
        }
        popped.reverse();

        prop_assert_eq!(popped, values);
        prop_assert!(c.is_empty());
    }
}

proptest! {
    #[test]
    fn prop_truncate_keeps_prefix(
        values in prop::collection::vec(any::<u8>(), 0..200),
        len in 0usize..250
    ) {
        let mut c = Container::from_slice(&values);
        c.truncate(len);

        let expected = len.min(values.len());
        prop_assert_eq!(c.len(), expected);
        prop_assert_eq!(c.as_slice(), &values[..expected]);

        c.shrink_to_fit();
        prop_assert_eq!(c.as_slice(), &values[..expected]);
    }
}

proptest! {
    #[test]
    fn prop_try_zeroed_is_zero(len in 0usize..4096) {
        let c = Container::<P>::try_zeroed(len).unwrap();
        prop_assert_eq!(c.len(), len);
        prop_assert!(c.as_bytes().iter().all(|&b| b == 0));
    }
}
