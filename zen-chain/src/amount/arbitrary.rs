//! Randomised property testing for [`Amount`]s and [`PublicAmount`]s.

use std::fmt;

use num_bigint::BigUint;
use proptest::prelude::*;

use super::{Amount, Constraint, PublicAmount};

impl<C> Arbitrary for Amount<C>
where
    C: Constraint + fmt::Debug,
{
    type Parameters = ();

    fn arbitrary_with(_args: ()) -> Self::Strategy {
        C::valid_range()
            .prop_map(|v| Self(v, std::marker::PhantomData))
            .boxed()
    }

    type Strategy = BoxedStrategy<Self>;
}

impl Arbitrary for PublicAmount {
    type Parameters = ();

    /// Generates public amounts that pass [`PublicAmount::check_range`].
    fn arbitrary_with(_args: ()) -> Self::Strategy {
        any::<[u8; 32]>()
            .prop_map(|bytes| BigUint::from_bytes_be(&bytes).into())
            .boxed()
    }

    type Strategy = BoxedStrategy<Self>;
}
